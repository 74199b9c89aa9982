use quire_compiler_html::{CompileOptions, OutputFormat};
use serde::{Deserialize, Serialize};

/// Per-session editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Serialization used for change notifications
    pub output_format: OutputFormat,

    /// Maximum undo levels (0 = unlimited)
    pub undo_levels: usize,

    pub html: CompileOptions,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Html,
            undo_levels: 100,
            html: CompileOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: EditorConfig = serde_json::from_str(r#"{"outputFormat":"text"}"#).unwrap();
        assert_eq!(config.output_format, OutputFormat::Text);
        assert_eq!(config.undo_levels, 100);
        assert!(!config.html.pretty);
    }

    #[test]
    fn test_camel_case_keys() {
        let json = serde_json::to_value(EditorConfig::default()).unwrap();
        assert_eq!(json["undoLevels"], 100);
        assert_eq!(json["outputFormat"], "html");
        assert_eq!(json["html"]["indent"], "  ");
    }
}
