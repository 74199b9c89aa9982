use super::{load_document, parse_selection};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use quire_editor::{EditSession, Mutation, OutputFormat};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Document file (.html or .json)
    pub input: PathBuf,

    /// Toolbar command to run (bold, align:center, list:bulleted, ...); repeatable
    #[arg(short, long = "command")]
    pub commands: Vec<String>,

    /// Selection: `all`, a path (`0.1`) or a range (`0.0:2.1`)
    #[arg(short, long)]
    pub select: Option<String>,

    /// JSON file holding a list of mutations, applied after the commands
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Write the result back to the input file
    #[arg(short, long)]
    pub write: bool,

    /// Print the document tree as JSON instead of the rendered output
    #[arg(long)]
    pub json: bool,

    /// Output format (html, text); overrides config
    #[arg(short, long)]
    pub format: Option<String>,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut editor_config = config.editor.clone();
    if let Some(name) = &args.format {
        editor_config.output_format = name.parse::<OutputFormat>().map_err(|e| anyhow!(e))?;
    }

    let input = PathBuf::from(cwd).join(&args.input);
    let document = load_document(&input)?;
    let selection = parse_selection(args.select.as_deref(), document.content())?;

    let mutations = match &args.script {
        Some(script) => {
            let content = fs::read_to_string(PathBuf::from(cwd).join(script))?;
            serde_json::from_str::<Vec<Mutation>>(&content)?
        }
        None => Vec::new(),
    };

    if args.commands.is_empty() && mutations.is_empty() {
        return Err(anyhow!("Nothing to apply: pass --command or --script"));
    }

    let mut session = EditSession::new("cli", document, editor_config);
    session.set_selection(selection);

    session.begin_batch("quire apply");
    for name in &args.commands {
        session.execute(name)?;
        eprintln!("  {} {}", "✓".green(), name);
    }
    for mutation in mutations {
        let description = mutation.description();
        session.apply(mutation)?;
        eprintln!("  {} {}", "✓".green(), description);
    }
    session.end_batch();

    if args.write {
        let options = session.config().html.clone();
        session.document.save(&options)?;
        eprintln!("{} Wrote {}", "✅".green(), input.display());
    }

    if args.json {
        println!("{}", session.document.to_json()?);
    } else {
        println!("{}", session.output());
    }

    Ok(())
}
