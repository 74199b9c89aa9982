use super::{load_document, parse_selection};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use quire_editor::toolbar_state;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ToolbarArgs {
    /// Document file (.html or .json)
    pub input: PathBuf,

    /// Selection: `all`, a path (`0.1`) or a range (`0.0:2.1`)
    #[arg(short, long)]
    pub select: Option<String>,

    /// Print the state as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn toolbar(args: ToolbarArgs, cwd: &str) -> Result<()> {
    let document = load_document(&PathBuf::from(cwd).join(&args.input))?;
    let selection = parse_selection(args.select.as_deref(), document.content())?;
    let state = toolbar_state(document.content(), &selection);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    for entry in &state.entries {
        if entry.active {
            println!("  {} {:<14} {}", "✓".green(), entry.label.bold(), entry.command.name().dimmed());
        } else {
            println!("  {} {:<14} {}", "·".dimmed(), entry.label, entry.command.name().dimmed());
        }
    }

    Ok(())
}
