use super::load_document;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use quire_common::DocumentStats;
use quire_editor::{CompileOptions, Document, OutputFormat};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Document file (.html or .json) or directory of documents
    pub input: PathBuf,

    /// Output format (html, text); overrides config
    #[arg(short, long)]
    pub format: Option<String>,

    /// Pretty-print HTML output
    #[arg(long)]
    pub pretty: bool,

    /// Print document statistics instead of the rendered output
    #[arg(long)]
    pub stats: bool,

    /// Output directory for directory input (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

struct RenderSettings {
    format: OutputFormat,
    options: CompileOptions,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let format = match &args.format {
        Some(name) => name.parse::<OutputFormat>().map_err(|e| anyhow!(e))?,
        None => config.editor.output_format,
    };
    let mut options = config.editor.html.clone();
    options.pretty |= args.pretty;
    let settings = RenderSettings { format, options };

    let input = PathBuf::from(cwd).join(&args.input);
    if input.is_file() {
        let document = load_document(&input)?;
        if args.stats {
            print_stats(&document);
        } else {
            println!("{}", document.render(settings.format, &settings.options));
        }
        return Ok(());
    }

    if !input.is_dir() {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    }

    let files = find_documents(&input);
    if files.is_empty() {
        println!("{}", "⚠️  No documents found".yellow());
        return Ok(());
    }

    let out_dir = args
        .out_dir
        .as_ref()
        .or(config.out_dir.as_ref())
        .map(|dir| PathBuf::from(cwd).join(dir));

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let relative_path = file.strip_prefix(&input).unwrap_or(file);
        match render_file(file, relative_path, &settings, out_dir.as_deref(), args.stats) {
            Ok(()) => success_count += 1,
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    eprintln!();
    if error_count == 0 {
        eprintln!("{} Rendered {} documents", "✅".green(), success_count);
    } else {
        eprintln!(
            "{} Rendered {} documents, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

fn render_file(
    file: &Path,
    relative_path: &Path,
    settings: &RenderSettings,
    out_dir: Option<&Path>,
    stats: bool,
) -> Result<()> {
    let document = load_document(file)?;

    if stats {
        println!("{}", relative_path.display().to_string().bright_white().bold());
        print_stats(&document);
        return Ok(());
    }

    let output = document.render(settings.format, &settings.options);
    match out_dir {
        Some(out_dir) => {
            let extension = match settings.format {
                OutputFormat::Html => "html",
                OutputFormat::Text => "txt",
            };
            let output_file = out_dir.join(relative_path).with_extension(extension);
            if let Some(parent) = output_file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_file, output)?;
            eprintln!(
                "  {} {} → {}",
                "✓".green(),
                relative_path.display(),
                output_file.display()
            );
        }
        None => {
            println!("{}", format!("── {}", relative_path.display()).dimmed());
            println!("{}", output);
        }
    }
    Ok(())
}

fn find_documents(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && matches!(
                    path.extension().and_then(|s| s.to_str()),
                    Some("html") | Some("json")
                )
        })
        .collect();
    files.sort();
    files
}

fn print_stats(document: &Document) {
    let stats = DocumentStats::collect(document.content());
    println!("  {:<12} {}", "paragraphs".dimmed(), stats.paragraphs);
    println!("  {:<12} {}", "lists".dimmed(), stats.lists);
    println!("  {:<12} {}", "list items".dimmed(), stats.list_items);
    println!("  {:<12} {}", "leaves".dimmed(), stats.leaves);
    println!("  {:<12} {}", "words".dimmed(), stats.words);
    println!("  {:<12} {}", "characters".dimmed(), stats.characters);
    if document.content().is_blank() {
        println!("  {}", "(blank)".yellow());
    }
}
