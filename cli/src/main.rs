//! rostermanual CLI - Cartup CxP Roster Management System manual generator
//!
//! Builds the user manual as DOCX (or a Markdown, text or JSON preview) and
//! inspects generated packages.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use rostermanual::render::JsonFormat;
use rostermanual::{ManualConfig, OoxmlContainer, OutputFormat};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Cartup CxP Roster Management System user manual generator
#[derive(Parser)]
#[command(
    name = "rostermanual",
    author = "Cartup CxP Team",
    version,
    about = "Generate the roster system user manual",
    long_about = "rostermanual - builds the Cartup CxP Roster Management System user manual.\n\n\
                  Writes a DOCX document, or previews it as Markdown, plain text or JSON."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the manual
    #[command(visible_alias = "gen")]
    Generate {
        /// Output file path (default: the configured output for DOCX, stdout otherwise)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "docx")]
        format: FormatArg,
    },

    /// Show metadata and content statistics of a DOCX file
    Inspect {
        /// Input file path
        input: PathBuf,

        /// Also list the package parts
        #[arg(long)]
        parts: bool,

        /// Print the parsed document as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration as TOML
    InitConfig {
        /// Destination path
        #[arg(default_value = "rostermanual.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show version information
    Version,
}

/// Output format
#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Word document
    Docx,
    /// Markdown preview
    #[value(alias = "md")]
    Markdown,
    /// Plain text preview
    Text,
    /// Document model as JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Docx => OutputFormat::Docx,
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}: {}", "❌".red(), "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "rostermanual=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Generate {
            output,
            config,
            format,
        } => {
            let config = match config {
                Some(path) => ManualConfig::load(path)?,
                None => ManualConfig::default(),
            };
            let format = OutputFormat::from(format);

            let pb = create_spinner("Building manual...");
            let bytes = rostermanual::render_manual(&config, format)?;
            pb.finish_and_clear();

            match format {
                OutputFormat::Docx => {
                    let path = output.unwrap_or_else(|| PathBuf::from(&config.output));
                    fs::write(&path, &bytes)?;
                    print_success(&path, &config);
                }
                _ => {
                    write_output(output.as_ref(), &bytes)?;
                    if let Some(path) = output {
                        println!(
                            "{} Manual preview written: {}",
                            "✓".green().bold(),
                            path.display()
                        );
                    }
                }
            }
        }

        Commands::Inspect { input, parts, json } => {
            let pb = create_spinner("Reading document...");
            let doc = rostermanual::inspect(&input)?;
            let container = if parts {
                Some(OoxmlContainer::open(&input)?)
            } else {
                None
            };
            pb.finish_and_clear();

            if json {
                let out = rostermanual::render::to_json(&doc, JsonFormat::Pretty)?;
                write_output(None, out.as_bytes())?;
                return Ok(());
            }

            println!("{}", "Document Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            if let Some(ref title) = doc.metadata.title {
                println!("{}: {}", "Title".bold(), title);
            }
            if let Some(ref author) = doc.metadata.author {
                println!("{}: {}", "Author".bold(), author);
            }
            if let Some(ref created) = doc.metadata.created {
                println!("{}: {}", "Created".bold(), created);
            }
            if let Some(ref app) = doc.metadata.application {
                println!("{}: {}", "Application".bold(), app);
            }
            println!("{}: {}", "Sections".bold(), doc.sections.len());

            let stats = doc.stats();
            println!("\n{}", "Content Statistics".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Headings".bold(), stats.headings);
            println!("{}: {}", "Paragraphs".bold(), stats.paragraphs);
            println!("{}: {}", "List items".bold(), stats.list_items);
            println!(
                "{}: {} ({} rows)",
                "Tables".bold(),
                stats.tables,
                stats.table_rows
            );
            println!("{}: {}", "Page breaks".bold(), stats.page_breaks);

            let text = doc.plain_text();
            println!("{}: {}", "Words".bold(), text.split_whitespace().count());

            let chapters: Vec<&str> = doc
                .sections
                .iter()
                .filter_map(|s| s.name.as_deref())
                .collect();
            if !chapters.is_empty() {
                println!("\n{}", "Chapters".cyan().bold());
                println!("{}", "─".repeat(40));
                for name in chapters {
                    println!("  {}", name);
                }
            }

            if let Some(container) = container {
                println!("\n{}", "Package Parts".cyan().bold());
                println!("{}", "─".repeat(40));
                for part in container.list_files() {
                    println!("  {}", part);
                }
            }
        }

        Commands::InitConfig { path, force } => {
            if path.exists() && !force {
                return Err(format!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                )
                .into());
            }
            let toml = ManualConfig::default().to_toml()?;
            fs::write(&path, toml)?;
            println!(
                "{} Config file created at {}",
                "✓".green().bold(),
                path.display()
            );
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_success(path: &Path, config: &ManualConfig) {
    println!(
        "\n{} {}",
        "✅".green(),
        "SUCCESS: Complete user manual has been generated!".green().bold()
    );
    println!("📄 File location: {}", path.display());
    println!("📸 Screenshots folder: {}/", config.screenshot_dir);
    println!("\n{}", "The manual includes:".bold());
    for part in rostermanual::manual::INCLUDED_PARTS {
        println!("  {} {}", "✓".green(), part);
    }
}

fn print_version() {
    println!(
        "{} {}",
        "rostermanual".green().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Cartup CxP Roster Management System user manual generator");
    println!();
    println!("Output formats: DOCX, Markdown, text, JSON");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content)?;
            handle.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["rostermanual", "generate"]).unwrap();
        match cli.command {
            Commands::Generate {
                output,
                config,
                format,
            } => {
                assert!(output.is_none());
                assert!(config.is_none());
                assert_eq!(OutputFormat::from(format), OutputFormat::Docx);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_format_alias() {
        let cli =
            Cli::try_parse_from(["rostermanual", "-v", "gen", "--format", "md", "-o", "m.md"])
                .unwrap();
        assert!(cli.verbose);
        let Commands::Generate { format, .. } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(OutputFormat::from(format), OutputFormat::Markdown);
    }

    #[test]
    fn test_init_config_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manual.toml");
        let cli = Cli::try_parse_from(["rostermanual", "init-config", path.to_str().unwrap()])
            .unwrap();
        run(cli).unwrap();

        let loaded = ManualConfig::load(&path).unwrap();
        assert_eq!(loaded, ManualConfig::default());

        let again = Cli::try_parse_from(["rostermanual", "init-config", path.to_str().unwrap()])
            .unwrap();
        assert!(run(again).is_err());
    }

    #[test]
    fn test_generate_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manual.docx");
        let cli = Cli::try_parse_from(["rostermanual", "generate", "-o", path.to_str().unwrap()])
            .unwrap();
        run(cli).unwrap();
        let doc = rostermanual::inspect(&path).unwrap();
        assert_eq!(doc.stats().tables, 5);
    }
}
