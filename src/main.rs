use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::{fs, path::PathBuf};
use tracing::{debug, info};

use court_lists::config::Config;
use court_lists::observability::init_logging;
use court_lists::pipeline::{registry, summary, CopyTables, ListPipeline, Locale};
use court_lists::PipelineError;

#[derive(Parser, Debug)]
#[command(name = "court-lists", version, about = "Validate, render and summarize hearing lists")]
struct Cli {
    /// TOML config file (defaults to $COURT_LISTS_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct Input {
    /// List type identifier, e.g. SJP_PUBLIC_LIST
    #[arg(long)]
    list_type: String,

    /// Path to the raw list JSON
    path: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every registered list type
    ListTypes,
    /// Check a list against its schema
    Validate {
        #[command(flatten)]
        input: Input,
    },
    /// Print the rendered view model and copy as JSON
    Render {
        #[command(flatten)]
        input: Input,
        /// en or cy; anything else renders English
        #[arg(long, default_value = "en")]
        locale: String,
    },
    /// Print digest summaries
    Summarize {
        #[command(flatten)]
        input: Input,
        /// Print digest email text instead of JSON
        #[arg(long)]
        digest: bool,
    },
    /// Write the list as a PDF
    Pdf {
        #[command(flatten)]
        input: Input,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value = "en")]
        locale: String,
    },
}

fn load_json(path: &PathBuf) -> Result<Value> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let json: Value = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;
    Ok(json)
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = init_logging(&config.logging).context("Failed to initialise logging")?;
    debug!(?config, "configuration loaded");

    let registry = registry::global().context("Failed to build list type registry")?;
    let copy = CopyTables::load_dir(&config.locales.directory)
        .context("Failed to load locale copy tables")?;
    let pipeline = ListPipeline::new(registry)
        .with_pdf_config(config.pdf.clone())
        .with_copy_tables(copy);

    match cli.command {
        Commands::ListTypes => {
            for descriptor in registry.descriptors() {
                let bundle = registry.require(descriptor.id)?;
                println!(
                    "{}\t{} ({} v{}, {:?})",
                    descriptor.id,
                    descriptor.name,
                    descriptor.schema_name,
                    descriptor.schema_version,
                    bundle.sensitivity()
                );
            }
        }
        Commands::Validate { input } => {
            let raw = load_json(&input.path)?;
            let result = pipeline.validate(&input.list_type, &raw)?;
            if result.is_valid() {
                println!("valid");
            } else {
                eprintln!("invalid:");
                for issue in result.errors() {
                    eprintln!("{}", issue);
                }
                std::process::exit(1);
            }
        }
        Commands::Render { input, locale } => {
            let publication = ingest(&pipeline, &input)?;
            let rendered = pipeline.render(&publication, Locale::from_tag(&locale))?;
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }
        Commands::Summarize { input, digest } => {
            let publication = ingest(&pipeline, &input)?;
            let summaries = pipeline.summarize(&publication)?;
            if digest {
                println!("{}", summary::digest_text(&summaries));
            } else {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            }
        }
        Commands::Pdf {
            input,
            output,
            locale,
        } => {
            let publication = ingest(&pipeline, &input)?;
            let artifact = pipeline.to_pdf_in(&publication, Locale::from_tag(&locale))?;
            fs::write(&output, &artifact.bytes)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(output = %output.display(), pages = artifact.pages, "pdf written");
            println!("{}\t{} pages\tsha256 {}", output.display(), artifact.pages, artifact.sha256);
        }
    }
    Ok(())
}

/// Validate and convert, printing schema issues and exiting 1 on rejection.
fn ingest(pipeline: &ListPipeline<'_>, input: &Input) -> Result<court_lists::Publication> {
    let raw = load_json(&input.path)?;
    match pipeline.ingest(&input.list_type, &raw) {
        Ok(publication) => Ok(publication),
        Err(PipelineError::ValidationFailed { issues, .. }) => {
            eprintln!("invalid:");
            for issue in issues {
                eprintln!("{}", issue);
            }
            std::process::exit(1)
        }
        Err(err) => Err(err.into()),
    }
}
