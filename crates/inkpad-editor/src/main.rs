//! inkpad: command-line access to paste classification, snapshot
//! persistence, image upload and HTML rendering.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpad_core::{
    Classification, Confirmation, DocumentSnapshot, FixedConfirmation, PasteCandidate, SaveResult,
};
use inkpad_editor::{render_document, EditorConfig, StdinConfirmation};
use inkpad_paste::{image_block_from_file, HttpContentTypeProbe, PasteClassifier};
use inkpad_store::{BoundedPersistence, FilesystemStore};

#[derive(Parser)]
#[command(name = "inkpad")]
#[command(author, version, about = "Rich-text editor tooling")]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (default: $INKPAD_CONFIG, then environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether pasted text is a remote image
    Classify {
        /// Text as it would be pasted
        text: String,
    },

    /// Save a snapshot file to the storage slot
    Save {
        /// Snapshot JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the stored snapshot, or the default one
    Restore {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the image block for an image file
    Upload {
        /// Image file
        image: PathBuf,
    },

    /// Render a snapshot file as HTML
    Render {
        /// Snapshot JSON file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

// Logging configuration via environment variables:
//   LOG_FORMAT  - "json" or "text" (default: "text")
//   RUST_LOG    - standard env filter (default: "inkpad=info")
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "inkpad=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => EditorConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::load().context("loading config")?,
    };

    match cli.command {
        Commands::Classify { text } => cmd_classify(&config, text).await,
        Commands::Save { input, yes } => cmd_save(&config, &input, yes).await,
        Commands::Restore { output } => cmd_restore(&config, output.as_deref()).await,
        Commands::Upload { image } => cmd_upload(&config, &image),
        Commands::Render { file } => cmd_render(&file),
    }
}

fn persistence(config: &EditorConfig) -> BoundedPersistence {
    let store = FilesystemStore::new(config.storage_dir.clone());
    BoundedPersistence::new(Arc::new(store), config.persistence_config())
}

fn read_snapshot(path: &Path) -> anyhow::Result<DocumentSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(DocumentSnapshot::from_json_str(&raw)?)
}

async fn cmd_classify(config: &EditorConfig, text: String) -> anyhow::Result<()> {
    let probe = HttpContentTypeProbe::new(config.probe_timeout_secs)?;
    let classifier = PasteClassifier::new(Arc::new(probe)).with_image_types(config.image_types());

    match classifier.classify(&PasteCandidate::Text(text)).await {
        Classification::Handled(intent) => println!("image {}", intent.target_url),
        Classification::PassThrough => println!("pass-through"),
    }
    Ok(())
}

async fn cmd_save(config: &EditorConfig, input: &Path, yes: bool) -> anyhow::Result<()> {
    let snapshot = read_snapshot(input)?;
    let confirmation: Box<dyn Confirmation> = if yes {
        Box::new(FixedConfirmation(true))
    } else {
        Box::new(StdinConfirmation)
    };

    let result = persistence(config)
        .save(&snapshot, confirmation.as_ref())
        .await?;
    if let Some(e) = result.rejection() {
        return Err(e.into());
    }

    match result {
        SaveResult::Saved { size_bytes } => {
            println!("saved {} bytes to {}", size_bytes, config.storage_dir.display());
        }
        _ => println!("cancelled"),
    }
    Ok(())
}

async fn cmd_restore(config: &EditorConfig, output: Option<&Path>) -> anyhow::Result<()> {
    let snapshot = persistence(config).restore().await;
    let json = serde_json::to_string_pretty(snapshot.as_value())?;

    match output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}

fn cmd_upload(config: &EditorConfig, image: &Path) -> anyhow::Result<()> {
    let data = std::fs::read(image).with_context(|| format!("reading {}", image.display()))?;
    let file_name = image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let block = image_block_from_file(&file_name, &data, &config.image_types())?;
    println!("{}", serde_json::to_string_pretty(&block)?);
    Ok(())
}

fn cmd_render(file: &Path) -> anyhow::Result<()> {
    let snapshot = read_snapshot(file)?;
    println!("{}", render_document(&snapshot));
    Ok(())
}
