//! KEYREG CLI
//!
//! Command-line interface for inspecting the signing-key registry.

mod manifest;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use keyreg_core::types::{format_generated_time, SlotInfo, SlotState};
use keyreg_crypto::parse_public_key_pem;
use keyreg_registry::global_instance;

use crate::manifest::KeyManifest;

/// KEYREG - signing keys for signed configuration files
#[derive(Parser)]
#[command(name = "keyreg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a key manifest into the registry and report every slot
    Inspect {
        /// Path to the key manifest (JSON)
        #[arg(short, long, env = "KEYREG_MANIFEST")]
        manifest: PathBuf,
        /// Print the slot snapshot as JSON
        #[arg(long)]
        json: bool,
        /// Report slots without parsing any key
        #[arg(long)]
        lazy: bool,
    },

    /// Parse a PEM public key and print its fingerprint
    Fingerprint {
        /// Path to the PEM file
        pem_file: PathBuf,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "keyreg=debug,info"
    } else {
        "keyreg=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Inspect {
            manifest,
            json,
            lazy,
        } => cmd_inspect(&manifest, json, lazy),
        Commands::Fingerprint { pem_file } => cmd_fingerprint(&pem_file),
    }
}

/// Load a manifest into the process-wide registry and print its slots
fn cmd_inspect(manifest_path: &Path, json: bool, lazy: bool) -> Result<()> {
    let manifest = KeyManifest::load(manifest_path)
        .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;
    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    let table = manifest
        .into_table(base_dir)
        .context("Failed to read key files")?;

    let registry = global_instance();
    let changed = registry.bulk_import(table);
    info!(changed, count = registry.count(), "Imported manifest");

    if !lazy {
        registry.materialize_all();
    }
    let snapshot = registry.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!(
        "{} {} slots",
        "🔑 Key registry:".cyan().bold(),
        registry.count()
    );
    for slot in &snapshot {
        println!("{}", render_slot(slot));
    }

    let usable = snapshot.iter().filter(|s| s.state.holds_key()).count();
    println!("\n   {} {}", "Usable keys:".dimmed(), usable);

    Ok(())
}

/// Parse one PEM file and print its fingerprint
fn cmd_fingerprint(pem_file: &Path) -> Result<()> {
    let bytes = std::fs::read(pem_file)
        .with_context(|| format!("Failed to read {}", pem_file.display()))?;
    let key = parse_public_key_pem(&bytes).context("Invalid public key")?;

    println!("{} {}", "✅ Fingerprint:".green().bold(), key.fingerprint());
    println!("   {} {}", "SEC1:".dimmed(), hex::encode(key.to_sec1_compressed()));

    Ok(())
}

fn render_slot(slot: &SlotInfo) -> String {
    let state = match slot.state {
        SlotState::Empty => slot.state.to_string().dimmed(),
        SlotState::Defined => slot.state.to_string().yellow(),
        SlotState::Materialized => slot.state.to_string().green(),
        SlotState::Pinned => slot.state.to_string().blue(),
    };
    format!(
        "   [{:>3}] {:<12} {:<25} {}",
        slot.index,
        state,
        format_generated_time(slot.generated_time),
        slot.fingerprint.as_deref().unwrap_or("-")
    )
}
