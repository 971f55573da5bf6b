//! codegauge - classify source files and directories by size metrics.
//!
//! Usage:
//!   codegauge scan [PATH]     Index a tree and print the classified result
//!   codegauge presets         List built-in presets
//!   codegauge export [PATH]   Export a root's metrics to JSON
//!   codegauge --help          Show help

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, Context, Result};

use codegauge_core::{
    preset, CountMode, CountingConfig, DirectoryMetrics, IndexWarning, MetricsEntry, PRESET_NAMES,
};
use codegauge_index::{IndexOptions, Indexer};

#[derive(Parser)]
#[command(
    name = "codegauge",
    version,
    about = "Classify source files and directories into size buckets",
    long_about = "codegauge indexes a source tree, counts lines and tokens per file, \
                  rolls the totals up per directory, and maps each count to a severity \
                  indicator via configurable thresholds."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index a tree and print the classified result
    Scan {
        /// Path to index
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Preset supplying count mode, extensions, and thresholds
        #[arg(short, long, default_value = "default")]
        preset: String,

        /// Override the preset's count mode (lines or tokens)
        #[arg(short, long)]
        mode: Option<CountMode>,

        /// Override the preset's extensions (comma-separated, e.g. ".rs,.toml")
        #[arg(short, long, value_delimiter = ',')]
        ext: Vec<String>,

        /// Maximum depth to display
        #[arg(short, long, default_value = "3")]
        depth: u32,

        /// Show all entries (no depth limit on display)
        #[arg(short, long)]
        all: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List built-in presets and their thresholds
    Presets,

    /// Export a root's metrics to JSON
    Export {
        /// Path to index
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Preset supplying count mode, extensions, and thresholds
        #[arg(short, long, default_value = "default")]
        preset: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            path,
            preset,
            mode,
            ext,
            depth,
            all,
            format,
        } => {
            let max_depth = if all { u32::MAX } else { depth };
            run_scan(&path, &preset, mode, &ext, max_depth, format).await?;
        }
        Command::Presets => {
            run_presets();
        }
        Command::Export {
            path,
            preset,
            output,
        } => {
            run_export(&path, &preset, output).await?;
        }
    }

    Ok(())
}

/// Index a root and wait for the run to complete.
async fn index_root(
    path: &PathBuf,
    config: CountingConfig,
) -> Result<(DirectoryMetrics, Vec<IndexWarning>)> {
    let indexer = Indexer::new(vec![path.clone()], config);
    let handle = indexer
        .start(IndexOptions::default())
        .ok_or_else(|| eyre!("An indexing run is already in progress"))?;
    handle.await.context("Indexing task failed")?;

    let root = indexer
        .directory_metrics(path)
        .ok_or_else(|| eyre!("No metrics produced for {}", path.display()))?;
    Ok((root, indexer.last_warnings()))
}

/// Run a scan and display the classified tree.
async fn run_scan(
    path: &PathBuf,
    preset_name: &str,
    mode: Option<CountMode>,
    extensions: &[String],
    max_depth: u32,
    format: OutputFormat,
) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;
    let config = build_config(preset_name, mode, extensions)?;
    let count_mode = config.count_mode;

    eprintln!("Indexing {}...", path.display());

    let (root, warnings) = index_root(&path, config).await?;

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(60));
            println!(
                " {} - {} {}",
                path.display(),
                root.total_for(count_mode),
                count_mode
            );
            println!("{}", "─".repeat(60));
            println!();

            for child in &root.children {
                print_entry(child, count_mode, 1, max_depth);
            }

            if !warnings.is_empty() {
                println!();
                println!("{} warning(s) during indexing", warnings.len());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&root)?);
        }
    }

    Ok(())
}

/// List built-in presets.
fn run_presets() {
    for name in PRESET_NAMES {
        let Some(config) = preset(name) else {
            continue;
        };

        println!("{name} ({} of {})", config.count_mode, config.extensions.join(" "));
        for threshold in &config.thresholds {
            println!(
                "   {} {:>8}+  {}",
                threshold.indicator, threshold.value, threshold.description
            );
        }
        println!();
    }
}

/// Export a root's metrics to JSON.
async fn run_export(path: &PathBuf, preset_name: &str, output: Option<PathBuf>) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;
    let config = build_config(preset_name, None, &[])?;

    eprintln!("Indexing {}...", path.display());

    let (root, _warnings) = index_root(&path, config).await?;
    let json = serde_json::to_string_pretty(&root)?;

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, json)?;
            eprintln!("Exported to {}", output_path.display());
        }
        None => {
            println!("{json}");
        }
    }

    Ok(())
}

/// Resolve a preset and apply CLI overrides.
fn build_config(
    preset_name: &str,
    mode: Option<CountMode>,
    extensions: &[String],
) -> Result<CountingConfig> {
    let mut config = preset(preset_name).ok_or_else(|| {
        eyre!(
            "Unknown preset '{preset_name}' (available: {})",
            PRESET_NAMES.join(", ")
        )
    })?;

    if let Some(mode) = mode {
        config.count_mode = mode;
    }
    if !extensions.is_empty() {
        config.extensions = extensions.to_vec();
    }

    Ok(config)
}

/// Print an entry and its children.
fn print_entry(entry: &MetricsEntry, mode: CountMode, depth: u32, max_depth: u32) {
    if depth > max_depth {
        return;
    }

    let indent = "  ".repeat(depth as usize);
    let name = entry
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| entry.path().display().to_string());

    match entry {
        MetricsEntry::File(file) => {
            println!(
                "{indent}{} {:<40} {:>10}",
                file.indicator,
                truncate(&name, 40),
                file.count_for(mode)
            );
        }
        MetricsEntry::Directory(dir) => {
            println!(
                "{indent}▼ {:<40} {:>10}",
                truncate(&format!("{name}/"), 40),
                dir.total_for(mode)
            );
            for child in &dir.children {
                print_entry(child, mode, depth + 1, max_depth);
            }
        }
    }
}

/// Truncate a string to max length.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 1).collect();
        format!("{cut}…")
    }
}
