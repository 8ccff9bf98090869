//! Command-line tools for pagecraft layouts.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pagecraft_core::{validate, LayoutDocument};
use pagecraft_export::{document_to_svg, SvgOptions};
use pagecraft_layout::Surface;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pagecraft", about = "Inspect, normalize and preview page layouts", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strictly parse a layout and list every repair it needs
    Validate {
        /// Layout file, or `-` for stdin
        file: PathBuf,
        /// Fail when the layout needs any repair
        #[arg(long)]
        strict: bool,
    },
    /// Render a layout to SVG
    Preview {
        /// Layout file, or `-` for stdin
        file: PathBuf,
        /// Surface width in pixels
        #[arg(long, default_value = "1000")]
        width: f64,
        /// Surface height in pixels (defaults to the canvas minimum height)
        #[arg(long)]
        height: Option<f64>,
        /// Draw resize handles
        #[arg(long)]
        handles: bool,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the starter layout
    Starter {
        #[arg(long)]
        pretty: bool,
    },
    /// Load a layout leniently and print it back in canonical form
    Normalize {
        /// Layout file, or `-` for stdin
        file: PathBuf,
        #[arg(long)]
        pretty: bool,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

fn serialize(doc: &LayoutDocument, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        doc.to_json_pretty()?
    } else {
        doc.to_json()?
    };
    Ok(json)
}

/// Validation summary; errors when the payload is rejected, or needs repair under `strict`.
fn validate_report(raw: &str, strict: bool) -> anyhow::Result<String> {
    let report = validate(raw).context("layout rejected")?;
    let mut out = format!(
        "{} block(s), {} finding(s)\n",
        report.document.len(),
        report.findings.len()
    );
    for finding in &report.findings {
        out.push_str(&format!("  - {}\n", finding));
    }
    if strict && !report.is_clean() {
        bail!("{}layout needs repair", out);
    }
    Ok(out)
}

fn preview_svg(raw: &str, width: f64, height: Option<f64>, handles: bool) -> anyhow::Result<String> {
    let doc = LayoutDocument::load(raw);
    let height = height.unwrap_or(doc.canvas.min_height);
    debug!(width, height, blocks = doc.len(), "rendering preview");
    let options = SvgOptions {
        show_handles: handles,
        ..SvgOptions::default()
    };
    Ok(document_to_svg(&doc, Surface::new(width, height), &options)?)
}

fn normalize(raw: &str, pretty: bool) -> anyhow::Result<String> {
    serialize(&LayoutDocument::load(raw), pretty)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Validate { file, strict } => {
            let raw = read_input(&file)?;
            let report = validate_report(&raw, strict)?;
            write_output(None, &report)
        }
        Commands::Preview {
            file,
            width,
            height,
            handles,
            output,
        } => {
            let raw = read_input(&file)?;
            let svg = preview_svg(&raw, width, height, handles)?;
            write_output(output.as_deref(), &svg)
        }
        Commands::Starter { pretty } => {
            write_output(None, &serialize(&LayoutDocument::starter(), pretty)?)
        }
        Commands::Normalize {
            file,
            pretty,
            output,
        } => {
            let raw = read_input(&file)?;
            write_output(output.as_deref(), &normalize(&raw, pretty)?)
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagecraft=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    run(Cli::parse())
}

#[cfg(test)]
mod tests;
