//! ATF CLI - Command-line tool for inspecting ATF compressed-texture files.
//!
//! This is the main entry point for the `atf` command-line application.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use atf_container::{parse_header, AtfTexture, CodecPayload};

/// atf - inspect and extract ATF compressed-texture containers
#[derive(Parser)]
#[command(name = "atf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show header fields and payload groups of an ATF file
    Info {
        /// Input ATF file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Extract per-codec compressed payloads to files
    Extract {
        /// Input ATF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
        Commands::Extract { input, output } => {
            cmd_extract(&input, &output)?;
        }
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let header = parse_header(&data).context("Failed to parse ATF header")?;

    println!("File:    {}", input.display());
    println!("Version: {}", header.version);
    println!("Layout:  {:?}", header.layout());
    println!("Size:    {}x{}", header.width(), header.height());
    println!("Mips:    {}", header.count);
    if header.encoder_switch() {
        println!("Encoder: -e, {} packaged mips", header.packaged_mips());
    }

    let texture = AtfTexture::decode(&data).context("Failed to decode ATF container")?;

    for group in &texture.groups {
        println!(
            "\n{} (internal format {:#06x}, alpha: {})",
            group.family, group.internal_format, group.uses_alpha
        );
        for (level, bytes) in group.levels.iter().enumerate() {
            if bytes.is_empty() {
                println!("  level {:>2}: absent", level);
            } else {
                println!("  level {:>2}: {} bytes", level, bytes.len());
            }
        }
        if let Some(alpha_levels) = &group.alpha_levels {
            let total: usize = alpha_levels.iter().map(|l| l.len()).sum();
            println!("  alpha planes: {} levels, {} bytes", alpha_levels.len(), total);
        }
    }

    if texture.groups.is_empty() {
        println!("\nNo codec payload groups");
    }

    Ok(())
}

fn cmd_extract(input: &Path, output: &Path) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let texture = AtfTexture::decode(&data).context("Failed to decode ATF container")?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("texture");

    fs::create_dir_all(output).context("Failed to create output directory")?;

    let mut written = 0;
    for group in &texture.groups {
        written += write_levels(output, stem, group, &group.levels, None)?;
        if let Some(alpha_levels) = &group.alpha_levels {
            written += write_levels(output, stem, group, alpha_levels, Some("alpha"))?;
        }
    }

    println!("Wrote {} payload files to {}", written, output.display());

    Ok(())
}

fn write_levels(
    output: &Path,
    stem: &str,
    group: &CodecPayload<'_>,
    levels: &[&[u8]],
    plane: Option<&str>,
) -> Result<usize> {
    let mut written = 0;
    for (level, bytes) in levels.iter().enumerate() {
        if bytes.is_empty() {
            continue;
        }

        let name = match plane {
            Some(plane) => format!("{}.{}.{}.{}.bin", stem, group.family, plane, level),
            None => format!("{}.{}.{}.bin", stem, group.family, level),
        };
        let path = output.join(name);
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        written += 1;
    }
    Ok(written)
}
