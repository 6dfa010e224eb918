//! png2ico CLI
//!
//! Packs up to 16 square PNG images into a single Windows ICO file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use png2ico_format::{IcoDirectory, convert};

#[derive(Parser, Debug)]
#[command(name = "png2ico")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Pack three sizes into one icon
    png2ico app.ico icon-16.png icon-32.png icon-256.png

    # Show where each image ended up
    png2ico -v app.ico icon-*.png

Only the first 16 input files are used; the rest are ignored."#)]
struct Cli {
    /// ICO file to create (overwritten if it exists)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Square PNG images, at most 512x512 pixels each
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Print the directory entry written for each image
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let directory = convert(&cli.output, &cli.inputs)
        .with_context(|| format!("failed to build {}", cli.output.display()))?;

    if cli.verbose {
        print_directory(cli, &directory);
    }
    Ok(())
}

fn print_directory(cli: &Cli, directory: &IcoDirectory) {
    for (entry, input) in directory.entries().iter().zip(&cli.inputs) {
        println!(
            "{} {}x{} {} bytes at offset {}",
            input.display().cyan(),
            entry.width,
            entry.height,
            entry.size,
            entry.offset.dimmed(),
        );
    }
    println!(
        "{} {} ({} images, {} bytes)",
        "wrote".green().bold(),
        cli.output.display(),
        directory.entry_count(),
        directory.file_size(),
    );
}
