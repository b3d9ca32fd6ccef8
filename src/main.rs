//! CLI entry point for dirinventory

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use dirinventory::{DirectoryScanner, DocumentConfig, InventoryError, ReportFormat, ScanConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dirinventory")]
#[command(about = "Report the structure of a directory, ZIP archives included")]
#[command(version)]
struct Args {
    /// Directory to scan
    #[arg(long)]
    path: PathBuf,

    /// Report file; its extension (.json or .docx) selects the format
    #[arg(long)]
    report: PathBuf,
}

/// Log to stderr, filtered by RUST_LOG (default: warnings only).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(args: &Args) -> Result<(), InventoryError> {
    // Validate both ends, and resolve the writer, before touching the filesystem.
    let format = ReportFormat::from_path(&args.report)?;
    let writer = format.writer(DocumentConfig::default())?;
    if !args.path.is_dir() {
        return Err(InventoryError::InvalidRoot(args.path.clone()));
    }

    let scanner = DirectoryScanner::new(ScanConfig::from_env());
    let inventory = scanner.scan(&args.path)?;
    writer.save(&inventory, &args.report)?;

    let counts = inventory.tree.counts();
    println!("Report saved to {} ({})", args.report.display(), format);
    println!(
        "{} directories, {} archives, {} files",
        counts.folders, counts.archives, counts.files
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging();

    if let Err(e) = run(&args) {
        eprintln!("dirinventory: {}", e);
        process::exit(1);
    }
}
