#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use wadgfx::ops;
use wadgfx::wad::WadVersion;

#[derive(Debug, Parser)]
#[command(name = "wadgfx", version, about = "WAD archive and GFX texture decoder")]
struct Cli {
    /// Log every record while walking.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the wad version detected from the first tag.
    Detect {
        #[arg(long)]
        wad: PathBuf,
    },

    /// Print the record tree of a wad.
    List {
        #[arg(long)]
        wad: PathBuf,
        /// Skip detection (gow1 or gow2).
        #[arg(long)]
        version: Option<WadVersion>,
    },

    /// Extract payload files from a wad, or from every .wad under a directory.
    Extract {
        /// Wad file or directory.
        #[arg(long)]
        input: PathBuf,
        /// Output directory.
        #[arg(long)]
        output: PathBuf,
        /// Skip detection (gow1 or gow2).
        #[arg(long)]
        version: Option<WadVersion>,
    },

    /// Decode a gfx texture.
    Gfx {
        #[arg(long)]
        input: PathBuf,
        /// Print data block N as a palette.
        #[arg(long)]
        palette: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let res = match cli.cmd {
        Command::Detect { wad } => ops::detect(&wad).map(|_| ()),
        Command::List { wad, version } => ops::list(&wad, version).map(|_| ()),
        Command::Extract {
            input,
            output,
            version,
        } => ops::extract(&input, &output, version).map(|n| println!("ok: {n} files")),
        Command::Gfx { input, palette } => ops::gfx(&input, palette).map(|_| ()),
    };

    if let Err(e) = res {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
