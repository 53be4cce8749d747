use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use lzhc::{compress, decompress, CompressConfig};

#[derive(Parser)]
#[command(name = "lzhc", about = "LZ77 + static Huffman file compression", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file.
    Compress {
        /// Input file path.
        input: PathBuf,
        /// Output file path; defaults to `<input>.lzhc`.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Minimum match length worth encoding as a back-reference.
        #[arg(long, default_value_t = 4)]
        min_match: u8,
        /// Maximum match length a back-reference can express.
        #[arg(long, default_value_t = 255)]
        max_match: u8,
        /// Size of the sliding search window, in bytes behind the cursor.
        #[arg(long, default_value_t = 4096)]
        search_size: u16,
        /// Write the LZ77 token sequence as text (literal chars, `<d,l>`
        /// back-references) to this path.
        #[arg(long)]
        lz: Option<PathBuf>,
        /// Enable debug/trace logging to stderr.
        #[arg(long)]
        verbose: bool,
    },
    /// Decompress a file produced by `compress`.
    Decompress {
        /// Input file path.
        input: PathBuf,
        /// Output file path; defaults to stripping `.lzhc` (or appending
        /// `.out` if the input has no such suffix).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Enable debug/trace logging to stderr.
        #[arg(long)]
        verbose: bool,
    },
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(if verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Warn
    });
    builder.init();
}

/// Derives the default output path for `compress`: append `.lzhc`.
fn default_compress_output(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".lzhc");
    PathBuf::from(name)
}

/// Derives the default output path for `decompress`: strip a trailing
/// `.lzhc` suffix, or append `.out` if there isn't one.
fn default_decompress_output(input: &Path) -> PathBuf {
    match input.to_str().and_then(|s| s.strip_suffix(".lzhc")) {
        Some(stripped) => PathBuf::from(stripped),
        None => {
            let mut name = input.as_os_str().to_owned();
            name.push(".out");
            PathBuf::from(name)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compress {
            input,
            output,
            min_match,
            max_match,
            search_size,
            lz,
            verbose,
        } => {
            init_logging(verbose);
            let config = CompressConfig::new(min_match, max_match, search_size)?;
            let data = std::fs::read(&input)?;

            if let Some(lz_path) = lz {
                let tokens = lzhc::lz77::encode(&data, &config);
                let dump: String = tokens.iter().map(|t| t.to_string()).collect();
                std::fs::write(lz_path, dump)?;
            }

            let compressed = compress(&data, &config)?;
            let out_path = output.unwrap_or_else(|| default_compress_output(&input));
            std::fs::write(out_path, compressed)?;
        }
        Commands::Decompress {
            input,
            output,
            verbose,
        } => {
            init_logging(verbose);
            let data = std::fs::read(&input)?;
            let expanded = decompress(&data)?;
            let out_path = output.unwrap_or_else(|| default_decompress_output(&input));
            std::fs::write(out_path, expanded)?;
        }
    }

    Ok(())
}
