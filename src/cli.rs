use crate::batch::{process_directory, BatchOptions};
use crate::constants::{DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY};
use crate::error::{CompressionError, Result};
use crate::formats::OutputFormat;
use crate::processing::{process, CompressionOptions, CompressionRequest, CompressionResult};
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(
    name = "gyuu",
    about = "Squeeze images down: batch PNG/JPEG/WebP compression with resizing",
    long_about = "gyuu compresses a single image or every image in a directory. \
                  PNG is palette-quantized and optimized losslessly, JPEG and WebP are \
                  re-encoded at the chosen quality, and images can be shrunk to fit a \
                  maximum width and height while keeping their aspect ratio.",
    version,
    after_help = "EXAMPLES:\n  \
    gyuu image.png                    # compress in place\n  \
    gyuu image.png -o compressed.png  # write to another file\n  \
    gyuu images/ -o output/           # compress a whole directory\n  \
    gyuu image.png -q 60              # quality 60\n  \
    gyuu image.png -f webp            # convert to WebP\n  \
    gyuu image.png --max-width 1920   # shrink to at most 1920px wide"
)]
pub struct Args {
    #[arg(help = "Input image file or directory")]
    pub input: PathBuf,

    #[arg(
        short = 'o',
        long,
        help = "Output file or directory (default: overwrite the input)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'q',
        long,
        env = "GYUU_QUALITY",
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(MIN_QUALITY as i64..=MAX_QUALITY as i64),
        help = "Compression quality (1-100)",
        long_help = "Compression quality from 1 (smallest) to 100 (best). \
                     Used by JPEG and WebP; PNG output is palette-quantized regardless."
    )]
    pub quality: u8,

    #[arg(
        short = 'f',
        long,
        value_parser = parse_format,
        help = "Output format (png, jpg, webp)",
        long_help = "Force the output format. The output file's extension is changed to match."
    )]
    pub format: Option<OutputFormat>,

    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Maximum width in pixels"
    )]
    pub max_width: Option<u32>,

    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Maximum height in pixels"
    )]
    pub max_height: Option<u32>,

    #[arg(short = 'r', long, help = "Process subdirectories recursively")]
    pub recursive: bool,

    #[arg(
        short = 'j',
        long,
        value_parser = clap::value_parser!(usize),
        help = "Number of parallel threads for directories (default: sequential)"
    )]
    pub threads: Option<usize>,

    #[arg(short = 'v', long, help = "Print debug logs")]
    pub verbose: bool,

    #[arg(long, conflicts_with = "verbose", help = "Suppress the report; only errors are printed")]
    pub quiet: bool,
}

fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    OutputFormat::from_str(s).map_err(|_| {
        format!(
            "unsupported format '{}' (expected one of: {})",
            s,
            OutputFormat::format_names().join(", ")
        )
    })
}

impl Args {
    pub fn compression_options(&self) -> Result<CompressionOptions> {
        CompressionOptions::new(
            Some(self.quality),
            self.format,
            self.max_width,
            self.max_height,
        )
    }
}

/// Compresses whatever `args.input` points at.
///
/// Only a missing input (or invalid options) is an error; per-file problems
/// come back as `Failure` results.
pub fn run(args: &Args) -> Result<Vec<CompressionResult>> {
    if !args.input.exists() {
        return Err(CompressionError::FileNotFound(args.input.clone()));
    }

    let options = args.compression_options()?;

    if args.input.is_dir() {
        let batch = BatchOptions::new(args.recursive)
            .with_threads(args.threads)
            .with_progress(!args.quiet);
        process_directory(&args.input, args.output.as_deref(), &options, &batch)
    } else {
        let request = CompressionRequest::new(args.input.clone(), args.output.clone(), options);
        Ok(vec![process(&request)])
    }
}
