pub mod batch;
pub mod cli;
pub mod codec;
pub mod compression;
pub mod constants;
pub mod error;
pub mod formats;
pub mod logger;
pub mod orientation;
pub mod processing;
pub mod report;
pub mod resize;
pub mod shell;
pub mod utils;

pub use batch::{collect_image_files, process_directory, BatchOptions};
pub use codec::{ColorMode, LoadedImage};
pub use compression::compress;
pub use error::{CompressionError, Result};
pub use formats::{resolve, FormatTag, OutputFormat};
pub use orientation::Orientation;
pub use processing::{
    process, resolve_output_path, CompressionOptions, CompressionRequest, CompressionResult,
};
pub use report::{format_result, format_summary, print_results, BatchSummary};
pub use resize::{compute_target_size, resize_image, Dimensions};
pub use shell::{SaveDialog, SaveOutcome, SavePayload, Session};
pub use utils::{calculate_reduction, format_size, is_image_file};
