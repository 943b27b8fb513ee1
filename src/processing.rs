use crate::codec::{self, LoadedImage};
use crate::compression::compress;
use crate::constants::{DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY};
use crate::error::{CompressionError, Result};
use crate::formats::{resolve, OutputFormat};
use crate::orientation::orientation_of;
use crate::resize::{compute_target_size, resize_image, Dimensions};
use crate::utils::{calculate_reduction, validate_file_exists};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct CompressionOptions {
    pub quality: u8,
    pub format: Option<OutputFormat>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl CompressionOptions {
    pub fn new(
        quality: Option<u8>,
        format: Option<OutputFormat>,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(CompressionError::InvalidQuality(quality));
        }

        for bound in [max_width, max_height].into_iter().flatten() {
            if bound == 0 {
                return Err(CompressionError::InvalidResizeBound(bound));
            }
        }

        Ok(Self {
            quality,
            format,
            max_width,
            max_height,
        })
    }
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            format: None,
            max_width: None,
            max_height: None,
        }
    }
}

/// One file to compress. Without `output_path` the input is overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionRequest {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub options: CompressionOptions,
}

impl CompressionRequest {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: Option<PathBuf>,
        options: CompressionOptions,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path,
            options,
        }
    }
}

/// Outcome of compressing one file
#[derive(Debug, Clone, PartialEq)]
pub enum CompressionResult {
    Success {
        input_path: PathBuf,
        output_path: PathBuf,
        original_size: u64,
        compressed_size: u64,
        /// Negative when the output grew.
        reduction_percent: f64,
    },
    Failure {
        input_path: PathBuf,
        error: String,
    },
}

impl CompressionResult {
    pub fn success(
        input_path: PathBuf,
        output_path: PathBuf,
        original_size: u64,
        compressed_size: u64,
    ) -> Self {
        CompressionResult::Success {
            input_path,
            output_path,
            original_size,
            compressed_size,
            reduction_percent: calculate_reduction(original_size, compressed_size),
        }
    }

    pub fn failure(input_path: PathBuf, error: &CompressionError) -> Self {
        CompressionResult::Failure {
            input_path,
            error: error.to_string(),
        }
    }

    pub fn input_path(&self) -> &Path {
        match self {
            CompressionResult::Success { input_path, .. }
            | CompressionResult::Failure { input_path, .. } => input_path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CompressionResult::Success { .. })
    }
}

/// Where the compressed bytes go.
///
/// Defaults to the input itself. An explicit output format forces the
/// matching extension onto whichever path was chosen.
pub fn resolve_output_path(
    input_path: &Path,
    output_path: Option<&Path>,
    format: Option<OutputFormat>,
) -> PathBuf {
    let path = output_path.unwrap_or(input_path);
    match format {
        Some(fmt) => path.with_extension(fmt.extension()),
        None => path.to_path_buf(),
    }
}

/// Runs the whole pipeline for one file and never fails: any error becomes
/// a `Failure` record carrying the input path.
pub fn process(request: &CompressionRequest) -> CompressionResult {
    match try_process(request) {
        Ok(result) => result,
        Err(e) => {
            log::debug!("Failed to process {}: {}", request.input_path.display(), e);
            CompressionResult::failure(request.input_path.clone(), &e)
        }
    }
}

/// Core image processing pipeline:
/// load -> orient -> resize -> pick format -> compress -> write
///
/// # Returns
/// * `Ok(CompressionResult::Success)` with the file sizes
/// * `Err(CompressionError)` from the first fatal step
///
/// Orientation problems are not fatal: they are logged and the image is
/// used as decoded.
pub fn try_process(request: &CompressionRequest) -> Result<CompressionResult> {
    let input_path = request.input_path.as_path();
    let options = &request.options;

    validate_file_exists(input_path)?;
    let original_size = fs::metadata(input_path)?.len();

    let mut loaded = codec::load(input_path)?;

    match orientation_of(input_path, loaded.source_format) {
        Ok(orientation) => loaded = loaded.map_image(|img| orientation.apply(img)),
        Err(e) => log::warn!(
            "Ignoring orientation of {}: {}",
            input_path.display(),
            e
        ),
    }

    let target = compute_target_size(
        Dimensions::of(&loaded.image),
        options.max_width,
        options.max_height,
    );
    if target != Dimensions::of(&loaded.image) {
        // Resampling blends palette entries, so the decoded color mode is stale.
        loaded = LoadedImage::from_image(resize_image(loaded.image, target), loaded.source_format);
    }

    let tag = resolve(input_path, options.format);
    let output_path =
        resolve_output_path(input_path, request.output_path.as_deref(), options.format);

    let compressed = compress(&loaded, &tag, options.quality)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|source| CompressionError::DirectoryCreationFailed {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    fs::write(&output_path, &compressed)?;

    log::debug!(
        "Wrote {} ({} -> {} bytes)",
        output_path.display(),
        original_size,
        compressed.len()
    );

    Ok(CompressionResult::success(
        input_path.to_path_buf(),
        output_path,
        original_size,
        compressed.len() as u64,
    ))
}
