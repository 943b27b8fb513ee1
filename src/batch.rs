use crate::constants::PROGRESS_BAR_TEMPLATE;
use crate::error::{CompressionError, Result};
use crate::processing::{process, CompressionOptions, CompressionRequest, CompressionResult};
use crate::utils::is_image_file;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// How a directory batch walks and schedules its files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// `None` processes files one by one on the calling thread.
    pub threads: Option<usize>,
    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

impl BatchOptions {
    pub fn new(recursive: bool) -> Self {
        Self {
            recursive,
            ..Self::default()
        }
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Compresses every supported image under `input_dir`.
///
/// Results come back in enumeration order (file-name order within each
/// directory), one per matching file, whether it succeeded or not. A failing
/// file never stops the others. With `output_dir` each file's path relative
/// to `input_dir` is mirrored below it; without, files are overwritten in
/// place.
///
/// # Returns
/// * `Ok(results)` - one `CompressionResult` per supported file
/// * `Err(CompressionError)` - if `input_dir` is missing or not a directory
pub fn process_directory(
    input_dir: &Path,
    output_dir: Option<&Path>,
    options: &CompressionOptions,
    batch: &BatchOptions,
) -> Result<Vec<CompressionResult>> {
    let start_time = Instant::now();

    let image_files = collect_image_files(input_dir, batch.recursive)?;
    log::info!(
        "Found {} image files in {}",
        image_files.len(),
        input_dir.display()
    );

    let requests: Vec<CompressionRequest> = image_files
        .into_iter()
        .map(|path| {
            let output_path = output_dir.map(|dir| mirror_output_path(&path, input_dir, dir));
            CompressionRequest::new(path, output_path, options.clone())
        })
        .collect();

    let progress = create_progress_bar(requests.len(), batch.show_progress);
    let run = |request: &CompressionRequest| {
        progress.set_message(request.input_path.display().to_string());
        let result = process(request);
        progress.inc(1);
        result
    };

    let results: Vec<CompressionResult> = match batch.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    CompressionError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
                })?;
            // Indexed parallel collect keeps enumeration order.
            pool.install(|| requests.par_iter().map(run).collect())
        }
        None => requests.iter().map(run).collect(),
    };

    progress.finish_and_clear();

    let failed = results.iter().filter(|r| !r.is_success()).count();
    log::info!(
        "Batch finished in {:?}: {} succeeded, {} failed",
        start_time.elapsed(),
        results.len() - failed,
        failed
    );

    Ok(results)
}

/// Lists the supported image files under `input_dir`, sorted by file name
/// within each directory.
///
/// Unreadable entries are logged and skipped.
pub fn collect_image_files(input_dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !input_dir.exists() {
        return Err(CompressionError::FileNotFound(input_dir.to_path_buf()));
    }
    if !input_dir.is_dir() {
        return Err(CompressionError::NotADirectory(input_dir.to_path_buf()));
    }

    let walker = WalkDir::new(input_dir)
        .min_depth(1)
        .sort_by_file_name();
    let walker = if recursive {
        walker
    } else {
        walker.max_depth(1)
    };

    let mut image_files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", CompressionError::from(e));
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && is_image_file(path) {
            image_files.push(path.to_path_buf());
        }
    }

    Ok(image_files)
}

/// Maps `input_path` (somewhere below `input_dir`) to the same relative
/// location below `output_dir`.
pub fn mirror_output_path(input_path: &Path, input_dir: &Path, output_dir: &Path) -> PathBuf {
    match input_path.strip_prefix(input_dir) {
        Ok(relative) => output_dir.join(relative),
        Err(_) => match input_path.file_name() {
            Some(name) => output_dir.join(name),
            None => output_dir.to_path_buf(),
        },
    }
}

fn create_progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE) {
        progress.set_style(style.progress_chars("=> "));
    }
    progress
}
