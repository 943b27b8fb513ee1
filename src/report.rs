//! Human-readable output for compression results.

use crate::constants::{ERROR_PREFIX, SUCCESS_PREFIX, SUMMARY_PREFIX, SUMMARY_RULE_WIDTH};
use crate::processing::CompressionResult;
use crate::utils::{calculate_reduction, format_size};
use std::fmt::Write as _;

/// Aggregate counts over a set of results; totals only include successes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub total_original: u64,
    pub total_compressed: u64,
}

impl BatchSummary {
    pub fn from_results(results: &[CompressionResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            match result {
                CompressionResult::Success {
                    original_size,
                    compressed_size,
                    ..
                } => {
                    summary.succeeded += 1;
                    summary.total_original += original_size;
                    summary.total_compressed += compressed_size;
                }
                CompressionResult::Failure { .. } => summary.failed += 1,
            }
            summary
        })
    }

    pub fn reduction_percent(&self) -> f64 {
        calculate_reduction(self.total_original, self.total_compressed)
    }
}

/// Lines describing one result, without a trailing newline.
pub fn format_result(result: &CompressionResult) -> String {
    match result {
        CompressionResult::Success {
            input_path,
            output_path,
            original_size,
            compressed_size,
            reduction_percent,
        } => format!(
            "{} {}\n   → {}\n   {} → {} ({:.1}% reduction)",
            SUCCESS_PREFIX,
            input_path.display(),
            output_path.display(),
            format_size(*original_size),
            format_size(*compressed_size),
            reduction_percent
        ),
        CompressionResult::Failure { input_path, error } => {
            format!("{} {}: {}", ERROR_PREFIX, input_path.display(), error)
        }
    }
}

/// Summary block, or `None` for a single result (nothing to aggregate).
pub fn format_summary(results: &[CompressionResult]) -> Option<String> {
    if results.len() <= 1 {
        return None;
    }

    let summary = BatchSummary::from_results(results);
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(SUMMARY_RULE_WIDTH));
    let _ = write!(
        out,
        "{} Summary: {} succeeded, {} failed",
        SUMMARY_PREFIX, summary.succeeded, summary.failed
    );
    if summary.total_original > 0 {
        let _ = write!(
            out,
            "\n   Total: {} → {} ({:.1}% reduction)",
            format_size(summary.total_original),
            format_size(summary.total_compressed),
            summary.reduction_percent()
        );
    }
    Some(out)
}

pub fn print_results(results: &[CompressionResult]) {
    for result in results {
        println!("{}\n", format_result(result));
    }

    if let Some(summary) = format_summary(results) {
        println!("{}", summary);
    }
}
