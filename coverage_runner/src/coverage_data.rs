//! Scanning the build output for profiling data left behind by the
//! instrumented test binaries.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extension of the per-object counter files written at test exit.
pub const COVERAGE_DATA_EXTENSION: &str = "gcda";

/// Collect all `.gcda` files under `build_dir`. A missing directory yields
/// an empty list.
pub fn find_coverage_data(build_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(build_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map_or(false, |ext| ext == COVERAGE_DATA_EXTENSION)
        })
        .map(|e| e.path().to_path_buf())
        .collect()
}
