pub mod extract;
pub mod list;

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions the game uses for IXF containers.
pub const CONTAINER_EXTENSIONS: [&str; 7] = ["dat", "ixf", "bld", "sc3", "st3", "sct", "cfg"];

fn is_container(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            CONTAINER_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// A single file is taken as given; a directory is walked for files with a
/// known container extension.
pub fn discover(input: &Path) -> Vec<PathBuf> {
    if input.is_file() {
        return vec![input.to_path_buf()];
    }
    WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_container(p))
        .collect()
}
