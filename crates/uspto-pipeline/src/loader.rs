//! Input file discovery

use crate::PipelineError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Expand input paths into the list of files to load
///
/// Directories are walked recursively in file-name order. Anything else,
/// including a path that does not exist, is taken as a file so that a
/// missing file surfaces later as a per-file read failure. Only files whose
/// extension equals `extension` are kept.
///
/// Returns [`PipelineError::NoInputs`] when nothing is left to load.
pub fn discover_files<P: AsRef<Path>>(
    inputs: &[P],
    extension: &str,
) -> Result<Vec<PathBuf>, PipelineError> {
    let mut files = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            info!("directory: {}", input.display());
            for entry in WalkDir::new(input).sort_by_file_name() {
                match entry {
                    Ok(entry) if entry.file_type().is_file() => {
                        push_matching(&mut files, entry.into_path(), extension)
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Cannot read directory entry: {}", e),
                }
            }
        } else {
            push_matching(&mut files, input.to_path_buf(), extension);
        }
    }

    if files.is_empty() {
        let listed: Vec<String> = inputs
            .iter()
            .map(|p| p.as_ref().display().to_string())
            .collect();
        return Err(PipelineError::NoInputs(format!(
            "no .{} files under [{}]",
            extension,
            listed.join(", ")
        )));
    }

    Ok(files)
}

fn push_matching(files: &mut Vec<PathBuf>, path: PathBuf, extension: &str) {
    if has_extension(&path, extension) {
        files.push(path);
    } else {
        debug!("Ignoring {}", path.display());
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}
