use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::codec::{self, ObjectFormat};
use crate::errors::{OpenSloError, Result};
use crate::types::Object;

/// Path argument standing for standard input.
pub const STDIN: &str = "-";

/// File patterns picked up when walking a directory.
pub const DOCUMENT_PATTERNS: &[&str] = &["*.yaml", "*.yml", "*.json"];

/// Whether `file_name` matches one of [`DOCUMENT_PATTERNS`].
pub fn should_include_file(file_name: &str) -> bool {
    let match_opts = glob::MatchOptions {
        case_sensitive: false,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    DOCUMENT_PATTERNS.iter().any(|pattern_str| {
        Pattern::new(pattern_str)
            .map(|pattern| pattern.matches_with(file_name, match_opts))
            .unwrap_or(false)
    })
}

/// Expands the given paths into the list of files to read.
///
/// Files are kept as given, whatever their extension. Directories are walked
/// recursively in sorted order, skipping hidden entries and keeping only
/// document files. [`STDIN`] is passed through.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.as_os_str() == STDIN || path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            return Err(OpenSloError::Input {
                message: "no such file or directory".to_string(),
                path: path.display().to_string(),
            });
        }

        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        {
            let entry = entry.map_err(|e| OpenSloError::Input {
                message: e.to_string(),
                path: path.display().to_string(),
            })?;
            if entry.file_type().is_file()
                && should_include_file(&entry.file_name().to_string_lossy())
            {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

/// Reads and decodes objects from every input, preserving input order.
///
/// `format` overrides extension based detection; inputs without a known
/// extension (including standard input) default to YAML, which also accepts
/// JSON documents.
pub fn read_objects(paths: &[PathBuf], format: Option<ObjectFormat>) -> Result<Vec<Object>> {
    let mut objects = Vec::new();
    for file in collect_input_files(paths)? {
        objects.extend(read_file(&file, format)?);
    }
    Ok(objects)
}

fn read_file(path: &Path, format: Option<ObjectFormat>) -> Result<Vec<Object>> {
    let input_err = |message: String| OpenSloError::Input {
        message,
        path: path.display().to_string(),
    };

    let contents = if path.as_os_str() == STDIN {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| input_err(e.to_string()))?;
        buf
    } else {
        fs::read_to_string(path).map_err(|e| input_err(e.to_string()))?
    };

    let format = format
        .or_else(|| ObjectFormat::from_path(path))
        .unwrap_or_default();
    codec::decode(&contents, format).map_err(|e| input_err(e.to_string()))
}
