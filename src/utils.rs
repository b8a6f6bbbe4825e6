use crate::result::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Resolve `path` against `base` unless it is already absolute
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Current user's home directory
pub fn home_dir() -> Option<PathBuf> {
    let var = if cfg!(target_os = "windows") {
        "USERPROFILE"
    } else {
        "HOME"
    };

    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// ZIP entry name for `path` relative to the archive root, `/`-separated.
/// Names that are not valid UTF-8 are refused rather than rewritten.
pub fn entry_name(relative: &Path) -> Result<String> {
    let parts = relative
        .components()
        .map(|c| {
            c.as_os_str().to_str().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("file name is not valid UTF-8: {}", relative.display()),
                )
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(parts.join("/"))
}
