use crate::error::Error;
use crate::result::Result;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// One archive-creation run: the plugin folder `base_dir` found under
/// `root_dir`, packaged into `output_path` plus a `.zip` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagingRequest {
    pub root_dir: PathBuf,
    pub base_dir: PathBuf,
    pub output_path: PathBuf,
}

impl PackagingRequest {
    pub fn new(
        root_dir: impl Into<PathBuf>,
        base_dir: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let request = Self {
            root_dir: root_dir.into(),
            base_dir: base_dir.into(),
            output_path: output_path.into(),
        };
        request.validate()?;
        Ok(request)
    }

    fn validate(&self) -> Result<()> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(Error::Config("plugin folder name is empty".to_string()));
        }

        let plain = self
            .base_dir
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(Error::Config(format!(
                "plugin folder must be a plain relative path, got {}",
                self.base_dir.display()
            )));
        }

        if self.output_path.file_name().is_none() {
            return Err(Error::Config(format!(
                "output path has no file name: {}",
                self.output_path.display()
            )));
        }

        Ok(())
    }

    /// Directory whose tree ends up in the archive
    pub fn source_dir(&self) -> PathBuf {
        self.root_dir.join(&self.base_dir)
    }

    /// Final archive location; `.zip` is appended, never substituted
    pub fn archive_path(&self) -> PathBuf {
        let mut name = OsString::from(self.output_path.as_os_str());
        name.push(".zip");
        PathBuf::from(name)
    }

    /// Directory the archive is written into
    pub fn archive_dir(&self) -> &Path {
        self.output_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}
