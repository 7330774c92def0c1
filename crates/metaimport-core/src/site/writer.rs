//! Writing rendered pages.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::resolver::UnitPath;

/// File name of every generated page.
pub const PAGE_FILE_NAME: &str = "index.html";

/// Destination for rendered pages.
pub trait PageWriter {
    /// Store the page served at `import_path` for `unit`, returning where it
    /// was written.
    fn write_page(
        &mut self,
        unit: &UnitPath,
        import_path: &str,
        contents: &str,
    ) -> Result<PathBuf>;
}

/// Writes pages as `<root>/<import path>/index.html`.
#[derive(Debug, Clone)]
pub struct FsPageWriter {
    root: PathBuf,
}

impl FsPageWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the page for `import_path`. Relative segments are
    /// rejected so pages stay under the root.
    pub fn page_path(&self, import_path: &str) -> Result<PathBuf> {
        let mut dir = self.root.clone();
        for segment in import_path.split('/').filter(|s| !s.is_empty()) {
            if segment == "." || segment == ".." {
                return Err(Error::InvalidImportPath {
                    import_path: import_path.to_string(),
                });
            }
            dir.push(segment);
        }
        Ok(dir.join(PAGE_FILE_NAME))
    }
}

impl PageWriter for FsPageWriter {
    fn write_page(
        &mut self,
        unit: &UnitPath,
        import_path: &str,
        contents: &str,
    ) -> Result<PathBuf> {
        let path = self.page_path(import_path)?;
        let write_error = |path: &Path, source: std::io::Error| Error::Write {
            unit: unit.to_string(),
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| write_error(dir, e))?;
        }
        std::fs::write(&path, contents).map_err(|e| write_error(&path, e))?;

        tracing::debug!(unit = %unit, path = %path.display(), "Wrote page");
        Ok(path)
    }
}
