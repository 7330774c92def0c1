//! Package directory resolution.
//!
//! A directory is a Go package (a "unit") when it directly contains at least
//! one `.go` file the go tool would not ignore. `go help packages` says:
//! directory and file names that begin with "." or "_" are ignored, as are
//! directories named "testdata".

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Extension of files that make their directory a package.
pub const SOURCE_EXTENSION: &str = ".go";

/// Directory name whose contents are never packages.
pub const TESTDATA_DIR: &str = "testdata";

/// A package directory relative to the repository root.
///
/// The repository root itself is the empty path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct UnitPath(String);

impl UnitPath {
    /// The repository root.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Build a unit path, dropping `.` and empty segments.
    pub fn new(path: impl AsRef<str>) -> Self {
        let normalized = path
            .as_ref()
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        Self(normalized)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments from the root down; empty for the root.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    /// Append this unit to an import prefix. The root adds no suffix.
    pub fn join_onto(&self, prefix: &str) -> String {
        let prefix = prefix.trim_end_matches('/');
        if self.is_root() {
            prefix.to_string()
        } else if prefix.is_empty() {
            self.0.clone()
        } else {
            format!("{}/{}", prefix, self.0)
        }
    }
}

impl fmt::Display for UnitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// The resolved package directories, in sorted order.
pub type UnitSet = BTreeSet<UnitPath>;

/// Resolve package directories from a fallible file listing.
///
/// The first listing error stops resolution and is returned unchanged.
pub fn resolve_units<I, P, E>(listing: I) -> Result<UnitSet, E>
where
    I: IntoIterator<Item = Result<P, E>>,
    P: AsRef<str>,
{
    let mut units = UnitSet::new();
    for entry in listing {
        let entry = entry?;
        if let Some(dir) = package_dir(entry.as_ref()) {
            units.insert(dir);
        }
    }
    Ok(units)
}

/// Resolve package directories from an in-memory listing.
pub fn resolve_paths<I, P>(paths: I) -> UnitSet
where
    I: IntoIterator<Item = P>,
    P: AsRef<str>,
{
    paths.into_iter().filter_map(|p| package_dir(p.as_ref())).collect()
}

/// The directory a file contributes as a package, if any.
fn package_dir(path: &str) -> Option<UnitPath> {
    let path = path.trim_start_matches("./");
    let (dir, name) = match path.rsplit_once('/') {
        Some((dir, name)) => (dir, name),
        None => ("", path),
    };

    if dir.rsplit('/').next() == Some(TESTDATA_DIR) {
        return None;
    }
    if !name.ends_with(SOURCE_EXTENSION) {
        return None;
    }
    if path.split('/').any(is_ignored_name) {
        return None;
    }

    Some(UnitPath::new(dir))
}

fn is_ignored_name(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}
