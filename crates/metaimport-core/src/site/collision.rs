//! Detection of packages whose pages cannot coexist on disk.
//!
//! A package at `a` is written to `a/index.html`. A package at
//! `a/index.html` would need `a/index.html/` to be a directory, so the two
//! can never both be written. Such layouts are rejected before any page is
//! written.

use super::writer::PAGE_FILE_NAME;
use crate::error::{Error, Result};
use crate::resolver::{UnitPath, UnitSet};

/// Fail if any unit's directory is another unit's page file.
pub fn check_collisions(units: &UnitSet) -> Result<()> {
    for unit in units {
        let segments: Vec<&str> = unit.segments().collect();
        for (idx, segment) in segments.iter().enumerate() {
            if *segment != PAGE_FILE_NAME {
                continue;
            }
            let owner = UnitPath::new(segments[..idx].join("/"));
            if units.contains(&owner) {
                return Err(Error::OutputCollision {
                    unit: unit.to_string(),
                    owner: owner.to_string(),
                });
            }
        }
    }
    Ok(())
}
