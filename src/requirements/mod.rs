//! Requirement collection and installation.
//!
//! - [`collect`] - union of the `requirements` lists across all cogs
//! - [`installer`] - the pip child process and its output tail

pub mod installer;

use crate::cogs::{CogManifest, CogMap};
use crate::error::Result;
use std::collections::BTreeSet;

/// Collect the union of requirement specifiers declared by the given cogs.
///
/// Cogs without a manifest (or without a `requirements` field) contribute
/// nothing. Duplicates collapse; ordering is not significant.
pub fn collect(cogs: &CogMap) -> Result<BTreeSet<String>> {
    let mut requirements = BTreeSet::new();

    for path in cogs.values() {
        if let Some(manifest) = CogManifest::load(path)? {
            requirements.extend(manifest.requirements);
        }
    }

    Ok(requirements)
}
