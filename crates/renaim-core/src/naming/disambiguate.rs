//! Numeric-suffix collision avoidance.

use std::path::{Path, PathBuf};

use super::NameSegments;
use crate::error::{RenameError, Result};

/// Upper bound on `_N` attempts before giving up on a name.
pub const MAX_DISAMBIGUATION_ATTEMPTS: u32 = 10_000;

/// Anything at `path`, including a dangling symlink, counts as occupied.
pub fn occupied_on_disk(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Finds the first free name in `directory`.
///
/// Tries the rendered name as is, then with `_1`, `_2`, ... inserted before
/// the extension. `segments.counter` is left at the value that produced the
/// returned path.
///
/// # Errors
///
/// Returns `RenameError::NameCollisionExhausted` once
/// [`MAX_DISAMBIGUATION_ATTEMPTS`] numbered variants are all taken.
pub fn disambiguate(
    segments: &mut NameSegments,
    directory: &Path,
    is_taken: impl Fn(&Path) -> bool,
) -> Result<PathBuf> {
    segments.counter = None;
    let first = directory.join(segments.render());
    if !is_taken(&first) {
        return Ok(first);
    }

    for counter in 1..=MAX_DISAMBIGUATION_ATTEMPTS {
        segments.counter = Some(counter);
        let candidate = directory.join(segments.render());
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
    }

    segments.counter = None;
    Err(RenameError::NameCollisionExhausted {
        path: first,
        attempts: MAX_DISAMBIGUATION_ATTEMPTS,
    })
}
