//! Content cache for parsed resume text.
//!
//! Maps a file's path + modification-time signature to previously extracted
//! plain text, so repeated runs against the same resume skip PDF parsing.
//! An explicit object owned by the caller and handed to the pipeline at
//! construction — no global state.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use sha2::{Digest, Sha256};

type Signature = [u8; 32];

#[derive(Debug, Clone)]
struct CachedText {
    signature: Signature,
    text: String,
}

/// In-memory cache of extracted resume content, keyed by file path.
///
/// An entry is valid only while the file's signature (path + modification
/// time) matches the one recorded at `set` time. A changed signature is a
/// miss; the next `set` overwrites, so at most one live signature exists
/// per path.
#[derive(Debug, Default)]
pub struct ResumeCache {
    entries: HashMap<PathBuf, CachedText>,
}

impl ResumeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached text for `path`, or `None` if the file is missing,
    /// was never cached, or has been modified since the last `set`.
    ///
    /// A missing file is a miss, not an error; any other filesystem error
    /// propagates.
    pub fn get(&self, path: &Path) -> io::Result<Option<&str>> {
        let signature = match compute_signature(path) {
            Ok(sig) => sig,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(self
            .entries
            .get(path)
            .filter(|entry| entry.signature == signature)
            .map(|entry| entry.text.as_str()))
    }

    /// Caches `text` under the file's current signature, replacing any
    /// previous entry for the same path.
    pub fn set(&mut self, path: &Path, text: String) -> io::Result<()> {
        let signature = compute_signature(path)?;
        self.entries
            .insert(path.to_path_buf(), CachedText { signature, text });
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// SHA-256 over `path:modified-time-nanos`.
///
/// Same path + same modification time ⇒ same signature; any change to the
/// modification time produces a different signature.
fn compute_signature(path: &Path) -> io::Result<Signature> {
    let modified = std::fs::metadata(path)?.modified()?;
    let nanos = modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    hasher.update(b":");
    hasher.update(nanos.to_le_bytes());
    Ok(hasher.finalize().into())
}
