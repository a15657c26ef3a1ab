//! Existence checks behind a trait.
//!
//! Composition only ever asks "does this path exist?". Routing that question
//! through [`PathProbe`] keeps template and asset resolution testable without
//! a real project on disk.

use std::collections::BTreeSet;

use crate::NormalizedPath;

/// Answers existence questions about paths.
pub trait PathProbe {
    fn exists(&self, path: &NormalizedPath) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl PathProbe for RealFs {
    fn exists(&self, path: &NormalizedPath) -> bool {
        path.exists()
    }
}

/// In-memory probe holding a fixed set of existing paths.
///
/// Adding a path also marks each of its ancestors as existing, so a probe
/// seeded with `/app/public/index.html` answers `true` for `/app/public`.
#[derive(Debug, Clone, Default)]
pub struct MemoryProbe {
    paths: BTreeSet<NormalizedPath>,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the probe with paths (builder pattern).
    pub fn with_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<NormalizedPath>,
    {
        for path in paths {
            self.insert(path);
        }
        self
    }

    pub fn insert(&mut self, path: impl Into<NormalizedPath>) {
        let mut current = Some(path.into());
        while let Some(path) = current {
            current = path.parent();
            self.paths.insert(path);
        }
    }
}

impl PathProbe for MemoryProbe {
    fn exists(&self, path: &NormalizedPath) -> bool {
        self.paths.contains(path)
    }
}

impl<P: PathProbe + ?Sized> PathProbe for &P {
    fn exists(&self, path: &NormalizedPath) -> bool {
        (**self).exists(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_probe_marks_ancestors() {
        let probe = MemoryProbe::new().with_paths(["/app/public/index.html"]);
        assert!(probe.exists(&NormalizedPath::new("/app/public/index.html")));
        assert!(probe.exists(&NormalizedPath::new("/app/public")));
        assert!(!probe.exists(&NormalizedPath::new("/app/src")));
    }

    #[test]
    fn test_real_fs_probe() {
        let temp = tempfile::TempDir::new().unwrap();
        let root = NormalizedPath::new(temp.path());
        assert!(RealFs.exists(&root));
        assert!(!RealFs.exists(&root.join("missing.html")));
    }
}
