//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Backslashes become forward slashes, `.` segments and repeated separators
/// are dropped, and `..` is folded lexically. A leading `//` is kept so
/// network paths survive normalization. Nothing here touches the disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        if self.inner.is_empty() {
            return Self::new(segment);
        }
        let segment_normalized = segment.replace('\\', "/");
        Self {
            inner: clean(&format!("{}/{}", self.inner, segment_normalized)),
        }
    }

    /// Resolve `path` against this directory.
    ///
    /// Absolute inputs are returned as-is (normalized); relative inputs are
    /// joined onto `self`.
    pub fn resolve(&self, path: &str) -> Self {
        let candidate = Self::new(path);
        if candidate.is_absolute() {
            candidate
        } else {
            self.join(path)
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) if trimmed.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Whether this path is rooted (`/x`, `//server/x`, or `C:/x`).
    pub fn is_absolute(&self) -> bool {
        let bytes = self.inner.as_bytes();
        self.inner.starts_with('/')
            || (bytes.len() >= 3
                && bytes[0].is_ascii_alphabetic()
                && bytes[1] == b':'
                && bytes[2] == b'/')
    }

    /// Lexical path from `base` to `self`, in the manner of `path.relative`.
    ///
    /// Both paths are expected to be of the same kind (both absolute or both
    /// relative). Returns an empty string when they are equal.
    pub fn relative_to(&self, base: &NormalizedPath) -> String {
        let from = base.components();
        let to = self.components();
        let common = from
            .iter()
            .zip(to.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = vec![".."; from.len() - common];
        parts.extend_from_slice(&to[common..]);
        parts.join("/")
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    fn components(&self) -> Vec<&str> {
        self.inner.split('/').filter(|c| !c.is_empty()).collect()
    }
}

/// Make a page filename safe for rendering plugins.
///
/// Absolute paths are rewritten relative to `output_dir`; relative paths are
/// returned unchanged.
pub fn ensure_relative(output_dir: &NormalizedPath, path: &str) -> String {
    let candidate = NormalizedPath::new(path);
    if candidate.is_absolute() {
        candidate.relative_to(output_dir)
    } else {
        path.to_string()
    }
}

/// Fold `.`/`..` segments and collapse repeated separators.
fn clean(raw: &str) -> String {
    let network = raw.starts_with("//") && !raw.starts_with("///");
    let rooted = raw.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for component in raw.split('/') {
        match component {
            "" | "." => {}
            ".." => match parts.last() {
                Some(last) if last.ends_with(':') => {}
                Some(last) if *last != ".." => {
                    parts.pop();
                }
                _ if !rooted => parts.push(".."),
                _ => {}
            },
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    if network {
        format!("//{body}")
    } else if rooted {
        format!("/{body}")
    } else {
        body
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

impl serde::Serialize for NormalizedPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}
