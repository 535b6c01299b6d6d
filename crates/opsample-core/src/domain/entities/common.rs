use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::DomainError;

/// Path of a generated file or directory, relative to a workspace root.
///
/// Never absolute and never climbs out of the root with `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.has_root() || path.is_absolute() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        if path.components().any(|c| c == Component::ParentDir) {
            return Err(DomainError::InvalidConfiguration {
                field: "path",
                reason: format!("'{}' leaves the workspace", path.display()),
            });
        }
        Ok(Self(path))
    }

    /// Parse the `/`-separated form used in sample tables, e.g.
    /// `"src/main/java/com/example/MemcachedReconciler.java"`.
    pub fn from_segments(path: &str) -> Result<Self, DomainError> {
        if path.starts_with('/') {
            return Err(DomainError::AbsolutePathNotAllowed { path: path.into() });
        }
        let segments: PathBuf = path.split('/').filter(|s| !s.is_empty()).collect();
        Self::try_new(segments)
    }

    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    /// Always `/`-separated, matching the sample tables.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in self.0.iter() {
            if !first {
                f.write_str("/")?;
            }
            write!(f, "{}", part.to_string_lossy())?;
            first = false;
        }
        Ok(())
    }
}
