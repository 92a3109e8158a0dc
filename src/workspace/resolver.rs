//! Workspace path resolution.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Workspace used when no path is given on the command line.
pub const DEFAULT_WORKSPACE: &str = "/data/";

/// Errors raised while resolving the workspace.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The resolved directory is not on disk.
    #[error("workspace not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The current directory could not be read to absolutize a relative path.
    #[error("cannot resolve workspace {path}: {source}")]
    Resolve {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// An absolute workspace directory that existed when it was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePath(PathBuf);

impl WorkspacePath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for WorkspacePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for WorkspacePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Make `candidate` (or the default) absolute without touching the disk.
///
/// Resolution is lexical: symlinks are kept as written.
pub fn absolutize(candidate: Option<&str>) -> Result<PathBuf, WorkspaceError> {
    let raw = candidate.unwrap_or(DEFAULT_WORKSPACE);
    std::path::absolute(raw).map_err(|source| WorkspaceError::Resolve {
        path: raw.to_string(),
        source,
    })
}

/// Resolve and validate the workspace.
///
/// The existence check is a blocking `stat`, run before any async work so a
/// bad path fails without side effects.
pub fn resolve(candidate: Option<&str>) -> Result<WorkspacePath, WorkspaceError> {
    let path = absolutize(candidate)?;

    if !path.exists() {
        return Err(WorkspaceError::NotFound(path));
    }

    tracing::debug!(workspace = %path.display(), "Workspace resolved");
    Ok(WorkspacePath(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_workspace() {
        let path = absolutize(None).unwrap();
        assert_eq!(path, PathBuf::from(DEFAULT_WORKSPACE));
    }

    #[test]
    fn test_relative_path_made_absolute() {
        let path = absolutize(Some("some/relative/dir")).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("some/relative/dir"));
    }

    #[test]
    fn test_existing_directory_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().to_str().unwrap();

        let workspace = resolve(Some(raw)).unwrap();
        assert_eq!(workspace.as_path(), dir.path());
    }

    #[test]
    fn test_missing_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = resolve(missing.to_str()).unwrap_err();
        match err {
            WorkspaceError::NotFound(path) => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }
}
