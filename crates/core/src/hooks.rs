//! Git hook installation.
//!
//! Copies the files of a hooks source directory into the repository's
//! `.git/hooks` directory so they run on the next commit.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::HooksError;

/// Install every file from `src_dir` into `{repo_dir}/.git/hooks`.
///
/// Fails when `repo_dir` is not a git repository (no `.git/hooks`
/// directory) or when `src_dir` does not exist. Subdirectories of
/// `src_dir` are ignored. On Unix the installed files get mode `0o744` so
/// git can execute them.
///
/// Returns the number of files installed.
pub fn install_hooks(src_dir: &Path, repo_dir: &Path) -> Result<usize, HooksError> {
    let hooks_dir = repo_dir.join(".git").join("hooks");
    if !hooks_dir.is_dir() {
        return Err(HooksError::NotARepository(hooks_dir.display().to_string()));
    }
    if !src_dir.is_dir() {
        return Err(HooksError::SourceNotFound(src_dir.display().to_string()));
    }

    let mut installed = 0usize;
    for entry in fs::read_dir(src_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            debug!(path = %path.display(), "skipping non-file entry in hooks source");
            continue;
        }
        let dest = hooks_dir.join(entry.file_name());
        fs::copy(&path, &dest)?;
        set_executable(&dest)?;
        debug!(hook = %dest.display(), "installed hook");
        installed += 1;
    }

    info!(
        count = installed,
        src = %src_dir.display(),
        dest = %hooks_dir.display(),
        "hooks installed"
    );
    Ok(installed)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o744))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_into_repo() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("hooks-src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("pre-commit"), "#!/bin/sh\nexit 0\n").unwrap();
        fs::write(src.join("pre-push"), "#!/bin/sh\nexit 0\n").unwrap();
        fs::create_dir(src.join("ignored-subdir")).unwrap();

        let repo = dir.path().join("repo");
        fs::create_dir_all(repo.join(".git/hooks")).unwrap();

        let installed = install_hooks(&src, &repo).expect("install failed");
        assert_eq!(installed, 2);
        assert!(repo.join(".git/hooks/pre-commit").is_file());
        assert!(repo.join(".git/hooks/pre-push").is_file());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(repo.join(".git/hooks/pre-commit"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o744);
        }
    }

    #[test]
    fn test_refuses_non_repository() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("hooks-src");
        fs::create_dir(&src).unwrap();

        let not_a_repo = dir.path().join("plain");
        fs::create_dir(&not_a_repo).unwrap();

        let result = install_hooks(&src, &not_a_repo);
        assert!(matches!(result, Err(HooksError::NotARepository(_))));
    }

    #[test]
    fn test_missing_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path().join("repo");
        fs::create_dir_all(repo.join(".git/hooks")).unwrap();

        let result = install_hooks(&dir.path().join("nope"), &repo);
        assert!(matches!(result, Err(HooksError::SourceNotFound(_))));
    }
}
