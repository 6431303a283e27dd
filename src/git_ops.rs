use git2::Repository;
use std::path::Path;

use crate::error::{NextVersionError, Result};

/// Wrapper around git2 Repository for ref lookups.
///
/// Only consulted when the environment does not provide the triggering ref.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Discovers the git repository at `path` or one of its parents.
    ///
    /// # Returns
    /// * `Ok(GitRepo)` - Successfully initialized repository wrapper
    /// * `Err` - If `path` is not inside a git repository
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|e| {
            NextVersionError::reference(format!(
                "Not in a git repository ({}): {}",
                path.display(),
                e.message()
            ))
        })?;
        Ok(GitRepo { repo })
    }

    /// Full name of the reference HEAD points at (e.g. "refs/heads/master").
    ///
    /// Works on unborn branches, where HEAD names a branch without commits.
    /// A detached HEAD has no branch ref and is an error.
    pub fn head_ref(&self) -> Result<String> {
        let head = self.repo.find_reference("HEAD")?;

        match head.symbolic_target() {
            Some(target) => Ok(target.to_string()),
            None => Err(NextVersionError::reference(
                "HEAD is detached; pass --ref or set GITHUB_REF",
            )),
        }
    }
}

/// Resolves the ref checked out in the repository containing `path`.
pub fn current_ref<P: AsRef<Path>>(path: P) -> Result<String> {
    GitRepo::discover(path)?.head_ref()
}
