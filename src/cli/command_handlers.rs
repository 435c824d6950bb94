use std::path::Path;

use log::info;

use crate::{
    cli::args::VcsKind,
    config::TransVcsConfig,
    vcs::{GitRepository, RepositoryError},
};

/// Handler to clone command
/// Returns the revision checked out in the new working copy
pub fn do_clone(
    vcs: VcsKind,
    config: &TransVcsConfig,
    source: &str,
    target: &Path,
) -> Result<String, RepositoryError> {
    match vcs {
        VcsKind::Git => {
            info!("Cloning {} into {}", source, target.display());
            let repo = GitRepository::clone_with(config.git(), source, target)?;
            repo.last_revision().map(str::to_owned)
        }
    }
}

/// Handler to revision command
pub fn do_revision(
    vcs: VcsKind,
    config: &TransVcsConfig,
    path: &Path,
) -> Result<String, RepositoryError> {
    match vcs {
        VcsKind::Git => GitRepository::with_vcs(config.git(), path)
            .last_revision()
            .map(str::to_owned),
    }
}

/// Handler to remote-revision command
pub fn do_remote_revision(
    vcs: VcsKind,
    config: &TransVcsConfig,
    path: &Path,
) -> Result<String, RepositoryError> {
    match vcs {
        VcsKind::Git => GitRepository::with_vcs(config.git(), path)
            .last_remote_revision()
            .map(str::to_owned),
    }
}
