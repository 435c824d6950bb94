mod git;
mod repository;

use std::ffi::OsStr;

pub use git::{Git, GitRepository};
pub use repository::{Repository, RepositoryError};

/// Configuration of a version control backend.
///
/// A backend only describes which executable to run and with which arguments;
/// spawning the process and interpreting its exit status is done once, by
/// [`Repository`].
pub trait Vcs {
    /// Executable name or path of the command line tool.
    fn command(&self) -> &OsStr;

    /// Arguments printing the revision of the current checkout.
    fn last_revision_args(&self) -> &[&str];

    /// Arguments printing the revision of the upstream tracking reference.
    fn last_remote_revision_args(&self) -> &[&str];

    /// Arguments preceding `<source> <target>` in a clone invocation.
    fn clone_args(&self) -> &[&str];

    /// Extra environment variables set for every invocation.
    fn envs(&self) -> &[(&str, &str)] {
        &[]
    }
}
