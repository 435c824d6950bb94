use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
    string::FromUtf8Error,
};

use log::{debug, trace};
use once_cell::unsync::OnceCell;
use thiserror::Error;

use super::Vcs;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("{command} failed ({status}): {stderr}")]
    Command {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("Could not run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("Command output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

impl RepositoryError {
    /// Standard error of the failed command, if the command ran at all.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            RepositoryError::Command { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

/// A working copy driven through the command line tool of `V`.
///
/// Revisions are read lazily and memoized for the lifetime of the value.
/// Nothing ever invalidates them: after the working copy changes, a new
/// `Repository` has to be created to observe the new state.
#[derive(Debug)]
pub struct Repository<V: Vcs> {
    vcs: V,
    path: PathBuf,
    last_revision: OnceCell<String>,
    last_remote_revision: OnceCell<String>,
}

impl<V: Vcs + Default> Repository<V> {
    /// Wraps an existing working copy using the default backend configuration.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_vcs(V::default(), path)
    }

    /// Clones `source` into `target` and returns the new working copy.
    ///
    /// The clone runs in the current directory of the process, so relative
    /// paths are resolved against it.
    pub fn clone(
        source: impl AsRef<OsStr>,
        target: impl Into<PathBuf>,
    ) -> Result<Self, RepositoryError> {
        Self::clone_with(V::default(), source, target)
    }
}

impl<V: Vcs> Repository<V> {
    pub fn with_vcs(vcs: V, path: impl Into<PathBuf>) -> Self {
        Repository {
            vcs,
            path: path.into(),
            last_revision: OnceCell::new(),
            last_remote_revision: OnceCell::new(),
        }
    }

    pub fn clone_with(
        vcs: V,
        source: impl AsRef<OsStr>,
        target: impl Into<PathBuf>,
    ) -> Result<Self, RepositoryError> {
        let target = target.into();
        let args = vcs
            .clone_args()
            .iter()
            .map(|arg| OsStr::new(*arg))
            .chain([source.as_ref(), target.as_os_str()]);
        execute(&vcs, args, None)?;
        Ok(Self::with_vcs(vcs, target))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Revision of the current checkout.
    pub fn last_revision(&self) -> Result<&str, RepositoryError> {
        self.memoized(&self.last_revision, self.vcs.last_revision_args())
    }

    /// Revision of the upstream tracking reference of the current branch.
    pub fn last_remote_revision(&self) -> Result<&str, RepositoryError> {
        self.memoized(
            &self.last_remote_revision,
            self.vcs.last_remote_revision_args(),
        )
    }

    fn memoized<'a>(
        &'a self,
        cell: &'a OnceCell<String>,
        args: &[&str],
    ) -> Result<&'a str, RepositoryError> {
        if let Some(revision) = cell.get() {
            debug!("Reusing revision {} for {}", revision, self.path.display());
            return Ok(revision);
        }
        cell.get_or_try_init(|| {
            let output = execute(&self.vcs, args, Some(&self.path))?;
            Ok(output.trim_end().to_owned())
        })
        .map(String::as_str)
    }
}

fn execute<V, I, S>(vcs: &V, args: I, cwd: Option<&Path>) -> Result<String, RepositoryError>
where
    V: Vcs + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(vcs.command());
    command
        .args(args)
        .envs(vcs.envs().iter().copied())
        .stdin(Stdio::null());
    if let Some(cwd) = cwd {
        command.current_dir(cwd);
    }

    debug!("Running {:?}", command);

    let name = vcs.command().to_string_lossy().into_owned();
    let output = command.output().map_err(|source| RepositoryError::Spawn {
        command: name.clone(),
        source,
    })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        return Err(RepositoryError::Command {
            command: name,
            status: output.status,
            stderr: stderr.trim().to_owned(),
        });
    }
    if !stderr.is_empty() {
        trace!("{} stderr: {}", name, stderr.trim_end());
    }

    Ok(String::from_utf8(output.stdout)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// Shell backend reading revisions from plain files in the working copy.
    #[derive(Debug, Default)]
    struct FileVcs;

    impl Vcs for FileVcs {
        fn command(&self) -> &OsStr {
            OsStr::new("sh")
        }

        fn last_revision_args(&self) -> &[&str] {
            &["-c", "cat HEAD"]
        }

        fn last_remote_revision_args(&self) -> &[&str] {
            &["-c", "cat UPSTREAM"]
        }

        fn clone_args(&self) -> &[&str] {
            &["-c", "mkdir \"$1\" && cp \"$0\"/HEAD \"$0\"/UPSTREAM \"$1\""]
        }
    }

    fn working_copy(head: &str, upstream: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("HEAD"), head).unwrap();
        std::fs::write(dir.path().join("UPSTREAM"), upstream).unwrap();
        dir
    }

    #[test]
    fn reads_revisions() {
        let dir = working_copy("abc\n", "def\n");
        let repo = Repository::<FileVcs>::new(dir.path());
        assert_eq!(repo.last_revision().unwrap(), "abc");
        assert_eq!(repo.last_remote_revision().unwrap(), "def");
    }

    #[test]
    fn revision_is_not_invalidated() {
        let dir = working_copy("abc", "def");
        let repo = Repository::<FileVcs>::new(dir.path());
        assert_eq!(repo.last_revision().unwrap(), "abc");

        std::fs::write(dir.path().join("HEAD"), "xyz").unwrap();
        assert_eq!(repo.last_revision().unwrap(), "abc");

        let fresh = Repository::<FileVcs>::new(dir.path());
        assert_eq!(fresh.last_revision().unwrap(), "xyz");
    }

    #[test]
    fn instances_have_independent_caches() {
        let dir = working_copy("abc", "def");
        let first = Repository::<FileVcs>::new(dir.path());
        let second = Repository::<FileVcs>::new(dir.path());

        assert_eq!(first.last_remote_revision().unwrap(), "def");
        std::fs::write(dir.path().join("UPSTREAM"), "ghi").unwrap();

        assert_eq!(first.last_remote_revision().unwrap(), "def");
        assert_eq!(second.last_remote_revision().unwrap(), "ghi");
    }

    #[test]
    fn failure_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::<FileVcs>::new(dir.path());
        let error = repo.last_revision().expect_err("HEAD file is missing");
        assert!(matches!(error, RepositoryError::Command { .. }));
        assert!(error.stderr().unwrap().contains("HEAD"));
    }

    #[test]
    fn failure_is_not_memoized() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::<FileVcs>::new(dir.path());
        repo.last_revision().expect_err("HEAD file is missing");

        std::fs::write(dir.path().join("HEAD"), "abc").unwrap();
        assert_eq!(repo.last_revision().unwrap(), "abc");
    }

    #[test]
    fn clone_binds_target() {
        let source = working_copy("abc", "def");
        let parent = tempfile::tempdir().unwrap();
        let target = parent.path().join("copy");

        let repo = Repository::<FileVcs>::clone(source.path(), &target).unwrap();
        assert_eq!(repo.path(), target.as_path());
        assert_eq!(repo.last_revision().unwrap(), "abc");
    }

    #[test]
    fn clone_failure() {
        let parent = tempfile::tempdir().unwrap();
        let missing = parent.path().join("missing");
        let error = Repository::<FileVcs>::clone(&missing, parent.path().join("copy"))
            .expect_err("source does not exist");
        assert!(!error.stderr().unwrap().is_empty());
    }

    #[test]
    fn missing_executable() {
        #[derive(Debug, Default)]
        struct Missing;

        impl Vcs for Missing {
            fn command(&self) -> &OsStr {
                OsStr::new("trans-vcs-no-such-binary")
            }

            fn last_revision_args(&self) -> &[&str] {
                &[]
            }

            fn last_remote_revision_args(&self) -> &[&str] {
                &[]
            }

            fn clone_args(&self) -> &[&str] {
                &[]
            }
        }

        let repo = Repository::<Missing>::new(".");
        let error = repo.last_revision().expect_err("binary does not exist");
        assert!(matches!(error, RepositoryError::Spawn { .. }));
        assert_eq!(error.stderr(), None);
    }
}
