use std::{
    ffi::{OsStr, OsString},
    path::PathBuf,
};

use super::{Repository, Vcs};

const DEFAULT_COMMAND: &str = "git";

const LAST_REVISION: &[&str] = &["log", "-n", "1", "--format=format:%H", "@"];
const LAST_REMOTE_REVISION: &[&str] = &["log", "-n", "1", "--format=format:%H", "@{upstream}"];
const CLONE: &[&str] = &["clone"];

// Fail instead of waiting for credentials on a terminal nobody is watching.
const ENVS: &[(&str, &str)] = &[("GIT_TERMINAL_PROMPT", "0")];

/// A working copy managed by the `git` command line tool.
pub type GitRepository = Repository<Git>;

/// Git backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Git {
    command: OsString,
}

impl Git {
    /// Uses the given executable instead of `git` from `PATH`.
    pub fn with_command(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into().into_os_string(),
        }
    }
}

impl Default for Git {
    fn default() -> Self {
        Self {
            command: OsString::from(DEFAULT_COMMAND),
        }
    }
}

impl Vcs for Git {
    fn command(&self) -> &OsStr {
        &self.command
    }

    fn last_revision_args(&self) -> &[&str] {
        LAST_REVISION
    }

    fn last_remote_revision_args(&self) -> &[&str] {
        LAST_REMOTE_REVISION
    }

    fn clone_args(&self) -> &[&str] {
        CLONE
    }

    fn envs(&self) -> &[(&str, &str)] {
        ENVS
    }
}
