use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Queries and clones version control working copies.
#[derive(Debug, Parser)]
#[clap(version)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub cmd: Command,
    /// Version control system driving the working copy
    #[clap(long, value_enum, default_value_t = VcsKind::Git, global = true)]
    pub vcs: VcsKind,
}

#[derive(Debug, Parser)]
pub enum Command {
    ///Clones a repository and prints the revision of the new working copy
    Clone {
        /// Local path or URL of the repository to clone
        source: String,
        /// Directory to clone into
        target: PathBuf,
    },
    ///Prints the revision of the current checkout
    Revision {
        #[clap(default_value = ".")]
        path: PathBuf,
    },
    ///Prints the revision of the upstream tracking reference
    RemoteRevision {
        #[clap(default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VcsKind {
    Git,
}
