//! Minimal abstraction over version control command line tools.
//!
//! ```no_run
//! use trans_vcs::vcs::GitRepository;
//!
//! let repo = GitRepository::clone("https://example.com/project.git", "project")?;
//! println!("{}", repo.last_revision()?);
//! # Ok::<(), trans_vcs::vcs::RepositoryError>(())
//! ```

pub mod cli;
pub mod config;
pub mod vcs;
