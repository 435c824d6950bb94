use std::{collections::HashMap, path::PathBuf};

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::vcs::Git;

pub struct TransVcsConfig {
    pub git_command: Option<PathBuf>,
}

impl TransVcsConfig {
    pub fn load() -> anyhow::Result<Self> {
        let raw_config = RawConfig::load(None)?;

        Ok(Self {
            git_command: raw_config.git.command,
        })
    }

    /// Git backend honoring the configured executable.
    pub fn git(&self) -> Git {
        match &self.git_command {
            Some(command) => Git::with_command(command),
            None => Git::default(),
        }
    }
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct RawConfig {
    #[serde(default)]
    git: GitConfig,
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct GitConfig {
    command: Option<PathBuf>,
}

impl RawConfig {
    fn load(env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                Environment::with_prefix("TRANS_VCS")
                    .separator("_")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}
