use std::process::ExitCode;

use clap::Parser;
use trans_vcs::{
    cli::{
        args::{CliArgs, Command},
        command_handlers::{do_clone, do_remote_revision, do_revision},
    },
    config::TransVcsConfig,
};

fn run() -> anyhow::Result<()> {
    let cli_args: CliArgs = CliArgs::parse();
    let config = TransVcsConfig::load()?;

    let revision = match cli_args.cmd {
        Command::Clone { source, target } => do_clone(cli_args.vcs, &config, &source, &target)?,
        Command::Revision { path } => do_revision(cli_args.vcs, &config, &path)?,
        Command::RemoteRevision { path } => do_remote_revision(cli_args.vcs, &config, &path)?,
    };
    println!("{revision}");

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
