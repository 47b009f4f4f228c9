//! Command implementations and dispatch.

pub mod config;
pub mod exists;
pub mod extract;
pub mod find;
pub mod init;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Loads the command context and dispatches to the selected subcommand.
pub async fn run(command: Commands) -> ExitCode {
    let ctx = match &command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    match command {
        Commands::Find(cmd) => find::run(&ctx, &cmd).await,
        Commands::Exists(cmd) => exists::run(&ctx, &cmd).await,
        Commands::Extract(cmd) => extract::run(&ctx, &cmd).await,
        Commands::Config => config::run(&ctx),
        Commands::Init(cmd) => init::run(&ctx, &cmd),
    }
}
