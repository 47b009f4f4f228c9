//! Implementation of `fts config`.

use std::process::ExitCode;

use crate::cli::context::{CommandContext, fail};

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    match ctx.config.settings_to_toml() {
        Ok(toml) => {
            if let Some(root) = &ctx.config.config_root {
                println!("# config root: {}", root.display());
            }
            print!("{toml}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}
