//! Implementation of `fts init`.

use std::{fs, path::PathBuf, process::ExitCode};

use fts_config::{CONFIG_FILENAME, global_config_path, global_template, local_template};

use crate::cli::{args::InitCommand, context::CommandContext};

/// Writes a commented `.fts.toml` template.
///
/// Running in the home directory behaves like `--global`.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let Some((target, template)) = target(ctx, cmd) else {
        eprintln!("error: could not determine home directory");
        return ExitCode::FAILURE;
    };

    if !cmd.force && target.exists() {
        eprintln!(
            "error: {} already exists (use --force to overwrite)",
            target.display()
        );
        return ExitCode::FAILURE;
    }

    match fs::write(&target, template) {
        Ok(()) => {
            println!("Created {}", target.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write {}: {e}", target.display());
            ExitCode::FAILURE
        }
    }
}

/// Picks the file to write and the template that goes into it.
fn target(ctx: &CommandContext, cmd: &InitCommand) -> Option<(PathBuf, String)> {
    let global = global_config_path();
    let in_home = global
        .as_deref()
        .and_then(|path| path.parent())
        .is_some_and(|home| home == ctx.cwd);

    if cmd.global || in_home {
        global.map(|path| (path, global_template()))
    } else {
        Some((ctx.cwd.join(CONFIG_FILENAME), local_template()))
    }
}
