//! Implementation of `fts exists`.

use std::process::ExitCode;

use serde::Serialize;

use crate::cli::{
    args::ExistsCommand,
    context::{CommandContext, fail, read_content},
    output::print_json,
};

/// JSON output for `fts exists`.
#[derive(Serialize)]
struct JsonExists {
    /// Whether any phrase was found.
    exists: bool,
}

/// Prints whether any of the phrases occurs.
pub async fn run(ctx: &CommandContext, cmd: &ExistsCommand) -> ExitCode {
    let locator = match ctx.locator(&cmd.params, None) {
        Ok(locator) => locator,
        Err(code) => return code,
    };
    let content = match read_content(&cmd.input) {
        Ok(content) => content,
        Err(code) => return code,
    };

    let exists = match locator.does_text_exist(&content, &cmd.phrases).await {
        Ok(exists) => exists,
        Err(e) => return fail(&e),
    };

    if cmd.output.json {
        return print_json(&JsonExists { exists });
    }
    println!("{exists}");
    ExitCode::SUCCESS
}
