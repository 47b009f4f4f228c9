//! Implementation of `fts find`.

use std::process::ExitCode;

use crate::cli::{
    args::FindCommand,
    context::{CommandContext, fail, read_content},
    output::{found_table, print_json},
};

/// Finds every occurrence of the given phrases.
pub async fn run(ctx: &CommandContext, cmd: &FindCommand) -> ExitCode {
    let locator = match ctx.locator(&cmd.params, None) {
        Ok(locator) => locator,
        Err(code) => return code,
    };
    let content = match read_content(&cmd.input) {
        Ok(content) => content,
        Err(code) => return code,
    };

    let found = match locator.find_text(&content, &cmd.phrases).await {
        Ok(found) => found,
        Err(e) => return fail(&e),
    };

    if cmd.output.json {
        return print_json(&found);
    }
    if found.is_empty() {
        eprintln!("no matches");
    } else {
        println!("{}", found_table(&found));
    }
    ExitCode::SUCCESS
}
