//! Implementation of `fts extract`.

use std::process::ExitCode;

use crate::cli::{
    args::ExtractCommand,
    context::{CommandContext, fail, read_content},
    output::{found_table, print_json},
};

/// Extracts the text between marker phrases.
pub async fn run(ctx: &CommandContext, cmd: &ExtractCommand) -> ExitCode {
    let locator = match ctx.locator(&cmd.params, cmd.delimiter.as_deref()) {
        Ok(locator) => locator,
        Err(code) => return code,
    };
    let content = match read_content(&cmd.input) {
        Ok(content) => content,
        Err(code) => return code,
    };

    let extracted = match locator
        .extract_text(&content, &cmd.pre_phrases, &cmd.post_phrases)
        .await
    {
        Ok(extracted) => extracted,
        Err(e) => return fail(&e),
    };

    if cmd.output.json {
        return print_json(&extracted);
    }

    if cmd.markers {
        let markers: Vec<_> = extracted
            .found_pre_phrases
            .iter()
            .chain(&extracted.found_post_phrases)
            .cloned()
            .collect();
        println!("{}", found_table(&markers));
    }
    match &extracted.extracted_text {
        Some(text) => println!("{text}"),
        None => eprintln!("no text found between markers"),
    }
    ExitCode::SUCCESS
}
