//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use fts_locate::FoundEntity;
use serde::Serialize;

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds a table with one row per located phrase occurrence.
pub fn found_table(found: &[FoundEntity]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Phrase", "Found", "Start", "End", "Accuracy"]);
    for hit in found {
        table.add_row(vec![
            Cell::new(&hit.search_text),
            Cell::new(&hit.found_text),
            Cell::new(hit.start_offset.to_string()),
            Cell::new(hit.end_offset.to_string()),
            Cell::new(format!("{:.2}", hit.accuracy)),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use fts_locate::PhraseRole;

    use super::*;

    #[test]
    fn table_lists_every_hit() {
        let hit = FoundEntity {
            search_text: "nice to meet you".into(),
            search_words: vec!["nice".into(), "meet".into(), "you".into()],
            found_text: "Nice to meat you".into(),
            start_offset: 0,
            end_offset: 16,
            accuracy: 0.75,
            role: PhraseRole::Plain,
        };
        let rendered = found_table(&[hit]).to_string();
        assert!(rendered.contains("Accuracy"));
        assert!(rendered.contains("Nice to meat you"));
        assert!(rendered.contains("0.75"));
    }
}
