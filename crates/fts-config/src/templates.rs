//! Configuration templates for `fts init`.
//!
//! The shipped templates are real TOML (checked by the tests below); `fts init` writes
//! them with every setting commented out.

/// `.fts.toml` contents written into a project directory.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// `.fts.toml` contents written into the home directory.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Project template, every setting commented out.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Home directory template, every setting commented out.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Comments out settings and section headers; comments and blank lines pass through.
fn comment_template(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                format!("{line}\n")
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    #[test]
    fn templates_parse_as_valid_config() {
        for template in [LOCAL_TEMPLATE, GLOBAL_TEMPLATE] {
            let result = parse_config(template);
            assert!(result.is_ok(), "template failed to parse: {result:?}");
        }
    }

    #[test]
    fn commented_template_sets_nothing() {
        let config = parse_config(&local_template()).unwrap();
        assert!(config.engine.is_none());
        assert!(config.search.is_none());
    }

    #[test]
    fn comment_template_keeps_comments_and_blank_lines() {
        let input = "# note\n[section]\n\nkey = \"value\"\n";
        assert_eq!(
            comment_template(input),
            "# note\n# [section]\n\n# key = \"value\"\n"
        );
    }
}
