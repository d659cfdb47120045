//! Boundary with the third-party grammar engine.
//!
//! The `gherkin` crate is treated as an opaque parsing adapter: it receives
//! source text plus a filename label and either returns its typed parse
//! result or a diagnostic. Everything downstream of this module works from
//! that result and from the exact text that was parsed, which this module
//! hands back alongside the tree so that position-based lookups line up.

use gherkin::GherkinEnv;

use crate::ModelError;
use crate::dialect;

/// A successful parse: the adapter's result plus the exact text it saw.
pub(crate) struct Parsed {
    /// The adapter's typed parse tree.
    pub ast: gherkin::Feature,
    /// The normalized text the tree's line numbers refer to.
    pub text: String,
}

/// Parses `source` under the given filename label.
///
/// The active dialect is applied by prepending a `# language:` directive when
/// the text does not already carry one (scaffolded fragments always do). A
/// missing trailing newline is supplied, matching the grammar engine's own
/// normalization, so that byte offsets and line numbers stay consistent.
pub(crate) fn parse_text(source: &str, filename: &str) -> Result<Parsed, ModelError> {
    let mut text = apply_dialect_directive(source);
    if !text.ends_with('\n') {
        text.push('\n');
    }

    log::debug!("parsing gherkin text labelled '{filename}'");

    match gherkin::Feature::parse(&text, GherkinEnv::default()) {
        Ok(ast) => Ok(Parsed { ast, text }),
        Err(source) => Err(ModelError::Parse {
            filename: filename.to_owned(),
            source,
        }),
    }
}

fn apply_dialect_directive(source: &str) -> String {
    let code = dialect().code;
    if code != "en" && !has_language_directive(source) {
        format!("# language: {code}\n{source}")
    } else {
        source.to_owned()
    }
}

fn has_language_directive(source: &str) -> bool {
    let first = source.trim_start().lines().next().unwrap_or_default();
    let Some(comment) = first.trim_start().strip_prefix('#') else {
        return false;
    };
    comment.trim_start().starts_with("language")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn parse_errors_carry_the_filename_label() {
        crate::set_dialect(crate::Dialect::default());
        let result = parse_text("not gherkin at all", "some_label.feature");
        let error = result.err().expect("parse should fail");
        assert!(error.to_string().contains("'some_label.feature'"));
    }

    #[test]
    #[serial]
    fn trailing_newline_is_supplied() {
        crate::set_dialect(crate::Dialect::default());
        let parsed = parse_text("Feature: trailing", "test.feature").expect("valid gherkin");
        assert!(parsed.text.ends_with('\n'));
    }

    #[test]
    fn language_directives_are_detected() {
        assert!(has_language_directive("# language: en\nFeature:"));
        assert!(has_language_directive("#language:no\nEgenskap:"));
        assert!(!has_language_directive("# a plain comment\nFeature:"));
        assert!(!has_language_directive("Feature:"));
    }
}
