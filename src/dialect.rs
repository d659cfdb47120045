//! Process-wide Gherkin dialect configuration.
//!
//! The dialect is a keyword-set selector: a language code plus the localized
//! keywords used when synthesizing scaffold text for stand-alone fragment
//! parsing and when classifying parsed test cases. It is global, mutable
//! state with an explicit accessor pair, read at population time. Callers
//! mutating it from several threads at once get whatever interleaving the
//! lock hands them; the library assumes single-threaded or externally
//! synchronized use.

use std::sync::{LazyLock, RwLock};

/// A localized Gherkin keyword set.
///
/// The first entry of each keyword list is the one used when synthesizing
/// scaffold text; the full lists are consulted when classifying parsed
/// elements (for example, telling a Scenario Outline apart from a Scenario).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialect {
    /// Language code passed to the grammar engine via the
    /// `# language: <code>` directive.
    pub code: String,
    /// Keywords introducing a feature.
    pub feature_keywords: Vec<String>,
    /// Keywords introducing a background.
    pub background_keywords: Vec<String>,
    /// Keywords introducing a scenario.
    pub scenario_keywords: Vec<String>,
    /// Keywords introducing a scenario outline.
    pub outline_keywords: Vec<String>,
    /// Keywords introducing an examples block.
    pub examples_keywords: Vec<String>,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            code: "en".to_owned(),
            feature_keywords: vec!["Feature".to_owned()],
            background_keywords: vec!["Background".to_owned()],
            scenario_keywords: vec!["Scenario".to_owned(), "Example".to_owned()],
            outline_keywords: vec![
                "Scenario Outline".to_owned(),
                "Scenario Template".to_owned(),
            ],
            examples_keywords: vec!["Examples".to_owned(), "Scenarios".to_owned()],
        }
    }
}

impl Dialect {
    /// Keyword used for the fake feature line in scaffold text.
    #[must_use]
    pub fn feature_keyword(&self) -> &str {
        self.feature_keywords.first().map_or("Feature", String::as_str)
    }

    /// Keyword used for the fake scenario line in scaffold text.
    #[must_use]
    pub fn scenario_keyword(&self) -> &str {
        self.scenario_keywords.first().map_or("Scenario", String::as_str)
    }

    /// Keyword used for the fake outline line in scaffold text.
    #[must_use]
    pub fn outline_keyword(&self) -> &str {
        self.outline_keywords
            .first()
            .map_or("Scenario Outline", String::as_str)
    }

    /// Whether `keyword` introduces a scenario outline in this dialect.
    #[must_use]
    pub fn is_outline_keyword(&self, keyword: &str) -> bool {
        self.outline_keywords.iter().any(|k| k == keyword)
    }

    /// Keywords that open a new section and therefore terminate a free-text
    /// description block.
    pub(crate) fn section_keywords(&self) -> impl Iterator<Item = &str> {
        self.background_keywords
            .iter()
            .chain(&self.scenario_keywords)
            .chain(&self.outline_keywords)
            .chain(&self.examples_keywords)
            .map(String::as_str)
    }
}

static ACTIVE_DIALECT: LazyLock<RwLock<Dialect>> =
    LazyLock::new(|| RwLock::new(Dialect::default()));

/// Returns a copy of the active dialect.
#[must_use]
pub fn dialect() -> Dialect {
    match ACTIVE_DIALECT.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replaces the active dialect for the current process.
///
/// The new dialect takes effect for every model populated afterwards;
/// existing trees are unaffected.
pub fn set_dialect(dialect: Dialect) {
    match ACTIVE_DIALECT.write() {
        Ok(mut guard) => *guard = dialect,
        Err(poisoned) => *poisoned.into_inner() = dialect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn default_dialect_is_english() {
        set_dialect(Dialect::default());
        let active = dialect();
        assert_eq!(active.code, "en");
        assert_eq!(active.feature_keyword(), "Feature");
        assert_eq!(active.scenario_keyword(), "Scenario");
        assert_eq!(active.outline_keyword(), "Scenario Outline");
    }

    #[test]
    #[serial]
    fn set_dialect_replaces_the_active_keyword_set() {
        let norwegian = Dialect {
            code: "no".to_owned(),
            feature_keywords: vec!["Egenskap".to_owned()],
            background_keywords: vec!["Bakgrunn".to_owned()],
            scenario_keywords: vec!["Scenario".to_owned()],
            outline_keywords: vec!["Scenariomal".to_owned()],
            examples_keywords: vec!["Eksempler".to_owned()],
        };
        set_dialect(norwegian.clone());
        assert_eq!(dialect(), norwegian);
        set_dialect(Dialect::default());
    }

    #[test]
    fn outline_keywords_are_recognized() {
        let dialect = Dialect::default();
        assert!(dialect.is_outline_keyword("Scenario Outline"));
        assert!(dialect.is_outline_keyword("Scenario Template"));
        assert!(!dialect.is_outline_keyword("Scenario"));
    }
}
