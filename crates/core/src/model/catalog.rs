use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of options every choice-style question carries.
pub const CHOICE_COUNT: usize = 4;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised while constructing catalog content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("term must not be empty")]
    EmptyTerm,

    #[error("definition must not be empty")]
    EmptyDefinition,

    #[error("expected {CHOICE_COUNT} options, got {0}")]
    WrongOptionCount(usize),

    #[error("correct index {0} is out of range")]
    CorrectIndexOutOfRange(usize),

    #[error("duplicate coding topic id: {0}")]
    DuplicateTopicId(String),
}

//
// ─── IDS ──────────────────────────────────────────────────────────────────────
//

/// Unique identifier for a coding topic.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TopicId(String);

impl TopicId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({})", self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── ITEMS ────────────────────────────────────────────────────────────────────
//

/// A term with its definition and the keywords a free-text answer must cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionItem {
    term: String,
    definition: String,
    keywords: Vec<String>,
}

impl DefinitionItem {
    /// Create a definition item.
    ///
    /// `keywords` may be empty; evaluation treats zero required keywords as
    /// vacuously satisfied.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyTerm` or `CatalogError::EmptyDefinition`
    /// when the respective field is blank.
    pub fn new(
        term: impl Into<String>,
        definition: impl Into<String>,
        keywords: Vec<String>,
    ) -> Result<Self, CatalogError> {
        let term = term.into();
        let definition = definition.into();
        if term.trim().is_empty() {
            return Err(CatalogError::EmptyTerm);
        }
        if definition.trim().is_empty() {
            return Err(CatalogError::EmptyDefinition);
        }
        Ok(Self {
            term,
            definition,
            keywords,
        })
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// An authored multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceQuestion {
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
}

impl ChoiceQuestion {
    /// Create a multiple-choice question with exactly [`CHOICE_COUNT`] options.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::WrongOptionCount` when `options` is not exactly
    /// [`CHOICE_COUNT`] long and `CatalogError::CorrectIndexOutOfRange` when
    /// `correct_index` does not point into `options`.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        if options.len() != CHOICE_COUNT {
            return Err(CatalogError::WrongOptionCount(options.len()));
        }
        if correct_index >= options.len() {
            return Err(CatalogError::CorrectIndexOutOfRange(correct_index));
        }
        Ok(Self {
            prompt: prompt.into(),
            options,
            correct_index,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// A coding practice topic with its starter snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodingTopic {
    id: TopicId,
    title: String,
    starter_code: String,
}

impl CodingTopic {
    #[must_use]
    pub fn new(id: TopicId, title: impl Into<String>, starter_code: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            starter_code: starter_code.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn starter_code(&self) -> &str {
        &self.starter_code
    }
}

/// One entry of the study corpus, discriminated by content kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogItem {
    Definition(DefinitionItem),
    Choice(ChoiceQuestion),
    Coding(CodingTopic),
}

//
// ─── CATALOG ──────────────────────────────────────────────────────────────────
//

/// The read-only study corpus handed to the engine at startup.
///
/// The engine never mutates a catalog; sessions copy whatever they need into
/// their own working set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    definitions: Vec<DefinitionItem>,
    questions: Vec<ChoiceQuestion>,
    coding_topics: Vec<CodingTopic>,
}

impl Catalog {
    /// Assemble a catalog from its three collections.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateTopicId` when two coding topics share
    /// an id.
    pub fn new(
        definitions: Vec<DefinitionItem>,
        questions: Vec<ChoiceQuestion>,
        coding_topics: Vec<CodingTopic>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for topic in &coding_topics {
            if !seen.insert(topic.id().clone()) {
                return Err(CatalogError::DuplicateTopicId(topic.id().value().into()));
            }
        }
        Ok(Self {
            definitions,
            questions,
            coding_topics,
        })
    }

    #[must_use]
    pub fn definitions(&self) -> &[DefinitionItem] {
        &self.definitions
    }

    #[must_use]
    pub fn questions(&self) -> &[ChoiceQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn coding_topics(&self) -> &[CodingTopic] {
        &self.coding_topics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["a".into(), "b".into(), "c".into(), "d".into()]
    }

    #[test]
    fn definition_rejects_blank_fields() {
        assert_eq!(
            DefinitionItem::new("  ", "delay", vec![]),
            Err(CatalogError::EmptyTerm)
        );
        assert_eq!(
            DefinitionItem::new("Latency", "", vec![]),
            Err(CatalogError::EmptyDefinition)
        );
    }

    #[test]
    fn definition_allows_empty_keywords() {
        let item = DefinitionItem::new("Latency", "delay", vec![]).unwrap();
        assert!(item.keywords().is_empty());
    }

    #[test]
    fn question_requires_four_options() {
        let err = ChoiceQuestion::new("q", vec!["a".into()], 0, "e").unwrap_err();
        assert_eq!(err, CatalogError::WrongOptionCount(1));
    }

    #[test]
    fn question_rejects_out_of_range_answer() {
        let err = ChoiceQuestion::new("q", options(), 4, "e").unwrap_err();
        assert_eq!(err, CatalogError::CorrectIndexOutOfRange(4));
    }

    #[test]
    fn catalog_rejects_duplicate_topic_ids() {
        let topics = vec![
            CodingTopic::new(TopicId::new("stack"), "Stacks", "// push"),
            CodingTopic::new(TopicId::new("stack"), "Stacks again", "// pop"),
        ];
        let err = Catalog::new(vec![], vec![], topics).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateTopicId("stack".into()));
    }
}
