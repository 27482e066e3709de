//! Controlled vocabulary for CCR data extraction.
//!
//! A [`Vocabulary`] is a read-only map from term-set id to [`TermSet`]. Each
//! term set names one semantic role — "onset", "collected", "gender_male" —
//! through a list of recognized codes and free-text terms. The importer
//! queries term sets to decide which of several ambiguous timestamps plays a
//! given role and whether a coded concept belongs to a category; it never
//! mutates them.
//!
//! Loaded once (typically from a JSON file) and then shared freely: the map
//! is immutable after construction, so concurrent readers need no
//! synchronization.

use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("malformed vocabulary document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate term set id `{id}`")]
    DuplicateTermSet { id: String },
}

/// One recognized code within a term set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodedTerm {
    pub system: String,

    /// Carried for completeness; code comparison currently ignores versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub value: String,
}

/// A named set of codes and free-text terms representing one semantic role.
/// Immutable after vocabulary load; `codes` and `terms` keep their document
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSet {
    pub id: String,

    #[serde(default)]
    pub codes: Vec<CodedTerm>,

    #[serde(default)]
    pub terms: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct VocabularyFile {
    #[serde(default)]
    termsets: Vec<TermSet>,
}

/// Read-only mapping from term-set id to [`TermSet`].
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    sets: HashMap<String, TermSet>,
}

impl Vocabulary {
    /// Build a vocabulary from term sets assembled in memory.
    pub fn from_term_sets(
        term_sets: impl IntoIterator<Item = TermSet>,
    ) -> Result<Self, VocabularyError> {
        let mut sets = HashMap::new();
        for ts in term_sets {
            if sets.contains_key(&ts.id) {
                return Err(VocabularyError::DuplicateTermSet { id: ts.id });
            }
            sets.insert(ts.id.clone(), ts);
        }
        Ok(Self { sets })
    }

    /// Parse the JSON vocabulary document:
    /// `{"termsets": [{"id": ..., "codes": [...], "terms": [...]}, ...]}`.
    pub fn from_json_str(json: &str) -> Result<Self, VocabularyError> {
        let file: VocabularyFile = serde_json::from_str(json)?;
        Self::from_term_sets(file.termsets)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, VocabularyError> {
        let file: VocabularyFile = serde_json::from_reader(reader)?;
        Self::from_term_sets(file.termsets)
    }

    /// The base vocabulary embedded in the crate: the role and gender term
    /// sets with the codes and spellings commonly seen in CCR documents.
    /// A starting point; production deployments usually extend it with
    /// site-specific spellings.
    pub fn base() -> Self {
        Self::from_json_str(include_str!("base_vocabulary.json"))
            .expect("embedded base vocabulary is valid")
    }

    pub fn get(&self, id: &str) -> Option<&TermSet> {
        self.sets.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterate over the term sets in unspecified order.
    pub fn term_sets(&self) -> impl Iterator<Item = &TermSet> {
        self.sets.values()
    }
}
