use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The supplied vocabulary lacks term sets the importer depends on.
    /// Nothing can be extracted without them, so construction refuses and
    /// no partially-usable importer ever exists.
    #[error("vocabulary is missing required term sets: {}", missing.join(", "))]
    IncompleteVocabulary { missing: Vec<String> },
}
