//! Vocabulary-driven CCR data extraction.
//!
//! A CCR document states the same clinical fact in several places and hangs
//! multiple ambiguously-labeled timestamps off every element. The importer
//! flattens that tree into one uniformly-shaped [`Record`](carta_models::Record)
//! per document, ready for downstream rule matching.
//!
//! The interesting part is the resolution machinery:
//!
//! - [`resolve_date`] picks the one timestamp out of a list of dated events
//!   that plays a named semantic role ("onset", "collected", ...), using the
//!   controlled vocabulary's term sets.
//! - [`concept_match`] decides whether a coded/textual item from the source
//!   belongs to a term set, by code first and by case-insensitive text second.
//! - [`convert_coded_description`] normalizes a source coded description
//!   into flat [`CodedValue`](carta_models::CodedValue)s.
//!
//! Everything else is a deterministic tree walk that copies fields into the
//! target shape, orchestrated by [`Importer::create_record`].
//!
//! # Usage
//!
//! ```
//! use carta_importer::Importer;
//! use carta_models::source::ContinuityOfCareRecord;
//! use carta_vocabulary::{TermSet, Vocabulary};
//!
//! let vocab = Vocabulary::from_term_sets(
//!     carta_importer::REQUIRED_TERM_SETS.iter().map(|id| TermSet {
//!         id: (*id).to_string(),
//!         terms: vec![(*id).to_string()],
//!         ..TermSet::default()
//!     }),
//! )
//! .unwrap();
//!
//! let importer = Importer::new(vocab).unwrap();
//! let record = importer.create_record(&ContinuityOfCareRecord::default());
//! assert!(record.conditions.is_empty());
//! ```
//!
//! One importer instance holds only the (read-only) vocabulary; the document
//! is passed into every call, so a single instance can serve concurrent
//! extractions.

mod assembler;
mod concept;
mod convert;
mod dates;
mod error;

pub use assembler::{Importer, REQUIRED_TERM_SETS};
pub use concept::concept_match;
pub use convert::{convert_coded_description, epoch_seconds, parse_exact_date_time, TEXT_SYSTEM};
pub use dates::resolve_date;
pub use error::ImportError;
