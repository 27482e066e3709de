//! Data model for CCR clinical data extraction.
//!
//! Two families of types live here:
//!
//! - [`source`]: the in-memory tree of a Continuity of Care Record as it
//!   arrives from upstream. The same clinical fact typically appears in
//!   several places of this tree (document description, element description,
//!   nested sub-element description) and every element may carry multiple
//!   timestamped events with ambiguous roles.
//! - [`clinical`]: the flat, uniformly-shaped record the importer produces
//!   for downstream rule matching. One entry per clinical fact, timestamps
//!   reduced to epoch seconds.
//!
//! No validation and no extraction logic - just data representation.

pub mod clinical;
pub mod source;

pub use clinical::{
    Actor, Allergy, CodedValue, Condition, Encounter, Gender, Goal, Medication, Order,
    OrderRequestItem, Patient, Procedure, Record, Test, UNKNOWN_DATE,
};
pub use source::{Code, CodedDescription, ContinuityOfCareRecord, DateTimeEntry};
