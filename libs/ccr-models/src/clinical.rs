//! The flat clinical record produced by the importer.
//!
//! Entities are value objects: assembled once per source element and never
//! mutated afterwards. Every timestamp is epoch seconds derived from a
//! resolvable ISO-8601 string, or simply absent — with the single exception
//! of [`Patient::birthdate`], which falls back to [`UNKNOWN_DATE`] because
//! downstream age computations need a concrete value.

use serde::{Deserialize, Serialize};

/// Sentinel stored in [`Patient::birthdate`] when the document carries no
/// birth timestamp, and returned by epoch conversion for unusable input.
/// Far enough in the past that any age derived from it is implausible.
pub const UNKNOWN_DATE: i64 = -999_999_999_999;

/// Normalized (system, version?, values) triple produced from a source
/// coded description. The values share one coding system; free text rides
/// under the synthetic `"TEXT"` system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodedValue {
    pub coding_system: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub values: Vec<String>,
}

impl CodedValue {
    pub fn new(coding_system: impl Into<String>) -> Self {
        Self {
            coding_system: coding_system.into(),
            version: None,
            values: Vec::new(),
        }
    }

    pub fn add_value(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Epoch seconds, or [`UNKNOWN_DATE`] when the document has no birth
    /// timestamp.
    pub birthdate: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl Default for Patient {
    fn default() -> Self {
        Self {
            birthdate: UNKNOWN_DATE,
            first: None,
            last: None,
            gender: None,
        }
    }
}

/// An actor referenced anywhere in the document, kept as its raw identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,

    #[serde(default)]
    pub description: Vec<CodedValue>,

    #[serde(default)]
    pub status: Vec<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub id: String,

    #[serde(default)]
    pub description: Vec<CodedValue>,

    /// Actor ids of the practitioners involved, verbatim.
    #[serde(default)]
    pub providers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Result {
    pub id: String,

    #[serde(default)]
    pub description: Vec<CodedValue>,

    #[serde(rename = "type", default)]
    pub result_type: Vec<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_time: Option<i64>,

    #[serde(default)]
    pub tests: Vec<Test>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    pub id: String,

    #[serde(default)]
    pub description: Vec<CodedValue>,

    /// Falls back to the parent result's collection time when the test
    /// itself has no resolvable collection event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_time: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,

    /// Own description plus one entry per product name and brand name
    /// across all products, in document order.
    #[serde(default)]
    pub description: Vec<CodedValue>,

    #[serde(rename = "type", default)]
    pub med_type: Vec<CodedValue>,

    #[serde(default)]
    pub status: Vec<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Allergy {
    pub id: String,

    /// Aggregate of the alert description, each agent's product
    /// descriptions and nested product/brand names, and each environmental
    /// agent description.
    #[serde(default)]
    pub description: Vec<CodedValue>,

    #[serde(rename = "type", default)]
    pub allergy_type: Vec<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub id: String,

    #[serde(default)]
    pub description: Vec<CodedValue>,

    #[serde(rename = "type", default)]
    pub procedure_type: Vec<CodedValue>,

    #[serde(default)]
    pub providers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended: Option<i64>,
}

/// A requested item inside an order. Product-like requests reuse the
/// medication shape, service-like requests the encounter shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OrderRequestItem {
    Medication(Medication),
    Encounter(Encounter),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,

    /// Parent plan description first, then the order request's own.
    #[serde(default)]
    pub description: Vec<CodedValue>,

    #[serde(rename = "type", default)]
    pub order_type: Vec<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<i64>,

    #[serde(default)]
    pub requests: Vec<OrderRequestItem>,

    #[serde(default)]
    pub goals: Vec<Goal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,

    #[serde(default)]
    pub description: Vec<CodedValue>,

    #[serde(rename = "type", default)]
    pub goal_type: Vec<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_date: Option<i64>,
}

/// The root aggregate: one patient plus ordered sequences of every other
/// entity kind extracted from the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub patient: Patient,

    #[serde(default)]
    pub actors: Vec<Actor>,

    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub encounters: Vec<Encounter>,

    #[serde(default)]
    pub procedures: Vec<Procedure>,

    #[serde(default)]
    pub results: Vec<Result>,

    #[serde(default)]
    pub medications: Vec<Medication>,

    #[serde(default)]
    pub allergies: Vec<Allergy>,

    #[serde(default)]
    pub orders: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_serializes_to_single_letter() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"M\"");
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"F\"");
    }

    #[test]
    fn default_patient_has_unknown_birthdate() {
        assert_eq!(Patient::default().birthdate, UNKNOWN_DATE);
    }

    #[test]
    fn absent_timestamps_are_omitted_from_json() {
        let condition = Condition {
            id: "C_1".into(),
            ..Condition::default()
        };
        let json = serde_json::to_value(&condition).unwrap();
        assert!(json.get("onset").is_none());
        assert!(json.get("resolution").is_none());
    }

    #[test]
    fn order_request_items_are_tagged() {
        let item = OrderRequestItem::Encounter(Encounter {
            id: "E_1".into(),
            ..Encounter::default()
        });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "encounter");
        assert_eq!(json["id"], "E_1");
    }
}
