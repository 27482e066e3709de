//! In-memory tree of an ASTM CCR document.
//!
//! Only the subset the importer walks is modeled. Parsing the wire format
//! (XML or otherwise) into this shape is an upstream concern; the types
//! deserialize from the JSON rendering of the document tree.

use serde::{Deserialize, Serialize};

/// Root of the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuityOfCareRecord {
    /// References to the actor(s) that play the patient role. The first
    /// entry identifies the patient.
    #[serde(default)]
    pub patient: Vec<PatientRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<Actors>,

    #[serde(default)]
    pub body: Body,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRef {
    #[serde(rename = "actorID", default)]
    pub actor_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Actors {
    #[serde(default)]
    pub actor: Vec<Actor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    #[serde(rename = "actorObjectID", default)]
    pub actor_object_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<PersonName>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTimeEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<CodedDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_name: Option<NameParts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_name: Option<NameParts>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameParts {
    #[serde(default)]
    pub given: Vec<String>,

    #[serde(default)]
    pub family: Vec<String>,
}

/// Body sections. Every section is optional; an absent section contributes
/// nothing to the extracted record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problems: Option<Problems>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_history: Option<SocialHistory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounters: Option<Encounters>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedures: Option<Procedures>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Results>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vital_signs: Option<Results>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<Medications>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immunizations: Option<Immunizations>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Alerts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_of_care: Option<PlanOfCare>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Problems {
    #[serde(default)]
    pub problem: Vec<Problem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialHistory {
    #[serde(default)]
    pub social_history_element: Vec<Problem>,
}

/// A problem or social-history element. Both sections share the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(rename = "ccrDataObjectID", default)]
    pub ccr_data_object_id: String,

    #[serde(default)]
    pub date_time: Vec<DateTimeEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CodedDescription>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CodedDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Encounters {
    #[serde(default)]
    pub encounter: Vec<EncounterElement>,
}

/// An encounter or service element. Services inside an order request carry
/// the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterElement {
    #[serde(rename = "ccrDataObjectID", default)]
    pub ccr_data_object_id: String,

    #[serde(default)]
    pub date_time: Vec<DateTimeEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CodedDescription>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practitioners: Option<Practitioners>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Practitioners {
    #[serde(default)]
    pub practitioner: Vec<ActorReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorReference {
    #[serde(rename = "actorID", default)]
    pub actor_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Procedures {
    #[serde(default)]
    pub procedure: Vec<ProcedureElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureElement {
    #[serde(rename = "ccrDataObjectID", default)]
    pub ccr_data_object_id: String,

    #[serde(default)]
    pub date_time: Vec<DateTimeEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CodedDescription>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub procedure_type: Option<CodedDescription>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practitioners: Option<Practitioners>,
}

/// Shared by the Results and VitalSigns sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Results {
    #[serde(default)]
    pub result: Vec<ResultElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultElement {
    #[serde(rename = "ccrDataObjectID", default)]
    pub ccr_data_object_id: String,

    #[serde(default)]
    pub date_time: Vec<DateTimeEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CodedDescription>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<CodedDescription>,

    #[serde(default)]
    pub test: Vec<TestElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestElement {
    #[serde(rename = "ccrDataObjectID", default)]
    pub ccr_data_object_id: String,

    #[serde(default)]
    pub date_time: Vec<DateTimeEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CodedDescription>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_result: Option<TestResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Units>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Units {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Medications {
    #[serde(default)]
    pub medication: Vec<StructuredProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Immunizations {
    #[serde(default)]
    pub immunization: Vec<StructuredProduct>,
}

/// A medication, immunization, or ordered product. One structured product
/// may carry several concrete products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredProduct {
    #[serde(rename = "ccrDataObjectID", default)]
    pub ccr_data_object_id: String,

    #[serde(default)]
    pub date_time: Vec<DateTimeEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CodedDescription>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<CodedDescription>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CodedDescription>,

    #[serde(default)]
    pub product: Vec<Product>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<CodedDescription>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<CodedDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alerts {
    #[serde(default)]
    pub alert: Vec<Alert>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(rename = "ccrDataObjectID", default)]
    pub ccr_data_object_id: String,

    #[serde(default)]
    pub date_time: Vec<DateTimeEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CodedDescription>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<CodedDescription>,

    #[serde(default)]
    pub agent: Vec<AlertAgent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertAgent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<AgentProducts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environmental_agents: Option<EnvironmentalAgents>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentProducts {
    #[serde(default)]
    pub product: Vec<StructuredProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalAgents {
    #[serde(default)]
    pub environmental_agent: Vec<CodedElement>,
}

/// A generic coded data object; only its description is extracted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodedElement {
    #[serde(rename = "ccrDataObjectID", default)]
    pub ccr_data_object_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CodedDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanOfCare {
    #[serde(default)]
    pub plan: Vec<Plan>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(rename = "ccrDataObjectID", default)]
    pub ccr_data_object_id: String,

    #[serde(default)]
    pub date_time: Vec<DateTimeEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CodedDescription>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<CodedDescription>,

    #[serde(default)]
    pub order_request: Vec<OrderRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(rename = "ccrDataObjectID", default)]
    pub ccr_data_object_id: String,

    #[serde(default)]
    pub date_time: Vec<DateTimeEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CodedDescription>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<CodedDescription>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<AgentProducts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<Medications>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immunizations: Option<Immunizations>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Services>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounters: Option<Encounters>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Goals>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Services {
    #[serde(default)]
    pub service: Vec<EncounterElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default)]
    pub goal: Vec<GoalElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalElement {
    #[serde(rename = "ccrDataObjectID", default)]
    pub ccr_data_object_id: String,

    #[serde(default)]
    pub date_time: Vec<DateTimeEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CodedDescription>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<CodedDescription>,
}

/// A timestamped event on a source element. The `type` names the semantic
/// role the timestamp plays (onset, resolution, collection, ...); it is
/// frequently absent, which is what makes role resolution necessary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeEntry {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<CodedDescription>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_date_time: Option<String>,
}

/// Free text plus zero or more codes describing one concept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodedDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default)]
    pub code: Vec<Code>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Code {
    #[serde(default)]
    pub coding_system: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub value: String,
}
