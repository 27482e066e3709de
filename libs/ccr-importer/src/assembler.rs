//! Per-entity extraction: walks the source tree once per category and
//! assembles the flat clinical record.

use carta_models::clinical::{
    self, Actor, Allergy, CodedValue, Condition, Encounter, Gender, Goal, Medication, Order,
    OrderRequestItem, Patient, Procedure, Record, Test,
};
use carta_models::source::{
    self, Alert, ContinuityOfCareRecord, DateTimeEntry, EncounterElement, GoalElement,
    OrderRequest, Plan, Practitioners, Problem, ProcedureElement, ResultElement, StructuredProduct,
    TestElement,
};
use carta_vocabulary::{TermSet, Vocabulary};
use tracing::debug;

use crate::concept::concept_match;
use crate::convert::{convert_coded_description, epoch_seconds, parse_exact_date_time};
use crate::dates::resolve_date;
use crate::error::ImportError;

/// Term sets every importer needs. Construction fails when any is absent
/// from the supplied vocabulary.
pub const REQUIRED_TERM_SETS: [&str; 8] = [
    "onset",
    "occurred",
    "resolved",
    "ended",
    "collected",
    "ordered",
    "gender_male",
    "gender_female",
];

/// Extracts normalized clinical records from CCR documents.
///
/// Holds only the read-only vocabulary; every extraction takes the document
/// as a parameter, so one importer can serve any number of concurrent
/// [`create_record`](Importer::create_record) calls.
#[derive(Debug)]
pub struct Importer {
    vocabulary: Vocabulary,
}

impl Importer {
    /// Build an importer over the given vocabulary.
    ///
    /// Refuses with [`ImportError::IncompleteVocabulary`] when any of
    /// [`REQUIRED_TERM_SETS`] is missing.
    pub fn new(vocabulary: Vocabulary) -> Result<Self, ImportError> {
        let missing: Vec<String> = REQUIRED_TERM_SETS
            .iter()
            .filter(|id| !vocabulary.contains(id))
            .map(|id| (*id).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::IncompleteVocabulary { missing });
        }
        Ok(Self { vocabulary })
    }

    /// Extract the full clinical record from one document.
    ///
    /// Never fails: absent sections contribute nothing, unresolved dates
    /// leave their fields unset, and dangling actor references degrade to
    /// absent values.
    pub fn create_record(&self, ccr: &ContinuityOfCareRecord) -> Record {
        Record {
            patient: self.build_patient(ccr),
            actors: collect_actors(ccr),
            conditions: self.build_conditions(ccr),
            encounters: self.build_encounters(ccr),
            procedures: self.build_procedures(ccr),
            results: self.build_results(ccr),
            medications: self.build_medications(ccr),
            allergies: self.build_allergies(ccr),
            orders: self.build_orders(ccr),
        }
    }

    fn term_set(&self, id: &str) -> &TermSet {
        self.vocabulary
            .get(id)
            .expect("required term set is checked at construction")
    }

    /// Resolve the timestamp playing `role` on `events` and convert it to
    /// epoch seconds. A timestamp that fails to convert counts as
    /// unresolved: the field stays unset rather than carrying a sentinel.
    fn resolve_epoch(&self, role: &str, events: &[DateTimeEntry], element_id: &str) -> Option<i64> {
        let Some(iso) = resolve_date(self.term_set(role), events) else {
            debug!(role, element = element_id, "no timestamp resolved for role");
            return None;
        };
        match parse_exact_date_time(iso) {
            Some(dt) => Some(dt.timestamp()),
            None => {
                debug!(role, element = element_id, value = iso, "unparseable timestamp ignored");
                None
            }
        }
    }

    fn build_patient(&self, ccr: &ContinuityOfCareRecord) -> Patient {
        let mut patient = Patient::default();

        let actor = ccr
            .patient
            .first()
            .and_then(|reference| find_actor(ccr, &reference.actor_id));
        let Some(person) = actor.and_then(|actor| actor.person.as_ref()) else {
            debug!("document identifies no patient person; record keeps defaults");
            return patient;
        };

        if let Some(dob) = person
            .date_of_birth
            .as_ref()
            .and_then(|event| event.exact_date_time.as_deref())
        {
            patient.birthdate = epoch_seconds(dob);
        }

        // Current name preferred, birth name second; only the first
        // given/family entry is used.
        if let Some(name) = person.name.as_ref() {
            if let Some(parts) = name.current_name.as_ref().or(name.birth_name.as_ref()) {
                patient.last = parts.family.first().cloned();
                patient.first = parts.given.first().cloned();
            }
        }

        if let Some(gender) = person.gender.as_ref() {
            if concept_match(self.term_set("gender_male"), gender) {
                patient.gender = Some(Gender::Male);
            } else if concept_match(self.term_set("gender_female"), gender) {
                patient.gender = Some(Gender::Female);
            }
        }

        patient
    }

    /// Conditions come from both the Problems and the SocialHistory
    /// sections, merged into one list in that order.
    fn build_conditions(&self, ccr: &ContinuityOfCareRecord) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(section) = &ccr.body.problems {
            conditions.extend(section.problem.iter().map(|p| self.build_condition(p)));
        }
        if let Some(section) = &ccr.body.social_history {
            conditions.extend(
                section
                    .social_history_element
                    .iter()
                    .map(|p| self.build_condition(p)),
            );
        }
        conditions
    }

    fn build_condition(&self, element: &Problem) -> Condition {
        Condition {
            id: element.ccr_data_object_id.clone(),
            description: convert_coded_description(element.description.as_ref()),
            status: convert_coded_description(element.status.as_ref()),
            onset: self.resolve_epoch("onset", &element.date_time, &element.ccr_data_object_id),
            resolution: self.resolve_epoch(
                "resolved",
                &element.date_time,
                &element.ccr_data_object_id,
            ),
        }
    }

    fn build_encounters(&self, ccr: &ContinuityOfCareRecord) -> Vec<Encounter> {
        match &ccr.body.encounters {
            Some(section) => section
                .encounter
                .iter()
                .map(|e| self.build_encounter(e))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Shared by the Encounters section and the service/encounter items
    /// nested inside order requests.
    fn build_encounter(&self, element: &EncounterElement) -> Encounter {
        Encounter {
            id: element.ccr_data_object_id.clone(),
            description: convert_coded_description(element.description.as_ref()),
            providers: practitioner_ids(element.practitioners.as_ref()),
            occurred: self.resolve_epoch(
                "occurred",
                &element.date_time,
                &element.ccr_data_object_id,
            ),
            ended: self.resolve_epoch("ended", &element.date_time, &element.ccr_data_object_id),
        }
    }

    fn build_procedures(&self, ccr: &ContinuityOfCareRecord) -> Vec<Procedure> {
        match &ccr.body.procedures {
            Some(section) => section
                .procedure
                .iter()
                .map(|p| self.build_procedure(p))
                .collect(),
            None => Vec::new(),
        }
    }

    fn build_procedure(&self, element: &ProcedureElement) -> Procedure {
        Procedure {
            id: element.ccr_data_object_id.clone(),
            description: convert_coded_description(element.description.as_ref()),
            procedure_type: convert_coded_description(element.procedure_type.as_ref()),
            providers: practitioner_ids(element.practitioners.as_ref()),
            occurred: self.resolve_epoch(
                "occurred",
                &element.date_time,
                &element.ccr_data_object_id,
            ),
            ended: self.resolve_epoch("ended", &element.date_time, &element.ccr_data_object_id),
        }
    }

    /// Results come from both the Results and the VitalSigns sections.
    fn build_results(&self, ccr: &ContinuityOfCareRecord) -> Vec<clinical::Result> {
        let mut results = Vec::new();
        if let Some(section) = &ccr.body.results {
            results.extend(section.result.iter().map(|r| self.build_result(r)));
        }
        if let Some(section) = &ccr.body.vital_signs {
            results.extend(section.result.iter().map(|r| self.build_result(r)));
        }
        results
    }

    fn build_result(&self, element: &ResultElement) -> clinical::Result {
        let collection_time = self.resolve_epoch(
            "collected",
            &element.date_time,
            &element.ccr_data_object_id,
        );
        clinical::Result {
            id: element.ccr_data_object_id.clone(),
            description: convert_coded_description(element.description.as_ref()),
            result_type: convert_coded_description(element.result_type.as_ref()),
            collection_time,
            tests: element
                .test
                .iter()
                .map(|t| self.build_test(t, collection_time))
                .collect(),
        }
    }

    /// A test inherits the parent result's collection time when its own
    /// collection event resolves nothing.
    fn build_test(&self, element: &TestElement, parent_collection_time: Option<i64>) -> Test {
        let own_collection_time = self.resolve_epoch(
            "collected",
            &element.date_time,
            &element.ccr_data_object_id,
        );

        let (value, units) = match &element.test_result {
            Some(result) if result.value.is_some() => (
                result.value.clone(),
                result.units.as_ref().and_then(|u| u.unit.clone()),
            ),
            _ => (None, None),
        };

        Test {
            id: element.ccr_data_object_id.clone(),
            description: convert_coded_description(element.description.as_ref()),
            collection_time: own_collection_time.or(parent_collection_time),
            value,
            units,
        }
    }

    /// Medications come from both the Medications and the Immunizations
    /// sections.
    fn build_medications(&self, ccr: &ContinuityOfCareRecord) -> Vec<Medication> {
        let mut medications = Vec::new();
        if let Some(section) = &ccr.body.medications {
            medications.extend(section.medication.iter().map(|m| self.build_medication(m)));
        }
        if let Some(section) = &ccr.body.immunizations {
            medications.extend(
                section
                    .immunization
                    .iter()
                    .map(|m| self.build_medication(m)),
            );
        }
        medications
    }

    /// Shared by the medication/immunization sections and the product-like
    /// items nested inside order requests.
    fn build_medication(&self, product: &StructuredProduct) -> Medication {
        // Description aggregates the product's own description plus every
        // product name and brand name, in document order.
        let mut description = convert_coded_description(product.description.as_ref());
        for item in &product.product {
            description.extend(convert_coded_description(item.product_name.as_ref()));
            description.extend(convert_coded_description(item.brand_name.as_ref()));
        }

        Medication {
            id: product.ccr_data_object_id.clone(),
            description,
            med_type: convert_coded_description(product.product_type.as_ref()),
            status: convert_coded_description(product.status.as_ref()),
            started: self.resolve_epoch("onset", &product.date_time, &product.ccr_data_object_id),
            stopped: self.resolve_epoch("ended", &product.date_time, &product.ccr_data_object_id),
        }
    }

    fn build_allergies(&self, ccr: &ContinuityOfCareRecord) -> Vec<Allergy> {
        match &ccr.body.alerts {
            Some(section) => section.alert.iter().map(|a| self.build_allergy(a)).collect(),
            None => Vec::new(),
        }
    }

    fn build_allergy(&self, alert: &Alert) -> Allergy {
        // The description aggregates everything the alert knows about the
        // offending substance: the alert's own description, each agent
        // product's description and nested product/brand names, and each
        // environmental agent's description.
        let mut description = convert_coded_description(alert.description.as_ref());
        for agent in &alert.agent {
            if let Some(products) = &agent.products {
                for product in &products.product {
                    description.extend(convert_coded_description(product.description.as_ref()));
                    for item in &product.product {
                        description.extend(convert_coded_description(item.product_name.as_ref()));
                        description.extend(convert_coded_description(item.brand_name.as_ref()));
                    }
                }
            }
            if let Some(environmental) = &agent.environmental_agents {
                for element in &environmental.environmental_agent {
                    description.extend(convert_coded_description(element.description.as_ref()));
                }
            }
        }

        Allergy {
            id: alert.ccr_data_object_id.clone(),
            description,
            allergy_type: convert_coded_description(alert.alert_type.as_ref()),
            onset: self.resolve_epoch("onset", &alert.date_time, &alert.ccr_data_object_id),
        }
    }

    /// One order per order request; plan-level date, type, and description
    /// are pushed down into each.
    fn build_orders(&self, ccr: &ContinuityOfCareRecord) -> Vec<Order> {
        let Some(section) = &ccr.body.plan_of_care else {
            return Vec::new();
        };

        let mut orders = Vec::new();
        for plan in &section.plan {
            let plan_order_date =
                self.resolve_epoch("ordered", &plan.date_time, &plan.ccr_data_object_id);
            let plan_description = convert_coded_description(plan.description.as_ref());
            let plan_type = convert_coded_description(plan.plan_type.as_ref());

            for request in &plan.order_request {
                orders.push(self.build_order(
                    plan,
                    request,
                    plan_order_date,
                    &plan_description,
                    &plan_type,
                ));
            }
        }
        orders
    }

    fn build_order(
        &self,
        plan: &Plan,
        request: &OrderRequest,
        plan_order_date: Option<i64>,
        plan_description: &[CodedValue],
        plan_type: &[CodedValue],
    ) -> Order {
        // The plan's ordered date applies only when the request itself
        // resolves none.
        let order_date = self
            .resolve_epoch("ordered", &request.date_time, &request.ccr_data_object_id)
            .or(plan_order_date);

        let mut description = plan_description.to_vec();
        description.extend(convert_coded_description(request.description.as_ref()));

        let mut order_type = plan_type.to_vec();
        order_type.extend(convert_coded_description(request.request_type.as_ref()));

        let mut requests = Vec::new();
        if let Some(products) = &request.products {
            requests.extend(
                products
                    .product
                    .iter()
                    .map(|p| OrderRequestItem::Medication(self.build_medication(p))),
            );
        }
        if let Some(medications) = &request.medications {
            requests.extend(
                medications
                    .medication
                    .iter()
                    .map(|m| OrderRequestItem::Medication(self.build_medication(m))),
            );
        }
        if let Some(immunizations) = &request.immunizations {
            requests.extend(
                immunizations
                    .immunization
                    .iter()
                    .map(|i| OrderRequestItem::Medication(self.build_medication(i))),
            );
        }
        if let Some(services) = &request.services {
            requests.extend(
                services
                    .service
                    .iter()
                    .map(|s| OrderRequestItem::Encounter(self.build_encounter(s))),
            );
        }
        if let Some(encounters) = &request.encounters {
            requests.extend(
                encounters
                    .encounter
                    .iter()
                    .map(|e| OrderRequestItem::Encounter(self.build_encounter(e))),
            );
        }

        let goals = request
            .goals
            .as_ref()
            .map(|section| section.goal.iter().map(|g| self.build_goal(g)).collect())
            .unwrap_or_default();

        Order {
            // Orders carry the parent plan's object id.
            id: plan.ccr_data_object_id.clone(),
            description,
            order_type,
            order_date,
            requests,
            goals,
        }
    }

    fn build_goal(&self, element: &GoalElement) -> Goal {
        Goal {
            id: element.ccr_data_object_id.clone(),
            description: convert_coded_description(element.description.as_ref()),
            goal_type: convert_coded_description(element.goal_type.as_ref()),
            goal_date: self.resolve_epoch(
                "onset",
                &element.date_time,
                &element.ccr_data_object_id,
            ),
        }
    }
}

fn collect_actors(ccr: &ContinuityOfCareRecord) -> Vec<Actor> {
    match &ccr.actors {
        Some(actors) => actors
            .actor
            .iter()
            .map(|actor| Actor {
                id: actor.actor_object_id.clone(),
            })
            .collect(),
        None => Vec::new(),
    }
}

fn find_actor<'a>(ccr: &'a ContinuityOfCareRecord, actor_id: &str) -> Option<&'a source::Actor> {
    ccr.actors
        .as_ref()?
        .actor
        .iter()
        .find(|actor| actor.actor_object_id == actor_id)
}

fn practitioner_ids(practitioners: Option<&Practitioners>) -> Vec<String> {
    match practitioners {
        Some(section) => section
            .practitioner
            .iter()
            .map(|reference| reference.actor_id.clone())
            .collect(),
        None => Vec::new(),
    }
}
