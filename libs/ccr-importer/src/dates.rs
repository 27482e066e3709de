//! Role resolution over a source element's dated events.

use carta_models::source::DateTimeEntry;
use carta_vocabulary::TermSet;

use crate::concept::concept_match;

/// Roles for which a single unlabeled timestamp is unambiguous by
/// convention. A lone untyped date on a problem is its onset; on an
/// encounter, when it occurred; on a result, when it was collected. The
/// same shortcut must NOT apply to `resolved`, `ended`, or `ordered`: those
/// are optional refinements, and a lone untyped date far more often
/// describes some other role.
const SINGLE_EVENT_ROLES: [&str; 3] = ["onset", "occurred", "collected"];

/// Pick the timestamp that plays the role named by `term_set` out of
/// `events`, or `None` when no event does.
///
/// A single event resolves directly for the roles in
/// [`SINGLE_EVENT_ROLES`]; otherwise events are scanned in document order
/// and the first whose type matches the term set wins. An event whose type
/// matches but whose exact timestamp is absent is skipped and the scan
/// continues; a missing timestamp is never an error here.
pub fn resolve_date<'a>(term_set: &TermSet, events: &'a [DateTimeEntry]) -> Option<&'a str> {
    if events.is_empty() {
        return None;
    }

    if events.len() == 1 && SINGLE_EVENT_ROLES.contains(&term_set.id.as_str()) {
        return events[0].exact_date_time.as_deref();
    }

    events.iter().find_map(|event| {
        let event_type = event.event_type.as_ref()?;
        if concept_match(term_set, event_type) {
            event.exact_date_time.as_deref()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta_models::source::CodedDescription;

    fn role(id: &str) -> TermSet {
        TermSet {
            id: id.into(),
            codes: Vec::new(),
            terms: vec![id.into()],
        }
    }

    fn untyped(when: &str) -> DateTimeEntry {
        DateTimeEntry {
            event_type: None,
            exact_date_time: Some(when.into()),
        }
    }

    fn typed(event_type: &str, when: Option<&str>) -> DateTimeEntry {
        DateTimeEntry {
            event_type: Some(CodedDescription {
                text: Some(event_type.into()),
                code: Vec::new(),
            }),
            exact_date_time: when.map(str::to_string),
        }
    }

    #[test]
    fn empty_event_list_resolves_nothing() {
        assert_eq!(resolve_date(&role("onset"), &[]), None);
    }

    #[test]
    fn single_untyped_event_resolves_for_unambiguous_roles() {
        let events = [untyped("2020-01-05T00:00:00")];
        for id in ["onset", "occurred", "collected"] {
            assert_eq!(resolve_date(&role(id), &events), Some("2020-01-05T00:00:00"));
        }
    }

    #[test]
    fn single_untyped_event_never_resolves_optional_roles() {
        let events = [untyped("2020-01-05T00:00:00")];
        for id in ["resolved", "ended", "ordered"] {
            assert_eq!(resolve_date(&role(id), &events), None);
        }
    }

    #[test]
    fn single_event_without_timestamp_resolves_nothing() {
        let events = [DateTimeEntry::default()];
        assert_eq!(resolve_date(&role("onset"), &events), None);
    }

    #[test]
    fn typed_event_is_found_regardless_of_position() {
        let events = [
            typed("Ended", Some("2021-06-01")),
            typed("Onset", Some("2020-01-05")),
        ];
        assert_eq!(resolve_date(&role("onset"), &events), Some("2020-01-05"));
        assert_eq!(resolve_date(&role("ended"), &events), Some("2021-06-01"));
    }

    #[test]
    fn first_matching_event_wins() {
        let events = [
            typed("Onset", Some("2019-01-01")),
            typed("Onset", Some("2020-01-01")),
        ];
        assert_eq!(resolve_date(&role("onset"), &events), Some("2019-01-01"));
    }

    #[test]
    fn matching_event_without_timestamp_is_skipped() {
        let events = [
            typed("Onset", None),
            typed("Onset", Some("2020-01-05")),
        ];
        assert_eq!(resolve_date(&role("onset"), &events), Some("2020-01-05"));
    }

    #[test]
    fn untyped_events_are_ignored_during_the_scan() {
        let events = [
            untyped("2019-01-01"),
            typed("Resolved", Some("2021-06-01")),
        ];
        assert_eq!(resolve_date(&role("resolved"), &events), Some("2021-06-01"));
        assert_eq!(resolve_date(&role("onset"), &events), None);
    }

    #[test]
    fn matching_by_code_works_too() {
        let term_set = TermSet {
            id: "collected".into(),
            codes: vec![carta_vocabulary::CodedTerm {
                system: "SNOMED".into(),
                version: None,
                value: "119361006".into(),
            }],
            terms: Vec::new(),
        };
        let events = [
            DateTimeEntry {
                event_type: Some(CodedDescription {
                    text: None,
                    code: vec![carta_models::source::Code {
                        coding_system: "SNOMED".into(),
                        version: None,
                        value: "119361006".into(),
                    }],
                }),
                exact_date_time: Some("2020-03-01T08:30:00".into()),
            },
            untyped("2020-04-01"),
        ];
        assert_eq!(resolve_date(&term_set, &events), Some("2020-03-01T08:30:00"));
    }
}
