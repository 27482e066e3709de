//! Concept matching between source coded descriptions and term sets.

use carta_models::source::{Code, CodedDescription};
use carta_vocabulary::{CodedTerm, TermSet};

/// Decide whether `candidate` matches the concept named by `term_set`.
///
/// Codes are checked first: any literal code-value match within a comparable
/// coding system decides. Free text is the fallback, compared
/// case-insensitively against each recognized term — type and status fields
/// in source documents rarely carry controlled vocabularies, so text
/// matching carries real weight here.
pub fn concept_match(term_set: &TermSet, candidate: &CodedDescription) -> bool {
    for term_code in &term_set.codes {
        if candidate.code.iter().any(|code| codes_equal(term_code, code)) {
            return true;
        }
    }

    if let Some(text) = candidate.text.as_deref() {
        for term in &term_set.terms {
            if terms_equal(term, text) {
                return true;
            }
        }
    }

    false
}

fn codes_equal(term_code: &CodedTerm, code: &Code) -> bool {
    comparable_coding_systems(term_code, code) && term_code.value == code.value
}

/// Whether two coding systems may be compared code-for-code.
///
/// Always true today: the systems seen in practice (ICD, SNOMED, RxNorm) do
/// not collide on code values, and source documents name systems too
/// inconsistently for a strict equality check to be useful. A real
/// system-compatibility table can replace this predicate without touching
/// the matching algorithm.
fn comparable_coding_systems(_term_code: &CodedTerm, _code: &Code) -> bool {
    true
}

fn terms_equal(term: &str, text: &str) -> bool {
    term.to_lowercase() == text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term_set(codes: &[(&str, &str)], terms: &[&str]) -> TermSet {
        TermSet {
            id: "test".into(),
            codes: codes
                .iter()
                .map(|(system, value)| CodedTerm {
                    system: (*system).to_string(),
                    version: None,
                    value: (*value).to_string(),
                })
                .collect(),
            terms: terms.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    fn candidate(text: Option<&str>, codes: &[(&str, &str)]) -> CodedDescription {
        CodedDescription {
            text: text.map(str::to_string),
            code: codes
                .iter()
                .map(|(system, value)| Code {
                    coding_system: (*system).to_string(),
                    version: None,
                    value: (*value).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn matches_by_literal_code_value() {
        let ts = term_set(&[("SNOMED", "248152002")], &[]);
        assert!(concept_match(&ts, &candidate(None, &[("SNOMED", "248152002")])));
    }

    #[test]
    fn code_match_ignores_system_names_for_now() {
        let ts = term_set(&[("SNOMED", "248152002")], &[]);
        assert!(concept_match(&ts, &candidate(None, &[("ICD9", "248152002")])));
    }

    #[test]
    fn falls_back_to_case_insensitive_text() {
        let ts = term_set(&[], &["onset"]);
        assert!(concept_match(&ts, &candidate(Some("Onset"), &[])));
        assert!(concept_match(&ts, &candidate(Some("ONSET"), &[])));
    }

    #[test]
    fn code_wins_even_when_text_differs() {
        let ts = term_set(&[("SNOMED", "248152002")], &["female"]);
        assert!(concept_match(
            &ts,
            &candidate(Some("something else"), &[("SNOMED", "248152002")])
        ));
    }

    #[test]
    fn no_code_and_no_term_match_means_no_match() {
        let ts = term_set(&[("SNOMED", "248152002")], &["female"]);
        assert!(!concept_match(&ts, &candidate(Some("male"), &[("SNOMED", "x")])));
    }

    #[test]
    fn empty_candidate_never_matches() {
        let ts = term_set(&[("SNOMED", "248152002")], &["female"]);
        assert!(!concept_match(&ts, &candidate(None, &[])));
    }
}
