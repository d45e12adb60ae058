//! In-memory store of per-question answers for the active session.
//!
//! Keys are structured (section, question) pairs. The ledger never validates
//! answer values; the input surfaces constrain choices. A key exists only
//! once the user has set at least one field for it.

use crate::domain::catalog::ZoneCatalog;
use crate::domain::models::{CompletenessMode, CompletenessReport, Response, ResponseKey, ResponsePatch};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ResponseLedger {
    entries: HashMap<ResponseKey, Response>,
}

impl ResponseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `patch` into the Response stored for (section, question),
    /// creating the default first if absent. Fields not present in the patch
    /// are preserved. An empty patch is a no-op so that no key appears before
    /// the user has actually set something.
    pub fn update(&mut self, section: &str, question: &str, patch: ResponsePatch) {
        if patch.answer.is_none() && patch.comment.is_none() {
            return;
        }
        let entry = self
            .entries
            .entry(ResponseKey::new(section, question))
            .or_default();
        if let Some(answer) = patch.answer {
            entry.answer = answer;
        }
        if let Some(comment) = patch.comment {
            entry.comment = comment;
        }
    }

    /// Stored Response, or the default (both fields empty) when absent.
    pub fn get(&self, section: &str, question: &str) -> Response {
        self.entries
            .get(&ResponseKey::new(section, question))
            .cloned()
            .unwrap_or_default()
    }

    pub fn contains(&self, section: &str, question: &str) -> bool {
        self.entries.contains_key(&ResponseKey::new(section, question))
    }

    /// Number of keys carrying a non-blank answer, regardless of whether the
    /// key belongs to the active zone.
    pub fn answered_count(&self) -> usize {
        self.entries
            .values()
            .filter(|r| !r.answer.trim().is_empty())
            .count()
    }

    /// Expected keys for `zone` still lacking a non-blank answer, in catalog
    /// order.
    pub fn missing(&self, catalog: &ZoneCatalog, zone: &str) -> Vec<ResponseKey> {
        let mut out = Vec::new();
        for section in catalog.sections(zone) {
            for question in catalog.questions() {
                if self.get(section, question).answer.trim().is_empty() {
                    out.push(ResponseKey::new(section, question));
                }
            }
        }
        out
    }

    /// A zone with no expected questions is vacuously complete in both modes.
    pub fn is_complete(&self, catalog: &ZoneCatalog, zone: &str, mode: CompletenessMode) -> bool {
        match mode {
            CompletenessMode::PerKey => self.missing(catalog, zone).is_empty(),
            CompletenessMode::CountBased => {
                self.answered_count() == catalog.total_questions(zone)
            }
        }
    }

    pub fn completeness(
        &self,
        catalog: &ZoneCatalog,
        zone: &str,
        mode: CompletenessMode,
    ) -> CompletenessReport {
        CompletenessReport {
            zone: zone.to_string(),
            mode,
            expected: catalog.total_questions(zone),
            answered: self.answered_count(),
            complete: self.is_complete(catalog, zone, mode),
            missing: self.missing(catalog, zone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(value: &str) -> ResponsePatch {
        ResponsePatch {
            answer: Some(value.to_string()),
            comment: None,
        }
    }

    fn comment(value: &str) -> ResponsePatch {
        ResponsePatch {
            answer: None,
            comment: Some(value.to_string()),
        }
    }

    fn fill_zone(ledger: &mut ResponseLedger, catalog: &ZoneCatalog, zone: &str) {
        for section in catalog.sections(zone) {
            for question in catalog.questions() {
                ledger.update(section, question, answer("SI"));
            }
        }
    }

    #[test]
    fn update_is_idempotent() {
        let mut ledger = ResponseLedger::new();
        ledger.update("Botiquín Recibo", "¿Cuenta con checklist?", answer("NO"));
        let once = ledger.get("Botiquín Recibo", "¿Cuenta con checklist?");
        ledger.update("Botiquín Recibo", "¿Cuenta con checklist?", answer("NO"));
        assert_eq!(once, ledger.get("Botiquín Recibo", "¿Cuenta con checklist?"));
        assert_eq!(ledger.answered_count(), 1);
    }

    #[test]
    fn patches_preserve_unrelated_fields() {
        let mut ledger = ResponseLedger::new();
        ledger.update("S", "Q", answer("SI"));
        ledger.update("S", "Q", comment("sin novedades"));
        let r = ledger.get("S", "Q");
        assert_eq!(r.answer, "SI");
        assert_eq!(r.comment, "sin novedades");

        ledger.update("S", "Q", answer("NO"));
        assert_eq!(ledger.get("S", "Q").comment, "sin novedades");
    }

    #[test]
    fn empty_patch_creates_no_key() {
        let mut ledger = ResponseLedger::new();
        ledger.update("S", "Q", ResponsePatch::default());
        assert!(!ledger.contains("S", "Q"));
    }

    #[test]
    fn absent_key_reads_as_default() {
        let ledger = ResponseLedger::new();
        assert_eq!(ledger.get("S", "Q"), Response::default());
    }

    #[test]
    fn unexpected_answer_values_are_kept() {
        let mut ledger = ResponseLedger::new();
        ledger.update("S", "Q", answer("TAL VEZ"));
        assert_eq!(ledger.get("S", "Q").answer, "TAL VEZ");
        assert_eq!(ledger.answered_count(), 1);
    }

    #[test]
    fn completeness_flips_exactly_at_the_expected_count() {
        let catalog = ZoneCatalog::standard();
        let mut ledger = ResponseLedger::new();
        let sections = catalog.sections("Bodega F");
        let mut left = catalog.total_questions("Bodega F");
        for section in sections {
            for question in catalog.questions() {
                assert!(!ledger.is_complete(&catalog, "Bodega F", CompletenessMode::CountBased));
                assert!(!ledger.is_complete(&catalog, "Bodega F", CompletenessMode::PerKey));
                ledger.update(section, question, answer("SI"));
                left -= 1;
            }
        }
        assert_eq!(left, 0);
        assert!(ledger.is_complete(&catalog, "Bodega F", CompletenessMode::CountBased));
        assert!(ledger.is_complete(&catalog, "Bodega F", CompletenessMode::PerKey));
    }

    #[test]
    fn nine_of_ten_answers_is_incomplete() {
        let catalog = ZoneCatalog::standard();
        let mut ledger = ResponseLedger::new();
        fill_zone(&mut ledger, &catalog, "Bodega F");
        // blank out one real answer
        ledger.update(
            "Botiquín Empaque Retail",
            "¿Cuenta con checklist?",
            answer(""),
        );
        assert_eq!(ledger.answered_count(), 9);
        assert!(!ledger.is_complete(&catalog, "Bodega F", CompletenessMode::CountBased));
        assert!(!ledger.is_complete(&catalog, "Bodega F", CompletenessMode::PerKey));
    }

    #[test]
    fn stray_key_masks_a_gap_only_in_count_based_mode() {
        let catalog = ZoneCatalog::standard();
        let mut ledger = ResponseLedger::new();
        fill_zone(&mut ledger, &catalog, "Recibo");
        ledger.update("Botiquín Recibo", "¿Cuenta con checklist?", answer(""));
        // a leftover answer from a section outside the zone
        ledger.update("Botiquín Mensajería", "¿Cuenta con checklist?", answer("SI"));

        assert!(ledger.is_complete(&catalog, "Recibo", CompletenessMode::CountBased));
        assert!(!ledger.is_complete(&catalog, "Recibo", CompletenessMode::PerKey));
        assert_eq!(
            ledger.missing(&catalog, "Recibo"),
            vec![ResponseKey::new("Botiquín Recibo", "¿Cuenta con checklist?")]
        );
    }

    #[test]
    fn unknown_zone_is_vacuously_complete() {
        let catalog = ZoneCatalog::standard();
        let ledger = ResponseLedger::new();
        assert!(ledger.is_complete(&catalog, "Sotano", CompletenessMode::PerKey));
        assert!(ledger.is_complete(&catalog, "Sotano", CompletenessMode::CountBased));
        let report = ledger.completeness(&catalog, "Sotano", CompletenessMode::PerKey);
        assert_eq!(report.expected, 0);
        assert!(report.complete);
    }
}
