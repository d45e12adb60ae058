//! Deterministic serialization of a ledger snapshot into the report sheet.
//!
//! Row order never depends on the order the ledger was filled in: the outer
//! loop walks the zone's sections and the inner loop the fixed questions,
//! both in catalog order. Pairs absent from the ledger serialize as
//! `{answer: "N/A", comment: ""}` — a serialization-time default that is
//! intentionally different from the ledger's empty-string default.

use crate::domain::catalog::ZoneCatalog;
use crate::domain::models::{IsoDate, ReportRow, SessionMeta};
use crate::services::ledger::ResponseLedger;

pub const COLUMN_WIDTHS: [f64; 4] = [30.0, 40.0, 15.0, 50.0];

pub fn report_file_name(date: &IsoDate) -> String {
    format!("Reporte Botiquines {}.xlsx", date.as_str())
}

/// One ReportRow per (section, question) pair, in catalog order.
pub fn data_rows(catalog: &ZoneCatalog, zone: &str, ledger: &ResponseLedger) -> Vec<ReportRow> {
    let mut rows = Vec::with_capacity(catalog.total_questions(zone));
    for section in catalog.sections(zone) {
        for question in catalog.questions() {
            let (answer, comment) = if ledger.contains(section, question) {
                let r = ledger.get(section, question);
                (r.answer, r.comment)
            } else {
                ("N/A".to_string(), String::new())
            };
            rows.push(ReportRow {
                section: section.to_string(),
                question: question.to_string(),
                answer,
                comment,
            });
        }
    }
    rows
}

/// Full sheet: header block followed by the data rows, as rows of strings
/// ready for the encoder.
pub fn sheet_rows(
    catalog: &ZoneCatalog,
    meta: &SessionMeta,
    ledger: &ResponseLedger,
) -> Vec<Vec<String>> {
    let mut rows = vec![
        vec!["Reporte de Inspección de Botiquines".to_string()],
        Vec::new(),
        vec!["Fecha".to_string(), meta.date.spanish_long()],
        vec!["Inspector".to_string(), meta.inspector.clone()],
        vec!["Zona Inspeccionada".to_string(), meta.zone.clone()],
        Vec::new(),
        vec![
            "Sección".to_string(),
            "Pregunta".to_string(),
            "Respuesta".to_string(),
            "Comentario".to_string(),
        ],
    ];
    for row in data_rows(catalog, &meta.zone, ledger) {
        rows.push(vec![row.section, row.question, row.answer, row.comment]);
    }
    rows
}
