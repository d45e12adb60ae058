//! Session lifecycle: validated start, answer intake, finalize pipeline.
//!
//! A session is an explicit value owning its metadata and ledger; nothing
//! lives in process-wide state. Every failure path out of `finalize` leaves
//! the ledger untouched, so a caller can fix or retry and invoke it again.

use crate::domain::catalog::ZoneCatalog;
use crate::domain::models::{
    AnswerEntry, CompletenessMode, EncodedReport, IsoDate, ResponsePatch, SessionMeta,
    UploadReceipt,
};
use crate::services::encoder::SheetEncoder;
use crate::services::ledger::ResponseLedger;
use crate::services::report::{report_file_name, sheet_rows, COLUMN_WIDTHS};
use crate::services::storage::audit;
use crate::services::upload::{upload_report, UploadError};
use std::sync::mpsc;
use std::time::Duration;

/// How long a successful interactive finalize lingers before returning to
/// the start screen.
pub const RETURN_DELAY: Duration = Duration::from_secs(3);

#[derive(thiserror::Error, Debug)]
pub enum FinalizeError {
    #[error("inspección incompleta: {answered} de {expected} preguntas respondidas")]
    Incomplete { answered: usize, expected: usize },
    #[error("no se pudo generar el reporte: {0}")]
    Encode(String),
    #[error(transparent)]
    Upload(#[from] UploadError),
}

pub struct InspectionSession {
    pub meta: SessionMeta,
    pub ledger: ResponseLedger,
    mode: CompletenessMode,
}

impl InspectionSession {
    /// Validates the start-screen inputs. The zone may be any string: unknown
    /// zones degrade to an empty checklist rather than failing.
    pub fn start(
        inspector: &str,
        date: &str,
        zone: &str,
        mode: CompletenessMode,
    ) -> anyhow::Result<Self> {
        let inspector = inspector.trim();
        if inspector.is_empty() {
            anyhow::bail!("el nombre del inspector no puede estar vacío");
        }
        let zone = zone.trim();
        if zone.is_empty() {
            anyhow::bail!("la zona no puede estar vacía");
        }
        let date = IsoDate::parse(date.trim())?;
        Ok(InspectionSession {
            meta: SessionMeta {
                inspector: inspector.to_string(),
                date,
                zone: zone.to_string(),
            },
            ledger: ResponseLedger::new(),
            mode,
        })
    }

    /// Applies answers-file entries in order; later entries merge into
    /// earlier ones exactly like interactive edits.
    pub fn apply_entries(&mut self, entries: &[AnswerEntry]) {
        for entry in entries {
            self.ledger.update(
                &entry.section,
                &entry.question,
                ResponsePatch {
                    answer: entry.answer.clone(),
                    comment: entry.comment.clone(),
                },
            );
        }
    }

    /// Completeness gate, then serialize and encode. Pure apart from the
    /// encoder call; nothing is sent anywhere.
    pub fn render(
        &self,
        catalog: &ZoneCatalog,
        encoder: &dyn SheetEncoder,
    ) -> Result<EncodedReport, FinalizeError> {
        if !self
            .ledger
            .is_complete(catalog, &self.meta.zone, self.mode)
        {
            return Err(FinalizeError::Incomplete {
                answered: self.ledger.answered_count(),
                expected: catalog.total_questions(&self.meta.zone),
            });
        }
        let rows = sheet_rows(catalog, &self.meta, &self.ledger);
        let bytes = encoder
            .encode(&rows, &COLUMN_WIDTHS)
            .map_err(|e| FinalizeError::Encode(e.to_string()))?;
        Ok(EncodedReport {
            file_name: report_file_name(&self.meta.date),
            bytes,
        })
    }

    /// Full pipeline: gate, serialize, encode, upload. The ledger stays
    /// mutable and intact across failures so finalize can be re-invoked.
    pub fn finalize(
        &self,
        catalog: &ZoneCatalog,
        encoder: &dyn SheetEncoder,
        endpoint: &str,
    ) -> Result<UploadReceipt, FinalizeError> {
        let report = self.render(catalog, encoder)?;
        match upload_report(endpoint, &report) {
            Ok(receipt) => {
                audit(
                    "finalize",
                    serde_json::json!({
                        "zone": &self.meta.zone,
                        "file": &receipt.file_name,
                        "outcome": "success",
                    }),
                );
                Ok(receipt)
            }
            Err(e) => {
                audit(
                    "finalize",
                    serde_json::json!({
                        "zone": &self.meta.zone,
                        "outcome": "upload_failed",
                        "error": e.to_string(),
                    }),
                );
                Err(e.into())
            }
        }
    }
}

/// Cancelable post-success delay. Returns true when the delay ran out (the
/// caller should go back to the start screen) and false when `cancel` fired
/// or was dropped first — a torn-down session must not act on the timer.
pub fn wait_before_return(delay: Duration, cancel: &mpsc::Receiver<()>) -> bool {
    matches!(cancel.recv_timeout(delay), Err(mpsc::RecvTimeoutError::Timeout))
}
