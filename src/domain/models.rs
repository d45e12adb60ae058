use serde::{Deserialize, Serialize};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

#[derive(thiserror::Error, Debug)]
#[error("fecha inválida: {0} (se espera AAAA-MM-DD)")]
pub struct DateError(pub String);

/// Calendar date in `YYYY-MM-DD` form, range-checked at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IsoDate {
    raw: String,
}

impl IsoDate {
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let err = || DateError(s.to_string());
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 3 || parts[0].len() != 4 || parts[1].len() != 2 || parts[2].len() != 2 {
            return Err(err());
        }
        let year: i32 = parts[0].parse().map_err(|_| err())?;
        let month: u32 = parts[1].parse().map_err(|_| err())?;
        let day: u32 = parts[2].parse().map_err(|_| err())?;
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return Err(err());
        }
        Ok(IsoDate { raw: s.to_string() })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Spanish long form, e.g. "6 de agosto de 2026".
    pub fn spanish_long(&self) -> String {
        // raw is validated at construction, the slices cannot fail
        let day: u32 = self.raw[8..10].parse().unwrap_or(1);
        let month: usize = self.raw[5..7].parse().unwrap_or(1);
        let year = &self.raw[0..4];
        format!("{} de {} de {}", day, MONTHS_ES[month - 1], year)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        _ => 28,
    }
}

/// Who inspected what, when. Immutable for the duration of one session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionMeta {
    pub inspector: String,
    pub date: IsoDate,
    pub zone: String,
}

/// Composite identity of one checklist question within one section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResponseKey {
    pub section: String,
    pub question: String,
}

impl ResponseKey {
    pub fn new(section: &str, question: &str) -> Self {
        ResponseKey {
            section: section.to_string(),
            question: question.to_string(),
        }
    }
}

/// One recorded answer. The ledger default is both fields empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Response {
    pub answer: String,
    pub comment: String,
}

/// Partial edit to a Response; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePatch {
    pub answer: Option<String>,
    pub comment: Option<String>,
}

/// One line of an answers file: a patch addressed to a (section, question).
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerEntry {
    pub section: String,
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Derived report line; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub section: String,
    pub question: String,
    pub answer: String,
    pub comment: String,
}

/// How completeness is decided before a report may be finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletenessMode {
    /// Every expected (section, question) pair must carry a non-blank answer.
    PerKey,
    /// Compatibility mode: only the answered-key count is compared against
    /// the expected total. A stray key from a foreign section can mask a
    /// missing real answer.
    CountBased,
}

#[derive(Debug, Serialize)]
pub struct CompletenessReport {
    pub zone: String,
    pub mode: CompletenessMode,
    pub expected: usize,
    pub answered: usize,
    pub complete: bool,
    pub missing: Vec<ResponseKey>,
}

/// Request body for the collection endpoint. Field names are part of the
/// wire contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPayload {
    pub file: String,
    pub file_name: String,
    pub mime_type: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// What a successful finalize hands back to the caller.
#[derive(Debug, Serialize)]
pub struct UploadReceipt {
    pub file_name: String,
    pub message: String,
}

/// Encoded workbook ready for upload or local export.
pub struct EncodedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Optional `~/.config/botiquin/config.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub count_based_completeness: bool,
}

/// Catalog listing entry for the `zones` command.
#[derive(Debug, Serialize)]
pub struct ZoneInfo {
    pub name: String,
    pub title: String,
    pub sections: Vec<String>,
}

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}
