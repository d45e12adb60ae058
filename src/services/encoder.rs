//! Workbook encoding boundary.
//!
//! The serializer hands rows of strings plus column-width hints to a
//! `SheetEncoder` and gets back an opaque byte buffer.

use rust_xlsxwriter::Workbook;

pub const SHEET_NAME: &str = "Inspección";

pub trait SheetEncoder {
    fn encode(&self, rows: &[Vec<String>], widths: &[f64]) -> anyhow::Result<Vec<u8>>;
}

/// Single-sheet xlsx workbook encoder.
pub struct XlsxEncoder;

impl SheetEncoder for XlsxEncoder {
    fn encode(&self, rows: &[Vec<String>], widths: &[f64]) -> anyhow::Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        for (col, width) in widths.iter().enumerate() {
            sheet.set_column_width(col as u16, *width)?;
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                sheet.write_string(r as u32, c as u16, cell)?;
            }
        }
        Ok(workbook.save_to_buffer()?)
    }
}
