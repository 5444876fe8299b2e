//! Schedule output: the dated traffic sheet and a JSON dump.
//!
//! The sheet keeps the fixed cell layout ground staff print from: a date and
//! confirmation-time block on row 1, the header on row 2, one row per
//! schedule entry from row 3, and a "Confirmed by:" line on row 40 (or just
//! below the data when the data runs past it).

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Color, ConditionalFormatBlank, Format, FormatBorder, Workbook, XlsxError};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::records::{Column, MergedRecord};

const SHEET_NAME: &str = "Traffic";

// Zero-based rows and columns; row 0 is sheet row 1.
const INFO_ROW: u32 = 0;
const HEADER_ROW: u32 = 1;
const FIRST_DATA_ROW: u32 = 2;
const SIGNATURE_ROW: u32 = 39;
const DATE_COLUMN: u16 = 3;
const CONFIRMED_COLUMN: u16 = 14;
/// Column R; the frame is one column wider than the header.
const LAST_FRAME_COLUMN: u16 = 17;
/// Priority, A/C, Gate, Pax on and Booked Cargo/Mail get shaded once filled in.
const SHADED_COLUMNS: [u16; 5] = [0, 2, 7, 11, 12];
const MIN_COLUMN_WIDTH: usize = 10;

/// Sheet file name for the given local date, e.g. `traffic 01.01.24.xlsx`.
pub fn schedule_file_name(now: &NaiveDateTime) -> String {
    format!("traffic {}.xlsx", now.format("%d.%m.%y"))
}

/// Writes the traffic sheet for `records` into `dir` and returns its path.
///
/// `now` is the local wall-clock time printed in the info block.
#[tracing::instrument(skip(records), fields(rows = records.len()))]
pub fn export_schedule(
    dir: &Path,
    records: &[MergedRecord],
    now: NaiveDateTime,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(schedule_file_name(&now));
    debug!(path = %path.display(), "Writing traffic sheet");

    let mut workbook = build_sheet(records, &now)?;
    workbook.save(&path)?;

    info!(path = %path.display(), "Traffic sheet written");
    Ok(path)
}

/// Lays out the traffic sheet in a new workbook.
///
/// The signature row stays on row 40 unless the data reaches it, in which
/// case it goes right below the last data row. Shading and the frame cover
/// everything down to the signature row.
pub fn build_sheet(
    records: &[MergedRecord],
    now: &NaiveDateTime,
) -> Result<Workbook, XlsxError> {
    let header_format = Format::new().set_background_color(Color::RGB(0xD3D3D3));
    let filled_format = Format::new().set_background_color(Color::RGB(0x808080));
    let border_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::Black);
    let plain = Format::new();

    let data_rows = u32::try_from(records.len()).unwrap_or(u32::MAX);
    let signature_row = SIGNATURE_ROW.max(FIRST_DATA_ROW.saturating_add(data_rows));

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, column) in (0u16..).zip(Column::ALL.iter()) {
        let header = column.header();
        sheet.write_string(HEADER_ROW, col, header)?;
        let width = header.chars().count().max(MIN_COLUMN_WIDTH);
        sheet.set_column_width(col, width as f64)?;
    }

    for (row, record) in (FIRST_DATA_ROW..).zip(records) {
        for (col, column) in (0u16..).zip(Column::ALL.iter()) {
            match record.cell(*column) {
                Some(value) if !value.is_empty() => {
                    sheet.write_string(row, col, &value)?;
                }
                _ => {}
            }
        }
    }

    let filled = ConditionalFormatBlank::new()
        .invert()
        .set_format(&filled_format);
    for col in SHADED_COLUMNS {
        sheet.add_conditional_format(FIRST_DATA_ROW, col, signature_row - 1, col, &filled)?;
    }
    let framed = ConditionalFormatBlank::new()
        .invert()
        .set_format(&border_format);
    sheet.add_conditional_format(INFO_ROW, 0, signature_row, LAST_FRAME_COLUMN, &framed)?;

    sheet.merge_range(INFO_ROW, 0, INFO_ROW, 2, "Date:", &header_format)?;
    sheet.merge_range(
        INFO_ROW,
        DATE_COLUMN,
        INFO_ROW,
        6,
        &now.format("%d.%m.%y").to_string(),
        &plain,
    )?;
    sheet.merge_range(
        INFO_ROW,
        CONFIRMED_COLUMN,
        INFO_ROW,
        LAST_FRAME_COLUMN,
        &format!("Gate Confirmed: {}", now.format("%H:%M")),
        &plain,
    )?;
    sheet.merge_range(signature_row, 0, signature_row, 1, "Confirmed by:", &plain)?;
    sheet.merge_range(signature_row, 2, signature_row, 6, " ", &plain)?;

    Ok(workbook)
}

/// Logs the schedule as pretty-printed JSON, one object per row keyed by
/// column header. Blank cells are left out.
pub fn print_json(records: &[MergedRecord]) -> Result<()> {
    let rows: Vec<Map<String, Value>> = records
        .iter()
        .map(|record| {
            Column::ALL
                .iter()
                .filter_map(|c| {
                    record
                        .cell(*c)
                        .map(|v| (c.header().to_string(), Value::String(v)))
                })
                .collect()
        })
        .collect();

    info!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
