//! Export assembler: spreadsheet plus images bundled into a zip archive.
//!
//! The whole archive is assembled in memory and written to disk only once
//! complete, so a failed export never leaves a partial file behind. The
//! exporter tracks an idle/exporting state so the trigger can be disabled
//! while a run is in flight; there is no retry and no cancellation.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rust_xlsxwriter::Workbook;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::{
    error::{AppError, AppResult},
    models::InventoryRecord,
};

/// Spreadsheet file name inside the archive
const SPREADSHEET_NAME: &str = "inventory.xlsx";
/// Sheet holding the record rows
const SHEET_NAME: &str = "Inventory";
/// Archive folder holding the decoded images
const IMAGES_FOLDER: &str = "images";

const HEADER_ROW: [&str; 8] = [
    "ID",
    "Name",
    "Quantity",
    "Description",
    "Location",
    "User",
    "Date/Time",
    "Images",
];

/// Assembles export archives; at most one export runs at a time.
#[derive(Debug, Default)]
pub struct Exporter {
    exporting: AtomicBool,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an export is currently in flight
    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::Acquire)
    }

    /// Build the archive for the full collection and save it at `output`.
    ///
    /// Returns [`AppError::ExportInProgress`] when triggered while a run is
    /// already in flight. The busy state clears on completion and on
    /// failure alike.
    pub async fn export(&self, records: &[InventoryRecord], output: &Path) -> AppResult<PathBuf> {
        if self
            .exporting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AppError::ExportInProgress);
        }
        let _busy = BusyGuard(&self.exporting);

        tracing::info!("Exporting {} records to {}", records.len(), output.display());

        let records = records.to_vec();
        let archive = tokio::task::spawn_blocking(move || build_archive(&records))
            .await
            .map_err(|e| AppError::Export(format!("export task failed: {}", e)))??;

        tokio::fs::write(output, archive).await?;

        tracing::info!("Export complete: {}", output.display());
        Ok(output.to_path_buf())
    }
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One spreadsheet row, fully rendered
struct ExportRow {
    id: String,
    name: String,
    quantity: u32,
    description: String,
    location: String,
    responsible: String,
    date: String,
    images_cell: String,
}

/// An image file destined for the archive: relative path plus decoded bytes
type ImageFile = (String, Vec<u8>);

/// Render the rows and decode every exportable image.
///
/// Images are named from the owning record's identifier and their position
/// within that record, so the paths listed in each row resolve inside the
/// archive. Payloads that are not recognized embedded images are skipped
/// entirely: neither written nor listed.
fn collect_rows(records: &[InventoryRecord]) -> (Vec<ExportRow>, Vec<ImageFile>) {
    let mut rows = Vec::with_capacity(records.len());
    let mut files = Vec::new();

    for record in records {
        let mut links = Vec::new();
        for (index, payload) in record.images.iter().enumerate() {
            match decode_image_payload(payload) {
                Some(bytes) => {
                    let path = format!("{}/item_{}_image_{}.jpg", IMAGES_FOLDER, record.id, index);
                    links.push(path.clone());
                    files.push((path, bytes));
                }
                None => {
                    tracing::debug!(
                        "Skipping unexportable image {} of record {}",
                        index,
                        record.id
                    );
                }
            }
        }

        rows.push(ExportRow {
            id: record.id.clone(),
            name: record.name.clone(),
            quantity: record.quantity,
            description: record.description.clone(),
            location: record.location.clone(),
            responsible: record.responsible.clone(),
            date: record.formatted_date(),
            images_cell: links.join(", "),
        });
    }

    (rows, files)
}

/// Decode a `data:image/...;base64,` payload; anything else is unexportable
fn decode_image_payload(payload: &str) -> Option<Vec<u8>> {
    if !payload.starts_with("data:image") {
        return None;
    }
    let (_, data) = payload.split_once(";base64,")?;
    BASE64.decode(data).ok()
}

fn build_archive(records: &[InventoryRecord]) -> AppResult<Vec<u8>> {
    let (rows, image_files) = collect_rows(records);
    let spreadsheet = build_spreadsheet(&rows)?;

    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    archive.start_file(SPREADSHEET_NAME, options)?;
    archive.write_all(&spreadsheet)?;

    for (path, bytes) in &image_files {
        archive.start_file(path.as_str(), options)?;
        archive.write_all(bytes)?;
    }

    Ok(archive.finish()?.into_inner())
}

fn build_spreadsheet(rows: &[ExportRow]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADER_ROW.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string(r, 0, &row.id)?;
        worksheet.write_string(r, 1, &row.name)?;
        worksheet.write_number(r, 2, row.quantity)?;
        worksheet.write_string(r, 3, &row.description)?;
        worksheet.write_string(r, 4, &row.location)?;
        worksheet.write_string(r, 5, &row.responsible)?;
        worksheet.write_string(r, 6, &row.date)?;
        worksheet.write_string(r, 7, &row.images_cell)?;
    }

    Ok(workbook.save_to_buffer()?)
}
