use crate::domain::model::{CellValue, ParsedExport, Report, SavedReport};
use crate::utils::error::Result;
use std::path::Path;

/// Read access to the first worksheet of an input document.
///
/// Rows and columns are 1-indexed, matching the layout tables of the export.
/// Cells outside the used area read as [`CellValue::Empty`].
pub trait CellSource {
    fn cell(&self, row: u32, col: u16) -> CellValue;
}

pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    /// Writes the whole buffer or nothing; a failed write leaves no file behind.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
}

pub trait ConfigProvider {
    fn input_path(&self) -> Option<&Path>;
    /// Explicit destination; when absent the file name is derived from the title.
    fn output_path(&self) -> Option<&Path>;
    fn output_dir(&self) -> &Path;
    fn overwrite(&self) -> bool;
}

pub trait Pipeline {
    fn extract(&self) -> Result<ParsedExport>;
    fn transform(&self, export: ParsedExport) -> Result<Report>;
    fn load(&self, report: &Report) -> Result<SavedReport>;
}
