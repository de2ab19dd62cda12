use crate::domain::errors::EnrichError;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Column holding the hash; column 0 is the sample file name.
const HASH_COLUMN: u32 = 1;

/// Reads column 2 of the first worksheet, from row 1 to the last populated row.
///
/// Blank cells come back as empty strings so the returned sequence always has
/// one entry per row.
pub fn extract_hashes(path: &Path) -> Result<Vec<String>, EnrichError> {
    let storage_err = |reason: String| EnrichError::StorageFormat {
        path: path.display().to_string(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| storage_err(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| storage_err("workbook has no worksheet".to_string()))?
        .map_err(|e| storage_err(e.to_string()))?;

    let Some((last_row, _)) = range.end() else {
        return Ok(vec![]);
    };

    Ok((0..=last_row)
        .map(|row| cell_text(range.get_value((row, HASH_COLUMN))))
        .collect())
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
