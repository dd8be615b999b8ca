//! Wire payloads and A1-notation helpers for the sheets values API.

use serde::Deserialize;

use crate::dao::storage::RowIndex;

/// Acknowledgement returned by an append call.
#[derive(Debug, Deserialize)]
pub struct AppendResponse {
    /// Summary of the cells the append touched.
    pub updates: Option<AppendUpdates>,
}

/// The `updates` object of an append acknowledgement.
#[derive(Debug, Deserialize)]
pub struct AppendUpdates {
    /// A1 range of the written cells, e.g. `games!A7:AL7`.
    #[serde(rename = "updatedRange")]
    pub updated_range: Option<String>,
}

/// Payload returned when reading a values range.
#[derive(Debug, Deserialize)]
pub struct ValuesResponse {
    /// Row-major cell values; absent for an empty range.
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

/// Sheet name of an A1 range (`games!A:Z` → `games`), if it carries one.
pub fn extract_sheet_name(range: &str) -> Option<&str> {
    range.split_once('!').map(|(sheet, _)| sheet)
}

/// 1-based column count rendered as a column letter (1 → A, 27 → AA).
pub fn column_letter(mut index: usize) -> String {
    if index == 0 {
        return "A".to_string();
    }
    let mut letters = Vec::new();
    while index > 0 {
        let remainder = (index - 1) % 26;
        letters.push((b'A' + remainder as u8) as char);
        index = (index - 1) / 26;
    }
    letters.into_iter().rev().collect()
}

/// Row index of the first cell reference in an updated range.
///
/// `games!A7:AL7` → 7. Returns `None` when the range carries no sheet
/// qualifier or no digits.
pub fn extract_row_index(updated_range: &str) -> Option<RowIndex> {
    let (_, cells) = updated_range.split_once('!')?;
    let digits: String = cells
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
