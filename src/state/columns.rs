//! Fixed column schema for the games sheet.

use indexmap::IndexMap;

/// Ordered column set of a games-sheet row.
///
/// The order is the wire contract with the sheet; rows are always written
/// full-width so an in-place update overwrites every cell.
pub const GAMES_COLUMNS: [&str; 38] = [
    "game_id",
    "date",
    "opposite_team",
    "game_number",
    "patch",
    "tr",
    "side",
    "win",
    "BB1",
    "BB2",
    "BB3",
    "BP1",
    "BP2",
    "BP3",
    "BB4",
    "BB5",
    "BP4",
    "BP5",
    "RB1",
    "RB2",
    "RB3",
    "RP1",
    "RP2",
    "RP3",
    "RB4",
    "RB5",
    "RP4",
    "RP5",
    "BT",
    "BJ",
    "BM",
    "BA",
    "BS",
    "RT",
    "RJ",
    "RM",
    "RA",
    "RS",
];

/// Position columns (blue/red top, jungle, mid, adc, support).
pub const POSITION_COLUMNS: [&str; 10] = ["BT", "BJ", "BM", "BA", "BS", "RT", "RJ", "RM", "RA", "RS"];

/// True when `key` belongs to the games-sheet schema.
pub fn is_game_column(key: &str) -> bool {
    GAMES_COLUMNS.contains(&key)
}

/// True when `key` is one of the ten position columns.
pub fn is_position_column(key: &str) -> bool {
    POSITION_COLUMNS.contains(&key)
}

/// Flatten a field map into a full-width row following [`GAMES_COLUMNS`].
///
/// Columns absent from the map become empty cells.
pub fn build_row(fields: &IndexMap<String, String>) -> Vec<String> {
    GAMES_COLUMNS
        .iter()
        .map(|column| fields.get(*column).cloned().unwrap_or_default())
        .collect()
}

/// Merge `updates` into `fields`, silently dropping keys outside the schema.
pub fn merge_fields(fields: &mut IndexMap<String, String>, updates: &IndexMap<String, String>) {
    for (key, value) in updates {
        if is_game_column(key) {
            fields.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_is_full_width_and_ordered() {
        let mut fields = IndexMap::new();
        fields.insert("date".to_string(), "2026-01-07".to_string());
        fields.insert("game_id".to_string(), "g_1".to_string());

        let row = build_row(&fields);
        assert_eq!(row.len(), GAMES_COLUMNS.len());
        assert_eq!(row[0], "g_1");
        assert_eq!(row[1], "2026-01-07");
        assert!(row[2..].iter().all(String::is_empty));
    }

    #[test]
    fn merge_drops_unknown_keys() {
        let mut fields = IndexMap::new();
        let mut updates = IndexMap::new();
        updates.insert("BP1".to_string(), "Maokai".to_string());
        updates.insert("definitely_not_a_column".to_string(), "x".to_string());

        merge_fields(&mut fields, &updates);
        assert_eq!(fields.get("BP1").map(String::as_str), Some("Maokai"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn merge_overwrites_existing_values() {
        let mut fields = IndexMap::new();
        fields.insert("win".to_string(), String::new());
        let mut updates = IndexMap::new();
        updates.insert("win".to_string(), "W".to_string());

        merge_fields(&mut fields, &updates);
        assert_eq!(fields.get("win").map(String::as_str), Some("W"));
    }

    #[test]
    fn position_columns_are_a_subset_of_the_schema() {
        assert!(POSITION_COLUMNS.iter().all(|column| is_game_column(column)));
        assert!(!is_position_column("BP1"));
    }
}
