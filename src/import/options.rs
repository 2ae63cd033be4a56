#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub trim: bool,
    pub type_infer: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',', trim: true, type_infer: false }
    }
}

#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Target collection to insert into.
    pub collection: String,
    /// Fields that must appear in the header row and be non-empty in every
    /// accepted record, checked in this order.
    pub required_fields: Vec<String>,
    /// Field used for duplicate detection, within the file and against the
    /// store.
    pub unique_field: String,
    /// Whether surviving records are checked against the store before insert.
    pub check_store_duplicates: bool,
    pub csv: CsvOptions,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            collection: "default".to_string(),
            required_fields: Vec::new(),
            unique_field: "id".to_string(),
            check_store_duplicates: true,
            csv: CsvOptions::default(),
        }
    }
}

/// One row that failed validation. Rows are numbered by physical line, the
/// header being line 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub error: String,
}

/// One row skipped as a duplicate of an earlier row in the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRow {
    pub row: usize,
    /// Lower-cased unique-field value shared with the kept row.
    pub identifier: String,
}

/// Terminal report of one import run.
///
/// On a run without a store failure, `imported + skipped + errors.len()`
/// accounts for every non-empty data row exactly once. When the store phase
/// fails, `success` is false and the row classification gathered up to that
/// point is still carried in `errors`/`duplicates`.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub success: bool,
    pub imported: usize,
    /// Same-file duplicates plus store duplicates.
    pub skipped: usize,
    pub errors: Vec<RowError>,
    pub duplicates: Vec<DuplicateRow>,
    pub message: String,
    pub details: String,
}
