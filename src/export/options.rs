#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    pub delimiter: u8,
    /// Quote every field, matching the historical export format.
    pub quote_all: bool,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self { delimiter: b',', quote_all: true }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Fields left out of the column set.
    pub exclude_fields: Vec<String>,
    /// Filename stem for dated exports; the collection name when `None`.
    pub filename: Option<String>,
    pub csv: CsvWriteOptions,
}

#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: u64,
}
