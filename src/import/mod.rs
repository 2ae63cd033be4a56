mod options;
mod parse;
mod pipeline;

pub use options::{CsvOptions, DuplicateRow, ImportOptions, ImportReport, RowError};
pub use pipeline::{import_file, import_from_reader};
