mod options;
mod pipeline;

pub use options::{CsvWriteOptions, ExportOptions, ExportReport};
pub use pipeline::{export_file, export_filename, export_into_writer, export_to_dir};
