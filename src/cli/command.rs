use std::path::PathBuf;

pub enum Command {
    Import {
        file: PathBuf,
        collection: Option<String>,
        profile: Option<String>,
        required_fields: Option<Vec<String>>,
        unique_field: Option<String>,
        check_store_duplicates: bool,
        delimiter: Option<String>,
        infer_types: bool,
    },
    Export {
        collection: Option<String>,
        /// Output file, or directory for a dated filename; the current
        /// directory when omitted.
        out: Option<PathBuf>,
        profile: Option<String>,
        exclude_fields: Option<Vec<String>>,
        filename: Option<String>,
    },
    ColList,
    Count {
        collection: String,
    },
}
