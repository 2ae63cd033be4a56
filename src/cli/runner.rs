use std::path::PathBuf;

use super::command::Command;
use super::util::parse_delimiter;
use crate::export::{ExportOptions, export_file, export_to_dir};
use crate::hooks::{NoHooks, RowHooks};
use crate::import::{ImportOptions, import_file};
use crate::profiles;
use crate::store::RecordStore;

/// Execute one programmatic command against `store`, printing results to
/// stdout. Errors bubble up for the binary to report.
///
/// # Errors
/// Unknown profiles, failed imports, and store failures.
pub fn run(store: &dyn RecordStore, cmd: Command) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Command::Import {
            file,
            collection,
            profile,
            required_fields,
            unique_field,
            check_store_duplicates,
            delimiter,
            infer_types,
        } => {
            let (mut opts, hooks): (ImportOptions, Box<dyn RowHooks>) = match profile.as_deref() {
                Some(name) => {
                    let p = profiles::by_name(name)
                        .ok_or_else(|| format!("unknown profile: {name}"))?;
                    let o = p.import_options();
                    let hooks: Box<dyn RowHooks> = p;
                    (o, hooks)
                }
                None => (ImportOptions::default(), Box::new(NoHooks) as Box<dyn RowHooks>),
            };
            if let Some(c) = collection {
                opts.collection = c;
            }
            if let Some(required) = required_fields {
                opts.required_fields = required;
            }
            if let Some(unique) = unique_field {
                opts.unique_field = unique;
            }
            opts.check_store_duplicates = check_store_duplicates;
            if let Some(spec) = delimiter {
                opts.csv.delimiter =
                    parse_delimiter(&spec).ok_or_else(|| format!("invalid delimiter: {spec}"))?;
            }
            opts.csv.type_infer = infer_types;

            let report = import_file(store, &file, &opts, hooks.as_ref());
            println!("{}", report.message);
            if !report.details.is_empty() {
                println!("{}", report.details);
            }
            for e in &report.errors {
                println!("row {}: {}", e.row, e.error);
            }
            for d in &report.duplicates {
                println!("row {}: duplicate of {}", d.row, d.identifier);
            }
            if report.success { Ok(()) } else { Err(report.details.into()) }
        }
        Command::Export { collection, out, profile, exclude_fields, filename } => {
            let (mut opts, default_collection, hooks): (ExportOptions, String, Box<dyn RowHooks>) =
                match profile.as_deref() {
                    Some(name) => {
                        let p = profiles::by_name(name)
                            .ok_or_else(|| format!("unknown profile: {name}"))?;
                        let o = p.export_options();
                        let c = p.import_options().collection;
                        let hooks: Box<dyn RowHooks> = p;
                        (o, c, hooks)
                    }
                    None => (
                        ExportOptions::default(),
                        "default".to_string(),
                        Box::new(NoHooks) as Box<dyn RowHooks>,
                    ),
                };
            if let Some(exclude) = exclude_fields {
                opts.exclude_fields = exclude;
            }
            if let Some(stem) = filename {
                opts.filename = Some(stem);
            }
            let collection = collection.unwrap_or(default_collection);
            finish_export(store, &collection, out, &opts, hooks.as_ref())
        }
        Command::ColList => {
            for name in store.list_collections()? {
                println!("{name}");
            }
            Ok(())
        }
        Command::Count { collection } => {
            println!("{}", store.count(&collection)?);
            Ok(())
        }
    }
}

fn finish_export(
    store: &dyn RecordStore,
    collection: &str,
    out: Option<PathBuf>,
    opts: &ExportOptions,
    hooks: &dyn RowHooks,
) -> Result<(), Box<dyn std::error::Error>> {
    let dest_is_dir = out.as_ref().is_none_or(|p| p.is_dir() || p.extension().is_none());
    let written = if dest_is_dir {
        let dir = out.unwrap_or_else(|| PathBuf::from("."));
        export_to_dir(store, collection, dir, opts, hooks)?
    } else {
        let dest = out.unwrap_or_default();
        export_file(store, collection, &dest, opts, hooks)?.map(|_| dest)
    };
    match written {
        Some(path) => println!("exported {} -> {}", collection, path.display()),
        None => println!("no records to export in {collection}"),
    }
    Ok(())
}
