mod contacts;
mod documents;
mod events;

pub use contacts::ContactProfile;
pub use documents::DocumentProfile;
pub use events::EventProfile;

use crate::export::ExportOptions;
use crate::hooks::RowHooks;
use crate::import::ImportOptions;

/// An entity profile bundles the canned import/export configuration for one
/// record kind with its row hooks, so every call site shares the same
/// pipeline instead of re-implementing it.
pub trait Profile: RowHooks {
    fn import_options(&self) -> ImportOptions;
    fn export_options(&self) -> ExportOptions;
}

/// Resolve a profile by its user-facing name.
#[must_use]
pub fn by_name(name: &str) -> Option<Box<dyn Profile>> {
    match name.to_lowercase().as_str() {
        "contact" | "contacts" => Some(Box::new(ContactProfile)),
        "event" | "events" => Some(Box::new(EventProfile)),
        "document" | "documents" => Some(Box::new(DocumentProfile)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_resolve_by_name() {
        assert!(by_name("contacts").is_some());
        assert!(by_name("Event").is_some());
        assert!(by_name("documents").is_some());
        assert!(by_name("invoices").is_none());
    }

    #[test]
    fn profile_collections() {
        let p = by_name("contacts").unwrap();
        assert_eq!(p.import_options().collection, "contacts");
        let p = by_name("events").unwrap();
        assert_eq!(p.import_options().collection, "events");
    }
}
