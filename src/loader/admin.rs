use crate::loader::manifest::UnitManifest;

/// One row of the administrative listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub unit: String,
    pub manifest: UnitManifest,
}

/// Result of the admin listing hook. When `suppress_default` is set the
/// component owns rendering for this category and `entries` is the full
/// row set; otherwise the host proceeds with its own rendering using the
/// `show` flag it supplied, passed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminListing {
    pub suppress_default: bool,
    pub show: bool,
    pub entries: Vec<DisplayEntry>,
}

impl AdminListing {
    pub fn pass_through(show: bool) -> Self {
        Self {
            suppress_default: false,
            show,
            entries: Vec::new(),
        }
    }

    pub fn rendered(entries: Vec<DisplayEntry>) -> Self {
        Self {
            suppress_default: true,
            show: false,
            entries,
        }
    }
}
