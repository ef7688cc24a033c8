//! Lookup structures derived from a [`LanguageTable`].
//!
//! The index is built in one pass and never changes afterwards. A new table
//! means a new index.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::model::{LanguageDefinition, LanguageTable};

/// Candidates for a single key, in table order.
pub type Candidates = Vec<Arc<LanguageDefinition>>;

/// Immutable extension/filename/name indices over one table.
#[derive(Debug, Default)]
pub struct LanguageIndex {
    by_extension: HashMap<String, Candidates>,
    by_filename: HashMap<String, Candidates>,
    /// Lowercased canonical names and aliases.
    registered: HashSet<String>,
}

impl LanguageIndex {
    /// Builds all indices from `table`.
    ///
    /// Candidate lists keep the table's iteration order across definitions:
    /// when `A` precedes `B` in the table and both claim `.h`, `A` comes first.
    /// A definition that lists the same extension or filename more than once
    /// is appended to that key's list only once.
    pub fn build(table: &LanguageTable) -> Self {
        let mut index = Self::default();

        for (name, def) in table {
            for ext in &def.extensions {
                push_unique(index.by_extension.entry(ext.clone()).or_default(), def);
            }
            for filename in &def.filenames {
                push_unique(index.by_filename.entry(filename.clone()).or_default(), def);
            }
            index.registered.insert(name.to_lowercase());
            index
                .registered
                .extend(def.aliases.iter().map(|alias| alias.to_lowercase()));
        }

        debug!(
            languages = table.len(),
            extensions = index.by_extension.len(),
            filenames = index.by_filename.len(),
            "language index built"
        );
        index
    }

    /// Languages claiming `extension` (dot included), or an empty slice.
    pub fn by_extension(&self, extension: &str) -> &[Arc<LanguageDefinition>] {
        self.by_extension
            .get(extension)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Languages claiming the exact `filename`, or an empty slice.
    pub fn by_filename(&self, filename: &str) -> &[Arc<LanguageDefinition>] {
        self.by_filename
            .get(filename)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Case-insensitive membership over canonical names and aliases.
    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.contains(&name.to_lowercase())
    }

    pub fn extension_count(&self) -> usize {
        self.by_extension.len()
    }

    pub fn filename_count(&self) -> usize {
        self.by_filename.len()
    }
}

// A definition listing the same extension twice is still one candidate.
fn push_unique(list: &mut Candidates, def: &Arc<LanguageDefinition>) {
    if !list.iter().any(|existing| Arc::ptr_eq(existing, def)) {
        list.push(Arc::clone(def));
    }
}
