//! Path → language resolution over a built [`LanguageIndex`].

use std::sync::Arc;

use tracing::debug;

use crate::index::LanguageIndex;
use crate::model::{LanguageDefinition, LanguageTable};

/// Answers language-identity questions about file paths.
///
/// The index is built eagerly in [`Resolver::new`]; afterwards the resolver is
/// read-only and can be shared freely across threads.
#[derive(Debug)]
pub struct Resolver {
    table: LanguageTable,
    index: LanguageIndex,
}

impl Resolver {
    /// Takes ownership of `table` and builds its index.
    pub fn new(table: LanguageTable) -> Self {
        let index = LanguageIndex::build(&table);
        Self { table, index }
    }

    /// Candidate languages for `path`.
    ///
    /// The extension (from the last `.` of the file name, dot included) is
    /// tried first; only when it matches nothing is the exact file name looked
    /// up. No match at all yields an empty list.
    pub fn languages_for(&self, path: &str) -> Vec<Arc<LanguageDefinition>> {
        let filename = file_name(path);
        let extension = extension(filename);

        let by_ext = self.index.by_extension(extension);
        let found = if by_ext.is_empty() {
            self.index.by_filename(filename)
        } else {
            by_ext
        };

        debug!(path, filename, extension, candidates = found.len(), "resolved path");
        found.to_vec()
    }

    /// Whether `path` resolves to a language known under any of `names`.
    ///
    /// A language is known under its aliases, its canonical name and its
    /// group. Comparison ignores case. An empty `names` never matches.
    pub fn matches<S: AsRef<str>>(&self, path: &str, names: &[S]) -> bool {
        if names.is_empty() {
            return false;
        }

        let wanted: Vec<String> = names.iter().map(|n| n.as_ref().to_lowercase()).collect();
        self.languages_for(path).iter().any(|lang| {
            lang.identity_names()
                .any(|name| wanted.contains(&name.to_lowercase()))
        })
    }

    /// Case-insensitive check against every canonical name and alias.
    pub fn is_registered(&self, name: &str) -> bool {
        self.index.is_registered(name)
    }

    /// The full table this resolver was built from.
    pub fn all_languages(&self) -> &LanguageTable {
        &self.table
    }

    pub fn index(&self) -> &LanguageIndex {
        &self.index
    }
}

/// Last path component; both `/` and `\` separate, trailing separators are ignored.
fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed)
}

/// `.ext` from the last dot, or `""` when the name has no dot.
fn extension(filename: &str) -> &str {
    filename.rfind('.').map_or("", |i| &filename[i..])
}
