//! Language definitions and the table they live in.

use std::sync::Arc;

use indexmap::IndexMap;

/// Insertion-ordered table of languages keyed by canonical name.
///
/// Iteration order is the order of the registry file and decides the order of
/// candidates when several languages share an extension or filename.
pub type LanguageTable = IndexMap<String, Arc<LanguageDefinition>>;

/// One registered language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDefinition {
    /// Canonical, case-preserving name (the table key).
    pub name: String,
    /// Classification tag such as `programming`, `markup`, `data` or `prose`.
    pub kind: String,
    /// Parent family label. Not required to name an entry of the table.
    pub group: Option<String>,
    /// Extensions including the leading dot, e.g. `.rs`.
    pub extensions: Vec<String>,
    /// Exact filenames, e.g. `Makefile`.
    pub filenames: Vec<String>,
    /// Alternate names, e.g. `golang` for `Go`.
    pub aliases: Vec<String>,
}

impl LanguageDefinition {
    /// Creates a definition with empty extension/filename/alias lists.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            group: None,
            extensions: Vec::new(),
            filenames: Vec::new(),
            aliases: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_filenames<I, S>(mut self, filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filenames = filenames.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Names this language answers to in identity checks: every alias, the
    /// canonical name and the group when present.
    pub fn identity_names(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
            .chain(self.group.as_deref())
    }
}

/// Builds a table from definitions, keyed by their names.
///
/// A later definition with the same name replaces the earlier one but keeps
/// its position.
pub fn table_from<I>(definitions: I) -> LanguageTable
where
    I: IntoIterator<Item = LanguageDefinition>,
{
    definitions
        .into_iter()
        .map(|def| (def.name.clone(), Arc::new(def)))
        .collect()
}
