//! On-disk / on-wire schema of the registry (`languages.yml`).
//!
//! Each top-level key is a canonical language name. Only `type` is required;
//! list fields default to empty and unknown upstream keys (`color`,
//! `tm_scope`, `language_id`, ...) are ignored.

use std::sync::Arc;

use indexmap::IndexMap;
use linguist_core::{LanguageDefinition, LanguageTable};
use serde::{Deserialize, Serialize};

use crate::errors::SourceResult;

/// One registry entry as stored in YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filenames: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

/// Records keyed by language name, in file order.
pub type RegistryFile = IndexMap<String, LanguageRecord>;

impl LanguageRecord {
    fn into_definition(self, name: String) -> LanguageDefinition {
        LanguageDefinition {
            name,
            kind: self.kind,
            group: self.group,
            extensions: self.extensions,
            filenames: self.filenames,
            aliases: self.aliases,
        }
    }

    fn from_definition(def: &LanguageDefinition) -> Self {
        Self {
            kind: def.kind.clone(),
            group: def.group.clone(),
            extensions: def.extensions.clone(),
            filenames: def.filenames.clone(),
            aliases: def.aliases.clone(),
        }
    }
}

/// Parses registry YAML into a table, keeping file order.
///
/// # Errors
/// [`crate::SourceError::Yaml`] when the text does not match the schema.
pub fn parse_table(yaml: &str) -> SourceResult<LanguageTable> {
    let file: RegistryFile = serde_yml::from_str(yaml)?;
    Ok(file
        .into_iter()
        .map(|(name, record)| {
            let def = record.into_definition(name.clone());
            (name, Arc::new(def))
        })
        .collect())
}

/// Renders a table back to registry YAML with only the schema fields.
pub fn render_table(table: &LanguageTable) -> SourceResult<String> {
    let file: RegistryFile = table
        .iter()
        .map(|(name, def)| (name.clone(), LanguageRecord::from_definition(def)))
        .collect();
    Ok(serde_yml::to_string(&file)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
# Comment lines are fine.
---
TSX:
  type: programming
  color: "#3178c6"
  group: TypeScript
  extensions:
  - ".tsx"
  tm_scope: source.tsx
  language_id: 94901924
Makefile:
  type: programming
  aliases:
  - make
  filenames:
  - Makefile
  - GNUmakefile
C:
  type: programming
  extensions: [".c", ".h"]
"##;

    #[test]
    fn parses_and_ignores_unknown_keys() {
        let table = parse_table(SAMPLE).unwrap();

        let tsx = &table["TSX"];
        assert_eq!(tsx.name, "TSX");
        assert_eq!(tsx.kind, "programming");
        assert_eq!(tsx.group.as_deref(), Some("TypeScript"));
        assert_eq!(tsx.extensions, vec![".tsx"]);
        assert!(tsx.filenames.is_empty());
        assert!(tsx.aliases.is_empty());

        assert_eq!(table["Makefile"].filenames, vec!["Makefile", "GNUmakefile"]);
        assert!(table["Makefile"].extensions.is_empty());
    }

    #[test]
    fn keeps_file_order() {
        let table = parse_table(SAMPLE).unwrap();
        let names: Vec<&str> = table.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["TSX", "Makefile", "C"]);
    }

    #[test]
    fn missing_type_is_an_error() {
        let err = parse_table("Java:\n  extensions: [\".java\"]\n").unwrap_err();
        assert!(matches!(err, crate::SourceError::Yaml(_)));
    }

    #[test]
    fn non_mapping_is_an_error() {
        assert!(parse_table("- just\n- a list\n").is_err());
        assert!(parse_table("<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn rendered_table_omits_absent_fields() {
        let table = parse_table(SAMPLE).unwrap();
        let yaml = render_table(&table).unwrap();

        assert!(!yaml.contains("color"));
        assert!(!yaml.contains("tm_scope"));
        assert!(!yaml.contains("group: null"));
        assert_eq!(parse_table(&yaml).unwrap(), table);
    }
}
