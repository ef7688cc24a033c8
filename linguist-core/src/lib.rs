//! Language identification by file path over the community language registry.
//!
//! - [`LanguageIndex`] derives extension and filename lookups from a table.
//! - [`Resolver`] answers "which languages could this path be" and "is this
//!   path one of these languages".
//! - [`Linguist`] keeps the current resolver and swaps in a rebuilt one when
//!   its [`LanguageSource`] is refreshed.
//!
//! # Example
//! ```
//! use linguist_core::{LanguageDefinition, Resolver, table_from};
//!
//! let resolver = Resolver::new(table_from([
//!     LanguageDefinition::new("C++", "programming")
//!         .with_extensions([".cpp", ".hh"])
//!         .with_aliases(["cpp"]),
//! ]));
//!
//! assert_eq!(resolver.languages_for("src/main.hh")[0].name, "C++");
//! assert!(resolver.matches("src/main.hh", &["CPP"]));
//! assert!(resolver.is_registered("c++"));
//! ```

pub mod errors;
pub mod index;
pub mod model;
pub mod registry;
pub mod resolver;
pub mod source;

pub use errors::{LinguistError, LinguistResult};
pub use index::LanguageIndex;
pub use model::{LanguageDefinition, LanguageTable, table_from};
pub use registry::Linguist;
pub use resolver::Resolver;
pub use source::{LanguageSource, NoSource, StaticSource};
