//! # rnr-core: Foundational Types for Rune & Rust Configuration
//!
//! Shared vocabulary for the configuration tooling. The schema registry,
//! the typed config provider, and the CLI all depend on this crate; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Single `ConfigDomain` enum.** One definition of the 26 configuration
//!    domains, mapping each to its schema file, config files, schema title,
//!    and required definitions. Exhaustive `match` everywhere.
//!
//! 2. **Closed vocabularies.** `Attribute` lists the five core attributes
//!    that saving throws and resource scaling may name.
//!
//! 3. **Validated newtypes.** `ContentId` can only hold a kebab-case id and
//!    `DiceExpression` can only hold well-formed dice notation. Deserialization
//!    goes through the same checks as the constructors.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rnr-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod attribute;
pub mod dice;
pub mod domain;
pub mod error;
pub mod identity;

pub use attribute::Attribute;
pub use dice::DiceExpression;
pub use domain::{ConfigDomain, CONFIG_DOMAIN_COUNT};
pub use error::RnrError;
pub use identity::{is_kebab_case, ContentId};
