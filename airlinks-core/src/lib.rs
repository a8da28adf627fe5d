//! # Airlinks Core
//!
//! Core types, errors, and traits for resolving Airtable lists into links.
//!
//! This crate provides the foundational building blocks used by all other airlinks crates:
//!
//! - **Types**: Links, lists, list references, settings and raw record shapes
//! - **Validation**: Structural checks for base, table and record identifiers
//! - **Errors**: One error taxonomy shared by client, resolver and cache
//! - **Constants**: Identifier prefixes, API defaults and the freshness window
//! - **Traits**: The `RecordStore` seam between resolution logic and HTTP
//!
//! ## Example
//!
//! ```rust
//! use airlinks_core::{is_valid_record_id, ListRef};
//!
//! assert!(is_valid_record_id("recAAAAAAAAA"));
//! let list = ListRef::parse("recAAAAAAAAA").unwrap();
//! assert_eq!(list.record_id(), "recAAAAAAAAA");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
pub mod validate;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{AirlinksError, Result};
pub use traits::*;
pub use types::*;
pub use validate::*;
