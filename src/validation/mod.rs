//! Reference validation for state machine definitions.
//!
//! A definition whose transitions name states that do not exist cannot be
//! drawn faithfully. This module uses Stillwater's `Validation` type to
//! accumulate ALL dangling references instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use stepchart::builder::{task, DefinitionBuilder};
//! use stepchart::validation::check_references;
//!
//! let definition = DefinitionBuilder::new()
//!     .start_at("A")
//!     .state("A", task(Some("B")))
//!     .build()
//!     .unwrap();
//!
//! assert!(check_references(&definition).is_failure());
//! ```

pub mod references;

pub use references::{check_references, ReferenceError};
