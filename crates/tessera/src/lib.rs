//! Tessera: the universal value core of a data-integration engine
//!
//! This crate re-exports the value core and, with the `cli` feature, the
//! command-line tooling:
//! - Tagged scalar records and variant values
//! - Cross-kind comparison through the promotion table
//! - Per-kind strategies for arithmetic, parsing and conversion
//! - Type inference over text samples
//!
//! # Example
//!
//! ```
//! use tessera::{TypeSniffer, TypeTag, Variant};
//!
//! let mut sniffer = TypeSniffer::new();
//! sniffer.observe_all(["1.5", "2", "-0.25"].map(Some));
//! assert_eq!(sniffer.best_type(), TypeTag::Double);
//!
//! let value = Variant::from_dynamic(sniffer.best_type(), "2").unwrap();
//! assert!(value.equals(&Variant::from(2i32)).unwrap());
//! ```

pub use tessera_diagnostics as diagnostics;
pub use tessera_types as types;

pub use tessera_diagnostics::{ErrorCode, ErrorInfo};
pub use tessera_types::{
    BasicKind, DbType, ScalarValue, SnifferOptions, TypeSniffer, TypeTag, ValueError,
    ValueResult, Variant, best_compare_type,
};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
