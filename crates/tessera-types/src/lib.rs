//! Tessera value core
//!
//! This crate defines the universal value representation:
//! - Type tags, basic kinds and native type mapping
//! - Copyable scalar records and the variant value superset
//! - Per-kind strategies for comparison, arithmetic, parsing and conversion
//! - Cross-kind promotion
//! - Online type inference over text samples

pub mod codec;
pub mod db_type;
pub mod decimal;
pub mod error;
pub mod geometry;
pub mod promotion;
pub mod scalar;
pub mod sniffer;
pub mod strategy;
pub mod tag;
pub mod temporal;
pub mod variant;

pub use db_type::{DbType, db_type_of, tag_of_db_type};
pub use decimal::DecimalParts;
pub use error::{ValueError, ValueResult};
pub use geometry::{Coordinate, Geometry, GeometryKind};
pub use promotion::{best_compare_type, promote_numeric};
pub use scalar::ScalarValue;
pub use sniffer::{Candidates, SnifferOptions, TypeSniffer};
pub use strategy::{NativeScalar, ScalarStrategy, TypeStrategy, resolve};
pub use tag::{BasicKind, NativeType, StorageClass, TypeTag};
pub use temporal::{OffsetTimestamp, TimeOfDay, Timestamp};
pub use variant::{NumericFacets, Opaque, Payload, Variant, XmlDocument};
