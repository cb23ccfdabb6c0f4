//! # fabrica-core
//!
//! The staged-construction and single-instance toolkit - THE LOGIC.
//!
//! This crate implements three independent pattern components:
//! - [`StagedBuilder`]: fluent accumulation of named fields against a
//!   declared schema, validated at `build()`
//! - [`PolymorphicFactory`]: constructor dispatch keyed on a discriminant
//! - [`SingletonCell`]: process-wide lazy single-instance holder, plus the
//!   [`SharedCache`] resource it typically guards
//!
//! The components do not compose with each other; each is a leaf utility.
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: no async, no network, no filesystem
//! - Deterministic: `BTreeMap` only, no floats, no randomness
//! - Synchronous: every operation completes without suspension points;
//!   only `SingletonCell` and `SharedCache` carry a concurrency contract

// =============================================================================
// MODULES
// =============================================================================

pub mod builder;
pub mod cache;
pub mod factory;
pub mod primitives;
pub mod schema;
pub mod singleton;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Describe, Discriminant, FabricaError, FieldName, FieldValue, Product};

// =============================================================================
// RE-EXPORTS: Toolkit Components
// =============================================================================

pub use builder::StagedBuilder;
pub use cache::{SharedCache, shared_cache};
pub use factory::{Constructor, PolymorphicFactory};
pub use schema::{FieldKind, FieldSpec, ProductSchema};
pub use singleton::SingletonCell;
