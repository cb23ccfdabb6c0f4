//! # Core Type Definitions
//!
//! This module contains all value types for the Fabrica construction toolkit:
//! - Field identifiers (`FieldName`, `FieldValue`)
//! - Factory keys (`Discriminant`)
//! - The immutable construction result (`Product`)
//! - Error types (`FabricaError`)
//! - Describe trait
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Hold only owned string data; no interior mutability
//! - Expose no mutating API once constructed (`Product` is read-only)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// =============================================================================
// FIELD IDENTIFIERS
// =============================================================================

/// Name of a single product field.
///
/// Field names identify slots in a `ProductSchema` and keys in a `Product`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldName(pub String);

impl FieldName {
    /// Create a new field name from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the field name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<FieldName> for String {
    fn from(name: FieldName) -> Self {
        name.0
    }
}

/// Value assigned to a product field.
///
/// Values are opaque to the toolkit; builders and factories move them
/// around without interpreting them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldValue(pub String);

impl FieldValue {
    /// Create a new field value from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<FieldValue> for String {
    fn from(value: FieldValue) -> Self {
        value.0
    }
}

// =============================================================================
// DISCRIMINANT
// =============================================================================

/// Key selecting which constructor a factory invokes.
///
/// The discriminant doubles as the kind tag of the products it constructs:
/// a schema for `"car"` produces products tagged `"car"`, and a factory
/// entry registered under `"car"` dispatches to that schema's constructor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Discriminant(pub String);

impl Discriminant {
    /// Create a new discriminant from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the discriminant as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Discriminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PRODUCT
// =============================================================================

/// A Product is the immutable result of a completed construction.
///
/// Products carry a kind tag and a fixed set of named fields. They are
/// created only by a completed `StagedBuilder::build()` (factory
/// constructors compose builders internally) and are never mutated
/// afterwards; all access is read-only.
///
/// Fields are held in a `BTreeMap` so iteration order is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    kind: Discriminant,
    fields: BTreeMap<FieldName, FieldValue>,
}

impl Product {
    /// Assemble a product from validated parts.
    ///
    /// Crate-private: consumers must go through a builder or factory so a
    /// partially-constructed product is never observable.
    pub(crate) fn from_parts(kind: Discriminant, fields: BTreeMap<FieldName, FieldValue>) -> Self {
        Self { kind, fields }
    }

    /// The kind tag this product was constructed under.
    #[must_use]
    pub fn kind(&self) -> &Discriminant {
        &self.kind
    }

    /// Look up a field value by name.
    #[must_use]
    pub fn get(&self, name: &FieldName) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Iterate all fields in deterministic (name) order.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldName, &FieldValue)> {
        self.fields.iter()
    }

    /// Number of fields in this product.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

// =============================================================================
// DESCRIBE TRAIT
// =============================================================================

/// Read-only textual description of a constructed value.
///
/// This is the formatting capability consumed by rendering layers. Every
/// variant a factory produces satisfies it, so callers can display any
/// product without knowing which constructor made it.
pub trait Describe {
    /// Render a single-line, human-readable description.
    fn describe(&self) -> String;
}

impl Describe for Product {
    /// Renders as `kind { a: 1, b: 2 }`, fields in name order.
    fn describe(&self) -> String {
        if self.fields.is_empty() {
            return format!("{} {{}}", self.kind);
        }

        let body: Vec<String> = self
            .fields
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();

        format!("{} {{ {} }}", self.kind, body.join(", "))
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Fabrica toolkit.
///
/// - No silent failures
/// - Use `Result<T, FabricaError>` for fallible operations
/// - The toolkit never panics; all errors are surfaced to the caller
#[derive(Debug, Error)]
pub enum FabricaError {
    /// A required field was never set before `build()`.
    #[error("Missing required field: {0}")]
    MissingRequiredField(FieldName),

    /// The discriminant already has a registered constructor.
    #[error("Duplicate discriminant: {0}")]
    DuplicateDiscriminant(Discriminant),

    /// No constructor is registered for the discriminant.
    #[error("Unknown discriminant: {0}")]
    UnknownDiscriminant(Discriminant),

    /// A schema declaration is malformed (duplicate names, limits exceeded).
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// A discriminant failed registration-time validation.
    #[error("Invalid discriminant: {0}")]
    InvalidDiscriminant(String),

    /// A constructor or singleton initializer failed.
    #[error("Construction failed: {0}")]
    ConstructionFailed(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        let mut fields = BTreeMap::new();
        fields.insert(FieldName::new("wheels"), FieldValue::new("4"));
        fields.insert(FieldName::new("color"), FieldValue::new("red"));
        Product::from_parts(Discriminant::new("car"), fields)
    }

    #[test]
    fn product_field_lookup() {
        let product = sample_product();

        assert_eq!(
            product.get(&FieldName::new("color")),
            Some(&FieldValue::new("red"))
        );
        assert_eq!(product.get(&FieldName::new("engine")), None);
        assert_eq!(product.field_count(), 2);
    }

    #[test]
    fn product_fields_deterministic_order() {
        let product = sample_product();
        let names: Vec<&str> = product.fields().map(|(n, _)| n.as_str()).collect();

        // BTreeMap iterates in name order regardless of insertion order
        assert_eq!(names, vec!["color", "wheels"]);
    }

    #[test]
    fn describe_renders_kind_and_fields() {
        let product = sample_product();
        assert_eq!(product.describe(), "car { color: red, wheels: 4 }");
    }

    #[test]
    fn describe_renders_empty_field_set() {
        let product = Product::from_parts(Discriminant::new("unit"), BTreeMap::new());
        assert_eq!(product.describe(), "unit {}");
    }

    #[test]
    fn error_messages_name_the_subject() {
        let missing = FabricaError::MissingRequiredField(FieldName::new("color"));
        assert_eq!(missing.to_string(), "Missing required field: color");

        let unknown = FabricaError::UnknownDiscriminant(Discriminant::new("boat"));
        assert_eq!(unknown.to_string(), "Unknown discriminant: boat");
    }
}
