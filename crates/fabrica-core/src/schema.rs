//! # Schema Module
//!
//! Declared field sets for staged construction.
//!
//! A `ProductSchema` is the contract a `StagedBuilder` validates against:
//! which fields exist, which are required, and what defaults the optional
//! ones take. Schemas are validated at declaration time so construction
//! never encounters a malformed field set.

use crate::primitives::{MAX_DISCRIMINANT_LENGTH, MAX_FIELD_NAME_LENGTH, MAX_SCHEMA_FIELDS};
use crate::{Discriminant, FabricaError, FieldName, FieldValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// FIELD SPEC
// =============================================================================

/// Whether a field must be set before `build()`, or falls back to a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// The field must be set explicitly; `build()` fails without it.
    Required,
    /// The field may be omitted; `build()` substitutes the default.
    Optional(FieldValue),
}

/// Declaration of a single named field in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    name: FieldName,
    kind: FieldKind,
}

impl FieldSpec {
    /// Declare a required field.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: FieldName::new(name),
            kind: FieldKind::Required,
        }
    }

    /// Declare an optional field with its default value.
    #[must_use]
    pub fn optional(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: FieldName::new(name),
            kind: FieldKind::Optional(FieldValue::new(default)),
        }
    }

    /// The field's name.
    #[must_use]
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// Whether the field is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self.kind, FieldKind::Required)
    }

    /// The default value, if the field is optional.
    #[must_use]
    pub fn default_value(&self) -> Option<&FieldValue> {
        match &self.kind {
            FieldKind::Required => None,
            FieldKind::Optional(default) => Some(default),
        }
    }
}

// =============================================================================
// PRODUCT SCHEMA
// =============================================================================

/// The declared, ordered field set for one product kind.
///
/// Declaration order is significant: `build()` reports the FIRST unset
/// required field in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSchema {
    kind: Discriminant,
    fields: Vec<FieldSpec>,
}

impl ProductSchema {
    /// Declare a schema, validating its shape.
    ///
    /// A schema is valid if:
    /// - The kind tag is non-empty and within length limits
    /// - Every field name is non-empty and within length limits
    /// - No field name appears twice
    /// - The field count is within `MAX_SCHEMA_FIELDS`
    ///
    /// Returns `FabricaError::InvalidSchema` naming the offending part.
    pub fn new(kind: Discriminant, fields: Vec<FieldSpec>) -> Result<Self, FabricaError> {
        if kind.as_str().is_empty() {
            return Err(FabricaError::InvalidSchema("empty kind tag".to_string()));
        }

        if kind.as_str().len() > MAX_DISCRIMINANT_LENGTH {
            return Err(FabricaError::InvalidSchema(format!(
                "kind tag exceeds {} bytes",
                MAX_DISCRIMINANT_LENGTH
            )));
        }

        if fields.len() > MAX_SCHEMA_FIELDS {
            return Err(FabricaError::InvalidSchema(format!(
                "{} fields exceeds maximum of {}",
                fields.len(),
                MAX_SCHEMA_FIELDS
            )));
        }

        let mut seen: BTreeSet<&FieldName> = BTreeSet::new();
        for spec in &fields {
            let name = spec.name().as_str();

            if name.is_empty() {
                return Err(FabricaError::InvalidSchema("empty field name".to_string()));
            }

            if name.len() > MAX_FIELD_NAME_LENGTH {
                return Err(FabricaError::InvalidSchema(format!(
                    "field name '{}' exceeds {} bytes",
                    name, MAX_FIELD_NAME_LENGTH
                )));
            }

            if !seen.insert(spec.name()) {
                return Err(FabricaError::InvalidSchema(format!(
                    "duplicate field name '{}'",
                    name
                )));
            }
        }

        Ok(Self { kind, fields })
    }

    /// The kind tag products built from this schema carry.
    #[must_use]
    pub fn kind(&self) -> &Discriminant {
        &self.kind
    }

    /// All field declarations, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field declaration by name.
    #[must_use]
    pub fn field(&self, name: &FieldName) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name() == name)
    }

    /// Number of declared fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
