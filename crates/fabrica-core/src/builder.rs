//! # Staged Builder
//!
//! Fluent accumulation of field values against a declared schema.
//!
//! - Setters chain by value and never fail
//! - `build()` borrows the builder, so repeated finalization is permitted
//! - Required-field presence is enforced at `build()`, never earlier

use crate::schema::ProductSchema;
use crate::{FabricaError, FieldName, FieldValue, Product};
use std::collections::BTreeMap;

// =============================================================================
// STAGED BUILDER
// =============================================================================

/// Accumulates field values through chained calls, then validates and
/// produces an immutable [`Product`].
///
/// Setter-call order is irrelevant to the result; only the final value per
/// field matters (last write wins). The builder is not consumed by
/// `build()`: calling it twice without intervening setters yields two
/// field-wise identical products.
///
/// ```
/// use fabrica_core::{Discriminant, FieldSpec, ProductSchema, StagedBuilder};
///
/// let schema = ProductSchema::new(
///     Discriminant::new("car"),
///     vec![FieldSpec::required("color"), FieldSpec::optional("wheels", "4")],
/// )?;
///
/// let product = StagedBuilder::new(schema).set("color", "red").build()?;
/// assert_eq!(product.kind().as_str(), "car");
/// # Ok::<(), fabrica_core::FabricaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StagedBuilder {
    schema: ProductSchema,
    state: BTreeMap<FieldName, FieldValue>,
}

impl StagedBuilder {
    /// Start a builder with empty state for the given schema.
    #[must_use]
    pub fn new(schema: ProductSchema) -> Self {
        Self {
            schema,
            state: BTreeMap::new(),
        }
    }

    /// The schema this builder validates against.
    #[must_use]
    pub fn schema(&self) -> &ProductSchema {
        &self.schema
    }

    /// Store a field value, returning the builder for chaining.
    ///
    /// Never fails. Setting the same field twice keeps the later value.
    /// Values stored under names the schema does not declare are accepted
    /// here and ignored by `build()`.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.state
            .insert(FieldName::new(name), FieldValue::new(value));
        self
    }

    /// Whether a value has been accumulated for the given field.
    #[must_use]
    pub fn is_set(&self, name: &FieldName) -> bool {
        self.state.contains_key(name)
    }

    /// Discard all accumulated field values, keeping the schema.
    pub fn reset(&mut self) {
        self.state.clear();
    }

    /// Validate accumulated state and produce a new [`Product`].
    ///
    /// Fails with `FabricaError::MissingRequiredField` naming the first
    /// unset required field in schema declaration order. Unset optional
    /// fields take their schema-declared defaults.
    ///
    /// Does not consume or mutate the builder.
    pub fn build(&self) -> Result<Product, FabricaError> {
        let mut fields = BTreeMap::new();

        for spec in self.schema.fields() {
            let value = match self.state.get(spec.name()) {
                Some(set) => set.clone(),
                None => match spec.default_value() {
                    Some(default) => default.clone(),
                    None => {
                        return Err(FabricaError::MissingRequiredField(spec.name().clone()));
                    }
                },
            };

            fields.insert(spec.name().clone(), value);
        }

        Ok(Product::from_parts(self.schema.kind().clone(), fields))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Discriminant, FieldSpec};

    fn car_schema() -> ProductSchema {
        ProductSchema::new(
            Discriminant::new("car"),
            vec![
                FieldSpec::required("color"),
                FieldSpec::required("engine"),
                FieldSpec::optional("wheels", "4"),
            ],
        )
        .expect("schema")
    }

    #[test]
    fn build_with_all_fields_set() {
        let product = StagedBuilder::new(car_schema())
            .set("color", "red")
            .set("engine", "v8")
            .set("wheels", "6")
            .build()
            .expect("build");

        assert_eq!(product.kind().as_str(), "car");
        assert_eq!(
            product.get(&FieldName::new("wheels")),
            Some(&FieldValue::new("6"))
        );
    }

    #[test]
    fn build_applies_optional_defaults() {
        let product = StagedBuilder::new(car_schema())
            .set("color", "red")
            .set("engine", "v8")
            .build()
            .expect("build");

        assert_eq!(
            product.get(&FieldName::new("wheels")),
            Some(&FieldValue::new("4"))
        );
    }

    #[test]
    fn build_reports_first_missing_required_field() {
        // Both required fields unset; declaration order decides which is named
        let err = StagedBuilder::new(car_schema())
            .set("wheels", "6")
            .build()
            .expect_err("must fail");

        assert!(
            matches!(&err, FabricaError::MissingRequiredField(name) if name.as_str() == "color"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn build_reports_later_missing_field_once_earlier_is_set() {
        let err = StagedBuilder::new(car_schema())
            .set("color", "red")
            .build()
            .expect_err("must fail");

        assert!(
            matches!(&err, FabricaError::MissingRequiredField(name) if name.as_str() == "engine"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn last_write_wins() {
        let product = StagedBuilder::new(car_schema())
            .set("color", "red")
            .set("engine", "v8")
            .set("color", "blue")
            .build()
            .expect("build");

        assert_eq!(
            product.get(&FieldName::new("color")),
            Some(&FieldValue::new("blue"))
        );
    }

    #[test]
    fn build_is_repeatable() {
        let builder = StagedBuilder::new(car_schema())
            .set("color", "red")
            .set("engine", "v8");

        let first = builder.build().expect("first build");
        let second = builder.build().expect("second build");

        // Field-wise identical, separately allocated
        assert_eq!(first, second);
    }

    #[test]
    fn undeclared_fields_are_ignored_at_build() {
        let product = StagedBuilder::new(car_schema())
            .set("color", "red")
            .set("engine", "v8")
            .set("spoiler", "carbon")
            .build()
            .expect("build");

        assert_eq!(product.get(&FieldName::new("spoiler")), None);
        assert_eq!(product.field_count(), 3);
    }

    #[test]
    fn reset_clears_accumulated_state() {
        let mut builder = StagedBuilder::new(car_schema())
            .set("color", "red")
            .set("engine", "v8");
        assert!(builder.is_set(&FieldName::new("color")));

        builder.reset();

        assert!(!builder.is_set(&FieldName::new("color")));
        assert!(builder.build().is_err());
    }
}
