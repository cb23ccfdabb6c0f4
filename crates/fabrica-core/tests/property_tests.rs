//! # Property-Based Tests
//!
//! Verification of the toolkit's construction contracts using proptest:
//! setter-order irrelevance, last-write-wins, registry atomicity, and
//! builder/factory round-trip equivalence.

use fabrica_core::{
    Discriminant, FabricaError, FieldName, FieldSpec, FieldValue, PolymorphicFactory,
    Product, ProductSchema, StagedBuilder,
};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

/// Schema whose required fields are exactly the given names, in map order.
fn required_schema(names: impl Iterator<Item = String>) -> ProductSchema {
    let fields: Vec<FieldSpec> = names.map(FieldSpec::required).collect();
    ProductSchema::new(Discriminant::new("subject"), fields).expect("schema")
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Applying the same final assignments in any order yields the same product.
    #[test]
    fn setter_order_is_irrelevant(
        assignments in btree_map("[a-f]{1,8}", "[a-z0-9]{0,12}", 1..8)
    ) {
        let schema = required_schema(assignments.keys().cloned());

        let mut ascending = StagedBuilder::new(schema.clone());
        for (name, value) in &assignments {
            ascending = ascending.set(name.clone(), value.clone());
        }

        let mut descending = StagedBuilder::new(schema);
        for (name, value) in assignments.iter().rev() {
            descending = descending.set(name.clone(), value.clone());
        }

        prop_assert_eq!(
            ascending.build().expect("build"),
            descending.build().expect("build")
        );
    }

    /// Setting one field repeatedly keeps only the final value.
    #[test]
    fn last_write_wins(values in vec("[a-z0-9]{0,12}", 1..20)) {
        let schema = required_schema(std::iter::once("slot".to_string()));

        let mut builder = StagedBuilder::new(schema);
        for value in &values {
            builder = builder.set("slot", value.clone());
        }

        let product = builder.build().expect("build");
        let last = values.last().expect("nonempty");
        prop_assert_eq!(
            product.get(&FieldName::new("slot")),
            Some(&FieldValue::new(last.clone()))
        );
    }

    /// Omitting exactly one required field fails naming that field,
    /// and produces no product.
    #[test]
    fn missing_required_field_is_named(
        assignments in btree_map("[a-f]{1,8}", "[a-z0-9]{0,12}", 2..8),
        omit in any::<prop::sample::Index>()
    ) {
        let schema = required_schema(assignments.keys().cloned());
        let names: Vec<&String> = assignments.keys().collect();
        let omitted = names[omit.index(names.len())].clone();

        let mut builder = StagedBuilder::new(schema);
        for (name, value) in &assignments {
            if name != &omitted {
                builder = builder.set(name.clone(), value.clone());
            }
        }

        let err = builder.build().expect_err("must fail");
        prop_assert!(
            matches!(&err, FabricaError::MissingRequiredField(name) if name.as_str() == omitted)
        );
    }

    /// A second registration under the same key fails and leaves the
    /// original constructor in place.
    #[test]
    fn duplicate_registration_preserves_original(key in "[a-z]{1,12}") {
        let mut factory: PolymorphicFactory<(), Product> = PolymorphicFactory::new();

        let original = ProductSchema::new(Discriminant::new("original"), vec![]).expect("schema");
        factory
            .register(Discriminant::new(key.clone()), move |_: &()| {
                StagedBuilder::new(original.clone()).build()
            })
            .expect("first register");

        let replacement =
            ProductSchema::new(Discriminant::new("replacement"), vec![]).expect("schema");
        let err = factory
            .register(Discriminant::new(key.clone()), move |_: &()| {
                StagedBuilder::new(replacement.clone()).build()
            })
            .expect_err("second register must fail");
        prop_assert!(matches!(err, FabricaError::DuplicateDiscriminant(_)));

        let product = factory
            .create(&Discriminant::new(key), &())
            .expect("create");
        prop_assert_eq!(product.kind().as_str(), "original");
        prop_assert_eq!(factory.len(), 1);
    }

    /// Lookup of an unregistered discriminant always fails, naming the key.
    #[test]
    fn unknown_discriminant_is_named(key in "[a-z]{1,12}") {
        let factory: PolymorphicFactory<(), Product> = PolymorphicFactory::new();

        let err = factory
            .create(&Discriminant::new(key.clone()), &())
            .expect_err("must fail");

        prop_assert!(
            matches!(&err, FabricaError::UnknownDiscriminant(d) if d.as_str() == key)
        );
        prop_assert!(err.to_string().contains(&key));
    }

    /// Building directly and creating through a factory with equivalent
    /// arguments yield field-wise equal products.
    #[test]
    fn builder_factory_round_trip(
        assignments in btree_map("[a-f]{1,8}", "[a-z0-9]{0,12}", 1..8)
    ) {
        let schema = required_schema(assignments.keys().cloned());

        // Direct staged construction
        let mut builder = StagedBuilder::new(schema.clone());
        for (name, value) in &assignments {
            builder = builder.set(name.clone(), value.clone());
        }
        let direct = builder.build().expect("direct build");

        // Factory construction with the same assignments as arguments
        let mut factory: PolymorphicFactory<Vec<(FieldName, FieldValue)>, Product> =
            PolymorphicFactory::new();
        factory
            .register(Discriminant::new("subject"), move |args| {
                let mut builder = StagedBuilder::new(schema.clone());
                for (name, value) in args {
                    builder = builder.set(name.clone(), value.clone());
                }
                builder.build()
            })
            .expect("register");

        let args: Vec<(FieldName, FieldValue)> = assignments
            .iter()
            .map(|(n, v)| (FieldName::new(n.clone()), FieldValue::new(v.clone())))
            .collect();
        let via_factory = factory
            .create(&Discriminant::new("subject"), &args)
            .expect("create");

        prop_assert_eq!(direct, via_factory);
    }
}
