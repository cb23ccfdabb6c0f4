//! # Catalog Module
//!
//! TOML-declared product templates, registered into a factory at startup.
//!
//! The catalog is the bootstrap step the toolkit itself stays agnostic of:
//! it parses template declarations, derives a `ProductSchema` per entry,
//! and registers one constructor per discriminant. After bootstrap every
//! `create` call goes through the factory; the catalog never constructs a
//! product any other way.
//!
//! ## Catalog format
//!
//! ```toml
//! [[product]]
//! discriminant = "car"
//!
//! [[product.field]]
//! name = "color"
//! required = true
//!
//! [[product.field]]
//! name = "wheels"
//! default = "4"
//! ```

use fabrica_core::{
    Discriminant, FabricaError, FieldName, FieldSpec, FieldValue, PolymorphicFactory, Product,
    ProductSchema, SingletonCell, StagedBuilder,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

// =============================================================================
// CREATE ARGUMENTS
// =============================================================================

/// Field overrides supplied to a catalog constructor.
///
/// Applied to the template's builder in order; last write per field wins.
pub type CreateArgs = Vec<(FieldName, FieldValue)>;

// =============================================================================
// RAW FILE SHAPE
// =============================================================================

/// Top-level TOML document.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    product: Vec<ProductEntry>,
}

/// One `[[product]]` template.
#[derive(Debug, Deserialize)]
struct ProductEntry {
    discriminant: String,
    #[serde(default)]
    field: Vec<FieldEntry>,
}

/// One `[[product.field]]` declaration.
#[derive(Debug, Deserialize)]
struct FieldEntry {
    name: String,
    #[serde(default)]
    required: bool,
    default: Option<String>,
}

impl FieldEntry {
    /// Convert to a `FieldSpec`, rejecting contradictory declarations.
    fn to_spec(&self, discriminant: &str) -> Result<FieldSpec, FabricaError> {
        match (self.required, &self.default) {
            (true, Some(_)) => Err(FabricaError::InvalidSchema(format!(
                "field '{}' of '{}' is required and may not declare a default",
                self.name, discriminant
            ))),
            (true, None) => Ok(FieldSpec::required(self.name.clone())),
            (false, Some(default)) => Ok(FieldSpec::optional(self.name.clone(), default.clone())),
            (false, None) => Err(FabricaError::InvalidSchema(format!(
                "optional field '{}' of '{}' must declare a default",
                self.name, discriminant
            ))),
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// The default catalog compiled into the binary.
///
/// Used when no catalog file is supplied on the command line.
const DEFAULT_CATALOG: &str = r#"
[[product]]
discriminant = "car"

[[product.field]]
name = "color"
required = true

[[product.field]]
name = "wheels"
default = "4"

[[product.field]]
name = "engine"
default = "petrol"

[[product]]
discriminant = "bike"

[[product.field]]
name = "color"
required = true

[[product.field]]
name = "wheels"
default = "2"

[[product]]
discriminant = "laptop"

[[product.field]]
name = "cpu"
required = true

[[product.field]]
name = "ram_gb"
default = "16"

[[product.field]]
name = "storage_gb"
default = "512"
"#;

/// A bootstrapped catalog: schemas plus the factory registered from them.
///
/// Registration happens once, at load; the registry is append-only after
/// that, so `create` never races configuration.
#[derive(Debug)]
pub struct Catalog {
    schemas: BTreeMap<Discriminant, ProductSchema>,
    factory: PolymorphicFactory<CreateArgs, Product>,
}

impl Catalog {
    /// Parse catalog text and register every template.
    pub fn from_toml_str(text: &str) -> Result<Self, FabricaError> {
        let file: CatalogFile = toml::from_str(text)
            .map_err(|e| FabricaError::DeserializationError(format!("catalog parse: {e}")))?;

        let mut schemas = BTreeMap::new();
        let mut factory = PolymorphicFactory::new();

        for entry in &file.product {
            let specs = entry
                .field
                .iter()
                .map(|f| f.to_spec(&entry.discriminant))
                .collect::<Result<Vec<_>, _>>()?;

            let discriminant = Discriminant::new(entry.discriminant.clone());
            let schema = ProductSchema::new(discriminant.clone(), specs)?;

            if schemas.contains_key(&discriminant) {
                return Err(FabricaError::DuplicateDiscriminant(discriminant));
            }

            let template = schema.clone();
            factory.register(discriminant.clone(), move |args: &CreateArgs| {
                let mut builder = StagedBuilder::new(template.clone());
                for (name, value) in args {
                    builder = builder.set(name.clone(), value.clone());
                }
                builder.build()
            })?;

            schemas.insert(discriminant, schema);
        }

        tracing::debug!(templates = schemas.len(), "catalog bootstrapped");

        Ok(Self { schemas, factory })
    }

    /// Load and bootstrap a catalog file.
    pub fn load(path: &Path) -> Result<Self, FabricaError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            FabricaError::IoError(format!("cannot read catalog '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, FabricaError> {
        Self::from_toml_str(DEFAULT_CATALOG)
    }

    /// Construct a product through the registered factory.
    pub fn create(&self, discriminant: &Discriminant, args: &CreateArgs) -> Result<Product, FabricaError> {
        self.factory.create(discriminant, args)
    }

    /// Start a staged builder for one template.
    ///
    /// Fails with `UnknownDiscriminant` if no template exists for the key.
    pub fn builder(&self, discriminant: &Discriminant) -> Result<StagedBuilder, FabricaError> {
        let schema = self
            .schemas
            .get(discriminant)
            .ok_or_else(|| FabricaError::UnknownDiscriminant(discriminant.clone()))?;
        Ok(StagedBuilder::new(schema.clone()))
    }

    /// The schema declared for one template.
    #[must_use]
    pub fn schema(&self, discriminant: &Discriminant) -> Option<&ProductSchema> {
        self.schemas.get(discriminant)
    }

    /// All template schemas, in discriminant order.
    pub fn schemas(&self) -> impl Iterator<Item = &ProductSchema> {
        self.schemas.values()
    }

    /// All registered discriminants, in deterministic order.
    #[must_use]
    pub fn discriminants(&self) -> Vec<Discriminant> {
        self.factory.registered()
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factory.len()
    }

    /// Whether the catalog has no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factory.is_empty()
    }
}

// =============================================================================
// PROCESS-WIDE ACCESSOR
// =============================================================================

static CATALOG: SingletonCell<Catalog> = SingletonCell::new();

/// The process-wide catalog, loaded on first access.
///
/// `path = None` selects the built-in catalog. A load failure leaves the
/// cell uninitialized so a corrected path can be retried within the same
/// process.
pub fn global_catalog(path: Option<&Path>) -> Result<Arc<Catalog>, FabricaError> {
    CATALOG.get_or_try_init(|| match path {
        Some(path) => Catalog::load(path),
        None => Catalog::builtin(),
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use fabrica_core::Describe;

    #[test]
    fn builtin_catalog_bootstraps() {
        let catalog = Catalog::builtin().expect("builtin");

        let keys: Vec<String> = catalog.discriminants().into_iter().map(|d| d.0).collect();
        assert_eq!(
            keys,
            vec!["bike".to_string(), "car".to_string(), "laptop".to_string()]
        );
    }

    #[test]
    fn create_applies_overrides_over_defaults() {
        let catalog = Catalog::builtin().expect("builtin");

        let args: CreateArgs = vec![
            (FieldName::new("color"), FieldValue::new("red")),
            (FieldName::new("wheels"), FieldValue::new("6")),
        ];
        let product = catalog
            .create(&Discriminant::new("car"), &args)
            .expect("create");

        assert_eq!(
            product.describe(),
            "car { color: red, engine: petrol, wheels: 6 }"
        );
    }

    #[test]
    fn create_without_required_field_fails() {
        let catalog = Catalog::builtin().expect("builtin");

        let err = catalog
            .create(&Discriminant::new("car"), &Vec::new())
            .expect_err("must fail");
        assert!(matches!(err, FabricaError::MissingRequiredField(_)));
    }

    #[test]
    fn unknown_discriminant_is_an_error() {
        let catalog = Catalog::builtin().expect("builtin");

        let err = catalog
            .create(&Discriminant::new("boat"), &Vec::new())
            .expect_err("must fail");
        assert!(
            matches!(&err, FabricaError::UnknownDiscriminant(d) if d.as_str() == "boat")
        );
    }

    #[test]
    fn required_field_with_default_is_rejected() {
        let text = r#"
[[product]]
discriminant = "car"

[[product.field]]
name = "color"
required = true
default = "red"
"#;
        let err = Catalog::from_toml_str(text).expect_err("must fail");
        assert!(matches!(err, FabricaError::InvalidSchema(_)));
    }

    #[test]
    fn optional_field_without_default_is_rejected() {
        let text = r#"
[[product]]
discriminant = "car"

[[product.field]]
name = "color"
"#;
        let err = Catalog::from_toml_str(text).expect_err("must fail");
        assert!(matches!(err, FabricaError::InvalidSchema(_)));
    }

    #[test]
    fn duplicate_template_is_rejected() {
        let text = r#"
[[product]]
discriminant = "car"

[[product]]
discriminant = "car"
"#;
        let err = Catalog::from_toml_str(text).expect_err("must fail");
        assert!(matches!(err, FabricaError::DuplicateDiscriminant(_)));
    }

    #[test]
    fn malformed_toml_is_a_deserialization_error() {
        let err = Catalog::from_toml_str("[[product").expect_err("must fail");
        assert!(matches!(err, FabricaError::DeserializationError(_)));
    }

    #[test]
    fn builder_gives_direct_staged_access() {
        let catalog = Catalog::builtin().expect("builtin");

        let product = catalog
            .builder(&Discriminant::new("bike"))
            .expect("builder")
            .set("color", "green")
            .build()
            .expect("build");

        assert_eq!(product.describe(), "bike { color: green, wheels: 2 }");
    }
}
