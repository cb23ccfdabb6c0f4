//! # Innate Primitives
//!
//! Hardcoded runtime constants for the Fabrica toolkit.
//!
//! These limits are compiled into the binary and are immutable at runtime.
//! They bound schema declarations and registry keys so malformed or
//! malicious configuration is rejected at declaration time, never at
//! construction time.

/// Maximum length for field names.
///
/// Schema declarations with longer names are rejected by
/// `ProductSchema::new`. This prevents memory exhaustion from malformed
/// catalog input.
pub const MAX_FIELD_NAME_LENGTH: usize = 256;

/// Maximum number of fields in a single schema.
///
/// Schemas larger than this are rejected. Products in this toolkit are
/// small named-field records; a declaration this wide indicates a
/// configuration mistake.
pub const MAX_SCHEMA_FIELDS: usize = 64;

/// Maximum length for discriminants.
///
/// Registration with a longer key is rejected by
/// `PolymorphicFactory::register`.
pub const MAX_DISCRIMINANT_LENGTH: usize = 256;
