//! # Polymorphic Factory
//!
//! Constructor dispatch keyed on a discriminant.
//!
//! The registry decouples product instantiation from calling code: adding
//! a new variant is one `register` call, never an edit to dispatch logic.
//! Registration is append-only for the life of the registry; there is no
//! deregistration.

use crate::primitives::MAX_DISCRIMINANT_LENGTH;
use crate::{Discriminant, FabricaError};
use std::collections::BTreeMap;

// =============================================================================
// CONSTRUCTOR
// =============================================================================

/// A registered constructor: arguments in, product out.
///
/// Constructors are fallible so builder errors compose through
/// [`PolymorphicFactory::create`] unchanged.
pub type Constructor<A, P> = Box<dyn Fn(&A) -> Result<P, FabricaError> + Send + Sync>;

// =============================================================================
// POLYMORPHIC FACTORY
// =============================================================================

/// Registry mapping a [`Discriminant`] to a construction function.
///
/// Generic over the argument type `A` and the product type `P`: every
/// variant behind one registry takes the same argument shape and satisfies
/// the same product interface. Families of zero-argument constructors use
/// `A = ()`.
///
/// Lookup failure is always an explicit error; there is no fallback
/// discriminant and no default product.
pub struct PolymorphicFactory<A, P> {
    entries: BTreeMap<Discriminant, Constructor<A, P>>,
}

impl<A, P> PolymorphicFactory<A, P> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register a constructor under a discriminant.
    ///
    /// Fails with `FabricaError::DuplicateDiscriminant` if the key already
    /// has an entry; the registry never silently overwrites. The original
    /// mapping is unchanged on failure.
    ///
    /// Fails with `FabricaError::InvalidDiscriminant` for empty or
    /// oversized keys.
    pub fn register<F>(&mut self, discriminant: Discriminant, constructor: F) -> Result<(), FabricaError>
    where
        F: Fn(&A) -> Result<P, FabricaError> + Send + Sync + 'static,
    {
        if discriminant.as_str().is_empty() {
            return Err(FabricaError::InvalidDiscriminant(
                "empty discriminant".to_string(),
            ));
        }

        if discriminant.as_str().len() > MAX_DISCRIMINANT_LENGTH {
            return Err(FabricaError::InvalidDiscriminant(format!(
                "discriminant exceeds {} bytes",
                MAX_DISCRIMINANT_LENGTH
            )));
        }

        if self.entries.contains_key(&discriminant) {
            return Err(FabricaError::DuplicateDiscriminant(discriminant));
        }

        self.entries.insert(discriminant, Box::new(constructor));
        Ok(())
    }

    /// Invoke the constructor registered under a discriminant.
    ///
    /// Fails with `FabricaError::UnknownDiscriminant` naming the key when
    /// no entry exists. Constructor failures propagate unchanged.
    pub fn create(&self, discriminant: &Discriminant, args: &A) -> Result<P, FabricaError> {
        let constructor = self
            .entries
            .get(discriminant)
            .ok_or_else(|| FabricaError::UnknownDiscriminant(discriminant.clone()))?;

        constructor(args)
    }

    /// Whether a constructor is registered under the discriminant.
    #[must_use]
    pub fn contains(&self, discriminant: &Discriminant) -> bool {
        self.entries.contains_key(discriminant)
    }

    /// All registered discriminants, in deterministic (key) order.
    #[must_use]
    pub fn registered(&self) -> Vec<Discriminant> {
        self.entries.keys().cloned().collect()
    }

    /// Number of registered constructors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A, P> Default for PolymorphicFactory<A, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, P> std::fmt::Debug for PolymorphicFactory<A, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolymorphicFactory")
            .field("registered", &self.registered())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
