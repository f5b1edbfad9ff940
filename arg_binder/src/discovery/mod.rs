//! Descriptor suppliers consulted when a binding pass starts.
//!
//! The binding engine never enumerates types itself. It asks a
//! [`DescriptorSource`] for a registry, passing the configured
//! [`DiscoveryMode`] and the types of the currently live targets.

use std::any::TypeId;
use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::descriptor::Descriptor;
use crate::registry::DescriptorRegistry;
use crate::target::ArgumentTarget;

/// Which declared types contribute descriptors to a binding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscoveryMode {
    /// Every type known to the source.
    Everything,
    /// Only types with at least one live registered target.
    #[default]
    RegisteredTypesOnly,
}

/// Supplies the descriptor registry for a binding pass.
pub trait DescriptorSource {
    /// Builds a registry for `mode`; `registered` lists the distinct types of
    /// live registered targets.
    fn discover(&self, mode: DiscoveryMode, registered: &[TypeId]) -> DescriptorRegistry;
}

/// A fixed registry ignores the discovery mode.
impl DescriptorSource for DescriptorRegistry {
    fn discover(&self, _mode: DiscoveryMode, _registered: &[TypeId]) -> DescriptorRegistry {
        self.clone()
    }
}

/// Descriptor source assembled from [`ArgumentTarget`] types.
///
/// ```
/// use arg_binder::{Arguments, Catalogue, DescriptorSource, DiscoveryMode};
///
/// #[derive(Arguments)]
/// struct Verbosity {
///     #[argument(long = "Verbose", short = "v", flag, default = "false")]
///     verbose: bool,
/// }
///
/// let catalogue = Catalogue::new().with::<Verbosity>();
/// let registry = catalogue.discover(DiscoveryMode::Everything, &[]);
/// assert!(registry.contains_key("Verbose"));
/// ```
#[derive(Default, Clone)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
}

#[derive(Clone)]
struct CatalogueEntry {
    owner: TypeId,
    owner_name: &'static str,
    descriptors: Vec<Descriptor>,
}

impl Catalogue {
    /// Creates an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the descriptors declared by `T`.
    #[must_use]
    pub fn with<T: ArgumentTarget>(mut self) -> Self {
        self.add::<T>();
        self
    }

    /// Adds the descriptors declared by `T`; repeated additions are ignored.
    pub fn add<T: ArgumentTarget>(&mut self) {
        let owner = TypeId::of::<T>();
        if self.entries.iter().any(|entry| entry.owner == owner) {
            return;
        }
        self.entries.push(CatalogueEntry {
            owner,
            owner_name: std::any::type_name::<T>(),
            descriptors: T::descriptors(),
        });
    }

    /// Number of types in the catalogue.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no types have been added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DescriptorSource for Catalogue {
    fn discover(&self, mode: DiscoveryMode, registered: &[TypeId]) -> DescriptorRegistry {
        let registry: DescriptorRegistry = self
            .entries
            .iter()
            .filter(|entry| match mode {
                DiscoveryMode::Everything => true,
                DiscoveryMode::RegisteredTypesOnly => registered.contains(&entry.owner),
            })
            .flat_map(|entry| entry.descriptors.iter().cloned())
            .collect();
        debug!(?mode, descriptors = registry.len(), "discovered descriptors");
        registry
    }
}

impl fmt::Debug for Catalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| entry.owner_name))
            .finish()
    }
}
