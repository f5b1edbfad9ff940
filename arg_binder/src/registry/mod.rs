//! Descriptors grouped by the names they answer to.
//!
//! Every descriptor is reachable through both its long and its short name.
//! Descriptors sharing a name form an ordered group consumed positionally.

use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};

use crate::descriptor::{Argument, Descriptor};

/// Stable handle to a descriptor stored in a [`DescriptorRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(usize);

/// Mapping from argument names to position-ordered descriptor groups.
#[derive(Debug, Clone, Default)]
pub struct DescriptorRegistry {
    descriptors: Vec<Descriptor>,
    groups: HashMap<String, Vec<DescriptorId>>,
    key_order: Vec<String>,
    flattened: OnceCell<Vec<DescriptorId>>,
}

impl DescriptorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `descriptor` under its long and short names.
    pub fn add(&mut self, descriptor: Descriptor) -> DescriptorId {
        let id = DescriptorId(self.descriptors.len());
        let long = descriptor.long_name().to_owned();
        let short = descriptor.short_name().to_owned();
        self.descriptors.push(descriptor);
        self.insert_key(long.clone(), id);
        if short != long {
            self.insert_key(short, id);
        }
        self.flattened = OnceCell::new();
        id
    }

    /// Inserts every descriptor in `batch`.
    pub fn add_all<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = Descriptor>,
    {
        for descriptor in batch {
            self.add(descriptor);
        }
    }

    fn insert_key(&mut self, key: String, id: DescriptorId) {
        if let Some(group) = self.groups.get_mut(&key) {
            group.push(id);
        } else {
            self.key_order.push(key.clone());
            self.groups.insert(key, vec![id]);
        }
    }

    /// Returns `true` when some descriptor answers to `name`.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// The group answering to `name`, ordered by ascending position.
    ///
    /// Descriptors with equal positions keep their insertion order.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Vec<(DescriptorId, &Descriptor)>> {
        self.groups.get(name).map(|ids| self.ordered(ids))
    }

    /// The descriptor stored under `id`.
    #[must_use]
    pub fn get(&self, id: DescriptorId) -> Option<&Descriptor> {
        self.descriptors.get(id.0)
    }

    /// Every descriptor exactly once, group by group in name order of first
    /// insertion, each group ordered by position.
    pub fn all_values(&self) -> impl Iterator<Item = (DescriptorId, &Descriptor)> {
        self.flattened
            .get_or_init(|| self.flatten())
            .iter()
            .filter_map(|id| self.get(*id).map(|descriptor| (*id, descriptor)))
    }

    /// Number of descriptors held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` when no descriptors are held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    fn ordered(&self, ids: &[DescriptorId]) -> Vec<(DescriptorId, &Descriptor)> {
        let mut group: Vec<_> = ids
            .iter()
            .filter_map(|id| self.get(*id).map(|descriptor| (*id, descriptor)))
            .collect();
        group.sort_by_key(|(_, descriptor)| descriptor.kind().sort_key());
        group
    }

    fn flatten(&self) -> Vec<DescriptorId> {
        let mut seen = HashSet::new();
        self.key_order
            .iter()
            .filter_map(|key| self.groups.get(key))
            .flat_map(|ids| self.ordered(ids))
            .filter_map(|(id, _)| seen.insert(id).then_some(id))
            .collect()
    }
}

impl Extend<Descriptor> for DescriptorRegistry {
    fn extend<I: IntoIterator<Item = Descriptor>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl FromIterator<Descriptor> for DescriptorRegistry {
    fn from_iter<I: IntoIterator<Item = Descriptor>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.add_all(iter);
        registry
    }
}
