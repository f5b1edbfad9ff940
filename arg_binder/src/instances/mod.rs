//! Weakly held targets updated by a binding pass.
//!
//! The registry never keeps a target alive: once every caller-held [`Rc`]
//! is dropped the target disappears on the next read.

use std::any::TypeId;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::target::ArgumentTarget;

/// Shared handle to a registered target.
pub type TargetHandle = Rc<RefCell<dyn ArgumentTarget>>;

#[derive(Debug, Clone)]
struct Registration {
    type_id: TypeId,
    handle: Weak<RefCell<dyn ArgumentTarget>>,
}

/// Registry of targets tracked without owning them.
#[derive(Debug, Clone, Default)]
pub struct InstanceRegistry {
    registrations: Vec<Registration>,
}

impl InstanceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks `target` without extending its lifetime.
    pub fn register<T: ArgumentTarget>(&mut self, target: &Rc<RefCell<T>>) {
        let handle: Weak<RefCell<T>> = Rc::downgrade(target);
        self.registrations.push(Registration {
            type_id: TypeId::of::<T>(),
            handle,
        });
    }

    /// Tracks an already-downgraded handle; a dead handle is ignored.
    pub fn register_weak<T: ArgumentTarget>(&mut self, target: Weak<RefCell<T>>) {
        if target.strong_count() == 0 {
            return;
        }
        self.registrations.push(Registration {
            type_id: TypeId::of::<T>(),
            handle: target,
        });
    }

    fn prune(&mut self) {
        self.registrations
            .retain(|registration| registration.handle.strong_count() > 0);
    }

    /// Upgrades every live target, forgetting the dead ones.
    pub fn live_instances(&mut self) -> Vec<TargetHandle> {
        self.prune();
        self.registrations
            .iter()
            .filter_map(|registration| registration.handle.upgrade())
            .collect()
    }

    /// Live targets paired with their concrete type.
    pub(crate) fn live_entries(&mut self) -> Vec<(TypeId, TargetHandle)> {
        self.prune();
        self.registrations
            .iter()
            .filter_map(|registration| {
                registration
                    .handle
                    .upgrade()
                    .map(|handle| (registration.type_id, handle))
            })
            .collect()
    }

    /// Distinct types of the live targets, in registration order.
    pub fn live_types(&mut self) -> Vec<TypeId> {
        self.prune();
        let mut types: Vec<TypeId> = Vec::new();
        for registration in &self.registrations {
            if !types.contains(&registration.type_id) {
                types.push(registration.type_id);
            }
        }
        types
    }

    /// Number of live targets.
    pub fn len(&mut self) -> usize {
        self.prune();
        self.registrations.len()
    }

    /// Returns `true` when no live targets remain.
    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }
}
