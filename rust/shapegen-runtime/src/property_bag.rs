//! Type-keyed storage for request-scoped configuration

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Holds at most one value per type.
#[derive(Default)]
pub struct PropertyBag {
    map: HashMap<TypeId, NamedValue>,
}

struct NamedValue {
    name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value`, returning the previous value of the same type.
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        self.map
            .insert(
                TypeId::of::<T>(),
                NamedValue {
                    name: std::any::type_name::<T>(),
                    value: Box::new(value),
                },
            )
            .and_then(|prev| prev.value.downcast().ok().map(|boxed| *boxed))
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.downcast_ref())
    }

    pub fn get_mut<T: Send + Sync + 'static>(&mut self) -> Option<&mut T> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.value.downcast_mut())
    }

    pub fn remove<T: Send + Sync + 'static>(&mut self) -> Option<T> {
        self.map
            .remove(&TypeId::of::<T>())
            .and_then(|entry| entry.value.downcast().ok().map(|boxed| *boxed))
    }

    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for PropertyBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.map.values().map(|entry| entry.name).collect();
        names.sort_unstable();
        f.debug_struct("PropertyBag").field("types", &names).finish()
    }
}

/// A [`PropertyBag`] shared between a request and the components that handle it.
///
/// Clones point at the same bag.
#[derive(Debug, Clone, Default)]
pub struct SharedPropertyBag(Arc<Mutex<PropertyBag>>);

impl SharedPropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the bag, recovering it if a previous holder panicked.
    pub fn acquire(&self) -> MutexGuard<'_, PropertyBag> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl From<PropertyBag> for SharedPropertyBag {
    fn from(bag: PropertyBag) -> Self {
        Self(Arc::new(Mutex::new(bag)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Region(&'static str);

    #[test]
    fn test_one_value_per_type() {
        let mut bag = PropertyBag::new();
        assert!(bag.insert(Region("us-west-2")).is_none());
        assert_eq!(bag.insert(Region("eu-west-1")), Some(Region("us-west-2")));
        bag.insert(42u32);

        assert_eq!(bag.len(), 2);
        assert_eq!(bag.get::<Region>(), Some(&Region("eu-west-1")));
        assert_eq!(bag.get::<u64>(), None);

        *bag.get_mut::<u32>().unwrap() += 1;
        assert_eq!(bag.remove::<u32>(), Some(43));
        assert!(!bag.contains::<u32>());
    }

    #[test]
    fn test_shared_bag_clones_share_state() {
        let shared = SharedPropertyBag::new();
        let handle = shared.clone();
        handle.acquire().insert(Region("ap-south-1"));

        assert_eq!(shared.acquire().get::<Region>(), Some(&Region("ap-south-1")));
        assert!(format!("{:?}", shared.acquire()).contains("Region"));
    }
}
