// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of in-flight animations, at most one per element.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

/// Identifier for an entry in an [`AnimationRegistry`].
///
/// This is a slot index plus a generation counter. Removing an entry frees
/// its slot; reusing the slot bumps the generation, so stale ids never alias a
/// newer entry and removing through a stale id is a no-op.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct AnimationId(u32, u32);

impl AnimationId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Slot<K, V> {
    generation: u32,
    entry: Option<(K, V)>,
}

/// Arena of running animations keyed by element.
///
/// Lookup, insertion, and removal are constant time, by element key or by
/// [`AnimationId`].
#[derive(Clone, Debug)]
pub struct AnimationRegistry<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<u32>,
    by_key: HashMap<K, AnimationId>,
}

impl<K, V> Default for AnimationRegistry<K, V> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            by_key: HashMap::new(),
        }
    }
}

impl<K, V> AnimationRegistry<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of running entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns `true` when nothing is running.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Inserts `value` for `key`.
    ///
    /// Any entry already registered for `key` is removed first and returned,
    /// so the registry never holds two entries for one element.
    pub fn insert(&mut self, key: K, value: V) -> (AnimationId, Option<V>) {
        let displaced = self.remove_key(&key);
        let id = match self.free.pop() {
            Some(idx) => {
                let slot = &mut self.slots[idx as usize];
                slot.generation = slot.generation.wrapping_add(1);
                slot.entry = Some((key.clone(), value));
                AnimationId(idx, slot.generation)
            }
            None => {
                let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
                self.slots.push(Slot {
                    generation: 1,
                    entry: Some((key.clone(), value)),
                });
                AnimationId(idx, 1)
            }
        };
        self.by_key.insert(key, id);
        (id, displaced)
    }

    /// Returns the id registered for `key`.
    #[must_use]
    pub fn id_of(&self, key: &K) -> Option<AnimationId> {
        self.by_key.get(key).copied()
    }

    /// Returns `true` when `key` has a running entry.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.by_key.contains_key(key)
    }

    /// Returns the entry for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let id = self.id_of(key)?;
        self.get_by_id(id).map(|(_, v)| v)
    }

    /// Returns the entry for `id`, or `None` if it is stale.
    #[must_use]
    pub fn get_by_id(&self, id: AnimationId) -> Option<(&K, &V)> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.entry.as_ref().map(|(k, v)| (k, v))
    }

    /// Mutable access to the entry for `id`, or `None` if it is stale.
    pub fn get_mut_by_id(&mut self, id: AnimationId) -> Option<(&K, &mut V)> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.entry.as_mut().map(|(k, v)| (&*k, v))
    }

    /// Removes the entry for `id`. Stale ids are ignored.
    pub fn remove(&mut self, id: AnimationId) -> Option<(K, V)> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        let (key, value) = slot.entry.take()?;
        self.free.push(id.0);
        self.by_key.remove(&key);
        Some((key, value))
    }

    /// Removes the entry for `key`, if any.
    pub fn remove_key(&mut self, key: &K) -> Option<V> {
        let id = self.id_of(key)?;
        self.remove(id).map(|(_, v)| v)
    }

    /// Ids of all running entries, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = AnimationId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.entry.as_ref()?;
            u32::try_from(i).ok().map(|i| AnimationId(i, slot.generation))
        })
    }

    /// Keys of all running entries, in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.entry.as_ref().map(|(k, _)| k))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::AnimationRegistry;

    #[test]
    fn insert_twice_keeps_one_entry() {
        let mut reg = AnimationRegistry::new();
        let (first, displaced) = reg.insert("card", 1);
        assert!(displaced.is_none());
        let (second, displaced) = reg.insert("card", 2);
        assert_eq!(displaced, Some(1));
        assert_ne!(first, second);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(&"card"), Some(&2));
    }

    #[test]
    fn stale_ids_do_not_alias() {
        let mut reg = AnimationRegistry::new();
        let (a, _) = reg.insert(1_u32, "a");
        assert_eq!(reg.remove(a), Some((1, "a")));
        // Removing again is a no-op.
        assert_eq!(reg.remove(a), None);

        let (b, _) = reg.insert(2_u32, "b");
        assert_eq!(a.idx(), b.idx());
        assert!(reg.get_by_id(a).is_none());
        assert_eq!(reg.get_by_id(b), Some((&2, &"b")));
        assert_eq!(reg.remove(a), None);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn remove_key_and_iteration() {
        let mut reg = AnimationRegistry::new();
        for k in 0_u32..4 {
            reg.insert(k, k * 10);
        }
        assert_eq!(reg.remove_key(&2), Some(20));
        assert_eq!(reg.remove_key(&2), None);
        let mut keys: Vec<u32> = reg.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, [0, 1, 3]);
        assert_eq!(reg.ids().count(), 3);
        if let Some(id) = reg.id_of(&3) {
            if let Some((_, v)) = reg.get_mut_by_id(id) {
                *v += 1;
            }
        }
        assert_eq!(reg.get(&3), Some(&31));
    }
}
