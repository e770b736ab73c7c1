// Copyright 2018 The GeoRust Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fixed-capacity, open-addressed hash structures with caller-supplied hash
//! and equality functions.
//!
//! The topology builder keys these tables by raw points, quantized points
//! and arc descriptors, all of which need structural rather than derived
//! equality, so both functions are parameters instead of trait bounds.
//! There is no rehashing: callers size a table once from an upper bound on
//! the number of distinct keys it will hold.

use crate::Error;

const LOAD_FACTOR: f64 = 0.75;

fn capacity_for(size: usize) -> usize {
    let slots = (size as f64 / LOAD_FACTOR).ceil() as usize;
    slots.next_power_of_two().max(16)
}

/// Linear-probing key/value table.
pub struct HashMap<K, V, H, E> {
    slots: Vec<Option<(K, V)>>,
    hash: H,
    equal: E,
}

impl<K, V, H, E> HashMap<K, V, H, E>
where
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    /// Creates a table able to hold at least `size` distinct keys. The
    /// capacity is rounded up to a power of two and is never below 16.
    ///
    /// `hash` may return any value; the table reduces it modulo its
    /// capacity. `equal` decides whether a probed slot matches.
    pub fn new(size: usize, hash: H, equal: E) -> Self {
        let capacity = capacity_for(size);
        let mut slots = Vec::new();
        slots.resize_with(capacity, || None);
        HashMap { slots, hash, equal }
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.find(key)?;
        self.slots[index].as_ref().map(|(_, value)| value)
    }

    /// Mutable variant of [`HashMap::get`].
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.find(key)?;
        self.slots[index].as_mut().map(|(_, value)| value)
    }

    /// Inserts or overwrites `key`, returning the stored value.
    ///
    /// Fails with [`Error::HashTableFull`] when the probe traverses the
    /// whole table without finding a free or matching slot. Overwriting an
    /// existing key succeeds even then.
    pub fn set(&mut self, key: K, value: V) -> Result<&mut V, Error> {
        let index = self.free_or_match(&key)?;
        let slot = &mut self.slots[index];
        match slot {
            Some((_, existing)) => *existing = value,
            None => *slot = Some((key, value)),
        }
        Ok(&mut slot.as_mut().unwrap().1)
    }

    /// Like [`HashMap::set`], but keeps the existing value when `key` is
    /// already present.
    pub fn maybe_set(&mut self, key: K, value: V) -> Result<&mut V, Error> {
        let index = self.free_or_match(&key)?;
        let slot = &mut self.slots[index];
        if slot.is_none() {
            *slot = Some((key, value));
        }
        Ok(&mut slot.as_mut().unwrap().1)
    }

    fn find(&self, key: &K) -> Option<usize> {
        let mask = self.slots.len() - 1;
        let mut index = (self.hash)(key) as usize & mask;
        let mut collisions = 0;
        while let Some((occupant, _)) = &self.slots[index] {
            if (self.equal)(occupant, key) {
                return Some(index);
            }
            collisions += 1;
            if collisions >= self.slots.len() {
                return None;
            }
            index = (index + 1) & mask;
        }
        None
    }

    fn free_or_match(&self, key: &K) -> Result<usize, Error> {
        let mask = self.slots.len() - 1;
        let mut index = (self.hash)(key) as usize & mask;
        let mut collisions = 0;
        loop {
            match &self.slots[index] {
                Some((occupant, _)) => {
                    if (self.equal)(occupant, key) {
                        return Ok(index);
                    }
                    collisions += 1;
                    if collisions >= self.slots.len() {
                        return Err(Error::HashTableFull);
                    }
                    index = (index + 1) & mask;
                }
                None => return Ok(index),
            }
        }
    }
}

/// [`HashMap`] with a unit value.
pub struct HashSet<K, H, E> {
    map: HashMap<K, (), H, E>,
}

impl<K, H, E> HashSet<K, H, E>
where
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    pub fn new(size: usize, hash: H, equal: E) -> Self {
        HashSet {
            map: HashMap::new(size, hash, equal),
        }
    }

    /// Adds `key`, returning `true` whether it was inserted or already
    /// present. Fails with [`Error::HashTableFull`] under the same
    /// condition as [`HashMap::set`].
    pub fn add(&mut self, key: K) -> Result<bool, Error> {
        self.map.set(key, ())?;
        Ok(true)
    }

    pub fn has(&self, key: &K) -> bool {
        self.map.get(key).is_some()
    }
}

/// Mixes the IEEE-754 bit patterns of both coordinates into a nonnegative
/// integer. Tables reduce the result modulo their capacity, so only the low
/// bits need to spread.
pub fn hash_point(point: &[f64; 2]) -> u64 {
    let x = point[0].to_bits();
    let y = point[1].to_bits();
    let mut hash = (x as u32) ^ (y as u32);
    hash = (hash << 5) ^ (hash >> 7) ^ ((x >> 32) as u32) ^ ((y >> 32) as u32);
    u64::from(hash & 0x7fff_ffff)
}

/// Exact comparison on both coordinates. Equality is bit-exact: it is only
/// robust against coincident-but-differently-computed points once the
/// coordinates have been snapped to a quantization grid.
pub fn equal_point(a: &[f64; 2], b: &[f64; 2]) -> bool {
    a[0] == b[0] && a[1] == b[1]
}

pub(crate) type PointHash = fn(&[f64; 2]) -> u64;
pub(crate) type PointEqual = fn(&[f64; 2], &[f64; 2]) -> bool;

/// Point-keyed set used for junctions.
pub(crate) type PointSet = HashSet<[f64; 2], PointHash, PointEqual>;

#[cfg(test)]
mod tests {
    use super::{equal_point, hash_point, HashMap, HashSet};
    use crate::Error;

    // A key carrying its own hash, so collisions can be forced.
    type Key = (u64, u32);

    fn hash(key: &Key) -> u64 {
        key.0
    }

    fn equal(a: &Key, b: &Key) -> bool {
        a == b
    }

    fn map() -> HashMap<Key, i32, fn(&Key) -> u64, fn(&Key, &Key) -> bool> {
        HashMap::new(10, hash, equal)
    }

    fn set() -> HashSet<Key, fn(&Key) -> u64, fn(&Key, &Key) -> bool> {
        HashSet::new(10, hash, equal)
    }

    #[test]
    fn hashmap_can_get_an_object_by_key() {
        let mut map = map();
        map.set((1, 0), 42).unwrap();
        assert_eq!(map.get(&(1, 0)), Some(&42));
    }

    #[test]
    fn hashmap_get_returns_none_when_no_key_is_found() {
        let map = map();
        assert_eq!(map.get(&(1, 0)), None);
    }

    #[test]
    fn hashmap_get_checks_equality_on_hash_collision() {
        let mut map = HashMap::new(10, hash, equal);
        map.set((1, 0), 'A').unwrap();
        map.set((1, 1), 'B').unwrap();
        assert_eq!(map.get(&(1, 0)), Some(&'A'));
        assert_eq!(map.get(&(1, 1)), Some(&'B'));
        assert_eq!(map.get(&(1, 2)), None);
    }

    #[test]
    fn hashmap_set_returns_the_set_value() {
        let mut map = map();
        assert_eq!(*map.set((1, 0), 42).unwrap(), 42);
    }

    #[test]
    fn hashmap_set_overwrites() {
        let mut map = map();
        map.set((1, 0), 1).unwrap();
        map.set((1, 0), 2).unwrap();
        assert_eq!(map.get(&(1, 0)), Some(&2));
    }

    #[test]
    fn hashmap_maybe_set_keeps_the_existing_value() {
        let mut map = map();
        assert_eq!(*map.maybe_set((1, 0), 42).unwrap(), 42);
        assert_eq!(*map.maybe_set((1, 0), 43).unwrap(), 42);
        assert_eq!(map.get(&(1, 0)), Some(&42));
    }

    #[test]
    fn hashmap_set_fails_when_full() {
        // Minimum capacity of 16.
        let mut map: HashMap<Key, bool, _, _> = HashMap::new(0, hash, equal);
        for i in 0..16 {
            map.set((i, 0), true).unwrap();
        }
        // Replacing an existing key is still okay.
        for i in 0..16 {
            map.set((i, 0), true).unwrap();
        }
        assert_eq!(map.set((16, 0), true).unwrap_err(), Error::HashTableFull);
    }

    #[test]
    fn hashmap_reduces_the_hash_modulo_capacity() {
        // Requested size 10 rounds up to capacity 16; a hash of 11 must
        // land inside the table.
        let mut map = map();
        assert_eq!(map.get(&(11, 0)), None);
        assert_eq!(*map.set((11, 0), 42).unwrap(), 42);
        assert_eq!(map.get(&(11, 0)), Some(&42));
    }

    #[test]
    fn hashset_can_add_and_query() {
        let mut set = set();
        assert!(set.add((1, 0)).unwrap());
        assert!(set.has(&(1, 0)));
        assert!(!set.has(&(2, 0)));
    }

    #[test]
    fn hashset_checks_equality_on_hash_collision() {
        let mut set = set();
        set.add((1, 0)).unwrap();
        set.add((1, 1)).unwrap();
        assert!(set.has(&(1, 0)));
        assert!(set.has(&(1, 1)));
        assert!(!set.has(&(1, 2)));
    }

    #[test]
    fn hashset_add_fails_when_full() {
        let mut set: HashSet<Key, _, _> = HashSet::new(0, hash, equal);
        for i in 0..16 {
            set.add((i, 0)).unwrap();
        }
        for i in 0..16 {
            set.add((i, 0)).unwrap();
        }
        assert_eq!(set.add((16, 0)).unwrap_err(), Error::HashTableFull);
    }

    #[test]
    fn point_hash_and_equality_agree() {
        let a = [1.5, -2.5];
        let b = [1.5, -2.5];
        assert!(equal_point(&a, &b));
        assert_eq!(hash_point(&a), hash_point(&b));
        assert!(!equal_point(&a, &[1.5, 2.5]));
    }
}
