//! Vertex deduplication for the AMR builder.

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;

/// Maps a global vertex key to its index in the output point table.
///
/// Indices are handed out in first-seen order and never change. There is no removal: a map
/// lives for the duration of one `write` call.
#[derive(Debug, Default, Clone)]
pub struct VertexMap {
    map: HashMap<u64, usize>,
}

impl VertexMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// index of `key`, registering it as the next point if it was not seen before.
    /// The flag is `true` when the key was new.
    pub fn lookup_or_register(&mut self, key: u64) -> (usize, bool) {
        let next = self.map.len();
        match self.map.entry(key) {
            Entry::Occupied(entry) => (*entry.get(), false),
            Entry::Vacant(entry) => {
                entry.insert(next);
                (next, true)
            }
        }
    }

    pub fn get(&self, key: u64) -> Option<usize> {
        self.map.get(&key).copied()
    }

    pub fn contains(&self, key: u64) -> bool {
        self.map.contains_key(&key)
    }

    /// number of registered vertices
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seen_order() {
        let mut map = VertexMap::new();
        assert_eq!(map.lookup_or_register(40), (0, true));
        assert_eq!(map.lookup_or_register(7), (1, true));
        assert_eq!(map.lookup_or_register(40), (0, false));
        assert_eq!(map.lookup_or_register(3), (2, true));

        assert_eq!(map.len(), 3);
        assert_eq!(map.get(7), Some(1));
        assert_eq!(map.get(8), None);
    }
}
