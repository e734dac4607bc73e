//! Ordered key/value metadata attached to every graph entity.

use std::any::Any;
use std::fmt;

use super::types::id_hash;

/// One raw metadata entry.
///
/// The key hash is computed once at insertion and reused by every lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    key: String,
    key_hash: u64,
    value: String,
}

impl Pair {
    pub(crate) fn new(key: String, value: String) -> Self {
        let key_hash = id_hash(&key);
        Pair { key, key_hash, value }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn key_hash(&self) -> u64 {
        self.key_hash
    }
}

/// Ordered raw key/value pairs plus an optional typed payload.
///
/// Raw pairs and the payload coexist: a typed parse
/// ([`MetaCodec::parse_store`](crate::MetaCodec)) moves matched pairs into
/// the payload, while keys no descriptor claims stay raw forever and
/// round-trip through save/load unchanged. Duplicate keys are allowed;
/// lookup returns the first match.
#[derive(Default)]
pub struct MetaStore {
    pairs: Vec<Pair>,
    payload: Option<Box<dyn Any>>,
}

impl MetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw pair.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push(Pair::new(key.into(), value.into()));
    }

    /// Value of the first pair with this key, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        let hash = id_hash(key);
        self.pairs
            .iter()
            .find(|p| p.key_hash == hash && p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Raw pairs in insertion order.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Number of raw pairs (the typed payload does not count).
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Drop all raw pairs and the typed payload.
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.payload = None;
    }

    /// Typed payload, if one of this type has been created.
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_ref()?.downcast_ref::<T>()
    }

    pub fn payload_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.payload.as_mut()?.downcast_mut::<T>()
    }

    /// Typed payload, created with `T::default()` on first access.
    ///
    /// A payload of a different type is replaced.
    pub fn payload_or_default<T: Default + Any>(&mut self) -> &mut T {
        let slot = &mut self.payload;
        if slot.as_ref().map_or(true, |p| !p.is::<T>()) {
            *slot = Some(Box::new(T::default()));
        }
        slot.as_mut()
            .and_then(|p| p.downcast_mut::<T>())
            .expect("payload type ensured above")
    }

    /// Pairs and payload slot together, for callers that mutate both.
    pub(crate) fn split_mut(&mut self) -> (&mut Vec<Pair>, &mut Option<Box<dyn Any>>) {
        (&mut self.pairs, &mut self.payload)
    }
}

impl fmt::Debug for MetaStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaStore")
            .field("pairs", &self.pairs)
            .field("payload", &self.payload.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_get() {
        let mut data = MetaStore::new();
        data.add("name", "Alice");
        data.add("age", "30");

        assert_eq!(data.get("name"), Some("Alice"));
        assert_eq!(data.get("age"), Some("30"));
        assert_eq!(data.get("missing"), None);
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_duplicate_keys_first_match_wins() {
        let mut data = MetaStore::new();
        data.add("tag", "first");
        data.add("tag", "second");

        assert_eq!(data.get("tag"), Some("first"));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_pairs_keep_insertion_order() {
        let mut data = MetaStore::new();
        data.add("b", "2");
        data.add("a", "1");
        data.add("c", "3");

        let keys: Vec<&str> = data.pairs().iter().map(|p| p.key()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[derive(Default, Debug, PartialEq)]
    struct Payload {
        weight: f32,
        label: String,
    }

    #[test]
    fn test_payload_lazy_default() {
        let mut data = MetaStore::new();
        assert!(data.payload::<Payload>().is_none());

        data.payload_or_default::<Payload>().weight = 2.5;
        assert_eq!(data.payload::<Payload>().unwrap().weight, 2.5);

        // Second access keeps the existing payload
        data.payload_or_default::<Payload>().label = "x".to_string();
        let p = data.payload::<Payload>().unwrap();
        assert_eq!(p.weight, 2.5);
        assert_eq!(p.label, "x");
    }

    #[test]
    fn test_clear_drops_pairs_and_payload() {
        let mut data = MetaStore::new();
        data.add("k", "v");
        data.payload_or_default::<Payload>();

        data.clear();
        assert!(data.is_empty());
        assert!(data.payload::<Payload>().is_none());
    }
}
