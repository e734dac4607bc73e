//! Field descriptor tables and the typed parse/write dispatch.
//!
//! A [`FieldTable`] projects an entity's raw metadata onto a caller-defined
//! record type, one descriptor per key. Parsing moves matched pairs out of
//! the raw list and into the typed payload; writing turns the payload back
//! into key/value output. Keys no descriptor claims never leave the raw
//! list, so unknown metadata survives any number of save/parse cycles.
//!
//! Tables are not persisted. A reader must register the same fields to
//! recover the same typed view of a file.

use std::any::Any;

use crate::graph::{id_hash, EdgeIdx, Graph, Library, MetaStore, NodeIdx};

/// Context handed to field parse/write closures.
///
/// Carries the enclosing graph so reference fields can resolve live node
/// ids; `node`/`edge` name the entity whose metadata is being processed
/// (both `None` for graph-level metadata).
pub struct FieldScope<'g> {
    pub graph: &'g Graph,
    pub node: Option<NodeIdx>,
    pub edge: Option<EdgeIdx>,
}

impl<'g> FieldScope<'g> {
    pub fn graph(graph: &'g Graph) -> Self {
        FieldScope { graph, node: None, edge: None }
    }

    pub fn node(graph: &'g Graph, idx: NodeIdx) -> Self {
        FieldScope { graph, node: Some(idx), edge: None }
    }

    pub fn edge(graph: &'g Graph, idx: EdgeIdx) -> Self {
        FieldScope { graph, node: None, edge: Some(idx) }
    }
}

type ParseFn<T> = Box<dyn Fn(&FieldScope, &str, &mut T) -> bool>;
type WriteFn<T> = Box<dyn Fn(&FieldScope, &T) -> Option<String>>;

struct Field<T> {
    key: String,
    key_hash: u64,
    parse: ParseFn<T>,
    write: WriteFn<T>,
}

/// Ordered field descriptors over a record type `T`.
///
/// Built with the typed registration methods (`float`, `int32`,
/// `node_ref`, ...) or [`custom`](Self::custom). The first descriptor
/// matching a key wins; registration order is also write order.
pub struct FieldTable<T> {
    fields: Vec<Field<T>>,
}

impl<T: Default + Any> FieldTable<T> {
    pub fn new() -> Self {
        FieldTable { fields: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Register a field with custom parse/write closures.
    ///
    /// `parse` returns false to leave the raw pair untouched. `write`
    /// returns `None` to omit the field from output entirely — the
    /// convention for default values, which a reader then restores by
    /// leaving the field defaulted.
    pub fn custom(
        mut self,
        key: &str,
        parse: impl Fn(&FieldScope, &str, &mut T) -> bool + 'static,
        write: impl Fn(&FieldScope, &T) -> Option<String> + 'static,
    ) -> Self {
        self.fields.push(Field {
            key: key.to_string(),
            key_hash: id_hash(key),
            parse: Box::new(parse),
            write: Box::new(write),
        });
        self
    }
}

impl<T: Default + Any> Default for FieldTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Object-safe seam between the codec and typed field tables, so save and
/// load paths can take `Option<&dyn MetaCodec>` without being generic over
/// record types.
pub trait MetaCodec {
    /// Move every descriptor-matched raw pair into the typed payload,
    /// creating the payload (all fields defaulted) if it does not exist.
    ///
    /// Pairs matching no descriptor, or whose parse reports failure, stay
    /// raw. Running this twice is a no-op: consumed pairs are gone and the
    /// existing payload is never reset.
    fn parse_store(&self, scope: &FieldScope, store: &mut MetaStore);

    /// Emit `(key, value)` for every non-default field of the payload, in
    /// registration order. Does nothing when the store has no payload of
    /// this table's record type.
    fn write_values(&self, scope: &FieldScope, store: &MetaStore, emit: &mut dyn FnMut(&str, &str));
}

impl<T: Default + Any> MetaCodec for FieldTable<T> {
    fn parse_store(&self, scope: &FieldScope, store: &mut MetaStore) {
        let (pairs, payload) = store.split_mut();

        if payload.as_ref().map_or(true, |p| !p.is::<T>()) {
            *payload = Some(Box::new(T::default()));
        }
        let record = payload
            .as_mut()
            .and_then(|p| p.downcast_mut::<T>())
            .expect("payload type ensured above");

        pairs.retain(|pair| {
            let matched = self
                .fields
                .iter()
                .find(|f| f.key_hash == pair.key_hash() && f.key == pair.key());
            match matched {
                Some(field) => !(field.parse)(scope, pair.value(), record),
                None => true,
            }
        });
    }

    fn write_values(&self, scope: &FieldScope, store: &MetaStore, emit: &mut dyn FnMut(&str, &str)) {
        let Some(record) = store.payload::<T>() else {
            return;
        };
        for field in &self.fields {
            if let Some(text) = (field.write)(scope, record) {
                emit(&field.key, &text);
            }
        }
    }
}

/// Optional field tables for each entity kind, passed to save and apply
/// operations. `Tables::default()` means "everything stays raw".
#[derive(Clone, Copy, Default)]
pub struct Tables<'a> {
    pub node: Option<&'a dyn MetaCodec>,
    pub edge: Option<&'a dyn MetaCodec>,
    pub graph: Option<&'a dyn MetaCodec>,
}

impl Graph {
    /// Run the supplied tables over this graph's own metadata and that of
    /// every node and edge, moving matched raw pairs into typed payloads.
    pub fn apply_tables(&mut self, tables: &Tables) {
        if let Some(codec) = tables.graph {
            let mut store = std::mem::take(&mut self.data);
            codec.parse_store(&FieldScope::graph(self), &mut store);
            self.data = store;
        }
        if let Some(codec) = tables.node {
            for i in 0..self.node_count() {
                let idx = NodeIdx::new(i as u32);
                let mut store = std::mem::take(&mut self.node_mut(idx).data);
                codec.parse_store(&FieldScope::node(self, idx), &mut store);
                self.node_mut(idx).data = store;
            }
        }
        if let Some(codec) = tables.edge {
            for i in 0..self.edge_count() {
                let idx = EdgeIdx::new(i as u32);
                let mut store = std::mem::take(&mut self.edge_mut(idx).data);
                codec.parse_store(&FieldScope::edge(self, idx), &mut store);
                self.edge_mut(idx).data = store;
            }
        }
    }
}

impl Library {
    /// [`Graph::apply_tables`] across every graph in the library.
    pub fn apply_tables(&mut self, tables: &Tables) {
        for graph in self.graphs_mut() {
            graph.apply_tables(tables);
        }
    }
}
