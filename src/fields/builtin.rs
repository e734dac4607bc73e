//! Built-in field codecs.
//!
//! Each registration method wires a typed field to a key through plain
//! getter/setter fn pointers. All write paths share the omit-on-default
//! policy: a zero number, empty string, or `None` reference produces no
//! output line, and a missing key at parse time leaves the field at its
//! default.

use std::any::Any;

use super::table::FieldTable;
use crate::graph::NodeIdx;

impl<T: Default + Any> FieldTable<T> {
    /// Single `f32` field.
    pub fn float(self, key: &str, get: fn(&T) -> f32, set: fn(&mut T, f32)) -> Self {
        self.custom(
            key,
            move |_, text, record| match text.trim().parse::<f32>() {
                Ok(v) => {
                    set(record, v);
                    true
                }
                Err(_) => false,
            },
            move |_, record| {
                let v = get(record);
                (v != 0.0).then(|| v.to_string())
            },
        )
    }

    /// Two-component `f32` field, formatted `x, y`.
    pub fn float2(self, key: &str, get: fn(&T) -> [f32; 2], set: fn(&mut T, [f32; 2])) -> Self {
        self.custom(
            key,
            move |_, text, record| match parse_floats::<2>(text) {
                Some(v) => {
                    set(record, v);
                    true
                }
                None => false,
            },
            move |_, record| {
                let v = get(record);
                (v != [0.0; 2]).then(|| format!("{}, {}", v[0], v[1]))
            },
        )
    }

    /// Three-component `f32` field, formatted `x, y, z`.
    pub fn float3(self, key: &str, get: fn(&T) -> [f32; 3], set: fn(&mut T, [f32; 3])) -> Self {
        self.custom(
            key,
            move |_, text, record| match parse_floats::<3>(text) {
                Some(v) => {
                    set(record, v);
                    true
                }
                None => false,
            },
            move |_, record| {
                let v = get(record);
                (v != [0.0; 3]).then(|| format!("{}, {}, {}", v[0], v[1], v[2]))
            },
        )
    }

    /// Signed 32-bit integer field.
    pub fn int32(self, key: &str, get: fn(&T) -> i32, set: fn(&mut T, i32)) -> Self {
        self.custom(
            key,
            move |_, text, record| match text.trim().parse::<i32>() {
                Ok(v) => {
                    set(record, v);
                    true
                }
                Err(_) => false,
            },
            move |_, record| {
                let v = get(record);
                (v != 0).then(|| v.to_string())
            },
        )
    }

    /// Owned string field. Empty strings are omitted on write.
    pub fn string(self, key: &str, get: fn(&T) -> &str, set: fn(&mut T, String)) -> Self {
        self.custom(
            key,
            move |_, text, record| {
                set(record, text.to_string());
                true
            },
            move |_, record| {
                let v = get(record);
                (!v.is_empty()).then(|| v.to_string())
            },
        )
    }

    /// Node reference, stored in the file as the node's id and resolved
    /// against the enclosing graph on parse.
    ///
    /// An id with no matching node fails the parse, leaving the pair raw
    /// and the field `None`. The resolved index obeys the usual handle
    /// rules: structural mutation of the graph invalidates it.
    pub fn node_ref(
        self,
        key: &str,
        get: fn(&T) -> Option<NodeIdx>,
        set: fn(&mut T, NodeIdx),
    ) -> Self {
        self.custom(
            key,
            move |scope, text, record| match scope.graph.find_node(text) {
                Some(idx) => {
                    set(record, idx);
                    true
                }
                None => false,
            },
            move |scope, record| get(record).map(|idx| scope.graph.node(idx).id().to_string()),
        )
    }
}

fn parse_floats<const N: usize>(text: &str) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    let mut parts = text.split(',');
    for slot in &mut out {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    Some(out)
}
