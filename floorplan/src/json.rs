use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::LoadError;
use crate::geometry::limits::{in_coord_bounds, MAX_EDGES, MAX_NODES, STROKE_MAX_LEN};
use crate::model::{CornerNode, Edge, EdgeKey, NodeId, Point, DEFAULT_STROKE};
use crate::Graph;

pub fn to_json_impl(g: &Graph) -> Value {
    #[derive(Serialize)]
    struct NodeSer {
        id: NodeId,
        p: Point,
    }
    #[derive(Serialize)]
    struct EdgeSer<'a> {
        id1: NodeId,
        id2: NodeId,
        stroke: &'a str,
    }
    #[derive(Serialize)]
    struct Doc<'a> {
        nodes: BTreeMap<NodeId, NodeSer>,
        edges: BTreeMap<NodeId, BTreeMap<NodeId, EdgeSer<'a>>>,
    }

    let nodes = g
        .nodes()
        .map(|n| (n.id, NodeSer { id: n.id, p: n.position }))
        .collect();
    let mut edges: BTreeMap<NodeId, BTreeMap<NodeId, EdgeSer>> = BTreeMap::new();
    for e in g.edges() {
        edges.entry(e.id1()).or_default().insert(
            e.id2(),
            EdgeSer {
                id1: e.id1(),
                id2: e.id2(),
                stroke: &e.stroke,
            },
        );
    }
    // integer map keys are written as JSON strings; nothing here can fail
    serde_json::to_value(Doc { nodes, edges }).unwrap_or(Value::Null)
}

/// Map entries in document order with duplicate keys kept, so that they can
/// be rejected instead of silently overwritten.
struct Entries<T>(Vec<(String, T)>);

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Entries(Vec::new())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Entries<T> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<T>(PhantomData<T>);
        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = Entries<T>;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object keyed by node id")
            }
            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0).min(4096));
                while let Some((k, v)) = map.next_entry::<String, T>()? {
                    out.push((k, v));
                }
                Ok(Entries(out))
            }
        }
        d.deserialize_map(EntriesVisitor(PhantomData))
    }
}

#[derive(Deserialize)]
struct NodeDe {
    id: NodeId,
    p: Point,
}

fn default_stroke() -> String {
    DEFAULT_STROKE.to_string()
}

#[derive(Deserialize)]
struct EdgeDe {
    id1: NodeId,
    id2: NodeId,
    #[serde(default = "default_stroke")]
    stroke: String,
}

#[derive(Deserialize)]
struct DocDe {
    #[serde(default)]
    nodes: Entries<NodeDe>,
    #[serde(default)]
    edges: Entries<Entries<EdgeDe>>,
}

pub fn from_json_impl(v: Value) -> Result<Graph, LoadError> {
    build(DocDe::deserialize(v)?)
}

pub fn from_json_str_impl(s: &str) -> Result<Graph, LoadError> {
    build(serde_json::from_str::<DocDe>(s)?)
}

fn parse_key(key: &str) -> Result<NodeId, LoadError> {
    key.parse::<NodeId>()
        .map_err(|_| LoadError::InvalidKey(key.to_string()))
}

/// Validates the whole document into a fresh graph; the first violation
/// aborts the load.
fn build(doc: DocDe) -> Result<Graph, LoadError> {
    if doc.nodes.0.len() > MAX_NODES {
        return Err(LoadError::TooManyNodes(doc.nodes.0.len()));
    }
    let edge_total: usize = doc.edges.0.iter().map(|(_, b)| b.0.len()).sum();
    if edge_total > MAX_EDGES {
        return Err(LoadError::TooManyEdges(edge_total));
    }

    let mut g = Graph::new();
    for (key, n) in doc.nodes.0 {
        let k = parse_key(&key)?;
        if k != n.id {
            return Err(LoadError::NodeKeyMismatch { key: k, id: n.id });
        }
        if g.nodes.contains_key(&n.id) {
            return Err(LoadError::DuplicateNode(n.id));
        }
        if n.id == NodeId::MAX {
            return Err(LoadError::IdSpaceExhausted(n.id));
        }
        if !n.p.is_finite() {
            return Err(LoadError::NonFiniteCoordinate(n.id));
        }
        if !in_coord_bounds(n.p.x) || !in_coord_bounds(n.p.y) {
            return Err(LoadError::CoordinateOutOfRange(n.id));
        }
        g.nodes.insert(n.id, CornerNode::new(n.id, n.p));
    }
    g.next_id = g.nodes.keys().next_back().map_or(0, |&max| max + 1);

    for (key1, bucket) in doc.edges.0 {
        let k1 = parse_key(&key1)?;
        for (key2, e) in bucket.0 {
            let k2 = parse_key(&key2)?;
            if e.id1 != k1 || e.id2 != k2 {
                return Err(LoadError::EdgeKeyMismatch {
                    key1: k1,
                    key2: k2,
                    id1: e.id1,
                    id2: e.id2,
                });
            }
            let key = match EdgeKey::new(e.id1, e.id2) {
                Some(key) if key.id1() == e.id1 => key,
                _ => return Err(LoadError::NonCanonicalEdge { id1: e.id1, id2: e.id2 }),
            };
            if !g.nodes.contains_key(&e.id1) || !g.nodes.contains_key(&e.id2) {
                return Err(LoadError::DanglingEdge { id1: e.id1, id2: e.id2 });
            }
            if g.has_edge(key) {
                return Err(LoadError::DuplicateEdge { id1: e.id1, id2: e.id2 });
            }
            if e.stroke.is_empty() || e.stroke.len() > STROKE_MAX_LEN {
                return Err(LoadError::InvalidStroke { id1: e.id1, id2: e.id2 });
            }
            let mut edge = Edge::new(key);
            edge.stroke = e.stroke;
            g.edges.entry(key.id1()).or_default().insert(key.id2(), edge);
        }
    }
    Ok(g)
}
