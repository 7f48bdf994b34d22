use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

pub type NodeId = u32;
pub type OpenableId = u32;

/// A position in model space, in millimetres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, o: Point) -> Point {
        Point::new(self.x + o.x, self.y + o.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, o: Point) -> Point {
        Point::new(self.x - o.x, self.y - o.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, s: f64) -> Point {
        Point::new(self.x * s, self.y * s)
    }
}

/// Canonical key of an undirected edge: always `id1 < id2`.
///
/// The only way to build one is [`EdgeKey::new`], so every stored or
/// referenced edge goes through the same ordering rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "[NodeId; 2]", into = "[NodeId; 2]")]
pub struct EdgeKey {
    id1: NodeId,
    id2: NodeId,
}

impl EdgeKey {
    /// `None` for a self-loop.
    #[inline]
    pub fn new(a: NodeId, b: NodeId) -> Option<Self> {
        if a == b {
            return None;
        }
        Some(EdgeKey {
            id1: a.min(b),
            id2: a.max(b),
        })
    }
    #[inline]
    pub fn id1(&self) -> NodeId {
        self.id1
    }
    #[inline]
    pub fn id2(&self) -> NodeId {
        self.id2
    }
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.id1 == id || self.id2 == id
    }
    /// The endpoint that is not `id`, if `id` is an endpoint.
    #[inline]
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if id == self.id1 {
            Some(self.id2)
        } else if id == self.id2 {
            Some(self.id1)
        } else {
            None
        }
    }
}

impl TryFrom<[NodeId; 2]> for EdgeKey {
    type Error = &'static str;
    fn try_from([a, b]: [NodeId; 2]) -> Result<Self, Self::Error> {
        EdgeKey::new(a, b).ok_or("edge endpoints must differ")
    }
}

impl From<EdgeKey> for [NodeId; 2] {
    fn from(k: EdgeKey) -> Self {
        [k.id1, k.id2]
    }
}

/// Snap targets recorded while a node is dragged.
///
/// `node_x` and `node_y` name the same node for a full node-to-node snap and
/// may name different nodes for independent axis alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SnapState {
    pub node_x: Option<NodeId>,
    pub node_y: Option<NodeId>,
    pub edge: Option<EdgeKey>,
    pub pos: Option<f64>,
}

impl SnapState {
    /// Target of a full 2-D snap onto another node.
    pub fn full_node(&self) -> Option<NodeId> {
        match (self.node_x, self.node_y) {
            (Some(x), Some(y)) if x == y => Some(x),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CornerNode {
    pub id: NodeId,
    pub position: Point,
    /// Screen-space drag accumulator; never persisted.
    pub delta: Point,
    pub translating: bool,
    pub extending: bool,
    pub pending_remove: bool,
    pub snap: SnapState,
}

impl CornerNode {
    pub fn new(id: NodeId, position: Point) -> Self {
        CornerNode {
            id,
            position,
            delta: Point::default(),
            translating: false,
            extending: false,
            pending_remove: false,
            snap: SnapState::default(),
        }
    }

    pub fn reset_interaction(&mut self) {
        self.pending_remove = false;
        self.translating = false;
        self.extending = false;
        self.snap = SnapState::default();
        self.delta = Point::default();
    }
}

pub const DEFAULT_STROKE: &str = "black";

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub key: EdgeKey,
    pub stroke: String,
    /// Openables anchored on this wall, in attachment order.
    pub openables: Vec<OpenableId>,
}

impl Edge {
    pub fn new(key: EdgeKey) -> Self {
        Edge {
            key,
            stroke: DEFAULT_STROKE.to_string(),
            openables: Vec::new(),
        }
    }
    #[inline]
    pub fn id1(&self) -> NodeId {
        self.key.id1()
    }
    #[inline]
    pub fn id2(&self) -> NodeId {
        self.key.id2()
    }
}

/// Which way an openable faces relative to its host edge's `id1 -> id2` direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Forward = 0,
    Reverse = 1,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
        }
    }
    pub fn from_index(i: u8) -> Option<Self> {
        match i {
            0 => Some(Orientation::Forward),
            1 => Some(Orientation::Reverse),
            _ => None,
        }
    }
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenableSnap {
    pub edge: Option<EdgeKey>,
    /// Normalized position from the host's `id1` toward `id2`.
    pub pos: Option<f64>,
    pub orientation: Option<Orientation>,
}

impl OpenableSnap {
    pub fn clear(&mut self) {
        self.edge = None;
        self.pos = None;
        self.orientation = None;
    }
}

/// A door or window. Only the fields the graph reads or writes live here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Openable {
    pub width: f64,
    #[serde(default)]
    pub snap: OpenableSnap,
    #[serde(default)]
    pub position: Point,
    /// Degrees.
    #[serde(default)]
    pub angle: f64,
}

impl Openable {
    pub fn new(width: f64) -> Self {
        Openable {
            width,
            snap: OpenableSnap::default(),
            position: Point::default(),
            angle: 0.0,
        }
    }
}
