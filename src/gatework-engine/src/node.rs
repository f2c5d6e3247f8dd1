// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Live connection points and the arena that owns them.
//!
//! Node identity within a scope is positional: the i-th descriptor in
//! `allNodes` becomes the i-th allocation here.  Placeholder nodes created
//! during element construction live in the same arena and are tombstoned
//! when rewired away, so `NodeId`s stay stable across deletions.

use smallvec::SmallVec;

pub use crate::datamodel::NodeKind;

/// Index of a node's slot in its scope's arena; stable for the life of the
/// scope.
pub type NodeId = usize;

/// Index of an element in its scope's element list.
pub type ElementId = usize;

/// Who a node belongs to.  Nodes loaded from `allNodes` start out with the
/// generic default parent and are adopted by an element through rewiring;
/// a non-internal node still parented by the default after loading is
/// structurally invalid (see `Scope::repair`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeParent {
    Default,
    Element(ElementId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Position: absolute for boundary nodes, an offset from the owning
    /// element for element-owned ones.
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
    pub parent: NodeParent,
    pub connections: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub fn new(kind: NodeKind, x: f64, y: f64) -> Node {
        Node {
            kind,
            x,
            y,
            label: None,
            parent: NodeParent::Default,
            connections: SmallVec::new(),
        }
    }

    pub fn is_connected_to(&self, other: NodeId) -> bool {
        self.connections.contains(&other)
    }
}

/// Slot vector with tombstones: allocation index is the `NodeId`, deleted
/// slots stay behind as `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeArena {
    slots: Vec<Option<Node>>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        Default::default()
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        self.slots.push(Some(node));
        self.slots.len() - 1
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id).and_then(|slot| slot.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Tombstones the slot, returning the node that was there.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.slots.get_mut(id).and_then(|slot| slot.take())
    }

    /// Count of live (non-tombstoned) nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots ever allocated, including tombstones.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|node| (id, node)))
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.iter().map(|(id, _)| id).collect()
    }
}
