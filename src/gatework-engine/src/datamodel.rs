// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Plain descriptor types for a serialized circuit project.
//!
//! These are the in-memory form of a persisted project document, with no
//! serialization concerns attached; the `json` module converts the wire
//! format into these types.  Reconstruction (`project::Project::load`)
//! consumes descriptors and never retains them afterwards.

use std::collections::BTreeMap;

use crate::common::{ScopeId, Uid};

/// The kind of a connection point.  Wire values are 0 (input-port),
/// 1 (output-port) and 2 (internal).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    InputPort,
    OutputPort,
    Internal,
}

impl NodeKind {
    pub fn from_wire(value: i64) -> Option<NodeKind> {
        match value {
            0 => Some(NodeKind::InputPort),
            1 => Some(NodeKind::OutputPort),
            2 => Some(NodeKind::Internal),
            _ => None,
        }
    }

    pub fn to_wire(self) -> i64 {
        match self {
            NodeKind::InputPort => 0,
            NodeKind::OutputPort => 1,
            NodeKind::Internal => 2,
        }
    }
}

/// Orientation of an element or label on the canvas.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn from_name(name: &str) -> Option<Direction> {
        match name {
            "RIGHT" => Some(Direction::Right),
            "LEFT" => Some(Direction::Left),
            "UP" => Some(Direction::Up),
            "DOWN" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Right => "RIGHT",
            Direction::Left => "LEFT",
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        }
    }

    /// Rotates an offset laid out facing `Right` into this orientation.
    pub fn rotate(self, dx: f64, dy: f64) -> (f64, f64) {
        match self {
            Direction::Right => (dx, dy),
            Direction::Left => (-dx, dy),
            Direction::Up => (dy, -dx),
            Direction::Down => (dy, dx),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
    Bool(bool),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A node-override entry: either a single node index or an ordered list of
/// them.  The index `-1` is a historical sentinel meaning "keep the freshly
/// constructed node".
#[derive(Clone, Debug, PartialEq)]
pub enum NodeOverride {
    One(i64),
    Many(Vec<i64>),
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct CustomData {
    /// Ordered values passed to the element type's constructor.
    pub constructor_params: Vec<PropertyValue>,
    /// Property overrides applied after construction.
    pub values: BTreeMap<String, PropertyValue>,
    /// Rebinds auto-created nodes onto previously loaded node identities.
    pub nodes: BTreeMap<String, NodeOverride>,
}

/// Referenced scope id plus presentation data; attached verbatim to any
/// element descriptor that carries it, but only meaningful for subcircuits.
#[derive(Clone, Debug, PartialEq)]
pub struct SubcircuitMetadata {
    pub scope_id: ScopeId,
    pub title_enabled: Option<bool>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElementDescriptor {
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
    pub label_direction: Option<Direction>,
    pub propagation_delay: Option<u32>,
    pub custom_data: Option<CustomData>,
    pub subcircuit: Option<SubcircuitMetadata>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeDescriptor {
    pub x: f64,
    pub y: f64,
    pub kind: NodeKind,
    pub label: Option<String>,
    /// Indices of other entries in the same scope's `all_nodes`, possibly
    /// forward references.
    pub connections: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct VerilogMetadata {
    pub is_verilog: bool,
    pub is_main: bool,
    pub code: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestbenchDescriptor {
    /// Opaque test-data blob; interpreted by the testbench UI, not by us.
    pub test_data: serde_json::Value,
    pub current_group: u32,
    pub current_case: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutPortDescriptor {
    pub id: Uid,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutDescriptor {
    pub width: f64,
    pub height: f64,
    pub title_x: f64,
    pub title_y: f64,
    pub title_enabled: Option<bool>,
    pub input_ports: Vec<LayoutPortDescriptor>,
    pub output_ports: Vec<LayoutPortDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ScopeDescriptor {
    /// Empty names become "Untitled" at load time.
    pub name: String,
    pub id: ScopeId,
    pub all_nodes: Vec<NodeDescriptor>,
    /// Element-type tag (possibly a legacy tag) to descriptors, in the
    /// array order the serializer emitted.
    pub elements: BTreeMap<String, Vec<ElementDescriptor>>,
    pub restricted_elements: Vec<String>,
    pub verilog: Option<VerilogMetadata>,
    pub testbench: Option<TestbenchDescriptor>,
    pub layout: Option<LayoutDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ProjectDescriptor {
    /// Empty names become "untitled" at load time.
    pub name: String,
    /// Clock period in simulation time units; 500 if absent.
    pub time_period: Option<u32>,
    /// Whether the clock ticks; enabled if absent.
    pub clock_enabled: Option<bool>,
    /// Persisted display ordering of scopes.
    pub tab_order: Option<Vec<ScopeId>>,
    /// Scope to focus once loading completes.
    pub focused_scope: Option<ScopeId>,
    /// Scopes in dependency order: a scope embedding another as a
    /// subcircuit must come after the scope it references.
    pub scopes: Vec<ScopeDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_wire_values() {
        assert_eq!(Some(NodeKind::InputPort), NodeKind::from_wire(0));
        assert_eq!(Some(NodeKind::OutputPort), NodeKind::from_wire(1));
        assert_eq!(Some(NodeKind::Internal), NodeKind::from_wire(2));
        assert_eq!(None, NodeKind::from_wire(3));
        assert_eq!(None, NodeKind::from_wire(-1));

        for kind in [NodeKind::InputPort, NodeKind::OutputPort, NodeKind::Internal] {
            assert_eq!(Some(kind), NodeKind::from_wire(kind.to_wire()));
        }
    }

    #[test]
    fn test_direction_rotate() {
        assert_eq!((-10.0, 10.0), Direction::Right.rotate(-10.0, 10.0));
        assert_eq!((10.0, 10.0), Direction::Left.rotate(-10.0, 10.0));
        assert_eq!((10.0, 10.0), Direction::Up.rotate(-10.0, 10.0));
        assert_eq!((10.0, -10.0), Direction::Down.rotate(-10.0, 10.0));
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Left, Direction::Right.opposite());
        assert_eq!(Direction::Right, Direction::Left.opposite());
        assert_eq!(Direction::Down, Direction::Up.opposite());
        assert_eq!(Direction::Up, Direction::Down.opposite());
    }
}
