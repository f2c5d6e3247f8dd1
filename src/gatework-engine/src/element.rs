// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Live circuit elements: typed construction from descriptor parameters,
//! property restoration, and orientation fixup.
//!
//! Construction allocates an element's pin nodes directly into the owning
//! scope's arena, laid out facing `Right`; `fix_direction` rotates them
//! into the element's actual orientation.  The pins created here are
//! placeholders: node overrides in the descriptor rebind slots onto
//! previously loaded node identities (see `Scope::rewire_node`).

use std::collections::BTreeMap;

use crate::common::Result;
use crate::datamodel::{PropertyValue, SubcircuitMetadata};
use crate::element_err;
use crate::layout::ScopeLayout;
use crate::node::{ElementId, Node, NodeArena, NodeId, NodeKind, NodeParent};
use crate::registry::ElementType;

pub use crate::datamodel::Direction;

/// A named pin slot: a single node or an ordered list of them.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotValue {
    One(NodeId),
    Many(Vec<NodeId>),
}

impl SlotValue {
    pub fn node_ids(&self) -> Vec<NodeId> {
        match self {
            SlotValue::One(id) => vec![*id],
            SlotValue::Many(ids) => ids.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementType,
    pub x: f64,
    pub y: f64,
    pub direction: Direction,
    pub label: Option<String>,
    pub label_direction: Direction,
    pub propagation_delay: u32,
    pub bit_width: u32,
    /// Gate fan-in; 1 for everything that isn't a multi-input gate.
    pub input_length: u32,
    /// Multiplexer select width.
    pub control_signal_size: u32,
    /// ConstantVal's emitted value.
    pub state: Option<String>,
    /// Property overrides we don't interpret, retained verbatim.
    pub extra_properties: BTreeMap<String, PropertyValue>,
    pub slots: BTreeMap<&'static str, SlotValue>,
    /// Attached verbatim from the descriptor; only meaningful for
    /// subcircuits, inert passthrough for everything else.
    pub subcircuit: Option<SubcircuitMetadata>,
}

fn param_direction(params: &[PropertyValue], i: usize, default: Direction) -> Result<Direction> {
    match params.get(i) {
        None => Ok(default),
        Some(PropertyValue::Text(name)) => match Direction::from_name(name) {
            Some(dir) => Ok(dir),
            None => element_err!(MalformedDescriptor, format!("bad direction {name:?}")),
        },
        Some(other) => element_err!(
            MalformedDescriptor,
            format!("constructor param {i}: expected direction, got {other:?}")
        ),
    }
}

/// Upper bound on bus widths and gate fan-in; saved documents never carry
/// more, so anything past it is corrupt.
const MAX_COUNT_PARAM: u32 = 32;

/// Multiplexer fan-in is `1 << controlSignalSize`, so the select width
/// gets a much tighter bound than the other counts.
const MAX_SELECT_WIDTH: u32 = 10;

fn param_count(params: &[PropertyValue], i: usize, default: u32) -> Result<u32> {
    match params.get(i) {
        None => Ok(default),
        Some(PropertyValue::Number(n))
            if n.fract() == 0.0 && *n >= 1.0 && *n <= MAX_COUNT_PARAM as f64 =>
        {
            Ok(*n as u32)
        }
        Some(other) => element_err!(
            MalformedDescriptor,
            format!("constructor param {i}: expected integer in 1..={MAX_COUNT_PARAM}, got {other:?}")
        ),
    }
}

fn param_state(params: &[PropertyValue], i: usize, default: &str) -> Result<String> {
    match params.get(i) {
        None => Ok(default.to_owned()),
        Some(PropertyValue::Text(s)) => Ok(s.clone()),
        Some(PropertyValue::Number(n)) => Ok(format!("{n}")),
        Some(other) => element_err!(
            MalformedDescriptor,
            format!("constructor param {i}: expected state, got {other:?}")
        ),
    }
}

impl Element {
    /// Constructs an element of any non-subcircuit type from its ordered
    /// constructor parameters, allocating placeholder pin nodes into
    /// `nodes`.  Parameters beyond what the type declares are ignored;
    /// missing ones take the type's defaults.
    pub fn construct(
        id: ElementId,
        kind: ElementType,
        x: f64,
        y: f64,
        params: &[PropertyValue],
        nodes: &mut NodeArena,
    ) -> Result<Element> {
        debug_assert!(!kind.is_subcircuit());
        use ElementType::*;

        let mut el = Element::empty(id, kind, x, y);

        match kind {
            Input => {
                el.direction = param_direction(params, 0, Direction::Right)?;
                el.bit_width = param_count(params, 1, 1)?;
                el.add_output(nodes, "output1", 10.0, 0.0);
            }
            Output => {
                el.direction = param_direction(params, 0, Direction::Left)?;
                el.bit_width = param_count(params, 1, 1)?;
                el.add_input(nodes, "inp1", -10.0, 0.0);
            }
            NotGate | Buffer => {
                el.direction = param_direction(params, 0, Direction::Right)?;
                el.bit_width = param_count(params, 1, 1)?;
                el.add_input(nodes, "inp1", -10.0, 0.0);
                el.add_output(nodes, "output1", 20.0, 0.0);
            }
            AndGate | NandGate | OrGate | NorGate | XorGate | XnorGate => {
                el.direction = param_direction(params, 0, Direction::Right)?;
                el.input_length = param_count(params, 1, 2)?;
                el.bit_width = param_count(params, 2, 1)?;
                el.add_input_row(nodes, el.input_length);
                el.add_output(nodes, "output1", 20.0, 0.0);
            }
            TriState => {
                el.direction = param_direction(params, 0, Direction::Right)?;
                el.bit_width = param_count(params, 1, 1)?;
                el.add_input(nodes, "inp1", -10.0, 0.0);
                el.add_output(nodes, "output1", 20.0, 0.0);
                el.add_input(nodes, "state", 0.0, -20.0);
            }
            ConstantVal => {
                el.direction = param_direction(params, 0, Direction::Right)?;
                el.bit_width = param_count(params, 1, 1)?;
                el.state = Some(param_state(params, 2, "0")?);
                el.add_output(nodes, "output1", 10.0, 0.0);
            }
            Clock => {
                el.direction = param_direction(params, 0, Direction::Right)?;
                el.add_output(nodes, "output1", 10.0, 0.0);
            }
            Ground => {
                el.bit_width = param_count(params, 0, 1)?;
                el.add_output(nodes, "output1", 0.0, 10.0);
            }
            Power => {
                el.bit_width = param_count(params, 0, 1)?;
                el.add_output(nodes, "output1", 0.0, -10.0);
            }
            Multiplexer => {
                el.direction = param_direction(params, 0, Direction::Right)?;
                el.bit_width = param_count(params, 1, 1)?;
                el.control_signal_size = param_count(params, 2, 1)?;
                if el.control_signal_size > MAX_SELECT_WIDTH {
                    return element_err!(
                        MalformedDescriptor,
                        format!(
                            "controlSignalSize {} exceeds {MAX_SELECT_WIDTH}",
                            el.control_signal_size
                        )
                    );
                }
                el.add_input_row(nodes, 1 << el.control_signal_size);
                el.add_output(nodes, "output1", 20.0, 0.0);
                el.add_input(nodes, "controlSignalInput", 0.0, 20.0);
            }
            SubCircuit => unreachable!("subcircuits use construct_subcircuit"),
        }

        el.label_direction = el.default_label_direction();
        el.propagation_delay = kind.default_delay();
        Ok(el)
    }

    /// Constructs a subcircuit element; its pins sit at the referenced
    /// scope's resolved layout port positions.
    pub fn construct_subcircuit(
        id: ElementId,
        x: f64,
        y: f64,
        layout: &ScopeLayout,
        nodes: &mut NodeArena,
    ) -> Element {
        let mut el = Element::empty(id, ElementType::SubCircuit, x, y);

        let inputs = layout
            .input_ports
            .iter()
            .map(|p| el.alloc_pin(nodes, NodeKind::InputPort, p.x, p.y))
            .collect();
        el.slots.insert("inputNodes", SlotValue::Many(inputs));

        let outputs = layout
            .output_ports
            .iter()
            .map(|p| el.alloc_pin(nodes, NodeKind::OutputPort, p.x, p.y))
            .collect();
        el.slots.insert("outputNodes", SlotValue::Many(outputs));

        el.label_direction = el.default_label_direction();
        el.propagation_delay = ElementType::SubCircuit.default_delay();
        el
    }

    fn empty(id: ElementId, kind: ElementType, x: f64, y: f64) -> Element {
        Element {
            id,
            kind,
            x,
            y,
            direction: Direction::Right,
            label: None,
            label_direction: Direction::Left,
            propagation_delay: 0,
            bit_width: 1,
            input_length: 1,
            control_signal_size: 1,
            state: None,
            extra_properties: BTreeMap::new(),
            slots: BTreeMap::new(),
            subcircuit: None,
        }
    }

    fn alloc_pin(&self, nodes: &mut NodeArena, kind: NodeKind, dx: f64, dy: f64) -> NodeId {
        let mut node = Node::new(kind, dx, dy);
        node.parent = NodeParent::Element(self.id);
        nodes.alloc(node)
    }

    fn add_input(&mut self, nodes: &mut NodeArena, name: &'static str, dx: f64, dy: f64) {
        let id = self.alloc_pin(nodes, NodeKind::InputPort, dx, dy);
        self.slots.insert(name, SlotValue::One(id));
    }

    fn add_output(&mut self, nodes: &mut NodeArena, name: &'static str, dx: f64, dy: f64) {
        let id = self.alloc_pin(nodes, NodeKind::OutputPort, dx, dy);
        self.slots.insert(name, SlotValue::One(id));
    }

    /// The `inp` slot: `n` pins at `x = -10`, vertically centered.
    fn add_input_row(&mut self, nodes: &mut NodeArena, n: u32) {
        let n = n as usize;
        let pins = (0..n)
            .map(|i| {
                let dy = 10.0 * (2.0 * i as f64 - (n as f64 - 1.0));
                self.alloc_pin(nodes, NodeKind::InputPort, -10.0, dy)
            })
            .collect();
        self.slots.insert("inp", SlotValue::Many(pins));
    }

    /// The direction this element faces for label placement; Ground and
    /// Power have a fixed facing.
    pub fn facing(&self) -> Direction {
        match self.kind {
            ElementType::Ground | ElementType::Power => Direction::Right,
            _ => self.direction,
        }
    }

    pub fn default_label_direction(&self) -> Direction {
        self.facing().opposite()
    }

    /// Rotates every pin's offset from the default `Right`-facing layout
    /// into this element's orientation.  Run exactly once, after
    /// construction and before node overrides are applied.
    pub fn fix_direction(&self, nodes: &mut NodeArena) {
        for id in self.node_ids() {
            if let Some(node) = nodes.get_mut(id) {
                let (x, y) = self.direction.rotate(node.x, node.y);
                node.x = x;
                node.y = y;
            }
        }
    }

    /// Applies one property override from the descriptor's custom payload.
    /// Recognized keys are interpreted; anything else is retained verbatim.
    pub fn set_property(&mut self, key: &str, value: &PropertyValue) -> Result<()> {
        match key {
            "bitWidth" => match value {
                PropertyValue::Number(n)
                    if n.fract() == 0.0 && *n >= 1.0 && *n <= MAX_COUNT_PARAM as f64 =>
                {
                    self.bit_width = *n as u32;
                    Ok(())
                }
                other => element_err!(
                    MalformedDescriptor,
                    format!("bitWidth: expected integer in 1..={MAX_COUNT_PARAM}, got {other:?}")
                ),
            },
            "state" if self.kind == ElementType::ConstantVal => match value {
                PropertyValue::Text(s) => {
                    self.state = Some(s.clone());
                    Ok(())
                }
                PropertyValue::Number(n) => {
                    self.state = Some(format!("{n}"));
                    Ok(())
                }
                other => element_err!(
                    MalformedDescriptor,
                    format!("state: expected text or number, got {other:?}")
                ),
            },
            _ => {
                self.extra_properties
                    .insert(key.to_owned(), value.clone());
                Ok(())
            }
        }
    }

    pub fn slot(&self, name: &str) -> Option<&SlotValue> {
        self.slots.get(name)
    }

    /// All pin node ids, across every slot.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.slots
            .values()
            .flat_map(|slot| slot.node_ids())
            .collect()
    }
}
