// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! A live scope (one circuit) and its reconstruction from a descriptor.
//!
//! Loading is strictly phased: all nodes are created first (identity is
//! positional, so adjacency lists may reference forward), then connected,
//! then elements are instantiated and their placeholder pins rebound onto
//! the pre-loaded nodes, then the graph is repaired and layout resolved.

use std::collections::HashSet;

use crate::common::{Error, ErrorCode, ErrorKind, Result, ScopeId};
use crate::datamodel::{
    CustomData, ElementDescriptor, NodeDescriptor, NodeOverride, ScopeDescriptor,
    TestbenchDescriptor, VerilogMetadata,
};
use crate::element::{Element, SlotValue};
use crate::host::Host;
use crate::layout::ScopeLayout;
use crate::node::{ElementId, Node, NodeArena, NodeId, NodeKind, NodeParent};
use crate::registry::{self, ElementType, MODULE_LIST};
use crate::scope_err;

/// A connection between two nodes, with endpoints derived once the scope
/// is fully loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Wire {
    pub a: NodeId,
    pub b: NodeId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Wire {
    fn new(a: NodeId, b: NodeId) -> Wire {
        Wire {
            a,
            b,
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: 0.0,
        }
    }
}

/// Restored testbench state, attached to the scope it was persisted with.
#[derive(Clone, Debug, PartialEq)]
pub struct TestbenchState {
    pub data: serde_json::Value,
    pub current_group: u32,
    pub current_case: u32,
}

impl From<&TestbenchDescriptor> for TestbenchState {
    fn from(d: &TestbenchDescriptor) -> Self {
        TestbenchState {
            data: d.test_data.clone(),
            current_group: d.current_group,
            current_case: d.current_case,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scope {
    pub name: String,
    pub id: ScopeId,
    pub nodes: NodeArena,
    /// Arena ids of the descriptor's `allNodes`, in descriptor order; the
    /// index base for adjacency lists and node overrides.
    pub all_nodes: Vec<NodeId>,
    pub elements: Vec<Element>,
    pub wires: Vec<Wire>,
    /// Input/Output elements in load order; their count drives layout
    /// synthesis.
    pub input_ports: Vec<ElementId>,
    pub output_ports: Vec<ElementId>,
    pub restricted_elements: Vec<String>,
    pub verilog: Option<VerilogMetadata>,
    pub testbench: Option<TestbenchState>,
    pub layout: Option<ScopeLayout>,
    /// Non-fatal diagnostics accumulated during loading.
    pub errors: Vec<Error>,
}

impl Scope {
    pub fn new(name: &str, id: ScopeId, is_verilog: bool, is_main: bool) -> Scope {
        let name = if name.is_empty() { "Untitled" } else { name };
        Scope {
            name: name.to_owned(),
            id,
            nodes: NodeArena::new(),
            all_nodes: Vec::new(),
            elements: Vec::new(),
            wires: Vec::new(),
            input_ports: Vec::new(),
            output_ports: Vec::new(),
            restricted_elements: Vec::new(),
            verilog: if is_verilog {
                Some(VerilogMetadata {
                    is_verilog,
                    is_main,
                    code: None,
                })
            } else {
                None
            },
            testbench: None,
            layout: None,
            errors: Vec::new(),
        }
    }

    /// Creates a live node from a descriptor and registers it, preserving
    /// descriptor order for later index-based lookup.  Connections come
    /// later, in a second pass.
    pub fn load_node(&mut self, d: &NodeDescriptor) -> NodeId {
        let mut node = Node::new(d.kind, d.x, d.y);
        node.label = d.label.clone();
        let id = self.nodes.alloc(node);
        self.all_nodes.push(id);
        id
    }

    /// Wires the i-th loaded node to every node its adjacency list names.
    /// Requires all of the scope's nodes to exist already: adjacency lists
    /// may reference forward.
    pub fn construct_connections(&mut self, i: usize, d: &NodeDescriptor) -> Result<()> {
        let a = self.all_nodes[i];
        for &j in &d.connections {
            if j >= self.all_nodes.len() {
                return scope_err!(
                    MalformedDescriptor,
                    format!("scope {:?}: node {i} connects to missing index {j}", self.name)
                );
            }
            self.connect_nodes(a, self.all_nodes[j]);
        }
        Ok(())
    }

    /// Symmetric connect: both endpoints list each other, exactly once.
    /// Self-connections are ignored.
    pub fn connect_nodes(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        let already = self
            .nodes
            .get(a)
            .map(|n| n.is_connected_to(b))
            .unwrap_or(true);
        if already {
            return;
        }
        if !self.nodes.contains(b) {
            return;
        }
        self.nodes.get_mut(a).unwrap().connections.push(b);
        self.nodes.get_mut(b).unwrap().connections.push(a);
        self.wires.push(Wire::new(a, b));
    }

    /// The only sanctioned way to change node identity after creation:
    /// `new` absorbs `old`'s edge set (every peer is repointed), adopts its
    /// parent and offset, and `old` is tombstoned.
    pub fn rewire_node(&mut self, old: NodeId, new: NodeId) -> Result<()> {
        if old == new {
            return Ok(());
        }
        let old_node = match self.nodes.remove(old) {
            Some(node) => node,
            None => {
                return scope_err!(MalformedDescriptor, format!("rewire of missing node {old}"));
            }
        };
        if !self.nodes.contains(new) {
            return scope_err!(
                MalformedDescriptor,
                format!("rewire target {new} is missing")
            );
        }

        for &peer in old_node.connections.iter() {
            if peer == new {
                // the old—new edge collapses into the node itself
                self.nodes
                    .get_mut(new)
                    .unwrap()
                    .connections
                    .retain(|&mut c| c != old);
                continue;
            }
            if let Some(peer_node) = self.nodes.get_mut(peer) {
                peer_node.connections.retain(|&mut c| c != old);
                if !peer_node.is_connected_to(new) {
                    peer_node.connections.push(new);
                }
            }
            let new_node = self.nodes.get_mut(new).unwrap();
            if !new_node.is_connected_to(peer) {
                new_node.connections.push(peer);
            }
        }

        // the pre-loaded node becomes the element's pin
        let new_node = self.nodes.get_mut(new).unwrap();
        new_node.parent = old_node.parent;
        new_node.x = old_node.x;
        new_node.y = old_node.y;

        for wire in self.wires.iter_mut() {
            if wire.a == old {
                wire.a = new;
            }
            if wire.b == old {
                wire.b = new;
            }
        }
        self.wires.retain(|w| w.a != w.b);
        let mut seen = HashSet::new();
        self.wires
            .retain(|w| seen.insert((w.a.min(w.b), w.a.max(w.b))));

        Ok(())
    }

    fn descriptor_node(&self, idx: i64) -> Result<NodeId> {
        if idx < 0 || idx as usize >= self.all_nodes.len() {
            return scope_err!(
                MalformedDescriptor,
                format!(
                    "scope {:?}: node override index {idx} out of range (have {})",
                    self.name,
                    self.all_nodes.len()
                )
            );
        }
        Ok(self.all_nodes[idx as usize])
    }

    /// Rebinds an element's freshly constructed pins onto the node
    /// identities the descriptor names.  Index `-1` keeps the placeholder.
    fn apply_node_overrides(&mut self, element: &mut Element, custom: &CustomData) -> Result<()> {
        for (key, over) in &custom.nodes {
            let slot = match element.slots.get_mut(key.as_str()) {
                Some(slot) => slot,
                None => {
                    return scope_err!(
                        MalformedDescriptor,
                        format!("scope {:?}: no node slot {key:?}", self.name)
                    );
                }
            };
            match (slot, over) {
                (SlotValue::One(current), NodeOverride::One(idx)) => {
                    if *idx == -1 {
                        continue;
                    }
                    let placeholder = *current;
                    let target = self.descriptor_node(*idx)?;
                    self.rewire_node(placeholder, target)?;
                    *element.slots.get_mut(key.as_str()).unwrap() = SlotValue::One(target);
                }
                (SlotValue::Many(current), NodeOverride::Many(indices)) => {
                    if current.len() != indices.len() {
                        return scope_err!(
                            MalformedDescriptor,
                            format!(
                                "scope {:?}: slot {key:?} has {} pins but override lists {}",
                                self.name,
                                current.len(),
                                indices.len()
                            )
                        );
                    }
                    let current = current.clone();
                    for (pos, &idx) in indices.iter().enumerate() {
                        if idx == -1 {
                            continue;
                        }
                        let target = self.descriptor_node(idx)?;
                        self.rewire_node(current[pos], target)?;
                        if let Some(SlotValue::Many(ids)) = element.slots.get_mut(key.as_str()) {
                            ids[pos] = target;
                        }
                    }
                }
                _ => {
                    return scope_err!(
                        MalformedDescriptor,
                        format!("scope {:?}: slot {key:?} shape mismatch", self.name)
                    );
                }
            }
        }
        Ok(())
    }

    /// Instantiates one element: construct, restore label/delay/properties,
    /// then rewire its placeholder pins onto pre-loaded nodes.  Subcircuits
    /// take their pin placement from the referenced scope's layout, which
    /// must already be reconstructed.
    pub fn load_element(
        &mut self,
        ty: ElementType,
        d: &ElementDescriptor,
        loaded: &[Scope],
    ) -> Result<()> {
        let id = self.elements.len();
        let custom = d.custom_data.clone().unwrap_or_default();

        let mut el = if ty.is_subcircuit() {
            let meta = match &d.subcircuit {
                Some(meta) => meta,
                None => {
                    return scope_err!(
                        MalformedDescriptor,
                        format!("scope {:?}: subcircuit without metadata", self.name)
                    );
                }
            };
            let referenced = loaded.iter().find(|s| s.id == meta.scope_id);
            let layout = match referenced.and_then(|s| s.layout.as_ref()) {
                Some(layout) => layout,
                None => {
                    return scope_err!(
                        MissingDependency,
                        format!(
                            "scope {:?}: subcircuit references scope {} which is not yet loaded",
                            self.name, meta.scope_id
                        )
                    );
                }
            };
            Element::construct_subcircuit(id, d.x, d.y, layout, &mut self.nodes)
        } else {
            Element::construct(id, ty, d.x, d.y, &custom.constructor_params, &mut self.nodes)?
        };

        if let Some(label) = &d.label {
            el.label = Some(label.clone());
        }
        el.label_direction = d
            .label_direction
            .unwrap_or_else(|| el.default_label_direction());
        el.propagation_delay = d.propagation_delay.unwrap_or_else(|| ty.default_delay());
        el.fix_direction(&mut self.nodes);

        for (key, value) in &custom.values {
            el.set_property(key, value)?;
        }
        self.apply_node_overrides(&mut el, &custom)?;
        el.subcircuit = d.subcircuit.clone();

        match ty {
            ElementType::Input => self.input_ports.push(id),
            ElementType::Output => self.output_ports.push(id),
            _ => {}
        }
        self.elements.push(el);
        Ok(())
    }

    /// Compatibility shim for a historical serializer defect: deletes
    /// nodes that claim to be element pins (non-internal kind) but are
    /// still parented by the generic default.  Deliberately narrow; this
    /// is not a general validator.
    pub fn repair(&mut self) {
        loop {
            let doomed: Vec<NodeId> = self
                .nodes
                .iter()
                .filter(|(_, n)| n.kind != NodeKind::Internal && n.parent == NodeParent::Default)
                .map(|(id, _)| id)
                .collect();
            if doomed.is_empty() {
                return;
            }
            // each deletion strictly shrinks the node set, so rescanning
            // after the batch terminates
            for id in doomed {
                self.delete_node(id);
            }
        }
    }

    fn delete_node(&mut self, id: NodeId) {
        let node = match self.nodes.remove(id) {
            Some(node) => node,
            None => return,
        };
        for &peer in node.connections.iter() {
            if let Some(peer_node) = self.nodes.get_mut(peer) {
                peer_node.connections.retain(|&mut c| c != id);
            }
        }
        self.wires.retain(|w| w.a != id && w.b != id);
    }

    /// Where a node sits on the canvas: element-owned nodes are offsets
    /// from their element, everything else is absolute.
    pub fn node_position(&self, id: NodeId) -> Option<(f64, f64)> {
        let node = self.nodes.get(id)?;
        match node.parent {
            NodeParent::Element(eid) => {
                let el = self.elements.get(eid)?;
                Some((el.x + node.x, el.y + node.y))
            }
            NodeParent::Default => Some((node.x, node.y)),
        }
    }

    /// Recomputes every wire's derived endpoints against the now-fully-
    /// loaded scope.
    pub fn update_wires(&mut self) {
        let endpoints: Vec<(Option<(f64, f64)>, Option<(f64, f64)>)> = self
            .wires
            .iter()
            .map(|w| (self.node_position(w.a), self.node_position(w.b)))
            .collect();
        for (wire, (a, b)) in self.wires.iter_mut().zip(endpoints) {
            if let Some((x, y)) = a {
                wire.x1 = x;
                wire.y1 = y;
            }
            if let Some((x, y)) = b {
                wire.x2 = x;
                wire.y2 = y;
            }
        }
    }

    /// Reconstructs this scope from its descriptor.  `loaded` holds the
    /// scopes already reconstructed this load, for subcircuit references.
    ///
    /// Fatal errors leave previously loaded scopes untouched; unresolved
    /// element types are recorded on `self.errors` and skipped.
    pub fn load_scope(
        &mut self,
        descriptor: &ScopeDescriptor,
        loaded: &[Scope],
        host: &mut dyn Host,
    ) -> Result<()> {
        self.restricted_elements = descriptor.restricted_elements.clone();

        for d in &descriptor.all_nodes {
            self.load_node(d);
        }
        for (i, d) in descriptor.all_nodes.iter().enumerate() {
            self.construct_connections(i, d)?;
        }

        // unknown tags (after rectification) drop the element, not the scope
        for (tag, descs) in &descriptor.elements {
            if registry::resolve(tag).is_none() {
                for _ in descs {
                    self.errors.push(Error::new(
                        ErrorKind::Element,
                        ErrorCode::UnresolvedType,
                        Some(format!(
                            "scope {:?}: unknown element type {tag:?}",
                            self.name
                        )),
                    ));
                }
            }
        }
        for &ty in MODULE_LIST {
            for (tag, descs) in &descriptor.elements {
                if registry::resolve(tag) != Some(ty) {
                    continue;
                }
                for (i, d) in descs.iter().enumerate() {
                    self.load_element(ty, d, loaded).map_err(|err| {
                        let details = err.details.unwrap_or_default();
                        Error::new(
                            err.kind,
                            err.code,
                            Some(format!("{tag}[{i}]: {details}")),
                        )
                    })?;
                }
            }
        }

        self.update_wires();
        self.repair();

        if let Some(verilog) = &descriptor.verilog {
            self.verilog = Some(verilog.clone());
        }
        // attached to the scope being loaded, never to the global focus
        if let Some(testbench) = &descriptor.testbench {
            self.testbench = Some(TestbenchState::from(testbench));
        }

        self.layout = Some(ScopeLayout::resolve(
            descriptor.layout.as_ref(),
            self.input_ports.len(),
            self.output_ports.len(),
            host,
        ));

        Ok(())
    }

    /// True iff every connection is mirrored by its peer.
    pub fn connections_symmetric(&self) -> bool {
        self.nodes.iter().all(|(id, node)| {
            node.connections.iter().all(|&peer| {
                self.nodes
                    .get(peer)
                    .map(|p| p.is_connected_to(id))
                    .unwrap_or(false)
            })
        })
    }
}
