// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use crate::common::{ScopeId, Uid};
use crate::datamodel::{
    CustomData, ElementDescriptor, NodeDescriptor, NodeKind, NodeOverride, ScopeDescriptor,
};
use crate::host::Host;

pub(crate) fn x_node(kind: NodeKind, x: f64, y: f64, connections: &[usize]) -> NodeDescriptor {
    NodeDescriptor {
        x,
        y,
        kind,
        label: None,
        connections: connections.to_vec(),
    }
}

pub(crate) fn x_element(nodes: &[(&str, NodeOverride)]) -> ElementDescriptor {
    let custom = CustomData {
        constructor_params: vec![],
        values: BTreeMap::new(),
        nodes: nodes
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    };
    ElementDescriptor {
        x: 200.0,
        y: 100.0,
        label: None,
        label_direction: None,
        propagation_delay: None,
        custom_data: Some(custom),
        subcircuit: None,
    }
}

/// Two Inputs feeding an AndGate feeding an Output, all pins saved in
/// `allNodes` and rebound through node overrides.
pub(crate) fn x_and_scope_descriptor() -> ScopeDescriptor {
    let all_nodes = vec![
        x_node(NodeKind::InputPort, 190.0, 90.0, &[2]), // and.inp[0]
        x_node(NodeKind::InputPort, 190.0, 110.0, &[3]), // and.inp[1]
        x_node(NodeKind::OutputPort, 110.0, 90.0, &[0]), // input0.output1
        x_node(NodeKind::OutputPort, 110.0, 110.0, &[1]), // input1.output1
        x_node(NodeKind::OutputPort, 220.0, 100.0, &[5]), // and.output1
        x_node(NodeKind::InputPort, 290.0, 100.0, &[4]), // output.inp1
    ];

    let mut elements = BTreeMap::new();
    elements.insert(
        "Input".to_owned(),
        vec![
            x_element(&[("output1", NodeOverride::One(2))]),
            x_element(&[("output1", NodeOverride::One(3))]),
        ],
    );
    elements.insert(
        "Output".to_owned(),
        vec![x_element(&[("inp1", NodeOverride::One(5))])],
    );
    elements.insert(
        "AndGate".to_owned(),
        vec![x_element(&[
            ("inp", NodeOverride::Many(vec![0, 1])),
            ("output1", NodeOverride::One(4)),
        ])],
    );

    ScopeDescriptor {
        name: "main".to_owned(),
        id: 1,
        all_nodes,
        elements,
        ..Default::default()
    }
}

/// Records every collaborator call, for asserting on the notification
/// sequence a load produces.
pub(crate) struct RecordingHost {
    pub calls: Vec<String>,
    pub embedded: bool,
    next_id: Uid,
}

impl RecordingHost {
    pub fn new() -> RecordingHost {
        RecordingHost {
            calls: Vec::new(),
            embedded: false,
            next_id: 1,
        }
    }

    pub fn embedded() -> RecordingHost {
        RecordingHost {
            embedded: true,
            ..RecordingHost::new()
        }
    }
}

impl Host for RecordingHost {
    fn generate_unique_id(&mut self) -> Uid {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn switch_focus(&mut self, scope: ScopeId) {
        self.calls.push(format!("switch_focus({scope})"));
    }

    fn schedule_evaluation(&mut self, scope: ScopeId, immediate: bool) {
        self.calls
            .push(format!("schedule_evaluation({scope}, {immediate})"));
    }

    fn schedule_backup_snapshot(&mut self) {
        self.calls.push("schedule_backup_snapshot".to_owned());
    }

    fn refresh_restricted_indicator(&mut self) {
        self.calls.push("refresh_restricted_indicator".to_owned());
    }

    fn recenter_view(&mut self, scope: ScopeId, embedded: bool) {
        self.calls
            .push(format!("recenter_view({scope}, {embedded})"));
    }

    fn reset_view_pan(&mut self) {
        self.calls.push("reset_view_pan".to_owned());
    }

    fn flag_dirty(&mut self, subsystem: crate::host::Subsystem) {
        self.calls.push(format!("flag_dirty({subsystem:?})"));
    }

    fn is_embedded(&self) -> bool {
        self.embedded
    }
}
