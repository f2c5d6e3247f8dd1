// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! End-to-end: decode a persisted two-scope document and check the
//! reconstructed graph, layout, and project settings.

use gatework_engine::{DefaultHost, ElementType, NodeParent, Project};

// scope "main": two Inputs feeding a 2-input AndGate feeding an Output,
// every pin saved in allNodes and rebound via node overrides; scope
// "outer" embeds "main" as a subcircuit.  No layouts are persisted and
// the clock settings are absent.
const DOC: &str = r#"{
    "name": "two-scope",
    "scopes": [
        {
            "name": "main",
            "id": 1,
            "allNodes": [
                {"x": 190.0, "y": 90.0,  "type": 0, "connections": [2]},
                {"x": 190.0, "y": 110.0, "type": 0, "connections": [3]},
                {"x": 110.0, "y": 90.0,  "type": 1, "connections": [0]},
                {"x": 110.0, "y": 110.0, "type": 1, "connections": [1]},
                {"x": 220.0, "y": 100.0, "type": 1, "connections": [5]},
                {"x": 290.0, "y": 100.0, "type": 0, "connections": [4]}
            ],
            "Input": [
                {"x": 100.0, "y": 90.0,
                 "customData": {"constructorParams": ["RIGHT", 1],
                                "nodes": {"output1": 2}}},
                {"x": 100.0, "y": 110.0,
                 "customData": {"constructorParams": ["RIGHT", 1],
                                "nodes": {"output1": 3}}}
            ],
            "Output": [
                {"x": 300.0, "y": 100.0,
                 "customData": {"nodes": {"inp1": 5}}}
            ],
            "AndGate": [
                {"x": 200.0, "y": 100.0,
                 "customData": {"constructorParams": ["RIGHT", 2, 1],
                                "nodes": {"inp": [0, 1], "output1": 4}}}
            ]
        },
        {
            "name": "outer",
            "id": 2,
            "SubCircuit": [
                {"x": 400.0, "y": 200.0,
                 "subcircuitMetadata": {"scopeId": 1}}
            ]
        }
    ]
}"#;

#[test]
fn test_load_two_scope_project() {
    let mut project = Project::new();
    let mut host = DefaultHost::new();
    project.load_json(DOC.as_bytes(), &mut host).unwrap();
    assert!(project.errors.is_empty(), "{:?}", project.errors);

    assert_eq!("two-scope", project.name);
    // absent clock settings take the defaults
    assert_eq!(500, project.clock_period);
    assert!(project.clock_enabled);
    assert_eq!(Some(2), project.focused, "last loaded scope is focused");

    let main = project.scope(1).unwrap();
    assert!(main.connections_symmetric());

    // the AndGate's inputs are the pre-loaded nodes 0 and 1
    let and = main
        .elements
        .iter()
        .find(|e| e.kind == ElementType::AndGate)
        .unwrap();
    let inp = and.slot("inp").unwrap().node_ids();
    assert_eq!(vec![main.all_nodes[0], main.all_nodes[1]], inp);
    for &id in &inp {
        assert_eq!(
            NodeParent::Element(and.id),
            main.nodes.get(id).unwrap().parent
        );
    }

    // synthesized layout for 2 inputs / 1 output
    let layout = main.layout.as_ref().unwrap();
    assert_eq!(100.0, layout.width);
    assert_eq!(60.0, layout.height);
    assert!(layout.title_enabled);
    assert_eq!(20.0, layout.input_ports[0].y);
    assert_eq!(40.0, layout.input_ports[1].y);
    assert_eq!(30.0, layout.output_ports[0].y);
    assert_eq!(100.0, layout.output_ports[0].x);

    // the subcircuit's pins mirror main's layout ports
    let outer = project.scope(2).unwrap();
    let sub = &outer.elements[0];
    assert_eq!(ElementType::SubCircuit, sub.kind);
    assert_eq!(2, sub.slot("inputNodes").unwrap().node_ids().len());
    assert_eq!(1, sub.slot("outputNodes").unwrap().node_ids().len());
    let pin = sub.slot("inputNodes").unwrap().node_ids()[0];
    let node = outer.nodes.get(pin).unwrap();
    assert_eq!((0.0, 20.0), (node.x, node.y));
}

#[test]
fn test_wrong_scope_order_fails_with_missing_dependency() {
    // same document with the scope array reversed
    let mut wire: gatework_engine::json::Project = serde_json::from_str(DOC).unwrap();
    wire.scopes.reverse();
    let bytes = serde_json::to_vec(&wire).unwrap();

    let mut project = Project::new();
    let mut host = DefaultHost::new();
    project.load_json(&bytes, &mut host).unwrap();

    assert_eq!(1, project.errors.len());
    assert_eq!(
        gatework_engine::ErrorCode::MissingDependency,
        project.errors[0].code
    );
    // "main" still loaded; only "outer" was dropped
    assert!(project.scope(1).is_some());
    assert!(project.scope(2).is_none());
}
