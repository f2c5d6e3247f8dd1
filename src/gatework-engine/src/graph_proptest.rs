// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Property-based tests for the graph invariants: connection symmetry
//! holds for arbitrary adjacency lists, rewiring preserves it, and
//! repair is idempotent no matter which nodes are orphaned.

use proptest::prelude::*;

use crate::datamodel::{NodeDescriptor, NodeKind};
use crate::node::NodeParent;

fn kind_strategy() -> impl Strategy<Value = NodeKind> {
    prop_oneof![
        Just(NodeKind::InputPort),
        Just(NodeKind::OutputPort),
        Just(NodeKind::Internal),
    ]
}

/// Up to 12 nodes whose adjacency lists reference arbitrary in-range
/// indices, forward references included.
fn nodes_strategy() -> impl Strategy<Value = Vec<NodeDescriptor>> {
    (1usize..12).prop_flat_map(|n| {
        proptest::collection::vec(
            (kind_strategy(), proptest::collection::vec(0..n, 0..4)).prop_map(
                |(kind, connections)| NodeDescriptor {
                    x: 0.0,
                    y: 0.0,
                    kind,
                    label: None,
                    connections,
                },
            ),
            n,
        )
    })
}

fn load_nodes(descs: &[NodeDescriptor]) -> crate::scope::Scope {
    let mut scope = crate::scope::Scope::new("prop", 1, false, false);
    for d in descs {
        scope.load_node(d);
    }
    for (i, d) in descs.iter().enumerate() {
        scope.construct_connections(i, d).unwrap();
    }
    scope
}

proptest! {
    #[test]
    fn prop_connections_are_symmetric(descs in nodes_strategy()) {
        let scope = load_nodes(&descs);
        prop_assert!(scope.connections_symmetric());
    }

    #[test]
    fn prop_rewire_preserves_symmetry_and_edges(
        descs in nodes_strategy(),
        target_seed in any::<proptest::sample::Index>(),
    ) {
        let mut scope = load_nodes(&descs);
        let target = scope.all_nodes[target_seed.index(scope.all_nodes.len())];
        let placeholder = {
            let mut node = crate::node::Node::new(NodeKind::InputPort, -10.0, 0.0);
            node.parent = NodeParent::Element(0);
            scope.nodes.alloc(node)
        };
        let had: Vec<_> = scope.nodes.get(target).unwrap().connections.to_vec();

        scope.rewire_node(placeholder, target).unwrap();

        prop_assert!(!scope.nodes.contains(placeholder));
        prop_assert!(scope.connections_symmetric());
        let node = scope.nodes.get(target).unwrap();
        prop_assert_eq!(NodeParent::Element(0), node.parent);
        for peer in had {
            prop_assert!(node.is_connected_to(peer));
        }
    }

    #[test]
    fn prop_repair_is_idempotent(descs in nodes_strategy()) {
        let mut scope = load_nodes(&descs);
        scope.repair();
        let once = scope.clone();
        scope.repair();
        prop_assert_eq!(once, scope);
    }

    #[test]
    fn prop_repair_only_deletes_orphan_pins(descs in nodes_strategy()) {
        let mut scope = load_nodes(&descs);
        let orphans = descs
            .iter()
            .filter(|d| d.kind != NodeKind::Internal)
            .count();
        scope.repair();
        prop_assert_eq!(descs.len() - orphans, scope.nodes.len());
        prop_assert!(scope.connections_symmetric());
        for (_, node) in scope.nodes.iter() {
            prop_assert_eq!(NodeKind::Internal, node.kind);
        }
    }
}
