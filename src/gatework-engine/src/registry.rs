// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The closed registry of element types: tag lookup, the rectification
//! table for deprecated tags, and the fixed load-order module list.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Every concrete element type this engine can instantiate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Input,
    Output,
    NotGate,
    Buffer,
    AndGate,
    NandGate,
    OrGate,
    NorGate,
    XorGate,
    XnorGate,
    TriState,
    ConstantVal,
    Clock,
    Ground,
    Power,
    Multiplexer,
    SubCircuit,
}

/// The global module-type list.  Scope loading iterates element categories
/// in exactly this order.
pub const MODULE_LIST: &[ElementType] = &[
    ElementType::Input,
    ElementType::Output,
    ElementType::NotGate,
    ElementType::Buffer,
    ElementType::AndGate,
    ElementType::NandGate,
    ElementType::OrGate,
    ElementType::NorGate,
    ElementType::XorGate,
    ElementType::XnorGate,
    ElementType::TriState,
    ElementType::ConstantVal,
    ElementType::Clock,
    ElementType::Ground,
    ElementType::Power,
    ElementType::Multiplexer,
    ElementType::SubCircuit,
];

lazy_static! {
    /// Deprecated type tag to its current replacement; applied before every
    /// registry lookup so old documents keep loading.
    static ref RECTIFICATIONS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("Inverter", "NotGate");
        m.insert("Constant", "ConstantVal");
        m.insert("TriStateBuffer", "TriState");
        m
    };
}

impl ElementType {
    pub fn tag(&self) -> &'static str {
        match self {
            ElementType::Input => "Input",
            ElementType::Output => "Output",
            ElementType::NotGate => "NotGate",
            ElementType::Buffer => "Buffer",
            ElementType::AndGate => "AndGate",
            ElementType::NandGate => "NandGate",
            ElementType::OrGate => "OrGate",
            ElementType::NorGate => "NorGate",
            ElementType::XorGate => "XorGate",
            ElementType::XnorGate => "XnorGate",
            ElementType::TriState => "TriState",
            ElementType::ConstantVal => "ConstantVal",
            ElementType::Clock => "Clock",
            ElementType::Ground => "Ground",
            ElementType::Power => "Power",
            ElementType::Multiplexer => "Multiplexer",
            ElementType::SubCircuit => "SubCircuit",
        }
    }

    pub fn is_subcircuit(&self) -> bool {
        matches!(self, ElementType::SubCircuit)
    }

    /// Default propagation delay, used when the descriptor doesn't carry an
    /// explicit one.
    pub fn default_delay(&self) -> u32 {
        use ElementType::*;
        match self {
            NotGate | Buffer | AndGate | NandGate | OrGate | NorGate | XorGate | XnorGate
            | TriState | Multiplexer => 10,
            Input | Output | ConstantVal | Clock | Ground | Power | SubCircuit => 0,
        }
    }

    /// A multi-input gate: fan-in comes from the `inputLength` constructor
    /// parameter.
    pub fn is_gate(&self) -> bool {
        use ElementType::*;
        matches!(
            self,
            AndGate | NandGate | OrGate | NorGate | XorGate | XnorGate
        )
    }
}

/// Maps a (possibly deprecated) type tag to its current equivalent.
pub fn rectify(tag: &str) -> &str {
    RECTIFICATIONS.get(tag).copied().unwrap_or(tag)
}

/// Resolves a type tag, applying rectification first.  `None` is the
/// expected, recoverable outcome for tags this build doesn't know; callers
/// record a diagnostic and skip the single element.
pub fn resolve(tag: &str) -> Option<ElementType> {
    let tag = rectify(tag);
    MODULE_LIST.iter().copied().find(|ty| ty.tag() == tag)
}
