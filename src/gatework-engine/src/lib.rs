// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

pub mod common;
pub mod datamodel;
mod element;
pub mod host;
pub mod json;
mod layout;
mod node;
mod project;
mod registry;
mod scope;

#[cfg(test)]
mod graph_proptest;
#[cfg(test)]
mod testutils;

pub use self::common::{Error, ErrorCode, ErrorKind, Result, ScopeId, Uid};
pub use self::datamodel::{Direction, NodeKind, ProjectDescriptor, ScopeDescriptor};
pub use self::element::{Element, SlotValue};
pub use self::host::{DefaultHost, Host, Subsystem};
pub use self::layout::{LayoutPort, ScopeLayout};
pub use self::node::{ElementId, Node, NodeArena, NodeId, NodeParent};
pub use self::project::{DEFAULT_CLOCK_PERIOD, Project};
pub use self::registry::{ElementType, MODULE_LIST, rectify, resolve};
pub use self::scope::{Scope, TestbenchState, Wire};
