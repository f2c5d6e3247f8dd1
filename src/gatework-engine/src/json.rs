// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! JSON wire format for persisted circuit projects.
//!
//! The wire types mirror the document shape one field at a time and are
//! converted, fallibly, into the plain `datamodel` descriptors.  Unknown
//! fields are ignored so documents written by newer or older serializers
//! keep loading; structurally invalid values surface as errors rather
//! than silently producing a broken graph.
//!
//! # Example
//! ```no_run
//! let bytes = std::fs::read("project.json")?;
//! let descriptor = gatework_engine::json::parse_project(&bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{Error, ErrorCode, ErrorKind, Result};
use crate::datamodel;
use crate::datamodel::{Direction, NodeKind};

fn import_err(code: ErrorCode, details: String) -> Error {
    Error::new(ErrorKind::Import, code, Some(details))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub time_period: Option<u32>,
    #[serde(default)]
    pub clock_enabled: Option<bool>,
    #[serde(default)]
    pub ordered_tabs: Option<Vec<u64>>,
    #[serde(default)]
    pub focused_scope: Option<u64>,
    #[serde(default)]
    pub scopes: Vec<Scope>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub all_nodes: Vec<Node>,
    #[serde(default)]
    pub restricted_elements: Vec<String>,
    #[serde(default)]
    pub verilog_metadata: Option<VerilogMetadata>,
    #[serde(default)]
    pub testbench_data: Option<TestbenchData>,
    #[serde(default)]
    pub layout: Option<Layout>,
    /// Everything else on a scope object: per-type element arrays keyed by
    /// type tag, plus whatever fields other serializer versions added.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: i64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub connections: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub label_direction: Option<String>,
    #[serde(default)]
    pub propagation_delay: Option<u32>,
    #[serde(default)]
    pub custom_data: Option<CustomData>,
    #[serde(default)]
    pub subcircuit_metadata: Option<SubcircuitMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomData {
    #[serde(default)]
    pub constructor_params: Vec<Value>,
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
    #[serde(default)]
    pub nodes: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcircuitMetadata {
    pub scope_id: u64,
    #[serde(default)]
    pub title_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VerilogMetadata {
    #[serde(default)]
    pub is_verilog: bool,
    #[serde(default)]
    pub is_main: bool,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestbenchData {
    #[serde(default)]
    pub test_data: Value,
    #[serde(default)]
    pub current_group: u32,
    #[serde(default)]
    pub current_case: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub title_x: f64,
    #[serde(default)]
    pub title_y: f64,
    #[serde(default)]
    pub title_enabled: Option<bool>,
    #[serde(default)]
    pub input_ports: Vec<LayoutPort>,
    #[serde(default)]
    pub output_ports: Vec<LayoutPort>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LayoutPort {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

fn property_value(value: &Value) -> Result<datamodel::PropertyValue> {
    use datamodel::PropertyValue;
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(n) => Ok(PropertyValue::Number(n)),
            None => Err(import_err(
                ErrorCode::MalformedDescriptor,
                format!("unrepresentable number {n}"),
            )),
        },
        Value::String(s) => Ok(PropertyValue::Text(s.clone())),
        Value::Bool(b) => Ok(PropertyValue::Bool(*b)),
        Value::Array(items) => Ok(PropertyValue::List(
            items.iter().map(property_value).collect::<Result<_>>()?,
        )),
        other => Err(import_err(
            ErrorCode::MalformedDescriptor,
            format!("expected property value, got {other}"),
        )),
    }
}

fn node_override(value: &Value) -> Result<datamodel::NodeOverride> {
    use datamodel::NodeOverride;
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(NodeOverride::One(i)),
            None => Err(import_err(
                ErrorCode::MalformedDescriptor,
                format!("node override index {n} is not an integer"),
            )),
        },
        Value::Array(items) => {
            let indices = items
                .iter()
                .map(|item| item.as_i64())
                .collect::<Option<Vec<i64>>>();
            match indices {
                Some(indices) => Ok(NodeOverride::Many(indices)),
                None => Err(import_err(
                    ErrorCode::MalformedDescriptor,
                    format!("node override list {value} has non-integer entries"),
                )),
            }
        }
        other => Err(import_err(
            ErrorCode::MalformedDescriptor,
            format!("expected node override, got {other}"),
        )),
    }
}

fn direction(name: &str) -> Result<Direction> {
    Direction::from_name(name)
        .ok_or_else(|| import_err(ErrorCode::BadDirection, format!("bad direction {name:?}")))
}

impl TryFrom<Node> for datamodel::NodeDescriptor {
    type Error = Error;

    fn try_from(node: Node) -> Result<datamodel::NodeDescriptor> {
        let kind = NodeKind::from_wire(node.kind).ok_or_else(|| {
            import_err(ErrorCode::BadNodeKind, format!("node type {}", node.kind))
        })?;
        Ok(datamodel::NodeDescriptor {
            x: node.x,
            y: node.y,
            kind,
            label: node.label.filter(|l| !l.is_empty()),
            connections: node.connections,
        })
    }
}

impl TryFrom<CustomData> for datamodel::CustomData {
    type Error = Error;

    fn try_from(custom: CustomData) -> Result<datamodel::CustomData> {
        Ok(datamodel::CustomData {
            constructor_params: custom
                .constructor_params
                .iter()
                .map(property_value)
                .collect::<Result<_>>()?,
            values: custom
                .values
                .iter()
                .map(|(k, v)| Ok((k.clone(), property_value(v)?)))
                .collect::<Result<_>>()?,
            nodes: custom
                .nodes
                .iter()
                .map(|(k, v)| Ok((k.clone(), node_override(v)?)))
                .collect::<Result<_>>()?,
        })
    }
}

impl TryFrom<Element> for datamodel::ElementDescriptor {
    type Error = Error;

    fn try_from(element: Element) -> Result<datamodel::ElementDescriptor> {
        Ok(datamodel::ElementDescriptor {
            x: element.x,
            y: element.y,
            label: element.label.filter(|l| !l.is_empty()),
            label_direction: element
                .label_direction
                .as_deref()
                .map(direction)
                .transpose()?,
            propagation_delay: element.propagation_delay,
            custom_data: element.custom_data.map(TryInto::try_into).transpose()?,
            subcircuit: element.subcircuit_metadata.map(|m| {
                datamodel::SubcircuitMetadata {
                    scope_id: m.scope_id,
                    title_enabled: m.title_enabled,
                }
            }),
        })
    }
}

impl From<Layout> for datamodel::LayoutDescriptor {
    fn from(layout: Layout) -> datamodel::LayoutDescriptor {
        let port = |p: &LayoutPort| datamodel::LayoutPortDescriptor {
            id: p.id,
            x: p.x,
            y: p.y,
        };
        datamodel::LayoutDescriptor {
            width: layout.width,
            height: layout.height,
            title_x: layout.title_x,
            title_y: layout.title_y,
            title_enabled: layout.title_enabled,
            input_ports: layout.input_ports.iter().map(port).collect(),
            output_ports: layout.output_ports.iter().map(port).collect(),
        }
    }
}

/// True for flattened scope fields that look like a per-type element
/// array.  Anything else left over on the scope object is schema drift we
/// deliberately ignore.
fn parse_element_array(value: &Value) -> Option<Vec<Element>> {
    if !value.is_array() {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}

impl TryFrom<Scope> for datamodel::ScopeDescriptor {
    type Error = Error;

    fn try_from(scope: Scope) -> Result<datamodel::ScopeDescriptor> {
        let mut elements = BTreeMap::new();
        for (tag, value) in &scope.extra {
            let Some(wire_elements) = parse_element_array(value) else {
                continue;
            };
            let descriptors = wire_elements
                .into_iter()
                .map(|e| {
                    datamodel::ElementDescriptor::try_from(e).map_err(|err| {
                        let details = err.details.unwrap_or_default();
                        Error::new(err.kind, err.code, Some(format!("{tag}: {details}")))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            elements.insert(tag.clone(), descriptors);
        }

        Ok(datamodel::ScopeDescriptor {
            name: scope.name,
            id: scope.id,
            all_nodes: scope
                .all_nodes
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<_>>()?,
            elements,
            restricted_elements: scope.restricted_elements,
            verilog: scope.verilog_metadata.map(|v| datamodel::VerilogMetadata {
                is_verilog: v.is_verilog,
                is_main: v.is_main,
                code: v.code,
            }),
            testbench: scope.testbench_data.map(|t| datamodel::TestbenchDescriptor {
                test_data: t.test_data,
                current_group: t.current_group,
                current_case: t.current_case,
            }),
            layout: scope.layout.map(Into::into),
        })
    }
}

impl TryFrom<Project> for datamodel::ProjectDescriptor {
    type Error = Error;

    fn try_from(project: Project) -> Result<datamodel::ProjectDescriptor> {
        Ok(datamodel::ProjectDescriptor {
            name: project.name,
            time_period: project.time_period,
            clock_enabled: project.clock_enabled,
            tab_order: project.ordered_tabs,
            focused_scope: project.focused_scope,
            scopes: project
                .scopes
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<_>>()?,
        })
    }
}

/// Decodes a persisted project document into descriptors ready for
/// `Project::load`.
pub fn parse_project(bytes: &[u8]) -> Result<datamodel::ProjectDescriptor> {
    let wire: Project = serde_json::from_slice(bytes)
        .map_err(|err| import_err(ErrorCode::JsonDeserialization, err.to_string()))?;
    wire.try_into()
}
