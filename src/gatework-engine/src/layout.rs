// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Geometric placement of a scope's boundary ports, for display as a
//! reusable block.  A persisted layout is adopted verbatim; otherwise a
//! deterministic default is synthesized from the port counts.

use crate::common::Uid;
use crate::datamodel::LayoutDescriptor;
use crate::host::Host;

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutPort {
    pub id: Uid,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScopeLayout {
    pub width: f64,
    pub height: f64,
    pub title_x: f64,
    pub title_y: f64,
    pub title_enabled: bool,
    pub input_ports: Vec<LayoutPort>,
    pub output_ports: Vec<LayoutPort>,
}

impl ScopeLayout {
    /// Adopts a persisted layout or synthesizes the default.  Layout is a
    /// total function of the port counts; port ids are freshly generated
    /// when synthesizing.
    pub fn resolve(
        persisted: Option<&LayoutDescriptor>,
        input_count: usize,
        output_count: usize,
        host: &mut dyn Host,
    ) -> ScopeLayout {
        match persisted {
            Some(layout) => ScopeLayout {
                width: layout.width,
                height: layout.height,
                title_x: layout.title_x,
                title_y: layout.title_y,
                // documents from before the flag existed show the title
                title_enabled: layout.title_enabled.unwrap_or(true),
                input_ports: layout
                    .input_ports
                    .iter()
                    .map(|p| LayoutPort {
                        id: p.id,
                        x: p.x,
                        y: p.y,
                    })
                    .collect(),
                output_ports: layout
                    .output_ports
                    .iter()
                    .map(|p| LayoutPort {
                        id: p.id,
                        x: p.x,
                        y: p.y,
                    })
                    .collect(),
            },
            None => ScopeLayout::synthesize(input_count, output_count, host),
        }
    }

    fn synthesize(input_count: usize, output_count: usize, host: &mut dyn Host) -> ScopeLayout {
        let width = 100.0;
        let height = (input_count.max(output_count) as f64) * 20.0 + 20.0;

        let port = |x: f64, count: usize, i: usize, host: &mut dyn Host| LayoutPort {
            id: host.generate_unique_id(),
            x,
            y: height / 2.0 - (count as f64) * 10.0 + 20.0 * (i as f64) + 10.0,
        };

        ScopeLayout {
            width,
            height,
            title_x: 50.0,
            title_y: 13.0,
            title_enabled: true,
            input_ports: (0..input_count)
                .map(|i| port(0.0, input_count, i, host))
                .collect(),
            output_ports: (0..output_count)
                .map(|i| port(width, output_count, i, host))
                .collect(),
        }
    }
}
