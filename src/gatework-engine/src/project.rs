// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The live project: owns scope creation order, the focused-scope
//! reference, and project-level clock settings.
//!
//! Scopes load in descriptor array order; the serializer is responsible
//! for emitting them in dependency order (leaf scopes before the scopes
//! that embed them as subcircuits).  A scope whose load fails is left
//! unpublished and recorded on `errors`; previously loaded scopes are
//! never touched by a later failure.

use crate::common::{Error, ErrorKind, Result, ScopeId};
use crate::datamodel::ProjectDescriptor;
use crate::host::{Host, Subsystem};
use crate::scope::Scope;

pub const DEFAULT_CLOCK_PERIOD: u32 = 500;

#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub name: String,
    pub scopes: Vec<Scope>,
    pub focused: Option<ScopeId>,
    /// Clock period in simulation time units.
    pub clock_period: u32,
    pub clock_enabled: bool,
    pub errors: Vec<Error>,
}

impl Project {
    /// A fresh project with the default placeholder scope.
    pub fn new() -> Project {
        Project {
            name: "untitled".to_owned(),
            scopes: vec![Scope::new("Main", 0, false, false)],
            focused: Some(0),
            clock_period: DEFAULT_CLOCK_PERIOD,
            clock_enabled: true,
            errors: Vec::new(),
        }
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.iter().find(|s| s.id == id)
    }

    pub fn focused_scope(&self) -> Option<&Scope> {
        self.focused.and_then(|id| self.scope(id))
    }

    /// Reconstructs the project from a descriptor.  `None` means a fresh,
    /// untitled project: no graph work occurs.
    ///
    /// Per-scope failures are recorded on `self.errors` and loading
    /// continues with the remaining scopes.
    pub fn load(&mut self, descriptor: Option<&ProjectDescriptor>, host: &mut dyn Host) {
        let Some(descriptor) = descriptor else {
            self.name = "untitled".to_owned();
            return;
        };

        self.name = if descriptor.name.is_empty() {
            "untitled".to_owned()
        } else {
            descriptor.name.clone()
        };
        self.focused = None;
        // the default placeholder scope goes away with everything else
        self.scopes.clear();

        for sd in &descriptor.scopes {
            let (is_verilog, is_main) = sd
                .verilog
                .as_ref()
                .map(|v| (v.is_verilog, v.is_main))
                .unwrap_or((false, false));
            let mut scope = Scope::new(&sd.name, sd.id, is_verilog, is_main);
            match scope.load_scope(sd, &self.scopes, host) {
                Ok(()) => {
                    let id = scope.id;
                    self.scopes.push(scope);
                    self.focused = Some(id);
                    host.switch_focus(id);
                    host.recenter_view(id, host.is_embedded());
                    host.schedule_evaluation(id, true);
                    host.schedule_backup_snapshot();
                    host.refresh_restricted_indicator();
                }
                Err(err) => {
                    let details = err.details.unwrap_or_default();
                    self.errors.push(Error::new(
                        ErrorKind::Project,
                        err.code,
                        Some(format!("scope {:?} (id {}): {details}", sd.name, sd.id)),
                    ));
                }
            }
        }

        self.clock_period = descriptor.time_period.unwrap_or(DEFAULT_CLOCK_PERIOD);
        self.clock_enabled = descriptor.clock_enabled.unwrap_or(true);

        if let Some(order) = &descriptor.tab_order {
            self.reorder_tabs(order);
        }

        if let Some(id) = descriptor.focused_scope
            && self.scope(id).is_some()
        {
            self.focused = Some(id);
            host.switch_focus(id);
        }

        host.flag_dirty(Subsystem::Simulation);
        host.flag_dirty(Subsystem::Canvas);
        host.flag_dirty(Subsystem::Grid);

        if !host.is_embedded() {
            host.reset_view_pan();
        }
        if let Some(id) = self.focused {
            host.schedule_evaluation(id, false);
        }
    }

    /// Stable reorder by persisted tab position; scopes the list doesn't
    /// mention keep their relative order, after the listed ones.
    fn reorder_tabs(&mut self, order: &[ScopeId]) {
        self.scopes.sort_by_key(|scope| {
            order
                .iter()
                .position(|&id| id == scope.id)
                .unwrap_or(usize::MAX)
        });
    }

    /// Loads a project from its persisted JSON document.  Only decode
    /// failures are returned; per-scope load failures land on `errors`.
    pub fn load_json(&mut self, bytes: &[u8], host: &mut dyn Host) -> Result<()> {
        let descriptor = crate::json::parse_project(bytes)?;
        self.load(Some(&descriptor), host);
        Ok(())
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new()
    }
}
