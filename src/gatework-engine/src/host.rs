// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The boundary to external collaborators: simulation scheduling, view
//! management, backup snapshots, and unique-id generation.
//!
//! Reconstruction fires these as notifications and never blocks on them;
//! they are assumed idempotent and safe to invoke once per load.  All
//! notification methods default to no-ops so tests and headless embedders
//! only implement what they observe.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::common::{ScopeId, Uid};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Subsystem {
    Simulation,
    Canvas,
    Grid,
}

pub trait Host {
    fn generate_unique_id(&mut self) -> Uid;

    fn switch_focus(&mut self, _scope: ScopeId) {}

    /// `immediate` distinguishes the full update pass run after each scope
    /// loads from the single simulation tick scheduled at the end of a
    /// project load.
    fn schedule_evaluation(&mut self, _scope: ScopeId, _immediate: bool) {}

    fn schedule_backup_snapshot(&mut self) {}

    fn refresh_restricted_indicator(&mut self) {}

    fn recenter_view(&mut self, _scope: ScopeId, _embedded: bool) {}

    fn reset_view_pan(&mut self) {}

    fn flag_dirty(&mut self, _subsystem: Subsystem) {}

    fn is_embedded(&self) -> bool {
        false
    }
}

/// Host for embedders that don't care about notifications; ids are drawn
/// from a seeded `StdRng`, unique for the life of the host.
pub struct DefaultHost {
    rng: StdRng,
}

impl DefaultHost {
    pub fn new() -> DefaultHost {
        DefaultHost::seeded(0x6761_7465)
    }

    pub fn seeded(seed: u64) -> DefaultHost {
        DefaultHost {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for DefaultHost {
    fn default() -> Self {
        DefaultHost::new()
    }
}

impl Host for DefaultHost {
    fn generate_unique_id(&mut self) -> Uid {
        self.rng.random()
    }
}
