// Copyright 2026 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostic sinks for hook installation.
//!
//! Installation of the attach decorator is best-effort instrumentation: when
//! it cannot complete it must not fail the registration call, but embedders
//! still want to know it happened. The `*_traced` registration variants
//! accept an [`AttachTrace`] sink for that; the plain variants discard the
//! events.

use alloc::vec::Vec;

use sapling_view_tree::DecorateError;

/// A callback sink for installation diagnostics.
///
/// See [`on_attach_traced`](crate::on_attach_traced).
pub trait AttachTrace {
    /// Called when the decorator is installed on a tree.
    fn installed(&mut self);

    /// Called when an installation attempt fails.
    ///
    /// The installed marker was not advanced; a later registration against
    /// the same tree will retry.
    fn install_failed(&mut self, error: DecorateError);
}

/// A sink that discards all events.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoTrace;

impl AttachTrace for NoTrace {
    fn installed(&mut self) {}

    fn install_failed(&mut self, _error: DecorateError) {}
}

/// Records installation events, mostly useful in tests.
#[derive(Debug, Default, Clone)]
pub struct InstallRecorder {
    installs: u32,
    failures: Vec<DecorateError>,
}

impl InstallRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times installation completed.
    #[must_use]
    pub fn installs(&self) -> u32 {
        self.installs
    }

    /// Returns the recorded installation failures, oldest first.
    #[must_use]
    pub fn failures(&self) -> &[DecorateError] {
        &self.failures
    }

    /// Clears all recorded events.
    pub fn clear(&mut self) {
        self.installs = 0;
        self.failures.clear();
    }
}

impl AttachTrace for InstallRecorder {
    fn installed(&mut self) {
        self.installs += 1;
    }

    fn install_failed(&mut self, error: DecorateError) {
        self.failures.push(error);
    }
}
