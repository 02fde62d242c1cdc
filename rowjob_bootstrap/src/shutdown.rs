// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Shutdown Coordination
//!
//! Cascades a process-level termination signal into cancellation of every
//! job the [`ControlPlaneRegistry`] currently tracks. This binary runs at
//! most one job per invocation (`submit` spawns it, then the process waits
//! on the shutdown signal or the job's own completion), so there is no
//! fleet of workers to drain against a grace-period timeout — shutdown
//! means "cancel whatever job is running" and nothing more.
//!
//! ## Usage
//!
//! ```
//! use rowjob_bootstrap::shutdown::ShutdownCoordinator;
//! use rowjob_engine::control_plane::ControlPlaneRegistry;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let registry = Arc::new(ControlPlaneRegistry::new());
//! let coordinator = ShutdownCoordinator::new(registry.clone());
//!
//! tokio::spawn({
//!     let coordinator = coordinator.clone();
//!     async move {
//!         coordinator.cancelled().await;
//!         println!("shutdown signal received, tracked jobs were cancelled");
//!     }
//! });
//!
//! coordinator.initiate_shutdown();
//! # }
//! ```

use rowjob_engine::control_plane::ControlPlaneRegistry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Cancels every job in a [`ControlPlaneRegistry`] the first time a shutdown
/// signal arrives, and lets any number of waiters observe that it happened.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    registry: Arc<ControlPlaneRegistry>,
    signalled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownCoordinator {
    pub fn new(registry: Arc<ControlPlaneRegistry>) -> Self {
        Self {
            registry,
            signalled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Whether a shutdown signal has already been observed.
    pub fn is_shutting_down(&self) -> bool {
        self.signalled.load(Ordering::SeqCst)
    }

    /// Cancels every job currently registered with the control plane and
    /// wakes any `cancelled()` waiters. Idempotent: signals after the first
    /// are no-ops, since `cancel_all` would just re-set flags already set.
    pub fn initiate_shutdown(&self) {
        if self.signalled.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_ok() {
            tracing::info!("shutdown signal received, cancelling all tracked jobs");
            self.registry.cancel_all();
            self.notify.notify_waiters();
        }
    }

    /// Resolves once a shutdown signal has been observed, immediately if one
    /// already has been.
    pub async fn cancelled(&self) {
        if self.is_shutting_down() {
            return;
        }
        self.notify.notified().await;
    }
}
