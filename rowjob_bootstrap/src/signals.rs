// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Signal Handling
//!
//! Listens for `SIGINT`/`SIGTERM` (Unix) or Ctrl-C (Windows) and initiates
//! graceful shutdown through a [`ShutdownCoordinator`], which cancels every
//! job the control plane is tracking. Runs as a background task for the
//! lifetime of the process.

use crate::shutdown::ShutdownCoordinator;

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("received SIGTERM"),
        _ = sigint.recv() => tracing::info!("received SIGINT"),
    }
}

#[cfg(windows)]
async fn wait_for_signal() {
    tokio::signal::ctrl_c().await.expect("failed to install Ctrl-C handler");
    tracing::info!("received Ctrl-C");
}

/// Spawns a background task that triggers `coordinator.initiate_shutdown()`
/// on the first termination signal. Returns the task handle so the caller
/// can abort it once the process is already exiting normally.
pub fn install_signal_handler(coordinator: ShutdownCoordinator) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        wait_for_signal().await;
        coordinator.initiate_shutdown();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowjob_engine::control_plane::ControlPlaneRegistry;
    use std::sync::Arc;

    #[tokio::test]
    async fn handler_installs_without_panicking() {
        let coordinator = ShutdownCoordinator::new(Arc::new(ControlPlaneRegistry::new()));
        let handle = install_signal_handler(coordinator.clone());
        assert!(!coordinator.is_shutting_down());
        handle.abort();
    }
}
