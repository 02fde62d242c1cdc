// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Control Plane
//!
//! Per-job pause/resume/cancel signalling, adapted from this codebase's
//! process-wide shutdown coordinator down to job scope: instead of one
//! cancellation token for the whole process, every running job gets its own
//! [`JobControl`], and a [`ControlPlaneRegistry`] maps job IDs to the handle
//! their scheduler is reading from.

use parking_lot::RwLock;
use rowjob_domain::value_objects::JobId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Cooperative pause/cancel flags for one running job. The scheduler polls
/// `is_paused`/`is_cancelled` at its own suspension points; nothing here
/// preempts a chunk workflow mid-batch.
pub struct JobControl {
    paused: AtomicBool,
    cancelled: AtomicBool,
    notify: Notify,
}

impl JobControl {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            paused: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            notify: Notify::new(),
        })
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Sets the cancel flag and clears pause, so a scheduler blocked on
    /// `wait_while_paused` wakes immediately and observes cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Blocks until the pause flag clears (including via cancellation).
    /// A no-op when not currently paused.
    pub async fn wait_while_paused(&self) {
        while self.is_paused() {
            self.notify.notified().await;
        }
    }
}

impl Default for JobControl {
    fn default() -> Self {
        Self {
            paused: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            notify: Notify::new(),
        }
    }
}

/// Process-wide registry of running jobs' control handles, consulted by the
/// pause/resume/cancel use cases to reach a job's scheduler.
#[derive(Default)]
pub struct ControlPlaneRegistry {
    handles: RwLock<HashMap<JobId, Arc<JobControl>>>,
}

impl ControlPlaneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, job_id: JobId) -> Arc<JobControl> {
        let control = JobControl::new();
        self.handles.write().insert(job_id, control.clone());
        control
    }

    pub fn get(&self, job_id: JobId) -> Option<Arc<JobControl>> {
        self.handles.read().get(&job_id).cloned()
    }

    pub fn unregister(&self, job_id: JobId) {
        self.handles.write().remove(&job_id);
    }

    /// Cancels every job currently registered. Used by process-level shutdown
    /// to cascade a termination signal into every in-flight job's scheduler.
    pub fn cancel_all(&self) {
        for control in self.handles.read().values() {
            control.cancel();
        }
    }
}
