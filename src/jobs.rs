// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Asynchronous mesh regeneration
//!
//! Every submitted job gets an id from one increasing counter. A finished
//! job replaces the published mesh of its surface only when its id is
//! higher than the id that produced the current one, so a slow stale job
//! never overwrites the result of a newer edit. In-flight jobs are never
//! cancelled; their results are dropped on arrival instead.

use crate::config::GridConfig;
use crate::error::Error;
use crate::geometry::SurfaceMesh;
use crate::kernel::Kernel;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::{info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Instant;

/// Host-side identifier of one formula
pub type SurfaceId = String;

pub type JobId = u64;

/// Mesh currently visible for a surface
#[derive(Debug, Clone)]
pub struct Published {
    pub job_id: JobId,
    pub mesh: Arc<SurfaceMesh>,
}

#[derive(Debug, Clone)]
struct Slot {
    job_id: JobId,
    // None once the surface was removed
    mesh: Option<Arc<SurfaceMesh>>,
}

/// Latest mesh per surface, last writer wins by job id
#[derive(Debug, Default)]
pub struct MeshPublisher {
    slots: DashMap<SurfaceId, Slot>,
    last_job_id: AtomicU64,
}

impl MeshPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next job id
    pub fn next_job_id(&self) -> JobId {
        self.last_job_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish `mesh` for `surface` unless a job with a higher or equal id
    /// already got there. Returns whether the mesh was published.
    pub fn publish(&self, surface: &str, job_id: JobId, mesh: SurfaceMesh) -> bool {
        let slot = Slot {
            job_id,
            mesh: Some(Arc::new(mesh)),
        };
        match self.slots.entry(surface.to_owned()) {
            Entry::Occupied(mut entry) => {
                if entry.get().job_id >= job_id {
                    return false;
                }
                entry.insert(slot);
            }
            Entry::Vacant(entry) => {
                entry.insert(slot);
            }
        }
        true
    }

    pub fn get(&self, surface: &str) -> Option<Published> {
        let slot = self.slots.get(surface)?;
        slot.mesh.as_ref().map(|mesh| Published {
            job_id: slot.job_id,
            mesh: Arc::clone(mesh),
        })
    }

    /// Drop the published mesh of a deleted surface
    ///
    /// Jobs submitted before the removal can no longer publish for it.
    pub fn remove(&self, surface: &str) -> Option<Published> {
        let fence = self.last_job_id.load(Ordering::SeqCst);
        match self.slots.entry(surface.to_owned()) {
            Entry::Occupied(mut entry) => {
                let slot = entry.get_mut();
                let previous = slot.mesh.take().map(|mesh| Published {
                    job_id: slot.job_id,
                    mesh,
                });
                // A job newer than the fence may have published meanwhile
                slot.job_id = slot.job_id.max(fence);
                previous
            }
            Entry::Vacant(entry) => {
                entry.insert(Slot {
                    job_id: fence,
                    mesh: None,
                });
                None
            }
        }
    }

    /// Surfaces that currently have a mesh
    pub fn surfaces(&self) -> Vec<SurfaceId> {
        let mut ids: Vec<SurfaceId> = self
            .slots
            .iter()
            .filter(|entry| entry.value().mesh.is_some())
            .map(|entry| entry.key().clone())
            .collect();
        ids.sort();
        ids
    }
}

/// How a job ended
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Published,
    /// Finished after a newer job had already published
    Superseded,
    /// Generation failed; the published mesh is unchanged
    Failed(Error),
}

/// Handle to a submitted job
#[derive(Debug)]
pub struct JobTicket {
    id: JobId,
    done: Receiver<JobOutcome>,
}

impl JobTicket {
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Block until the job ends; `None` if the worker died without reporting
    pub fn wait(self) -> Option<JobOutcome> {
        self.done.recv().ok()
    }
}

/// Runs tessellation passes on the rayon pool and publishes the results
#[derive(Debug, Clone, Default)]
pub struct Regenerator {
    publisher: Arc<MeshPublisher>,
}

impl Regenerator {
    pub fn new(publisher: Arc<MeshPublisher>) -> Self {
        Self { publisher }
    }

    pub fn publisher(&self) -> &Arc<MeshPublisher> {
        &self.publisher
    }

    /// Regenerate `surface` from the kernel's current formula and bindings
    ///
    /// The kernel is copied before this returns, so it can be edited again
    /// right away.
    pub fn submit(&self, surface: &str, kernel: &Kernel, config: GridConfig) -> JobTicket {
        let id = self.publisher.next_job_id();
        let tessellator = kernel.tessellator(config);
        let publisher = Arc::clone(&self.publisher);
        let surface = surface.to_owned();
        let (tx, rx) = mpsc::channel();

        rayon::spawn(move || {
            let start = Instant::now();
            let outcome = match tessellator.and_then(|t| t.generate()) {
                Ok(mesh) => {
                    let triangles = mesh.triangle_count();
                    if publisher.publish(&surface, id, mesh) {
                        info!(
                            "job {id}: published {triangles} triangles for {surface:?} in {:?}",
                            start.elapsed()
                        );
                        JobOutcome::Published
                    } else {
                        warn!("job {id}: result for {surface:?} superseded, discarded");
                        JobOutcome::Superseded
                    }
                }
                Err(e) => {
                    warn!("job {id}: regenerating {surface:?} failed: {e}");
                    JobOutcome::Failed(e)
                }
            };
            // The ticket may have been dropped
            let _ = tx.send(outcome);
        });

        JobTicket { id, done: rx }
    }
}
