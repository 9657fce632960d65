//! Background layout worker
//!
//! Runs a [`LayoutRunner`] on its own thread. The worker holds the
//! positions exclusively while a pass is running; after each full pass it
//! publishes a [`LayoutSnapshot`] behind an `RwLock`, so a renderer polling
//! [`LayoutWorker::snapshot`] only ever sees settled passes.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::RwLock;

use crate::{Bounds, CancelToken, LayoutError, LayoutReport, LayoutResult, LayoutRunner, LayoutSnapshot};

pub struct LayoutWorker {
    snapshot: Arc<RwLock<LayoutSnapshot>>,
    cancel: CancelToken,
    handle: Option<JoinHandle<LayoutResult<LayoutReport>>>,
}

impl LayoutWorker {
    /// Initialize `runner` in `bounds` and relax it on a new thread
    pub fn spawn(runner: LayoutRunner, bounds: Bounds) -> LayoutResult<Self> {
        Self::spawn_with_cancel(runner, bounds, CancelToken::new())
    }

    /// Like [`LayoutWorker::spawn`], observing a caller-owned cancel token
    pub fn spawn_with_cancel(
        mut runner: LayoutRunner,
        bounds: Bounds,
        cancel: CancelToken,
    ) -> LayoutResult<Self> {
        runner.initialize(bounds);

        let snapshot = Arc::new(RwLock::new(runner.snapshot()));

        let shared = Arc::clone(&snapshot);
        let token = cancel.clone();
        let handle = thread::Builder::new()
            .name("molnet-layout".to_string())
            .spawn(move || -> LayoutResult<LayoutReport> {
                let report = runner.run_with(&token, |r| {
                    *shared.write() = r.snapshot();
                })?;
                // Publish the terminal state even if no pass ran
                *shared.write() = runner.snapshot();
                Ok(report)
            })?;

        Ok(Self {
            snapshot,
            cancel,
            handle: Some(handle),
        })
    }

    /// Positions as of the last completed pass
    pub fn snapshot(&self) -> LayoutSnapshot {
        self.snapshot.read().clone()
    }

    /// Ask the worker to stop before its next pass
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Wait for the run to end
    pub fn join(mut self) -> LayoutResult<LayoutReport> {
        self.wait()
    }

    fn wait(&mut self) -> LayoutResult<LayoutReport> {
        let handle = self.handle.take().ok_or(LayoutError::WorkerPanicked)?;
        handle.join().map_err(|_| LayoutError::WorkerPanicked)?
    }
}

impl Drop for LayoutWorker {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.cancel();
            if let Err(e) = self.wait() {
                tracing::warn!("Layout worker ended with error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayoutGraph, LayoutState};
    use molnet_core::{LayoutSettings, MoleculeId};

    fn runner(edges: &[(usize, usize, f64)], n: u32) -> LayoutRunner {
        let graph = LayoutGraph::from_edges((0..n).map(MoleculeId::from_raw).collect(), edges).unwrap();
        let settings = LayoutSettings {
            seed: Some(21),
            ..Default::default()
        };
        LayoutRunner::new(graph, &settings).unwrap()
    }

    #[test]
    fn test_worker_converges_and_publishes() {
        let worker = LayoutWorker::spawn(runner(&[(0, 1, 1.0)], 2), Bounds::new(200.0, 200.0).unwrap()).unwrap();
        let report = worker.snapshot.clone();
        let result = worker.join().unwrap();

        assert_eq!(result.state, LayoutState::Converged);
        let last = report.read().clone();
        assert_eq!(last.state, LayoutState::Converged);
        assert_eq!(last.pass, result.passes);
        assert_eq!(last.positions.len(), 2);
    }

    #[test]
    fn test_worker_cancel() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let worker = LayoutWorker::spawn_with_cancel(
            runner(&[(0, 1, 1.0)], 2),
            Bounds::new(2000.0, 2000.0).unwrap(),
            cancel,
        )
        .unwrap();
        let result = worker.join().unwrap();

        assert_eq!(result.state, LayoutState::Cancelled);
        assert_eq!(result.passes, 0);
    }

    #[test]
    fn test_cancel_long_run() {
        // Mutually inconsistent targets over a long budget
        let edges: Vec<(usize, usize, f64)> = (0..40)
            .flat_map(|i| ((i + 1)..40).map(move |j| (i, j, if (i + j) % 2 == 0 { 1.0 } else { -1.0 })))
            .collect();
        let worker = LayoutWorker::spawn(runner(&edges, 40), Bounds::new(2000.0, 2000.0).unwrap()).unwrap();
        worker.cancel();
        assert!(worker.join().unwrap().state.is_finished());
    }

    #[test]
    fn test_snapshot_readable_while_running() {
        let worker = LayoutWorker::spawn(runner(&[(0, 1, 0.3), (1, 2, 0.7)], 3), Bounds::new(300.0, 300.0).unwrap()).unwrap();
        let snap = worker.snapshot();
        assert_eq!(snap.positions.len(), 3);
        drop(worker);
    }
}
