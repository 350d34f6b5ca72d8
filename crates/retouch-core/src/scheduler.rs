//! Latest-wins preview scheduling for multi-threaded embeddings.
//!
//! A slider drag produces a burst of parameter changes. Each change is
//! submitted as a [`PreviewTicket`]; tickets carry a monotonically
//! increasing generation. At most one pipeline call runs at a time: renders
//! queue on a gate, and a ticket that was superseded while waiting is
//! dropped without rendering. The render itself happens outside the session
//! lock on a snapshot of the baseline, so commits and reads are never
//! blocked by it. The result is installed only if, when it finishes:
//!
//! - no newer ticket has been submitted, and
//! - the baseline has not been replaced by a commit, load, reset or clear.
//!
//! Otherwise the result is discarded as [`PreviewOutcome::Stale`], so an
//! old render can never overwrite a newer one.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::adjustments::apply_adjustments;
use crate::decode::RasterImage;
use crate::session::{EditSession, EditorError};
use crate::AdjustmentParams;

/// A submitted preview request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewTicket {
    generation: u64,
    params: AdjustmentParams,
}

impl PreviewTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn params(&self) -> AdjustmentParams {
        self.params
    }
}

/// Result of rendering a ticket.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewOutcome {
    /// The preview was installed as the working image.
    Applied(RasterImage),
    /// A newer request or a baseline change superseded this one.
    Stale,
}

impl PreviewOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PreviewOutcome::Applied(_))
    }
}

/// Serializes access to one [`EditSession`] across threads.
#[derive(Debug, Default)]
pub struct PreviewScheduler {
    session: Mutex<EditSession>,
    /// Held for the duration of each render.
    render_gate: Mutex<()>,
    generation: AtomicU64,
}

impl PreviewScheduler {
    pub fn new(session: EditSession) -> Self {
        Self {
            session: Mutex::new(session),
            render_gate: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EditSession> {
        // A panic mid-operation never leaves the session half-updated
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Register a new preview request, superseding every earlier one.
    pub fn submit(&self, params: AdjustmentParams) -> PreviewTicket {
        PreviewTicket {
            generation: self.bump(),
            params: params.clamped(),
        }
    }

    /// Whether `ticket` is still the most recent request.
    pub fn is_current(&self, ticket: &PreviewTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Render a ticket and install the result if it is still current.
    pub fn render(&self, ticket: &PreviewTicket) -> Result<PreviewOutcome, EditorError> {
        let _gate = self
            .render_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(ticket) {
            debug!(generation = ticket.generation, "skipping superseded preview");
            return Ok(PreviewOutcome::Stale);
        }

        let (baseline, revision) = {
            let session = self.lock();
            let baseline = session.original().ok_or(EditorError::NoImage)?.clone();
            (baseline, session.revision())
        };

        let rendered = apply_adjustments(&baseline, &ticket.params);

        let mut session = self.lock();
        if !self.is_current(ticket) || session.revision() != revision {
            warn!(
                generation = ticket.generation,
                "discarding stale preview"
            );
            return Ok(PreviewOutcome::Stale);
        }
        session.install_preview(ticket.params, rendered.clone());
        Ok(PreviewOutcome::Applied(rendered))
    }

    /// Submit and render in one call.
    pub fn preview(&self, params: AdjustmentParams) -> Result<PreviewOutcome, EditorError> {
        let ticket = self.submit(params);
        self.render(&ticket)
    }

    /// Run `f` with exclusive access to the session.
    ///
    /// In-flight previews are invalidated, since `f` may replace the baseline.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut EditSession) -> R) -> R {
        let mut session = self.lock();
        self.bump();
        f(&mut session)
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        self.with_session(|s| s.load(path))
    }

    pub fn rotate90(&self) -> Result<RasterImage, EditorError> {
        self.with_session(|s| s.rotate90().cloned())
    }

    pub fn sharpen(&self) -> Result<RasterImage, EditorError> {
        self.with_session(|s| s.sharpen().cloned())
    }

    pub fn vignette(&self) -> Result<RasterImage, EditorError> {
        self.with_session(|s| s.vignette().cloned())
    }

    /// Copy of the current working image.
    pub fn working(&self) -> Option<RasterImage> {
        self.lock().working().cloned()
    }

    /// Parameters of the last installed preview.
    pub fn params(&self) -> AdjustmentParams {
        self.lock().params()
    }

    pub fn into_session(self) -> EditSession {
        self.session
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{mpsc, Arc};
    use std::thread;
    use std::time::Duration;

    fn scheduler() -> PreviewScheduler {
        let mut session = EditSession::new();
        session.set_image(RasterImage::filled(6, 4, &[100, 100, 100]).unwrap());
        PreviewScheduler::new(session)
    }

    fn brightness(value: f32) -> AdjustmentParams {
        AdjustmentParams {
            brightness: value,
            ..AdjustmentParams::default()
        }
    }

    #[test]
    fn test_preview_applies() {
        let scheduler = scheduler();
        let outcome = scheduler.preview(brightness(50.0)).unwrap();
        assert!(outcome.is_applied());
        let working = scheduler.working().unwrap();
        assert!(working.pixels().iter().all(|&v| v == 150));
        assert_eq!(scheduler.params().brightness, 50.0);
    }

    #[test]
    fn test_older_ticket_is_stale() {
        let scheduler = scheduler();
        let old = scheduler.submit(brightness(10.0));
        let new = scheduler.submit(brightness(20.0));
        assert!(new.generation() > old.generation());

        assert_eq!(scheduler.render(&old).unwrap(), PreviewOutcome::Stale);
        assert!(scheduler.render(&new).unwrap().is_applied());
        assert!(scheduler.working().unwrap().pixels().iter().all(|&v| v == 120));
    }

    #[test]
    fn test_commit_invalidates_pending_ticket() {
        let scheduler = scheduler();
        let ticket = scheduler.submit(brightness(10.0));
        scheduler.rotate90().unwrap();

        assert_eq!(scheduler.render(&ticket).unwrap(), PreviewOutcome::Stale);
        // The committed rotation is still in place
        assert_eq!(scheduler.working().unwrap().dimensions(), (4, 6));
    }

    #[test]
    fn test_submit_clamps_params() {
        let scheduler = scheduler();
        let ticket = scheduler.submit(brightness(500.0));
        assert_eq!(ticket.params().brightness, 100.0);
    }

    #[test]
    fn test_render_without_image() {
        let scheduler = PreviewScheduler::default();
        assert!(matches!(
            scheduler.preview(brightness(10.0)),
            Err(EditorError::NoImage)
        ));
        assert!(matches!(scheduler.vignette(), Err(EditorError::NoImage)));
    }

    #[test]
    fn test_render_waits_for_render_in_progress() {
        let scheduler = Arc::new(scheduler());

        // Stand in for a render that is still running
        let gate = scheduler.render_gate.lock().unwrap();
        let (tx, rx) = mpsc::channel();
        let worker = {
            let scheduler = Arc::clone(&scheduler);
            thread::spawn(move || {
                let outcome = scheduler.preview(brightness(50.0)).unwrap();
                tx.send(outcome).unwrap();
            })
        };

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        drop(gate);
        assert!(rx.recv().unwrap().is_applied());
        worker.join().unwrap();
    }

    #[test]
    fn test_ticket_superseded_while_queued_is_stale() {
        let scheduler = Arc::new(scheduler());

        let gate = scheduler.render_gate.lock().unwrap();
        let queued = scheduler.submit(brightness(10.0));
        let worker = {
            let scheduler = Arc::clone(&scheduler);
            thread::spawn(move || scheduler.render(&queued).unwrap())
        };
        let newer = scheduler.submit(brightness(20.0));
        drop(gate);

        assert_eq!(worker.join().unwrap(), PreviewOutcome::Stale);
        assert!(scheduler.render(&newer).unwrap().is_applied());
        assert!(scheduler.working().unwrap().pixels().iter().all(|&v| v == 120));
    }

    #[test]
    fn test_concurrent_submissions_latest_wins() {
        let scheduler = Arc::new(scheduler());

        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let scheduler = Arc::clone(&scheduler);
                thread::spawn(move || {
                    for step in 0..10 {
                        let value = (i * 10 + step) as f32 - 40.0;
                        scheduler.preview(brightness(value)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // A final request always wins once nothing else is in flight
        let outcome = scheduler.preview(brightness(25.0)).unwrap();
        assert!(outcome.is_applied());

        let session = Arc::try_unwrap(scheduler).unwrap().into_session();
        let expected = apply_adjustments(session.original().unwrap(), &brightness(25.0));
        assert_eq!(session.working().unwrap(), &expected);
        assert_eq!(session.params().brightness, 25.0);
    }
}
