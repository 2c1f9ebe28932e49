//! Real-time playback
//!
//! Frame requests become tokio timers on a current-thread runtime. Each timer
//! reports its id on a channel when it fires, and the playback loop draws one
//! frame per id, so the decorator only ever runs on the loop's task.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result};
use ripplekit_animation::{
    FrameOutcome, FrameRequestId, FrameScheduler, SharedScheduler, SystemClock,
    ZoomPlayer,
};
use ripplekit_core::{RecordingContext, Size};
use ripplekit_decorator::RippleDecorator;
use slotmap::SlotMap;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::report::FrameRecord;
use crate::RunArgs;

/// Zoom sampling interval when no ripple is running
const ZOOM_SAMPLE_INTERVAL: Duration = Duration::from_millis(16);

type Timers = SlotMap<FrameRequestId, AbortHandle>;

fn lock(timers: &Mutex<Timers>) -> MutexGuard<'_, Timers> {
    timers.lock().unwrap_or_else(PoisonError::into_inner)
}

/// `FrameScheduler` backed by tokio timers
pub struct TokioScheduler {
    timers: Arc<Mutex<Timers>>,
    runtime: Handle,
    fired: mpsc::UnboundedSender<FrameRequestId>,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> (Self, mpsc::UnboundedReceiver<FrameRequestId>) {
        let (fired, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            timers: Arc::new(Mutex::new(SlotMap::with_key())),
            runtime,
            fired,
        };
        (scheduler, receiver)
    }

    pub fn pending_count(&self) -> usize {
        lock(&self.timers).len()
    }
}

impl FrameScheduler for TokioScheduler {
    fn post_delayed(&self, delay: Duration) -> Option<FrameRequestId> {
        let mut timers = lock(&self.timers);
        let id = timers.insert_with_key(|id| {
            let timers = Arc::clone(&self.timers);
            let fired = self.fired.clone();
            self.runtime
                .spawn(async move {
                    tokio::time::sleep(delay).await;
                    lock(&timers).remove(id);
                    // Receiver gone means playback has ended
                    let _ = fired.send(id);
                })
                .abort_handle()
        });
        Some(id)
    }

    fn cancel(&self, id: FrameRequestId) {
        if let Some(timer) = lock(&self.timers).remove(id) {
            timer.abort();
        }
    }
}

pub fn run(args: &RunArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start the tokio runtime")?;
    runtime.block_on(play(args))
}

async fn play(args: &RunArgs) -> Result<()> {
    let config = args.load_config()?;
    let clock = SystemClock::shared();
    let (scheduler, mut fired) = TokioScheduler::new(Handle::current());
    let scheduler = Arc::new(scheduler);
    let shared: SharedScheduler = scheduler.clone();
    let zoom = ZoomPlayer::new(clock.clone());

    let mut decorator =
        RippleDecorator::new(config, clock.clone(), shared, Box::new(zoom.clone()));
    decorator.on_surface_resized(args.width, args.height);

    let origin = clock.now();
    let elapsed_ms = || clock.now().saturating_sub(origin).as_secs_f64() * 1000.0;
    args.trigger(&mut decorator);

    if !decorator.is_animation_running() {
        while zoom.is_active() {
            FrameRecord::new(elapsed_ms(), &FrameOutcome::Idle, zoom.current_scale())
                .print(args.json)?;
            tokio::time::sleep(ZOOM_SAMPLE_INTERVAL).await;
        }
        tracing::info!("no ripple started");
        return Ok(());
    }

    let mut ctx = RecordingContext::new(Size::new(args.width, args.height));
    let mut painted = 0usize;

    while let Some(_id) = fired.recv().await {
        ctx.clear();
        let outcome = decorator
            .draw(&mut ctx)
            .context("Frame evaluation failed")?;
        FrameRecord::new(elapsed_ms(), &outcome, zoom.current_scale()).print(args.json)?;

        match outcome {
            FrameOutcome::Paint(_) => {
                painted += 1;
                tracing::debug!("recorded {} draw commands", ctx.commands().len());
            }
            FrameOutcome::Idle if scheduler.pending_count() == 0 => break,
            _ => {}
        }
    }

    tracing::info!("played {} frames in {:.1}ms", painted, elapsed_ms());
    Ok(())
}
