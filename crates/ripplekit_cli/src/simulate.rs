//! Headless simulation
//!
//! Jumps a manual clock straight to each due frame request, so a run of any
//! length finishes instantly and prints the exact frame timeline.

use anyhow::{Context, Result};
use ripplekit_animation::{ManualClock, ManualScheduler, TimeSource, ZoomPlayer};
use ripplekit_core::{RecordingContext, Size};
use ripplekit_decorator::RippleDecorator;

use crate::report::FrameRecord;
use crate::RunArgs;

pub fn run(args: &RunArgs) -> Result<()> {
    let config = args.load_config()?;
    let clock = ManualClock::shared();
    let scheduler = ManualScheduler::new(clock.clone());
    let zoom = ZoomPlayer::new(clock.clone());

    let mut decorator = RippleDecorator::new(
        config,
        clock.clone(),
        scheduler.shared_handle(),
        Box::new(zoom.clone()),
    );
    decorator.on_surface_resized(args.width, args.height);
    args.trigger(&mut decorator);

    let mut ctx = RecordingContext::new(Size::new(args.width, args.height));
    let mut frames = 0usize;

    while let Some(due) = scheduler.next_due() {
        clock.set(due);
        for _ in scheduler.take_due() {
            ctx.clear();
            let outcome = decorator
                .draw(&mut ctx)
                .context("Frame evaluation failed")?;
            let time_ms = clock.now().as_secs_f64() * 1000.0;
            FrameRecord::new(time_ms, &outcome, zoom.current_scale()).print(args.json)?;
            frames += 1;
        }
    }

    tracing::info!(
        "simulated {} frame requests, {} zoom pulses",
        frames,
        zoom.pulses_started()
    );
    Ok(())
}
