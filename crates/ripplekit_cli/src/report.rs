//! Per-frame output

use anyhow::Result;
use ripplekit_animation::{FrameOutcome, PaintInstruction};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum OutcomeKind {
    Idle,
    Paint,
    Complete,
}

/// One line of output
#[derive(Serialize)]
pub struct FrameRecord {
    time_ms: f64,
    outcome: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    instruction: Option<PaintInstruction>,
    zoom_scale: f32,
}

impl FrameRecord {
    pub fn new(time_ms: f64, outcome: &FrameOutcome, zoom_scale: f32) -> Self {
        let (outcome, instruction) = match outcome {
            FrameOutcome::Idle => (OutcomeKind::Idle, None),
            FrameOutcome::Paint(instruction) => (OutcomeKind::Paint, Some(*instruction)),
            FrameOutcome::Complete => (OutcomeKind::Complete, None),
        };
        Self {
            time_ms,
            outcome,
            instruction,
            zoom_scale,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_line(&self) -> String {
        match (&self.outcome, &self.instruction) {
            (OutcomeKind::Paint, Some(instruction)) => {
                let highlight = instruction
                    .highlight
                    .map(|highlight| highlight.paint.alpha.to_string())
                    .unwrap_or_else(|| "-".to_string());
                format!(
                    "{:>8.2}ms  frame {:>3}  radius {:>7.2}  alpha {:>3}  highlight {:>3}  zoom {:.4}",
                    self.time_ms,
                    instruction.frame,
                    instruction.ripple.radius,
                    instruction.ripple.paint.alpha,
                    highlight,
                    self.zoom_scale
                )
            }
            (OutcomeKind::Complete, _) => format!("{:>8.2}ms  complete", self.time_ms),
            _ => format!("{:>8.2}ms  idle  zoom {:.4}", self.time_ms, self.zoom_scale),
        }
    }

    /// Print as a JSON line or a text line
    pub fn print(&self, json: bool) -> Result<()> {
        if json {
            println!("{}", self.to_json()?);
        } else {
            println!("{}", self.to_line());
        }
        Ok(())
    }
}
