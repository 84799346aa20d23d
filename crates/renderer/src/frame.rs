use std::time::Instant;

use tracing::{trace, warn};

use crate::backend::{FrameError, GpuBackend, SurfaceSize};
use crate::clock::FrameClock;
use crate::slot::ProgramSlot;
use crate::uniforms::{bind_frame_uniforms, FrameUniforms};

/// Opaque black.
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

/// What a single frame iteration did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// No program is active yet; a blank frame was presented instead.
    Idle,
    /// The surface has no area.
    Skipped,
    /// The backend dropped the frame; the next one may succeed.
    Dropped,
    Drawn {
        elapsed: f64,
        frame_index: i32,
        bound: usize,
    },
}

/// Renders one frame with the slot's program, or a blank frame when the slot
/// is empty.
///
/// Only [`FrameError::Fatal`] escapes; transient failures become
/// [`FrameOutcome::Dropped`].
pub fn drive_frame<B: GpuBackend>(
    backend: &mut B,
    slot: &mut ProgramSlot<B::Program>,
    clock: &FrameClock,
    size: SurfaceSize,
    now: Instant,
) -> Result<FrameOutcome, FrameError> {
    if size.is_empty() {
        trace!(width = size.width, height = size.height, "skipping frame for empty surface");
        return Ok(FrameOutcome::Skipped);
    }
    let Some(active) = slot.active_mut() else {
        backend.resize(size);
        return settle(backend.present_clear(CLEAR_COLOR), FrameOutcome::Idle);
    };

    let uniforms = FrameUniforms::new(clock.elapsed(now), size);
    backend.resize(size);
    backend.clear(CLEAR_COLOR);
    let bound = bind_frame_uniforms(backend, active.program_mut(), &uniforms);

    let drawn = FrameOutcome::Drawn {
        elapsed: uniforms.elapsed,
        frame_index: uniforms.frame_index(),
        bound,
    };
    settle(backend.draw_quad(active.program()), drawn)
}

fn settle(
    result: Result<(), FrameError>,
    outcome: FrameOutcome,
) -> Result<FrameOutcome, FrameError> {
    match result {
        Ok(()) => Ok(outcome),
        Err(FrameError::Transient(reason)) => {
            warn!(%reason, "dropped frame");
            Ok(FrameOutcome::Dropped)
        }
        Err(fatal) => Err(fatal),
    }
}
