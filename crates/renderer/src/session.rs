use std::time::Instant;

use gallery::{Dialect, Gallery, NavigationError, ShaderEntry};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::{FrameError, GpuBackend, SurfaceSize};
use crate::clock::FrameClock;
use crate::diagnostics::{DiagnosticLog, DiagnosticsSink, ShaderDiagnostic};
use crate::frame::{drive_frame, FrameOutcome};
use crate::program::{build_program, BuildError};
use crate::slot::{CompiledProgram, ProgramSlot};
use crate::synthesize::{synthesize, VERTEX_SOURCE};

/// Direction of a user navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
}

#[derive(Debug, Error)]
pub enum ActivationError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("shader '{shader}' failed to build: {source}")]
    Build {
        shader: String,
        #[source]
        source: BuildError,
    },
}

/// Owns everything the gallery needs between frames.
///
/// Navigation always moves the cursor first and then activates the newly
/// selected entry. When activation fails the cursor stays on the failed entry
/// while the previous program keeps rendering with its clock untouched.
pub struct Session<B: GpuBackend, D = DiagnosticLog> {
    backend: B,
    gallery: Gallery,
    slot: ProgramSlot<B::Program>,
    clock: FrameClock,
    diagnostics: D,
}

impl<B: GpuBackend> Session<B, DiagnosticLog> {
    pub fn new(backend: B, gallery: Gallery, now: Instant) -> Self {
        Self::with_diagnostics(backend, gallery, DiagnosticLog::new(), now)
    }
}

impl<B: GpuBackend, D: DiagnosticsSink> Session<B, D> {
    pub fn with_diagnostics(backend: B, gallery: Gallery, diagnostics: D, now: Instant) -> Self {
        Self {
            backend,
            gallery,
            slot: ProgramSlot::new(),
            clock: FrameClock::new(now),
            diagnostics,
        }
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
        dialect_hint: Option<Dialect>,
    ) -> usize {
        self.gallery.register(name, source, dialect_hint)
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Gallery index of the program currently rendering.
    pub fn active_entry_index(&self) -> Option<usize> {
        self.slot.active().map(CompiledProgram::source_entry_index)
    }

    pub fn active_entry(&self) -> Option<&ShaderEntry> {
        self.active_entry_index()
            .and_then(|index| self.gallery.get(index))
    }

    pub fn active_program(&self) -> Option<&CompiledProgram<B::Program>> {
        self.slot.active()
    }

    /// Seconds since the active program was installed.
    pub fn elapsed(&self, now: Instant) -> f64 {
        self.clock.elapsed(now)
    }

    /// Activates the entry under the cursor. An empty gallery stays inert.
    pub fn start(&mut self, now: Instant) -> Result<(), ActivationError> {
        match self.gallery.cursor() {
            Some(index) => self.activate(index, now),
            None => {
                debug!("gallery is empty; nothing to activate");
                Ok(())
            }
        }
    }

    pub fn next(&mut self, now: Instant) -> Result<(), ActivationError> {
        match self.gallery.next() {
            Some(index) => self.activate(index, now),
            None => Ok(()),
        }
    }

    pub fn previous(&mut self, now: Instant) -> Result<(), ActivationError> {
        match self.gallery.previous() {
            Some(index) => self.activate(index, now),
            None => Ok(()),
        }
    }

    pub fn navigate(&mut self, navigation: Navigation, now: Instant) -> Result<(), ActivationError> {
        match navigation {
            Navigation::Next => self.next(now),
            Navigation::Previous => self.previous(now),
        }
    }

    pub fn jump_to(&mut self, index: usize, now: Instant) -> Result<(), ActivationError> {
        let index = self.gallery.jump_to(index)?;
        self.activate(index, now)
    }

    /// Builds the entry at `index` and swaps it in on success.
    ///
    /// On failure the diagnostic goes to the sink and the slot and clock are
    /// left exactly as they were.
    pub fn activate(&mut self, index: usize, now: Instant) -> Result<(), ActivationError> {
        let Some(entry) = self.gallery.get(index) else {
            let len = self.gallery.len();
            warn!(index, len, "ignoring activation of unknown gallery entry");
            return Err(NavigationError::OutOfRange { index, len }.into());
        };

        let dialect = entry.dialect();
        let fragment = synthesize(entry, dialect);
        debug!(shader = %entry.name(), index, %dialect, "building shader program");

        match build_program(&mut self.backend, VERTEX_SOURCE, &fragment) {
            Ok(program) => {
                self.slot
                    .replace(&mut self.backend, CompiledProgram::new(program, index, now));
                self.clock.reset(now);
                self.diagnostics.clear();
                info!(shader = %entry.name(), index, %dialect, "activated shader");
                Ok(())
            }
            Err(err) => {
                let shader = entry.name().to_string();
                self.diagnostics.report(&ShaderDiagnostic {
                    shader_name: shader.clone(),
                    text: err.to_string(),
                });
                Err(ActivationError::Build {
                    shader,
                    source: err,
                })
            }
        }
    }

    pub fn render_frame(
        &mut self,
        size: SurfaceSize,
        now: Instant,
    ) -> Result<FrameOutcome, FrameError> {
        drive_frame(&mut self.backend, &mut self.slot, &self.clock, size, now)
    }

    /// Deletes the active program.
    pub fn shutdown(&mut self) {
        self.slot.release(&mut self.backend);
    }
}
