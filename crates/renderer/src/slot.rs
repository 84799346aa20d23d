use std::time::Instant;

use crate::backend::GpuBackend;

/// A linked program together with where it came from.
#[derive(Debug)]
pub struct CompiledProgram<P> {
    program: P,
    source_entry_index: usize,
    created_at: Instant,
}

impl<P> CompiledProgram<P> {
    pub fn new(program: P, source_entry_index: usize, created_at: Instant) -> Self {
        Self {
            program,
            source_entry_index,
            created_at,
        }
    }

    pub fn program(&self) -> &P {
        &self.program
    }

    pub fn program_mut(&mut self) -> &mut P {
        &mut self.program
    }

    pub fn source_entry_index(&self) -> usize {
        self.source_entry_index
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}

/// Holds at most one live program.
#[derive(Debug)]
pub struct ProgramSlot<P> {
    active: Option<CompiledProgram<P>>,
}

impl<P> Default for ProgramSlot<P> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<P> ProgramSlot<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }

    pub fn active(&self) -> Option<&CompiledProgram<P>> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut CompiledProgram<P>> {
        self.active.as_mut()
    }

    /// Installs `next`, deleting the program it supersedes first.
    pub fn replace<B>(&mut self, backend: &mut B, next: CompiledProgram<P>)
    where
        B: GpuBackend<Program = P>,
    {
        self.release(backend);
        self.active = Some(next);
    }

    /// Deletes the active program, if any.
    pub fn release<B>(&mut self, backend: &mut B)
    where
        B: GpuBackend<Program = P>,
    {
        if let Some(previous) = self.active.take() {
            backend.delete_program(previous.program);
        }
    }
}
