use tracing::{debug, error};

/// A build failure attributed to a gallery entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDiagnostic {
    pub shader_name: String,
    pub text: String,
}

/// Receives build failures for the current selection.
pub trait DiagnosticsSink {
    fn report(&mut self, diagnostic: &ShaderDiagnostic);

    /// Called after a successful activation.
    fn clear(&mut self);
}

/// Logs diagnostics and remembers the one currently surfaced.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    current: Option<ShaderDiagnostic>,
    reported: usize,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ShaderDiagnostic> {
        self.current.as_ref()
    }

    /// Total failures reported since creation.
    pub fn reported(&self) -> usize {
        self.reported
    }
}

impl DiagnosticsSink for DiagnosticLog {
    fn report(&mut self, diagnostic: &ShaderDiagnostic) {
        error!(shader = %diagnostic.shader_name, "{}", diagnostic.text);
        self.current = Some(diagnostic.clone());
        self.reported += 1;
    }

    fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            debug!(shader = %previous.shader_name, "cleared shader diagnostic");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_then_clear() {
        let mut log = DiagnosticLog::new();
        let diagnostic = ShaderDiagnostic {
            shader_name: "Broken".to_string(),
            text: "link failed: no main".to_string(),
        };

        log.report(&diagnostic);
        assert_eq!(log.current(), Some(&diagnostic));
        assert_eq!(log.reported(), 1);

        log.clear();
        assert!(log.current().is_none());
        assert_eq!(log.reported(), 1);
    }
}
