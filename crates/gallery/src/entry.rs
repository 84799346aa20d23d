use crate::dialect::{classify, Dialect};

/// One registered visualization. Immutable once it enters a gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderEntry {
    name: String,
    source: String,
    dialect_hint: Option<Dialect>,
}

impl ShaderEntry {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            dialect_hint: None,
        }
    }

    /// Records the dialect the registrant claims. Classification still decides.
    pub fn with_dialect_hint(mut self, hint: Option<Dialect>) -> Self {
        self.dialect_hint = hint;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn dialect_hint(&self) -> Option<Dialect> {
        self.dialect_hint
    }

    /// Dialect derived from the source text, recomputed on every call.
    pub fn dialect(&self) -> Dialect {
        classify(&self.source)
    }

    /// Returns the hint when it disagrees with the classified dialect.
    pub fn hint_mismatch(&self) -> Option<Dialect> {
        self.dialect_hint.filter(|hint| *hint != self.dialect())
    }
}
