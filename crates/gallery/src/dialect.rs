use std::fmt;

use serde::{Deserialize, Serialize};

/// Entry-point symbol whose presence marks a source as ShaderToy-style.
pub const STANDARD_ENTRY_POINT: &str = "mainImage";

/// Authoring convention a shader source was written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Dialect {
    /// Defines its own `main` and writes through the `o`, `FC`, `r`, `t`
    /// shorthands.
    #[serde(rename = "legacy")]
    Legacy,
    /// Defines `mainImage(out vec4, in vec2)` and reads `iTime`,
    /// `iResolution` and friends.
    #[serde(rename = "standard", alias = "shadertoy")]
    StandardInterface,
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Legacy => "legacy",
            Dialect::StandardInterface => "standard",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classifies a raw source by looking for [`STANDARD_ENTRY_POINT`].
///
/// This is a plain substring test: a comment or identifier that merely
/// contains `mainImage` also selects the standard dialect.
pub fn classify(source: &str) -> Dialect {
    if source.contains(STANDARD_ENTRY_POINT) {
        Dialect::StandardInterface
    } else {
        Dialect::Legacy
    }
}
