use wgpu::naga;
use wgpu::naga::front::glsl::{Frontend, Options, ParseErrors};
use wgpu::naga::valid::{Capabilities, ValidationFlags, Validator};
use wgpu::naga::{Module, Span, WithSpan};

use crate::backend::ShaderStage;

fn naga_stage(stage: ShaderStage) -> naga::ShaderStage {
    match stage {
        ShaderStage::Vertex => naga::ShaderStage::Vertex,
        ShaderStage::Fragment => naga::ShaderStage::Fragment,
    }
}

/// Parses and validates GLSL 450 for `stage`, returning a compiler-style log
/// (`line:column: message`) on failure.
pub(crate) fn parse_glsl(stage: ShaderStage, source: &str) -> Result<Module, String> {
    let mut frontend = Frontend::default();
    let module = frontend
        .parse(&Options::from(naga_stage(stage)), source)
        .map_err(|errors| format_parse_errors(&errors, source))?;

    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|err| format_validation_error(&err, source))?;

    Ok(module)
}

fn position(span: Span, source: &str) -> String {
    let location = span.location(source);
    format!("{}:{}", location.line_number, location.line_position)
}

fn format_parse_errors(errors: &ParseErrors, source: &str) -> String {
    errors
        .errors
        .iter()
        .map(|error| format!("{}: {}", position(error.meta, source), error.kind))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_validation_error<E>(err: &WithSpan<E>, source: &str) -> String
where
    E: std::error::Error,
{
    let mut message = err.as_inner().to_string();
    let mut cause = err.as_inner().source();
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = inner.source();
    }

    match err.spans().next() {
        Some((span, _)) => format!("{}: {message}", position(*span, source)),
        None => message,
    }
}
