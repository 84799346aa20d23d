use std::path::{Path, PathBuf};

use renderer::GpuPowerPreference;

/// Manifest used when neither `--manifest` nor `SHADERGALLERY_MANIFEST` is set.
pub const DEFAULT_MANIFEST: &str = "shaders/gallery.toml";

pub fn resolve_manifest(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST))
}

/// Parses `WIDTHxHEIGHT` for `--size`; both sides must be positive.
pub fn parse_surface_size(value: &str) -> Result<(u32, u32), String> {
    let Some((width, height)) = value.trim().split_once(['x', 'X', '×']) else {
        return Err(format!("'{value}' is not WIDTHxHEIGHT (e.g. 1280x720)"));
    };
    let dimension = |raw: &str, axis: &str| match raw.trim().parse::<u32>() {
        Ok(0) => Err(format!("{axis} must be greater than zero")),
        Ok(pixels) => Ok(pixels),
        Err(err) => Err(format!("invalid {axis} '{}': {err}", raw.trim())),
    };
    Ok((dimension(width, "width")?, dimension(height, "height")?))
}

pub fn parse_gpu_power(value: &str) -> Result<GpuPowerPreference, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "high" | "performance" | "discrete" => Ok(GpuPowerPreference::High),
        "low" | "low-power" | "integrated" => Ok(GpuPowerPreference::Low),
        other => Err(format!("invalid GPU power preference '{other}'; use high or low")),
    }
}
