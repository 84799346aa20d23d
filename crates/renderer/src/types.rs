use std::fmt;

/// Adapter selection hint forwarded to wgpu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GpuPowerPreference {
    /// Prefer an integrated or otherwise power-saving adapter.
    Low,
    /// Prefer the fastest adapter available.
    #[default]
    High,
}

impl fmt::Display for GpuPowerPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GpuPowerPreference::Low => "low",
            GpuPowerPreference::High => "high",
        })
    }
}

/// Settings for the gallery window.
#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// Initial window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Prefix for the window title; the current entry is appended.
    pub title: String,
    /// Gallery index to show first instead of index 0.
    pub start_index: Option<usize>,
    /// Adapter selection hint.
    pub gpu_power: GpuPowerPreference,
}

impl Default for RendererConfig {
    /// A 1280x720 window starting at the first entry.
    fn default() -> Self {
        Self {
            surface_size: (1280, 720),
            title: "Shader Gallery".to_string(),
            start_index: None,
            gpu_power: GpuPowerPreference::default(),
        }
    }
}
