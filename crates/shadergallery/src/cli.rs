use std::path::PathBuf;

use clap::{Parser, Subcommand};
use renderer::GpuPowerPreference;

use crate::bootstrap::{parse_gpu_power, parse_surface_size};

#[derive(Parser, Debug)]
#[command(
    name = "shadergallery",
    author,
    version,
    about = "Cycle through GLSL fragment shaders in a window",
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Gallery manifest listing the shaders to show, in order.
    #[arg(long, value_name = "PATH", env = "SHADERGALLERY_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Initial window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_surface_size)]
    pub size: Option<(u32, u32)>,

    /// Zero-based index of the entry to show first.
    #[arg(long, value_name = "INDEX")]
    pub start: Option<usize>,

    /// Adapter preference: `high` (default) or `low`.
    #[arg(
        long,
        value_name = "PREFERENCE",
        value_parser = parse_gpu_power,
        default_value_t = GpuPowerPreference::default()
    )]
    pub gpu_power: GpuPowerPreference,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the gallery entries and their detected dialects, then exit.
    List(ListArgs),
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Gallery manifest to inspect.
    #[arg(long, value_name = "PATH", env = "SHADERGALLERY_MANIFEST")]
    pub manifest: Option<PathBuf>,
}

pub fn parse() -> Cli {
    Cli::parse()
}
