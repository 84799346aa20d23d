use std::path::Path;

use anyhow::{Context, Result};
use gallery::{Gallery, ManifestFile};
use renderer::{Renderer, RendererConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::bootstrap::resolve_manifest;
use crate::cli::{ListArgs, RunArgs};

pub fn run(args: RunArgs) -> Result<()> {
    initialise_tracing();

    let manifest_path = resolve_manifest(args.manifest.as_deref());
    let (title, gallery) = load(&manifest_path)?;
    info!(
        manifest = %manifest_path.display(),
        entries = gallery.len(),
        "loaded gallery"
    );

    let defaults = RendererConfig::default();
    let config = RendererConfig {
        surface_size: args.size.unwrap_or(defaults.surface_size),
        title: title.unwrap_or(defaults.title),
        start_index: args.start,
        gpu_power: args.gpu_power,
    };
    Renderer::new(config, gallery).run()
}

pub fn list(args: ListArgs) -> Result<()> {
    let manifest_path = resolve_manifest(args.manifest.as_deref());
    let (title, gallery) = load(&manifest_path)?;

    if let Some(title) = title {
        println!("{title}");
    }
    for (index, entry) in gallery.entries().iter().enumerate() {
        println!("{index:>3}  {:<8}  {}", entry.dialect(), entry.name());
    }
    Ok(())
}

fn load(path: &Path) -> Result<(Option<String>, Gallery)> {
    let manifest = ManifestFile::load(path)
        .with_context(|| format!("failed to load gallery manifest {}", path.display()))?;
    let title = manifest.title().map(str::to_string);
    let gallery = manifest
        .into_gallery()
        .with_context(|| format!("failed to read shaders listed in {}", path.display()))?;
    Ok((title, gallery))
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
