//! Gallery model shared by the renderer and the `shadergallery` binary.
//!
//! A gallery is an append-only, ordered list of [`ShaderEntry`] values plus a
//! cursor that navigation moves cyclically. Entries are opaque GLSL snippets;
//! [`classify`] decides which authoring dialect a snippet follows so the
//! renderer can pick the matching wrapper.
//!
//! ```text
//! gallery.toml ──► GalleryManifest ──► ManifestFile::into_gallery ──► Gallery
//!                                                                    │
//!                                  next / previous / jump_to ◄───────┘
//! ```

mod dialect;
mod entry;
mod gallery;
mod manifest;

pub use dialect::{classify, Dialect, STANDARD_ENTRY_POINT};
pub use entry::ShaderEntry;
pub use gallery::{Gallery, NavigationError};
pub use manifest::{load_gallery, GalleryManifest, ManifestEntry, ManifestError, ManifestFile};
