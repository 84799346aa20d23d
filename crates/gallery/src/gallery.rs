use thiserror::Error;
use tracing::{debug, warn};

use crate::dialect::Dialect;
use crate::entry::ShaderEntry;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    #[error("gallery index {index} is out of range for {len} entries")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered entries plus a cursor; insertion order is navigation order.
///
/// The cursor satisfies `cursor < len` whenever the gallery is non-empty.
/// An empty gallery is inert: navigation reports `None` and nothing moves.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    entries: Vec<ShaderEntry>,
    cursor: usize,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns its index.
    ///
    /// Duplicate names are kept as independent entries. A dialect hint that
    /// disagrees with classification is logged and otherwise ignored.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
        dialect_hint: Option<Dialect>,
    ) -> usize {
        self.push(ShaderEntry::new(name, source).with_dialect_hint(dialect_hint))
    }

    pub fn push(&mut self, entry: ShaderEntry) -> usize {
        let index = self.entries.len();
        if let Some(hint) = entry.hint_mismatch() {
            warn!(
                shader = %entry.name(),
                index,
                hint = %hint,
                classified = %entry.dialect(),
                "dialect hint disagrees with source; using classified dialect"
            );
        }
        debug!(shader = %entry.name(), index, dialect = %entry.dialect(), "registered shader");
        self.entries.push(entry);
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ShaderEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ShaderEntry> {
        self.entries.get(index)
    }

    pub fn cursor(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.cursor)
    }

    pub fn current(&self) -> Option<&ShaderEntry> {
        self.cursor().and_then(|index| self.get(index))
    }

    /// Advances the cursor cyclically.
    pub fn next(&mut self) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        self.cursor = (self.cursor + 1) % len;
        Some(self.cursor)
    }

    /// Moves the cursor back cyclically.
    pub fn previous(&mut self) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        self.cursor = (self.cursor + len - 1) % len;
        Some(self.cursor)
    }

    pub fn jump_to(&mut self, index: usize) -> Result<usize, NavigationError> {
        let len = self.len();
        if index >= len {
            return Err(NavigationError::OutOfRange { index, len });
        }
        self.cursor = index;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery_of(len: usize) -> Gallery {
        let mut gallery = Gallery::new();
        for index in 0..len {
            gallery.register(format!("shader {index}"), "void main(){}", None);
        }
        gallery
    }

    #[test]
    fn starts_at_first_entry() {
        let gallery = gallery_of(3);
        assert_eq!(gallery.cursor(), Some(0));
        assert_eq!(gallery.current().map(ShaderEntry::name), Some("shader 0"));
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut gallery = gallery_of(3);
        assert_eq!(gallery.previous(), Some(2));
        assert_eq!(gallery.next(), Some(0));
        assert_eq!(gallery.next(), Some(1));
        assert_eq!(gallery.next(), Some(2));
        assert_eq!(gallery.next(), Some(0));
    }

    #[test]
    fn len_steps_in_either_direction_return_to_start() {
        for len in 1..6 {
            let mut gallery = gallery_of(len);
            gallery.jump_to(len / 2).unwrap();
            let start = gallery.cursor();
            for _ in 0..len {
                gallery.next();
            }
            assert_eq!(gallery.cursor(), start);
            for _ in 0..len {
                gallery.previous();
            }
            assert_eq!(gallery.cursor(), start);
        }
    }

    #[test]
    fn cursor_stays_in_bounds_across_mixed_navigation() {
        let mut gallery = gallery_of(5);
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            match seed >> 30 {
                0 => {
                    gallery.next();
                }
                1 => {
                    gallery.previous();
                }
                _ => {
                    let _ = gallery.jump_to((seed >> 8) as usize % 7);
                }
            }
            let cursor = gallery.cursor().unwrap();
            assert!(cursor < gallery.len());
        }
    }

    #[test]
    fn jump_out_of_range_leaves_cursor_untouched() {
        let mut gallery = gallery_of(2);
        gallery.next();
        assert_eq!(
            gallery.jump_to(2),
            Err(NavigationError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(gallery.cursor(), Some(1));
    }

    #[test]
    fn empty_gallery_is_inert() {
        let mut gallery = Gallery::new();
        assert_eq!(gallery.cursor(), None);
        assert_eq!(gallery.next(), None);
        assert_eq!(gallery.previous(), None);
        assert!(gallery.current().is_none());
        assert_eq!(
            gallery.jump_to(0),
            Err(NavigationError::OutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn duplicate_names_are_independent_entries() {
        let mut gallery = Gallery::new();
        let first = gallery.register("Plasma", "void main(){}", None);
        let second = gallery.register("Plasma", "void mainImage(out vec4 c, in vec2 p){}", None);
        assert_ne!(first, second);
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.get(first).unwrap().dialect(), Dialect::Legacy);
        assert_eq!(
            gallery.get(second).unwrap().dialect(),
            Dialect::StandardInterface
        );
    }

    #[test]
    fn mismatched_hint_is_kept_but_classification_wins() {
        let mut gallery = Gallery::new();
        let index = gallery.register("Hinted", "void main(){}", Some(Dialect::StandardInterface));
        let entry = gallery.get(index).unwrap();
        assert_eq!(entry.dialect_hint(), Some(Dialect::StandardInterface));
        assert_eq!(entry.dialect(), Dialect::Legacy);
    }
}
