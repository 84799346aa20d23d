use winit::event::TouchPhase;
use winit::keyboard::{Key, NamedKey};

use crate::session::Navigation;

/// Horizontal travel, in physical pixels, beyond which a touch counts as a swipe.
pub const MIN_SWIPE_DISTANCE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Navigate(Navigation),
    Exit,
}

pub fn action_for_key(key: &Key) -> Option<InputAction> {
    match key {
        Key::Named(NamedKey::ArrowRight) => Some(InputAction::Navigate(Navigation::Next)),
        Key::Named(NamedKey::ArrowLeft) => Some(InputAction::Navigate(Navigation::Previous)),
        Key::Named(NamedKey::Escape) => Some(InputAction::Exit),
        _ => None,
    }
}

/// Follows a single touch from start to end and classifies it.
///
/// Swiping left moves to the next entry, swiping right to the previous one.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    touch: Option<u64>,
    start_x: f64,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, id: u64, phase: TouchPhase, x: f64) -> Option<Navigation> {
        match phase {
            TouchPhase::Started => {
                if self.touch.is_none() {
                    self.touch = Some(id);
                    self.start_x = x;
                }
                None
            }
            TouchPhase::Moved => None,
            TouchPhase::Ended => {
                if self.touch != Some(id) {
                    return None;
                }
                self.touch = None;
                let travel = self.start_x - x;
                if travel.abs() <= MIN_SWIPE_DISTANCE {
                    None
                } else if travel > 0.0 {
                    Some(Navigation::Next)
                } else {
                    Some(Navigation::Previous)
                }
            }
            TouchPhase::Cancelled => {
                if self.touch == Some(id) {
                    self.touch = None;
                }
                None
            }
        }
    }
}
