//! Input classification
//!
//! Translates raw SDL2 events into the handful of high-level menu
//! actions the screens understand, so screen code never pattern
//! matches on keycodes itself.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;

/// High-level navigation actions shared by every menu screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Up,
    Down,
    Confirm,
    Back,
}

/// Classify an event as a menu action, if it is one.
pub fn menu_action(event: &Event) -> Option<MenuAction> {
    match event {
        Event::KeyDown {
            keycode: Some(key), ..
        } => match *key {
            Keycode::Up | Keycode::W => Some(MenuAction::Up),
            Keycode::Down | Keycode::S => Some(MenuAction::Down),
            Keycode::Return | Keycode::Space => Some(MenuAction::Confirm),
            Keycode::Escape => Some(MenuAction::Back),
            _ => None,
        },
        _ => None,
    }
}

/// Whether this event dismisses a passive screen (title, finished
/// narration): any menu action, any key press, or any mouse button.
pub fn is_dismiss_event(event: &Event) -> bool {
    if menu_action(event).is_some() {
        return true;
    }
    matches!(event, Event::KeyDown { .. } | Event::MouseButtonDown { .. })
}
