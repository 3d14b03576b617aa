//! Title screen
//!
//! Background art, the animated logo, and a copyright line that
//! appears a beat after the art. The screen dismisses itself after a
//! timeout or on the first input of any kind.

use crate::input;
use crate::ui::{advance_animations, draw_widgets, UiFlags, Widget};
use sdl2::event::Event;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

/// The title dismisses itself after this long with no input.
pub const TITLE_TIMEOUT_MS: u32 = 7_000;

/// Frames before the copyright line is revealed.
const COPYRIGHT_DELAY_FRAMES: u32 = 30;

const COPYRIGHT: &str = "COPYRIGHT 1996 DUSKWELL STUDIOS";

/// Index of the copyright widget in the sequence.
const COPYRIGHT_WIDGET: usize = 2;

pub struct TitleScreen<'a> {
    widgets: Vec<Widget<'a>>,
    deadline: u32,
    frames_shown: u32,
}

impl<'a> TitleScreen<'a> {
    /// Build the title widget sequence. `logo_frames` is the frame
    /// count of the logo's vertical animation strip.
    pub fn new(
        background: &'a Texture<'a>,
        logo: &'a Texture<'a>,
        logo_frames: usize,
        now: u32,
    ) -> Self {
        let widgets = vec![
            Widget::image(background, Rect::new(0, 0, 640, 480), UiFlags::empty(), false, 1),
            Widget::image(
                logo,
                Rect::new(0, 182, 640, 200),
                UiFlags::ALIGN_CENTER,
                true,
                logo_frames,
            ),
            Widget::art_text(
                COPYRIGHT,
                Rect::new(49, 410, 550, 26),
                UiFlags::FONT_MEDIUM | UiFlags::ALIGN_CENTER | UiFlags::HIDDEN,
            ),
        ];

        TitleScreen {
            widgets,
            deadline: now.wrapping_add(TITLE_TIMEOUT_MS),
            frames_shown: 0,
        }
    }

    /// True once the no-input timeout has passed.
    pub fn timed_out(&self, now: u32) -> bool {
        now.wrapping_sub(self.deadline) < u32::MAX / 2
    }

    /// Any key, mouse button, or menu action leaves the title.
    pub fn handle_event(&self, event: &Event) -> bool {
        input::is_dismiss_event(event)
    }

    /// Advance the logo animation and reveal the copyright line once
    /// its delay has elapsed. Called once per frame.
    pub fn update(&mut self) {
        advance_animations(&mut self.widgets);

        self.frames_shown = self.frames_shown.saturating_add(1);
        if self.frames_shown == COPYRIGHT_DELAY_FRAMES {
            self.widgets[COPYRIGHT_WIDGET].remove_flag(UiFlags::HIDDEN);
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        draw_widgets(canvas, &self.widgets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_screen() -> TitleScreen<'static> {
        TitleScreen {
            widgets: vec![
                Widget::art_text("BG", Rect::new(0, 0, 640, 480), UiFlags::empty()),
                Widget::art_text("LOGO", Rect::new(0, 182, 640, 200), UiFlags::empty()),
                Widget::art_text(
                    COPYRIGHT,
                    Rect::new(49, 410, 550, 26),
                    UiFlags::FONT_MEDIUM | UiFlags::ALIGN_CENTER | UiFlags::HIDDEN,
                ),
            ],
            deadline: 10_000,
            frames_shown: 0,
        }
    }

    #[test]
    fn test_timeout_window() {
        let screen = bare_screen();

        assert!(!screen.timed_out(9_999));
        assert!(screen.timed_out(10_000));
        assert!(screen.timed_out(10_001));
    }

    #[test]
    fn test_timeout_survives_tick_wraparound() {
        let mut screen = bare_screen();
        screen.deadline = u32::MAX.wrapping_add(5_000);

        assert!(!screen.timed_out(u32::MAX - 1_000));
        assert!(screen.timed_out(u32::MAX.wrapping_add(5_001)));
    }

    #[test]
    fn test_copyright_revealed_after_delay() {
        let mut screen = bare_screen();

        for _ in 0..COPYRIGHT_DELAY_FRAMES - 1 {
            screen.update();
        }
        assert!(screen.widgets[COPYRIGHT_WIDGET].has_flag(UiFlags::HIDDEN));

        screen.update();
        assert!(!screen.widgets[COPYRIGHT_WIDGET].has_flag(UiFlags::HIDDEN));
    }
}
