//! Quest narration window
//!
//! The framed dialog box scrolling narration text upward behind a
//! half-transparent backdrop. Layout mirrors the classic panel: a
//! 591x303 frame with the text clipped to a 543x260 content region
//! inset below its top edge.

use crate::audio::AudioBackend;
use crate::input;
use crate::narration::{Message, ScrollSession, ScrollTuning, LINE_HEIGHT};
use crate::ui::UiFlags;
use sdl2::event::Event;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

/// Window frame position and size in logical coordinates.
const FRAME_RECT: (i32, i32, u32, u32) = (24, 87, 591, 303);
/// Backdrop fill, slightly inset from the frame border.
const BACKDROP_RECT: (i32, i32, u32, u32) = (27, 90, 585, 297);
/// Content region: x, top, width, clip height.
const CONTENT_X: i32 = 48;
const CONTENT_TOP: i32 = 136;
const CONTENT_WIDTH: u32 = 543;
const CONTENT_HEIGHT: u32 = 260;

const TEXT_FLAGS: UiFlags = UiFlags::FONT_MEDIUM;
const TEXT_TRACKING: i32 = 2;

pub struct NarrationScreen<'a> {
    session: ScrollSession,
    frame: &'a Texture<'a>,
}

impl<'a> NarrationScreen<'a> {
    pub fn new(frame: &'a Texture<'a>, tuning: ScrollTuning) -> Self {
        NarrationScreen {
            session: ScrollSession::new(tuning),
            frame,
        }
    }

    /// Start narrating `message`; plays its cue either way, scrolls
    /// only if the message is flagged scrollable.
    pub fn begin(
        &mut self,
        message: &Message,
        audio: &mut dyn AudioBackend,
        now: u32,
    ) -> Result<(), String> {
        self.session.begin(message, audio, now)?;
        if self.session.is_active() {
            println!("Narration '{}': {} lines", message.id, self.session.lines().len());
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Any input closes the window early.
    pub fn handle_event(&mut self, event: &Event) {
        if input::is_dismiss_event(event) {
            self.session.end();
        }
    }

    /// Draw the window and the currently visible slice of text.
    /// Deactivates the session once the text has scrolled past.
    pub fn render(&mut self, canvas: &mut Canvas<Window>, now: u32) -> Result<(), String> {
        let offset = self.session.current_offset(now);

        let (fx, fy, fw, fh) = FRAME_RECT;
        canvas.copy(self.frame, None, Rect::new(fx, fy, fw, fh))?;

        let (bx, by, bw, bh) = BACKDROP_RECT;
        canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, 128));
        canvas.fill_rect(Rect::new(bx, by, bw, bh))?;
        canvas.set_blend_mode(sdl2::render::BlendMode::None);

        canvas.set_clip_rect(Rect::new(CONTENT_X, CONTENT_TOP, CONTENT_WIDTH, CONTENT_HEIGHT));
        for line in self.session.visible_window(offset) {
            let rect = Rect::new(
                CONTENT_X,
                CONTENT_TOP + line.y,
                CONTENT_WIDTH,
                LINE_HEIGHT as u32,
            );
            crate::text::draw_string(canvas, line.text, rect, TEXT_FLAGS, TEXT_TRACKING)?;
        }
        canvas.set_clip_rect(None);

        Ok(())
    }
}
