//! Scrolling narration engine
//!
//! Narration text scrolls upward through a fixed 8-line window in
//! sync with its voice-over: the text is word-wrapped once when the
//! narration starts, a scroll speed (milliseconds per pixel) is
//! derived from the cue duration, and the visible offset is then a
//! pure function of the start tick and the current tick. Nothing is
//! accumulated frame to frame, so a dropped frame self-corrects on
//! the next one.

use crate::audio::{AudioBackend, SoundCue};
use crate::text;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixels for a line of text and the empty space under it.
pub const LINE_HEIGHT: i32 = 38;

/// Lines visible in the narration window at once.
pub const VISIBLE_LINES: usize = 8;

/// Text starts this many pixels below the window and scrolls up
/// into view.
pub const LEAD_IN: i32 = 260;

/// Padding lines appended to the scroll height so the tail of the
/// text lingers on screen briefly after the speaker finishes.
const TRAILING_LINES: usize = 5;

/// Tuning knobs for narration pacing and layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollTuning {
    /// Wrap budget for narration lines, in pixels
    pub wrap_width: u32,

    /// Font scale lines are wrapped and drawn at
    pub font_scale: u32,

    /// Inter-character tracking for narration text
    pub tracking: i32,

    /// Estimated audio frames per line when the backend cannot
    /// report a real cue duration
    pub fallback_frames_per_line: u32,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        ScrollTuning {
            wrap_width: 543,
            font_scale: 2,
            tracking: 2,
            fallback_frames_per_line: 3000,
        }
    }
}

/// Errors from narration pacing math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationError {
    /// Cue duration resolved to zero frames
    ZeroDuration,

    /// No text lines to scroll
    ZeroTextHeight,
}

impl fmt::Display for NarrationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NarrationError::ZeroDuration => write!(f, "Narration duration is zero"),
            NarrationError::ZeroTextHeight => write!(f, "Narration has no text lines"),
        }
    }
}

impl std::error::Error for NarrationError {}

impl From<NarrationError> for String {
    fn from(error: NarrationError) -> Self {
        error.to_string()
    }
}

/// One entry of the narration content table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sound: SoundCue,
    /// Whether the text scrolls; non-scrollable messages only play
    /// their cue
    pub scrollable: bool,
}

/// Static table binding message ids to text and sound cues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTable {
    pub messages: Vec<Message>,
}

impl MessageTable {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let table: MessageTable = serde_json::from_str(&content)?;
        Ok(table)
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }
}

/// A line positioned inside the narration window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleLine<'a> {
    pub text: &'a str,
    /// Vertical position relative to the window's content region
    pub y: i32,
}

/// State of one narration playback: the wrapped lines, the scroll
/// speed, and the start tick. Lines and speed are fixed for the
/// session; only the passage of time moves it.
pub struct ScrollSession {
    tuning: ScrollTuning,
    lines: Vec<String>,
    /// Scroll speed in ms per pixel; > 0 while active
    speed: u32,
    /// Tick at which scrolling started
    start: u32,
    active: bool,
}

impl ScrollSession {
    pub fn new(tuning: ScrollTuning) -> Self {
        ScrollSession {
            tuning,
            lines: Vec::new(),
            speed: 1,
            start: 0,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Total pixel height of the wrapped text.
    pub fn text_height(&self) -> i32 {
        LINE_HEIGHT * self.lines.len() as i32
    }

    /// Word-wrap `raw` into the line sequence, splitting on the
    /// wrap's inserted breaks. Empty lines are preserved; they render
    /// as blank rows.
    pub fn load_text(&mut self, raw: &str) {
        let wrapped = text::word_wrap(
            raw,
            self.tuning.wrap_width,
            self.tuning.font_scale,
            self.tuning.tracking,
        );
        self.lines = wrapped.split('\n').map(str::to_string).collect();
    }

    /// Scroll speed in ms/px for a narration of `duration_frames`
    /// over the loaded lines, padded by five trailing lines so the
    /// last text lingers briefly. Strictly positive on success.
    pub fn calculate_text_speed(&self, duration_frames: u32) -> Result<u32, NarrationError> {
        if duration_frames == 0 {
            return Err(NarrationError::ZeroDuration);
        }

        let text_height = LINE_HEIGHT as u32 * (self.lines.len() + TRAILING_LINES) as u32;
        if self.lines.is_empty() || text_height == 0 {
            return Err(NarrationError::ZeroTextHeight);
        }

        // Integer division may floor to zero for very short cues;
        // speed must stay positive
        Ok((duration_frames / text_height).max(1))
    }

    /// Start the given narration. Scrollable messages load their
    /// text, compute a speed, and begin scrolling at `now`; the
    /// sound cue plays unconditionally either way.
    pub fn begin(
        &mut self,
        message: &Message,
        audio: &mut dyn AudioBackend,
        now: u32,
    ) -> Result<(), NarrationError> {
        if message.scrollable {
            self.load_text(&message.text);

            let frames = audio.duration_frames(message.sound).unwrap_or_else(|| {
                self.lines.len() as u32 * self.tuning.fallback_frames_per_line
            });

            self.speed = self.calculate_text_speed(frames)?;
            self.start = now;
            self.active = true;
        }
        audio.play_cue(message.sound);
        Ok(())
    }

    /// Scroll offset at tick `now`. Negative during the lead-in,
    /// then grows one pixel per `speed` ms. Once the offset reaches
    /// the total text height the session deactivates; this check is
    /// what ends a narration, not merely a query.
    pub fn current_offset(&mut self, now: u32) -> i32 {
        let y = (now.wrapping_sub(self.start) / self.speed) as i32 - LEAD_IN;

        if y >= self.text_height() {
            self.active = false;
        }
        y
    }

    /// The lines visible through the 8-line window at `offset`,
    /// each positioned for a smooth per-pixel scroll: the top line
    /// is `offset / LINE_HEIGHT`, every slot shifted up by
    /// `offset % LINE_HEIGHT`. Blank lines and slots past either end
    /// of the text are omitted.
    pub fn visible_window(&self, offset: i32) -> Vec<VisibleLine<'_>> {
        let top = LINE_HEIGHT / 2 - offset % LINE_HEIGHT;
        let skip = offset / LINE_HEIGHT;

        let mut visible = Vec::with_capacity(VISIBLE_LINES);
        for slot in 0..VISIBLE_LINES as i32 {
            let line_number = skip + slot;
            if line_number < 0 || line_number as usize >= self.lines.len() {
                continue;
            }

            let line = &self.lines[line_number as usize];
            if line.is_empty() {
                continue;
            }

            visible.push(VisibleLine {
                text: line,
                y: top + slot * LINE_HEIGHT,
            });
        }
        visible
    }

    /// Explicitly end the session (screen dismissed, new narration
    /// starting).
    pub fn end(&mut self) {
        self.active = false;
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;

    /// Audio stub that records played cues and reports a fixed
    /// duration.
    struct FixedAudio {
        duration: Option<u32>,
        played: Vec<SoundCue>,
    }

    impl AudioBackend for FixedAudio {
        fn play_cue(&mut self, cue: SoundCue) {
            self.played.push(cue);
        }

        fn duration_frames(&self, _cue: SoundCue) -> Option<u32> {
            self.duration
        }
    }

    fn message(text: &str, scrollable: bool) -> Message {
        Message {
            id: "intro".to_string(),
            text: text.to_string(),
            sound: SoundCue(3),
            scrollable,
        }
    }

    fn session_with_lines(lines: &[&str]) -> ScrollSession {
        let mut session = ScrollSession::new(ScrollTuning::default());
        session.lines = lines.iter().map(|s| s.to_string()).collect();
        session
    }

    #[test]
    fn test_load_text_short_string_is_one_line() {
        let mut session = ScrollSession::new(ScrollTuning::default());
        session.load_text("HELLO");
        assert_eq!(session.lines(), &["HELLO".to_string()]);
    }

    #[test]
    fn test_load_text_preserves_empty_lines() {
        let mut session = ScrollSession::new(ScrollTuning::default());
        session.load_text("FIRST\n\nSECOND");
        assert_eq!(session.lines().len(), 3);
        assert!(session.lines()[1].is_empty());
    }

    #[test]
    fn test_speed_positive_and_inverse_in_line_count() {
        let short = session_with_lines(&["A"; 10]);
        let long = session_with_lines(&["A"; 20]);

        let duration = 600_000;
        let fast = short.calculate_text_speed(duration).unwrap();
        let slow = long.calculate_text_speed(duration).unwrap();

        assert!(fast > 0 && slow > 0);
        // (10 + 5) lines vs (20 + 5) lines: 5/3 ratio, within integer
        // division slack
        assert_eq!(fast, duration / (38 * 15));
        assert_eq!(slow, duration / (38 * 25));
        assert!(fast > slow);
    }

    #[test]
    fn test_speed_clamps_to_minimum() {
        let session = session_with_lines(&["A", "B"]);
        // 1 frame over 266 px of padded height floors to 0
        assert_eq!(session.calculate_text_speed(1), Ok(1));
    }

    #[test]
    fn test_speed_rejects_zero_duration() {
        let session = session_with_lines(&["A"]);
        assert_eq!(session.calculate_text_speed(0), Err(NarrationError::ZeroDuration));
    }

    #[test]
    fn test_speed_rejects_empty_text() {
        let session = session_with_lines(&[]);
        assert_eq!(session.calculate_text_speed(1000), Err(NarrationError::ZeroTextHeight));
    }

    #[test]
    fn test_begin_scrollable_activates_and_plays_cue() {
        let mut session = ScrollSession::new(ScrollTuning::default());
        let mut audio = FixedAudio {
            duration: Some(60_000),
            played: Vec::new(),
        };

        session.begin(&message("HELLO WORLD", true), &mut audio, 1_000).unwrap();

        assert!(session.is_active());
        assert_eq!(audio.played, vec![SoundCue(3)]);
    }

    #[test]
    fn test_begin_non_scrollable_plays_cue_only() {
        let mut session = ScrollSession::new(ScrollTuning::default());
        let mut audio = FixedAudio {
            duration: Some(60_000),
            played: Vec::new(),
        };

        session.begin(&message("HELLO", false), &mut audio, 1_000).unwrap();

        assert!(!session.is_active());
        assert_eq!(audio.played, vec![SoundCue(3)]);
    }

    #[test]
    fn test_begin_uses_fallback_when_duration_unknown() {
        let tuning = ScrollTuning::default();
        let fallback = tuning.fallback_frames_per_line;
        let mut session = ScrollSession::new(tuning);
        let mut audio = SilentAudio;

        session.begin(&message("HELLO", true), &mut audio, 0).unwrap();

        // One line: fallback frames / (38 * 6) padded pixels
        assert_eq!(session.speed, fallback / (38 * 6));
        assert!(session.is_active());
    }

    #[test]
    fn test_offset_starts_at_lead_in() {
        let mut session = session_with_lines(&["HELLO", "WORLD"]);
        session.speed = 100;
        session.start = 5_000;
        session.active = true;

        assert_eq!(session.current_offset(5_000), -260);
        assert!(session.is_active());
    }

    #[test]
    fn test_offset_monotonic_in_time() {
        let mut session = session_with_lines(&["A"; 30]);
        session.speed = 10;
        session.start = 0;
        session.active = true;

        let mut last = i32::MIN;
        for now in (0..5_000).step_by(70) {
            let offset = session.current_offset(now);
            assert!(offset >= last);
            last = offset;
        }
    }

    #[test]
    fn test_session_ends_exactly_at_text_height() {
        // Two lines at height 38: total 76. speed 100 ms/px.
        let mut session = session_with_lines(&["HELLO", "WORLD"]);
        session.speed = 100;
        session.start = 0;
        session.active = true;

        // offset = now/100 - 260; reaches 75 at now = 33_500
        assert_eq!(session.current_offset(33_500), 75);
        assert!(session.is_active());

        // offset 76 == text height: session goes inactive
        assert_eq!(session.current_offset(33_600), 76);
        assert!(!session.is_active());
    }

    #[test]
    fn test_visible_window_positions_slots() {
        let session = session_with_lines(&["ZERO", "ONE", "TWO", "THREE"]);

        // offset 40: top line index 1, remainder 2
        let visible = session.visible_window(40);
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[0].text, "ONE");
        assert_eq!(visible[0].y, 19 - 2);
        assert_eq!(visible[1].text, "TWO");
        assert_eq!(visible[1].y, 19 - 2 + 38);
    }

    #[test]
    fn test_visible_window_skips_blank_lines() {
        let session = session_with_lines(&["ZERO", "", "TWO"]);
        let visible = session.visible_window(0);

        let texts: Vec<&str> = visible.iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["ZERO", "TWO"]);
    }

    #[test]
    fn test_visible_window_during_lead_in() {
        let session = session_with_lines(&["ZERO", "ONE"]);

        // Deep in the lead-in the first line lands in a bottom slot,
        // below the 260 px content clip (invisible on screen)
        let visible = session.visible_window(-260);
        assert_eq!(visible[0].text, "ZERO");
        assert_eq!(visible[0].y, 51 + 6 * 38);
        assert!(visible[0].y >= LEAD_IN);

        // Just before the first line enters: slot 0 sits low in the
        // window
        let visible = session.visible_window(-10);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].text, "ZERO");
        assert_eq!(visible[0].y, 19 + 10);
    }

    #[test]
    fn test_visible_window_past_the_end() {
        let session = session_with_lines(&["ZERO", "ONE"]);
        assert!(session.visible_window(2 * 38).is_empty());
    }

    #[test]
    fn test_end_resets_session() {
        let mut session = session_with_lines(&["A"]);
        session.active = true;

        session.end();
        assert!(!session.is_active());
        assert!(session.lines().is_empty());
    }

    #[test]
    fn test_message_table_lookup() {
        let table = MessageTable {
            messages: vec![message("HELLO", true)],
        };

        assert!(table.get("intro").is_some());
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn test_message_table_round_trips_through_json() {
        let table = MessageTable {
            messages: vec![message("HELLO", true)],
        };

        let json = serde_json::to_string(&table).unwrap();
        let parsed: MessageTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.messages[0].id, "intro");
        assert_eq!(parsed.messages[0].sound, SoundCue(3));
        assert!(parsed.messages[0].scrollable);
    }
}
