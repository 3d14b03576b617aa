//! Bitmap Text Rendering
//!
//! This module provides procedural text rendering using a 5x7 bitmap
//! font. Characters are rendered using SDL2 rectangles, supporting
//! scaling, colors, and the UI flag set (font size, alignment,
//! color, kerning adjustment). It also carries the measurement and
//! word-wrap helpers the dialog screens are built on.

use crate::ui::UiFlags;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Glyph cell width in font pixels (5 pixel glyph + 1 pixel spacing)
pub const GLYPH_WIDTH: u32 = 6;
/// Glyph cell height in font pixels (7 pixel glyph + 1 pixel spacing)
pub const GLYPH_HEIGHT: u32 = 8;

/// 5x7 bitmap pattern for a character (1 = pixel on, 0 = pixel off)
fn glyph_pattern(c: char) -> &'static [u8] {
    match c.to_ascii_uppercase() {
        'A' => &[0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => &[0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => &[0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => &[0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => &[0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => &[0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'J' => &[0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => &[0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => &[0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => &[0b10001, 0b11011, 0b10101, 0b10001, 0b10001, 0b10001, 0b10001],
        'N' => &[0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => &[0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => &[0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => &[0b01110, 0b10001, 0b10000, 0b01110, 0b00001, 0b10001, 0b01110],
        'T' => &[0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10101, 0b11011, 0b10001],
        'X' => &[0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => &[0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => &[0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => &[0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => &[0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => &[0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => &[0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => &[0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => &[0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => &[0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => &[0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => &[0b00000, 0b00000, 0b00100, 0b00000, 0b00100, 0b00000, 0b00000],
        '/' => &[0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '<' => &[0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        '>' => &[0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],
        '-' => &[0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '+' => &[0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '.' => &[0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => &[0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000],
        '\'' => &[0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        '?' => &[0b01110, 0b10001, 0b00001, 0b00110, 0b00100, 0b00000, 0b00100],
        '!' => &[0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '(' => &[0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => &[0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        ' ' => &[0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        _ => &[0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111], // Full block for unknown
    }
}

/// Horizontal advance per character at the given scale/tracking.
fn char_advance(scale: u32, tracking: i32) -> i32 {
    (GLYPH_WIDTH * scale) as i32 + tracking
}

/// Measures the pixel width of `text` at the given scale and
/// tracking adjustment (extra pixels between characters, may be
/// negative). The trailing gap is not counted.
pub fn text_width(text: &str, scale: u32, tracking: i32) -> i32 {
    let count = text.chars().count() as i32;
    if count == 0 {
        return 0;
    }
    count * char_advance(scale, tracking) - tracking
}

/// Word-wraps `text` to `max_width` pixels at the given font scale,
/// inserting `\n` breaks. Existing newlines are preserved as
/// paragraph breaks (empty lines survive). A single word wider than
/// the budget is split at the character that overflows.
pub fn word_wrap(text: &str, max_width: u32, scale: u32, tracking: i32) -> String {
    let mut wrapped = String::with_capacity(text.len());

    for (p, paragraph) in text.split('\n').enumerate() {
        if p > 0 {
            wrapped.push('\n');
        }

        let mut line_len = 0usize; // characters on the current line
        for word in paragraph.split(' ') {
            let word_len = word.chars().count();

            // +1 for the joining space
            let candidate = if line_len == 0 { word_len } else { line_len + 1 + word_len };
            if line_len > 0 && !fits(candidate, max_width, scale, tracking) {
                wrapped.push('\n');
                line_len = 0;
            }

            if line_len > 0 {
                wrapped.push(' ');
                line_len += 1;
            }

            // Hard-split a word that cannot fit on a line of its own
            for c in word.chars() {
                if line_len > 0 && !fits(line_len + 1, max_width, scale, tracking) {
                    wrapped.push('\n');
                    line_len = 0;
                }
                wrapped.push(c);
                line_len += 1;
            }
        }
    }

    wrapped
}

fn fits(chars: usize, max_width: u32, scale: u32, tracking: i32) -> bool {
    let width = chars as i32 * char_advance(scale, tracking) - tracking;
    width <= max_width as i32
}

/// Font scale encoded in the flag bits (small is the default).
fn font_scale(flags: UiFlags) -> u32 {
    if flags.contains(UiFlags::FONT_HUGE) {
        4
    } else if flags.contains(UiFlags::FONT_BIG) {
        3
    } else if flags.contains(UiFlags::FONT_MEDIUM) {
        2
    } else {
        1
    }
}

/// Text color encoded in the flag bits (silver is the default).
fn font_color(flags: UiFlags) -> Color {
    if flags.contains(UiFlags::COLOR_GOLD) {
        Color::RGB(221, 190, 110)
    } else if flags.contains(UiFlags::COLOR_RED) {
        Color::RGB(210, 40, 40)
    } else if flags.contains(UiFlags::COLOR_BLUE) {
        Color::RGB(90, 110, 220)
    } else if flags.contains(UiFlags::COLOR_BLACK) {
        Color::RGB(10, 10, 10)
    } else if flags.contains(UiFlags::COLOR_SILVER) {
        Color::RGB(211, 211, 211)
    } else {
        Color::RGB(243, 243, 243)
    }
}

/// Draws `text` into `rect`, honoring the font-size, alignment,
/// vertical-center, color, and kerning-adjustment flags.
///
/// `tracking` is the baseline inter-character adjustment in pixels;
/// `KERNING_FIT` shrinks it further when the text would overflow the
/// rectangle, and `JUSTIFY` stretches it to fill the rectangle.
pub fn draw_string(
    canvas: &mut Canvas<Window>,
    text: &str,
    rect: Rect,
    flags: UiFlags,
    tracking: i32,
) -> Result<(), String> {
    draw_string_color(canvas, text, rect, flags, tracking, font_color(flags))
}

/// [`draw_string`] with an explicit color overriding the flag bits
/// (plain-text widgets carry their own color).
pub fn draw_string_color(
    canvas: &mut Canvas<Window>,
    text: &str,
    rect: Rect,
    flags: UiFlags,
    tracking: i32,
    color: Color,
) -> Result<(), String> {
    let scale = font_scale(flags);
    let count = text.chars().count() as i32;
    if count == 0 {
        return Ok(());
    }

    let mut tracking = tracking;
    let width = text_width(text, scale, tracking);
    let gaps = (count - 1).max(1);

    if flags.contains(UiFlags::KERNING_FIT) && width > rect.width() as i32 {
        tracking -= (width - rect.width() as i32 + gaps - 1) / gaps;
    } else if flags.contains(UiFlags::JUSTIFY) && width < rect.width() as i32 && count > 1 {
        tracking += (rect.width() as i32 - width) / gaps;
    }
    let width = text_width(text, scale, tracking);

    let x = if flags.contains(UiFlags::ALIGN_CENTER) {
        rect.x() + (rect.width() as i32 - width) / 2
    } else if flags.contains(UiFlags::ALIGN_RIGHT) {
        rect.x() + rect.width() as i32 - width
    } else {
        rect.x()
    };

    let y = if flags.contains(UiFlags::VERTICAL_CENTER) {
        rect.y() + (rect.height() as i32 - (GLYPH_HEIGHT * scale) as i32) / 2
    } else {
        rect.y()
    };

    draw_glyphs(canvas, text, x, y, color, scale, char_advance(scale, tracking))
}

/// Renders bitmap text using procedural rectangles (5x7 font)
///
/// # Parameters
///
/// - `canvas`: SDL2 canvas to render to
/// - `text`: Text string to render (case-insensitive)
/// - `x`, `y`: Top-left position in pixels
/// - `color`: Text color
/// - `scale`: Scaling factor (1 = 5x7 pixels, 2 = 10x14 pixels, etc.)
pub fn draw_simple_text(
    canvas: &mut Canvas<Window>,
    text: &str,
    x: i32,
    y: i32,
    color: Color,
    scale: u32,
) -> Result<(), String> {
    draw_glyphs(canvas, text, x, y, color, scale, char_advance(scale, 0))
}

fn draw_glyphs(
    canvas: &mut Canvas<Window>,
    text: &str,
    x: i32,
    y: i32,
    color: Color,
    scale: u32,
    advance: i32,
) -> Result<(), String> {
    canvas.set_draw_color(color);
    let pixel_size = scale as i32;

    for (i, c) in text.chars().enumerate() {
        let char_x = x + i as i32 * advance;
        let pattern = glyph_pattern(c);

        for (row, &pattern_row) in pattern.iter().enumerate() {
            for col in 0..5 {
                if (pattern_row >> (4 - col)) & 1 == 1 {
                    canvas.fill_rect(Rect::new(
                        char_x + (col * pixel_size),
                        y + (row as i32 * pixel_size),
                        scale,
                        scale,
                    ))?;
                }
            }
        }
    }

    Ok(())
}
