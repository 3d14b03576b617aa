//! Logical/output coordinate mapping
//!
//! The game reasons in a fixed logical resolution while the actual
//! render target may be scaled,
//! letterboxed, or high-DPI. This module converts between the two
//! spaces through a per-frame snapshot of the renderer's scale and
//! viewport, so the same snapshot maps both directions consistently.

use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Snapshot of the renderer's scale factor and viewport origin.
///
/// Capture one per frame with [`DisplayMapping::from_canvas`] and use
/// it for every conversion that frame. The identity mapping (no
/// scaling context) leaves coordinates untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMapping {
    /// Renderer scale factor (uniform; SDL reports per-axis but the
    /// logical-size path keeps them equal)
    pub scale: f32,

    /// Viewport origin in logical coordinates (letterbox offset)
    pub view_x: i32,
    pub view_y: i32,
}

impl DisplayMapping {
    /// Identity mapping: no scaling, no viewport offset.
    pub const IDENTITY: DisplayMapping = DisplayMapping {
        scale: 1.0,
        view_x: 0,
        view_y: 0,
    };

    /// Capture the current scale/viewport state from the canvas.
    pub fn from_canvas(canvas: &Canvas<Window>) -> Self {
        let (scale_x, _scale_y) = canvas.scale();
        let viewport = canvas.viewport();

        // A zero scale means no scaling context is active yet
        if scale_x <= 0.0 {
            return Self::IDENTITY;
        }

        DisplayMapping {
            scale: scale_x,
            view_x: viewport.x(),
            view_y: viewport.y(),
        }
    }

    /// Map a physical output pixel (e.g. a raw mouse position) to
    /// logical coordinates: divide by scale, then subtract the
    /// viewport origin.
    pub fn output_to_logical(&self, x: i32, y: i32) -> (i32, i32) {
        let lx = (x as f32 / self.scale) as i32 - self.view_x;
        let ly = (y as f32 / self.scale) as i32 - self.view_y;
        (lx, ly)
    }

    /// Map logical coordinates to a physical output pixel: add the
    /// viewport origin, then multiply by scale. Inverse of
    /// [`output_to_logical`](Self::output_to_logical) under the same
    /// snapshot, up to integer truncation.
    pub fn logical_to_output(&self, x: i32, y: i32) -> (i32, i32) {
        let ox = ((x + self.view_x) as f32 * self.scale) as i32;
        let oy = ((y + self.view_y) as f32 * self.scale) as i32;
        (ox, oy)
    }
}

impl Default for DisplayMapping {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Scale a rectangle from logical space to output-surface space.
///
/// Each axis scales independently by the ratio of output size to
/// logical size, so non-uniform (stretched) output is permitted.
#[allow(dead_code)] // Reserved for render targets that need software scaling
pub fn scale_output_rect(rect: Rect, logical: (u32, u32), output: (u32, u32)) -> Rect {
    let (lw, lh) = (logical.0 as i64, logical.1 as i64);
    let (ow, oh) = (output.0 as i64, output.1 as i64);

    Rect::new(
        (rect.x() as i64 * ow / lw) as i32,
        (rect.y() as i64 * oh / lh) as i32,
        (rect.width() as i64 * ow / lw) as u32,
        (rect.height() as i64 * oh / lh) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_noop() {
        let mapping = DisplayMapping::IDENTITY;

        assert_eq!(mapping.output_to_logical(123, 456), (123, 456));
        assert_eq!(mapping.logical_to_output(123, 456), (123, 456));
    }

    #[test]
    fn test_round_trip_with_scale_and_viewport() {
        let mapping = DisplayMapping {
            scale: 2.0,
            view_x: 10,
            view_y: 20,
        };

        for &(x, y) in &[(0, 0), (5, 7), (320, 240), (639, 479)] {
            let (lx, ly) = mapping.output_to_logical(x * 2, y * 2);
            let (ox, oy) = mapping.logical_to_output(lx, ly);
            assert_eq!((ox, oy), (x * 2, y * 2));
        }
    }

    #[test]
    fn test_round_trip_logical_first() {
        let mapping = DisplayMapping {
            scale: 3.0,
            view_x: 4,
            view_y: 0,
        };

        let (ox, oy) = mapping.logical_to_output(100, 50);
        assert_eq!((ox, oy), (312, 150));
        assert_eq!(mapping.output_to_logical(ox, oy), (100, 50));
    }

    #[test]
    fn test_viewport_offset_subtracted() {
        let mapping = DisplayMapping {
            scale: 1.0,
            view_x: 80,
            view_y: 60,
        };

        // A click on the viewport origin lands at logical (0, 0)
        assert_eq!(mapping.output_to_logical(80, 60), (0, 0));
        assert_eq!(mapping.logical_to_output(0, 0), (80, 60));
    }

    #[test]
    fn test_scale_output_rect_uniform() {
        let scaled = scale_output_rect(Rect::new(10, 20, 30, 40), (640, 480), (1280, 960));
        assert_eq!(scaled, Rect::new(20, 40, 60, 80));
    }

    #[test]
    fn test_scale_output_rect_non_uniform() {
        // Output stretched horizontally only
        let scaled = scale_output_rect(Rect::new(10, 20, 30, 40), (640, 480), (1920, 480));
        assert_eq!(scaled, Rect::new(30, 20, 90, 40));
    }

    #[test]
    fn test_scale_output_rect_identity() {
        let rect = Rect::new(1, 2, 3, 4);
        assert_eq!(scale_output_rect(rect, (640, 480), (640, 480)), rect);
    }
}
