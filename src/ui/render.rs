//! Widget render pass
//!
//! One read-only walk over a screen's widget sequence per frame,
//! dispatching on the variant tag. Mutation (animation frames,
//! pressed state, edit buffers) happens between passes, in response
//! to input and time events, never inside the pass itself.

use crate::text;
use crate::ui::widget::{UiFlags, Widget, WidgetKind};
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

/// Button sprite strips carry default/pressed/disabled frames.
const BUTTON_FRAMES: u32 = 3;

/// Draw every visible widget in sequence order (later entries on
/// top). The pass itself never mutates widget state.
pub fn draw_widgets(canvas: &mut Canvas<Window>, widgets: &[Widget]) -> Result<(), String> {
    for widget in widgets {
        draw_widget(canvas, widget)?;
    }
    Ok(())
}

pub fn draw_widget(canvas: &mut Canvas<Window>, widget: &Widget) -> Result<(), String> {
    if widget.has_flag(UiFlags::HIDDEN) {
        return Ok(());
    }

    let rect = widget.rect();
    let flags = widget.flags();

    match widget.kind() {
        WidgetKind::Text { source, color } => {
            let current = source.resolve();
            text::draw_string_color(canvas, &current, rect, flags, 0, *color)
        }

        WidgetKind::ArtText { source } => {
            let current = source.resolve();
            text::draw_string(canvas, &current, rect, flags, 0)
        }

        WidgetKind::ArtTextButton { label, .. } => {
            let mut flags = flags;
            if widget.has_flag(UiFlags::DISABLED) {
                flags.insert(UiFlags::COLOR_BLACK);
            }
            text::draw_string(canvas, label, rect, flags, 0)
        }

        WidgetKind::Image {
            texture,
            frame,
            frames,
            ..
        } => draw_image(canvas, widget, texture, *frame, *frames),

        WidgetKind::Button {
            texture,
            label,
            pressed,
            ..
        } => {
            let query = texture.query();
            let frame_height = query.height / BUTTON_FRAMES;
            let frame = if widget.has_flag(UiFlags::DISABLED) {
                2
            } else if *pressed {
                1
            } else {
                0
            };

            let src = Rect::new(0, (frame * frame_height) as i32, query.width, frame_height);
            canvas.copy(texture, src, rect)?;

            // Pressed buttons nudge the label down a pixel
            let label_rect = if *pressed {
                Rect::new(rect.x(), rect.y() + 1, rect.width(), rect.height())
            } else {
                rect
            };
            text::draw_string(
                canvas,
                label,
                label_rect,
                flags | UiFlags::ALIGN_CENTER | UiFlags::VERTICAL_CENTER,
                0,
            )
        }

        WidgetKind::List(list) => {
            for (i, item) in list.items().iter().enumerate() {
                let item_rect = list.item_rect(i)?;
                text::draw_string(canvas, &item.label, item_rect, flags, 0)?;
            }
            Ok(())
        }

        WidgetKind::Scrollbar {
            track,
            thumb,
            arrow,
            position,
            range,
        } => {
            canvas.copy(track, None, rect)?;

            let arrow_query = arrow.query();
            let arrow_h = arrow_query.height / 2;
            let up_src = Rect::new(0, 0, arrow_query.width, arrow_h);
            let down_src = Rect::new(0, arrow_h as i32, arrow_query.width, arrow_h);

            let up_dst = Rect::new(rect.x(), rect.y(), rect.width(), arrow_h);
            let down_dst = Rect::new(
                rect.x(),
                rect.y() + rect.height() as i32 - arrow_h as i32,
                rect.width(),
                arrow_h,
            );
            canvas.copy(arrow, up_src, up_dst)?;
            canvas.copy(arrow, down_src, down_dst)?;

            let thumb_query = thumb.query();
            let thumb_y = scrollbar_thumb_y(rect, arrow_h, thumb_query.height, *position, *range);
            canvas.copy(
                thumb,
                None,
                Rect::new(rect.x(), thumb_y, rect.width(), thumb_query.height),
            )
        }

        WidgetKind::Edit { hint, value, .. } => {
            let current = value.borrow();
            if current.is_empty() {
                text::draw_string(canvas, hint, rect, flags | UiFlags::COLOR_SILVER, 0)
            } else {
                text::draw_string(canvas, &current, rect, flags, 0)
            }
        }
    }
}

fn draw_image(
    canvas: &mut Canvas<Window>,
    widget: &Widget,
    texture: &Texture,
    frame: usize,
    frames: usize,
) -> Result<(), String> {
    let query = texture.query();
    let frame_height = query.height / frames.max(1) as u32;
    let src = Rect::new(0, (frame as u32 * frame_height) as i32, query.width, frame_height);

    // Centered images keep their natural frame size inside the
    // widget rect; otherwise the image stretches to fill it
    let rect = widget.rect();
    let dst = if widget.has_flag(UiFlags::ALIGN_CENTER) {
        Rect::new(
            rect.x() + (rect.width() as i32 - query.width as i32) / 2,
            rect.y(),
            query.width,
            frame_height,
        )
    } else {
        rect
    };

    canvas.copy(texture, src, dst)?;
    Ok(())
}

/// Step every animated image widget to its next frame. Called from
/// the update phase of the loop, between render passes.
pub fn advance_animations(widgets: &mut [Widget]) {
    for widget in widgets {
        if let WidgetKind::Image {
            animated: true,
            frame,
            frames,
            ..
        } = widget.kind_mut()
        {
            *frame = next_frame(*frame, *frames);
        }
    }
}

fn next_frame(frame: usize, frames: usize) -> usize {
    (frame + 1) % frames.max(1)
}

/// Vertical position of a scrollbar thumb within `rect`, given the
/// current position in `0..=max` and the arrow/thumb heights.
pub fn scrollbar_thumb_y(rect: Rect, arrow_h: u32, thumb_h: u32, current: u32, max: u32) -> i32 {
    let span = rect.height() as i32 - 2 * arrow_h as i32 - thumb_h as i32;
    let top = rect.y() + arrow_h as i32;

    if max == 0 || span <= 0 {
        return top;
    }
    top + span * current.min(max) as i32 / max as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widget::Widget;
    use sdl2::rect::Rect;

    #[test]
    fn test_thumb_at_start() {
        let rect = Rect::new(0, 100, 20, 200);
        assert_eq!(scrollbar_thumb_y(rect, 10, 30, 0, 9), 110);
    }

    #[test]
    fn test_thumb_at_end() {
        let rect = Rect::new(0, 100, 20, 200);
        // span = 200 - 20 - 30 = 150
        assert_eq!(scrollbar_thumb_y(rect, 10, 30, 9, 9), 260);
    }

    #[test]
    fn test_thumb_midway() {
        let rect = Rect::new(0, 0, 20, 130);
        // span = 130 - 10 - 10 = 110
        assert_eq!(scrollbar_thumb_y(rect, 5, 10, 1, 2), 60);
    }

    #[test]
    fn test_thumb_clamps_current_to_max() {
        let rect = Rect::new(0, 0, 20, 130);
        assert_eq!(
            scrollbar_thumb_y(rect, 5, 10, 99, 2),
            scrollbar_thumb_y(rect, 5, 10, 2, 2)
        );
    }

    #[test]
    fn test_thumb_degenerate_track() {
        // Track shorter than arrows + thumb pins the thumb below the
        // top arrow
        let rect = Rect::new(0, 40, 20, 30);
        assert_eq!(scrollbar_thumb_y(rect, 10, 20, 3, 9), 50);
    }

    #[test]
    fn test_next_frame_wraps() {
        assert_eq!(next_frame(0, 15), 1);
        assert_eq!(next_frame(14, 15), 0);
        assert_eq!(next_frame(0, 1), 0);
    }

    #[test]
    fn test_advance_ignores_static_widgets() {
        let mut widgets = vec![Widget::art_text(
            "X",
            Rect::new(0, 0, 10, 10),
            crate::ui::UiFlags::empty(),
        )];
        advance_animations(&mut widgets);
        assert_eq!(widgets.len(), 1);
    }
}
