//! Widget data model
//!
//! A widget is one renderable/interactive element: a tag (the
//! variant), a rectangle in logical coordinates, and a bitmask of
//! style/state flags. The variant set is closed and dispatched by
//! tag in the render pass; there is no nesting and no parent-child
//! structure. The tag and rectangle never change after construction;
//! only flags and the small per-variant state (frame index, pressed,
//! edit buffer) do.

use bitflags::bitflags;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Texture;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

bitflags! {
    /// Style and state flags shared by every widget.
    ///
    /// The mask is open: mutually exclusive combinations (several
    /// font sizes at once) are not validated here, that is the
    /// caller's responsibility.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UiFlags: u16 {
        const FONT_SMALL      = 1 << 0;
        const FONT_MEDIUM     = 1 << 1;
        const FONT_BIG        = 1 << 2;
        const FONT_HUGE       = 1 << 3;
        const ALIGN_CENTER    = 1 << 4;
        const ALIGN_RIGHT     = 1 << 5;
        const JUSTIFY         = 1 << 6;
        const VERTICAL_CENTER = 1 << 7;
        const COLOR_SILVER    = 1 << 8;
        const COLOR_GOLD      = 1 << 9;
        const COLOR_RED       = 1 << 10;
        const COLOR_BLUE      = 1 << 11;
        const COLOR_BLACK     = 1 << 12;
        const DISABLED        = 1 << 13;
        const HIDDEN          = 1 << 14;
        const KERNING_FIT     = 1 << 15;
    }
}

/// Errors from widget geometry queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// List item index past the end of the observed item sequence
    ItemIndexOutOfRange { index: usize, count: usize },

    /// Vertical coordinate above the top of the list
    PointAboveList { y: i32, top: i32 },
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UiError::ItemIndexOutOfRange { index, count } => {
                write!(f, "List item index {} out of range (count: {})", index, count)
            }
            UiError::PointAboveList { y, top } => {
                write!(f, "Point y={} is above the list top y={}", y, top)
            }
        }
    }
}

impl std::error::Error for UiError {}

impl From<UiError> for String {
    fn from(error: UiError) -> Self {
        error.to_string()
    }
}

/// Text content for a label widget.
///
/// `Static` owns its string; `Live` observes a shared buffer some
/// other part of the game mutates between frames (timers, counters),
/// so the widget always renders the current value without being
/// rebuilt.
#[derive(Debug, Clone)]
pub enum TextSource {
    Static(String),
    Live(Rc<RefCell<String>>),
}

/// Borrow guard over the current text value, usable as a `&str`.
pub enum ResolvedText<'a> {
    Borrowed(&'a str),
    Shared(Ref<'a, String>),
}

impl Deref for ResolvedText<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        match self {
            ResolvedText::Borrowed(s) => s,
            ResolvedText::Shared(s) => s,
        }
    }
}

impl TextSource {
    /// Read the text as it is right now.
    pub fn resolve(&self) -> ResolvedText<'_> {
        match self {
            TextSource::Static(s) => ResolvedText::Borrowed(s),
            TextSource::Live(shared) => ResolvedText::Shared(shared.borrow()),
        }
    }
}

impl From<&str> for TextSource {
    fn from(s: &str) -> Self {
        TextSource::Static(s.to_string())
    }
}

impl From<String> for TextSource {
    fn from(s: String) -> Self {
        TextSource::Static(s)
    }
}

/// One entry of a menu list: label plus an opaque value the screen
/// interprets (save slot, difficulty, item id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub label: String,
    pub value: i32,
}

impl ListItem {
    pub fn new(label: impl Into<String>, value: i32) -> Self {
        ListItem {
            label: label.into(),
            value,
        }
    }
}

/// Per-item geometry over an externally owned item sequence.
///
/// The list observes its items, it never owns them; the base
/// rectangle is `item_height * item count` tall.
#[derive(Debug, Clone)]
pub struct ListView {
    items: Rc<Vec<ListItem>>,
    x: i32,
    y: i32,
    item_width: u32,
    item_height: u32,
}

impl ListView {
    pub fn new(items: Rc<Vec<ListItem>>, x: i32, y: i32, item_width: u32, item_height: u32) -> Self {
        ListView {
            items,
            x,
            y,
            item_width,
            item_height,
        }
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Result<&ListItem, UiError> {
        self.items.get(index).ok_or(UiError::ItemIndexOutOfRange {
            index,
            count: self.items.len(),
        })
    }

    /// Rectangle covering the whole list.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.item_width,
            self.item_height * self.items.len() as u32,
        )
    }

    /// Rectangle of item `index`: the base rect shifted down by
    /// `item_height * index`.
    pub fn item_rect(&self, index: usize) -> Result<Rect, UiError> {
        if index >= self.items.len() {
            return Err(UiError::ItemIndexOutOfRange {
                index,
                count: self.items.len(),
            });
        }

        Ok(Rect::new(
            self.x,
            self.y + self.item_height as i32 * index as i32,
            self.item_width,
            self.item_height,
        ))
    }

    /// Inverse of [`item_rect`](Self::item_rect): which item a
    /// vertical coordinate falls on.
    pub fn index_at(&self, y: i32) -> Result<usize, UiError> {
        if y < self.y {
            return Err(UiError::PointAboveList { y, top: self.y });
        }

        let index = ((y - self.y) / self.item_height as i32) as usize;
        if index >= self.items.len() {
            return Err(UiError::ItemIndexOutOfRange {
                index,
                count: self.items.len(),
            });
        }
        Ok(index)
    }
}

/// The closed widget variant set, dispatched by tag at render time.
pub enum WidgetKind<'a> {
    /// Plain text with an explicit color
    Text {
        source: TextSource,
        color: Color,
    },

    /// Game-font text (color/size carried in the flags)
    ArtText {
        source: TextSource,
    },

    /// Game-font text that acts as a button
    ArtTextButton {
        label: String,
        action: fn(),
    },

    /// Shared image resource, optionally animated as a vertical
    /// strip of `frames` equal-height frames
    Image {
        texture: &'a Texture<'a>,
        animated: bool,
        frame: usize,
        frames: usize,
    },

    /// Sprite button with a label and an action callback
    #[allow(dead_code)] // Reserved for the confirm dialogs
    Button {
        texture: &'a Texture<'a>,
        label: String,
        action: fn(),
        pressed: bool,
    },

    /// Menu list over externally owned items
    List(ListView),

    /// Scrollbar assembled from track, thumb, and arrow art; the
    /// owning screen drives the thumb through `position`/`range`
    Scrollbar {
        track: &'a Texture<'a>,
        thumb: &'a Texture<'a>,
        arrow: &'a Texture<'a>,
        position: u32,
        range: u32,
    },

    /// Single-line text input over a shared buffer
    #[allow(dead_code)] // Reserved for the hero name entry
    Edit {
        hint: String,
        value: Rc<RefCell<String>>,
        max_length: usize,
    },
}

/// A single UI element: variant tag, rectangle, flags.
pub struct Widget<'a> {
    kind: WidgetKind<'a>,
    rect: Rect,
    flags: UiFlags,
}

impl<'a> Widget<'a> {
    pub fn new(kind: WidgetKind<'a>, rect: Rect, flags: UiFlags) -> Self {
        Widget { kind, rect, flags }
    }

    /// Convenience constructor for a (possibly animated) image.
    pub fn image(texture: &'a Texture<'a>, rect: Rect, flags: UiFlags, animated: bool, frames: usize) -> Self {
        Widget::new(
            WidgetKind::Image {
                texture,
                animated,
                frame: 0,
                frames: frames.max(1),
            },
            rect,
            flags,
        )
    }

    /// Convenience constructor for game-font text.
    pub fn art_text(source: impl Into<TextSource>, rect: Rect, flags: UiFlags) -> Self {
        Widget::new(
            WidgetKind::ArtText {
                source: source.into(),
            },
            rect,
            flags,
        )
    }

    pub fn kind(&self) -> &WidgetKind<'a> {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut WidgetKind<'a> {
        &mut self.kind
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn flags(&self) -> UiFlags {
        self.flags
    }

    /// True iff *all* bits of `flag` are set.
    pub fn has_flag(&self, flag: UiFlags) -> bool {
        self.flags.contains(flag)
    }

    /// True iff *any* bit of `flags` is set.
    pub fn has_any_flag(&self, flags: UiFlags) -> bool {
        self.flags.intersects(flags)
    }

    pub fn add_flag(&mut self, flag: UiFlags) {
        self.flags.insert(flag);
    }

    pub fn remove_flag(&mut self, flag: UiFlags) {
        self.flags.remove(flag);
    }

    /// Hit test in logical coordinates.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.rect.contains_point((x, y))
    }

    /// Append typed text to an edit field's buffer, up to its
    /// maximum length. Non-edit and disabled widgets ignore input.
    #[allow(dead_code)] // Reserved for the hero name entry
    pub fn edit_input(&mut self, typed: &str) {
        if self.has_flag(UiFlags::DISABLED) {
            return;
        }

        if let WidgetKind::Edit {
            value, max_length, ..
        } = &self.kind
        {
            let mut buffer = value.borrow_mut();
            for c in typed.chars() {
                if buffer.chars().count() >= *max_length {
                    break;
                }
                buffer.push(c);
            }
        }
    }

    /// Remove the last character of an edit field's buffer.
    #[allow(dead_code)] // Reserved for the hero name entry
    pub fn edit_backspace(&mut self) {
        if let WidgetKind::Edit { value, .. } = &self.kind {
            value.borrow_mut().pop();
        }
    }

    /// Run the button action, if this widget has one and is enabled.
    /// Returns whether an action ran.
    pub fn activate(&self) -> bool {
        if self.has_any_flag(UiFlags::DISABLED | UiFlags::HIDDEN) {
            return false;
        }

        match &self.kind {
            WidgetKind::Button { action, .. } | WidgetKind::ArtTextButton { action, .. } => {
                action();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_widget(flags: UiFlags) -> Widget<'static> {
        Widget::art_text("HELLO", Rect::new(0, 0, 100, 38), flags)
    }

    #[test]
    fn test_add_then_has_flag() {
        let mut w = text_widget(UiFlags::empty());

        w.add_flag(UiFlags::COLOR_GOLD);
        assert!(w.has_flag(UiFlags::COLOR_GOLD));

        w.remove_flag(UiFlags::COLOR_GOLD);
        assert!(!w.has_flag(UiFlags::COLOR_GOLD));
    }

    #[test]
    fn test_has_flag_requires_all_bits() {
        let w = text_widget(UiFlags::FONT_MEDIUM | UiFlags::ALIGN_CENTER);

        assert!(w.has_flag(UiFlags::FONT_MEDIUM | UiFlags::ALIGN_CENTER));
        assert!(!w.has_flag(UiFlags::FONT_MEDIUM | UiFlags::COLOR_RED));
    }

    #[test]
    fn test_has_any_flag_matches_disjunction() {
        let w = text_widget(UiFlags::FONT_MEDIUM);

        let probe = UiFlags::FONT_MEDIUM | UiFlags::COLOR_RED;
        assert_eq!(
            w.has_any_flag(probe),
            w.has_flag(UiFlags::FONT_MEDIUM) || w.has_flag(UiFlags::COLOR_RED)
        );
        assert!(w.has_any_flag(probe));
        assert!(!w.has_any_flag(UiFlags::COLOR_RED | UiFlags::COLOR_BLUE));
    }

    #[test]
    fn test_no_mutual_exclusion_enforced() {
        let mut w = text_widget(UiFlags::FONT_SMALL);
        w.add_flag(UiFlags::FONT_HUGE);

        // Both size bits stay set; resolution happens at draw time
        assert!(w.has_flag(UiFlags::FONT_SMALL | UiFlags::FONT_HUGE));
    }

    #[test]
    fn test_live_text_reflects_current_value() {
        let shared = Rc::new(RefCell::new("GOLD: 0".to_string()));
        let source = TextSource::Live(Rc::clone(&shared));

        assert_eq!(&*source.resolve(), "GOLD: 0");

        *shared.borrow_mut() = "GOLD: 450".to_string();
        assert_eq!(&*source.resolve(), "GOLD: 450");
    }

    #[test]
    fn test_static_text_is_snapshot() {
        let source = TextSource::from("FIXED");
        assert_eq!(&*source.resolve(), "FIXED");
    }

    fn five_item_list() -> ListView {
        let items = Rc::new(
            (0..5)
                .map(|i| ListItem::new(format!("ITEM {}", i), i))
                .collect::<Vec<_>>(),
        );
        ListView::new(items, 60, 100, 200, 20)
    }

    #[test]
    fn test_item_rect_offsets_by_height() {
        let list = five_item_list();

        for i in 0..5 {
            let rect = list.item_rect(i).unwrap();
            assert_eq!(rect.y(), 100 + 20 * i as i32);
            assert_eq!(rect.x(), 60);
            assert_eq!(rect.width(), 200);
            assert_eq!(rect.height(), 20);
        }
    }

    #[test]
    fn test_index_at_inverts_item_rect() {
        let list = five_item_list();

        for i in 0..5 {
            let rect = list.item_rect(i).unwrap();
            assert_eq!(list.index_at(rect.y()).unwrap(), i);
        }
    }

    #[test]
    fn test_index_at_mid_item() {
        // 5 items, height 20, top at y=100: y=140 falls on item 2
        let list = five_item_list();
        assert_eq!(list.index_at(140).unwrap(), 2);
        assert_eq!(list.item_rect(2).unwrap(), Rect::new(60, 140, 200, 20));
    }

    #[test]
    fn test_item_rect_out_of_range() {
        let list = five_item_list();
        assert_eq!(
            list.item_rect(5),
            Err(UiError::ItemIndexOutOfRange { index: 5, count: 5 })
        );
    }

    #[test]
    fn test_index_at_out_of_bounds() {
        let list = five_item_list();

        assert_eq!(list.index_at(99), Err(UiError::PointAboveList { y: 99, top: 100 }));
        // Just past the last item
        assert!(list.index_at(200).is_err());
    }

    #[test]
    fn test_base_rect_covers_all_items() {
        let list = five_item_list();
        assert_eq!(list.rect(), Rect::new(60, 100, 200, 100));
    }

    #[test]
    fn test_activate_respects_disabled() {
        fn noop() {}

        let mut w = Widget::new(
            WidgetKind::ArtTextButton {
                label: "NEW GAME".to_string(),
                action: noop,
            },
            Rect::new(0, 0, 100, 20),
            UiFlags::empty(),
        );

        assert!(w.activate());
        w.add_flag(UiFlags::DISABLED);
        assert!(!w.activate());
    }

    #[test]
    fn test_plain_text_not_activatable() {
        let w = text_widget(UiFlags::empty());
        assert!(!w.activate());
    }

    #[test]
    fn test_contains_point() {
        let w = text_widget(UiFlags::empty());
        assert!(w.contains_point(50, 20));
        assert!(!w.contains_point(150, 20));
    }

    fn edit_widget(buffer: Rc<RefCell<String>>, max_length: usize) -> Widget<'static> {
        Widget::new(
            WidgetKind::Edit {
                hint: "ENTER NAME".to_string(),
                value: buffer,
                max_length,
            },
            Rect::new(0, 0, 200, 20),
            UiFlags::empty(),
        )
    }

    #[test]
    fn test_edit_input_caps_at_max_length() {
        let buffer = Rc::new(RefCell::new(String::new()));
        let mut w = edit_widget(Rc::clone(&buffer), 4);

        w.edit_input("MERLIN");
        assert_eq!(&*buffer.borrow(), "MERL");

        w.edit_backspace();
        assert_eq!(&*buffer.borrow(), "MER");
    }

    #[test]
    fn test_edit_ignores_input_when_disabled() {
        let buffer = Rc::new(RefCell::new(String::new()));
        let mut w = edit_widget(Rc::clone(&buffer), 8);

        w.add_flag(UiFlags::DISABLED);
        w.edit_input("HI");
        assert!(buffer.borrow().is_empty());
    }

    #[test]
    fn test_edit_writes_through_shared_buffer() {
        // The screen owns the buffer; the widget only borrows rights
        // to mutate it
        let buffer = Rc::new(RefCell::new("AB".to_string()));
        let mut w = edit_widget(Rc::clone(&buffer), 8);

        w.edit_input("C");
        assert_eq!(&*buffer.borrow(), "ABC");
    }
}
