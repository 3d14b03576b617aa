//! Store and towner dialogs
//!
//! A merchant screen is a fixed grid of 24 text lines inside a
//! framed panel. Lines carry their own flags, an optional
//! right-aligned price, and a selectable marker; navigation moves
//! the selection over selectable lines only, wrapping at either end.
//! The grid itself ([`StoreGrid`]) is plain state; [`StoreScreen`]
//! pairs it with the panel art for drawing.

use crate::display::DisplayMapping;
use crate::input::MenuAction;
use crate::text;
use crate::ui::{draw_widget, UiFlags, Widget, WidgetKind};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

/// Text rows in the store panel grid.
pub const STORE_LINES: usize = 24;

/// Panel frame in logical coordinates.
const FRAME_RECT: (i32, i32, u32, u32) = (160, 60, 320, 320);
/// Left margin of line text inside the panel.
const LINE_X: i32 = 184;
/// First line's top edge.
const LINE_TOP: i32 = 76;
/// Grid pitch per line.
const LINE_SPACING: i32 = 12;
/// Usable line width.
const LINE_WIDTH: u32 = 272;

/// Which merchant/towner dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreId {
    Smith,
    SmithBuy,
    Witch,
    Healer,
    Tavern,
}

/// What a handled input did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// Nothing actionable
    None,
    /// The selected line was confirmed; carries its value
    Selected(i32),
    /// The dialog was dismissed
    Closed,
}

/// One row of the store grid.
#[derive(Debug, Clone)]
pub struct StoreLine {
    pub text: String,
    pub flags: UiFlags,
    pub selectable: bool,
    /// Opaque value reported when the line is confirmed
    pub value: i32,
    /// Price drawn right-aligned on the same row
    pub price: Option<i32>,
}

impl StoreLine {
    pub fn new(text: impl Into<String>, flags: UiFlags, selectable: bool, value: i32) -> Self {
        StoreLine {
            text: text.into(),
            flags,
            selectable,
            value,
            price: None,
        }
    }

    pub fn with_price(mut self, price: i32) -> Self {
        self.price = Some(price);
        self
    }
}

/// Row content: text line, divider rule, or blank.
#[derive(Debug, Clone)]
pub enum Row {
    Blank,
    Divider,
    Line(StoreLine),
}

/// The 24-row line grid and its selection state.
pub struct StoreGrid {
    rows: Vec<Row>,
    selected: usize,
}

impl StoreGrid {
    pub fn new() -> Self {
        StoreGrid {
            rows: vec![Row::Blank; STORE_LINES],
            selected: 0,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Replace the grid row at `line`. Rows past the grid are
    /// ignored rather than grown.
    pub fn set_line(&mut self, line: usize, content: StoreLine) {
        if line < STORE_LINES {
            self.rows[line] = Row::Line(content);
        }
    }

    pub fn set_divider(&mut self, line: usize) {
        if line < STORE_LINES {
            self.rows[line] = Row::Divider;
        }
    }

    /// Reset rows `from..=to` back to blank.
    pub fn clear_lines(&mut self, from: usize, to: usize) {
        for line in from..=to.min(STORE_LINES - 1) {
            self.rows[line] = Row::Blank;
        }
    }

    pub fn is_selectable(&self, line: usize) -> bool {
        matches!(&self.rows[line], Row::Line(l) if l.selectable)
    }

    /// Drop the selection onto the first selectable line.
    pub fn select_first(&mut self) {
        self.selected = (0..STORE_LINES).find(|&i| self.is_selectable(i)).unwrap_or(0);
    }

    /// Move the selection up to the previous selectable line,
    /// wrapping past the top. A grid with no selectable lines keeps
    /// its selection.
    pub fn select_up(&mut self) {
        for step in 1..=STORE_LINES {
            let line = (self.selected + STORE_LINES - step) % STORE_LINES;
            if self.is_selectable(line) {
                self.selected = line;
                return;
            }
        }
    }

    /// Move the selection down to the next selectable line, wrapping
    /// past the bottom.
    pub fn select_down(&mut self) {
        for step in 1..=STORE_LINES {
            let line = (self.selected + step) % STORE_LINES;
            if self.is_selectable(line) {
                self.selected = line;
                return;
            }
        }
    }

    /// Value of the currently selected line, if it is selectable.
    pub fn selected_value(&self) -> Option<i32> {
        match &self.rows[self.selected] {
            Row::Line(l) if l.selectable => Some(l.value),
            _ => None,
        }
    }

    pub fn handle_action(&mut self, action: MenuAction) -> StoreEvent {
        match action {
            MenuAction::Up => {
                self.select_up();
                StoreEvent::None
            }
            MenuAction::Down => {
                self.select_down();
                StoreEvent::None
            }
            MenuAction::Confirm => match self.selected_value() {
                Some(value) => StoreEvent::Selected(value),
                None => StoreEvent::None,
            },
            MenuAction::Back => StoreEvent::Closed,
        }
    }

    /// Grid line under a logical coordinate, if any.
    pub fn line_at(&self, x: i32, y: i32) -> Option<usize> {
        if x < LINE_X || x >= LINE_X + LINE_WIDTH as i32 || y < LINE_TOP {
            return None;
        }
        let line = ((y - LINE_TOP) / LINE_SPACING) as usize;
        (line < STORE_LINES).then_some(line)
    }

    /// Select and confirm the selectable line under a logical
    /// coordinate.
    pub fn click(&mut self, x: i32, y: i32) -> StoreEvent {
        match self.line_at(x, y) {
            Some(line) if self.is_selectable(line) => {
                self.selected = line;
                match self.selected_value() {
                    Some(value) => StoreEvent::Selected(value),
                    None => StoreEvent::None,
                }
            }
            _ => StoreEvent::None,
        }
    }
}

impl Default for StoreGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Slider art shared by scrolling store lists.
#[derive(Clone, Copy)]
pub struct ScrollbarArt<'a> {
    pub track: &'a Texture<'a>,
    pub thumb: &'a Texture<'a>,
    pub arrow: &'a Texture<'a>,
}

/// Slider track position inside the panel.
const SCROLLBAR_RECT: (i32, i32, u32, u32) = (456, 76, 12, 288);
/// Wares that fit on one buy page (two grid rows each).
const PAGE_ITEMS: usize = 9;

pub struct StoreScreen<'a> {
    id: StoreId,
    frame: &'a Texture<'a>,
    grid: StoreGrid,
    scrollbar: Option<Widget<'a>>,
}

impl<'a> StoreScreen<'a> {
    pub fn new(id: StoreId, frame: &'a Texture<'a>) -> Self {
        StoreScreen {
            id,
            frame,
            grid: StoreGrid::new(),
            scrollbar: None,
        }
    }

    /// The smith's front menu.
    pub fn smith(frame: &'a Texture<'a>) -> Self {
        let mut screen = StoreScreen::new(StoreId::Smith, frame);
        let grid = &mut screen.grid;

        grid.clear_lines(0, STORE_LINES - 1);
        grid.set_line(
            1,
            StoreLine::new(
                "WELCOME TO THE BLACKSMITH",
                UiFlags::COLOR_GOLD | UiFlags::ALIGN_CENTER,
                false,
                0,
            ),
        );
        grid.set_divider(3);
        grid.set_line(
            7,
            StoreLine::new("TALK", UiFlags::ALIGN_CENTER | UiFlags::COLOR_BLUE, true, 0),
        );
        grid.set_line(10, StoreLine::new("BUY ITEMS", UiFlags::ALIGN_CENTER, true, 1));
        grid.set_line(13, StoreLine::new("SELL ITEMS", UiFlags::ALIGN_CENTER, true, 2));
        grid.set_line(16, StoreLine::new("REPAIR ITEMS", UiFlags::ALIGN_CENTER, true, 3));
        grid.set_line(19, StoreLine::new("LEAVE THE SHOP", UiFlags::ALIGN_CENTER, true, 4));
        grid.select_first();
        screen
    }

    /// The smith's buy list over externally supplied wares
    /// (name, price); the store only presents them.
    pub fn smith_buy(frame: &'a Texture<'a>, slider: ScrollbarArt<'a>, wares: &[(String, i32)]) -> Self {
        let mut screen = StoreScreen::new(StoreId::SmithBuy, frame);
        let (sx, sy, sw, sh) = SCROLLBAR_RECT;
        let mut scrollbar = Widget::new(
            WidgetKind::Scrollbar {
                track: slider.track,
                thumb: slider.thumb,
                arrow: slider.arrow,
                position: 0,
                range: (STORE_LINES - 1) as u32,
            },
            Rect::new(sx, sy, sw, sh),
            UiFlags::empty(),
        );
        // The slider only appears once the wares overflow one page
        if wares.len() <= PAGE_ITEMS {
            scrollbar.add_flag(UiFlags::HIDDEN);
        }
        screen.scrollbar = Some(scrollbar);
        let grid = &mut screen.grid;

        grid.clear_lines(0, STORE_LINES - 1);
        grid.set_line(
            0,
            StoreLine::new("I HAVE THESE ITEMS FOR SALE:", UiFlags::COLOR_GOLD, false, 0),
        );
        grid.set_divider(2);

        // Two rows per item, capped to the grid; a fuller rendition
        // would page through with the scrollbar art
        let first = 4usize;
        let last = STORE_LINES - 3;
        for (i, (name, price)) in wares.iter().enumerate() {
            let line = first + i * 2;
            if line > last {
                break;
            }
            grid.set_line(
                line,
                StoreLine::new(name.clone(), UiFlags::empty(), true, i as i32).with_price(*price),
            );
        }
        grid.set_line(
            STORE_LINES - 1,
            StoreLine::new("BACK", UiFlags::ALIGN_CENTER, true, -1),
        );
        grid.select_first();
        screen
    }

    pub fn id(&self) -> StoreId {
        self.id
    }

    /// Logical position of the selected line, for snapping the
    /// cursor onto it when the dialog opens.
    pub fn selected_point(&self) -> (i32, i32) {
        (
            LINE_X,
            LINE_TOP + self.grid.selected() as i32 * LINE_SPACING + LINE_SPACING / 2,
        )
    }

    pub fn handle_action(&mut self, action: MenuAction) -> StoreEvent {
        let event = self.grid.handle_action(action);
        self.sync_scrollbar();
        event
    }

    /// Handle a mouse press at raw output coordinates.
    pub fn handle_click(&mut self, mapping: &DisplayMapping, x: i32, y: i32) -> StoreEvent {
        let (lx, ly) = mapping.output_to_logical(x, y);
        let event = self.grid.click(lx, ly);
        self.sync_scrollbar();
        event
    }

    /// Keep the slider thumb on the selected line.
    fn sync_scrollbar(&mut self) {
        if let Some(scrollbar) = &mut self.scrollbar {
            if let WidgetKind::Scrollbar { position, .. } = scrollbar.kind_mut() {
                *position = self.grid.selected() as u32;
            }
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let (fx, fy, fw, fh) = FRAME_RECT;
        canvas.copy(self.frame, None, Rect::new(fx, fy, fw, fh))?;

        for (i, row) in self.grid.rows().iter().enumerate() {
            let y = LINE_TOP + i as i32 * LINE_SPACING;

            match row {
                Row::Blank => {}
                Row::Divider => {
                    canvas.set_draw_color(Color::RGB(120, 100, 60));
                    canvas.fill_rect(Rect::new(LINE_X, y + LINE_SPACING / 2 - 1, LINE_WIDTH, 2))?;
                }
                Row::Line(line) => {
                    let rect = Rect::new(LINE_X, y, LINE_WIDTH, LINE_SPACING as u32);
                    text::draw_string(canvas, &line.text, rect, line.flags, 0)?;

                    if let Some(price) = line.price {
                        text::draw_string(
                            canvas,
                            &format!("{} GOLD", price),
                            rect,
                            (line.flags & !UiFlags::ALIGN_CENTER) | UiFlags::ALIGN_RIGHT,
                            0,
                        )?;
                    }

                    if i == self.grid.selected() && line.selectable {
                        text::draw_simple_text(
                            canvas,
                            ">",
                            LINE_X - 12,
                            y,
                            Color::RGB(221, 190, 110),
                            1,
                        )?;
                    }
                }
            }
        }

        if let Some(scrollbar) = &self.scrollbar {
            draw_widget(canvas, scrollbar)?;
        }

        Ok(())
    }
}
