//! Main menu
//!
//! The list-driven menu shown after the title: background art, the
//! option list, a live caption describing the highlighted option,
//! and a version footer. The caption is shared text the screen
//! rewrites as the selection moves; the widget observes it.

use crate::display::DisplayMapping;
use crate::input::MenuAction;
use crate::ui::{draw_widgets, ListItem, ListView, TextSource, UiFlags, Widget, WidgetKind};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;
use std::cell::RefCell;
use std::rc::Rc;

/// Values carried by the menu's list items.
pub const MENU_NEW_GAME: i32 = 0;
pub const MENU_LOAD_GAME: i32 = 1;
pub const MENU_EXIT: i32 = 2;

const LIST_X: i32 = 220;
const LIST_Y: i32 = 210;
const ITEM_WIDTH: u32 = 200;
const ITEM_HEIGHT: u32 = 36;

fn show_credits() {
    println!("Duskwell is a love letter to the dungeon crawlers of 1996.");
}

fn caption_for(value: i32) -> &'static str {
    match value {
        MENU_NEW_GAME => "BEGIN A NEW ADVENTURE",
        MENU_LOAD_GAME => "RETURN TO A SAVED ADVENTURE",
        MENU_EXIT => "LEAVE DUSKWELL",
        _ => "",
    }
}

pub struct MainMenuScreen<'a> {
    widgets: Vec<Widget<'a>>,
    list: ListView,
    selected: usize,
    caption: Rc<RefCell<String>>,
}

impl<'a> MainMenuScreen<'a> {
    pub fn new(background: &'a Texture<'a>) -> Self {
        let items = Rc::new(vec![
            ListItem::new("NEW GAME", MENU_NEW_GAME),
            ListItem::new("LOAD GAME", MENU_LOAD_GAME),
            ListItem::new("EXIT", MENU_EXIT),
        ]);
        let list = ListView::new(Rc::clone(&items), LIST_X, LIST_Y, ITEM_WIDTH, ITEM_HEIGHT);
        let caption = Rc::new(RefCell::new(caption_for(MENU_NEW_GAME).to_string()));

        let widgets = vec![
            Widget::image(background, Rect::new(0, 0, 640, 480), UiFlags::empty(), false, 1),
            Widget::new(
                WidgetKind::List(list.clone()),
                list.rect(),
                UiFlags::FONT_BIG | UiFlags::ALIGN_CENTER | UiFlags::COLOR_GOLD,
            ),
            Widget::art_text(
                TextSource::Live(Rc::clone(&caption)),
                Rect::new(49, 410, 550, 26),
                UiFlags::FONT_MEDIUM | UiFlags::ALIGN_CENTER,
            ),
            Widget::new(
                WidgetKind::Text {
                    source: TextSource::from(concat!("V", env!("CARGO_PKG_VERSION"))),
                    color: Color::RGB(120, 120, 130),
                },
                Rect::new(10, 462, 120, 12),
                UiFlags::FONT_SMALL,
            ),
            Widget::new(
                WidgetKind::ArtTextButton {
                    label: "CREDITS".to_string(),
                    action: show_credits,
                },
                Rect::new(510, 462, 120, 12),
                UiFlags::FONT_SMALL | UiFlags::ALIGN_RIGHT,
            ),
        ];

        MainMenuScreen {
            widgets,
            list,
            selected: 0,
            caption,
        }
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        *self.caption.borrow_mut() = caption_for(self.selected_value()).to_string();
    }

    fn selected_value(&self) -> i32 {
        self.list
            .item(self.selected)
            .map(|item| item.value)
            .unwrap_or(MENU_EXIT)
    }

    /// Handle a menu action; returns the confirmed option value, if
    /// any.
    pub fn handle_action(&mut self, action: MenuAction) -> Option<i32> {
        let count = self.list.items().len();

        match action {
            MenuAction::Up => {
                self.select((self.selected + count - 1) % count);
                None
            }
            MenuAction::Down => {
                self.select((self.selected + 1) % count);
                None
            }
            MenuAction::Confirm => Some(self.selected_value()),
            MenuAction::Back => Some(MENU_EXIT),
        }
    }

    /// Handle a mouse press at raw output coordinates: list items
    /// select-and-confirm, buttons fire their action.
    pub fn handle_click(&mut self, mapping: &DisplayMapping, x: i32, y: i32) -> Option<i32> {
        let (lx, ly) = mapping.output_to_logical(x, y);

        if self.list.rect().contains_point((lx, ly)) {
            if let Ok(index) = self.list.index_at(ly) {
                self.select(index);
                return Some(self.selected_value());
            }
        }

        // Later widgets sit on top; probe them first
        for widget in self.widgets.iter().rev() {
            if widget.contains_point(lx, ly) && widget.activate() {
                break;
            }
        }
        None
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        draw_widgets(canvas, &self.widgets)?;

        // Selection cursor beside the highlighted item
        let rect = self.list.item_rect(self.selected)?;
        crate::text::draw_simple_text(
            canvas,
            ">",
            rect.x() - 24,
            rect.y() + 6,
            Color::RGB(221, 190, 110),
            3,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_list() -> (ListView, Rc<RefCell<String>>) {
        let items = Rc::new(vec![
            ListItem::new("NEW GAME", MENU_NEW_GAME),
            ListItem::new("LOAD GAME", MENU_LOAD_GAME),
            ListItem::new("EXIT", MENU_EXIT),
        ]);
        (
            ListView::new(items, LIST_X, LIST_Y, ITEM_WIDTH, ITEM_HEIGHT),
            Rc::new(RefCell::new(caption_for(MENU_NEW_GAME).to_string())),
        )
    }

    fn menu() -> MainMenuScreen<'static> {
        let (list, caption) = menu_list();
        MainMenuScreen {
            widgets: Vec::new(),
            list,
            selected: 0,
            caption,
        }
    }

    #[test]
    fn test_navigation_wraps() {
        let mut screen = menu();

        assert_eq!(screen.handle_action(MenuAction::Up), None);
        assert_eq!(screen.selected, 2);
        assert_eq!(screen.handle_action(MenuAction::Down), None);
        assert_eq!(screen.selected, 0);
    }

    #[test]
    fn test_confirm_reports_selected_option() {
        let mut screen = menu();

        screen.handle_action(MenuAction::Down);
        assert_eq!(screen.handle_action(MenuAction::Confirm), Some(MENU_LOAD_GAME));
    }

    #[test]
    fn test_back_means_exit() {
        let mut screen = menu();
        assert_eq!(screen.handle_action(MenuAction::Back), Some(MENU_EXIT));
    }

    #[test]
    fn test_caption_follows_selection() {
        let mut screen = menu();

        screen.handle_action(MenuAction::Down);
        assert_eq!(&*screen.caption.borrow(), caption_for(MENU_LOAD_GAME));
    }

    #[test]
    fn test_click_selects_list_item() {
        let mut screen = menu();
        let mapping = DisplayMapping::IDENTITY;

        // Second item's row
        let y = LIST_Y + ITEM_HEIGHT as i32 + 4;
        assert_eq!(
            screen.handle_click(&mapping, LIST_X + 10, y),
            Some(MENU_LOAD_GAME)
        );
        assert_eq!(screen.selected, 1);
    }

    #[test]
    fn test_click_outside_list_confirms_nothing() {
        let mut screen = menu();
        let mapping = DisplayMapping::IDENTITY;

        assert_eq!(screen.handle_click(&mapping, 5, 5), None);
        assert_eq!(screen.selected, 0);
    }
}
