//! Screen Widget System
//!
//! This module provides the fixed widget set the menu and dialog
//! screens are assembled from: images, static and live text, buttons,
//! item lists, scrollbars, and text-edit fields. Widgets are plain
//! data owned by the screen that created them; a screen holds a flat,
//! ordered sequence (draw order = input-priority order, later entries
//! drawn on top) and the render pass walks it read-only each frame.
//!
//! # Available Components
//!
//! - [`Widget`] / [`WidgetKind`] - the closed widget variant set
//! - [`UiFlags`] - style and state bitmask shared by all widgets
//! - [`TextSource`] - owned or live-updating text for labels
//! - [`ListView`] / [`ListItem`] - per-item geometry for menu lists
//! - [`render::draw_widgets`] - the per-frame draw pass

pub mod render;
pub mod widget;

pub use render::{advance_animations, draw_widget, draw_widgets, scrollbar_thumb_y};
pub use widget::{ListItem, ListView, ResolvedText, TextSource, UiError, UiFlags, Widget, WidgetKind};
