//! Game Screens
//!
//! Each screen owns its widget sequence and per-screen state, is
//! created on entry and dropped on exit, and exposes the same three
//! touch points to the loop: handle an event, advance with the
//! current tick, render.
//!
//! # Available Screens
//!
//! - [`TitleScreen`] - logo/copyright screen with a timeout
//! - [`MainMenuScreen`] - list-driven menu after the title
//! - [`NarrationScreen`] - scrolling quest-text window
//! - [`StoreScreen`] - merchant dialog with a selectable line grid

pub mod menu;
pub mod narration;
pub mod store;
pub mod title;

pub use menu::MainMenuScreen;
pub use narration::NarrationScreen;
pub use store::{ScrollbarArt, StoreEvent, StoreGrid, StoreId, StoreLine, StoreScreen};
pub use title::TitleScreen;
