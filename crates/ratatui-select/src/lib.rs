//! `ratatui-select` renders a select/dropdown for ratatui applications.
//!
//! [`view::SelectView`] hosts a [`engine::SelectEngine`] from `ratatui-select-core`, draws the
//! trigger and the floating list, owns the search text field, and turns mouse positions into
//! option clicks. The engine modules are re-exported so most applications only need this crate.
//!
//! Enable the `crossterm` feature for
//! `crossterm_input::input_event_from_crossterm`.
pub use ratatui_select_core::accessibility;
pub use ratatui_select_core::config;
pub use ratatui_select_core::dispatch;
pub use ratatui_select_core::engine;
pub use ratatui_select_core::error;
pub use ratatui_select_core::filter;
pub use ratatui_select_core::highlight;
pub use ratatui_select_core::input;
pub use ratatui_select_core::keymap;
pub use ratatui_select_core::lifecycle;
pub use ratatui_select_core::option;
pub use ratatui_select_core::placement;
pub use ratatui_select_core::selection;

#[cfg(feature = "crossterm")]
pub use ratatui_select_core::crossterm_input;

pub mod theme;

pub mod render;
pub mod viewport;

pub mod positioner;
pub mod search_field;
pub mod view;
