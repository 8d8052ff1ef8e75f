//! `ratatui-select-core` is the headless interaction engine behind a select/dropdown widget.
//!
//! It tracks which option(s) are selected, whether the dropdown is open, which option the
//! keyboard highlight sits on, and what the search text filters the list down to. It never
//! draws anything: the `ratatui-select` crate renders it, and any other host can too.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you feed input in and read derived state out.
//! - No async runtime: every operation completes synchronously within one event.
//! - Notifications are returned, not called back: each entry point yields a
//!   [`engine::SelectOutcome`] carrying [`engine::SelectEvent`]s and focus requests.
//! - Positioning is delegated: [`placement::Positioner`] is the only seam for overlay
//!   coordinates, and it is only consulted while the dropdown is open.
//!
//! ## Getting started
//!
//! ```
//! use ratatui_select_core::config::SelectConfig;
//! use ratatui_select_core::engine::SelectEngine;
//! use ratatui_select_core::engine::SelectEvent;
//! use ratatui_select_core::input::KeyCode;
//! use ratatui_select_core::input::KeyEvent;
//! use ratatui_select_core::option::SelectOption;
//! use ratatui_select_core::selection::SelectValue;
//!
//! let options = vec![SelectOption::new(1, "One"), SelectOption::new(2, "Two")];
//! let mut select = SelectEngine::new(SelectConfig::new(options)).unwrap();
//!
//! select.handle_key(&KeyEvent::new(KeyCode::Enter)); // open
//! select.handle_key(&KeyEvent::new(KeyCode::Down));
//! let out = select.handle_key(&KeyEvent::new(KeyCode::Enter));
//!
//! assert_eq!(out.events[0], SelectEvent::Changed(SelectValue::single(2)));
//! assert!(!select.is_open());
//! ```
//!
//! ## Controlled values
//!
//! Passing [`config::SelectConfig::value`] hands ownership of the value to the caller. The
//! engine then only proposes changes through `SelectEvent::Changed` and shows whatever the caller
//! pushes back through [`engine::SelectEngine::set_value`]. Ownership is decided once, at
//! construction.
pub mod accessibility;
pub mod config;
pub mod error;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod dispatch;
pub mod engine;
pub mod filter;
pub mod highlight;
pub mod input;
pub mod keymap;
pub mod lifecycle;
pub mod option;
pub mod placement;
pub mod selection;
