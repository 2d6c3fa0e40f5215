//! caniuse-tui - an interactive terminal viewer for caniuse feature records
//!
//! This library provides the display engine: raw keyboard decoding, terminal
//! session management, windowing math, navigation state, layout, and the
//! render loops for the feature screen and the match-selection screen.

pub mod input;
pub mod logging;
pub mod model;
pub mod terminal;
pub mod ui;
