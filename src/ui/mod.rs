//! # UI Module
//!
//! The two interactive screens and everything they are built from.
//!
//! ## Components
//!
//! - [`viewport`] - windowing math shared by every scrollable list
//! - [`state`] - feature-screen positions and key transitions
//! - [`layout`] - region partitioning and visible slices for one frame
//! - [`selection`] - the pick-one-of-N list
//! - [`mod@render`] - draws composed frames with ratatui widgets
//! - [`app`] - the render loop and public run functions
//! - [`theme`] / [`config`] - colours and persisted settings
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │ Heading: title, spec, usage, description        │
//! ├─────────────────────────────────────────────────┤
//! │ Browser Support: carousel + focused ranges      │
//! ├─────────────────────────────────────────────────┤
//! │ Details: tabbed notes / resources / sub-features│
//! ├─────────────────────────────────────────────────┤
//! │ Footer: status legend, key bindings, position   │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod config;
pub mod layout;
pub mod render;
pub mod selection;
pub mod state;
pub mod text;
pub mod theme;
pub mod viewport;

pub use app::{
    choose_match, run_feature_screen, run_selection_screen, FeatureScreen, SelectionScreen,
};
pub use config::Config;
pub use theme::Theme;
