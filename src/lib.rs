//! Recipe Cook - an interactive recipe card for the terminal
//!
//! Walks through a recipe's steps one at a time while a countdown runs,
//! with a progress indicator and collapsible ingredient/instruction lists.
//! The cooking state machine lives in `state` and is independent of any
//! display; `controller` binds it to a `ui::Presenter` and the timers.

pub mod config;
pub mod controller;
pub mod event;
pub mod recipe;
pub mod state;
pub mod text_utils;
pub mod timer;
pub mod ui;

pub use config::Config;
pub use controller::RecipeController;
pub use recipe::{Recipe, RecipeError};
pub use state::CookingSession;
