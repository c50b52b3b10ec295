//! View-state controller, click-gesture detection, and registration
//! aggregation/export for the bootcamp promo app. Rendering is an
//! external concern; front ends drive [`AppController`] and observe
//! [`UiEvent`]s.

pub mod auth;
pub mod controller;
pub mod export;
pub mod gesture;
pub mod state;
pub mod stats;

pub use controller::{AppController, UiEvent};
pub use state::{AppEvent, AppState, Effect, ModalState, View};
