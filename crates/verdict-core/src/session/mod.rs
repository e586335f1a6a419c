//! Session domain module.
//!
//! # Module Structure
//!
//! - `app_mode`: the top-level [`AppMode`]
//! - `message`: chat log entries
//! - `model`: the [`SessionState`] container
//! - `event`: events, effects and notifications exchanged with the controller
//! - `machine`: the pure [`transition`] function

mod app_mode;
mod event;
mod machine;
mod message;
mod model;

pub use app_mode::AppMode;
pub use event::{
    ConfirmationPayload, Effect, NavigationIntent, Notification, NotificationLevel, SessionEvent,
};
pub use machine::{
    PRIVACY_REPLY, READY_REPLY, REQUEST_FEATURE_REPLY, TEST_CASE_DETECTED_REPLY, Transition,
    apology, transition,
};
pub use message::{Message, MessageRole};
pub use model::{GREETING, SessionState};
