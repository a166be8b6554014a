//! Player session and the profile reducer

pub mod action;
pub mod state;

pub use action::{apply_action, Action, ActionError, Applied, Report};
pub use state::{Session, SessionError};
