//! Request and registration types for the unsolicited SSO API

pub mod registration;
pub mod requests;

pub use registration::*;
pub use requests::*;
