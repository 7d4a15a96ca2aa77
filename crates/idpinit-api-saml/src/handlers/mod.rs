//! HTTP handlers for SAML endpoints

pub mod state;
pub mod unsolicited;

pub use state::UnsolicitedSsoState;
pub use unsolicited::unsolicited_sso;
