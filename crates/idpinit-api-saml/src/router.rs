//! SAML route definitions

use crate::config::UnsolicitedSsoConfig;
use crate::handlers::{unsolicited_sso, UnsolicitedSsoState};
use axum::{routing::get, Router};

/// Create the unsolicited SSO router.
/// The endpoint is public: authentication happens after the hand-off.
pub fn unsolicited_router(state: UnsolicitedSsoState, config: &UnsolicitedSsoConfig) -> Router {
    Router::new()
        .route(&config.endpoint_path, get(unsolicited_sso))
        .with_state(state)
}
