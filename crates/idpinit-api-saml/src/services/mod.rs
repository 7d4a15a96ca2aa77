//! Pipeline stages for unsolicited SSO

pub mod dispatch;
pub mod endpoint_resolver;
pub mod login_redirect;
pub mod parameter_extractor;
pub mod provider_resolver;
pub mod request_synthesizer;
pub mod unsolicited_sso;

pub use dispatch::{
    AuthenticationInitiator, BindingContext, DispatchAdapter, DispatchEnvelope, RequestContext,
};
pub use endpoint_resolver::EndpointResolver;
pub use login_redirect::LoginRedirectInitiator;
pub use parameter_extractor::ParameterExtractor;
pub use provider_resolver::{ProviderResolver, ResolvedProvider};
pub use request_synthesizer::RequestSynthesizer;
pub use unsolicited_sso::UnsolicitedSsoService;
