//! EOA Delegation Verifier core library.

#[macro_use]
extern crate edv_helpers;

mod authorization;
pub use authorization::AuthorizationFactory;

mod error;
pub use error::{AuthorizationError, IdentityError, NodeError, ScenarioError};

mod identity;
pub use identity::AccountIdentity;

mod inspector;
pub use inspector::DelegationStateInspector;

mod node;
pub use node::{NodeClient, ProviderNode};

mod orchestrator;
pub use orchestrator::{DEFAULT_INCLUSION_TIMEOUT, DelegationOrchestrator};

mod scenario;
pub use scenario::{ScenarioRunner, StateExpectation};

pub mod trace;

#[cfg(test)]
pub(crate) mod mock;

#[cfg(test)]
#[ctor::ctor]
fn init() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
