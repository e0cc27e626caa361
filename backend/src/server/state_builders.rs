//! Builders for HTTP state ports from the configured adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use medication_api::domain::ports::{
    LoginService, MedicationDetailQuery, MedicationListQuery, MedicationRepository,
    PasswordHasher, RegistrationService, UserProfileQuery, UserRepository,
};
use medication_api::domain::{AuthService, MedicationCatalogueService, MedicationQueryService};
use medication_api::inbound::http::state::{HttpState, HttpStatePorts};
use medication_api::outbound::memory::InMemoryUserRepository;
use medication_api::outbound::password::BcryptPasswordHasher;
use medication_api::outbound::persistence::{DbPool, DieselUserRepository};

use super::ServerConfig;

type AuthPorts = (
    Arc<dyn LoginService>,
    Arc<dyn RegistrationService>,
    Arc<dyn UserProfileQuery>,
);

type MedicationPorts = (Arc<dyn MedicationListQuery>, Arc<dyn MedicationDetailQuery>);

/// Wire the catalogue repository through the catalogue and query services.
pub(crate) fn build_medication_ports<R>(repository: R) -> MedicationPorts
where
    R: MedicationRepository + 'static,
{
    let catalogue = Arc::new(MedicationCatalogueService::new(Arc::new(repository)));
    let queries = Arc::new(MedicationQueryService::new(catalogue));
    (
        queries.clone() as Arc<dyn MedicationListQuery>,
        queries as Arc<dyn MedicationDetailQuery>,
    )
}

/// Share one account service across the three account ports.
pub(crate) fn build_auth_ports<U, H>(users: U, hasher: H, clock: Arc<dyn Clock>) -> AuthPorts
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let service = Arc::new(AuthService::new(Arc::new(users), Arc::new(hasher), clock));
    (
        service.clone() as Arc<dyn LoginService>,
        service.clone() as Arc<dyn RegistrationService>,
        service as Arc<dyn UserProfileQuery>,
    )
}

/// Pick the account store: PostgreSQL when a pool exists, memory otherwise.
fn build_auth_ports_with_pool<H>(pool: Option<&DbPool>, hasher: H) -> AuthPorts
where
    H: PasswordHasher + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match pool {
        Some(pool) => build_auth_ports(DieselUserRepository::new(pool.clone()), hasher, clock),
        None => {
            info!("using in-memory account store");
            build_auth_ports(InMemoryUserRepository::new(), hasher, clock)
        }
    }
}

/// Build the shared HTTP state from the server configuration.
///
/// # Errors
/// Returns [`std::io::Error`] when the configured bcrypt cost is rejected.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let hasher = BcryptPasswordHasher::new(config.bcrypt_cost)
        .map_err(|err| std::io::Error::other(format!("invalid bcrypt cost: {err}")))?;
    let (medications, medication_detail) = build_medication_ports(config.openfda.clone());
    let (login, registration, profile) =
        build_auth_ports_with_pool(config.db_pool.as_ref(), hasher);

    Ok(web::Data::new(HttpState::new(HttpStatePorts {
        medications,
        medication_detail,
        login,
        registration,
        profile,
    })))
}
