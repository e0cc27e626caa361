//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, MedicationDetailQuery, MedicationListQuery, RegistrationService,
    UserProfileQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub medications: Arc<dyn MedicationListQuery>,
    pub medication_detail: Arc<dyn MedicationDetailQuery>,
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub profile: Arc<dyn UserProfileQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub medications: Arc<dyn MedicationListQuery>,
    pub medication_detail: Arc<dyn MedicationDetailQuery>,
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub profile: Arc<dyn UserProfileQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use medication_api::domain::{AuthService, MedicationCatalogueService, MedicationQueryService};
    /// use medication_api::inbound::http::state::{HttpState, HttpStatePorts};
    /// use medication_api::outbound::memory::InMemoryUserRepository;
    /// use medication_api::outbound::openfda::OpenFdaMedicationRepository;
    /// use medication_api::outbound::password::BcryptPasswordHasher;
    /// use mockable::DefaultClock;
    ///
    /// # fn build(openfda: OpenFdaMedicationRepository) -> HttpState {
    /// let catalogue = Arc::new(MedicationCatalogueService::new(Arc::new(openfda)));
    /// let queries = Arc::new(MedicationQueryService::new(catalogue));
    /// let auth = Arc::new(AuthService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(BcryptPasswordHasher::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// HttpState::new(HttpStatePorts {
    ///     medications: queries.clone(),
    ///     medication_detail: queries,
    ///     login: auth.clone(),
    ///     registration: auth.clone(),
    ///     profile: auth,
    /// })
    /// # }
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            medications,
            medication_detail,
            login,
            registration,
            profile,
        } = ports;
        Self {
            medications,
            medication_detail,
            login,
            registration,
            profile,
        }
    }
}
