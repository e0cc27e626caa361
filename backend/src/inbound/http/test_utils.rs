//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{
    MockLoginService, MockMedicationDetailQuery, MockMedicationListQuery, MockRegistrationService,
    MockUserProfileQuery,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

pub const SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Port mocks for handler tests. Unconfigured mocks panic when called, so
/// each test only sets up the ports it expects to reach.
#[derive(Default)]
pub struct MockPorts {
    pub medications: MockMedicationListQuery,
    pub medication_detail: MockMedicationDetailQuery,
    pub login: MockLoginService,
    pub registration: MockRegistrationService,
    pub profile: MockUserProfileQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            medications: Arc::new(self.medications),
            medication_detail: Arc::new(self.medication_detail),
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            profile: Arc::new(self.profile),
        })
    }
}
