//! Resolved-caller session state.
//!
//! Login writes the caller's user id into the session cookie; every answer
//! endpoint reads it back through [`CallerSession`]. Handlers never touch
//! `actix_session::Session` directly, so the cookie layout stays in one
//! place.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

/// Session entry holding the resolved caller's id as a UUID string.
pub(crate) const CALLER_ID_KEY: &str = "user_id";

/// Extractor giving handlers the session-resolved caller identity.
pub struct CallerSession {
    inner: Session,
}

impl From<Session> for CallerSession {
    fn from(inner: Session) -> Self {
        Self { inner }
    }
}

impl CallerSession {
    /// Store `user_id` as the caller for subsequent requests.
    pub fn remember(&self, user_id: &UserId) -> Result<(), Error> {
        self.inner
            .insert(CALLER_ID_KEY, user_id.to_string())
            .map_err(|error| {
                Error::internal(format!("could not write the session cookie: {error}"))
            })
    }

    /// The caller stored in the cookie, if any.
    ///
    /// An entry that does not parse as a user id is treated as anonymous
    /// rather than an error; the signed cookie should make that state
    /// unreachable, so it is logged when it appears.
    pub fn caller(&self) -> Result<Option<UserId>, Error> {
        let stored = self.inner.get::<String>(CALLER_ID_KEY).map_err(|error| {
            Error::internal(format!("could not read the session cookie: {error}"))
        })?;

        Ok(stored.and_then(|raw| match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "session cookie holds a malformed caller id");
                None
            }
        }))
    }

    /// The caller, or `401 Unauthorized` when the session carries none.
    pub fn require_caller(&self) -> Result<UserId, Error> {
        self.caller()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for CallerSession {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { Ok(Self::from(session.await?)) })
    }
}

#[cfg(test)]
mod tests {
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use uuid::Uuid;

    use super::*;
    use crate::inbound::http::test_utils::session_middleware;

    async fn remember_random_caller(session: CallerSession) -> Result<HttpResponse, Error> {
        let id = UserId::from_uuid(Uuid::new_v4());
        session.remember(&id)?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    async fn whoami(session: CallerSession) -> Result<HttpResponse, Error> {
        let id = session.require_caller()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    fn caller_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(session_middleware())
            .route("/remember", web::post().to(remember_random_caller))
            .route("/whoami", web::get().to(whoami))
            .route(
                "/scramble",
                web::post().to(|session: Session| async move {
                    session.insert(CALLER_ID_KEY, "definitely-not-a-uuid")?;
                    Ok::<_, actix_web::Error>(HttpResponse::Ok())
                }),
            )
    }

    #[actix_web::test]
    async fn remembered_caller_is_visible_on_the_next_request() {
        let app = actix_test::init_service(caller_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/remember").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned())
            .expect("session cookie");
        let remembered = actix_test::read_body(response).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(response).await, remembered);
    }

    #[actix_web::test]
    async fn anonymous_caller_is_unauthorised() {
        let app = actix_test::init_service(caller_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/whoami").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn malformed_caller_id_is_unauthorised() {
        let app = actix_test::init_service(caller_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/scramble").to_request(),
        )
        .await;
        let cookie = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned())
            .expect("session cookie");

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
