//! Users API handlers.
//!
//! ```text
//! POST /api/user/login {"userId":"3fa85f64-5717-4562-b3fc-2c963f66afa6"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::UserRepositoryError;
use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::CallerSession;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/user/login`.
///
/// Example JSON: `{"userId":"3fa85f64-5717-4562-b3fc-2c963f66afa6"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(value_type = String, format = "uuid")]
    pub user_id: Uuid,
}

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
    }
}

/// Establish a session for a known user.
///
/// The identity provider integration sits in front of this service; by the
/// time a request reaches it, the caller has been resolved to a user id.
/// Login only verifies the id refers to a stored user before persisting it
/// in the session cookie.
#[utoipa::path(
    post,
    path = "/api/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown user", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/user/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: CallerSession,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = UserId::from_uuid(payload.user_id);
    let user = state
        .users
        .find_by_id(&user_id)
        .await
        .map_err(map_user_repository_error)?
        .ok_or_else(|| Error::unauthorized("unknown user"))?;
    session.remember(user.id())?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{
        FixtureAnswerCommand, FixtureAnswerQuery, MockUserRepository, UserRepository,
    };
    use crate::domain::{DisplayName, Points, User};
    use crate::inbound::http::state::{HttpState, HttpStatePorts};

    fn test_app(
        users: impl UserRepository + 'static,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = HttpState::new(HttpStatePorts {
            answers: Arc::new(FixtureAnswerCommand),
            answers_query: Arc::new(FixtureAnswerQuery),
            users: Arc::new(users),
        });
        App::new()
            .app_data(web::Data::new(state))
            .wrap(crate::inbound::http::test_utils::session_middleware())
            .service(web::scope("/api").service(login))
    }

    #[actix_web::test]
    async fn login_sets_the_session_cookie_for_a_known_user() {
        let user = User::new(
            UserId::random(),
            DisplayName::new("Ada").expect("valid name"),
            Points::zero(),
        );
        let user_id = *user.id();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let app = actix_test::init_service(test_app(users)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/user/login")
            .set_json(LoginRequest {
                user_id: *user_id.as_uuid(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );
    }

    #[actix_web::test]
    async fn login_rejects_an_unknown_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let app = actix_test::init_service(test_app(users)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/user/login")
            .set_json(LoginRequest {
                user_id: uuid::Uuid::new_v4(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("unauthorized")
        );
    }
}
