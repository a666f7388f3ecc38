//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: all answer, login, and health endpoints, the shared error
//! payload schemas, and the session cookie security scheme. The generated
//! document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::domain::friend::FriendSummary;
use crate::domain::ports::{AnswerRecordPayload, HintSlot, RefreshAnswerListResponse};
use crate::inbound::http::answers::{
    AnswerRecordPageBody, AnswerToQuestionBody, MessageBody, PurchaseHintBody,
};
use crate::inbound::http::health::HealthBody;
use crate::inbound::http::users::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/user/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Answer backend API",
        description = "HTTP interface for answering questions about friends, \
                       purchasing hints, and session-authenticated access."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::answers::answer_to_question,
        crate::inbound::http::answers::refresh_answer_list,
        crate::inbound::http::answers::get_answer_record,
        crate::inbound::http::answers::get_hints,
        crate::inbound::http::answers::purchase_hint,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        AnswerToQuestionBody,
        PurchaseHintBody,
        MessageBody,
        AnswerRecordPageBody,
        AnswerRecordPayload,
        RefreshAnswerListResponse,
        FriendSummary,
        HintSlot,
        HealthBody,
    )),
    tags(
        (name = "users", description = "Session establishment"),
        (name = "answers", description = "Answering questions and purchasing hints"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
