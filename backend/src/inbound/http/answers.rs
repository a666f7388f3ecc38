//! Answer API handlers.
//!
//! ```text
//! POST /api/answer/common        Answer a question about a friend
//! GET  /api/answer/refresh       Pickable friend candidates
//! GET  /api/answer/record        Page of the caller's answers
//! GET  /api/answer/hint/{id}     Hint slots for an answer
//! POST /api/answer/hint          Purchase the next hint
//! ```

use actix_web::{get, post, web};
use pagination::{PageEnvelope, PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::{
    AnswerRecordPayload, AnswerToQuestionRequest, GetAnswerRecordRequest, GetHintsRequest,
    HintSlot, PurchaseHintRequest, RefreshAnswerListRequest, RefreshAnswerListResponse,
};
use crate::domain::user::UserId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::CallerSession;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/answer/common`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerToQuestionBody {
    #[schema(value_type = String, format = "uuid")]
    pub question_id: Uuid,
    #[schema(value_type = String, format = "uuid")]
    pub picked_id: Uuid,
}

/// Request body for `POST /api/answer/hint`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseHintBody {
    #[schema(value_type = String, format = "uuid")]
    pub answer_id: Uuid,
}

/// Confirmation payload for answer mutations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// Page query parameters for `GET /api/answer/record`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnswerRecordQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// One page of the caller's answer history.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecordPageBody {
    pub content: Vec<AnswerRecordPayload>,
    pub page: u32,
    pub size: u32,
    pub total_pages: u64,
    pub total_elements: u64,
}

impl From<PageEnvelope<AnswerRecordPayload>> for AnswerRecordPageBody {
    fn from(value: PageEnvelope<AnswerRecordPayload>) -> Self {
        Self {
            content: value.content,
            page: value.page,
            size: value.size,
            total_pages: value.total_pages,
            total_elements: value.total_elements,
        }
    }
}

fn map_page_request_error(err: PageRequestError) -> Error {
    match err {
        PageRequestError::ZeroSize => Error::invalid_request("size must be at least 1")
            .with_details(json!({ "field": "size", "code": "zero_size" })),
        PageRequestError::SizeTooLarge { max } => {
            Error::invalid_request(format!("size must be at most {max}"))
                .with_details(json!({ "field": "size", "code": "size_too_large", "max": max }))
        }
    }
}

/// Answer a question by picking one of the caller's friends.
#[utoipa::path(
    post,
    path = "/api/answer/common",
    request_body = AnswerToQuestionBody,
    responses(
        (status = 200, description = "Answer recorded", body = MessageBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "User or question not found", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["answers"],
    operation_id = "answerToQuestion",
    security(("SessionCookie" = []))
)]
#[post("/answer/common")]
pub async fn answer_to_question(
    state: web::Data<HttpState>,
    session: CallerSession,
    payload: web::Json<AnswerToQuestionBody>,
) -> ApiResult<web::Json<MessageBody>> {
    let user_id = session.require_caller()?;
    let body = payload.into_inner();

    state
        .answers
        .answer_to_question(AnswerToQuestionRequest {
            user_id,
            question_id: body.question_id,
            picked_id: UserId::from_uuid(body.picked_id),
        })
        .await?;

    Ok(web::Json(MessageBody {
        message: "answer recorded".to_owned(),
    }))
}

/// List the caller's friends as pickable answer candidates.
#[utoipa::path(
    get,
    path = "/api/answer/refresh",
    responses(
        (status = 200, description = "Pickable candidates", body = RefreshAnswerListResponse),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["answers"],
    operation_id = "refreshAnswerList",
    security(("SessionCookie" = []))
)]
#[get("/answer/refresh")]
pub async fn refresh_answer_list(
    state: web::Data<HttpState>,
    session: CallerSession,
) -> ApiResult<web::Json<RefreshAnswerListResponse>> {
    let user_id = session.require_caller()?;

    let response = state
        .answers_query
        .refresh_answer_list(RefreshAnswerListRequest { user_id })
        .await?;

    Ok(web::Json(response))
}

/// Page through the caller's own answers, oldest first.
#[utoipa::path(
    get,
    path = "/api/answer/record",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page index, default 0"),
        ("size" = Option<u32>, Query, description = "Page size, default 10")
    ),
    responses(
        (status = 200, description = "Answer history page", body = AnswerRecordPageBody),
        (status = 400, description = "Invalid page parameters", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["answers"],
    operation_id = "getAnswerRecord",
    security(("SessionCookie" = []))
)]
#[get("/answer/record")]
pub async fn get_answer_record(
    state: web::Data<HttpState>,
    session: CallerSession,
    query: web::Query<AnswerRecordQuery>,
) -> ApiResult<web::Json<AnswerRecordPageBody>> {
    let user_id = session.require_caller()?;
    let page =
        PageRequest::from_params(query.page, query.size).map_err(map_page_request_error)?;

    let envelope = state
        .answers_query
        .get_answer_record(GetAnswerRecordRequest { user_id, page })
        .await?;

    Ok(web::Json(AnswerRecordPageBody::from(envelope)))
}

/// List the hint slots of an answer. Only the picked user may look.
#[utoipa::path(
    get,
    path = "/api/answer/hint/{answer_id}",
    params(
        ("answer_id" = String, Path, format = "uuid", description = "Answer identifier")
    ),
    responses(
        (status = 200, description = "Hint slots", body = [HintSlot]),
        (status = 400, description = "Caller is not the picked user", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Answer not found", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["answers"],
    operation_id = "getHints",
    security(("SessionCookie" = []))
)]
#[get("/answer/hint/{answer_id}")]
pub async fn get_hints(
    state: web::Data<HttpState>,
    session: CallerSession,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<HintSlot>>> {
    let user_id = session.require_caller()?;
    let answer_id = path.into_inner();

    let slots = state
        .answers_query
        .get_hints(GetHintsRequest { user_id, answer_id })
        .await?;

    Ok(web::Json(slots))
}

/// Purchase the next hint on an answer for the picked user.
#[utoipa::path(
    post,
    path = "/api/answer/hint",
    request_body = PurchaseHintBody,
    responses(
        (status = 200, description = "Hint purchased", body = MessageBody),
        (status = 400, description = "Business rule violation", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "User or answer not found", body = Error),
        (status = 409, description = "Purchase raced with another request", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["answers"],
    operation_id = "purchaseHint",
    security(("SessionCookie" = []))
)]
#[post("/answer/hint")]
pub async fn purchase_hint(
    state: web::Data<HttpState>,
    session: CallerSession,
    payload: web::Json<PurchaseHintBody>,
) -> ApiResult<web::Json<MessageBody>> {
    let user_id = session.require_caller()?;

    state
        .answers
        .purchase_hint(PurchaseHintRequest {
            user_id,
            answer_id: payload.answer_id,
        })
        .await?;

    Ok(web::Json(MessageBody {
        message: "hint purchased".to_owned(),
    }))
}

#[cfg(test)]
#[path = "answers_tests.rs"]
mod tests;
