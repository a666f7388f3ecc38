//! Tests for the answer HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use pagination::{PageEnvelope, PageRequest};
use serde_json::{Value, json};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    AnswerCommand, AnswerQuery, AnswerToQuestionResponse, FixtureAnswerCommand,
    FixtureAnswerQuery, MockAnswerCommand, MockAnswerQuery, MockUserRepository,
    PurchaseHintResponse,
};
use crate::domain::user::{DisplayName, Points, User};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::users::LoginRequest;

const FIXTURE_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn fixture_users() -> MockUserRepository {
    let user = User::new(
        UserId::new(FIXTURE_USER_ID).expect("fixture id"),
        DisplayName::new("Ada").expect("valid name"),
        Points::zero(),
    );
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user.clone())));
    users
}

fn test_app(
    answers: impl AnswerCommand + 'static,
    answers_query: impl AnswerQuery + 'static,
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
        answers: Arc::new(answers),
        answers_query: Arc::new(answers_query),
        users: Arc::new(fixture_users()),
    });
    App::new()
        .app_data(web::Data::new(state))
        .wrap(crate::inbound::http::test_utils::session_middleware())
        .service(
            web::scope("/api")
                .service(crate::inbound::http::users::login)
                .service(answer_to_question)
                .service(refresh_answer_list)
                .service(get_answer_record)
                .service(get_hints)
                .service(purchase_hint),
        )
}

async fn login_and_get_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let login_req = actix_test::TestRequest::post()
        .uri("/api/user/login")
        .set_json(LoginRequest {
            user_id: Uuid::parse_str(FIXTURE_USER_ID).expect("fixture id"),
        })
        .to_request();
    let login_res = actix_test::call_service(app, login_req).await;
    assert!(login_res.status().is_success());
    login_res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}

#[actix_web::test]
async fn answer_to_question_confirms_with_a_message() {
    let mut answers = MockAnswerCommand::new();
    answers
        .expect_answer_to_question()
        .times(1)
        .returning(|_| {
            Ok(AnswerToQuestionResponse {
                answer_id: Uuid::new_v4(),
            })
        });

    let app = actix_test::init_service(test_app(answers, FixtureAnswerQuery)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/answer/common")
        .cookie(cookie)
        .set_json(json!({
            "questionId": Uuid::new_v4(),
            "pickedId": Uuid::new_v4(),
        }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("answer recorded")
    );
}

#[actix_web::test]
async fn answer_endpoints_reject_without_session() {
    let app = actix_test::init_service(test_app(FixtureAnswerCommand, FixtureAnswerQuery)).await;

    let requests = vec![
        actix_test::TestRequest::post()
            .uri("/api/answer/common")
            .set_json(json!({ "questionId": Uuid::new_v4(), "pickedId": Uuid::new_v4() }))
            .to_request(),
        actix_test::TestRequest::get()
            .uri("/api/answer/refresh")
            .to_request(),
        actix_test::TestRequest::get()
            .uri("/api/answer/record")
            .to_request(),
        actix_test::TestRequest::get()
            .uri(&format!("/api/answer/hint/{}", Uuid::new_v4()))
            .to_request(),
        actix_test::TestRequest::post()
            .uri("/api/answer/hint")
            .set_json(json!({ "answerId": Uuid::new_v4() }))
            .to_request(),
    ];

    for request in requests {
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn record_page_serialises_the_envelope_camel_case() {
    let picked = UserId::random();
    let mut query = MockAnswerQuery::new();
    query.expect_get_answer_record().returning(move |request| {
        let content = vec![AnswerRecordPayload {
            answer_id: Uuid::new_v4(),
            question_id: Uuid::new_v4(),
            picked_id: picked,
            hint_count: 1,
            created_at: Utc::now(),
        }];
        Ok(PageEnvelope::new(content, request.page, 1))
    });

    let app = actix_test::init_service(test_app(FixtureAnswerCommand, query)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/answer/record?page=0&size=10")
        .cookie(cookie)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value.get("totalElements").and_then(Value::as_u64), Some(1));
    assert_eq!(value.get("totalPages").and_then(Value::as_u64), Some(1));
    let first = &value["content"].as_array().expect("content array")[0];
    assert!(first.get("hintCount").is_some());
    assert!(first.get("hint_count").is_none());
}

#[actix_web::test]
async fn record_page_rejects_an_oversized_size_parameter() {
    let mut query = MockAnswerQuery::new();
    query.expect_get_answer_record().times(0);

    let app = actix_test::init_service(test_app(FixtureAnswerCommand, query)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/answer/record?size=101")
        .cookie(cookie)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value["details"].get("code").and_then(Value::as_str),
        Some("size_too_large")
    );
}

#[actix_web::test]
async fn record_page_defaults_to_first_page_of_ten() {
    let mut query = MockAnswerQuery::new();
    query
        .expect_get_answer_record()
        .withf(|request| request.page == PageRequest::default())
        .times(1)
        .returning(|request| Ok(PageEnvelope::new(Vec::new(), request.page, 0)));

    let app = actix_test::init_service(test_app(FixtureAnswerCommand, query)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/answer/record")
        .cookie(cookie)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn hint_slots_are_returned_as_a_list() {
    let picker = UserId::random();
    let mut query = MockAnswerQuery::new();
    query.expect_get_hints().returning(move |_| {
        Ok(vec![
            HintSlot {
                picker_id: picker,
                hint_num: 1,
                valid: true,
            },
            HintSlot {
                picker_id: picker,
                hint_num: 2,
                valid: false,
            },
            HintSlot {
                picker_id: picker,
                hint_num: 3,
                valid: false,
            },
        ])
    });

    let app = actix_test::init_service(test_app(FixtureAnswerCommand, query)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/answer/hint/{}", Uuid::new_v4()))
        .cookie(cookie)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    let slots = value.as_array().expect("slot array");
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0].get("valid").and_then(Value::as_bool), Some(true));
    assert_eq!(slots[1].get("hintNum").and_then(Value::as_u64), Some(2));
}

#[actix_web::test]
async fn purchase_hint_confirms_with_a_message() {
    let answer_id = Uuid::new_v4();
    let mut answers = MockAnswerCommand::new();
    answers.expect_purchase_hint().times(1).returning(move |_| {
        Ok(PurchaseHintResponse {
            answer_id,
            hint_count: 1,
        })
    });

    let app = actix_test::init_service(test_app(answers, FixtureAnswerQuery)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/answer/hint")
        .cookie(cookie)
        .set_json(json!({ "answerId": answer_id }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("hint purchased")
    );
}

#[actix_web::test]
async fn purchase_hint_surfaces_business_rejections_as_bad_request() {
    let mut answers = MockAnswerCommand::new();
    answers
        .expect_purchase_hint()
        .returning(|_| Err(Error::invalid_request("not enough points to purchase this hint")));

    let app = actix_test::init_service(test_app(answers, FixtureAnswerQuery)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/answer/hint")
        .cookie(cookie)
        .set_json(json!({ "answerId": Uuid::new_v4() }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("not enough points to purchase this hint")
    );
}

#[actix_web::test]
async fn purchase_hint_surfaces_races_as_conflict() {
    let mut answers = MockAnswerCommand::new();
    answers
        .expect_purchase_hint()
        .returning(|_| Err(Error::conflict("hint purchase raced with another request, retry")));

    let app = actix_test::init_service(test_app(answers, FixtureAnswerQuery)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/answer/hint")
        .cookie(cookie)
        .set_json(json!({ "answerId": Uuid::new_v4() }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
