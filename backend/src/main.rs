//! Backend entry-point: wires REST endpoints, the ledger worker, and
//! OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::domain::ports::{
    AnswerRepository, FixtureAnswerRepository, FixtureFriendRepository,
    FixturePointRecordRepository, FixtureQuestionRepository, FixtureUserRepository,
    FriendRepository, PointRecordRepository, QuestionRepository, UserRepository,
};
use backend::domain::{AnswerService, AnswerServiceDeps, PointRecordService, RewardPolicy};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::inbound::http::{answers, health, users};
use backend::outbound::persistence::{
    DbPool, DieselAnswerRepository, DieselFriendRepository, DieselPointRecordRepository,
    DieselQuestionRepository, DieselUserRepository, PoolConfig,
};
use backend::outbound::queue::spawn_point_record_worker_arc;

/// Port implementations behind the answer service and HTTP handlers.
struct Stores {
    users: Arc<dyn UserRepository>,
    questions: Arc<dyn QuestionRepository>,
    friends: Arc<dyn FriendRepository>,
    answers: Arc<dyn AnswerRepository>,
    records: Arc<dyn PointRecordRepository>,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let stores = build_stores().await?;
    let (ledger_queue, _ledger_worker) =
        spawn_point_record_worker_arc(PointRecordService::new(stores.records.clone()));

    let service = Arc::new(AnswerService::new(
        AnswerServiceDeps {
            users: stores.users.clone(),
            questions: stores.questions,
            friends: stores.friends,
            answers: stores.answers,
            ledger_queue,
        },
        reward_policy_from_env(),
    ));

    let state = web::Data::new(HttpState::new(HttpStatePorts {
        answers: service.clone(),
        answers_query: service,
        users: stores.users,
    }));

    HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let api = web::scope("/api")
            .wrap(session)
            .service(users::login)
            .service(answers::answer_to_question)
            .service(answers::refresh_answer_list)
            .service(answers::get_answer_record)
            .service(answers::get_hints)
            .service(answers::purchase_hint);

        let app = App::new()
            .app_data(state.clone())
            .service(api)
            .service(health::scope());

        #[cfg(debug_assertions)]
        let app = app
            .service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}

/// Load the cookie signing key, falling back to an ephemeral key in dev.
fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(error) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, %error, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {error}"
                )))
            }
        }
    }
}

/// Connect the Diesel adapters when `DATABASE_URL` is set; otherwise serve
/// fixture data so the API can be exercised without a database.
async fn build_stores() -> std::io::Result<Stores> {
    match env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(std::io::Error::other)?;
            Ok(Stores {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                questions: Arc::new(DieselQuestionRepository::new(pool.clone())),
                friends: Arc::new(DieselFriendRepository::new(pool.clone())),
                answers: Arc::new(DieselAnswerRepository::new(pool.clone())),
                records: Arc::new(DieselPointRecordRepository::new(pool)),
            })
        }
        Err(_) => {
            warn!("DATABASE_URL not set, serving fixture data");
            Ok(Stores {
                users: Arc::new(FixtureUserRepository),
                questions: Arc::new(FixtureQuestionRepository),
                friends: Arc::new(FixtureFriendRepository),
                answers: Arc::new(FixtureAnswerRepository),
                records: Arc::new(FixturePointRecordRepository),
            })
        }
    }
}

/// Point values come from the environment so pricing can change without a
/// rebuild; anything unset or unparseable keeps the default.
fn reward_policy_from_env() -> RewardPolicy {
    let base = RewardPolicy::default();
    let [first, second, third] = base.hint_prices;
    RewardPolicy {
        answer_point: env_points("ANSWER_POINT", base.answer_point),
        hint_prices: [
            env_points("FIRST_HINT_PRICE", first),
            env_points("SECOND_HINT_PRICE", second),
            env_points("THIRD_HINT_PRICE", third),
        ],
        earn_message: env::var("POINT_EARN_MESSAGE").unwrap_or_else(|_| base.earn_message.clone()),
        ..base
    }
}

fn env_points(name: &str, default: i64) -> i64 {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(%name, %raw, "ignoring unparseable point value");
            default
        }),
        Err(_) => default,
    }
}
