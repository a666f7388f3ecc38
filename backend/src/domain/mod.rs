//! Domain entities, ports, and services for the answer flow.
//!
//! Purpose: Define the strongly typed model of answers, users, questions,
//! friends, and the point ledger, the port traits that adapters implement,
//! and the services that orchestrate them. Invariants and serialisation
//! contracts live in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - AnswerService (alias to `answer_service::AnswerService`) — the answer
//!   use-case orchestrator.
//! - PointRecordService (alias to `point_record_service::PointRecordService`)
//!   — the ledger writer behind the queue.

pub mod answer;
pub mod answer_service;
pub mod error;
pub mod friend;
pub mod point_record;
pub mod point_record_service;
pub mod ports;
pub mod question;
pub mod reward;
pub mod user;

pub use self::answer::{Answer, AnswerDraft, AnswerValidationError};
pub use self::answer_service::{AnswerService, AnswerServiceDeps};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::friend::FriendSummary;
pub use self::point_record::{PointEarnEvent, PointRecord, PointRecordKind};
pub use self::point_record_service::PointRecordService;
pub use self::question::{Question, QuestionStatus, QuestionValidationError};
pub use self::reward::RewardPolicy;
pub use self::user::{DisplayName, Points, User, UserId, UserValidationError};
