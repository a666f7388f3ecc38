//! Domain ports: driving use-case traits and driven persistence/queue
//! traits, each with its own transport-agnostic error type.

pub mod answer_command;
pub mod answer_query;
pub mod answer_repository;
pub mod friend_repository;
pub mod point_record_queue;
pub mod point_record_repository;
pub mod question_repository;
pub mod user_repository;

pub use answer_command::{
    AnswerCommand, AnswerToQuestionRequest, AnswerToQuestionResponse, FixtureAnswerCommand,
    PurchaseHintRequest, PurchaseHintResponse,
};
pub use answer_query::{
    AnswerQuery, AnswerRecordPayload, FixtureAnswerQuery, GetAnswerRecordRequest, GetHintsRequest,
    HintSlot, RefreshAnswerListRequest, RefreshAnswerListResponse,
};
pub use answer_repository::{
    AnswerPage, AnswerRepository, AnswerRepositoryError, FixtureAnswerRepository,
};
pub use friend_repository::{FixtureFriendRepository, FriendRepository, FriendRepositoryError};
pub use point_record_queue::{
    FixturePointRecordQueue, PointRecordQueue, PointRecordQueueError,
};
pub use point_record_repository::{
    FixturePointRecordRepository, PointRecordRepository, PointRecordRepositoryError,
};
pub use question_repository::{
    FixtureQuestionRepository, QuestionRepository, QuestionRepositoryError,
};
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};

#[cfg(test)]
pub use answer_command::MockAnswerCommand;
#[cfg(test)]
pub use answer_query::MockAnswerQuery;
#[cfg(test)]
pub use answer_repository::MockAnswerRepository;
#[cfg(test)]
pub use friend_repository::MockFriendRepository;
#[cfg(test)]
pub use point_record_queue::MockPointRecordQueue;
#[cfg(test)]
pub use point_record_repository::MockPointRecordRepository;
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
