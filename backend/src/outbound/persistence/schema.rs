//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation; `diesel print-schema` can regenerate them from a live
//! database when migrations change.

diesel::table! {
    /// User accounts with their point balances.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Human-readable display name (max 32 characters).
        display_name -> Varchar,
        /// Current point balance; kept non-negative by guarded updates.
        points -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Question catalogue.
    questions (id) {
        id -> Uuid,
        /// Question text shown to answering users.
        content -> Text,
        /// Lifecycle state: `ready` or `pending`.
        status -> Varchar,
        /// Owning group for group-scoped questions.
        group_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed friendship relation from host to friend.
    friends (id) {
        id -> Uuid,
        /// The user whose friend list this row belongs to.
        host_user_id -> Uuid,
        /// The befriended user.
        friend_user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Answers: who picked whom for which question.
    answers (id) {
        id -> Uuid,
        question_id -> Uuid,
        /// The user who answered.
        picker_id -> Uuid,
        /// The user named as the answer.
        picked_id -> Uuid,
        /// Hints purchased so far; only ever incremented.
        hint_count -> Int2,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only point ledger.
    point_records (id) {
        id -> Uuid,
        user_id -> Uuid,
        /// Point delta for the event.
        point -> Int8,
        /// Reference amount carried alongside the delta.
        amount -> Int8,
        /// Category tag: `charged` or `used`.
        kind -> Varchar,
        /// Human-readable description of the event.
        message -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(answers -> questions (question_id));
diesel::joinable!(friends -> users (friend_user_id));
diesel::allow_tables_to_appear_in_same_query!(users, questions, friends, answers, point_records);
