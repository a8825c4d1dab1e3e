//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` is unique and compared case-sensitively.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// Argon2 PHC string; never selected into public records.
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects, each owned by exactly one user.
    projects (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Test cases. `user_id` records the creator independently of the
    /// parent project's owner.
    test_cases (id) {
        id -> Uuid,
        project_id -> Uuid,
        user_id -> Uuid,
        title -> Varchar,
        description -> Nullable<Text>,
        steps -> Nullable<Text>,
        expected_result -> Nullable<Text>,
        /// One of `Passed`, `Failed`, `Blocked`, `Not Run` (check constraint).
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> users (user_id));
diesel::joinable!(test_cases -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(users, projects, test_cases);
