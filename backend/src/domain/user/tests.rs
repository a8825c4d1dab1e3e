//! Tests for the domain user model.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5)
        .single()
        .expect("valid timestamp")
}

#[given("a registered user named Alice")]
fn a_registered_user(created_at: DateTime<Utc>) -> User {
    User::new(
        UserId::new(VALID_ID).expect("valid id"),
        UserName::new("Alice").expect("valid name"),
        EmailAddress::new("alice@example.com").expect("valid email"),
        created_at,
    )
}

#[when("the account is paired with a password hash")]
fn pair_with_hash(user: User) -> UserAccount {
    let hash = PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
        .expect("non-empty hash");
    UserAccount::new(user, hash)
}

#[then("the public record is unchanged and the hash stays redacted")]
fn public_record_is_preserved(account: UserAccount, expected: User) {
    assert!(!format!("{account:?}").contains("argon2id"));
    assert_eq!(account.into_user(), expected);
}

#[rstest]
fn account_round_trips_public_record(created_at: DateTime<Utc>) {
    let user = a_registered_user(created_at);
    let account = pair_with_hash(user.clone());
    public_record_is_preserved(account, user);
}

#[rstest]
#[case("  Alice  ", "Alice")]
#[case("Ada Lovelace", "Ada Lovelace")]
fn user_names_are_trimmed(#[case] raw: &str, #[case] expected: &str) {
    let name = UserName::new(raw).expect("valid name");
    assert_eq!(name.as_ref(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_user_names_are_rejected(#[case] raw: &str) {
    assert_eq!(UserName::new(raw), Err(UserValidationError::EmptyName));
}

#[rstest]
fn emails_keep_their_case() {
    let upper = EmailAddress::new(" Alice@Example.com ").expect("valid email");
    let lower = EmailAddress::new("alice@example.com").expect("valid email");
    assert_eq!(upper.as_ref(), "Alice@Example.com");
    assert_ne!(upper, lower);
}

#[rstest]
#[case("")]
#[case("\t")]
fn blank_emails_are_rejected(#[case] raw: &str) {
    assert_eq!(EmailAddress::new(raw), Err(UserValidationError::EmptyEmail));
}

#[rstest]
fn blank_password_hash_is_rejected() {
    assert!(matches!(
        PasswordHash::new("  "),
        Err(UserValidationError::EmptyPasswordHash)
    ));
}

#[rstest]
fn user_ids_reject_garbage() {
    let err = UserId::new("not-a-uuid").expect_err("invalid id");
    assert_eq!(err.to_string(), "user id must be a valid UUID");
}
