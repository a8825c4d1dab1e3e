//! Integration tests for `DieselTestCaseRepository` against embedded
//! PostgreSQL.

use casebook::domain::ports::{
    ProjectRepository, TestCaseRepository, TestCaseRepositoryError, UserRepository,
};
use casebook::domain::{
    EmailAddress, NewProject, NewTestCase, PasswordHash, ProjectId, TestCase, TestCaseFields,
    TestCaseId, TestCaseStatus, User, UserAccount, UserId, UserName,
};
use casebook::outbound::persistence::{
    DbPool, DieselProjectRepository, DieselTestCaseRepository, DieselUserRepository, PoolConfig,
};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::error::SqlState;
use postgres::{Client, NoTls};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{
    format_postgres_error, handle_cluster_setup_failure, migrate_schema, reset_database,
};

const TEST_DB: &str = "diesel_test_case_repository_test";
const HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    database_url: String,
    repository: DieselTestCaseRepository,
    alice: UserId,
    bob: UserId,
    checkout: ProjectId,
    login: ProjectId,
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn seed_owner(
    runtime: &Runtime,
    users: &DieselUserRepository,
    name: &str,
    email: &str,
) -> Result<UserId, String> {
    let user = User::new(
        UserId::random(),
        UserName::new(name).map_err(|err| err.to_string())?,
        EmailAddress::new(email).map_err(|err| err.to_string())?,
        epoch(),
    );
    let owner = UserAccount::new(user, PasswordHash::new(HASH).map_err(|err| err.to_string())?);
    runtime
        .block_on(users.insert(&owner))
        .map_err(|err| err.to_string())?;
    Ok(*owner.user().id())
}

fn seed_project(
    runtime: &Runtime,
    projects: &DieselProjectRepository,
    name: &str,
    owner: UserId,
) -> Result<ProjectId, String> {
    let project = NewProject::try_from_parts(name, None)
        .map_err(|err| err.to_string())?
        .into_project(ProjectId::random(), owner, epoch());
    runtime
        .block_on(projects.insert(&project))
        .map_err(|err| err.to_string())?;
    Ok(*project.id())
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    reset_database(&cluster, TEST_DB)?;
    let database_url = cluster.connection().database_url(TEST_DB);
    migrate_schema(&database_url)?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    let users = DieselUserRepository::new(pool.clone());
    let projects = DieselProjectRepository::new(pool.clone());
    let alice = seed_owner(&runtime, &users, "Alice", "alice@example.com")?;
    let bob = seed_owner(&runtime, &users, "Bob", "bob@example.com")?;
    let checkout = seed_project(&runtime, &projects, "Checkout", alice)?;
    let login = seed_project(&runtime, &projects, "Login", alice)?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        database_url,
        repository: DieselTestCaseRepository::new(pool),
        alice,
        bob,
        checkout,
        login,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn test_case(title: &str, project: ProjectId, owner: UserId, minutes: i64) -> TestCase {
    NewTestCase::try_from_fields(
        project,
        TestCaseFields {
            title,
            steps: Some("1. Open the page\n2. Submit"),
            expected_result: Some("Confirmation shown"),
            status: Some("Failed"),
            ..Default::default()
        },
    )
    .expect("valid test case")
    .into_test_case(
        TestCaseId::random(),
        owner,
        epoch() + TimeDelta::minutes(minutes),
    )
}

impl TestContext {
    fn insert(&self, test_case: &TestCase) {
        self.runtime
            .block_on(self.repository.insert(test_case))
            .expect("insert test case");
    }

    fn list(&self, project: &ProjectId, owner: &UserId) -> Vec<TestCase> {
        self.runtime
            .block_on(self.repository.list_by_project_owned_by(project, owner))
            .expect("list test cases")
    }
}

#[rstest]
fn listings_filter_on_project_and_stored_owner(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: listings_filter_on_project_and_stored_owner skipped");
        return;
    };
    let first = test_case("Pay by card", context.checkout, context.alice, 1);
    let second = test_case("Pay by voucher", context.checkout, context.alice, 4);
    let elsewhere = test_case("Reset password", context.login, context.alice, 2);
    let bobs = test_case("Pay twice", context.checkout, context.bob, 3);
    for record in [&second, &bobs, &elsewhere, &first] {
        context.insert(record);
    }

    assert_eq!(context.list(&context.checkout, &context.alice), vec![first, second]);
    assert_eq!(context.list(&context.login, &context.alice), vec![elsewhere]);
    assert_eq!(context.list(&context.checkout, &context.bob), vec![bobs]);
    assert!(context.list(&context.login, &context.bob).is_empty());
}

#[rstest]
fn stored_fields_survive_the_round_trip(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: stored_fields_survive_the_round_trip skipped");
        return;
    };
    let record = test_case("Pay by card", context.checkout, context.alice, 0);
    context.insert(&record);

    let listed = context.list(&context.checkout, &context.alice);

    let [stored] = listed.as_slice() else {
        panic!("expected one test case, got {}", listed.len());
    };
    assert_eq!(stored.status(), TestCaseStatus::Failed);
    assert_eq!(stored.steps(), Some("1. Open the page\n2. Submit"));
    assert_eq!(stored.expected_result(), Some("Confirmation shown"));
    assert!(stored.description().is_none());
    assert_eq!(stored, &record);
}

#[rstest]
fn test_cases_for_unknown_projects_are_rejected(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: test_cases_for_unknown_projects_are_rejected skipped");
        return;
    };
    let orphan = test_case("Orphan", ProjectId::random(), context.alice, 0);

    let err = context
        .runtime
        .block_on(context.repository.insert(&orphan))
        .expect_err("foreign key should reject the insert");

    assert_eq!(err, TestCaseRepositoryError::query("database error"));
}

#[rstest]
fn unknown_statuses_are_refused_by_the_schema(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_statuses_are_refused_by_the_schema skipped");
        return;
    };
    let mut client = Client::connect(&context.database_url, NoTls)
        .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)));

    let err = client
        .execute(
            "INSERT INTO test_cases (id, project_id, user_id, title, status) \
             VALUES ($1, $2, $3, 'Skipped case', 'Skipped')",
            &[
                &Uuid::new_v4(),
                context.checkout.as_uuid(),
                context.alice.as_uuid(),
            ],
        )
        .expect_err("status check should reject the row");

    assert_eq!(err.code(), Some(&SqlState::CHECK_VIOLATION));
    assert!(context.list(&context.checkout, &context.alice).is_empty());
}
