//! PostgreSQL-backed `TestCaseRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{TestCaseRepository, TestCaseRepositoryError};
use crate::domain::{
    ProjectId, StoredTestCase, TestCase, TestCaseId, TestCaseStatus, TestCaseTitle, UserId,
};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewTestCaseRow, TestCaseRow};
use super::pool::{DbPool, PoolError};
use super::schema::test_cases;

/// Diesel-backed test case store.
#[derive(Clone)]
pub struct DieselTestCaseRepository {
    pool: DbPool,
}

impl DieselTestCaseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TestCaseRepositoryError {
    TestCaseRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &'static str,
) -> TestCaseRepositoryError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection => {
            TestCaseRepositoryError::connection("database connection error")
        }
        DieselFailure::UniqueViolation { .. } => {
            TestCaseRepositoryError::query("duplicate test case")
        }
        DieselFailure::Query(message) => TestCaseRepositoryError::query(message),
    }
}

fn row_to_test_case(row: TestCaseRow) -> Result<TestCase, TestCaseRepositoryError> {
    let invalid = |err: &dyn std::fmt::Display| {
        warn!(test_case_id = %row.id, "stored test case row failed validation");
        TestCaseRepositoryError::query(format!("stored test case is invalid: {err}"))
    };
    let title = TestCaseTitle::new(&row.title).map_err(|err| invalid(&err))?;
    let status: TestCaseStatus = row.status.parse().map_err(|err| invalid(&err))?;

    Ok(TestCase::from(StoredTestCase {
        id: TestCaseId::from_uuid(row.id),
        title,
        description: row.description,
        steps: row.steps,
        expected_result: row.expected_result,
        status,
        project_id: ProjectId::from_uuid(row.project_id),
        owner: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

#[async_trait]
impl TestCaseRepository for DieselTestCaseRepository {
    async fn insert(&self, test_case: &TestCase) -> Result<(), TestCaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTestCaseRow {
            id: *test_case.id().as_uuid(),
            project_id: *test_case.project_id().as_uuid(),
            user_id: *test_case.owner().as_uuid(),
            title: test_case.title().as_ref(),
            description: test_case.description(),
            steps: test_case.steps(),
            expected_result: test_case.expected_result(),
            status: test_case.status().as_str(),
            created_at: test_case.created_at(),
            updated_at: test_case.updated_at(),
        };

        diesel::insert_into(test_cases::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert test case"))
    }

    async fn list_by_project_owned_by(
        &self,
        project: &ProjectId,
        owner: &UserId,
    ) -> Result<Vec<TestCase>, TestCaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TestCaseRow> = test_cases::table
            .filter(
                test_cases::project_id
                    .eq(project.as_uuid())
                    .and(test_cases::user_id.eq(owner.as_uuid())),
            )
            .order((test_cases::created_at.asc(), test_cases::id.asc()))
            .select(TestCaseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list test cases"))?;

        rows.into_iter().map(row_to_test_case).collect()
    }
}
