//! Port abstraction for test case persistence.
use async_trait::async_trait;

use crate::domain::{ProjectId, TestCase, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by test case repository adapters.
    pub enum TestCaseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "test case repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "test case repository query failed: {message}",
    }
}

/// Test case store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestCaseRepository: Send + Sync {
    /// Persist a new test case. Adapters do not check project ownership.
    async fn insert(&self, test_case: &TestCase) -> Result<(), TestCaseRepositoryError>;

    /// Test cases under `project` whose stored owner is `owner`, oldest first.
    async fn list_by_project_owned_by(
        &self,
        project: &ProjectId,
        owner: &UserId,
    ) -> Result<Vec<TestCase>, TestCaseRepositoryError>;
}
