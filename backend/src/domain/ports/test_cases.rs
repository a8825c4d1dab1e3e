//! Driving ports for test case use-cases.

use async_trait::async_trait;

use crate::domain::{Error, NewTestCase, ProjectId, TestCase, UserId};

/// Write-side test case use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestCasesCommand: Send + Sync {
    /// Attach a test case to a project owned by `owner`.
    async fn create_test_case(&self, owner: &UserId, draft: NewTestCase) -> Result<TestCase, Error>;
}

/// Read-side test case use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestCasesQuery: Send + Sync {
    /// Test cases under `project` created by `owner`.
    async fn list_test_cases(
        &self,
        owner: &UserId,
        project: &ProjectId,
    ) -> Result<Vec<TestCase>, Error>;
}
