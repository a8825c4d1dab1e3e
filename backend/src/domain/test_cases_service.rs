//! Test case domain service.
//!
//! Creation only proceeds when the caller owns the target project, so a
//! caller cannot learn whether a foreign project id exists. Listings filter
//! on the test case's own recorded owner.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    ProjectRepository, TestCaseRepository, TestCaseRepositoryError, TestCasesCommand,
    TestCasesQuery,
};
use crate::domain::projects_service::{PROJECT_NOT_FOUND, map_project_error};
use crate::domain::{Error, NewTestCase, ProjectId, TestCase, TestCaseId, UserId};

fn map_test_case_error(error: TestCaseRepositoryError) -> Error {
    match error {
        TestCaseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("test case repository unavailable: {message}"))
        }
        TestCaseRepositoryError::Query { message } => {
            Error::internal(format!("test case repository error: {message}"))
        }
    }
}

/// Test case service implementing the test case driving ports.
#[derive(Clone)]
pub struct TestCasesService<T, P> {
    test_cases: Arc<T>,
    projects: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<T, P> TestCasesService<T, P> {
    pub fn new(test_cases: Arc<T>, projects: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            test_cases,
            projects,
            clock,
        }
    }
}

#[async_trait]
impl<T, P> TestCasesCommand for TestCasesService<T, P>
where
    T: TestCaseRepository,
    P: ProjectRepository,
{
    async fn create_test_case(&self, owner: &UserId, draft: NewTestCase) -> Result<TestCase, Error> {
        let project = self
            .projects
            .find_owned_by(draft.project_id(), owner)
            .await
            .map_err(map_project_error)?;
        if project.is_none() {
            debug!(project_id = %draft.project_id(), "test case rejected: project not owned");
            return Err(Error::not_found(PROJECT_NOT_FOUND));
        }

        let test_case = draft.into_test_case(TestCaseId::random(), *owner, self.clock.utc());
        self.test_cases
            .insert(&test_case)
            .await
            .map_err(map_test_case_error)?;
        info!(
            test_case_id = %test_case.id(),
            project_id = %test_case.project_id(),
            "test case created"
        );
        Ok(test_case)
    }
}

#[async_trait]
impl<T, P> TestCasesQuery for TestCasesService<T, P>
where
    T: TestCaseRepository,
    P: ProjectRepository,
{
    async fn list_test_cases(
        &self,
        owner: &UserId,
        project: &ProjectId,
    ) -> Result<Vec<TestCase>, Error> {
        self.test_cases
            .list_by_project_owned_by(project, owner)
            .await
            .map_err(map_test_case_error)
    }
}

#[cfg(test)]
#[path = "test_cases_service_tests.rs"]
mod tests;
