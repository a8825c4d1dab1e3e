//! In-memory test case store.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{TestCaseRepository, TestCaseRepositoryError};
use crate::domain::{ProjectId, TestCase, UserId};

use super::{read, write};

/// Process-local [`TestCaseRepository`]; listings keep insertion order.
#[derive(Default)]
pub struct InMemoryTestCaseRepository {
    test_cases: RwLock<Vec<TestCase>>,
}

impl InMemoryTestCaseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> TestCaseRepositoryError {
    TestCaseRepositoryError::query("test case store lock poisoned")
}

#[async_trait]
impl TestCaseRepository for InMemoryTestCaseRepository {
    async fn insert(&self, test_case: &TestCase) -> Result<(), TestCaseRepositoryError> {
        write(&self.test_cases, poisoned)?.push(test_case.clone());
        Ok(())
    }

    async fn list_by_project_owned_by(
        &self,
        project: &ProjectId,
        owner: &UserId,
    ) -> Result<Vec<TestCase>, TestCaseRepositoryError> {
        Ok(read(&self.test_cases, poisoned)?
            .iter()
            .filter(|test_case| test_case.project_id() == project && test_case.owner() == owner)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTestCase, TestCaseFields, TestCaseId};
    use chrono::Utc;
    use rstest::rstest;

    fn test_case(title: &str, project: ProjectId, owner: UserId) -> TestCase {
        NewTestCase::try_from_fields(
            project,
            TestCaseFields {
                title,
                ..Default::default()
            },
        )
        .expect("valid")
        .into_test_case(TestCaseId::random(), owner, Utc::now())
    }

    #[rstest]
    #[tokio::test]
    async fn listing_matches_project_and_stored_owner() {
        let repo = InMemoryTestCaseRepository::new();
        let project = ProjectId::random();
        let other_project = ProjectId::random();
        let alice = UserId::random();
        let mallory = UserId::random();

        let wanted_a = test_case("a", project, alice);
        let other_owner = test_case("b", project, mallory);
        let other_project_case = test_case("c", other_project, alice);
        let wanted_d = test_case("d", project, alice);
        for tc in [&wanted_a, &other_owner, &other_project_case, &wanted_d] {
            repo.insert(tc).await.expect("insert");
        }

        let listed = repo
            .list_by_project_owned_by(&project, &alice)
            .await
            .expect("list");

        assert_eq!(listed, vec![wanted_a, wanted_d]);
    }
}
