//! Test cases attached to projects.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::identifier::define_uuid_identifier;
use super::project::ProjectId;
use super::text::{normalise_optional, normalise_required};
use super::user::UserId;

define_uuid_identifier!(
    /// Stable test case identifier.
    TestCaseId,
    "test case id"
);

/// Validation errors raised while drafting a test case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestCaseValidationError {
    #[error("test case title must not be empty")]
    EmptyTitle,
    #[error("status must be one of Passed, Failed, Blocked, Not Run (got {value:?})")]
    UnknownStatus { value: String },
}

impl TestCaseValidationError {
    /// Name of the offending payload field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::UnknownStatus { .. } => "status",
        }
    }
}

/// Outcome of the most recent run of a test case.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestCaseStatus {
    Passed,
    Failed,
    Blocked,
    #[default]
    NotRun,
}

impl TestCaseStatus {
    pub const ALL: [Self; 4] = [Self::Passed, Self::Failed, Self::Blocked, Self::NotRun];

    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::Blocked => "Blocked",
            Self::NotRun => "Not Run",
        }
    }
}

impl fmt::Display for TestCaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestCaseStatus {
    type Err = TestCaseValidationError;

    /// Parse the exact wire string; matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TestCaseValidationError::UnknownStatus {
                value: s.to_owned(),
            })
    }
}

/// Test case title: trimmed and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseTitle(String);

impl TestCaseTitle {
    pub fn new(title: impl AsRef<str>) -> Result<Self, TestCaseValidationError> {
        normalise_required(title.as_ref())
            .map(Self)
            .ok_or(TestCaseValidationError::EmptyTitle)
    }
}

impl AsRef<str> for TestCaseTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Raw test case fields as received from a client.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestCaseFields<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub steps: Option<&'a str>,
    pub expected_result: Option<&'a str>,
    pub status: Option<&'a str>,
}

/// Validated payload for creating a test case under `project_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestCase {
    project_id: ProjectId,
    title: TestCaseTitle,
    description: Option<String>,
    steps: Option<String>,
    expected_result: Option<String>,
    status: TestCaseStatus,
}

impl NewTestCase {
    /// Validate raw fields. An omitted status defaults to
    /// [`TestCaseStatus::NotRun`]; an unrecognised one is rejected.
    ///
    /// # Examples
    /// ```
    /// use casebook::domain::{NewTestCase, ProjectId, TestCaseFields, TestCaseStatus};
    ///
    /// let draft = NewTestCase::try_from_fields(
    ///     ProjectId::random(),
    ///     TestCaseFields { title: "Check login", ..Default::default() },
    /// )
    /// .unwrap();
    /// assert_eq!(draft.status(), TestCaseStatus::NotRun);
    /// ```
    pub fn try_from_fields(
        project_id: ProjectId,
        fields: TestCaseFields<'_>,
    ) -> Result<Self, TestCaseValidationError> {
        let title = TestCaseTitle::new(fields.title)?;
        let status = fields
            .status
            .map(TestCaseStatus::from_str)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            project_id,
            title,
            description: normalise_optional(fields.description),
            steps: normalise_optional(fields.steps),
            expected_result: normalise_optional(fields.expected_result),
            status,
        })
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn title(&self) -> &TestCaseTitle {
        &self.title
    }

    pub fn status(&self) -> TestCaseStatus {
        self.status
    }

    /// Materialise the draft as a record created by `owner`.
    pub fn into_test_case(self, id: TestCaseId, owner: UserId, now: DateTime<Utc>) -> TestCase {
        TestCase {
            id,
            title: self.title,
            description: self.description,
            steps: self.steps,
            expected_result: self.expected_result,
            status: self.status,
            project_id: self.project_id,
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Persisted test case.
///
/// `owner` records the creating user independently of the parent project's
/// owner; listings filter on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    id: TestCaseId,
    title: TestCaseTitle,
    description: Option<String>,
    steps: Option<String>,
    expected_result: Option<String>,
    status: TestCaseStatus,
    project_id: ProjectId,
    owner: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Stored columns used to rehydrate a [`TestCase`].
#[derive(Debug, Clone)]
pub struct StoredTestCase {
    pub id: TestCaseId,
    pub title: TestCaseTitle,
    pub description: Option<String>,
    pub steps: Option<String>,
    pub expected_result: Option<String>,
    pub status: TestCaseStatus,
    pub project_id: ProjectId,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StoredTestCase> for TestCase {
    fn from(stored: StoredTestCase) -> Self {
        Self {
            id: stored.id,
            title: stored.title,
            description: normalise_optional(stored.description.as_deref()),
            steps: normalise_optional(stored.steps.as_deref()),
            expected_result: normalise_optional(stored.expected_result.as_deref()),
            status: stored.status,
            project_id: stored.project_id,
            owner: stored.owner,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

impl TestCase {
    pub fn id(&self) -> &TestCaseId {
        &self.id
    }

    pub fn title(&self) -> &TestCaseTitle {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn steps(&self) -> Option<&str> {
        self.steps.as_deref()
    }

    pub fn expected_result(&self) -> Option<&str> {
        self.expected_result.as_deref()
    }

    pub fn status(&self) -> TestCaseStatus {
        self.status
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
