//! Projects group test cases and belong to exactly one user.

use std::fmt;

use chrono::{DateTime, Utc};

use super::identifier::define_uuid_identifier;
use super::text::{normalise_optional, normalise_required};
use super::user::UserId;

define_uuid_identifier!(
    /// Stable project identifier.
    ProjectId,
    "project id"
);

/// Validation errors raised while drafting a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProjectValidationError {
    #[error("project name must not be empty")]
    EmptyName,
}

/// Project name: trimmed and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, ProjectValidationError> {
        normalise_required(name.as_ref())
            .map(Self)
            .ok_or(ProjectValidationError::EmptyName)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Validated payload for creating a project.
///
/// The owner is not part of the draft; services attach the authenticated
/// caller when persisting it.
///
/// # Examples
/// ```
/// use casebook::domain::NewProject;
///
/// let draft = NewProject::try_from_parts("  Login Flow ", Some("   ")).unwrap();
/// assert_eq!(draft.name().as_ref(), "Login Flow");
/// assert!(draft.description().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    name: ProjectName,
    description: Option<String>,
}

impl NewProject {
    pub fn try_from_parts(
        name: &str,
        description: Option<&str>,
    ) -> Result<Self, ProjectValidationError> {
        Ok(Self {
            name: ProjectName::new(name)?,
            description: normalise_optional(description),
        })
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Materialise the draft as a record owned by `owner`.
    pub fn into_project(self, id: ProjectId, owner: UserId, now: DateTime<Utc>) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Persisted project.
///
/// ## Invariants
/// - `owner` is set at creation and never reassigned.
/// - `description` is either absent or non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: Option<String>,
    owner: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Project {
    /// Rehydrate a project from storage.
    pub fn from_parts(
        id: ProjectId,
        name: ProjectName,
        description: Option<String>,
        owner: UserId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description: normalise_optional(description.as_deref()),
            owner,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
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

    /// True when `user` owns this project.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }
}
