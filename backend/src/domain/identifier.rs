//! UUID-backed identifier newtypes shared by the aggregates.
//!
//! Each aggregate gets its own identifier type so a project id can never be
//! passed where a user id is expected.

/// Validation error raised when an identifier string is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} must be a valid UUID")]
pub struct IdentifierError {
    kind: &'static str,
}

impl IdentifierError {
    pub(crate) fn new(kind: &'static str) -> Self {
        Self { kind }
    }

    /// Human-readable name of the identifier that failed to parse.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

macro_rules! define_uuid_identifier {
    ($(#[$outer:meta])* $name:ident, $kind:literal) => {
        $(#[$outer])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Parse an identifier from its canonical string form.
            ///
            /// Surrounding whitespace is rejected rather than trimmed.
            pub fn new(
                id: impl AsRef<str>,
            ) -> Result<Self, $crate::domain::identifier::IdentifierError> {
                let raw = id.as_ref();
                if raw.trim() != raw {
                    return Err($crate::domain::identifier::IdentifierError::new($kind));
                }
                ::uuid::Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| $crate::domain::identifier::IdentifierError::new($kind))
            }

            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Wrap an already-validated UUID.
            pub fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::identifier::IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

pub(crate) use define_uuid_identifier;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_uuid_identifier!(
        /// Identifier used only by these tests.
        SampleId,
        "sample id"
    );

    #[rstest]
    fn parses_canonical_uuid() {
        let id = SampleId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    #[case("")]
    #[case("not-a-uuid")]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn rejects_malformed_values(#[case] raw: &str) {
        let err = SampleId::new(raw).expect_err("malformed id must fail");
        assert_eq!(err.kind(), "sample id");
        assert_eq!(err.to_string(), "sample id must be a valid UUID");
    }

    #[rstest]
    fn serialises_as_plain_string() {
        let id = SampleId::random();
        let value = serde_json::to_value(id).expect("serialise");
        assert_eq!(value, serde_json::Value::String(id.to_string()));
    }
}
