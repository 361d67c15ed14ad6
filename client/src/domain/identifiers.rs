//! Opaque record identifiers.
//!
//! The server issues identifiers and the client treats them as opaque strings.
//! Each identifier is validated once on construction so services can splice it
//! into a request path as a single segment.

use thiserror::Error;

/// Validation errors returned when constructing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The identifier was empty.
    #[error("{kind} must not be empty")]
    Empty {
        /// Identifier kind, e.g. `unit id`.
        kind: &'static str,
    },
    /// The identifier carried leading or trailing whitespace.
    #[error("{kind} must not contain surrounding whitespace")]
    SurroundingWhitespace {
        /// Identifier kind, e.g. `unit id`.
        kind: &'static str,
    },
    /// The identifier was `.` or `..`, which URL resolution collapses.
    #[error("{kind} must not be a dot segment")]
    DotSegment {
        /// Identifier kind, e.g. `unit id`.
        kind: &'static str,
    },
    /// The identifier contained a URL delimiter or escape.
    #[error("{kind} must not contain '{delimiter}'")]
    ReservedCharacter {
        /// Identifier kind, e.g. `unit id`.
        kind: &'static str,
        /// The offending delimiter.
        delimiter: char,
    },
}

const RESERVED_DELIMITERS: [char; 4] = ['/', '?', '#', '%'];

fn validate(kind: &'static str, raw: &str) -> Result<(), IdentifierError> {
    if raw.is_empty() {
        return Err(IdentifierError::Empty { kind });
    }
    if raw.trim() != raw {
        return Err(IdentifierError::SurroundingWhitespace { kind });
    }
    if raw == "." || raw == ".." {
        return Err(IdentifierError::DotSegment { kind });
    }
    if let Some(delimiter) = raw.chars().find(|c| RESERVED_DELIMITERS.contains(c)) {
        return Err(IdentifierError::ReservedCharacter { kind, delimiter });
    }
    Ok(())
}

macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the identifier from borrowed input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdentifierError> {
                Self::from_owned(id.as_ref().to_owned())
            }

            fn from_owned(id: String) -> Result<Self, IdentifierError> {
                validate($kind, &id)?;
                Ok(Self(id))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdentifierError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::new(value)
            }
        }
    };
}

define_identifier! {
    /// Server-issued identifier of a unit.
    UnitId => "unit id"
}

define_identifier! {
    /// Server-issued identifier of the building a unit belongs to.
    BuildingId => "building id"
}

define_identifier! {
    /// Server-issued identifier of a user account.
    UserId => "user id"
}
