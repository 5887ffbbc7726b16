//! Opaque string identifiers used across the domain.
//!
//! The authentication provider and the hosted document store both hand out
//! opaque string identifiers, so these are string newtypes rather than UUID
//! newtypes. `DocumentId` values for new documents are minted client-side.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Stable identity of an authenticated principal (the provider's subject id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(String);

/// Identifier of a document in the hosted record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.trim().is_empty() {
                    return Err(DomainError::invalid_id(concat!($name, ": empty")));
                }
                Ok(Self(s.to_string()))
            }
        }
    };
}

impl_string_newtype!(IdentityId, "IdentityId");
impl_string_newtype!(DocumentId, "DocumentId");

impl DocumentId {
    /// Mint a fresh document id client-side (the store accepts caller ids).
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifier_is_rejected() {
        assert!("  ".parse::<IdentityId>().is_err());
        assert!("uid-1".parse::<IdentityId>().is_ok());
    }

    #[test]
    fn random_document_ids_are_distinct() {
        assert_ne!(DocumentId::random(), DocumentId::random());
    }
}
