//! Type-safe identifier wrappers.
//!
//! Seismic catalogs assign each record a string identifier (for example
//! `us7000abcd`) that stays stable across catalog refreshes. Wrapping it in
//! a newtype keeps event IDs from being mixed up with place names or
//! country keys, which are plain strings too.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a seismic event, taken verbatim from the source feature.
    EventId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_string() {
        let id = EventId::new("us7000abcd");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"us7000abcd\"");
    }

    #[test]
    fn display_matches_inner_value() {
        let id = EventId::from("ci40123456");
        assert_eq!(id.to_string(), "ci40123456");
        assert_eq!(id.as_str(), "ci40123456");
        assert_eq!(String::from(id), "ci40123456");
    }
}
