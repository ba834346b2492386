use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Identifier of a server-side record.
///
/// Every record in the booking backend is keyed by a positive integer; the
/// newtypes keep room, guest and reservation ids from being mixed up.
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    fn value(&self) -> i64;

    fn as_string(&self) -> String {
        self.value().to_string()
    }

    fn from_string(s: &str) -> Result<Self, String>;
}

/// Declares an integer id newtype with its `AggregateId` impl
#[macro_export]
macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Form fields hold ids as strings; empty, zero and garbage mean "none"
            pub fn from_form(raw: &str) -> Option<Self> {
                match raw.trim().parse::<i64>() {
                    Ok(v) if v > 0 => Some(Self(v)),
                    _ => None,
                }
            }
        }

        impl $crate::domain::common::AggregateId for $name {
            fn value(&self) -> i64 {
                self.0
            }

            fn from_string(s: &str) -> Result<Self, String> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|e| format!("Invalid {}: {}", stringify!($name), e))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
