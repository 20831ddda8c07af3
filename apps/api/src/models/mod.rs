//! Domain records shared by the store, the services and the HTTP layer.
//!
//! Wire format is camelCase JSON; enums serialize by variant name
//! (`"WebApplication"`, `"Button"`, ...) and are stored as TEXT.

use serde::Deserialize;
use thiserror::Error;

use self::validation::FieldErrors;

#[derive(Debug, Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a fieldless enum that round-trips through its variant name,
/// both over serde and as a TEXT column.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident default $default:ident {
            $($variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok($name::$variant),)+
                    other => Err($crate::models::UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

pub mod component;
pub mod project;
pub mod review;
pub mod settings;
pub mod suggestion;
pub mod validation;

/// Body of the project and component `duplicate` actions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateRequest {
    pub new_name: String,
}

impl DuplicateRequest {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors
            .required("newName", &self.new_name)
            .max_len("newName", &self.new_name, project::NAME_MAX);
        errors
    }
}
