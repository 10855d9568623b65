use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::num::{NonZeroU64, NonZeroUsize};

use crate::error::ValidationError;

/// Layout of the request file.
#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestFormat {
    /// Pick by extension: `.yaml`/`.yml`/`.json` are structured, anything
    /// else is tab-delimited.
    Auto,
    Tsv,
    Yaml,
}

/// Declares a strictly positive integer newtype that parses from CLI text
/// (surrounding whitespace allowed) and rejects zero.
macro_rules! positive_integer {
    ($name:ident, $nonzero:ty, $int:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name($nonzero);

        impl $name {
            #[must_use]
            pub const fn get(self) -> $int {
                self.0.get()
            }
        }

        impl TryFrom<$int> for $name {
            type Error = ValidationError;

            fn try_from(value: $int) -> Result<Self, Self::Error> {
                <$nonzero>::new(value)
                    .map($name)
                    .ok_or(ValidationError::ValueTooSmall { min: 1 })
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value: $int = s
                    .trim()
                    .parse()
                    .map_err(|err| ValidationError::InvalidNumber { source: err })?;
                $name::try_from(value)
            }
        }

        impl From<$name> for $int {
            fn from(value: $name) -> Self {
                value.get()
            }
        }
    };
}

positive_integer!(PositiveU64, NonZeroU64, u64);
positive_integer!(PositiveUsize, NonZeroUsize, usize);
