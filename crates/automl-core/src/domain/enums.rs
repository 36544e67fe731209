//! Small string-valued enumerations shared by the domain records.
//!
//! Every enumeration in this crate has two spellings:
//!
//! - the **wire** spelling used by the REST service (`SeasonTrend`), and
//! - the **document** spelling used in TOML/YAML job files (`season_trend`).
//!
//! Parsing is deliberately forgiving: case is ignored and `_`, `-` and spaces
//! are treated as separators, so `SeasonTrend`, `season_trend`,
//! `SEASON-TREND` and `season trend` all name the same value.
//!
//! The [`string_enum!`] macro generates the enum together with its `FromStr`,
//! `Display`, and serde implementations.  Serialization always produces the
//! document spelling; the REST converters call [`as_wire`] explicitly.
//!
//! [`as_wire`]: crate::domain::forecasting_settings::UseStl::as_wire

use thiserror::Error;

/// Error returned when a string does not name any variant of an enumeration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {kind} value '{value}': expected one of {}", .valid.join(", "))]
pub struct ParseEnumError {
    /// Name of the enumeration being parsed (e.g. `"UseStl"`).
    pub kind: &'static str,
    /// The rejected input, verbatim.
    pub value: String,
    /// Document spellings of every valid variant.
    pub valid: Vec<&'static str>,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str, valid: Vec<&'static str>) -> Self {
        Self {
            kind,
            value: value.to_string(),
            valid,
        }
    }
}

/// Reduces a name to a comparison key: lowercase ASCII alphanumerics only.
///
/// `"NormalizedRootMeanSquaredError"`, `"normalized_root_mean_squared_error"`
/// and `"NORMALIZED-ROOT-MEAN-SQUARED-ERROR"` all reduce to the same key.
pub fn normalize_token(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Declares a string-valued enumeration with wire and document spellings.
///
/// ```ignore
/// string_enum! {
///     /// Docs for the enum.
///     pub enum UseStl {
///         None => ("None", "none"),
///         Season => ("Season", "season"),
///     }
/// }
/// ```
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($wire:literal, $doc:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Spelling used by the REST service.
            pub fn as_wire(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Spelling used in job documents.
            pub fn as_doc(&self) -> &'static str {
                match self {
                    $($name::$variant => $doc,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_doc())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::enums::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = $crate::domain::enums::normalize_token(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| {
                        $crate::domain::enums::normalize_token(v.as_wire()) == key
                            || $crate::domain::enums::normalize_token(v.as_doc()) == key
                    })
                    .ok_or_else(|| {
                        $crate::domain::enums::ParseEnumError::new(
                            stringify!($name),
                            s,
                            Self::ALL.iter().map(|v| v.as_doc()).collect(),
                        )
                    })
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_doc())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use string_enum;
