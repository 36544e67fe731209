//! Values that can either be inferred by the service (`auto`) or fixed.
//!
//! Several forecasting parameters (forecast horizon, seasonality, rolling
//! window size, number of cross-validation folds) accept the literal string
//! `"auto"` in job documents, meaning "let the service work it out", or a
//! concrete number.  [`AutoOr`] models that choice; [`TargetLags`] is the same
//! idea for a list of lag offsets.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const AUTO: &str = "auto";

/// Either `auto` or a fixed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoOr<T> {
    Auto,
    Value(T),
}

impl<T> AutoOr<T> {
    /// Returns the fixed value, or `None` for `Auto`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Auto => None,
            Self::Value(v) => Some(v),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl<T> From<T> for AutoOr<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: fmt::Display> fmt::Display for AutoOr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str(AUTO),
            Self::Value(v) => v.fmt(f),
        }
    }
}

impl<T: Serialize> Serialize for AutoOr<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str(AUTO),
            Self::Value(v) => v.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAutoOr<T> {
    Value(T),
    Text(String),
}

fn expect_auto<E: serde::de::Error>(text: &str) -> Result<(), E> {
    if text.trim().eq_ignore_ascii_case(AUTO) {
        Ok(())
    } else {
        Err(E::custom(format!("expected \"auto\" or a number, got \"{text}\"")))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for AutoOr<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawAutoOr::<T>::deserialize(deserializer)? {
            RawAutoOr::Value(v) => Ok(Self::Value(v)),
            RawAutoOr::Text(text) => expect_auto::<D::Error>(&text).map(|()| Self::Auto),
        }
    }
}

/// Target lag offsets: `auto` or an explicit list.
///
/// Documents may also give a single integer, which is read as a one-element
/// list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetLags {
    Auto,
    Values(Vec<i32>),
}

impl From<i32> for TargetLags {
    fn from(lag: i32) -> Self {
        Self::Values(vec![lag])
    }
}

impl From<Vec<i32>> for TargetLags {
    fn from(lags: Vec<i32>) -> Self {
        Self::Values(lags)
    }
}

impl Serialize for TargetLags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str(AUTO),
            Self::Values(lags) => lags.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTargetLags {
    One(i32),
    Many(Vec<i32>),
    Text(String),
}

impl<'de> Deserialize<'de> for TargetLags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawTargetLags::deserialize(deserializer)? {
            RawTargetLags::One(lag) => Ok(Self::Values(vec![lag])),
            RawTargetLags::Many(lags) => Ok(Self::Values(lags)),
            RawTargetLags::Text(text) => expect_auto::<D::Error>(&text).map(|()| Self::Auto),
        }
    }
}
