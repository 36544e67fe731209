//! Serde helpers shared by the document-facing records.

/// Reads either a single string or a list of strings into `Some(Vec<String>)`.
///
/// Use together with `#[serde(default)]` so a missing field stays `None`.
pub mod one_or_many {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Some(match Raw::deserialize(deserializer)? {
            Raw::One(value) => vec![value],
            Raw::Many(values) => values,
        }))
    }
}
