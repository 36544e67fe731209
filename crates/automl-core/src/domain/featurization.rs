//! Featurization settings of a tabular job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::enums::string_enum;
use crate::domain::overwrite;

string_enum! {
    /// How the service featurizes the input columns.
    pub enum FeaturizationMode {
        Auto => ("Auto", "auto"),
        Custom => ("Custom", "custom"),
        Off => ("Off", "off"),
    }
}

/// Parameters for one transformer applied to a set of columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnTransformer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeaturizationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<FeaturizationMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_transformers: Option<Vec<String>>,
    /// Column name → feature type override (`Numeric`, `Categorical`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_name_and_types: Option<BTreeMap<String, String>>,
    /// Three-letter ISO 639-3 code of the dataset language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_language: Option<String>,
    /// Transformer name → per-column parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformer_params: Option<BTreeMap<String, Vec<ColumnTransformer>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_dnn_featurization: Option<bool>,
}

impl FeaturizationSettings {
    /// Overwrites each field that `update` supplies.
    pub fn merge(&mut self, update: FeaturizationSettings) {
        overwrite(&mut self.mode, update.mode);
        overwrite(&mut self.blocked_transformers, update.blocked_transformers);
        overwrite(&mut self.column_name_and_types, update.column_name_and_types);
        overwrite(&mut self.dataset_language, update.dataset_language);
        overwrite(&mut self.transformer_params, update.transformer_params);
        overwrite(&mut self.enable_dnn_featurization, update.enable_dnn_featurization);
    }
}
