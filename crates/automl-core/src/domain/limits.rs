//! Resource and time limits of a tabular job.

use serde::{Deserialize, Serialize};

use crate::domain::overwrite;

/// Limits on the model search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_early_termination: Option<bool>,
    /// Score at which the search stops early.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_trials: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cores_per_trial: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_trials: Option<u32>,
    /// Wall-clock budget for the whole job, in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_minutes: Option<u32>,
    /// Wall-clock budget for a single trial, in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_timeout_minutes: Option<u32>,
}

impl LimitSettings {
    /// Overwrites each field that `update` supplies.
    pub fn merge(&mut self, update: LimitSettings) {
        overwrite(&mut self.enable_early_termination, update.enable_early_termination);
        overwrite(&mut self.exit_score, update.exit_score);
        overwrite(&mut self.max_concurrent_trials, update.max_concurrent_trials);
        overwrite(&mut self.max_cores_per_trial, update.max_cores_per_trial);
        overwrite(&mut self.max_nodes, update.max_nodes);
        overwrite(&mut self.max_trials, update.max_trials);
        overwrite(&mut self.timeout_minutes, update.timeout_minutes);
        overwrite(&mut self.trial_timeout_minutes, update.trial_timeout_minutes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut limits = LimitSettings {
            max_trials: Some(40),
            timeout_minutes: Some(120),
            ..Default::default()
        };

        limits.merge(LimitSettings {
            timeout_minutes: Some(60),
            ..Default::default()
        });

        assert_eq!(limits.max_trials, Some(40));
        assert_eq!(limits.timeout_minutes, Some(60));
    }

    #[test]
    fn test_document_round_trip() {
        let limits = LimitSettings {
            exit_score: Some(0.05),
            max_cores_per_trial: Some(-1),
            ..Default::default()
        };

        let text = toml::to_string(&limits).unwrap();
        let back: LimitSettings = toml::from_str(&text).unwrap();

        assert_eq!(limits, back);
    }
}
