//! Job-level metadata: naming, placement, identity, and declared outputs.
//!
//! None of this affects how the model search runs; it describes *where* and
//! *as whom* the job runs and how it is labelled in the workspace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::enums::string_enum;

string_enum! {
    /// Kind of asset a job output produces.
    pub enum OutputType {
        UriFolder => ("uri_folder", "uri_folder"),
        UriFile => ("uri_file", "uri_file"),
        MlTable => ("mltable", "mltable"),
        CustomModel => ("custom_model", "custom_model"),
        MlflowModel => ("mlflow_model", "mlflow_model"),
        TritonModel => ("triton_model", "triton_model"),
    }
}

impl Default for OutputType {
    fn default() -> Self {
        Self::UriFolder
    }
}

string_enum! {
    /// How the job writes an output.
    pub enum OutputMode {
        ReadWriteMount => ("ReadWriteMount", "rw_mount"),
        Upload => ("Upload", "upload"),
        Direct => ("Direct", "direct"),
    }
}

string_enum! {
    /// Service tier the job is queued on.
    pub enum JobTier {
        Null => ("Null", "null"),
        Spot => ("Spot", "spot"),
        Basic => ("Basic", "basic"),
        Standard => ("Standard", "standard"),
        Premium => ("Premium", "premium"),
    }
}

/// Identity the job runs as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum JobIdentity {
    /// A token issued by the workspace.
    AmlToken,
    /// A system- or user-assigned managed identity.
    Managed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_id: Option<Uuid>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        object_id: Option<Uuid>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resource_id: Option<String>,
    },
    /// The identity of the submitting user.
    UserIdentity,
}

/// A declared job output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobOutput {
    #[serde(rename = "type", default)]
    pub output_type: OutputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<OutputMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_tier: Option<JobTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

/// Compute resources requested for the job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobResources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    /// Shared memory size, e.g. `"2g"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shm_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_args: Option<String>,
}

/// Audit information the service attaches to a submitted job.  Read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationContext {
    pub created_at: Option<String>,
    pub created_by: Option<String>,
    pub created_by_type: Option<String>,
    pub last_modified_at: Option<String>,
    pub last_modified_by: Option<String>,
    pub last_modified_by_type: Option<String>,
}

/// Job-level metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobMetadata {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub experiment_name: Option<String>,
    pub tags: BTreeMap<String, String>,
    pub properties: BTreeMap<String, String>,
    /// Compute target name or ARM id.
    pub compute: Option<String>,
    pub environment_id: Option<String>,
    pub environment_variables: BTreeMap<String, String>,
    pub services: BTreeMap<String, serde_json::Value>,
    pub outputs: BTreeMap<String, JobOutput>,
    pub resources: Option<JobResources>,
    pub identity: Option<JobIdentity>,
    pub queue_settings: Option<QueueSettings>,
    /// Set by the service; `None` for jobs built locally.
    pub id: Option<String>,
    /// Set by the service; `None` for jobs built locally.
    pub status: Option<String>,
    /// Set by the service; `None` for jobs built locally.
    pub creation_context: Option<CreationContext>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_document_shapes() {
        // Arrange
        let managed = r#"
type = "managed"
client_id = "6f1c2b7e-3d44-4a8e-9d2f-0a1b2c3d4e5f"
"#;

        // Act
        let identity: JobIdentity = toml::from_str(managed).expect("deserialize");
        let token: JobIdentity = toml::from_str("type = \"aml_token\"").expect("deserialize");

        // Assert
        assert!(matches!(
            identity,
            JobIdentity::Managed { client_id: Some(_), object_id: None, resource_id: None }
        ));
        assert_eq!(token, JobIdentity::AmlToken);
    }

    #[test]
    fn test_output_defaults_to_uri_folder() {
        let output: JobOutput = toml::from_str("path = \"azureml://datastores/out\"").unwrap();
        assert_eq!(output.output_type, OutputType::UriFolder);
        assert_eq!(output.mode, None);
    }

    #[test]
    fn test_output_mode_spellings() {
        assert_eq!("rw_mount".parse::<OutputMode>(), Ok(OutputMode::ReadWriteMount));
        assert_eq!(OutputMode::ReadWriteMount.as_wire(), "ReadWriteMount");
    }
}
