pub mod form;

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
}

/// Reference to the cluster an environment is bound to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRef {
    pub name: String,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvironmentStatus {
    Free,
    InUse,
    Migrating,
    Reserved,
}

impl EnvironmentStatus {
    pub const ALL: [EnvironmentStatus; 4] = [
        EnvironmentStatus::Free,
        EnvironmentStatus::InUse,
        EnvironmentStatus::Migrating,
        EnvironmentStatus::Reserved,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EnvironmentStatus::Free => "Free",
            EnvironmentStatus::InUse => "In Use",
            EnvironmentStatus::Migrating => "Migrating",
            EnvironmentStatus::Reserved => "Reserved",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvironmentType {
    Environment,
    CseToolset,
    DesignTime,
    AppDeployer,
    Infrastructure,
    Undefined,
}

impl EnvironmentType {
    pub const ALL: [EnvironmentType; 6] = [
        EnvironmentType::Environment,
        EnvironmentType::CseToolset,
        EnvironmentType::DesignTime,
        EnvironmentType::AppDeployer,
        EnvironmentType::Infrastructure,
        EnvironmentType::Undefined,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EnvironmentType::Environment => "Environment",
            EnvironmentType::CseToolset => "CSE Toolset",
            EnvironmentType::DesignTime => "Design Time",
            EnvironmentType::AppDeployer => "App Deployer",
            EnvironmentType::Infrastructure => "Infrastructure",
            EnvironmentType::Undefined => "Undefined",
        }
    }
}

/// A logical deployment slot bound to a cluster and zero or more
/// namespaces. `name` is immutable in the console; the rest of the
/// ownership metadata is edited through the environment dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
    #[serde(default)]
    pub cluster: Option<ClusterRef>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    pub status: EnvironmentStatus,
    #[serde(rename = "type")]
    pub env_type: EnvironmentType,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deployment_version: Option<String>,
    /// Metric values keyed by metric name. The backend serializes the
    /// values as strings; which keys get rendered is decided by the
    /// metadata's `monitoring_columns`, not by the rows.
    #[serde(default)]
    pub monitoring_data: HashMap<String, String>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub clean_installation_date: Option<DateTime<FixedOffset>>,
}

/// A named infrastructure target hosting environments. Keyed by name,
/// there is no separate numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub synced: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl UserInfo {
    /// Gates every mutation affordance in the console. This is a UX
    /// convenience only; the backend authorizes writes independently.
    pub fn can_edit(&self) -> bool {
        self.authenticated && self.is_admin
    }

    pub fn displayed_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.username.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMetadata {
    #[serde(default)]
    pub monitoring_columns: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_wire_names_round_trip() {
        for status in EnvironmentStatus::ALL {
            let wire = status.to_string();
            assert_eq!(EnvironmentStatus::from_str(&wire).unwrap(), status);
        }
        assert_eq!(EnvironmentStatus::InUse.to_string(), "IN_USE");
        assert_eq!(EnvironmentStatus::Free.to_string(), "FREE");
        assert!(EnvironmentStatus::from_str("DECOMMISSIONED").is_err());
    }

    #[test]
    fn type_wire_names_and_labels() {
        assert_eq!(EnvironmentType::CseToolset.to_string(), "CSE_TOOLSET");
        assert_eq!(EnvironmentType::AppDeployer.to_string(), "APP_DEPLOYER");
        assert_eq!(EnvironmentType::CseToolset.label(), "CSE Toolset");
        assert_eq!(EnvironmentStatus::InUse.label(), "In Use");
        assert!(EnvironmentType::from_str("VIRTUAL").is_err());
    }

    #[test]
    fn environment_deserializes_from_backend_json() {
        let raw = r#"{
            "id": 7,
            "name": "env-1",
            "namespaces": [{"name": "env-1-core"}, {"name": "env-1-bss"}],
            "cluster": {"name": "cluster-a"},
            "owner": "jdoe",
            "team": "platform",
            "status": "IN_USE",
            "type": "ENVIRONMENT",
            "labels": ["blue", "shared"],
            "description": "primary slot",
            "deploymentVersion": "2024.3-1",
            "monitoringData": {"cpu": "12", "pods": "34"},
            "expirationDate": "2026-09-01",
            "cleanInstallationDate": "2026-01-02T03:04:05Z"
        }"#;
        let env: Environment = serde_json::from_str(raw).unwrap();
        assert_eq!(env.id, 7);
        assert_eq!(env.namespaces.len(), 2);
        assert_eq!(env.cluster.as_ref().unwrap().name, "cluster-a");
        assert_eq!(env.status, EnvironmentStatus::InUse);
        assert_eq!(env.env_type, EnvironmentType::Environment);
        assert_eq!(env.monitoring_data["pods"], "34");
        assert_eq!(
            env.expiration_date,
            Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
        );
        assert!(env.clean_installation_date.is_some());
    }

    #[test]
    fn environment_tolerates_sparse_json() {
        let raw = r#"{"id": 1, "name": "bare", "status": "FREE", "type": "UNDEFINED"}"#;
        let env: Environment = serde_json::from_str(raw).unwrap();
        assert!(env.namespaces.is_empty());
        assert!(env.cluster.is_none());
        assert!(env.owner.is_none());
        assert!(env.labels.is_empty());
        assert!(env.monitoring_data.is_empty());
        assert!(env.expiration_date.is_none());
    }

    #[test]
    fn environment_rejects_unknown_status() {
        let raw = r#"{"id": 1, "name": "bad", "status": "PARKED", "type": "UNDEFINED"}"#;
        assert!(serde_json::from_str::<Environment>(raw).is_err());
    }

    #[test]
    fn user_info_defaults_and_gate() {
        let anonymous: UserInfo = serde_json::from_str(r#"{"authenticated": false}"#).unwrap();
        assert!(!anonymous.can_edit());
        assert_eq!(anonymous.displayed_name(), None);

        let viewer: UserInfo =
            serde_json::from_str(r#"{"authenticated": true, "username": "jdoe"}"#).unwrap();
        assert!(!viewer.can_edit());
        assert_eq!(viewer.displayed_name(), Some("jdoe"));

        let admin: UserInfo = serde_json::from_str(
            r#"{"authenticated": true, "username": "root", "isAdmin": true, "name": "Root"}"#,
        )
        .unwrap();
        assert!(admin.can_edit());
        assert_eq!(admin.displayed_name(), Some("Root"));
    }

    #[test]
    fn cluster_and_metadata_parse() {
        let cluster: Cluster =
            serde_json::from_str(r#"{"name": "cluster-a", "synced": true}"#).unwrap();
        assert_eq!(cluster.name, "cluster-a");
        assert!(cluster.synced);
        assert!(cluster.description.is_none());

        let metadata: AppMetadata =
            serde_json::from_str(r#"{"monitoringColumns": ["cpu", "pods"]}"#).unwrap();
        assert_eq!(metadata.monitoring_columns, vec!["cpu", "pods"]);
        assert!(AppMetadata::default().monitoring_columns.is_empty());
    }
}
