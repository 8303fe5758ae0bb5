//! Form-encoded payloads for the `/colly` write endpoints.
//!
//! The backend takes its mutations as `application/x-www-form-urlencoded`
//! bodies rather than JSON, so the payload structs here build their own
//! bodies instead of deriving `Serialize`.

use chrono::NaiveDate;

use crate::{Cluster, Environment, EnvironmentStatus, EnvironmentType};

/// The editable subset of an environment, posted to
/// `/colly/environments/{id}`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateEnvironment {
    pub name: String,
    pub owner: Option<String>,
    pub team: Option<String>,
    pub description: Option<String>,
    pub status: EnvironmentStatus,
    pub env_type: EnvironmentType,
    pub labels: Vec<String>,
    pub expiration_date: Option<NaiveDate>,
}

impl UpdateEnvironment {
    pub fn from_environment(env: &Environment) -> Self {
        Self {
            name: env.name.clone(),
            owner: env.owner.clone(),
            team: env.team.clone(),
            description: env.description.clone(),
            status: env.status,
            env_type: env.env_type,
            labels: env.labels.clone(),
            expiration_date: env.expiration_date,
        }
    }

    /// Optional text fields are sent only when non-empty; `status`,
    /// `type` and `name` are always sent; `expirationDate` is an ISO
    /// calendar date or the empty string; `labels` repeats one field
    /// per entry, order preserved.
    pub fn form_body(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        push_if_present(&mut pairs, "owner", self.owner.as_deref());
        push_if_present(&mut pairs, "team", self.team.as_deref());
        push_if_present(&mut pairs, "description", self.description.as_deref());
        pairs.push(("status", self.status.to_string()));
        pairs.push(("type", self.env_type.to_string()));
        pairs.push(("name", self.name.clone()));
        pairs.push((
            "expirationDate",
            self.expiration_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ));
        for label in &self.labels {
            pairs.push(("labels", label.clone()));
        }
        encode_pairs(&pairs)
    }
}

/// The editable subset of a cluster, posted to `/colly/clusters/{name}`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCluster {
    pub name: String,
    pub description: Option<String>,
}

impl UpdateCluster {
    pub fn from_cluster(cluster: &Cluster) -> Self {
        Self {
            name: cluster.name.clone(),
            description: cluster.description.clone(),
        }
    }

    pub fn form_body(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        push_if_present(&mut pairs, "description", self.description.as_deref());
        pairs.push(("name", self.name.clone()));
        encode_pairs(&pairs)
    }
}

/// Percent-encode a value for use as a single path segment, e.g. the
/// cluster name in `/colly/clusters/{name}`.
pub fn encode_path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn push_if_present<'a>(pairs: &mut Vec<(&'a str, String)>, key: &'a str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            pairs.push((key, value.to_string()));
        }
    }
}

fn encode_pairs(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_update() -> UpdateEnvironment {
        UpdateEnvironment {
            name: "env-1".to_string(),
            owner: None,
            team: None,
            description: None,
            status: EnvironmentStatus::Free,
            env_type: EnvironmentType::Environment,
            labels: vec![],
            expiration_date: None,
        }
    }

    #[test]
    fn minimal_environment_body() {
        let body = base_update().form_body();
        assert_eq!(
            body,
            "status=FREE&type=ENVIRONMENT&name=env-1&expirationDate="
        );
    }

    #[test]
    fn optional_fields_sent_only_when_non_empty() {
        let mut update = base_update();
        update.owner = Some("jdoe".to_string());
        update.team = Some(String::new());
        update.description = Some("primary slot".to_string());
        let body = update.form_body();
        assert!(body.starts_with("owner=jdoe&description=primary%20slot&status="));
        assert!(!body.contains("team="));
    }

    #[test]
    fn labels_repeat_in_order() {
        let mut update = base_update();
        update.labels = vec!["a".to_string(), "b".to_string()];
        let body = update.form_body();
        let labels: Vec<&str> = body
            .split('&')
            .filter_map(|pair| pair.strip_prefix("labels="))
            .collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn expiration_date_formats_as_iso_calendar_date() {
        let mut update = base_update();
        update.expiration_date = NaiveDate::from_ymd_opt(2026, 9, 1);
        assert!(update.form_body().contains("expirationDate=2026-09-01"));

        update.expiration_date = None;
        assert!(update.form_body().ends_with("expirationDate="));
    }

    #[test]
    fn from_environment_carries_editable_fields() {
        let raw = r#"{
            "id": 3,
            "name": "env-3",
            "owner": "ops",
            "status": "RESERVED",
            "type": "DESIGN_TIME",
            "labels": ["x"],
            "expirationDate": "2026-12-31"
        }"#;
        let env: Environment = serde_json::from_str(raw).unwrap();
        let update = UpdateEnvironment::from_environment(&env);
        assert_eq!(update.name, "env-3");
        assert_eq!(update.owner.as_deref(), Some("ops"));
        assert_eq!(update.status, EnvironmentStatus::Reserved);
        assert_eq!(update.env_type, EnvironmentType::DesignTime);
        assert_eq!(update.labels, vec!["x"]);
        assert_eq!(update.expiration_date, NaiveDate::from_ymd_opt(2026, 12, 31));
    }

    #[test]
    fn cluster_body_and_path_segment() {
        let update = UpdateCluster {
            name: "cluster a".to_string(),
            description: Some("west zone".to_string()),
        };
        assert_eq!(update.form_body(), "description=west%20zone&name=cluster%20a");

        let update = UpdateCluster {
            name: "cluster-b".to_string(),
            description: None,
        };
        assert_eq!(update.form_body(), "name=cluster-b");

        assert_eq!(encode_path_segment("cluster a/b"), "cluster%20a%2Fb");
    }
}
