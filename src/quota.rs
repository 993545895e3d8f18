//! Resource quota records and their rows

use std::collections::BTreeMap;
use std::io::Read;

use anyhow::Context as _;

use crate::fmt::format_resource_value;
use crate::table::ResourceRow;
use crate::usage::Usage;

/// Request resources shown, in display order
const REQUEST_RESOURCES: [&str; 3] = ["requests.cpu", "requests.memory", "requests.storage"];

/// Limit resources shown after the request ones
const LIMIT_RESOURCES: [&str; 2] = ["limits.cpu", "limits.memory"];

/// Resource name to quantity string
pub(crate) type ResourceList = BTreeMap<String, String>;

/// Object metadata, only what is displayed or filtered on
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(crate) struct ObjectMeta {
    /// Object name
    pub(crate) name: String,
    /// Namespace the object lives in
    pub(crate) namespace: Option<String>,
}

/// Quota limits
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(crate) struct QuotaSpec {
    /// Hard limit per resource
    pub(crate) hard: ResourceList,
}

/// Quota observed state
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(crate) struct QuotaStatus {
    /// Current usage per resource
    pub(crate) used: ResourceList,
}

/// A resource quota object
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(crate) struct ResourceQuota {
    /// Metadata
    pub(crate) metadata: ObjectMeta,
    /// Limits
    pub(crate) spec: QuotaSpec,
    /// Observed state
    pub(crate) status: QuotaStatus,
}

/// Read quota objects from a JSON document, either a list or a single object
pub(crate) fn read_quotas<R: Read>(reader: R, source: &str) -> anyhow::Result<Vec<ResourceQuota>> {
    let mut doc: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse JSON from {}", source))?;
    let quotas = if let Some(items) = doc.get_mut("items") {
        serde_json::from_value(items.take())
    } else {
        serde_json::from_value(doc).map(|quota| vec![quota])
    };
    quotas.with_context(|| format!("Invalid resource quotas in {}", source))
}

/// Used and hard values of a resource, if both are set
fn resource_values<'a>(quota: &'a ResourceQuota, name: &str) -> Option<(&'a str, &'a str)> {
    let used = quota.status.used.get(name)?;
    let hard = quota.spec.hard.get(name)?;
    Some((used.as_str(), hard.as_str()))
}

impl ResourceQuota {
    /// Build table rows, in fixed resource order
    pub(crate) fn rows(&self) -> Vec<ResourceRow> {
        REQUEST_RESOURCES
            .iter()
            .chain(LIMIT_RESOURCES.iter())
            .filter_map(|&name| {
                let Some((used, hard)) = resource_values(self, name) else {
                    log::debug!(
                        "Quota {:?} lacks used or hard value for {}",
                        self.metadata.name,
                        name
                    );
                    return None;
                };
                Some(ResourceRow {
                    name: name.to_owned(),
                    used: format_resource_value(name, used),
                    hard: format_resource_value(name, hard),
                    usage: Usage::compute(used, hard),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource_list(entries: &[(&str, &str)]) -> ResourceList {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn quota(used: &[(&str, &str)], hard: &[(&str, &str)]) -> ResourceQuota {
        ResourceQuota {
            metadata: ObjectMeta {
                name: "compute".to_owned(),
                namespace: Some("default".to_owned()),
            },
            spec: QuotaSpec {
                hard: resource_list(hard),
            },
            status: QuotaStatus {
                used: resource_list(used),
            },
        }
    }

    #[test]
    fn test_rows() {
        let q = quota(
            &[
                ("limits.memory", "1Gi"),
                ("requests.cpu", "500m"),
                ("requests.memory", "1073741824"),
                ("limits.cpu", "0"),
            ],
            &[
                ("limits.memory", "4Gi"),
                ("requests.cpu", "1"),
                ("requests.memory", "2147483648"),
                ("limits.cpu", "0"),
            ],
        );
        assert_eq!(
            q.rows(),
            [
                ResourceRow {
                    name: "requests.cpu".to_owned(),
                    used: "500m".to_owned(),
                    hard: "1".to_owned(),
                    usage: Usage::Percent(50.0),
                },
                ResourceRow {
                    name: "requests.memory".to_owned(),
                    used: "1Gi".to_owned(),
                    hard: "2Gi".to_owned(),
                    usage: Usage::Percent(50.0),
                },
                ResourceRow {
                    name: "limits.cpu".to_owned(),
                    used: "0".to_owned(),
                    hard: "0".to_owned(),
                    usage: Usage::NotApplicable,
                },
                ResourceRow {
                    name: "limits.memory".to_owned(),
                    used: "1Gi".to_owned(),
                    hard: "4Gi".to_owned(),
                    usage: Usage::Percent(25.0),
                },
            ]
        );
    }

    #[test]
    fn test_rows_missing_pair() {
        let q = quota(
            &[("requests.storage", "10Gi"), ("pods", "3")],
            &[("limits.cpu", "2"), ("pods", "10")],
        );
        assert!(q.rows().is_empty());
    }

    #[test]
    fn test_read_quotas_list() {
        let json = r#"{
            "apiVersion": "v1",
            "kind": "List",
            "items": [
                {
                    "metadata": {"name": "compute", "namespace": "team-a"},
                    "spec": {"hard": {"requests.cpu": "4", "requests.memory": "8Gi"}},
                    "status": {
                        "hard": {"requests.cpu": "4", "requests.memory": "8Gi"},
                        "used": {"requests.cpu": "1500m", "requests.memory": "2Gi"}
                    }
                },
                {
                    "metadata": {"name": "storage"},
                    "spec": {"hard": {"requests.storage": "100Gi"}}
                }
            ]
        }"#;
        let quotas = read_quotas(json.as_bytes(), "test").unwrap();
        assert_eq!(quotas.len(), 2);
        assert_eq!(quotas[0].metadata.name, "compute");
        assert_eq!(quotas[0].metadata.namespace.as_deref(), Some("team-a"));
        assert_eq!(quotas[0].status.used["requests.cpu"], "1500m");
        assert_eq!(quotas[0].rows().len(), 2);
        assert_eq!(quotas[1].metadata.namespace, None);
        assert!(quotas[1].status.used.is_empty());
        assert!(quotas[1].rows().is_empty());
    }

    #[test]
    fn test_read_quotas_single() {
        let json = r#"{"kind": "ResourceQuota", "metadata": {"name": "mem"},
            "spec": {"hard": {"limits.memory": "1Gi"}},
            "status": {"used": {"limits.memory": "512Mi"}}}"#;
        let quotas = read_quotas(json.as_bytes(), "test").unwrap();
        assert_eq!(quotas.len(), 1);
        assert_eq!(quotas[0].rows()[0].usage.to_string(), "50.0%");
    }

    #[test]
    fn test_read_quotas_invalid() {
        assert!(read_quotas("not json".as_bytes(), "test").is_err());
        assert!(read_quotas(r#"{"items": 3}"#.as_bytes(), "test").is_err());
    }
}
