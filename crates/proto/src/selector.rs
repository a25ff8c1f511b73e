//! JSON form of [`v1::ResourceSelector`].
//!
//! The `match` oneof is flattened into sibling `matchName` / `matchLabels`
//! members, which is how selectors appear in function input.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::v1::{resource_selector::Match, MatchLabels, ResourceSelector};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonResourceSelector {
    #[serde(default)]
    api_version: String,
    #[serde(default)]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    match_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    match_labels: Option<JsonMatchLabels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonMatchLabels {
    #[serde(default)]
    labels: HashMap<String, String>,
}

impl ResourceSelector {
    /// Select the single resource named `name`.
    pub fn by_name(api_version: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
            r#match: Some(Match::MatchName(name.into())),
            namespace: None,
        }
    }

    /// Select every resource carrying all of `labels`.
    pub fn by_labels<I, K, V>(api_version: impl Into<String>, kind: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let labels = labels.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
            r#match: Some(Match::MatchLabels(MatchLabels { labels })),
            namespace: None,
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

impl Serialize for ResourceSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (match_name, match_labels) = match &self.r#match {
            Some(Match::MatchName(n)) => (Some(n.clone()), None),
            Some(Match::MatchLabels(m)) => (None, Some(JsonMatchLabels { labels: m.labels.clone() })),
            None => (None, None),
        };
        JsonResourceSelector {
            api_version: self.api_version.clone(),
            kind: self.kind.clone(),
            match_name,
            match_labels,
            namespace: self.namespace.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResourceSelector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tmp = JsonResourceSelector::deserialize(deserializer)?;
        // matchName wins when both are present.
        let r#match = match (tmp.match_name, tmp.match_labels) {
            (Some(name), _) => Some(Match::MatchName(name)),
            (None, Some(m)) => Some(Match::MatchLabels(MatchLabels { labels: m.labels })),
            (None, None) => None,
        };
        Ok(Self { api_version: tmp.api_version, kind: tmp.kind, r#match, namespace: tmp.namespace })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn match_name_serializes_flat() {
        let sel = ResourceSelector::by_name("example.org/v1", "Widget", "w1").in_namespace("demo");
        assert_eq!(
            serde_json::to_value(&sel).unwrap(),
            json!({"apiVersion": "example.org/v1", "kind": "Widget", "matchName": "w1", "namespace": "demo"})
        );
    }

    #[test]
    fn match_labels_parse_into_oneof() {
        let sel: ResourceSelector = serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "matchLabels": {"labels": {"team": "infra"}},
        }))
        .unwrap();
        match sel.r#match {
            Some(Match::MatchLabels(m)) => assert_eq!(m.labels.get("team").map(String::as_str), Some("infra")),
            other => panic!("unexpected match: {other:?}"),
        }
        assert_eq!(sel.namespace, None);
    }

    #[test]
    fn no_match_member_means_no_match() {
        let sel: ResourceSelector = serde_json::from_value(json!({"apiVersion": "v1", "kind": "Secret"})).unwrap();
        assert!(sel.r#match.is_none());
        let back = serde_json::to_value(&sel).unwrap();
        assert_eq!(back, json!({"apiVersion": "v1", "kind": "Secret"}));
    }
}
