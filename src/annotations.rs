use std::collections::BTreeMap;

/// Annotation keys written by controllers or the console itself. They are
/// hidden from annotation editors.
pub const HIDDEN_ANNOTATIONS: [&str; 11] = [
    "cpu.request",
    "cpu.limit",
    "memory.request",
    "memory.limit",
    "kubectl.kubernetes.io/last-applied-configuration",
    "deployment.kubernetes.io/revision",
    "kubernetes.io/created-by",
    "kubesphere.io/creator",
    "kubesphere.io/alias-name",
    "kubesphere.io/description",
    "kubesphere.io/restartedAt",
];

pub fn is_hidden_annotation(key: &str) -> bool {
    HIDDEN_ANNOTATIONS.contains(&key)
}

pub fn filter_annotations(annotations: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    annotations
        .iter()
        .filter(|(key, _)| !is_hidden_annotation(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// True when the raw map has any key at all, hidden ones included.
pub fn has_annotations(annotations: Option<&BTreeMap<String, String>>) -> bool {
    annotations.is_some_and(|annotations| !annotations.is_empty())
}

/// True when something remains after hiding system annotations.
pub fn has_visible_annotations(annotations: Option<&BTreeMap<String, String>>) -> bool {
    annotations.is_some_and(|annotations| annotations.keys().any(|key| !is_hidden_annotation(key)))
}

#[cfg(test)]
mod tests {
    use super::{filter_annotations, has_annotations, has_visible_annotations};
    use std::collections::BTreeMap;

    fn annotations(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn hidden_keys_are_removed() {
        let input = annotations(&[("cpu.request", "1"), ("foo", "bar")]);
        assert_eq!(filter_annotations(&input), annotations(&[("foo", "bar")]));
    }

    #[test]
    fn user_keys_keep_their_order() {
        let input = annotations(&[
            ("a.example.com/one", "1"),
            ("kubectl.kubernetes.io/last-applied-configuration", "{}"),
            ("b.example.com/two", "2"),
            ("memory.limit", "1Gi"),
        ]);
        let keys = filter_annotations(&input).into_keys().collect::<Vec<_>>();
        assert_eq!(keys, vec!["a.example.com/one", "b.example.com/two"]);
    }

    #[test]
    fn empty_or_missing_map_has_no_annotations() {
        assert!(!has_annotations(Some(&BTreeMap::new())));
        assert!(!has_annotations(None));
    }

    #[test]
    fn presence_is_checked_before_hiding() {
        // A map holding only hidden keys still reports annotations.
        let only_hidden = annotations(&[("cpu.limit", "2"), ("memory.request", "1Gi")]);
        assert!(has_annotations(Some(&only_hidden)));
        assert!(filter_annotations(&only_hidden).is_empty());
        assert!(!has_visible_annotations(Some(&only_hidden)));
    }

    #[test]
    fn visible_presence_sees_user_keys() {
        let input = annotations(&[("cpu.limit", "2"), ("team", "core")]);
        assert!(has_visible_annotations(Some(&input)));
        assert!(!has_visible_annotations(None));
    }
}
