use crate::i18n::{self, Locale};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

pub const NODE_ROLE_PREFIX: &str = "node-role.kubernetes.io/";

/// Role suffixes of every `node-role.kubernetes.io/<role>` label, in key order.
pub fn node_roles(metadata: &ObjectMeta) -> Vec<&str> {
    let Some(labels) = metadata.labels.as_ref() else {
        return Vec::new();
    };

    labels
        .keys()
        .filter_map(|key| key.strip_prefix(NODE_ROLE_PREFIX))
        .filter(|role| !role.is_empty())
        .collect()
}

/// Comma separated role names in the active locale.
pub fn node_role_labels(metadata: &ObjectMeta) -> String {
    node_role_labels_in(metadata, i18n::current())
}

pub fn node_role_labels_in(metadata: &ObjectMeta, locale: Locale) -> String {
    node_roles(metadata)
        .into_iter()
        .map(|role| i18n::node_role_name(role, locale).unwrap_or(role))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{node_role_labels, node_role_labels_in, node_roles};
    use crate::i18n::{self, LOCALE_TEST_LOCK, Locale};
    use k8s_openapi::api::core::v1::Node;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    fn metadata(labels: &[(&str, &str)]) -> ObjectMeta {
        ObjectMeta {
            labels: Some(
                labels
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect::<BTreeMap<_, _>>(),
            ),
            ..ObjectMeta::default()
        }
    }

    #[test]
    fn master_role_is_localized() {
        let meta = metadata(&[("node-role.kubernetes.io/master", "")]);
        assert_eq!(node_role_labels_in(&meta, Locale::ZhCn), "主节点");
        assert_eq!(node_role_labels_in(&meta, Locale::EnUs), "Master");
    }

    #[test]
    fn unknown_role_keeps_raw_suffix() {
        let meta = metadata(&[("node-role.kubernetes.io/gpu", "true")]);
        assert_eq!(node_role_labels_in(&meta, Locale::ZhCn), "gpu");
    }

    #[test]
    fn roles_are_joined_in_label_order() {
        let meta = metadata(&[
            ("kubernetes.io/hostname", "node-1"),
            ("node-role.kubernetes.io/worker", ""),
            ("node-role.kubernetes.io/control-plane", ""),
            ("node-role.kubernetes.io/edge", ""),
        ]);
        assert_eq!(node_roles(&meta), vec!["control-plane", "edge", "worker"]);
        assert_eq!(
            node_role_labels_in(&meta, Locale::EnUs),
            "Control Plane, edge, Worker"
        );
    }

    #[test]
    fn nodes_without_role_labels_render_empty() {
        assert_eq!(node_role_labels_in(&ObjectMeta::default(), Locale::ZhCn), "");
        let meta = metadata(&[("node-role.kubernetes.io/", ""), ("zone", "a")]);
        assert_eq!(node_role_labels_in(&meta, Locale::ZhCn), "");
    }

    #[test]
    fn default_labels_follow_active_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let node = Node {
            metadata: metadata(&[("node-role.kubernetes.io/storage", "")]),
            ..Node::default()
        };
        i18n::init(Locale::EnUs);
        assert_eq!(node_role_labels(&node.metadata), "Storage");
        i18n::reset();
        assert_eq!(node_role_labels(&node.metadata), "存储节点");
    }
}
