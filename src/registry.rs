use crate::annotations::{filter_annotations, has_annotations};
use crate::bytes::format_byte_count;
use crate::config::ConsoleConfig;
use crate::context::{
    ChainedClusterSource, ClusterContext, ClusterSource, ConsoleRoute, KubeconfigCluster,
    MemoryNamespaceStore, NamespaceContext, NamespaceStateFile, NamespaceStore,
};
use crate::error::{FilterError, Result};
use crate::image::simplify_image;
use crate::node::node_role_labels;
use crate::quantity::format_quantity;
use crate::timestamp::format_short_timestamp;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Filter {
    Quantity,
    Bytes,
    ShortTime,
    Image,
    Annotations,
    HasAnnotations,
    NodeRoles,
    Cluster,
    ClusterBase64,
    Namespace,
}

impl Filter {
    pub const ALL: [Self; 10] = [
        Self::Quantity,
        Self::Bytes,
        Self::ShortTime,
        Self::Image,
        Self::Annotations,
        Self::HasAnnotations,
        Self::NodeRoles,
        Self::Cluster,
        Self::ClusterBase64,
        Self::Namespace,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Quantity => "quantity",
            Self::Bytes => "bytes",
            Self::ShortTime => "short_time",
            Self::Image => "image",
            Self::Annotations => "annotations",
            Self::HasAnnotations => "has_annotations",
            Self::NodeRoles => "node_roles",
            Self::Cluster => "cluster",
            Self::ClusterBase64 => "cluster_base64",
            Self::Namespace => "namespace",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Quantity => "Ki/Mi/Gi quantity rendered at a readable scale",
            Self::Bytes => "raw byte count as B..PB",
            Self::ShortTime => "listing timestamp as YYYY-MM-DD HH:MM",
            Self::Image => "image reference as name:tag",
            Self::Annotations => "annotations without system keys",
            Self::HasAnnotations => "whether any annotation is set",
            Self::NodeRoles => "localized node role labels",
            Self::Cluster => "active cluster",
            Self::ClusterBase64 => "active cluster, URL-safe Base64",
            Self::Namespace => "active namespace",
        }
    }

    pub fn from_name(token: &str) -> Option<Self> {
        match token
            .trim()
            .to_ascii_lowercase()
            .replace('-', "_")
            .as_str()
        {
            "quantity" | "format_quantity" | "memory" => Some(Self::Quantity),
            "bytes" | "byte" | "format_bytes" | "size" => Some(Self::Bytes),
            "short_time" | "time" | "timestamp" | "format_time" => Some(Self::ShortTime),
            "image" | "image_name" | "simplify_image" => Some(Self::Image),
            "annotations" | "filter_annotations" => Some(Self::Annotations),
            "has_annotations" | "annotations_present" => Some(Self::HasAnnotations),
            "node_roles" | "roles" | "node_role" | "node_labels" => Some(Self::NodeRoles),
            "cluster" | "current_cluster" => Some(Self::Cluster),
            "cluster_base64" | "cluster_b64" | "encoded_cluster" => Some(Self::ClusterBase64),
            "namespace" | "ns" | "current_namespace" => Some(Self::Namespace),
            _ => None,
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ObjectView {
    #[serde(default)]
    metadata: ObjectMeta,
}

/// Named filters evaluated by the page renderer.
pub struct FilterRegistry {
    cluster: Box<dyn ClusterSource>,
    namespaces: Box<dyn NamespaceStore>,
}

impl FilterRegistry {
    pub fn new(
        cluster: impl ClusterSource + 'static,
        namespaces: impl NamespaceStore + 'static,
    ) -> Self {
        Self {
            cluster: Box::new(cluster),
            namespaces: Box::new(namespaces),
        }
    }

    /// Registry with no router and an empty namespace store.
    pub fn detached() -> Self {
        Self::new(ChainedClusterSource::new(), MemoryNamespaceStore::new())
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        let mut cluster = ChainedClusterSource::new();
        if let Some(route) = &config.route {
            cluster = cluster.with(ConsoleRoute::new(route.clone()));
        }
        if config.use_kubeconfig {
            cluster = cluster.with(KubeconfigCluster::discover());
        }

        match &config.state_file {
            Some(path) => Self::new(cluster, NamespaceStateFile::new(path.clone())),
            None => Self::new(cluster, MemoryNamespaceStore::new()),
        }
    }

    pub fn cluster_context(&self) -> ClusterContext<'_> {
        ClusterContext::new(self.cluster.as_ref())
    }

    pub fn namespace_context(&self) -> NamespaceContext<'_> {
        NamespaceContext::new(self.cluster.as_ref(), self.namespaces.as_ref())
    }

    pub fn apply(&self, name: &str, value: &Value, fallback: Option<&str>) -> Result<Value> {
        let filter =
            Filter::from_name(name).ok_or_else(|| FilterError::UnknownFilter(name.to_string()))?;
        self.apply_filter(filter, value, fallback)
    }

    pub fn apply_filter(&self, filter: Filter, value: &Value, fallback: Option<&str>) -> Result<Value> {
        let output = match filter {
            Filter::Quantity => match value {
                Value::String(text) => Value::String(format_quantity(text)),
                other => Value::String(value_text(other)),
            },
            Filter::Bytes => match value.as_f64() {
                Some(number) => Value::String(format_byte_count(number)),
                None => Value::String(value_text(value)),
            },
            Filter::ShortTime => match value {
                Value::String(text) => Value::String(format_short_timestamp(text)?),
                other => Value::String(value_text(other)),
            },
            Filter::Image => match value {
                Value::Null => Value::String(String::new()),
                other => Value::String(simplify_image(&value_text(other))),
            },
            Filter::Annotations => {
                let annotations = annotation_map(filter, value)?.unwrap_or_default();
                let filtered = filter_annotations(&annotations)
                    .into_iter()
                    .map(|(key, text)| (key, Value::String(text)))
                    .collect::<serde_json::Map<_, _>>();
                Value::Object(filtered)
            }
            Filter::HasAnnotations => {
                Value::Bool(has_annotations(annotation_map(filter, value)?.as_ref()))
            }
            Filter::NodeRoles => {
                let view = object_view(filter, value)?;
                Value::String(node_role_labels(&view.metadata))
            }
            Filter::Cluster => Value::String(
                self.cluster_context()
                    .resolve(fallback.or_else(|| value.as_str())),
            ),
            Filter::ClusterBase64 => Value::String(self.cluster_context().encoded()),
            Filter::Namespace => Value::String(
                self.namespace_context()
                    .resolve(fallback.or_else(|| value.as_str())),
            ),
        };
        Ok(output)
    }
}

/// Text form of a renderer value: strings bare, everything else as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn annotation_map(filter: Filter, value: &Value) -> Result<Option<BTreeMap<String, String>>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(_) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|error| FilterError::invalid_input(filter.name(), error.to_string())),
        other => Err(FilterError::invalid_input(
            filter.name(),
            format!("expected an annotation map, got {other}"),
        )),
    }
}

fn object_view(filter: Filter, value: &Value) -> Result<ObjectView> {
    match value {
        Value::Null => Ok(ObjectView::default()),
        Value::Object(_) => serde_json::from_value(value.clone())
            .map_err(|error| FilterError::invalid_input(filter.name(), error.to_string())),
        other => Err(FilterError::invalid_input(
            filter.name(),
            format!("expected an object with metadata, got {other}"),
        )),
    }
}
