use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use kube::config::Kubeconfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_NAMESPACE: &str = "default";

/// Where the console currently points, usually the router.
pub trait ClusterSource {
    fn current_cluster(&self) -> Result<Option<String>>;
}

/// Persisted per-cluster namespace selection.
pub trait NamespaceStore {
    fn selected_namespace(&self, cluster: &str) -> Result<Option<String>>;
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn primary_cluster(source: &dyn ClusterSource) -> Option<String> {
    match source.current_cluster() {
        Ok(cluster) => cluster.as_deref().and_then(non_empty),
        Err(error) => {
            debug!("cluster source unavailable: {error:#}");
            None
        }
    }
}

#[derive(Clone, Copy)]
pub struct ClusterContext<'a> {
    source: &'a dyn ClusterSource,
}

impl<'a> ClusterContext<'a> {
    pub fn new(source: &'a dyn ClusterSource) -> Self {
        Self { source }
    }

    /// The trimmed cluster reported by the source, if any.
    pub fn primary(&self) -> Option<String> {
        primary_cluster(self.source)
    }

    /// Source value, then the trimmed fallback, then an empty string.
    pub fn resolve(&self, fallback: Option<&str>) -> String {
        self.primary()
            .or_else(|| fallback.and_then(non_empty))
            .unwrap_or_default()
    }

    /// URL-safe Base64 of the source value. No fallback applies.
    pub fn encoded(&self) -> String {
        self.primary()
            .map(|cluster| URL_SAFE_NO_PAD.encode(cluster))
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy)]
pub struct NamespaceContext<'a> {
    cluster: &'a dyn ClusterSource,
    store: &'a dyn NamespaceStore,
}

impl<'a> NamespaceContext<'a> {
    pub fn new(cluster: &'a dyn ClusterSource, store: &'a dyn NamespaceStore) -> Self {
        Self { cluster, store }
    }

    /// The namespace stored for the current cluster, if any.
    pub fn primary(&self) -> Option<String> {
        let cluster = primary_cluster(self.cluster)?;
        match self.store.selected_namespace(&cluster) {
            Ok(namespace) => namespace.as_deref().and_then(non_empty),
            Err(error) => {
                debug!("namespace store unavailable for cluster {cluster}: {error:#}");
                None
            }
        }
    }

    /// Stored value, then the trimmed fallback, then `default`.
    pub fn resolve(&self, fallback: Option<&str>) -> String {
        self.primary()
            .or_else(|| fallback.and_then(non_empty))
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
    }
}

/// A console location such as `https://host/clusters/prod/pods?ns=x`.
///
/// A `cluster` query parameter wins over a `/clusters/<name>` path segment.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ConsoleRoute {
    url: String,
}

impl ConsoleRoute {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn query_param(&self, name: &str) -> Result<Option<String>> {
        let without_fragment = self.url.split('#').next().unwrap_or_default();
        let Some((_, query)) = without_fragment.split_once('?') else {
            return Ok(None);
        };

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = urlencoding::decode(key)
                .with_context(|| format!("invalid query key in route {}", self.url))?;
            if key == name {
                let value = urlencoding::decode(value)
                    .with_context(|| format!("invalid `{name}` parameter in route {}", self.url))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    pub fn path_segments(&self) -> Vec<&str> {
        let without_query = self
            .url
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = match without_query.split_once("://") {
            Some((_, rest)) => rest.find('/').map(|index| &rest[index..]).unwrap_or(""),
            None => without_query,
        };
        path.split('/').filter(|segment| !segment.is_empty()).collect()
    }

    fn path_cluster(&self) -> Result<Option<String>> {
        let segments = self.path_segments();
        let Some(position) = segments.iter().position(|segment| *segment == "clusters") else {
            return Ok(None);
        };
        let Some(raw) = segments.get(position + 1) else {
            return Ok(None);
        };
        let cluster = urlencoding::decode(raw)
            .with_context(|| format!("invalid cluster segment in route {}", self.url))?;
        Ok(Some(cluster.into_owned()))
    }
}

impl ClusterSource for ConsoleRoute {
    fn current_cluster(&self) -> Result<Option<String>> {
        if let Some(cluster) = self.query_param("cluster")?
            && !cluster.trim().is_empty()
        {
            return Ok(Some(cluster));
        }
        self.path_cluster()
    }
}

/// Cluster of the kubeconfig current-context.
#[derive(Debug, Clone, Default)]
pub struct KubeconfigCluster {
    kubeconfig: Option<Kubeconfig>,
}

impl KubeconfigCluster {
    /// Reads `$KUBECONFIG` or `~/.kube/config` on every lookup.
    pub fn discover() -> Self {
        Self { kubeconfig: None }
    }

    pub fn from_kubeconfig(kubeconfig: Kubeconfig) -> Self {
        Self {
            kubeconfig: Some(kubeconfig),
        }
    }

    fn cluster_of(kubeconfig: &Kubeconfig) -> Option<String> {
        let current = kubeconfig.current_context.as_deref()?;
        kubeconfig
            .contexts
            .iter()
            .find(|named| named.name == current)
            .and_then(|named| named.context.as_ref())
            .map(|context| context.cluster.clone())
    }
}

impl ClusterSource for KubeconfigCluster {
    fn current_cluster(&self) -> Result<Option<String>> {
        if let Some(kubeconfig) = &self.kubeconfig {
            return Ok(Self::cluster_of(kubeconfig));
        }
        let kubeconfig = Kubeconfig::read().context("failed to read kubeconfig")?;
        Ok(Self::cluster_of(&kubeconfig))
    }
}

/// First source that yields a non-empty cluster. A failing source is skipped.
#[derive(Default)]
pub struct ChainedClusterSource {
    sources: Vec<Box<dyn ClusterSource>>,
}

impl ChainedClusterSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl ClusterSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl ClusterSource for ChainedClusterSource {
    fn current_cluster(&self) -> Result<Option<String>> {
        let mut last_error = None;
        for source in &self.sources {
            match source.current_cluster() {
                Ok(Some(cluster)) if !cluster.trim().is_empty() => return Ok(Some(cluster)),
                Ok(_) => {}
                Err(error) => {
                    debug!("skipping cluster source: {error:#}");
                    last_error = Some(error);
                }
            }
        }
        match last_error {
            Some(error) => Err(error),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NamespaceState {
    #[serde(default)]
    namespaces: BTreeMap<String, String>,
}

/// YAML file of the form `namespaces: { <cluster>: <namespace> }`, read on
/// every lookup so selections made elsewhere are seen immediately.
#[derive(Debug, Clone)]
pub struct NamespaceStateFile {
    path: PathBuf,
}

impl NamespaceStateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NamespaceStore for NamespaceStateFile {
    fn selected_namespace(&self, cluster: &str) -> Result<Option<String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(error).with_context(|| {
                    format!("failed to read namespace state {}", self.path.display())
                });
            }
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let state: NamespaceState = serde_yaml::from_str(&raw).with_context(|| {
            format!("failed to parse namespace state {}", self.path.display())
        })?;
        Ok(state.namespaces.get(cluster).cloned())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryNamespaceStore {
    namespaces: BTreeMap<String, String>,
}

impl MemoryNamespaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, cluster: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.namespaces.insert(cluster.into(), namespace.into());
        self
    }
}

impl NamespaceStore for MemoryNamespaceStore {
    fn selected_namespace(&self, cluster: &str) -> Result<Option<String>> {
        Ok(self.namespaces.get(cluster).cloned())
    }
}
