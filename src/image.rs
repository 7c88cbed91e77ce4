const DEFAULT_TAG: &str = "latest";

/// A container image reference split into its parts.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ImageReference {
    pub registry: Option<String>,
    pub repository: String,
    pub name: String,
    pub tag: Option<String>,
    pub digest: Option<String>,
}

impl ImageReference {
    /// Parses `[registry/]repository[:tag][@digest]`, ignoring surrounding
    /// whitespace. Returns `None` for an empty or blank reference.
    pub fn parse(reference: &str) -> Option<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }

        let (location, last) = match reference.rsplit_once('/') {
            Some((location, last)) => (Some(location), last),
            None => (None, reference),
        };

        let (name_and_tag, digest) = match last.split_once('@') {
            Some((before, digest)) => (before, Some(digest.to_string())),
            None => (last, None),
        };
        let (name, tag) = match name_and_tag.split_once(':') {
            Some((name, tag)) if !tag.is_empty() => (name, Some(tag.to_string())),
            Some((name, _)) => (name, None),
            None => (name_and_tag, None),
        };

        let (registry, path) = match location {
            Some(location) => split_registry(location),
            None => (None, None),
        };
        let repository = match path {
            Some(path) => format!("{path}/{name}"),
            None => name.to_string(),
        };

        Some(Self {
            registry,
            repository,
            name: name.to_string(),
            tag,
            digest,
        })
    }

    /// `name:tag`, or the bare name for a digest-pinned reference without a
    /// tag. Untagged references without a digest get `latest`.
    pub fn short_name(&self) -> String {
        match (&self.tag, &self.digest) {
            (Some(tag), _) => format!("{}:{tag}", self.name),
            (None, Some(_)) => self.name.clone(),
            (None, None) => format!("{}:{DEFAULT_TAG}", self.name),
        }
    }
}

// The first path component is a registry host when it looks like one
// (has a dot or port, or is `localhost`).
fn split_registry(location: &str) -> (Option<String>, Option<String>) {
    let (first, rest) = match location.split_once('/') {
        Some((first, rest)) => (first, Some(rest)),
        None => (location, None),
    };
    let is_host = first.contains('.') || first.contains(':') || first == "localhost";
    if is_host {
        (Some(first.to_string()), rest.map(str::to_string))
    } else {
        (None, Some(location.to_string()))
    }
}

/// Reduces an image reference to `name:tag` for display.
pub fn simplify_image(reference: &str) -> String {
    ImageReference::parse(reference)
        .map(|image| image.short_name())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{ImageReference, simplify_image};

    #[test]
    fn strips_registry_and_path() {
        assert_eq!(simplify_image("registry.io/ns/app:v1"), "app:v1");
        assert_eq!(simplify_image("localhost:5000/tools/busybox:1.36"), "busybox:1.36");
    }

    #[test]
    fn untagged_reference_defaults_to_latest() {
        assert_eq!(simplify_image("ubuntu"), "ubuntu:latest");
        assert_eq!(simplify_image("docker.io/library/nginx"), "nginx:latest");
    }

    #[test]
    fn digest_reference_does_not_synthesize_latest() {
        assert_eq!(simplify_image("ubuntu@sha256:abcd"), "ubuntu");
        assert_eq!(
            simplify_image("quay.io/org/app:v2@sha256:0123abcd"),
            "app:v2"
        );
    }

    #[test]
    fn empty_reference_is_empty() {
        assert_eq!(simplify_image(""), "");
        assert_eq!(simplify_image("   "), "");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(simplify_image(" nginx "), "nginx:latest");
        assert_eq!(simplify_image("\tquay.io/org/app:v3\n"), "app:v3");
    }

    #[test]
    fn tagged_output_is_a_fixed_point() {
        for reference in [
            "registry.io/ns/app:v1",
            "ubuntu",
            "quay.io/org/app:v2@sha256:0123abcd",
        ] {
            let once = simplify_image(reference);
            assert_eq!(simplify_image(&once), once);
        }
    }

    #[test]
    fn parse_exposes_registry_repository_and_digest() {
        let image = ImageReference::parse("ghcr.io/acme/team/api:1.2@sha256:ff").unwrap();
        assert_eq!(image.registry.as_deref(), Some("ghcr.io"));
        assert_eq!(image.repository, "acme/team/api");
        assert_eq!(image.name, "api");
        assert_eq!(image.tag.as_deref(), Some("1.2"));
        assert_eq!(image.digest.as_deref(), Some("sha256:ff"));

        let image = ImageReference::parse("library/redis").unwrap();
        assert_eq!(image.registry, None);
        assert_eq!(image.repository, "library/redis");
        assert_eq!(image.tag, None);
    }
}
