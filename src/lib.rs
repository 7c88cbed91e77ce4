//! Value filters for the cluster console's schema-driven pages.
//!
//! Each filter turns a raw API field into a display value: resource
//! quantities, byte counts, listing timestamps, image references,
//! annotation maps and node role labels. The context resolvers pick the
//! active cluster and namespace from the router and the persisted
//! namespace selection.

pub mod annotations;
pub mod bytes;
pub mod config;
pub mod context;
pub mod error;
pub mod i18n;
pub mod image;
pub mod node;
pub mod quantity;
pub mod registry;
pub mod timestamp;

pub use error::{FilterError, Result};
pub use registry::{Filter, FilterRegistry};
