// ── Query keys ──
//
// Canonical identifiers for cacheable requests: a resource namespace
// plus a canonicalized parameter list. Keys are the sole cache index.

use std::fmt;

/// Namespace of a cacheable request. Prefix invalidation matches on
/// this alone, regardless of parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Posts,
    Stats,
    MonitoringStatus,
    ManualEntries,
    Config,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Stats => "stats",
            Self::MonitoringStatus => "monitoring-status",
            Self::ManualEntries => "manual-entries",
            Self::Config => "config",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical identifier of a cacheable request.
///
/// Two keys are equal iff the resource matches and the parameter sets
/// are equal after canonicalization: parameters are sorted by name on
/// construction, so the order the caller supplied them in never matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: Resource,
    params: Vec<(String, String)>,
}

impl QueryKey {
    /// A key with no parameters (singleton resources like `stats`).
    pub fn bare(resource: Resource) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }

    /// A key with parameters, canonicalized by sorting on name.
    ///
    /// If the same name is supplied twice, the first value wins.
    pub fn with_params<I, K, V>(resource: Resource, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        params.sort_by(|a, b| a.0.cmp(&b.0));
        params.dedup_by(|a, b| a.0 == b.0);
        Self { resource, params }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_independent_of_parameter_order() {
        let a = QueryKey::with_params(
            Resource::Posts,
            [("platform", "youtube"), ("limit", "50"), ("offset", "0")],
        );
        let b = QueryKey::with_params(
            Resource::Posts,
            [("offset", "0"), ("platform", "youtube"), ("limit", "50")],
        );
        assert_eq!(a, b);

        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let hash = |key: &QueryKey| {
            let mut h = DefaultHasher::new();
            key.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn different_params_are_different_keys() {
        let a = QueryKey::with_params(Resource::Posts, [("offset", "0")]);
        let b = QueryKey::with_params(Resource::Posts, [("offset", "25")]);
        assert_ne!(a, b);
    }

    #[test]
    fn same_params_different_resource_differ() {
        let a = QueryKey::bare(Resource::Stats);
        let b = QueryKey::bare(Resource::MonitoringStatus);
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_canonical() {
        let key = QueryKey::with_params(
            Resource::Posts,
            [("offset", "0"), ("limit", "50")],
        );
        assert_eq!(key.to_string(), "posts?limit=50&offset=0");
        assert_eq!(QueryKey::bare(Resource::Stats).to_string(), "stats");
    }
}
