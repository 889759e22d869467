//! Service discovery and client-side load balancing.
//!
//! Upstream calls are written against logical URLs such as
//! `http://message-service/`. The host part names a service; the
//! `LoadBalancer` asks a `ServiceDiscovery` for that service's instances and
//! rewrites the URL onto one of them, round-robin.
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use quote_common::{QuoteError, Result};
use reqwest::Url;

/// Lookup of service instances by logical name.
pub trait ServiceDiscovery: Send + Sync {
    /// Base URLs of every instance registered for `service`.
    fn instances(&self, service: &str) -> Vec<Url>;

    /// Names of all known services.
    ///
    /// `LoadBalancer` reads this once, in `LoadBalancer::new`. A service that
    /// appears later is never balanced: `choose` answers it with
    /// `QuoteError::Upstream` even when `instances` lists URLs for it.
    fn services(&self) -> Vec<String>;
}

/// Discovery from a fixed table, built from the command line.
#[derive(Debug, Default)]
pub struct StaticServiceDiscovery {
    services: HashMap<String, Vec<Url>>,
}

impl StaticServiceDiscovery {
    /// Parses `name=url` entries. Entries for the same name accumulate in
    /// the order given.
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let mut services: HashMap<String, Vec<Url>> = HashMap::new();
        for entry in entries {
            let entry = entry.as_ref().trim();
            let (name, url) = entry.split_once('=').ok_or_else(|| {
                QuoteError::Config(format!("instance `{}` is not of the form name=url", entry))
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(QuoteError::Config(format!("instance `{}` has no service name", entry)));
            }
            let url = Url::parse(url.trim())
                .map_err(|e| QuoteError::Config(format!("instance `{}`: {}", entry, e)))?;
            services.entry(name.to_string()).or_default().push(url);
        }
        Ok(Self { services })
    }
}

impl ServiceDiscovery for StaticServiceDiscovery {
    fn instances(&self, service: &str) -> Vec<Url> {
        self.services.get(service).cloned().unwrap_or_default()
    }

    fn services(&self) -> Vec<String> {
        self.services.keys().cloned().collect()
    }
}

/// Round-robin balancer over a `ServiceDiscovery`.
///
/// Each known service has its own counter, so interleaved calls to different
/// services do not skew each other's rotation.
pub struct LoadBalancer {
    discovery: Box<dyn ServiceDiscovery>,
    counters: HashMap<String, AtomicUsize>,
}

impl LoadBalancer {
    /// Creates a balancer over every service `discovery` knows at this point.
    ///
    /// The set of services is fixed here; only the instances of each are
    /// looked up again on every call.
    pub fn new(discovery: Box<dyn ServiceDiscovery>) -> Self {
        let counters = discovery
            .services()
            .into_iter()
            .map(|name| (name, AtomicUsize::new(0)))
            .collect();
        Self {
            discovery,
            counters,
        }
    }

    /// Picks the next instance of `service`.
    pub fn choose(&self, service: &str) -> Result<Url> {
        let instances = self.discovery.instances(service);
        let counter = self
            .counters
            .get(service)
            .filter(|_| !instances.is_empty())
            .ok_or_else(|| QuoteError::Upstream(format!("no instances of {}", service)))?;
        let index = counter.fetch_add(1, Ordering::Relaxed) % instances.len();
        Ok(instances[index].clone())
    }

    /// Rewrites a logical URL (`http://<service>/<path>?<query>`) onto the
    /// next instance of `<service>`.
    ///
    /// - logical: URL whose host is a service name, e.g. `http://message-service/quotes`.
    /// - Returns: the instance URL with the logical path and query appended, or
    ///   `QuoteError::Upstream` if the URL is invalid or the service has no
    ///   instances.
    pub fn resolve(&self, logical: &str) -> Result<Url> {
        let logical = Url::parse(logical)
            .map_err(|e| QuoteError::Upstream(format!("invalid upstream url {}: {}", logical, e)))?;
        let service = logical.host_str().ok_or_else(|| {
            QuoteError::Upstream(format!("upstream url {} has no service name", logical))
        })?;

        let instance = self.choose(service)?;
        let path_and_query = match logical.query() {
            Some(query) => format!("{}?{}", logical.path(), query),
            None => logical.path().to_string(),
        };
        let target = format!("{}{}", instance.as_str().trim_end_matches('/'), path_and_query);
        debug!("Resolved {} to {}", logical, target);

        Url::parse(&target)
            .map_err(|e| QuoteError::Upstream(format!("invalid instance url {}: {}", target, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balancer(entries: &[&str]) -> LoadBalancer {
        LoadBalancer::new(Box::new(StaticServiceDiscovery::from_entries(entries).unwrap()))
    }

    #[test]
    fn parses_entries_in_order() {
        let discovery = StaticServiceDiscovery::from_entries(&[
            "message-service=http://10.0.0.1:8081",
            " message-service = http://10.0.0.2:8081 ",
        ])
        .unwrap();
        let hosts: Vec<_> = discovery
            .instances("message-service")
            .iter()
            .map(|url| url.host_str().unwrap().to_string())
            .collect();
        assert_eq!(hosts, vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn rejects_malformed_entries() {
        for entry in ["message-service", "=http://a:1", "message-service=not a url"] {
            let err = StaticServiceDiscovery::from_entries(&[entry]).unwrap_err();
            assert!(matches!(err, QuoteError::Config(_)), "{}", entry);
        }
    }

    #[test]
    fn cycles_through_instances() {
        let balancer = balancer(&[
            "message-service=http://a:1",
            "message-service=http://b:2",
            "message-service=http://c:3",
        ]);
        let picked: Vec<_> = (0..6)
            .map(|_| balancer.choose("message-service").unwrap().host_str().unwrap().to_string())
            .collect();
        assert_eq!(picked, vec!["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn counters_are_per_service() {
        let balancer = balancer(&[
            "message-service=http://a:1",
            "message-service=http://b:2",
            "other=http://x:9",
        ]);
        assert_eq!(balancer.choose("message-service").unwrap().host_str(), Some("a"));
        balancer.choose("other").unwrap();
        assert_eq!(balancer.choose("message-service").unwrap().host_str(), Some("b"));
    }

    #[test]
    fn unknown_service_is_an_upstream_error() {
        let balancer = balancer(&["message-service=http://a:1"]);
        assert!(matches!(
            balancer.choose("billing").unwrap_err(),
            QuoteError::Upstream(_)
        ));
        assert!(matches!(
            balancer.resolve("http://billing/").unwrap_err(),
            QuoteError::Upstream(_)
        ));
    }

    struct LateDiscovery;

    impl ServiceDiscovery for LateDiscovery {
        fn instances(&self, _service: &str) -> Vec<Url> {
            vec![Url::parse("http://a:1").unwrap()]
        }

        fn services(&self) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn services_unknown_at_construction_are_not_balanced() {
        let balancer = LoadBalancer::new(Box::new(LateDiscovery));
        assert!(matches!(
            balancer.choose("message-service").unwrap_err(),
            QuoteError::Upstream(_)
        ));
    }

    #[test]
    fn resolve_keeps_path_and_query() {
        let balancer = balancer(&["message-service=http://127.0.0.1:8081/"]);
        assert_eq!(
            balancer.resolve("http://message-service/").unwrap().as_str(),
            "http://127.0.0.1:8081/"
        );
        assert_eq!(
            balancer.resolve("http://message-service/quotes/3?x=1").unwrap().as_str(),
            "http://127.0.0.1:8081/quotes/3?x=1"
        );
    }

    #[test]
    fn resolve_appends_to_instance_path_prefix() {
        let balancer = balancer(&["message-service=http://gateway:80/messages"]);
        assert_eq!(
            balancer.resolve("http://message-service/quotes").unwrap().as_str(),
            "http://gateway/messages/quotes"
        );
    }
}
