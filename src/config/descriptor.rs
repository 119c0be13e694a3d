use crate::error::{ConfigError, Result};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

static DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 8545;

const LIVE_TARGET_NAME: &str = "live";
const LIVE_NETWORK_ID: u64 = 1;
const LIVE_PORT: u16 = 8547;

/// A named deployment target with its chain id and connection coordinates.
///
/// The name is the key of the `networks` table in the source file, so it is
/// not part of the serialized body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkTarget {
    #[serde(skip)]
    name: String,
    network_id: u64,
    host: String,
    port: u16,
}

impl NetworkTarget {
    pub fn new(name: &str, network_id: u64, host: &str, port: u16) -> NetworkTarget {
        NetworkTarget {
            name: name.to_string(),
            network_id,
            host: host.to_string(),
            port,
        }
    }

    pub fn get_name(&self) -> &str {
        self.name.as_str()
    }

    pub fn get_network_id(&self) -> u64 {
        self.network_id
    }

    pub fn get_host(&self) -> &str {
        self.host.as_str()
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    /// `host:port` form, ready to hand to a client
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for NetworkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: network_id = {}, host = {}, port = {}",
            self.name, self.network_id, self.host, self.port
        )
    }
}

/// The endpoint dialed when no target is named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RpcEndpoint {
    host: String,
    port: u16,
}

impl RpcEndpoint {
    pub fn new(host: &str, port: u16) -> RpcEndpoint {
        RpcEndpoint {
            host: host.to_string(),
            port,
        }
    }

    pub fn get_host(&self) -> &str {
        self.host.as_str()
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for RpcEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rpc: host = {}, port = {}", self.host, self.port)
    }
}

/// What a consumer should dial for an optional target name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Target(&'a NetworkTarget),
    Rpc(&'a RpcEndpoint),
}

impl Resolved<'_> {
    pub fn get_host(&self) -> &str {
        match self {
            Resolved::Target(target) => target.get_host(),
            Resolved::Rpc(rpc) => rpc.get_host(),
        }
    }

    pub fn get_port(&self) -> u16 {
        match self {
            Resolved::Target(target) => target.get_port(),
            Resolved::Rpc(rpc) => rpc.get_port(),
        }
    }

    /// The default rpc endpoint carries no chain id
    pub fn get_network_id(&self) -> Option<u64> {
        match self {
            Resolved::Target(target) => Some(target.get_network_id()),
            Resolved::Rpc(_) => None,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.get_host(), self.get_port())
    }
}

/// Named deployment targets plus the default RPC endpoint.
///
/// Built once at load time and never mutated afterwards, so a shared
/// reference can be read from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDescriptor {
    #[serde(default, deserialize_with = "unique_targets")]
    networks: BTreeMap<String, NetworkTarget>,
    rpc: RpcEndpoint,
}

impl Default for ConfigDescriptor {
    fn default() -> Self {
        let live = NetworkTarget::new(LIVE_TARGET_NAME, LIVE_NETWORK_ID, DEFAULT_HOST, LIVE_PORT);
        let mut networks = BTreeMap::new();
        networks.insert(String::from(LIVE_TARGET_NAME), live);
        ConfigDescriptor {
            networks,
            rpc: RpcEndpoint::new(DEFAULT_HOST, DEFAULT_RPC_PORT),
        }
    }
}

impl ConfigDescriptor {
    /// Build a descriptor from already constructed parts.
    ///
    /// Fails when two targets share a name or a field is invalid.
    pub fn new(targets: Vec<NetworkTarget>, rpc: RpcEndpoint) -> Result<ConfigDescriptor> {
        let mut networks = BTreeMap::new();
        for target in targets {
            if networks.contains_key(target.get_name()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate target name `{}`",
                    target.get_name()
                )));
            }
            networks.insert(target.get_name().to_string(), target);
        }
        let descriptor = ConfigDescriptor { networks, rpc };
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn get_target(&self, name: &str) -> Result<&NetworkTarget> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))
    }

    pub fn get_rpc_endpoint(&self) -> &RpcEndpoint {
        &self.rpc
    }

    pub fn contains_target(&self, name: &str) -> bool {
        self.networks.contains_key(name)
    }

    /// Targets in name order
    pub fn targets(&self) -> impl Iterator<Item = &NetworkTarget> {
        self.networks.values()
    }

    pub fn target_names(&self) -> Vec<&str> {
        self.networks.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Pick the endpoint to dial. No name means the rpc endpoint; an unknown
    /// name is `NotFound` and never falls back to rpc.
    pub fn resolve(&self, name: Option<&str>) -> Result<Resolved<'_>> {
        match name {
            Some(name) => self.get_target(name).map(Resolved::Target),
            None => Ok(Resolved::Rpc(&self.rpc)),
        }
    }

    /// Check the field invariants serde cannot express on its own
    pub fn validate(&self) -> Result<()> {
        for (name, target) in &self.networks {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid("target name is empty".to_string()));
            }
            if target.network_id == 0 {
                return Err(ConfigError::Invalid(format!(
                    "target `{name}` has network_id 0, expected a positive integer"
                )));
            }
            if target.host.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("target `{name}` has an empty host")));
            }
        }
        if self.rpc.host.trim().is_empty() {
            return Err(ConfigError::Invalid("rpc endpoint has an empty host".to_string()));
        }
        Ok(())
    }
}

/// Deserialize the `networks` table, refusing repeated keys instead of
/// letting the last one win, and copying each key into its target.
fn unique_targets<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, NetworkTarget>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TargetsVisitor;

    impl<'de> Visitor<'de> for TargetsVisitor {
        type Value = BTreeMap<String, NetworkTarget>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of target names to network targets")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut targets = BTreeMap::new();
            while let Some((name, mut target)) = access.next_entry::<String, NetworkTarget>()? {
                if targets.contains_key(&name) {
                    return Err(de::Error::custom(format!("duplicate target name `{name}`")));
                }
                target.name = name.clone();
                targets.insert(name, target);
            }
            Ok(targets)
        }
    }

    deserializer.deserialize_map(TargetsVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_literal_descriptor() {
        let descriptor = ConfigDescriptor::default();
        let live = descriptor.get_target("live").unwrap();
        assert_eq!(live.get_network_id(), 1);
        assert_eq!(live.get_host(), "127.0.0.1");
        assert_eq!(live.get_port(), 8547);

        let rpc = descriptor.get_rpc_endpoint();
        assert_eq!(rpc.get_host(), "127.0.0.1");
        assert_eq!(rpc.get_port(), 8545);
    }

    #[test]
    fn test_missing_target_is_not_found() {
        let descriptor = ConfigDescriptor::default();
        assert_eq!(
            descriptor.get_target("test"),
            Err(ConfigError::NotFound("test".to_string()))
        );
        assert!(!descriptor.contains_target("test"));
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let descriptor = ConfigDescriptor::default();
        let first = descriptor.get_target("live").unwrap().clone();
        for _ in 0..3 {
            assert_eq!(descriptor.get_target("live").unwrap(), &first);
            assert_eq!(descriptor.get_rpc_endpoint().get_port(), 8545);
        }
    }

    #[test]
    fn test_resolve_defaults_to_rpc() {
        let descriptor = ConfigDescriptor::default();
        let resolved = descriptor.resolve(None).unwrap();
        assert_eq!(resolved.address(), "127.0.0.1:8545");
        assert_eq!(resolved.get_network_id(), None);

        let resolved = descriptor.resolve(Some("live")).unwrap();
        assert_eq!(resolved.address(), "127.0.0.1:8547");
        assert_eq!(resolved.get_network_id(), Some(1));
    }

    #[test]
    fn test_resolve_unknown_name_does_not_fall_back() {
        let descriptor = ConfigDescriptor::default();
        assert!(matches!(
            descriptor.resolve(Some("rpc")),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let targets = vec![
            NetworkTarget::new("live", 1, "127.0.0.1", 8547),
            NetworkTarget::new("live", 3, "10.0.0.1", 8546),
        ];
        let result = ConfigDescriptor::new(targets, RpcEndpoint::new("127.0.0.1", 8545));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_zero_network_id() {
        let targets = vec![NetworkTarget::new("dev", 0, "127.0.0.1", 8547)];
        let result = ConfigDescriptor::new(targets, RpcEndpoint::new("127.0.0.1", 8545));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_empty_hosts() {
        let targets = vec![NetworkTarget::new("dev", 5, " ", 8547)];
        let result = ConfigDescriptor::new(targets, RpcEndpoint::new("127.0.0.1", 8545));
        assert!(result.is_err());

        let result = ConfigDescriptor::new(vec![], RpcEndpoint::new("", 8545));
        assert!(result.is_err());
    }

    #[test]
    fn test_targets_are_listed_by_name() {
        let targets = vec![
            NetworkTarget::new("staging", 4, "10.0.0.2", 8545),
            NetworkTarget::new("dev", 5, "localhost", 7545),
        ];
        let descriptor =
            ConfigDescriptor::new(targets, RpcEndpoint::new("127.0.0.1", 8545)).unwrap();
        assert_eq!(descriptor.target_names(), vec!["dev", "staging"]);
        assert_eq!(descriptor.len(), 2);
        assert_eq!(descriptor.targets().next().unwrap().get_name(), "dev");
    }

    #[test]
    fn test_descriptor_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigDescriptor>();
    }
}
