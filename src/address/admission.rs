//! Per-host admission control.
//!
//! Tracks how many connections each remote address holds so that new
//! connections beyond the configured limit can be refused, and optionally
//! remembers recently validated addresses so they can skip Retry.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, warn};

use super::SocketAddress;
use crate::core::EndpointConfig;

/// Connection counts keyed by remote address.
#[derive(Debug, Clone)]
pub struct HostConnectionTable {
    counts: HashMap<SocketAddress, usize>,
    max_per_host: usize,
}

impl HostConnectionTable {
    /// Create an empty table with the given per-host limit.
    pub fn new(max_per_host: usize) -> Self {
        Self {
            counts: HashMap::new(),
            max_per_host,
        }
    }

    /// Per-host limit.
    pub fn max_per_host(&self) -> usize {
        self.max_per_host
    }

    /// Record one more connection from `addr`. Returns the new count.
    pub fn increment(&mut self, addr: &SocketAddress) -> usize {
        let count = self.counts.entry(*addr).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Record one connection fewer from `addr`. Returns the new count.
    ///
    /// The entry is removed when it reaches zero.
    pub fn decrement(&mut self, addr: &SocketAddress) -> usize {
        let Some(count) = self.counts.get_mut(addr) else {
            warn!(%addr, "decrement for address with no tracked connections");
            return 0;
        };
        *count -= 1;
        let remaining = *count;
        if remaining == 0 {
            self.counts.remove(addr);
        }
        remaining
    }

    /// Connections currently tracked for `addr`.
    pub fn current(&self, addr: &SocketAddress) -> usize {
        self.counts.get(addr).copied().unwrap_or(0)
    }

    /// Whether `addr` already holds the maximum number of connections.
    pub fn is_at_limit(&self, addr: &SocketAddress) -> bool {
        self.current(addr) >= self.max_per_host
    }

    /// Number of distinct hosts tracked.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no host is tracked.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Bounded most-recent-first set of validated addresses.
///
/// Entries are compared by full address, so addresses that merely share a
/// hash are never treated as validated.
#[derive(Debug, Clone)]
pub struct ValidatedAddressCache {
    entries: VecDeque<SocketAddress>,
    capacity: usize,
}

impl ValidatedAddressCache {
    /// Create an empty cache holding at most `capacity` addresses.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Remember `addr` as validated, evicting the oldest entry when full.
    pub fn mark(&mut self, addr: &SocketAddress) {
        if let Some(pos) = self.entries.iter().position(|entry| entry == addr) {
            self.entries.remove(pos);
        }
        self.entries.push_front(*addr);
        self.entries.truncate(self.capacity);
    }

    /// Whether `addr` was recently validated.
    pub fn contains(&self, addr: &SocketAddress) -> bool {
        self.entries.contains(addr)
    }

    /// Number of remembered addresses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Admission bookkeeping for one endpoint.
#[derive(Debug, Clone)]
pub struct AdmissionControl {
    hosts: HostConnectionTable,
    validated: Option<ValidatedAddressCache>,
}

impl AdmissionControl {
    /// Build from endpoint configuration.
    pub fn from_config(config: &EndpointConfig) -> Self {
        let validated = config
            .validate_address_lru()
            .then(|| ValidatedAddressCache::new(config.validated_address_capacity()));
        Self {
            hosts: HostConnectionTable::new(config.max_connections_per_host()),
            validated,
        }
    }

    /// Count a new connection from `addr` if the host is below its limit.
    ///
    /// Returns `false`, leaving the count untouched, when the host is full.
    pub fn try_admit(&mut self, addr: &SocketAddress) -> bool {
        if self.hosts.is_at_limit(addr) {
            debug!(
                %addr,
                limit = self.hosts.max_per_host(),
                "refusing connection: per-host limit reached"
            );
            return false;
        }
        self.hosts.increment(addr);
        true
    }

    /// Forget one connection from `addr`.
    pub fn release(&mut self, addr: &SocketAddress) {
        self.hosts.decrement(addr);
    }

    /// Connections currently admitted from `addr`.
    pub fn connections_from(&self, addr: &SocketAddress) -> usize {
        self.hosts.current(addr)
    }

    /// Remember `addr` as validated. No-op when the LRU is disabled.
    pub fn mark_validated(&mut self, addr: &SocketAddress) {
        if let Some(cache) = self.validated.as_mut() {
            cache.mark(addr);
        }
    }

    /// Whether `addr` was recently validated. Always `false` when the LRU is disabled.
    pub fn is_validated(&self, addr: &SocketAddress) -> bool {
        self.validated
            .as_ref()
            .is_some_and(|cache| cache.contains(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv6Addr, SocketAddr, SocketAddrV6};

    fn addr(text: &str) -> SocketAddress {
        SocketAddress::from(text.parse::<SocketAddr>().unwrap())
    }

    #[test]
    fn test_increment_decrement() {
        let mut table = HostConnectionTable::new(10);
        let host = addr("198.51.100.4:5000");

        assert_eq!(table.increment(&host), 1);
        assert_eq!(table.increment(&host), 2);
        assert_eq!(table.current(&host), 2);

        assert_eq!(table.decrement(&host), 1);
        assert_eq!(table.decrement(&host), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_decrement_unknown_does_not_underflow() {
        let mut table = HostConnectionTable::new(10);
        let host = addr("198.51.100.4:5000");
        assert_eq!(table.decrement(&host), 0);
        assert_eq!(table.current(&host), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_hosts_are_independent() {
        let mut table = HostConnectionTable::new(10);
        let a = addr("[2001:db8::1]:443");
        let b = addr("[2001:db8::1]:444");

        table.increment(&a);
        table.increment(&a);
        table.increment(&b);

        assert_eq!(table.len(), 2);
        assert_eq!(table.current(&a), 2);
        assert_eq!(table.current(&b), 1);
    }

    #[test]
    fn test_admission_limit() {
        let config = EndpointConfig::builder()
            .max_connections_per_host(2)
            .build()
            .unwrap();
        let mut admission = AdmissionControl::from_config(&config);
        let host = addr("203.0.113.9:6000");

        assert!(admission.try_admit(&host));
        assert!(admission.try_admit(&host));
        assert!(!admission.try_admit(&host));
        assert_eq!(admission.connections_from(&host), 2);

        admission.release(&host);
        assert!(admission.try_admit(&host));
    }

    #[test]
    fn test_validated_cache_eviction() {
        let mut cache = ValidatedAddressCache::new(2);
        let a = addr("192.0.2.1:1");
        let b = addr("192.0.2.2:1");
        let c = addr("192.0.2.3:1");

        cache.mark(&a);
        cache.mark(&b);
        cache.mark(&a); // refresh a, b is now oldest
        cache.mark(&c);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&a));
        assert!(cache.contains(&c));
        assert!(!cache.contains(&b));
    }

    #[test]
    fn test_validated_cache_ignores_hash_collisions() {
        // Same address and port, different scope: distinct addresses with equal hashes.
        let plain = SocketAddress::from(SocketAddrV6::new(Ipv6Addr::LOCALHOST, 443, 0, 0));
        let scoped = SocketAddress::from(SocketAddrV6::new(Ipv6Addr::LOCALHOST, 443, 0, 3));
        assert_eq!(plain.hash_value(), scoped.hash_value());

        let mut cache = ValidatedAddressCache::new(4);
        cache.mark(&plain);
        assert!(cache.contains(&plain));
        assert!(!cache.contains(&scoped));

        cache.mark(&scoped);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_validation_disabled_by_default() {
        let mut admission = AdmissionControl::from_config(&EndpointConfig::default());
        let host = addr("192.0.2.1:1");
        admission.mark_validated(&host);
        assert!(!admission.is_validated(&host));
    }

    #[test]
    fn test_validation_enabled() {
        let config = EndpointConfig::builder()
            .validate_address_lru(true)
            .build()
            .unwrap();
        let mut admission = AdmissionControl::from_config(&config);
        let host = addr("192.0.2.1:1");

        assert!(!admission.is_validated(&host));
        admission.mark_validated(&host);
        assert!(admission.is_validated(&host));
    }
}
