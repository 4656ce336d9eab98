//! Endpoint configuration.

use std::time::Duration;

use super::constants::{
    DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_CONNECTIONS_PER_HOST, DEFAULT_VALIDATED_ADDRESS_LRU_SIZE,
    MAX_IDLE_TIMEOUT,
};
use super::error::ConfigError;
use crate::address::PreferredAddressPolicy;

/// Validated endpoint settings.
///
/// Obtain one through [`EndpointConfig::builder`] or [`Default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    max_connections_per_host: usize,
    idle_timeout: Duration,
    preferred_address_policy: PreferredAddressPolicy,
    validate_address_lru: bool,
    validated_address_capacity: usize,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            max_connections_per_host: DEFAULT_MAX_CONNECTIONS_PER_HOST,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            preferred_address_policy: PreferredAddressPolicy::Accept,
            validate_address_lru: false,
            validated_address_capacity: DEFAULT_VALIDATED_ADDRESS_LRU_SIZE,
        }
    }
}

impl EndpointConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> EndpointConfigBuilder {
        EndpointConfigBuilder::new()
    }

    /// Concurrent connections allowed from one remote address.
    pub fn max_connections_per_host(&self) -> usize {
        self.max_connections_per_host
    }

    /// Idle timeout applied to new connections.
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// What to do with a server-advertised preferred address.
    pub fn preferred_address_policy(&self) -> PreferredAddressPolicy {
        self.preferred_address_policy
    }

    /// Whether validated addresses are remembered in an LRU.
    pub fn validate_address_lru(&self) -> bool {
        self.validate_address_lru
    }

    /// Capacity of the validated-address LRU.
    pub fn validated_address_capacity(&self) -> usize {
        self.validated_address_capacity
    }
}

/// Builder for [`EndpointConfig`].
#[derive(Debug, Clone)]
pub struct EndpointConfigBuilder {
    config: EndpointConfig,
}

impl Default for EndpointConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointConfigBuilder {
    /// Create a builder holding the default settings.
    pub fn new() -> Self {
        Self {
            config: EndpointConfig::default(),
        }
    }

    /// Set the per-host connection limit.
    pub fn max_connections_per_host(mut self, limit: usize) -> Self {
        self.config.max_connections_per_host = limit;
        self
    }

    /// Set the idle timeout.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    /// Set the preferred-address policy.
    pub fn preferred_address_policy(mut self, policy: PreferredAddressPolicy) -> Self {
        self.config.preferred_address_policy = policy;
        self
    }

    /// Enable or disable the validated-address LRU.
    pub fn validate_address_lru(mut self, enabled: bool) -> Self {
        self.config.validate_address_lru = enabled;
        self
    }

    /// Set the validated-address LRU capacity.
    pub fn validated_address_capacity(mut self, capacity: usize) -> Self {
        self.config.validated_address_capacity = capacity;
        self
    }

    /// Check the settings and produce the configuration.
    pub fn build(self) -> Result<EndpointConfig, ConfigError> {
        let config = self.config;
        if config.max_connections_per_host == 0 {
            return Err(ConfigError::ZeroConnectionsPerHost);
        }
        if config.validate_address_lru && config.validated_address_capacity == 0 {
            return Err(ConfigError::ZeroValidatedAddressCapacity);
        }
        if config.idle_timeout > MAX_IDLE_TIMEOUT {
            return Err(ConfigError::IdleTimeoutTooLarge(config.idle_timeout));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EndpointConfig::default();
        assert_eq!(config.max_connections_per_host(), 100);
        assert_eq!(config.idle_timeout(), Duration::from_secs(10));
        assert_eq!(
            config.preferred_address_policy(),
            PreferredAddressPolicy::Accept
        );
        assert!(!config.validate_address_lru());
    }

    #[test]
    fn test_builder() {
        let config = EndpointConfig::builder()
            .max_connections_per_host(4)
            .idle_timeout(Duration::from_secs(30))
            .preferred_address_policy(PreferredAddressPolicy::Ignore)
            .validate_address_lru(true)
            .validated_address_capacity(32)
            .build()
            .unwrap();

        assert_eq!(config.max_connections_per_host(), 4);
        assert_eq!(config.idle_timeout(), Duration::from_secs(30));
        assert_eq!(
            config.preferred_address_policy(),
            PreferredAddressPolicy::Ignore
        );
        assert!(config.validate_address_lru());
        assert_eq!(config.validated_address_capacity(), 32);
    }

    #[test]
    fn test_builder_rejects_zero_limit() {
        let err = EndpointConfig::builder()
            .max_connections_per_host(0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroConnectionsPerHost);
    }

    #[test]
    fn test_builder_rejects_empty_lru() {
        let err = EndpointConfig::builder()
            .validate_address_lru(true)
            .validated_address_capacity(0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroValidatedAddressCapacity);

        // Capacity is irrelevant while the LRU is off.
        assert!(
            EndpointConfig::builder()
                .validated_address_capacity(0)
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_builder_rejects_huge_idle_timeout() {
        let err = EndpointConfig::builder()
            .idle_timeout(Duration::from_secs(3600))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::IdleTimeoutTooLarge(_)));
    }
}
