use std::collections::{BTreeMap, HashMap};

use super::{ConnectionRelay, ConnectorRelay, DispatcherRelay, RelayError};
use crate::Core::trace::debug;

/// String settings handed to a relay builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayConfig {
    entries: BTreeMap<String, String>,
}

impl RelayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Like `get`, but a missing key is a `RelayError::Config`.
    pub fn require(&self, key: &str) -> Result<&str, RelayError> {
        self.get(key)
            .ok_or_else(|| RelayError::Config(format!("missing key {key:?}")))
    }
}

pub type ConnectionRelayBuilder = Box<dyn Fn(&RelayConfig) -> Result<Box<dyn ConnectionRelay>, RelayError> + Send + Sync>;
pub type ConnectorRelayBuilder = Box<dyn Fn(&RelayConfig) -> Result<Box<dyn ConnectorRelay>, RelayError> + Send + Sync>;
pub type DispatcherRelayBuilder = Box<dyn Fn(&RelayConfig) -> Result<Box<dyn DispatcherRelay>, RelayError> + Send + Sync>;

/// Named builders for each relay family.
///
/// The application creates one at startup, registers the transports it
/// links in, and passes it to whatever needs to build relays.
#[derive(Default)]
pub struct RelayRegistry {
    connection: HashMap<String, ConnectionRelayBuilder>,
    connector: HashMap<String, ConnectorRelayBuilder>,
    dispatcher: HashMap<String, DispatcherRelayBuilder>,
}

impl RelayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a builder, replacing any previous one under `key`.
    pub fn register_connection_relay<F>(&mut self, key: &str, builder: F)
    where
        F: Fn(&RelayConfig) -> Result<Box<dyn ConnectionRelay>, RelayError> + Send + Sync + 'static,
    {
        debug!(key, "connection relay registered");
        self.connection.insert(key.to_string(), Box::new(builder));
    }

    pub fn register_connector_relay<F>(&mut self, key: &str, builder: F)
    where
        F: Fn(&RelayConfig) -> Result<Box<dyn ConnectorRelay>, RelayError> + Send + Sync + 'static,
    {
        debug!(key, "connector relay registered");
        self.connector.insert(key.to_string(), Box::new(builder));
    }

    pub fn register_dispatcher_relay<F>(&mut self, key: &str, builder: F)
    where
        F: Fn(&RelayConfig) -> Result<Box<dyn DispatcherRelay>, RelayError> + Send + Sync + 'static,
    {
        debug!(key, "dispatcher relay registered");
        self.dispatcher.insert(key.to_string(), Box::new(builder));
    }

    pub fn connection_relay(&self, key: &str) -> Option<&ConnectionRelayBuilder> {
        self.connection.get(key)
    }

    pub fn connector_relay(&self, key: &str) -> Option<&ConnectorRelayBuilder> {
        self.connector.get(key)
    }

    pub fn dispatcher_relay(&self, key: &str) -> Option<&DispatcherRelayBuilder> {
        self.dispatcher.get(key)
    }

    pub fn build_connection_relay(&self, key: &str, config: &RelayConfig) -> Result<Box<dyn ConnectionRelay>, RelayError> {
        let builder = self
            .connection_relay(key)
            .ok_or_else(|| RelayError::UnknownRelay(key.to_string()))?;
        builder(config)
    }

    pub fn build_connector_relay(&self, key: &str, config: &RelayConfig) -> Result<Box<dyn ConnectorRelay>, RelayError> {
        let builder = self
            .connector_relay(key)
            .ok_or_else(|| RelayError::UnknownRelay(key.to_string()))?;
        builder(config)
    }

    pub fn build_dispatcher_relay(&self, key: &str, config: &RelayConfig) -> Result<Box<dyn DispatcherRelay>, RelayError> {
        let builder = self
            .dispatcher_relay(key)
            .ok_or_else(|| RelayError::UnknownRelay(key.to_string()))?;
        builder(config)
    }

    /// Registered keys of every family, sorted, for diagnostics.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .connection
            .keys()
            .chain(self.connector.keys())
            .chain(self.dispatcher.keys())
            .cloned()
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}
