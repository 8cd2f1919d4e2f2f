//! Registry of configured monitor instances

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use super::warning_service::{InstanceId, MonitorConfig, WarningService};
use crate::error::ApplicationError;
use crate::ports::WarningsPort;

/// Host-keyed map of running warning services
///
/// Entries are created on setup and removed on unload; nothing else holds
/// per-instance state.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    instances: RwLock<HashMap<InstanceId, Arc<WarningService>>>,
}

impl InstanceRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and register the service for one instance
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::DuplicateInstance` if the id is taken.
    pub fn setup(
        &self,
        port: Arc<dyn WarningsPort>,
        config: MonitorConfig,
    ) -> Result<Arc<WarningService>, ApplicationError> {
        let mut instances = self.instances.write();
        if instances.contains_key(&config.id) {
            return Err(ApplicationError::DuplicateInstance(config.id.to_string()));
        }

        let id = config.id.clone();
        info!(
            instance = %id,
            location = %config.location,
            lead_time = %config.lead_time,
            "Setting up warning monitor"
        );

        let service = Arc::new(WarningService::new(port, config));
        instances.insert(id, Arc::clone(&service));
        Ok(service)
    }

    /// Remove an instance, returning its service
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InstanceNotFound` for unknown ids.
    pub fn unload(&self, id: &InstanceId) -> Result<Arc<WarningService>, ApplicationError> {
        let removed = self
            .instances
            .write()
            .remove(id)
            .ok_or_else(|| ApplicationError::InstanceNotFound(id.to_string()))?;
        debug!(instance = %id, "Unloaded warning monitor");
        Ok(removed)
    }

    /// Look up a running instance
    #[must_use]
    pub fn get(&self, id: &InstanceId) -> Option<Arc<WarningService>> {
        self.instances.read().get(id).cloned()
    }

    /// All registered ids, sorted
    #[must_use]
    pub fn ids(&self) -> Vec<InstanceId> {
        let mut ids: Vec<_> = self.instances.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// All registered services, ordered by id
    #[must_use]
    pub fn services(&self) -> Vec<Arc<WarningService>> {
        let instances = self.instances.read();
        let mut services: Vec<_> = instances.values().cloned().collect();
        services.sort_by(|a, b| a.config().id.cmp(&b.config().id));
        services
    }

    /// Number of registered instances
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.read().len()
    }

    /// True if nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockWarningsPort;
    use domain::{GeoLocation, LeadTime};

    fn config(id: &str) -> MonitorConfig {
        MonitorConfig::new(
            InstanceId::new(id).expect("valid id"),
            id.to_uppercase(),
            GeoLocation::new(47.0707, 15.4395).expect("valid"),
            LeadTime::zero(),
        )
    }

    fn port() -> Arc<dyn WarningsPort> {
        Arc::new(MockWarningsPort::new())
    }

    #[test]
    fn setup_and_get() {
        let registry = InstanceRegistry::new();
        assert!(registry.is_empty());

        let service = registry.setup(port(), config("graz")).expect("setup");
        assert_eq!(service.config().name, "GRAZ");

        let id = InstanceId::new("graz").expect("valid");
        let found = registry.get(&id).expect("registered");
        assert!(Arc::ptr_eq(&service, &found));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_setup_is_rejected() {
        let registry = InstanceRegistry::new();
        registry.setup(port(), config("graz")).expect("setup");

        let result = registry.setup(port(), config("graz"));
        assert!(matches!(result, Err(ApplicationError::DuplicateInstance(id)) if id == "graz"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unload_removes_instance() {
        let registry = InstanceRegistry::new();
        registry.setup(port(), config("graz")).expect("setup");
        let id = InstanceId::new("graz").expect("valid");

        registry.unload(&id).expect("unload");
        assert!(registry.get(&id).is_none());
        assert!(registry.is_empty());

        assert!(matches!(
            registry.unload(&id),
            Err(ApplicationError::InstanceNotFound(_))
        ));
    }

    #[test]
    fn ids_and_services_are_sorted() {
        let registry = InstanceRegistry::new();
        for id in ["wien", "graz", "linz"] {
            registry.setup(port(), config(id)).expect("setup");
        }

        let ids: Vec<_> = registry.ids().iter().map(|id| id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["graz", "linz", "wien"]);

        let names: Vec<_> = registry
            .services()
            .iter()
            .map(|s| s.config().name.clone())
            .collect();
        assert_eq!(names, vec!["GRAZ", "LINZ", "WIEN"]);
    }
}
