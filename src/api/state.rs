//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{PayrollMetadata, PayrollRules};
use crate::service::PayrollService;
use crate::store::InMemoryEntryStore;

/// Shared application state.
///
/// Holds the payroll service (and through it the entry store) plus the
/// metadata of the loaded payroll regime.
#[derive(Clone)]
pub struct AppState {
    service: PayrollService<InMemoryEntryStore>,
    metadata: Option<Arc<PayrollMetadata>>,
}

impl AppState {
    /// Creates a new application state around an existing service.
    pub fn new(service: PayrollService<InMemoryEntryStore>) -> Self {
        Self {
            service,
            metadata: None,
        }
    }

    /// Creates a state backed by a fresh in-memory store.
    pub fn in_memory(rules: PayrollRules) -> Self {
        Self::new(PayrollService::new(
            Arc::new(InMemoryEntryStore::new()),
            rules,
        ))
    }

    /// Attaches the metadata of the loaded payroll regime.
    pub fn with_metadata(mut self, metadata: PayrollMetadata) -> Self {
        self.metadata = Some(Arc::new(metadata));
        self
    }

    /// Returns the payroll service.
    pub fn service(&self) -> &PayrollService<InMemoryEntryStore> {
        &self.service
    }

    /// Returns the payroll regime metadata, if a configuration was loaded.
    pub fn metadata(&self) -> Option<&PayrollMetadata> {
        self.metadata.as_deref()
    }
}
