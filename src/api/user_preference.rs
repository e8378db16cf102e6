//! User preference service.

use std::sync::Arc;

use serde_json::Value;

use crate::client::{ApiBase, ClientInner, RequestDescriptor};
use crate::Result;

/// Service for the user's preference record.
///
/// The record carries the streamer connection details and per-account
/// display settings.
pub struct UserPreferenceService {
    inner: Arc<ClientInner>,
}

impl UserPreferenceService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the user preference record.
    pub async fn get(&self) -> Result<Value> {
        self.inner
            .request_json(RequestDescriptor::get(ApiBase::Trader, "/userPreference"))
            .await
    }
}
