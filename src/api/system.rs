use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::params::Params;

/// System information endpoints
pub struct ApiSystem<'a> {
    client: &'a Client,
}

impl<'a> ApiSystem<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        ApiSystem { client }
    }

    /// Endpoint: /system/version.json
    ///
    /// Returns the server's version information.
    pub fn version(&self, params: Params) -> Result<Value> {
        let envelope = self.client.get("/system/version.json", params)?;
        Ok(envelope.result)
    }

    /// Endpoint: /system/diagnostics.json
    ///
    /// Diagnostics failures still carry a useful payload, so the body is
    /// fetched raw and decoded here instead of going through the
    /// envelope classifier.
    pub fn diagnostics(&self, params: Params) -> Result<Value> {
        let body = self.client.get_raw("/system/diagnostics.json", params)?;
        let value: Value = serde_json::from_str(&body)?;
        Ok(value.get("result").cloned().unwrap_or(Value::Null))
    }
}
