use super::require_true;
use crate::client::Client;
use crate::error::Result;
use crate::objects::{Action, Photo, Reference, Resource};
use crate::params::Params;

/// Endpoints acting on a single action.
///
/// There is no collection counterpart; actions are only reachable
/// through their ids or their target photos.
pub struct ApiAction<'a> {
    client: &'a Client,
}

impl<'a> ApiAction<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        ApiAction { client }
    }

    /// Endpoint: /action/<target_id>/<target_type>/create.json
    ///
    /// Only photo targets are supported by the server.
    pub fn create<'r>(&self, target: impl Into<Reference<'r, Photo>>, params: Params) -> Result<Action> {
        let id = target.into().id().to_string();
        let endpoint = format!("/action/{}/{}/create.json", id, Photo::KIND);
        let envelope = self.client.post(&endpoint, params)?;
        Action::from_value(self.client.clone(), envelope.result)
    }

    /// Endpoint: /action/<id>/delete.json
    pub fn delete<'r>(&self, action: impl Into<Reference<'r, Action>>, params: Params) -> Result<bool> {
        let id = action.into().id().to_string();
        let envelope = self
            .client
            .post(&format!("/action/{}/delete.json", id), params)?;
        require_true(&envelope, "delete")
    }

    /// Endpoint: /action/<id>/view.json
    pub fn view<'r>(&self, action: impl Into<Reference<'r, Action>>, params: Params) -> Result<Action> {
        let id = action.into().id().to_string();
        let envelope = self
            .client
            .get(&format!("/action/{}/view.json", id), params)?;
        Action::from_value(self.client.clone(), envelope.result)
    }
}
