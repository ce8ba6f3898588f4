use super::{filter_segments, require_true};
use crate::client::Client;
use crate::error::Result;
use crate::objects::{Activity, Reference};
use crate::params::Params;
use crate::response::result_to_list;

/// Endpoints acting on the account's activity stream
pub struct ApiActivities<'a> {
    client: &'a Client,
}

impl<'a> ApiActivities<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        ApiActivities { client }
    }

    /// Endpoint: /activities/list.json
    ///
    /// Filters become `<name>-<value>` path segments ahead of `list.json`.
    pub fn list(&self, filters: Params, params: Params) -> Result<Vec<Activity>> {
        let endpoint = format!("/activities/{}list.json", filter_segments(&filters));
        let envelope = self.client.get(&endpoint, params)?;
        result_to_list(envelope.result)
            .into_iter()
            .map(|item| Activity::from_value(self.client.clone(), item))
            .collect()
    }

    /// Endpoint: /activities/purge.json
    ///
    /// Removes every activity from the stream.
    pub fn purge(&self, params: Params) -> Result<bool> {
        let envelope = self.client.post("/activities/purge.json", params)?;
        require_true(&envelope, "purge")
    }
}

/// Endpoints acting on a single activity
pub struct ApiActivity<'a> {
    client: &'a Client,
}

impl<'a> ApiActivity<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        ApiActivity { client }
    }

    /// Endpoint: /activity/<id>/view.json
    pub fn view<'r>(
        &self,
        activity: impl Into<Reference<'r, Activity>>,
        params: Params,
    ) -> Result<Activity> {
        let id = activity.into().id().to_string();
        let envelope = self
            .client
            .get(&format!("/activity/{}/view.json", id), params)?;
        Activity::from_value(self.client.clone(), envelope.result)
    }
}
