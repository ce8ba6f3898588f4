use serde_json::{Map, Value};

use super::photo::Photo;
use super::record::{impl_resource, Record, Resource};
use crate::client::Client;
use crate::error::{Error, Result};
use crate::params::Params;

/// An action (comment, favorite, ...) attached to a target object.
///
/// Only photo targets exist server-side today; any other `target_type`
/// is rejected when the payload is wrapped.
#[derive(Debug, Clone)]
pub struct Action {
    pub(crate) record: Record,
    target: Option<Photo>,
}

impl_resource!(Action, "action");

impl Action {
    /// Wrap a JSON object returned by the server
    pub fn from_value(client: Client, value: Value) -> Result<Self> {
        let fields: Map<String, Value> = serde_json::from_value(value)?;
        let mut action = Action {
            record: Record::new(client, fields),
            target: None,
        };
        action.rebuild_references()?;
        Ok(action)
    }

    /// Action carrying only an id
    pub fn from_id(client: Client, id: &str) -> Self {
        Action {
            record: Record::from_id(client, id),
            target: None,
        }
    }

    /// The photo this action is attached to, when the server included it
    pub fn target(&self) -> Option<&Photo> {
        self.target.as_ref()
    }

    /// Delete this action, clearing its fields on success
    pub fn delete(&mut self, params: Params) -> Result<bool> {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let deleted = client.action().delete(id.as_str(), params)?;
        self.record.clear_fields();
        self.target = None;
        Ok(deleted)
    }

    /// Refresh this action from the server
    pub fn view(&mut self, params: Params) -> Result<()> {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let fetched = client.action().view(id.as_str(), params)?;
        self.target = fetched.target;
        self.record.replace_fields(fetched.record.into_fields());
        Ok(())
    }

    /// Rebuild the typed target from the raw `target` field, keyed on the
    /// `target_type` discriminator
    fn rebuild_references(&mut self) -> Result<()> {
        self.target = match self.record.field("target") {
            Some(target) if !target.is_null() => {
                let target_type = self
                    .record
                    .field("target_type")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                if target_type == Photo::KIND {
                    Some(Photo::from_value(
                        self.record.client().clone(),
                        target.clone(),
                    )?)
                } else {
                    return Err(Error::NotImplemented(
                        "actions can only be attached to photos".to_string(),
                    ));
                }
            }
            _ => None,
        };
        Ok(())
    }
}
