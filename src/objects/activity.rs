use serde_json::{Map, Value};

use super::photo::Photo;
use super::record::{impl_resource, Record};
use crate::client::Client;
use crate::error::{Error, Result};
use crate::params::Params;

/// An entry in the account's activity stream.
///
/// The `type` field says what happened (`photo-upload`, `photo-update`,
/// ...) and `data` carries the object it happened to. Only photo
/// activity types exist server-side today.
#[derive(Debug, Clone)]
pub struct Activity {
    pub(crate) record: Record,
    data: Option<Photo>,
}

impl_resource!(Activity, "activity");

impl Activity {
    /// Wrap a JSON object returned by the server
    pub fn from_value(client: Client, value: Value) -> Result<Self> {
        let fields: Map<String, Value> = serde_json::from_value(value)?;
        let mut activity = Activity {
            record: Record::new(client, fields),
            data: None,
        };
        activity.rebuild_references()?;
        Ok(activity)
    }

    /// Activity carrying only an id
    pub fn from_id(client: Client, id: &str) -> Self {
        Activity {
            record: Record::from_id(client, id),
            data: None,
        }
    }

    /// The photo this activity concerns, when the server included it
    pub fn data(&self) -> Option<&Photo> {
        self.data.as_ref()
    }

    /// Refresh this activity from the server
    pub fn view(&mut self, params: Params) -> Result<()> {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let fetched = client.activity().view(id.as_str(), params)?;
        self.data = fetched.data;
        self.record.replace_fields(fetched.record.into_fields());
        Ok(())
    }

    /// Rebuild the typed payload from the raw `data` field, keyed on the
    /// `type` discriminator
    fn rebuild_references(&mut self) -> Result<()> {
        self.data = match self.record.field("type").and_then(Value::as_str) {
            Some(kind) if kind.starts_with("photo") => match self.record.field("data") {
                Some(data) if !data.is_null() => Some(Photo::from_value(
                    self.record.client().clone(),
                    data.clone(),
                )?),
                _ => None,
            },
            Some(kind) => {
                return Err(Error::NotImplemented(format!(
                    "unrecognised activity type: {}",
                    kind
                )))
            }
            None => None,
        };
        Ok(())
    }
}
