use serde_json::{Map, Value};

use super::record::{impl_resource, Record};
use crate::client::Client;
use crate::error::Result;
use crate::params::Params;

/// A tag attached to photos. Tag ids are the tag text itself, so they get
/// percent-encoded when they appear in endpoint paths.
#[derive(Debug, Clone)]
pub struct Tag {
    pub(crate) record: Record,
}

impl_resource!(Tag, "tag");

impl Tag {
    /// Wrap a JSON object returned by the server
    pub fn from_value(client: Client, value: Value) -> Result<Self> {
        let fields: Map<String, Value> = serde_json::from_value(value)?;
        Ok(Tag {
            record: Record::new(client, fields),
        })
    }

    /// Tag carrying only an id
    pub fn from_id(client: Client, id: &str) -> Self {
        Tag {
            record: Record::from_id(client, id),
        }
    }

    /// Delete this tag, clearing its fields on success
    pub fn delete(&mut self, params: Params) -> Result<bool> {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let deleted = client.tag().delete(id.as_str(), params)?;
        self.record.clear_fields();
        Ok(deleted)
    }

    /// Update this tag with the given parameters
    pub fn update(&mut self, params: Params) -> Result<()> {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let updated = client.tag().update(id.as_str(), params)?;
        self.record.replace_fields(updated.record.into_fields());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Resource;

    #[test]
    fn test_tag_id_is_its_text() {
        let tag = Tag::from_value(
            Client::new("test.example.com"),
            serde_json::json!({"id": "sunset", "count": 12}),
        )
        .unwrap();
        assert_eq!(tag.id(), Some("sunset"));
        assert_eq!(tag.field("count"), Some(&serde_json::json!(12)));
    }
}
