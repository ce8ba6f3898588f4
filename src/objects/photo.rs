use std::path::Path;

use serde_json::{Map, Value};

use super::record::{impl_resource, Record};
use crate::client::Client;
use crate::error::Result;
use crate::params::Params;

/// A photo stored on the server.
///
/// Fields mirror the most recent server snapshot; the mutating methods
/// below refresh them from the server's response.
#[derive(Debug, Clone)]
pub struct Photo {
    pub(crate) record: Record,
}

impl_resource!(Photo, "photo");

impl Photo {
    /// Wrap a JSON object returned by the server
    pub fn from_value(client: Client, value: Value) -> Result<Self> {
        let fields: Map<String, Value> = serde_json::from_value(value)?;
        Ok(Photo {
            record: Record::new(client, fields),
        })
    }

    /// Photo carrying only an id, useful before the first fetch
    pub fn from_id(client: Client, id: &str) -> Self {
        Photo {
            record: Record::from_id(client, id),
        }
    }

    /// Delete this photo, clearing its fields on success
    pub fn delete(&mut self, params: Params) -> Result<bool> {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let deleted = client.photo().delete(id.as_str(), params)?;
        self.record.clear_fields();
        Ok(deleted)
    }

    /// Fetch the HTML markup of this photo's edit form
    pub fn edit(&self, params: Params) -> Result<String> {
        let id = self.record.id_or_empty();
        self.record.client().photo().edit(id.as_str(), params)
    }

    /// Update this photo with the given parameters
    pub fn update(&mut self, params: Params) -> Result<()> {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let updated = client.photo().update(id.as_str(), params)?;
        self.record.replace_fields(updated.record.into_fields());
        Ok(())
    }

    /// Refresh this photo from the server
    pub fn view(&mut self, params: Params) -> Result<()> {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let fetched = client.photo().view(id.as_str(), params)?;
        self.record.replace_fields(fetched.record.into_fields());
        Ok(())
    }

    /// Not supported by this client yet
    pub fn dynamic_url(&self, params: Params) -> Result<String> {
        self.record.client().photo().dynamic_url(self, params)
    }

    /// Fetch the photos adjacent to this one in the owner's stream
    pub fn next_previous(&self, params: Params) -> Result<NextPrevious> {
        let id = self.record.id_or_empty();
        self.record
            .client()
            .photo()
            .next_previous(id.as_str(), params)
    }

    /// Apply a transformation (rotation and the like) to this photo
    pub fn transform(&mut self, params: Params) -> Result<()> {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let transformed = client.photo().transform(id.as_str(), params)?;
        self.record.replace_fields(transformed.record.into_fields());
        Ok(())
    }

    /// Not supported by this client yet
    pub fn replace(&self, photo_file: &Path, params: Params) -> Result<Photo> {
        self.record.client().photo().replace(self, photo_file, params)
    }

    /// Not supported by this client yet
    pub fn replace_encoded(&self, photo_file: &Path, params: Params) -> Result<Photo> {
        self.record
            .client()
            .photo()
            .replace_encoded(self, photo_file, params)
    }
}

/// The photos adjacent to a given one in the stream.
///
/// Servers may return more than one photo on each side, so both slots
/// are lists.
#[derive(Debug, Clone, Default)]
pub struct NextPrevious {
    pub next: Vec<Photo>,
    pub previous: Vec<Photo>,
}
