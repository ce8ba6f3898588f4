use serde_json::{Map, Value};

use super::photo::Photo;
use super::record::{impl_resource, Record};
use crate::client::Client;
use crate::error::Result;
use crate::objects::Reference;
use crate::params::Params;

/// An album of photos.
///
/// The raw field map keeps whatever the server sent; `cover` and `photos`
/// are typed projections of the nested photo payloads, rebuilt whenever
/// the fields are replaced.
#[derive(Debug, Clone)]
pub struct Album {
    pub(crate) record: Record,
    cover: Option<Photo>,
    photos: Option<Vec<Photo>>,
}

impl_resource!(Album, "album");

impl Album {
    /// Wrap a JSON object returned by the server
    pub fn from_value(client: Client, value: Value) -> Result<Self> {
        let fields: Map<String, Value> = serde_json::from_value(value)?;
        let mut album = Album {
            record: Record::new(client, fields),
            cover: None,
            photos: None,
        };
        album.rebuild_references()?;
        Ok(album)
    }

    /// Album carrying only an id
    pub fn from_id(client: Client, id: &str) -> Self {
        Album {
            record: Record::from_id(client, id),
            cover: None,
            photos: None,
        }
    }

    /// Cover photo, when the server included one
    pub fn cover(&self) -> Option<&Photo> {
        self.cover.as_ref()
    }

    /// Photos in this album, when the server included them
    pub fn photos(&self) -> Option<&[Photo]> {
        self.photos.as_deref()
    }

    /// Delete this album, clearing its fields on success
    pub fn delete(&mut self, params: Params) -> Result<bool> {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let deleted = client.album().delete(id.as_str(), params)?;
        self.record.clear_fields();
        self.cover = None;
        self.photos = None;
        Ok(deleted)
    }

    /// Update this album with the given parameters
    pub fn update(&mut self, params: Params) -> Result<()> {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let updated = client.album().update(id.as_str(), params)?;
        self.replace_from(updated);
        Ok(())
    }

    /// Refresh this album from the server
    pub fn view(&mut self, params: Params) -> Result<()> {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let fetched = client.album().view(id.as_str(), params)?;
        self.replace_from(fetched);
        Ok(())
    }

    /// Add photos to this album
    pub fn add_photos<'p, I>(&mut self, photos: I, params: Params) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Reference<'p, Photo>>,
    {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let updated = client.album().add_photos(id.as_str(), photos, params)?;
        self.replace_from(updated);
        Ok(())
    }

    /// Remove photos from this album
    pub fn remove_photos<'p, I>(&mut self, photos: I, params: Params) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Reference<'p, Photo>>,
    {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let updated = client.album().remove_photos(id.as_str(), photos, params)?;
        self.replace_from(updated);
        Ok(())
    }

    /// Make the given photo this album's cover
    pub fn cover_update<'p>(
        &mut self,
        photo: impl Into<Reference<'p, Photo>>,
        params: Params,
    ) -> Result<()> {
        let id = self.record.id_or_empty();
        let client = self.record.client().clone();
        let updated = client.album().cover_update(id.as_str(), photo, params)?;
        self.replace_from(updated);
        Ok(())
    }

    /// Take over another album's state; its projections are already built
    fn replace_from(&mut self, other: Album) {
        self.cover = other.cover;
        self.photos = other.photos;
        self.record.replace_fields(other.record.into_fields());
    }

    /// Rebuild the typed projections from the raw `cover` and `photos`
    /// fields. List entries that are bare id strings become id-only photos.
    fn rebuild_references(&mut self) -> Result<()> {
        self.cover = match self.record.field("cover") {
            Some(value @ Value::Object(_)) => Some(Photo::from_value(
                self.record.client().clone(),
                value.clone(),
            )?),
            _ => None,
        };

        self.photos = match self.record.field("photos") {
            Some(Value::Array(items)) => {
                let client = self.record.client().clone();
                let mut photos = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(_) => {
                            photos.push(Photo::from_value(client.clone(), item.clone())?)
                        }
                        Value::String(id) => photos.push(Photo::from_id(client.clone(), id)),
                        _ => {}
                    }
                }
                Some(photos)
            }
            _ => None,
        };

        Ok(())
    }
}
