use std::collections::BTreeMap;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use serde_json::Value;

use super::{filter_segments, require_true};
use crate::client::Client;
use crate::error::{Error, Result};
use crate::objects::{join_ids, NextPrevious, Photo, Reference};
use crate::params::Params;
use crate::response::result_to_list;

/// Endpoints acting on photo collections
pub struct ApiPhotos<'a> {
    client: &'a Client,
}

impl<'a> ApiPhotos<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        ApiPhotos { client }
    }

    /// Endpoint: /photos/list.json
    ///
    /// Filters become `<name>-<value>` path segments ahead of `list.json`.
    pub fn list(&self, filters: Params, params: Params) -> Result<Vec<Photo>> {
        let endpoint = format!("/photos/{}list.json", filter_segments(&filters));
        let envelope = self.client.get(&endpoint, params)?;
        result_to_list(envelope.result)
            .into_iter()
            .map(|item| Photo::from_value(self.client.clone(), item))
            .collect()
    }

    /// Endpoint: /photos/update.json
    ///
    /// Applies the same update to every listed photo.
    pub fn update<'r, I>(&self, photos: I, params: Params) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: Into<Reference<'r, Photo>>,
    {
        let params = params.set("ids", join_ids(photos));
        let envelope = self.client.post("/photos/update.json", params)?;
        require_true(&envelope, "update")
    }

    /// Endpoint: /photos/delete.json
    pub fn delete<'r, I>(&self, photos: I, params: Params) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: Into<Reference<'r, Photo>>,
    {
        let params = params.set("ids", join_ids(photos));
        let envelope = self.client.post("/photos/delete.json", params)?;
        require_true(&envelope, "delete")
    }
}

/// Markup payload of the edit-form endpoint
#[derive(Deserialize)]
struct EditForm {
    markup: String,
}

/// Endpoints acting on a single photo
pub struct ApiPhoto<'a> {
    client: &'a Client,
}

impl<'a> ApiPhoto<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        ApiPhoto { client }
    }

    /// Endpoint: /photo/<id>/delete.json
    pub fn delete<'r>(&self, photo: impl Into<Reference<'r, Photo>>, params: Params) -> Result<bool> {
        let id = photo.into().id().to_string();
        let envelope = self
            .client
            .post(&format!("/photo/{}/delete.json", id), params)?;
        require_true(&envelope, "delete")
    }

    /// Endpoint: /photo/<id>/edit.json
    ///
    /// Returns the HTML markup of the photo's edit form.
    pub fn edit<'r>(&self, photo: impl Into<Reference<'r, Photo>>, params: Params) -> Result<String> {
        let id = photo.into().id().to_string();
        let envelope = self
            .client
            .get(&format!("/photo/{}/edit.json", id), params)?;
        let form: EditForm = serde_json::from_value(envelope.result)?;
        Ok(form.markup)
    }

    /// Endpoint: /photo/<id>/replace.json (not supported by this client yet)
    pub fn replace<'r>(
        &self,
        _photo: impl Into<Reference<'r, Photo>>,
        _photo_file: &Path,
        _params: Params,
    ) -> Result<Photo> {
        Err(Error::NotImplemented("photo replace".to_string()))
    }

    /// Endpoint: /photo/<id>/replace.json (not supported by this client yet)
    pub fn replace_encoded<'r>(
        &self,
        _photo: impl Into<Reference<'r, Photo>>,
        _photo_file: &Path,
        _params: Params,
    ) -> Result<Photo> {
        Err(Error::NotImplemented("photo replace_encoded".to_string()))
    }

    /// Endpoint: /photo/<id>/update.json
    ///
    /// Returns the updated photo.
    pub fn update<'r>(&self, photo: impl Into<Reference<'r, Photo>>, params: Params) -> Result<Photo> {
        let id = photo.into().id().to_string();
        let envelope = self
            .client
            .post(&format!("/photo/{}/update.json", id), params)?;
        Photo::from_value(self.client.clone(), envelope.result)
    }

    // TODO: support size options (100x100 and friends) as extra path segments
    /// Endpoint: /photo/<id>/view.json
    pub fn view<'r>(&self, photo: impl Into<Reference<'r, Photo>>, params: Params) -> Result<Photo> {
        let id = photo.into().id().to_string();
        let envelope = self
            .client
            .get(&format!("/photo/{}/view.json", id), params)?;
        Photo::from_value(self.client.clone(), envelope.result)
    }

    /// Endpoint: /photo/upload.json
    ///
    /// Sends the file as a multipart part named `photo`. The request
    /// parameters travel in the query string so they stay signed.
    pub fn upload(&self, photo_file: &Path, params: Params) -> Result<Photo> {
        let mut files = BTreeMap::new();
        files.insert("photo".to_string(), photo_file.to_path_buf());
        let envelope = self.client.post_files("/photo/upload.json", params, &files)?;
        Photo::from_value(self.client.clone(), envelope.result)
    }

    /// Endpoint: /photo/upload.json
    ///
    /// Base64-encodes the file into the `photo` form parameter instead of
    /// sending a multipart body.
    pub fn upload_encoded(&self, photo_file: &Path, params: Params) -> Result<Photo> {
        let contents = std::fs::read(photo_file)?;
        let params = params.set("photo", STANDARD.encode(contents));
        let envelope = self.client.post("/photo/upload.json", params)?;
        Photo::from_value(self.client.clone(), envelope.result)
    }

    /// Endpoint: /photo/<id>/dynamicUrl.json (not supported by this client yet)
    pub fn dynamic_url<'r>(
        &self,
        _photo: impl Into<Reference<'r, Photo>>,
        _params: Params,
    ) -> Result<String> {
        Err(Error::NotImplemented("photo dynamic_url".to_string()))
    }

    /// Endpoint: /photo/<id>/nextprevious.json
    ///
    /// Returns the photos adjacent to the given one in the stream.
    pub fn next_previous<'r>(
        &self,
        photo: impl Into<Reference<'r, Photo>>,
        params: Params,
    ) -> Result<NextPrevious> {
        let id = photo.into().id().to_string();
        let envelope = self
            .client
            .get(&format!("/photo/{}/nextprevious.json", id), params)?;

        let mut adjacent = NextPrevious::default();
        if let Some(next) = envelope.result.get("next") {
            adjacent.next = self.photo_list(next.clone())?;
        }
        if let Some(previous) = envelope.result.get("previous") {
            adjacent.previous = self.photo_list(previous.clone())?;
        }
        Ok(adjacent)
    }

    /// Endpoint: /photo/<id>/transform.json
    ///
    /// Some servers answer a bare `true` instead of the transformed
    /// photo; in that case the photo is fetched again.
    pub fn transform<'r>(
        &self,
        photo: impl Into<Reference<'r, Photo>>,
        params: Params,
    ) -> Result<Photo> {
        let id = photo.into().id().to_string();
        let envelope = self
            .client
            .post(&format!("/photo/{}/transform.json", id), params)?;
        match envelope.result {
            Value::Object(_) => Photo::from_value(self.client.clone(), envelope.result),
            _ => self.view(id.as_str(), Params::new()),
        }
    }

    /// Older API versions return a single object where newer ones return
    /// a list
    fn photo_list(&self, value: Value) -> Result<Vec<Photo>> {
        let items = match value {
            Value::Array(items) => items,
            other => vec![other],
        };
        items
            .into_iter()
            .map(|item| Photo::from_value(self.client.clone(), item))
            .collect()
    }
}
