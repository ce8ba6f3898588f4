use super::require_true;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::objects::{join_ids, Album, Photo, Reference};
use crate::params::Params;
use crate::response::result_to_list;

/// Endpoints acting on album collections
pub struct ApiAlbums<'a> {
    client: &'a Client,
}

impl<'a> ApiAlbums<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        ApiAlbums { client }
    }

    /// Endpoint: /albums/list.json
    pub fn list(&self, params: Params) -> Result<Vec<Album>> {
        let envelope = self.client.get("/albums/list.json", params)?;
        result_to_list(envelope.result)
            .into_iter()
            .map(|item| Album::from_value(self.client.clone(), item))
            .collect()
    }
}

/// Endpoints acting on a single album
pub struct ApiAlbum<'a> {
    client: &'a Client,
}

impl<'a> ApiAlbum<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        ApiAlbum { client }
    }

    /// Endpoint: /album/create.json
    pub fn create(&self, name: &str, params: Params) -> Result<Album> {
        let params = params.set("name", name);
        let envelope = self.client.post("/album/create.json", params)?;
        Album::from_value(self.client.clone(), envelope.result)
    }

    /// Endpoint: /album/<id>/delete.json
    pub fn delete<'r>(&self, album: impl Into<Reference<'r, Album>>, params: Params) -> Result<bool> {
        let id = album.into().id().to_string();
        let envelope = self
            .client
            .post(&format!("/album/{}/delete.json", id), params)?;
        require_true(&envelope, "delete")
    }

    /// Endpoint: /album/<id>/edit.json (not supported by this client yet)
    pub fn form<'r>(
        &self,
        _album: impl Into<Reference<'r, Album>>,
        _params: Params,
    ) -> Result<String> {
        Err(Error::NotImplemented("album form".to_string()))
    }

    /// Endpoint: /album/<id>/photo/add.json
    ///
    /// Returns the updated album.
    pub fn add_photos<'r, 'p, I>(
        &self,
        album: impl Into<Reference<'r, Album>>,
        photos: I,
        params: Params,
    ) -> Result<Album>
    where
        I: IntoIterator,
        I::Item: Into<Reference<'p, Photo>>,
    {
        self.modify_photos(album, photos, params, "add")
    }

    /// Endpoint: /album/<id>/photo/remove.json
    ///
    /// Returns the updated album.
    pub fn remove_photos<'r, 'p, I>(
        &self,
        album: impl Into<Reference<'r, Album>>,
        photos: I,
        params: Params,
    ) -> Result<Album>
    where
        I: IntoIterator,
        I::Item: Into<Reference<'p, Photo>>,
    {
        self.modify_photos(album, photos, params, "remove")
    }

    fn modify_photos<'r, 'p, I>(
        &self,
        album: impl Into<Reference<'r, Album>>,
        photos: I,
        params: Params,
        operation: &str,
    ) -> Result<Album>
    where
        I: IntoIterator,
        I::Item: Into<Reference<'p, Photo>>,
    {
        let id = album.into().id().to_string();
        let params = params.set("ids", join_ids(photos));
        let endpoint = format!("/album/{}/photo/{}.json", id, operation);
        let envelope = self.client.post(&endpoint, params)?;
        Album::from_value(self.client.clone(), envelope.result)
    }

    /// Endpoint: /album/<album_id>/cover/<photo_id>/update.json
    ///
    /// Makes the given photo the album's cover and returns the updated
    /// album.
    pub fn cover_update<'r, 'p>(
        &self,
        album: impl Into<Reference<'r, Album>>,
        photo: impl Into<Reference<'p, Photo>>,
        params: Params,
    ) -> Result<Album> {
        let album_id = album.into().id().to_string();
        let photo_id = photo.into().id().to_string();
        let endpoint = format!("/album/{}/cover/{}/update.json", album_id, photo_id);
        let envelope = self.client.post(&endpoint, params)?;
        Album::from_value(self.client.clone(), envelope.result)
    }

    /// Endpoint: /album/<id>/update.json
    ///
    /// Some servers answer a bare `true` instead of the updated album; in
    /// that case the album is fetched again.
    pub fn update<'r>(&self, album: impl Into<Reference<'r, Album>>, params: Params) -> Result<Album> {
        let id = album.into().id().to_string();
        let envelope = self
            .client
            .post(&format!("/album/{}/update.json", id), params)?;
        match envelope.result {
            serde_json::Value::Object(_) => Album::from_value(self.client.clone(), envelope.result),
            _ => self.view(id.as_str(), Params::new()),
        }
    }

    /// Endpoint: /album/<id>/view.json
    pub fn view<'r>(&self, album: impl Into<Reference<'r, Album>>, params: Params) -> Result<Album> {
        let id = album.into().id().to_string();
        let envelope = self
            .client
            .get(&format!("/album/{}/view.json", id), params)?;
        Album::from_value(self.client.clone(), envelope.result)
    }
}
