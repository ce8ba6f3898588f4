use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{require_true, truthy};
use crate::client::Client;
use crate::error::Result;
use crate::objects::{Reference, Tag};
use crate::params::Params;
use crate::response::result_to_list;

/// Tag ids are the tag text itself and may contain spaces or punctuation,
/// so they get percent-encoded when they appear as a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode_segment(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT).to_string()
}

/// Endpoints acting on tag collections
pub struct ApiTags<'a> {
    client: &'a Client,
}

impl<'a> ApiTags<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        ApiTags { client }
    }

    /// Endpoint: /tags/list.json
    pub fn list(&self, params: Params) -> Result<Vec<Tag>> {
        let envelope = self.client.get("/tags/list.json", params)?;
        result_to_list(envelope.result)
            .into_iter()
            .map(|item| Tag::from_value(self.client.clone(), item))
            .collect()
    }
}

/// Endpoints acting on a single tag
pub struct ApiTag<'a> {
    client: &'a Client,
}

impl<'a> ApiTag<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        ApiTag { client }
    }

    /// Endpoint: /tag/create.json
    ///
    /// The server answers `true` when the tag was created. Unlike the
    /// delete endpoints, a `false` answer is passed through rather than
    /// raised.
    pub fn create(&self, tag: &str, params: Params) -> Result<bool> {
        let params = params.set("tag", tag);
        let envelope = self.client.post("/tag/create.json", params)?;
        Ok(truthy(&envelope.result))
    }

    /// Endpoint: /tag/<id>/delete.json
    pub fn delete<'r>(&self, tag: impl Into<Reference<'r, Tag>>, params: Params) -> Result<bool> {
        let id = encode_segment(tag.into().id());
        let envelope = self
            .client
            .post(&format!("/tag/{}/delete.json", id), params)?;
        require_true(&envelope, "delete")
    }

    /// Endpoint: /tag/<id>/update.json
    ///
    /// Returns the updated tag.
    pub fn update<'r>(&self, tag: impl Into<Reference<'r, Tag>>, params: Params) -> Result<Tag> {
        let id = encode_segment(tag.into().id());
        let envelope = self
            .client
            .post(&format!("/tag/{}/update.json", id), params)?;
        Tag::from_value(self.client.clone(), envelope.result)
    }
}
