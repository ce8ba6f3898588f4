use serde_json::{Map, Value};

use crate::client::Client;

/// State shared by every live object: the owning client plus the field map
/// from the most recent server snapshot.
///
/// The field map is the single source of truth. `id` and `name` are
/// projections of the corresponding entries, never stored separately, so
/// the two can't drift apart.
#[derive(Debug, Clone)]
pub struct Record {
    client: Client,
    fields: Map<String, Value>,
}

impl Record {
    pub(crate) fn new(client: Client, fields: Map<String, Value>) -> Self {
        Record { client, fields }
    }

    /// Synthetic record carrying only an id, for id-or-object call sites
    pub(crate) fn from_id(client: Client, id: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::String(id.to_string()));
        Record { client, fields }
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// The `id` field, when present
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    /// Owned copy of the id, empty when unset (for endpoint path building)
    pub(crate) fn id_or_empty(&self) -> String {
        self.id().unwrap_or_default().to_string()
    }

    /// The `name` field, when present
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Every field from the most recent server snapshot
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Look up a single field by name
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Swap the entire field set for a fresh server snapshot.
    ///
    /// The replacement is total: previous entries never survive, partial
    /// merges do not exist.
    pub(crate) fn replace_fields(&mut self, fields: Map<String, Value>) {
        self.fields = fields;
    }

    /// Drop every field, id and name included. Used only after the server
    /// has confirmed a delete.
    pub(crate) fn clear_fields(&mut self) {
        self.fields = Map::new();
    }

    pub(crate) fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

/// Behavior shared by every server-backed object type
pub trait Resource {
    /// REST type tag, as used in endpoint paths (for example `photo`)
    const KIND: &'static str;

    /// Backing record
    fn record(&self) -> &Record;

    /// Mutable backing record
    fn record_mut(&mut self) -> &mut Record;

    /// The object's id, when known
    fn id(&self) -> Option<&str> {
        self.record().id()
    }

    /// The object's display name, when known
    fn name(&self) -> Option<&str> {
        self.record().name()
    }

    /// Every field from the most recent server snapshot
    fn fields(&self) -> &Map<String, Value> {
        self.record().fields()
    }

    /// Look up a single field by name
    fn field(&self, key: &str) -> Option<&Value> {
        self.record().field(key)
    }
}

/// An argument that is either a bare id or a live object.
///
/// Endpoint methods take `impl Into<Reference<T>>` so callers can pass
/// `"1a"` and `&photo` interchangeably; both produce the same request.
#[derive(Debug, Clone, Copy)]
pub enum Reference<'a, T> {
    /// A bare id
    Id(&'a str),
    /// A live object, resolved through its id
    Object(&'a T),
}

impl<'a, T: Resource> Reference<'a, T> {
    /// Resolve to the bare id (empty for an id-less object)
    pub fn id(&self) -> &'a str {
        match *self {
            Reference::Id(id) => id,
            Reference::Object(object) => object.id().unwrap_or_default(),
        }
    }
}

impl<'a, T> From<&'a str> for Reference<'a, T> {
    fn from(id: &'a str) -> Self {
        Reference::Id(id)
    }
}

impl<'a, T> From<&'a String> for Reference<'a, T> {
    fn from(id: &'a String) -> Self {
        Reference::Id(id)
    }
}

/// Comma-join the ids extracted from a sequence of ids or objects
pub(crate) fn join_ids<'a, T, I>(items: I) -> String
where
    T: Resource + 'a,
    I: IntoIterator,
    I::Item: Into<Reference<'a, T>>,
{
    items
        .into_iter()
        .map(|item| item.into().id().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Wire a concrete object type into the shared record machinery: the
/// [`Resource`] impl plus the reference and parameter conversions.
macro_rules! impl_resource {
    ($type:ty, $kind:literal) => {
        impl crate::objects::Resource for $type {
            const KIND: &'static str = $kind;

            fn record(&self) -> &crate::objects::Record {
                &self.record
            }

            fn record_mut(&mut self) -> &mut crate::objects::Record {
                &mut self.record
            }
        }

        impl<'a> From<&'a $type> for crate::objects::Reference<'a, $type> {
            fn from(object: &'a $type) -> Self {
                crate::objects::Reference::Object(object)
            }
        }

        impl<'a> From<&'a $type> for crate::params::ParamValue {
            fn from(object: &'a $type) -> Self {
                crate::params::ParamValue::Record(
                    crate::objects::Resource::id(object).map(String::from),
                )
            }
        }
    };
}

pub(crate) use impl_resource;
