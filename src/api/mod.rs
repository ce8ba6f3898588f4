//! Endpoint modules: thin facades that map resource operations onto
//! dispatcher calls and wrap the results into typed objects.

mod action;
mod activity;
mod album;
mod photo;
mod system;
mod tag;

pub use action::ApiAction;
pub use activity::{ApiActivities, ApiActivity};
pub use album::{ApiAlbum, ApiAlbums};
pub use photo::{ApiPhoto, ApiPhotos};
pub use system::ApiSystem;
pub use tag::{ApiTag, ApiTags};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::params::Params;
use crate::response::Envelope;

/// Render filter parameters as `<name>-<value>/` path segments for the
/// filterable list endpoints. Segments come out in name order.
pub(crate) fn filter_segments(filters: &Params) -> String {
    let mut segments = String::new();
    for (name, value) in filters.iter() {
        segments.push_str(name);
        segments.push('-');
        segments.push_str(&value.to_wire());
        segments.push('/');
    }
    segments
}

/// Boolean-result endpoints answer `true` on success. A `false` result is
/// a failure the server chose not to raise, so it becomes an error here.
pub(crate) fn require_true(envelope: &Envelope, operation: &str) -> Result<bool> {
    if truthy(&envelope.result) {
        Ok(true)
    } else {
        Err(Error::Api {
            code: envelope.code,
            message: format!("{} response returned false", operation),
        })
    }
}

pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(boolean) => *boolean,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}
