//! Typed views over the JSON objects the service returns.
//!
//! Every object keeps the raw field map from its most recent server
//! snapshot and exposes `id`/`name` as projections of it. Mutating
//! methods go through the endpoint modules and then refresh the fields
//! from the server's answer, so a live object never drifts from what the
//! server last said: updates replace the whole map, deletes clear it.

mod action;
mod activity;
mod album;
mod photo;
mod record;
mod tag;

pub use action::Action;
pub use activity::Activity;
pub use album::Album;
pub use photo::{NextPrevious, Photo};
pub use record::{Record, Reference, Resource};
pub use tag::Tag;

pub(crate) use record::join_ids;
