//! # shutterbox - photo service API client
//!
//! A Rust client for self-hosted photo services speaking the
//! JSON-envelope REST protocol. It signs requests with OAuth1, wraps the
//! returned payloads into typed objects and keeps those objects in sync
//! with the server as they are updated or deleted.
//!
//! ## Features
//!
//! - OAuth1 (HMAC-SHA1) request signing using the Authorization header
//! - Envelope-aware response handling: the embedded `code` outranks the
//!   HTTP status line
//! - Typed photo, tag, album, action and activity objects that mirror
//!   their most recent server snapshot
//! - Id-or-object arguments on every endpoint that takes a resource
//! - Multipart and base64 photo uploads
//! - Configuration profiles shared with existing command line tooling
//!
//! ## Basic Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use shutterbox::{Client, Params, Resource};
//!
//! fn main() -> shutterbox::Result<()> {
//!     // Reads the `default` configuration profile
//!     let client = Client::from_config(None)?;
//!
//!     // List the five most recent photos tagged "sunset"
//!     let photos = client.photos().list(
//!         Params::new().set("tags", "sunset"),
//!         Params::new().set("pageSize", 5),
//!     )?;
//!     for photo in &photos {
//!         println!("{}: {}", photo.id().unwrap_or("?"), photo.name().unwrap_or(""));
//!     }
//!
//!     // Upload a new photo
//!     let uploaded = client
//!         .photo()
//!         .upload(Path::new("vacation.jpg"), Params::new().set("title", "Vacation"))?;
//!     println!("uploaded photo {:?}", uploaded.id());
//!     Ok(())
//! }
//! ```
//!
//! ## Authentication
//!
//! ```no_run
//! use shutterbox::{Client, Credentials};
//!
//! let client = Client::with_credentials(
//!     "https://photos.example.com",
//!     Credentials::new("consumer_key", "consumer_secret", "token", "token_secret"),
//! );
//! ```
//!
//! Unauthenticated clients can read public endpoints; anything that
//! writes needs credentials and fails up front without them.

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod oauth;
pub mod objects;
pub mod params;
pub mod response;

// Re-export main types for convenience
pub use auth::{Auth, Credentials};
pub use client::{Client, ClientConfig, Exchange, RawResponse};
pub use error::{Error, Result};
pub use objects::{
    Action, Activity, Album, NextPrevious, Photo, Record, Reference, Resource, Tag,
};
pub use params::{ParamValue, Params};
pub use response::{result_to_list, Envelope};

// Re-export the JSON value type since it appears throughout the API
pub use serde_json::Value;
