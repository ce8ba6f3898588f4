//! HTTP dispatcher: URL construction, OAuth1 signing, envelope handling
//! and last-request introspection.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use reqwest::blocking::multipart::Form;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use tracing::{debug, trace};
use url::Url;

use crate::api::{
    ApiAction, ApiActivities, ApiActivity, ApiAlbum, ApiAlbums, ApiPhoto, ApiPhotos, ApiSystem,
    ApiTag, ApiTags,
};
use crate::auth::{Auth, Credentials};
use crate::error::{Error, Result};
use crate::oauth::Signer;
use crate::params::Params;
use crate::response::{self, Envelope};

/// Traced response bodies are capped so huge photo lists stay readable
const TRACE_BODY_LIMIT: usize = 1000;

/// Client-level knobs independent of authentication
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API version inserted into endpoint paths as `/v<N>`, when set
    pub api_version: Option<u32>,
    /// Verify TLS certificates (on by default)
    pub ssl_verify: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_version: None,
            ssl_verify: true,
        }
    }
}

/// Raw transport outcome of a request
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Snapshot of the most recent request and its raw response
#[derive(Debug, Clone)]
pub struct Exchange {
    /// Requested URL, query string excluded
    pub url: String,
    /// Parameters sent with the request
    pub params: BTreeMap<String, String>,
    /// What came back
    pub response: RawResponse,
}

/// Client for a photo service host.
///
/// Cloning is cheap; clones share their connection pool and last-exchange
/// state.
#[derive(Clone)]
pub struct Client {
    http: reqwest::blocking::Client,
    auth: Auth,
    signer: Option<Signer>,
    config: ClientConfig,
    last: Arc<Mutex<Option<Exchange>>>,
}

/// Create the HTTP client with settings for connection pooling and
/// upload-friendly timeouts
fn create_http_client(config: &ClientConfig) -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .pool_max_idle_per_host(50)
        .timeout(Duration::from_secs(300)) // 5 minutes, uploads included
        .connect_timeout(Duration::from_secs(10))
        .danger_accept_invalid_certs(!config.ssl_verify)
        .build()
        .expect("Failed to create HTTP client")
}

impl Client {
    /// Create an unauthenticated client for the given host.
    ///
    /// Only GET endpoints work without credentials; POSTs fail up front.
    pub fn new(host: &str) -> Self {
        Self::build(Auth::for_host(host, None), ClientConfig::default())
    }

    /// Create a client for the given host with OAuth1 credentials
    pub fn with_credentials(host: &str, credentials: Credentials) -> Self {
        Self::build(
            Auth::for_host(host, Some(credentials)),
            ClientConfig::default(),
        )
    }

    /// Create a client from a configuration profile.
    ///
    /// `config_file` names a profile in the user's configuration
    /// directory or gives a full path to a configuration file; `None`
    /// reads the `default` profile.
    pub fn from_config(config_file: Option<&str>) -> Result<Self> {
        let auth = Auth::resolve(config_file, None, None)?;
        Ok(Self::build(auth, ClientConfig::default()))
    }

    fn build(auth: Auth, config: ClientConfig) -> Self {
        let signer = auth.credentials.as_ref().map(|credentials| {
            Signer::new(
                credentials.consumer_key.clone(),
                credentials.consumer_secret.clone(),
                credentials.token.clone(),
                credentials.token_secret.clone(),
            )
        });
        Client {
            http: create_http_client(&config),
            auth,
            signer,
            config,
            last: Arc::new(Mutex::new(None)),
        }
    }

    /// Prefix every endpoint path with `/v<N>`
    pub fn with_api_version(mut self, version: u32) -> Self {
        self.config.api_version = Some(version);
        self
    }

    /// Toggle TLS certificate verification (on by default)
    pub fn with_ssl_verify(mut self, verify: bool) -> Self {
        self.config.ssl_verify = verify;
        self.http = create_http_client(&self.config);
        self
    }

    /// The host this client talks to
    pub fn host(&self) -> &str {
        &self.auth.host
    }

    /// Authentication details in use
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Client-level configuration in use
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ---- last-exchange introspection ----

    /// URL of the most recent request, query string excluded
    pub fn last_url(&self) -> Option<String> {
        self.last_lock()
            .as_ref()
            .map(|exchange| exchange.url.clone())
    }

    /// Parameters sent with the most recent request
    pub fn last_params(&self) -> Option<BTreeMap<String, String>> {
        self.last_lock()
            .as_ref()
            .map(|exchange| exchange.params.clone())
    }

    /// Raw response to the most recent request
    pub fn last_response(&self) -> Option<RawResponse> {
        self.last_lock()
            .as_ref()
            .map(|exchange| exchange.response.clone())
    }

    fn last_lock(&self) -> MutexGuard<'_, Option<Exchange>> {
        self.last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ---- endpoint module accessors ----

    /// Endpoints acting on photo collections
    pub fn photos(&self) -> ApiPhotos<'_> {
        ApiPhotos::new(self)
    }

    /// Endpoints acting on a single photo
    pub fn photo(&self) -> ApiPhoto<'_> {
        ApiPhoto::new(self)
    }

    /// Endpoints acting on tag collections
    pub fn tags(&self) -> ApiTags<'_> {
        ApiTags::new(self)
    }

    /// Endpoints acting on a single tag
    pub fn tag(&self) -> ApiTag<'_> {
        ApiTag::new(self)
    }

    /// Endpoints acting on album collections
    pub fn albums(&self) -> ApiAlbums<'_> {
        ApiAlbums::new(self)
    }

    /// Endpoints acting on a single album
    pub fn album(&self) -> ApiAlbum<'_> {
        ApiAlbum::new(self)
    }

    /// Endpoints acting on a single action
    pub fn action(&self) -> ApiAction<'_> {
        ApiAction::new(self)
    }

    /// Endpoints acting on the activity stream
    pub fn activities(&self) -> ApiActivities<'_> {
        ApiActivities::new(self)
    }

    /// Endpoints acting on a single activity
    pub fn activity(&self) -> ApiActivity<'_> {
        ApiActivity::new(self)
    }

    /// System information endpoints
    pub fn system(&self) -> ApiSystem<'_> {
        ApiSystem::new(self)
    }

    // ---- dispatch ----

    /// Issue a GET and run the response through the envelope classifier
    pub fn get(&self, endpoint: &str, params: Params) -> Result<Envelope> {
        let (status, body) = self.send_get(endpoint, &params.to_wire())?;
        response::process_response(status, &body)
    }

    /// Issue a GET and return the raw body. HTTP-level failure statuses
    /// still turn into errors.
    pub fn get_raw(&self, endpoint: &str, params: Params) -> Result<String> {
        let (status, body) = self.send_get(endpoint, &params.to_wire())?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(Error::from_status(status))
        }
    }

    /// Issue a signed form POST and run the response through the envelope
    /// classifier
    pub fn post(&self, endpoint: &str, params: Params) -> Result<Envelope> {
        let (status, body) = self.send_post(endpoint, &params.to_wire())?;
        response::process_response(status, &body)
    }

    /// Issue a signed form POST and return the raw body
    pub fn post_raw(&self, endpoint: &str, params: Params) -> Result<String> {
        let (status, body) = self.send_post(endpoint, &params.to_wire())?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(Error::from_status(status))
        }
    }

    /// Issue a signed multipart POST, attaching each named file, and run
    /// the response through the envelope classifier
    pub fn post_files(
        &self,
        endpoint: &str,
        params: Params,
        files: &BTreeMap<String, PathBuf>,
    ) -> Result<Envelope> {
        let (status, body) = self.send_post_files(endpoint, &params.to_wire(), files)?;
        response::process_response(status, &body)
    }

    /// Issue a signed multipart POST and return the raw body
    pub fn post_files_raw(
        &self,
        endpoint: &str,
        params: Params,
        files: &BTreeMap<String, PathBuf>,
    ) -> Result<String> {
        let (status, body) = self.send_post_files(endpoint, &params.to_wire(), files)?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(Error::from_status(status))
        }
    }

    fn send_get(
        &self,
        endpoint: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<(StatusCode, String)> {
        let base_url = self.construct_url(endpoint);
        let mut url = Url::parse(&base_url)?;
        for (name, value) in params {
            url.query_pairs_mut().append_pair(name, value);
        }

        let mut request = self.http.get(url);
        if let Some(signer) = &self.signer {
            request = request.header(
                AUTHORIZATION,
                signer.authorization_header("GET", &base_url, params),
            );
        }
        self.execute("GET", base_url, params, request)
    }

    fn send_post(
        &self,
        endpoint: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<(StatusCode, String)> {
        let base_url = self.construct_url(endpoint);
        // Writes require credentials; fail before any network traffic
        let signer = self.signer()?;
        let url = Url::parse(&base_url)?;

        let request = self
            .http
            .post(url)
            .header(
                AUTHORIZATION,
                signer.authorization_header("POST", &base_url, params),
            )
            .form(params);
        self.execute("POST", base_url, params, request)
    }

    fn send_post_files(
        &self,
        endpoint: &str,
        params: &BTreeMap<String, String>,
        files: &BTreeMap<String, PathBuf>,
    ) -> Result<(StatusCode, String)> {
        let base_url = self.construct_url(endpoint);
        let signer = self.signer()?;

        // Multipart bodies are not covered by the signature, so the
        // request parameters ride in the query string where they are
        let mut url = Url::parse(&base_url)?;
        for (name, value) in params {
            url.query_pairs_mut().append_pair(name, value);
        }

        let mut form = Form::new();
        for (name, path) in files {
            form = form.file(name.clone(), path)?;
        }

        let request = self
            .http
            .post(url)
            .header(
                AUTHORIZATION,
                signer.authorization_header("POST", &base_url, params),
            )
            .multipart(form);
        self.execute("POST", base_url, params, request)
    }

    fn execute(
        &self,
        method: &str,
        base_url: String,
        params: &BTreeMap<String, String>,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<(StatusCode, String)> {
        debug!("{} {}", method, base_url);
        debug!("params: {:?}", params);

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        trace!(
            "response {}: {}",
            status.as_u16(),
            truncate(&body, TRACE_BODY_LIMIT)
        );

        let mut last = self.last_lock();
        *last = Some(Exchange {
            url: base_url,
            params: params.clone(),
            response: RawResponse {
                status: status.as_u16(),
                body: body.clone(),
            },
        });

        Ok((status, body))
    }

    fn signer(&self) -> Result<&Signer> {
        self.signer.as_ref().ok_or(Error::AuthRequired)
    }

    /// Build the absolute URL for an endpoint. Hosts may carry an
    /// explicit scheme; bare hostnames default to http. A configured API
    /// version becomes a `/v<N>` path prefix.
    fn construct_url(&self, endpoint: &str) -> String {
        let (scheme, host) = match self.auth.host.split_once("://") {
            // Anything after the authority is dropped
            Some((scheme, rest)) => (scheme, rest.split('/').next().unwrap_or(rest)),
            None => ("http", self.auth.host.as_str()),
        };
        let mut path = String::new();
        if let Some(version) = self.config.api_version {
            path.push_str(&format!("/v{}", version));
        }
        if !endpoint.starts_with('/') {
            path.push('/');
        }
        path.push_str(endpoint);
        format!("{}://{}{}", scheme, host, path)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("host", &self.auth.host)
            .field("authenticated", &self.signer.is_some())
            .field("config", &self.config)
            .finish()
    }
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
