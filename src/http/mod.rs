//! HTTP plumbing shared by every domain service.

pub mod bearer;

pub use bearer::BearerAuthLayer;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tower::{Layer, ServiceExt};
use tracing::Instrument;
use uuid::Uuid;

use crate::session::Session;
use crate::utils::error::ClientError;
use crate::utils::response::Envelope;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Credentials {
    Bearer,
    Anonymous,
}

/// Sends JSON requests to the API base URL and hands back the decoded
/// envelope. Non-2xx statuses become errors here so the services only deal
/// with envelopes that arrived on a successful response.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ticketing-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn get<T>(&self, path: &str) -> Result<Envelope<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        self.send(Method::GET, path, self.http.get(self.url(path)), Credentials::Bearer)
            .await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<Envelope<T>, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.http.get(self.url(path)).query(query);
        self.send(Method::GET, path, builder, Credentials::Bearer)
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<Envelope<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.http.post(self.url(path)).json(body);
        self.send(Method::POST, path, builder, Credentials::Bearer)
            .await
    }

    /// Posts without the stored token. Used for the credential exchanges,
    /// where a 401 means the submitted password was wrong and must not end
    /// the current session.
    pub async fn post_anonymous<B, T>(&self, path: &str, body: &B) -> Result<Envelope<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.http.post(self.url(path)).json(body);
        self.send(Method::POST, path, builder, Credentials::Anonymous)
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
        credentials: Credentials,
    ) -> Result<Envelope<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!("api_request", %method, path, %request_id);

        async move {
            let request = builder
                .header(REQUEST_ID_HEADER, request_id.to_string())
                .build()?;

            let response = match credentials {
                Credentials::Bearer => {
                    BearerAuthLayer::new(self.session.clone())
                        .layer(self.http.clone())
                        .oneshot(request)
                        .await?
                }
                Credentials::Anonymous => self.http.execute(request).await?,
            };

            let status = response.status();
            let body = response.bytes().await?;
            tracing::debug!(status = status.as_u16(), bytes = body.len(), "Response received");

            if status.is_success() {
                serde_json::from_slice::<Envelope<T>>(&body)
                    .map_err(|e| ClientError::Decode(e.to_string()))
            } else {
                let message = serde_json::from_slice::<Envelope<serde_json::Value>>(&body)
                    .ok()
                    .and_then(|envelope| envelope.error);
                Err(ClientError::from_status(status, message))
            }
        }
        .instrument(span)
        .await
    }
}
