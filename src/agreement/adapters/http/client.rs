//! `reqwest` implementation of the gateway and authentication ports.

use super::disposition;
use crate::agreement::domain::{
    ActorRole, Agreement, AgreementId, AgreementPage, ListEnvelope, MutationRequest, PageRequest,
};
use crate::agreement::ports::{AgreementDocument, AgreementGateway, GatewayError, GatewayResult};
use crate::config::{ApiPaths, ClientConfig};
use crate::session::{AuthGateway, Credentials, LoginResponse, Session};
use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Gateway speaking the backend's JSON contract over HTTP.
///
/// Every request carries the session's bearer token. Responses are never
/// cached.
#[derive(Debug, Clone)]
pub struct HttpAgreementGateway {
    client: Client,
    base_url: String,
    paths: ApiPaths,
}

/// Error body shape used by the backend.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl HttpAgreementGateway {
    /// Builds a gateway from client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(GatewayError::network)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            paths: config.paths.clone(),
        })
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn agreement_url(&self, id: AgreementId, suffix: Option<&str>) -> String {
        let root = self.paths.agreement_root.trim_end_matches('/');
        suffix.map_or_else(
            || self.url(&format!("{root}/{id}")),
            |segment| self.url(&format!("{root}/{id}/{segment}")),
        )
    }

    async fn list(
        &self,
        session: &Session,
        path: &str,
        page: PageRequest,
    ) -> GatewayResult<AgreementPage> {
        let request = self
            .client
            .get(self.url(path))
            .bearer_auth(session.token())
            .query(&[
                ("page", page.page().to_string()),
                ("size", page.size().to_string()),
                ("sort", page.sort().as_query().to_owned()),
            ]);
        let envelope: ListEnvelope = Self::send_json(request, path).await?;
        let decoded = AgreementPage::from(envelope);
        tracing::debug!(
            path,
            role = %session.role(),
            returned = decoded.agreements().len(),
            total = decoded.total_elements(),
            "agreement list fetched"
        );
        Ok(decoded)
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder, path: &str) -> GatewayResult<T> {
        let response = Self::send(request, path).await?;
        let bytes = response.bytes().await.map_err(GatewayError::network)?;
        serde_json::from_slice(&bytes).map_err(|err| {
            tracing::warn!(path, error = %err, "undecodable response body");
            GatewayError::decode(err)
        })
    }

    async fn send(request: RequestBuilder, path: &str) -> GatewayResult<Response> {
        let response = request.send().await.map_err(|err| {
            tracing::warn!(path, error = %err, "request failed without a response");
            GatewayError::network(err)
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body, status.canonical_reason());
        tracing::warn!(path, status = status.as_u16(), %message, "backend refused request");
        Err(GatewayError::from_status(status.as_u16(), message))
    }
}

fn error_message(body: &str, fallback: Option<&str>) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message.or(parsed.error))
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        })
        .unwrap_or_else(|| fallback.unwrap_or("request failed").to_owned())
}

#[async_trait]
impl AgreementGateway for HttpAgreementGateway {
    async fn fetch_pending(
        &self,
        session: &Session,
        page: PageRequest,
    ) -> GatewayResult<AgreementPage> {
        let path = match session.role() {
            ActorRole::Faculty => &self.paths.faculty_pending,
            ActorRole::Admin => &self.paths.admin_pending,
            role @ (ActorRole::Student | ActorRole::Company) => {
                return Err(GatewayError::NoPendingQueue(role));
            }
        };
        self.list(session, path, page).await
    }

    async fn fetch_for_actor(
        &self,
        session: &Session,
        page: PageRequest,
    ) -> GatewayResult<AgreementPage> {
        self.list(session, &self.paths.actor_agreements, page).await
    }

    async fn fetch_all(
        &self,
        session: &Session,
        page: PageRequest,
    ) -> GatewayResult<AgreementPage> {
        self.list(session, &self.paths.admin_agreements, page).await
    }

    async fn fetch_by_id(&self, session: &Session, id: AgreementId) -> GatewayResult<Agreement> {
        let url = self.agreement_url(id, None);
        let request = self.client.get(&url).bearer_auth(session.token());
        Self::send_json(request, &url).await
    }

    async fn mutate(
        &self,
        session: &Session,
        id: AgreementId,
        request: &MutationRequest,
    ) -> GatewayResult<Agreement> {
        let action = request.action();
        let url = self.agreement_url(id, Some(action.endpoint_segment()));
        tracing::info!(
            agreement_id = %id,
            role = %session.role(),
            %action,
            "submitting agreement mutation"
        );
        let builder = self
            .client
            .put(&url)
            .bearer_auth(session.token())
            .json(request.payload());
        Self::send_json(builder, &url).await
    }

    async fn fetch_pdf(
        &self,
        session: &Session,
        id: AgreementId,
    ) -> GatewayResult<AgreementDocument> {
        let url = self.agreement_url(id, Some("pdf"));
        let builder = self
            .client
            .get(&url)
            .bearer_auth(session.token())
            .header(reqwest::header::ACCEPT, PDF_CONTENT_TYPE);
        let response = Self::send(builder, &url).await?;
        let headers = response.headers();
        let file_name = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(disposition::file_name)
            .unwrap_or_else(|| AgreementDocument::default_file_name(id));
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(PDF_CONTENT_TYPE)
            .to_owned();
        let bytes = response.bytes().await.map_err(GatewayError::network)?;
        tracing::debug!(agreement_id = %id, size = bytes.len(), %file_name, "document fetched");
        Ok(AgreementDocument {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

#[async_trait]
impl AuthGateway for HttpAgreementGateway {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<Session> {
        let url = self.url(&self.paths.login);
        let request = self.client.post(&url).json(credentials);
        let response: LoginResponse = Self::send_json(request, &url).await?;
        Ok(Session::from(response))
    }
}
