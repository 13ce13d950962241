use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared_types::{
    ApiEmail, ApiUser, ErrorResponse, FolderSelector, ListEmailsResponse, MarkAsReadRequest,
    MoveEmailRequest, ToggleStarRequest,
};
use tracing::debug;

use super::EmailBackend;
use crate::error::{MailError, Result};
use crate::model::Email;
use crate::transform::email_to_domain;

/// Backend talking to a running `bmail-api` server
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Owner identity and behavior settings configured on the server
    pub async fn fetch_user(&self) -> Result<ApiUser> {
        let response = self.client.get(self.url("/api/user")).send().await?;
        decode(response, "user").await
    }

    async fn list(&self, folder: Option<FolderSelector>) -> Result<Vec<Email>> {
        let mut request = self.client.get(self.url("/api/emails"));
        if let Some(folder) = folder {
            request = request.query(&[("folder", folder.as_str())]);
        }
        debug!("Fetching emails from {} (folder: {:?})", self.base_url, folder);

        let response: ListEmailsResponse = decode(request.send().await?, "emails").await?;
        response.emails.iter().map(email_to_domain).collect()
    }

    async fn put<B: serde::Serialize + Sync>(&self, email_id: &str, action: &str, body: &B) -> Result<Email> {
        let response = self
            .client
            .put(self.url(&format!("/api/emails/{}/{}", email_id, action)))
            .json(body)
            .send()
            .await?;
        let api_email: ApiEmail = decode(response, email_id).await?;
        email_to_domain(&api_email)
    }
}

/// Decode a success body, or turn the status into a `MailError`.
/// 404 becomes `NotFound(subject)`; any other failure becomes `Remote` with
/// the `ErrorResponse` message when the body carries one.
pub async fn decode<T: DeserializeOwned>(response: Response, subject: &str) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(MailError::NotFound(subject.to_string()));
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(MailError::Remote {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl EmailBackend for HttpBackend {
    async fn fetch_emails(&self) -> Result<Vec<Email>> {
        self.list(None).await
    }

    async fn fetch_emails_by_folder(&self, folder: FolderSelector) -> Result<Vec<Email>> {
        self.list(Some(folder)).await
    }

    async fn move_email(&self, email_id: &str, request: &MoveEmailRequest) -> Result<Email> {
        self.put(email_id, "move", request).await
    }

    async fn set_starred(&self, email_id: &str, is_starred: bool) -> Result<Email> {
        self.put(email_id, "star", &ToggleStarRequest { is_starred }).await
    }

    async fn set_read(&self, email_id: &str, is_read: bool) -> Result<Email> {
        self.put(email_id, "read", &MarkAsReadRequest { is_read }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let backend = HttpBackend::new("http://localhost:8080/").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8080");
        assert_eq!(backend.url("/api/emails"), "http://localhost:8080/api/emails");
    }
}
