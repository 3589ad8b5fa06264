//! Session endpoints. These use raw status codes, bypass the payload envelope and never refresh.

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::client::JSON_CONTENT_TYPE;
use crate::error::Result;
use crate::models::Login;
use crate::session::{KlukkaApi, Navigator};

impl<N: Navigator> KlukkaApi<N> {
    /// Posts credentials; the backend answers with a session cookie on success.
    pub async fn login(&self, login: &Login) -> Result<bool> {
        let client = self.client();
        let response = client
            .http()
            .post(client.endpoint("login"))
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(login)
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, "login rejected");
        }
        Ok(status == StatusCode::OK)
    }

    /// Ends the session and sends the user to the login entry point.
    pub async fn logout(&self) -> Result<bool> {
        let client = self.client();
        let response = client
            .http()
            .post(client.endpoint("logout"))
            .body("")
            .send()
            .await?;
        if response.status().is_success() {
            debug!("logged out");
            self.navigator().to_login();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Checks whether the current session cookie is still accepted.
    pub async fn validate(&self) -> Result<bool> {
        let client = self.client();
        let response = client
            .http()
            .get(client.endpoint("validate"))
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .send()
            .await?;
        Ok(response.status() == StatusCode::OK)
    }
}
