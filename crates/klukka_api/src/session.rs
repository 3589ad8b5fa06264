//! Auth guard: owns the redirect-to-login policy on top of [`KlukkaClient`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::client::{KlukkaClient, Outcome};
use crate::error::{ApiError, Result};

/// Takes the user to the login entry point once the session cannot be recovered.
pub trait Navigator: Send + Sync {
    fn to_login(&self);
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn to_login(&self) {
        (**self).to_login()
    }
}

/// Navigator that only records the expired session in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn to_login(&self) {
        warn!("session expired, login required");
    }
}

/// Adapts a closure into a [`Navigator`].
pub struct FnNavigator<F>(pub F);

impl<F> Navigator for FnNavigator<F>
where
    F: Fn() + Send + Sync,
{
    fn to_login(&self) {
        (self.0)()
    }
}

/// Typed Klukka API.
///
/// Application failures resolve to empty results; an unrecoverable 401 redirects and errors.
pub struct KlukkaApi<N = LogNavigator> {
    client: KlukkaClient,
    navigator: Arc<N>,
}

impl<N> Clone for KlukkaApi<N> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            navigator: self.navigator.clone(),
        }
    }
}

impl<N: Navigator> KlukkaApi<N> {
    pub fn new(client: KlukkaClient, navigator: N) -> Self {
        Self {
            client,
            navigator: Arc::new(navigator),
        }
    }

    pub fn client(&self) -> &KlukkaClient {
        &self.client
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Maps an outcome to a payload, invoking the navigator when the session is gone.
    pub fn resolve<T>(&self, outcome: Outcome<T>) -> Result<Option<T>> {
        match outcome {
            Outcome::Success(payload) => Ok(payload),
            Outcome::Rejected(_) => Ok(None),
            Outcome::Unauthorized => {
                self.navigator.to_login();
                Err(ApiError::SessionExpired)
            }
        }
    }

    pub async fn get_payload<T>(&self, path: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let outcome = self.client.get(path).await?;
        self.resolve(outcome)
    }

    pub async fn post_payload<B, T>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let outcome = self.client.post(path, body).await?;
        self.resolve(outcome)
    }

    pub(crate) async fn post_flag<B>(&self, path: &str, body: &B) -> Result<bool>
    where
        B: Serialize + ?Sized,
    {
        Ok(self.post_payload::<B, bool>(path, body).await?.unwrap_or(false))
    }
}
