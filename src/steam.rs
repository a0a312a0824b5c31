// thin client over the two Steam Web API endpoints we proxy
// https://partner.steamgames.com/doc/webapi/ISteamUser#ResolveVanityURL
// https://partner.steamgames.com/doc/webapi/IPlayerService#GetOwnedGames

use std::{sync::Arc, time::Duration};

use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{OwnedGamesResponse, ResolveVanityResponse};

#[derive(Debug, Error)]
pub enum SteamError {
    #[error("request failed: {0}")]
    Http(reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(StatusCode),
    #[error("invalid response: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SteamError {
    fn from(error: reqwest::Error) -> Self {
        // the request url carries the api key
        SteamError::Http(error.without_url())
    }
}

#[derive(Clone, Debug)]
pub struct SteamClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl SteamClient {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').into(),
        })
    }

    pub async fn resolve_vanity_url(
        &self,
        key: &str,
        vanity: &str,
    ) -> Result<ResolveVanityResponse, SteamError> {
        let request = self
            .http
            .get(format!("{}/ISteamUser/ResolveVanityURL/v1", self.base_url))
            .query(&[("key", key), ("vanityurl", vanity)]);

        send_request(request).await
    }

    pub async fn get_owned_games(
        &self,
        key: &str,
        steamid: &str,
    ) -> Result<OwnedGamesResponse, SteamError> {
        let request = self
            .http
            .get(format!("{}/IPlayerService/GetOwnedGames/v0001/", self.base_url))
            .query(&[
                ("key", key),
                ("steamid", steamid),
                ("format", "json"),
                ("include_appinfo", "true"),
                ("include_played_free_games", "true"),
            ]);

        send_request(request).await
    }
}

/// Send the request and unwrap Steam's `{ "response": ... }` envelope.
async fn send_request<T>(request: reqwest::RequestBuilder) -> Result<T, SteamError>
where
    T: DeserializeOwned,
{
    #[derive(serde::Deserialize)]
    struct Envelope<T> {
        response: T,
    }

    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SteamError::Status(status));
    }

    let body = response.bytes().await?;
    let Envelope { response } = serde_json::from_slice::<Envelope<T>>(&body)?;

    Ok(response)
}

/// Whether `value` is one or more ASCII digits, i.e. already looks like a SteamID64.
pub fn is_numeric_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id() {
        assert!(is_numeric_id("76561197960287930"));
        assert!(is_numeric_id("0"));
        assert!(!is_numeric_id(""));
        assert!(!is_numeric_id("gabelogannewell"));
        assert!(!is_numeric_id("7656119796028793a"));
        assert!(!is_numeric_id("-1"));
        assert!(!is_numeric_id("１２３"));
    }

    #[test]
    fn test_error_messages() {
        let err = SteamError::Status(StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "unexpected status: 403 Forbidden");

        let err: SteamError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(err, SteamError::Deserialize(_)));
        assert!(err.to_string().starts_with("invalid response: "));
    }

    #[tokio::test]
    async fn test_transport_error_hides_key() {
        // nothing listens there anymore
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SteamClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        let err = client
            .resolve_vanity_url("SUPERSECRETKEY", "gabelogannewell")
            .await
            .unwrap_err();

        assert!(matches!(err, SteamError::Http(_)));
        assert!(err.to_string().starts_with("request failed: "));
        assert!(!err.to_string().contains("SUPERSECRETKEY"));
        assert!(!format!("{:?}", err).contains("SUPERSECRETKEY"));
    }

    #[test]
    fn test_base_url_trimmed() {
        let client = SteamClient::new("http://localhost:1234/", Duration::from_secs(1)).unwrap();
        assert_eq!(&*client.base_url, "http://localhost:1234");
    }
}
