//! Ocean current data fetch
//!
//! Fetches a JSON document (e.g. a Copernicus Marine currents product) over
//! HTTP(S). The body is returned as an untyped JSON value; interpreting it
//! is left to the caller.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::info;

use crate::{Result, TelexError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentsConfig {
    pub url: String,
}

impl CurrentsConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// GET `config.url` and parse the body as JSON.
///
/// Anything but `200 OK` is an [`TelexError::HttpStatus`] error.
#[tracing::instrument(name = "fetch_currents", skip(client))]
pub async fn fetch_currents(client: &Client, config: &CurrentsConfig) -> Result<Value> {
    info!("Fetching currents from: {}", config.url);

    let response = client.get(&config.url).send().await?;

    if response.status() != StatusCode::OK {
        return Err(TelexError::http_status(
            &config.url,
            response.status().as_u16(),
        ));
    }

    // a body that is not JSON surfaces as a decode error, i.e. Parse
    Ok(response.json::<Value>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http;
    use axum::Router;
    use axum::routing::get;
    use serde_json::json;
    use std::net::SocketAddr;

    async fn serve(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_fetch_currents_json() {
        let router = Router::new().route(
            "/currents",
            get(|| async { axum::Json(json!({"currents": "ok"})) }),
        );
        let addr = serve(router).await;
        let client = http::client(http::DEFAULT_USER_AGENT).unwrap();

        let config = CurrentsConfig::new(format!("http://{addr}/currents"));
        let value = fetch_currents(&client, &config).await.unwrap();
        assert_eq!(value, json!({"currents": "ok"}));
    }

    #[tokio::test]
    async fn test_non_200_is_status_error() {
        let addr = serve(Router::new()).await;
        let client = http::client(http::DEFAULT_USER_AGENT).unwrap();

        let config = CurrentsConfig::new(format!("http://{addr}/missing"));
        let err = fetch_currents(&client, &config).await.unwrap_err();
        assert!(matches!(err, TelexError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_invalid_body_is_parse_error() {
        let router = Router::new().route("/currents", get(|| async { "not json" }));
        let addr = serve(router).await;
        let client = http::client(http::DEFAULT_USER_AGENT).unwrap();

        let config = CurrentsConfig::new(format!("http://{addr}/currents"));
        let err = fetch_currents(&client, &config).await.unwrap_err();
        assert!(matches!(err, TelexError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = http::client(http::DEFAULT_USER_AGENT).unwrap();

        let config = CurrentsConfig::new(format!("http://{addr}/currents"));
        let err = fetch_currents(&client, &config).await.unwrap_err();
        assert!(matches!(err, TelexError::Network { .. }));
    }
}
