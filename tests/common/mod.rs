//! Shared helpers: an in-process stub upstream and dispatcher wiring.

#![allow(dead_code)]

use axum::Router;
use map_tools::types::EndpointConfig;
use map_tools::{Config, Dispatcher};
use std::time::Duration;
use tokio::task::JoinHandle;

pub const TEST_USER_AGENT: &str = "map-tools-tests/0.1";

/// Stub upstream bound to an ephemeral local port. Aborted on drop.
#[derive(Debug)]
pub struct StubUpstream {
    base_url: String,
    join: JoinHandle<()>,
}

impl StubUpstream {
    pub async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let join = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self { base_url, join }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for StubUpstream {
    fn drop(&mut self) {
        self.join.abort();
    }
}

/// Config pointing both upstreams at `base_url`.
pub fn config_for(base_url: &str, timeout: Duration) -> Config {
    Config {
        nominatim: EndpointConfig::new(base_url, timeout),
        osrm: EndpointConfig::new(base_url, timeout),
        user_agent: TEST_USER_AGENT.to_string(),
    }
}

/// Dispatcher with real HTTP clients talking to `stub`.
pub fn dispatcher_for(stub: &StubUpstream, timeout: Duration) -> Dispatcher {
    Dispatcher::new(&config_for(stub.base_url(), timeout)).unwrap()
}

/// Local address nothing listens on.
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
