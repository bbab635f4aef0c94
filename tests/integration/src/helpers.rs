//! Test helpers for integration tests
//!
//! Provides a test server, raw HTTP helpers, and signed-in client contexts.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use org_client::{ClientContext, MemoryNotifier};
use org_common::{AppConfig, ClientConfig};
use org_devserver::{create_app_state, serve};
use org_views::MembershipQuery;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub use org_devserver::seed::token_for;

/// Seeded development backend on an ephemeral port
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        let state = create_app_state(AppConfig::default());
        let handle = tokio::spawn(async move {
            serve(listener, state).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Client settings for a seeded user
    pub fn client_config(&self, onyen: &str) -> ClientConfig {
        ClientConfig {
            api_token: Some(token_for(onyen)),
            ..ClientConfig::with_base_url(self.base_url())
        }
    }

    /// Client context signed in as `onyen`, recording notifications
    pub async fn connect(&self, onyen: &str) -> Result<Session> {
        let notifier = Arc::new(MemoryNotifier::new());
        let context = ClientContext::connect(self.client_config(onyen), notifier.clone()).await?;
        Ok(Session { context, notifier })
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, onyen: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token_for(onyen))
            .send()
            .await?)
    }

    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        onyen: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token_for(onyen))
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, onyen: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token_for(onyen))
            .send()
            .await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A signed-in client and the notifications it raised
pub struct Session {
    pub context: ClientContext,
    pub notifier: Arc<MemoryNotifier>,
}

impl Session {
    pub fn membership(&self) -> MembershipQuery {
        MembershipQuery::from_context(&self.context)
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
