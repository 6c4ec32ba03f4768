#![allow(dead_code)]

use adserver_rpc::api::handlers::{health_handler, rpc_handler};
use adserver_rpc::application::services::OperatorCredentials;
use adserver_rpc::domain::entities::{NewPublisher, NewStatsEntry};
use adserver_rpc::state::{AppState, Repositories, ServiceSettings};
use axum::Router;
use axum::routing::{get, post};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::{Value, json};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "s3cret";
pub const RPC_PATH: &str = "/api/v2/rpc";

pub fn settings() -> ServiceSettings {
    ServiceSettings {
        credentials: OperatorCredentials {
            username: USERNAME.to_string(),
            password: PASSWORD.to_string(),
        },
        session_signing_secret: "test-signing-secret".to_string(),
        session_ttl: chrono::Duration::seconds(3600),
        manager_timezone: Tz::UTC,
    }
}

/// `{"dateTime.iso8601": raw}`
pub fn date(raw: &str) -> Value {
    json!({ "dateTime.iso8601": raw })
}

pub struct TestApp {
    pub server: TestServer,
    pub repositories: Repositories,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(settings())
    }

    pub fn with_settings(settings: ServiceSettings) -> Self {
        let repositories = Repositories::in_memory();
        let state = AppState::new(repositories.clone(), settings);

        let app = Router::new()
            .route(RPC_PATH, post(rpc_handler))
            .route("/health", get(health_handler))
            .with_state(state);

        Self {
            server: TestServer::new(app).unwrap(),
            repositories,
        }
    }

    /// Sends one call and returns the whole response object.
    pub async fn call(&self, method: &str, params: Value) -> Value {
        let response = self
            .server
            .post(RPC_PATH)
            .json(&json!({ "jsonrpc": "2.0", "method": method, "params": params, "id": 1 }))
            .await;

        response.assert_status_ok();
        response.json::<Value>()
    }

    /// Sends one call that must succeed and returns its result.
    pub async fn result(&self, method: &str, params: Value) -> Value {
        let response = self.call(method, params).await;
        assert!(response.get("error").is_none(), "unexpected fault: {response}");
        response["result"].clone()
    }

    /// Sends one call that must fail and returns `(code, message)`.
    pub async fn fault(&self, method: &str, params: Value) -> (i64, String) {
        let response = self.call(method, params).await;
        assert!(response.get("result").is_none(), "unexpected result: {response}");
        (
            response["error"]["code"].as_i64().unwrap(),
            response["error"]["message"].as_str().unwrap().to_string(),
        )
    }

    pub async fn logon(&self) -> String {
        self.result("ox.logon", json!([USERNAME, PASSWORD]))
            .await
            .as_str()
            .unwrap()
            .to_string()
    }

    pub async fn add_advertiser(&self, session: &str, name: &str) -> i64 {
        self.result("ox.addAdvertiser", json!([session, { "advertiserName": name }]))
            .await
            .as_i64()
            .unwrap()
    }

    pub async fn add_publisher(&self, name: &str) -> i64 {
        self.repositories
            .publishers
            .create(NewPublisher {
                name: name.to_string(),
            })
            .await
            .unwrap()
            .id
    }

    /// Stores one hourly row; `hour` is RFC 3339.
    pub async fn record(
        &self,
        advertiser_id: i64,
        publisher_id: i64,
        hour: &str,
        counts: (i64, i64, i64),
        revenue: f64,
    ) {
        let hour_start: DateTime<Utc> = hour.parse().unwrap();
        self.repositories
            .stats
            .record(NewStatsEntry {
                advertiser_id,
                publisher_id,
                hour_start,
                requests: counts.0,
                impressions: counts.1,
                clicks: counts.2,
                revenue,
            })
            .await
            .unwrap();
    }
}
