//! HTTP API client for the tournament server.

use crate::logging::log_api_request;
use anyhow::{Context, Result};
use async_trait::async_trait;
use darts_league::{
    session::{
        ActionResult, ApiError, ApiResult, LiveSessionRequest, TournamentApi, TournamentPatch,
    },
    side::Team,
    tournament::{Tournament, TournamentId},
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// A division of the league
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub id: Uuid,
    pub name: String,
}

/// A league season and the divisions playing in it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: Uuid,
    pub name: String,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub divisions: Vec<Division>,
}

/// API client for communicating with the tournament server
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a new API client whose requests give up after `timeout`
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List all teams with their season rosters
    pub async fn list_teams(&self) -> Result<Vec<Team>> {
        self.get_list("/api/Team/").await.context("Failed to list teams")
    }

    /// List all seasons
    pub async fn list_seasons(&self) -> Result<Vec<Season>> {
        self.get_list("/api/Season/").await.context("Failed to list seasons")
    }

    /// List all divisions
    pub async fn list_divisions(&self) -> Result<Vec<Division>> {
        self.get_list("/api/Division/").await.context("Failed to list divisions")
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        let response = self.send(Method::GET, path, |r| r).await?;
        decode(response).await
    }

    /// Send a request, logging its outcome
    async fn send<F>(&self, method: Method, path: &str, build: F) -> ApiResult<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let started = Instant::now();
        let request = build(
            self.client
                .request(method.clone(), format!("{}{}", self.base_url, path)),
        );

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        log_api_request(
            method.as_str(),
            path,
            response.status().as_u16(),
            started.elapsed().as_millis() as u64,
        );
        Ok(response)
    }
}

/// Decode a successful response body, turning other statuses into errors
async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl TournamentApi for ApiClient {
    async fn get(&self, id: TournamentId) -> ApiResult<Option<Tournament>> {
        let response = self
            .send(Method::GET, &format!("/api/Tournament/{id}"), |r| r)
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    async fn update(&self, tournament: &Tournament) -> ApiResult<ActionResult<Tournament>> {
        let response = self
            .send(Method::PUT, "/api/Tournament/", |r| r.json(tournament))
            .await?;
        decode(response).await
    }

    async fn patch(
        &self,
        id: TournamentId,
        patch: &TournamentPatch,
    ) -> ApiResult<ActionResult<Tournament>> {
        let response = self
            .send(Method::PATCH, &format!("/api/Tournament/{id}"), |r| {
                r.json(patch)
            })
            .await?;
        decode(response).await
    }

    async fn add_live_session(
        &self,
        request: &LiveSessionRequest,
    ) -> ApiResult<ActionResult<Tournament>> {
        let response = self
            .send(Method::POST, "/api/Tournament/sayg", |r| r.json(request))
            .await?;
        decode(response).await
    }

    async fn delete_live_session(
        &self,
        id: TournamentId,
        match_id: Uuid,
    ) -> ApiResult<ActionResult<Tournament>> {
        let response = self
            .send(
                Method::DELETE,
                &format!("/api/Tournament/{id}/{match_id}/sayg"),
                |r| r,
            )
            .await?;
        decode(response).await
    }
}
