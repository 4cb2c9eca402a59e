//! WebSocket client for live tournament updates.

use anyhow::{Context, Result};
use darts_league::tournament::{Tournament, TournamentId};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message,
};

/// Request sent to the live channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LiveRequest {
    Subscribe { id: TournamentId },
    Unsubscribe { id: TournamentId },
}

/// Message pushed by the live channel
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LiveMessage {
    /// Canonical copy of a tournament after a change
    Update { id: TournamentId, data: Tournament },
    /// The server could not honour a request
    Error { message: String },
    /// Anything this client does not act on (acknowledgements, pings)
    #[serde(other)]
    Other,
}

/// Parse a text frame from the live channel
pub fn parse_message(text: &str) -> Result<LiveMessage> {
    serde_json::from_str(text).context("Failed to parse live message")
}

/// WebSocket live-update client
pub struct LiveUpdateClient {
    ws_url: String,
}

impl LiveUpdateClient {
    /// Create a new live-update client
    pub fn new(ws_url: String) -> Self {
        Self { ws_url }
    }

    /// Connect and subscribe to one tournament
    pub async fn subscribe(&self, tournament_id: TournamentId) -> Result<LiveUpdates> {
        tracing::info!("Connecting to {}", self.ws_url);

        let (stream, _) = connect_async(&self.ws_url)
            .await
            .context("Failed to connect to WebSocket")?;

        let mut updates = LiveUpdates {
            tournament_id,
            stream,
        };
        updates
            .send(&LiveRequest::Subscribe { id: tournament_id })
            .await
            .context("Failed to subscribe to tournament")?;

        tracing::info!(%tournament_id, "Subscribed to live updates");
        Ok(updates)
    }
}

/// An open subscription to one tournament's updates
pub struct LiveUpdates {
    tournament_id: TournamentId,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl LiveUpdates {
    /// Tournament this subscription follows
    pub fn tournament_id(&self) -> TournamentId {
        self.tournament_id
    }

    /// Wait for the next canonical tournament
    ///
    /// Returns `Ok(None)` once the server closes the connection. Updates for
    /// other tournaments and frames that do not parse are skipped.
    pub async fn next_update(&mut self) -> Result<Option<Tournament>> {
        while let Some(frame) = self.stream.next().await {
            let text = match frame.context("WebSocket error")? {
                Message::Text(text) => text,
                Message::Close(_) => {
                    tracing::info!("Server closed live connection");
                    return Ok(None);
                }
                _ => continue,
            };

            match parse_message(text.as_str()) {
                Ok(LiveMessage::Update { id, data }) if id == self.tournament_id => {
                    return Ok(Some(data));
                }
                Ok(LiveMessage::Update { id, .. }) => {
                    tracing::debug!(%id, "Ignoring update for another tournament");
                }
                Ok(LiveMessage::Error { message }) => {
                    tracing::warn!("Live channel error: {}", message);
                }
                Ok(LiveMessage::Other) => {}
                Err(e) => {
                    tracing::warn!("{:#}", e);
                }
            }
        }

        Ok(None)
    }

    /// Unsubscribe and close the connection
    pub async fn close(mut self) -> Result<()> {
        let id = self.tournament_id;
        self.send(&LiveRequest::Unsubscribe { id }).await?;
        self.stream
            .close(None)
            .await
            .context("Failed to close WebSocket")?;
        Ok(())
    }

    async fn send(&mut self, request: &LiveRequest) -> Result<()> {
        let json = serde_json::to_string(request)?;
        self.stream
            .send(Message::Text(json.into()))
            .await
            .context("Failed to send live request")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_subscribe_request_shape() {
        let id = Uuid::nil();
        let json = serde_json::to_value(LiveRequest::Subscribe { id }).unwrap();
        assert_eq!(json["type"], "subscribe");
        assert_eq!(json["id"], id.to_string());
    }

    #[test]
    fn test_parse_error_and_unknown_messages() {
        assert_eq!(
            parse_message(r#"{"type":"error","message":"Not found"}"#).unwrap(),
            LiveMessage::Error {
                message: "Not found".to_string()
            }
        );
        assert_eq!(parse_message(r#"{"type":"pong"}"#).unwrap(), LiveMessage::Other);
        assert!(parse_message("not json").is_err());
    }

    #[test]
    fn test_parse_update() {
        let tournament = Tournament::new(
            Uuid::new_v4(),
            chrono::NaiveDate::from_ymd_opt(2024, 7, 6).unwrap(),
        );
        let json = serde_json::json!({
            "type": "update",
            "id": tournament.id,
            "data": tournament,
        });

        match parse_message(&json.to_string()).unwrap() {
            LiveMessage::Update { id, data } => {
                assert_eq!(id, tournament.id);
                assert_eq!(data, tournament);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
