// Client side of the game-state service
//
// The agent only ever performs two operations against the service: the
// `gameState` query and the `submitMove` mutation. Both go through the
// `GameService` trait so the turn controller can be driven by an in-process
// fake in tests.

use async_trait::async_trait;
use log::debug;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::ServiceConfig;
use crate::error::{AgentError, AgentResult};
use crate::types::MoveInput;

pub const GAME_STATE_QUERY: &str = r#"
  query GameState {
    gameState {
      players
      turnIndex
      board {
        units {
          owner
          unitType
          position { x y }
          hp
        }
        size
      }
      result {
        __typename
        ... on Victory { winner }
      }
    }
  }
"#;

pub const SUBMIT_MOVE_MUTATION: &str = r#"
  mutation SubmitMove($moveData: MoveInput!) {
    submitMove(moveData: $moveData)
  }
"#;

const QUERY_OPERATION: &str = "gameState query";
const MUTATION_OPERATION: &str = "submitMove mutation";

/// Read/write endpoint for the shared game state
#[async_trait]
pub trait GameService: Send + Sync {
    /// Returns the raw `gameState` object
    async fn fetch_state(&self) -> AgentResult<Value>;

    /// Submits a move, returning the service's acknowledgement
    async fn submit_move(&self, input: &MoveInput) -> AgentResult<String>;
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<Value>,
}

/// GraphQL-over-HTTP implementation of `GameService`
#[derive(Debug, Clone)]
pub struct GraphQlService {
    client: reqwest::Client,
    endpoint: String,
}

impl GraphQlService {
    /// Builds a client with an explicit per-request timeout
    pub fn new(config: &ServiceConfig) -> AgentResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AgentError::transport("client setup", e.to_string()))?;

        Ok(GraphQlService {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute(
        &self,
        operation: &'static str,
        query: &str,
        variables: Option<Value>,
    ) -> AgentResult<Value> {
        let request = GraphQlRequest { query, variables };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AgentError::transport(operation, e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| AgentError::transport(operation, e.to_string()))?;

        debug!("{} response: {}", operation, body);
        extract_data(operation, body)
    }
}

/// Splits a GraphQL response into its `data` object or a transport fault
fn extract_data(operation: &'static str, mut body: Value) -> AgentResult<Value> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages: Vec<&str> = errors
                .iter()
                .map(|e| e.get("message").and_then(Value::as_str).unwrap_or("unknown error"))
                .collect();
            return Err(AgentError::transport(operation, messages.join("; ")));
        }
    }

    match body.get_mut("data").map(Value::take) {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(AgentError::transport(operation, "response carried no data")),
    }
}

#[async_trait]
impl GameService for GraphQlService {
    async fn fetch_state(&self) -> AgentResult<Value> {
        let mut data = self.execute(QUERY_OPERATION, GAME_STATE_QUERY, None).await?;

        match data.get_mut("gameState").map(Value::take) {
            Some(state) => Ok(state),
            None => Err(AgentError::malformed("response is missing data.gameState")),
        }
    }

    async fn submit_move(&self, input: &MoveInput) -> AgentResult<String> {
        let variables = json!({ "moveData": input });
        let data = self
            .execute(MUTATION_OPERATION, SUBMIT_MOVE_MUTATION, Some(variables))
            .await?;

        Ok(match data.get("submitMove") {
            Some(Value::String(ack)) => ack.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        })
    }
}
