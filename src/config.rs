// Configuration module for reading Agent.toml
// All values are read once at process start and never change afterwards.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub agent: AgentConfig,
    pub service: ServiceConfig,
    pub timing: TimingConfig,
    pub search: SearchConfig,
    pub evaluation: EvaluationConfig,
    pub debug: DebugConfig,
}

/// Identity the agent plays as
#[derive(Debug, Deserialize, Clone)]
pub struct AgentConfig {
    pub player_id: String,
}

/// Game-state service endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub request_timeout_ms: u64,
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Poll loop timing
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub poll_interval_ms: u64,
}

impl TimingConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Search constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Plies searched below each root candidate (opponent reply first)
    pub depth: u8,
}

/// Evaluation weights
#[derive(Debug, Deserialize, Clone)]
pub struct EvaluationConfig {
    pub unit_weight: i64,
    pub hp_weight: i64,
}

/// Decision log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Agent.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads configuration from `AGENT_CONFIG`, or Agent.toml in the working directory
    pub fn load_default() -> Result<Self, String> {
        let path = env::var("AGENT_CONFIG").unwrap_or_else(|_| "Agent.toml".to_string());
        Self::from_file(path)
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the values in Agent.toml
    pub fn default_hardcoded() -> Self {
        Config {
            agent: AgentConfig {
                player_id: "bot_player".to_string(),
            },
            service: ServiceConfig {
                endpoint: "http://localhost:8080/graphql".to_string(),
                request_timeout_ms: 5000,
            },
            timing: TimingConfig {
                poll_interval_ms: 2000,
            },
            search: SearchConfig { depth: 2 },
            evaluation: EvaluationConfig {
                unit_weight: 50,
                hp_weight: 1,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "agent_decisions.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Agent.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }

    /// Applies process environment overrides on top of the loaded values
    pub fn apply_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides from an arbitrary lookup (environment in production)
    ///
    /// Recognised keys: `AGENT_PLAYER_ID`, `GRAPHQL_ENDPOINT`,
    /// `AGENT_POLL_INTERVAL_MS`, `AGENT_SEARCH_DEPTH`. Unparseable numbers are
    /// ignored with a warning.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(player_id) = lookup("AGENT_PLAYER_ID") {
            self.agent.player_id = player_id;
        }
        if let Some(endpoint) = lookup("GRAPHQL_ENDPOINT") {
            self.service.endpoint = endpoint;
        }
        if let Some(raw) = lookup("AGENT_POLL_INTERVAL_MS") {
            match raw.parse() {
                Ok(ms) => self.timing.poll_interval_ms = ms,
                Err(e) => log::warn!("Ignoring AGENT_POLL_INTERVAL_MS={}: {}", raw, e),
            }
        }
        if let Some(raw) = lookup("AGENT_SEARCH_DEPTH") {
            match raw.parse() {
                Ok(depth) => self.search.depth = depth,
                Err(e) => log::warn!("Ignoring AGENT_SEARCH_DEPTH={}: {}", raw, e),
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_can_be_created() {
        let config = Config::default_hardcoded();
        assert_eq!(config.agent.player_id, "bot_player");
        assert_eq!(config.search.depth, 2);
        assert_eq!(config.timing.poll_interval(), Duration::from_millis(2000));
    }

    #[test]
    fn test_agent_toml_can_be_parsed() {
        let result = Config::from_file("Agent.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Agent.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_agent_toml_matches_hardcoded_defaults() {
        let file_config = Config::from_file("Agent.toml").expect("Agent.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        assert_eq!(file_config.agent.player_id, hardcoded_config.agent.player_id);
        assert_eq!(file_config.service.endpoint, hardcoded_config.service.endpoint);
        assert_eq!(
            file_config.service.request_timeout_ms,
            hardcoded_config.service.request_timeout_ms
        );
        assert_eq!(
            file_config.timing.poll_interval_ms,
            hardcoded_config.timing.poll_interval_ms
        );
        assert_eq!(file_config.search.depth, hardcoded_config.search.depth);
        assert_eq!(
            file_config.evaluation.unit_weight,
            hardcoded_config.evaluation.unit_weight
        );
        assert_eq!(
            file_config.evaluation.hp_weight,
            hardcoded_config.evaluation.hp_weight
        );
        assert_eq!(file_config.debug.enabled, hardcoded_config.debug.enabled);
    }

    #[test]
    fn test_overrides_replace_values() {
        let vars: HashMap<&str, &str> = [
            ("AGENT_PLAYER_ID", "npc_2"),
            ("GRAPHQL_ENDPOINT", "http://game:9000/graphql"),
            ("AGENT_POLL_INTERVAL_MS", "250"),
            ("AGENT_SEARCH_DEPTH", "1"),
        ]
        .into_iter()
        .collect();

        let config = Config::default_hardcoded()
            .with_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.agent.player_id, "npc_2");
        assert_eq!(config.service.endpoint, "http://game:9000/graphql");
        assert_eq!(config.timing.poll_interval_ms, 250);
        assert_eq!(config.search.depth, 1);
    }

    #[test]
    fn test_bad_numeric_override_is_ignored() {
        let config = Config::default_hardcoded().with_overrides(|key| match key {
            "AGENT_SEARCH_DEPTH" => Some("deep".to_string()),
            _ => None,
        });

        assert_eq!(config.search.depth, 2);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }
}
