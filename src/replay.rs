// Replay module for analyzing logged decisions
//
// Loads the JSONL decision log written by the debug logger, re-runs move
// selection on each logged snapshot and compares against what was played.

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::bot::Bot;
use crate::config::Config;
use crate::debug_logger::DecisionLogEntry;
use crate::eval::Score;
use crate::types::Action;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: u64,
    pub original_action: Action,
    pub replayed_action: Option<Action>,
    pub matches: bool,
    pub original_score: Score,
    pub replayed_score: Option<Score>,
    pub nodes: u64,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing decision logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(
        &self,
        log_path: P,
    ) -> Result<Vec<DecisionLogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DecisionLogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry as the agent recorded in it
    pub fn replay_entry(&self, entry: &DecisionLogEntry) -> ReplayResult {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let mut config = self.config.clone();
        config.agent.player_id = entry.agent.clone();
        let decision = Bot::new(config).choose(&entry.snapshot);

        let replayed_action = decision.map(|d| d.action);
        let matches = replayed_action == Some(entry.action);

        let result = ReplayResult {
            turn: entry.turn,
            original_action: entry.action,
            replayed_action,
            matches,
            original_score: entry.score,
            replayed_score: decision.map(|d| d.score),
            nodes: decision.map_or(0, |d| d.nodes),
            computation_time_ms: decision.map_or(0, |d| d.elapsed_ms),
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} (score: {}, nodes: {}, time: {}ms)",
                    entry.turn, entry.action, entry.score, result.nodes, result.computation_time_ms
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {}, Replayed: {} (score: {:?}, nodes: {}, time: {}ms)",
                    entry.turn,
                    entry.action,
                    describe(replayed_action),
                    result.replayed_score,
                    result.nodes,
                    result.computation_time_ms
                );
            }
        }

        result
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[DecisionLogEntry]) -> Vec<ReplayResult> {
        entries.iter().map(|e| self.replay_entry(e)).collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[DecisionLogEntry],
        turn_numbers: &[u64],
    ) -> Result<Vec<ReplayResult>, String> {
        turn_numbers
            .iter()
            .map(|turn_num| {
                entries
                    .iter()
                    .find(|e| e.turn == *turn_num)
                    .map(|entry| self.replay_entry(entry))
                    .ok_or_else(|| format!("Turn {} not found in log file", turn_num))
            })
            .collect()
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results.iter().map(|r| r.computation_time_ms as f64).sum::<f64>()
                / results.len() as f64;
            let avg_nodes: f64 =
                results.iter().map(|r| r.nodes as f64).sum::<f64>() / results.len() as f64;

            println!("Average Nodes Searched:     {:.0}", avg_nodes);
            println!("Average Computation Time:   {:.1}ms\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {} (score: {:?}, nodes: {}, time: {}ms)",
                    result.turn,
                    result.original_action,
                    describe(result.replayed_action),
                    result.replayed_score,
                    result.nodes,
                    result.computation_time_ms
                );
            }
            println!();
        }
    }
}

fn describe(action: Option<Action>) -> String {
    action.map_or_else(|| "pass".to_string(), |a| a.to_string())
}
