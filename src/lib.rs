// Library exports for the Chain Clash agent
// This allows the replay tool and integration tests to use the core decision logic

pub mod bot;
pub mod config;
pub mod controller;
pub mod debug_logger;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod replay;
pub mod rules;
pub mod search;
pub mod service;
pub mod snapshot;
pub mod types;
