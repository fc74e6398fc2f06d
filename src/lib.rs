//! Conversational assistant that delegates directory-mapping work to a
//! specialized sub-assistant through a small dialog graph.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod session;
pub mod tools;
pub mod ui;
