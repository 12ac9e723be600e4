pub mod api_connection;
pub mod cli;
pub mod config;
pub mod fallback;
pub mod generation;
pub mod orchestrator;
pub mod prompt_builder;
pub mod recipe_schema;
pub mod response_interpreter;
pub mod server;
