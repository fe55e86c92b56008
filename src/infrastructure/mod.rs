// Infrastructure layer - External dependencies and adapters
pub mod board;
pub mod config;
pub mod http_backend;
