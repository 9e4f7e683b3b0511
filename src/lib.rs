pub mod airports;
pub mod board;
pub mod config;
pub mod error;
pub mod fallback;
pub mod fetch;
pub mod mcp;
pub mod model;
pub mod query;
pub mod resolve;
pub mod table;

