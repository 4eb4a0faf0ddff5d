pub mod config;
pub mod rate_limit;
pub mod security;
