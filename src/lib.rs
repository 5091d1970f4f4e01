pub mod claude_usage;
pub mod codex_usage;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod provider_usage;
pub mod status_bar;

#[cfg(test)]
mod test_support;
