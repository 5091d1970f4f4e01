//! `codexbar`: Codex daily and weekly usage for the status bar

use limitsbar::{commands, config::Config, logging, status_bar};

fn main() {
    logging::init();

    let config = Config::from_env();
    let payload = commands::run_codexbar(&config);
    status_bar::emit(&payload);
}
