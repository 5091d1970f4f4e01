//! `limitsbar`: Codex and Claude usage on one status-bar line

use limitsbar::{commands, config::Config, logging, status_bar};

fn main() {
    logging::init();

    let config = Config::from_env();
    let payload = commands::run_limitsbar(&config);
    status_bar::emit(&payload);
}
