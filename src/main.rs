//! Automated Skat Client
//!
//! Logs in to a Skat server and plays at every table it is seated at.
//! Options: --host, --port, --id, --password, --cmds, --delay, --quit, --ai

use clap::Parser;
use skatclient::config::Config;
use skatclient::game::Roster;
use skatclient::game::Stub;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    skatclient::log()?;
    skatclient::kys();
    let config = Config::parse();
    let roster = Roster::new(&config.ai, &config.kind, &config.params, &config.library)?;
    skatclient::client::run(config, Arc::new(Stub::default()), Arc::new(roster)).await
}
