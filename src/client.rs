//! One connection from login to disconnect.
use crate::agent::Agent;
use crate::config::Config;
use crate::connection::Connection;
use crate::connection::Outbox;
use crate::control::Controller;
use crate::dispatch::Dispatcher;
use crate::game::PlayerFactory;
use crate::game::Rules;
use crate::session::Session;
use crate::watchdog::Watchdog;
use std::sync::Arc;

/// Log in, play until the server goes away, then return.
pub async fn run(config: Config, rules: Arc<dyn Rules>, factory: Arc<dyn PlayerFactory>) -> anyhow::Result<()> {
    let timing = config.timing();
    let mut login = Connection::login(&config.host, config.port, &config.id, &config.password).await?;
    login.commands(&config.commands()).await?;
    let (outbox, queue) = Outbox::channel();
    let session = Session::new(login.id(), &config.place);
    log::info!("[client] playing as {} at place '{}'", session.id(), session.place());
    let shared = session.shared();
    let controller = Controller::new(shared.clone(), outbox.clone(), factory, timing);
    let agent = Agent::new(shared.clone(), outbox.clone(), controller);
    let link = login.spawn(queue, shared.clone(), Dispatcher::new(rules), agent);
    let watchdog = Watchdog::new(shared, outbox, timing, config.quit).spawn();
    link.closed().await;
    watchdog.abort();
    log::info!("[client] session closed");
    Ok(())
}
