use crate::dispatch::ServiceEvent;
use crate::session::Inconsistency;

/// Receives every event the reader produces, in arrival order,
/// after the session lock has been released.
#[async_trait::async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn handle(&self, event: &ServiceEvent) -> Result<(), Inconsistency>;
}
