use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use tokio::sync::watch;

/// Shared liveness flag of one connection.
/// Cut once; every task holding a copy can await the cut.
#[derive(Debug, Clone)]
pub struct Lifeline {
    dead: Arc<AtomicBool>,
    signal: Arc<watch::Sender<bool>>,
}

impl Default for Lifeline {
    fn default() -> Self {
        Self {
            dead: Arc::new(AtomicBool::new(false)),
            signal: Arc::new(watch::channel(false).0),
        }
    }
}

impl Lifeline {
    /// Cut the line. Only the first call returns `true`.
    pub fn terminate(&self) -> bool {
        let first = !self.dead.swap(true, Ordering::SeqCst);
        if first {
            log::info!("[lifeline] connection terminated");
            self.signal.send_replace(true);
        }
        first
    }
    pub fn is_dead(&self) -> bool {
        self.dead.load(Ordering::SeqCst)
    }
    /// Resolves once the line has been cut.
    pub async fn dead(&self) {
        let mut rx = self.signal.subscribe();
        let _ = rx.wait_for(|dead| *dead).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[tokio::test]
    async fn terminate_once() {
        let lifeline = Lifeline::default();
        let waiter = tokio::spawn({
            let lifeline = lifeline.clone();
            async move { lifeline.dead().await }
        });
        assert!(!lifeline.is_dead());
        assert!(lifeline.terminate());
        assert!(!lifeline.terminate());
        assert!(lifeline.is_dead());
        waiter.await.unwrap();
        lifeline.dead().await;
    }
}
