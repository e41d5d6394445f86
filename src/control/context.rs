use super::*;
use crate::game::Player;
use std::sync::Arc;

/// Per-table player state: the player, its current move task and the
/// two once-per-game latches.
pub struct PlayerContext {
    player: Arc<dyn Player>,
    task: Option<MoveTask>,
    disclosed: bool,
    resigned: bool,
}

impl PlayerContext {
    pub fn new(player: Arc<dyn Player>) -> Self {
        Self {
            player,
            task: None,
            disclosed: false,
            resigned: false,
        }
    }
    pub fn player(&self) -> &Arc<dyn Player> {
        &self.player
    }
    /// The current task, unless it has finished.
    pub fn live(&self) -> Option<MoveTask> {
        self.task.as_ref().filter(|t| !t.is_finished()).cloned()
    }
    /// `task` is the one this context launched last.
    pub fn runs(&self, task: &MoveTask) -> bool {
        self.task.as_ref().is_some_and(|t| t.same(task))
    }
    pub fn assign(&mut self, task: MoveTask) {
        self.task = Some(task);
    }
    /// A new game begins: both latches open again.
    pub fn rearm(&mut self) {
        self.disclosed = false;
        self.resigned = false;
    }
    /// Close the disclosure latch. True if it was open.
    pub fn disclose(&mut self) -> bool {
        !std::mem::replace(&mut self.disclosed, true)
    }
    /// Close the resignation latch. True if it was open.
    pub fn resign(&mut self) -> bool {
        !std::mem::replace(&mut self.resigned, true)
    }
    pub fn has_disclosed(&self) -> bool {
        self.disclosed
    }
    pub fn has_resigned(&self) -> bool {
        self.resigned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Fish;

    #[test]
    fn latches_fire_once_per_game() {
        let mut context = PlayerContext::new(Arc::new(Fish));
        assert!(context.disclose());
        assert!(!context.disclose());
        assert!(context.resign());
        assert!(!context.resign());
        context.rearm();
        assert!(!context.has_disclosed());
        assert!(!context.has_resigned());
        assert!(context.resign());
    }
    #[test]
    fn finished_task_is_not_live() {
        let mut context = PlayerContext::new(Arc::new(Fish));
        assert!(context.live().is_none());
        let task = MoveTask::new(context.player().clone());
        context.assign(task.clone());
        assert!(context.live().is_some());
        assert!(context.runs(&task));
        task.finish();
        assert!(context.live().is_none());
        context.assign(MoveTask::new(context.player().clone()));
        assert!(!context.runs(&task));
    }
}
