use common::engine::SessionCommand;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct CommandSender(mpsc::UnboundedSender<SessionCommand>);

impl CommandSender {
    pub fn new(tx: mpsc::UnboundedSender<SessionCommand>) -> Self {
        Self(tx)
    }

    pub fn send(&self, cmd: SessionCommand) {
        // The session thread is gone once it has shut down.
        let _ = self.0.send(cmd);
    }
}
