use common::engine::Notifier;
use common::log;

use crate::state::SharedState;

/// Shows announcements in the side panel log and mirrors them to stdout.
pub struct UiNotifier {
    shared_state: SharedState,
}

impl UiNotifier {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl Notifier for UiNotifier {
    fn notify(&self, message: &str) {
        log!("{}", message);
        self.shared_state.add_notification(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_appends_to_log() {
        let state = SharedState::new(2, 2);
        let notifier = UiNotifier::new(state.clone());
        notifier.notify("Player \"alice\" joined");
        notifier.notify("Starting in 3...");
        assert_eq!(
            state.get_notifications(),
            vec!["Player \"alice\" joined".to_string(), "Starting in 3...".to_string()]
        );
    }
}
