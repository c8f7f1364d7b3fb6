use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at, sleep_until};

use crate::config::GameConfig;
use crate::engine::{
    ControlKey, GameEvent, GameState, JoinError, Notifier, PauseReason, Renderer, SessionRng,
};
use crate::{PlayerId, log};

const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

#[derive(Clone, Debug)]
pub enum SessionCommand {
    Join { username: String },
    Key { name: String, at: std::time::Instant },
    Play { delay_secs: u64 },
    Pause,
    Toggle,
    Shutdown,
}

struct Countdown {
    delay_secs: u64,
    remaining_secs: u64,
    next: Instant,
}

enum Step {
    Command(Option<SessionCommand>),
    Tick,
    Countdown,
}

/// Owns the game state and drives it: the play/pause state machine, the tick
/// timer, key routing and event dispatch to the renderer and notifier.
pub struct GameSession<R: Renderer, N: Notifier> {
    state: GameState,
    config: GameConfig,
    renderer: R,
    notifier: N,
    run_state: RunState,
    ticker: Option<Interval>,
    countdown: Option<Countdown>,
}

impl<R: Renderer, N: Notifier> GameSession<R, N> {
    pub fn new(config: GameConfig, rng: SessionRng, renderer: R, notifier: N) -> Self {
        let state = GameState::new(&config, rng);
        let mut session = Self {
            state,
            config,
            renderer,
            notifier,
            run_state: RunState::Stopped,
            ticker: None,
            countdown: None,
        };
        session.renderer.draw_run_state(RunState::Stopped);
        session.redraw();
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn join(&mut self, username: &str) -> Result<(), JoinError> {
        let event = self.state.join(username)?;
        self.dispatch(vec![event]);
        Ok(())
    }

    /// Starts the loop after `delay_secs`, announcing every second of the
    /// countdown. Ignored while running; a pending countdown is replaced.
    pub fn play(&mut self, delay_secs: u64) -> bool {
        if self.is_running() {
            return false;
        }
        if delay_secs == 0 {
            self.start(0);
            return true;
        }
        self.countdown = Some(Countdown {
            delay_secs,
            remaining_secs: delay_secs,
            next: Instant::now() + COUNTDOWN_STEP,
        });
        self.emit(&GameEvent::Countdown {
            remaining_secs: delay_secs,
        });
        true
    }

    fn start(&mut self, delay_secs: u64) {
        self.countdown = None;
        let speed = self.config.tick_interval();
        let mut ticker = interval_at(Instant::now() + speed, speed);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.ticker = Some(ticker);
        self.run_state = RunState::Running;
        self.renderer.draw_run_state(RunState::Running);
        self.emit(&GameEvent::Play { delay_secs });
    }

    fn advance_countdown(&mut self) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };
        countdown.remaining_secs -= 1;
        if countdown.remaining_secs == 0 {
            let delay_secs = countdown.delay_secs;
            self.start(delay_secs);
            return;
        }
        countdown.next += COUNTDOWN_STEP;
        let remaining_secs = countdown.remaining_secs;
        self.emit(&GameEvent::Countdown { remaining_secs });
    }

    /// Stops the loop. Also cancels a pending countdown; only a running game
    /// reports the pause.
    pub fn pause(&mut self, reason: PauseReason) -> bool {
        self.countdown = None;
        if !self.is_running() {
            return false;
        }
        self.ticker = None;
        self.run_state = RunState::Stopped;
        self.renderer.draw_run_state(RunState::Stopped);
        self.emit(&GameEvent::Paused { reason });
        true
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause(PauseReason::Requested);
        } else {
            self.play(self.config.start_delay_secs);
        }
    }

    pub fn handle_key(&mut self, key_name: &str, at: std::time::Instant) {
        match ControlKey::from_name(key_name) {
            Some(ControlKey::Escape) => {
                self.pause(PauseReason::EscapeKey);
            }
            Some(ControlKey::Enter) => {
                if !self.is_running() {
                    self.play(self.config.start_delay_secs);
                }
            }
            None if self.is_running() => {
                self.state.handle_key(key_name, at);
            }
            None => {}
        }
    }

    /// One loop iteration. A panic inside it pauses the game instead of
    /// taking the session down.
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }
        let result = catch_unwind(AssertUnwindSafe(|| {
            let events = self.state.tick();
            self.dispatch(events);
        }));
        if let Err(panic) = result {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log!("Tick failed: {}", message);
            self.pause(PauseReason::Error);
        }
    }

    pub fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Join { username } => {
                if let Err(e) = self.join(&username) {
                    log!("Join of \"{}\" rejected: {}", username, e);
                    self.notifier.notify(&e.to_string());
                }
            }
            SessionCommand::Key { name, at } => self.handle_key(&name, at),
            SessionCommand::Play { delay_secs } => {
                self.play(delay_secs);
            }
            SessionCommand::Pause => {
                self.pause(PauseReason::Requested);
            }
            SessionCommand::Toggle => self.toggle(),
            SessionCommand::Shutdown => {}
        }
    }

    /// Serves commands and timers until `Shutdown` or until every sender is
    /// gone, then hands the session back.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<SessionCommand>) -> Self {
        log!("Session started with seed {}", self.state.seed());
        loop {
            let countdown_deadline = self.countdown.as_ref().map(|countdown| countdown.next);
            let step = tokio::select! {
                command = commands.recv() => Step::Command(command),
                _ = next_tick(&mut self.ticker) => Step::Tick,
                _ = deadline(countdown_deadline) => Step::Countdown,
            };

            match step {
                Step::Command(None) | Step::Command(Some(SessionCommand::Shutdown)) => break,
                Step::Command(Some(command)) => self.handle_command(command),
                Step::Tick => self.tick(),
                Step::Countdown => self.advance_countdown(),
            }
        }
        self.ticker = None;
        self.countdown = None;
        log!("Session stopped");
        self
    }

    fn dispatch(&mut self, events: Vec<GameEvent>) {
        let mut scores_changed = false;
        for event in events {
            self.emit(&event);
            match event {
                GameEvent::Bump { .. } => {
                    self.pause(PauseReason::Bumped);
                }
                GameEvent::MaxScore { .. } => {
                    self.pause(PauseReason::MaxScore);
                }
                GameEvent::PlayerLost { player } => {
                    self.remove_player(&player);
                    scores_changed = true;
                }
                GameEvent::PlayerJoined { .. } | GameEvent::ScoreBumped { .. } => {
                    scores_changed = true;
                }
                GameEvent::AteFood { .. }
                | GameEvent::Play { .. }
                | GameEvent::Countdown { .. }
                | GameEvent::Paused { .. } => {}
            }
        }
        if scores_changed {
            self.renderer.draw_scores(&self.state.scores());
        }
        self.flush();
    }

    fn remove_player(&mut self, player: &PlayerId) {
        self.state.remove_player(player);
    }

    fn emit(&self, event: &GameEvent) {
        if let Some(message) = event.announcement(self.config.debug) {
            self.notifier.notify(&message);
        }
    }

    fn flush(&mut self) {
        let ui_height = self.config.canvas.ui_height;
        self.state
            .flush(&mut self.renderer, &self.config.scales, ui_height);
    }

    /// Repaints the whole board and the score band.
    pub fn redraw(&mut self) {
        self.state.redraw_all();
        self.renderer.draw_scores(&self.state.scores());
        self.flush();
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

async fn deadline(at: Option<Instant>) {
    match at {
        Some(at) => sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}
