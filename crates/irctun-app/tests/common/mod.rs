//! Shared fixtures for session tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use irctun_app::{App, AppAction, AppEvent, Environment};
use irctun_proto::Message;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded environment: reproducible randomness and a fixed clock.
#[derive(Clone)]
pub struct SimEnv {
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl SimEnv {
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))) }
    }
}

impl Environment for SimEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        self.rng.lock().unwrap().fill_bytes(buffer);
    }

    fn wall_clock_secs(&self) -> u64 {
        1_700_000_000
    }
}

pub fn app(seed: u64) -> App<SimEnv> {
    App::new(SimEnv::with_seed(seed), "irc.example.net:6667", "#home")
}

pub fn irc(app: &mut App<SimEnv>, line: &str) -> Vec<AppAction> {
    app.handle(AppEvent::Irc(Message::parse(line)))
}

pub fn input(app: &mut App<SimEnv>, line: &str) -> Vec<AppAction> {
    app.handle(AppEvent::Line(line.to_string()))
}

/// Simulate the server confirming our join of `channel`.
pub fn join(app: &mut App<SimEnv>, channel: &str) {
    let nick = app.nick().to_string();
    irc(app, &format!(":{nick}!t@tunnel JOIN {channel}"));
}

/// Wire text of every `Send` action.
pub fn sent(actions: &[AppAction]) -> Vec<String> {
    actions
        .iter()
        .filter_map(|a| match a {
            AppAction::Send(cmd) => Some(cmd.to_string()),
            _ => None,
        })
        .collect()
}
