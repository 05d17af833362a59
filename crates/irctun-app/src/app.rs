//! Session state machine.
//!
//! This module defines the [`App`] state machine, which owns one tunnel
//! connection's [`SessionState`] completely decoupled from sockets and
//! terminals.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Dispatches client input: chat, slash commands, history recall.
//! - Applies server messages to session state (see `reducer`).
//! - Tracks terminal geometry so resizes trigger a full redraw.

use irctun_proto::{IrcCommand, is_channel_name};

use crate::{
    AppAction, AppEvent, ArrowKeys, Environment, SessionState, SwitchTarget, UserCommand,
    format::Lines, nick::random_nick,
};

/// Username sent during registration.
pub const USERNAME: &str = "tunnel";
/// Realname sent during registration.
pub const REALNAME: &str = "Tunnel User";
/// Quit reason for `/quit`.
pub const QUIT_MESSAGE: &str = "Leaving";
/// Quit reason when the client goes away.
pub const DISCONNECT_MESSAGE: &str = "Client disconnected";

const HELP: &[(&str, &str)] = &[
    ("── Commands ──", ""),
    ("/join #channel", "Join a channel"),
    ("/part [#chan]", "Leave channel/close PM"),
    ("/sw <N|#chan>", "Switch window"),
    ("/nick <name>", "Change nick"),
    ("/me <action>", "Action message"),
    ("/msg <to> [txt]", "Open PM (optional msg)"),
    ("/query <nick>", "Open PM window"),
    ("/close", "Close current window"),
    ("/topic [text]", "View/set topic"),
    ("── Panels ──", ""),
    ("/nl", "Toggle nicklist"),
    ("/cl", "Toggle channel list"),
    ("/nup [N]", "Scroll nicks up"),
    ("/nd [N]", "Scroll nicks down"),
    ("── Other ──", ""),
    ("/rd", "Redraw screen"),
    ("/resize", "Re-detect term size"),
    ("/quit", "Disconnect"),
];

/// Session state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App<E: Environment> {
    pub(crate) env: E,
    pub(crate) state: SessionState,
    /// Upstream address, for display only.
    upstream: String,
    /// Channel joined after registration.
    pub(crate) channel: String,
    /// Whether the post-registration join has been issued.
    pub(crate) autojoined: bool,
}

impl<E: Environment> App<E> {
    /// Create a session with a random nickname.
    pub fn new(env: E, upstream: impl Into<String>, channel: impl Into<String>) -> Self {
        let nick = random_nick(&env);
        Self {
            env,
            state: SessionState::new(nick),
            upstream: upstream.into(),
            channel: channel.into(),
            autojoined: false,
        }
    }

    /// Current session state, for rendering.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Our current nickname.
    pub fn nick(&self) -> &str {
        self.state.nick()
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Resize(geometry) => {
                if self.state.set_geometry(geometry) {
                    vec![AppAction::ClearScreen, AppAction::Render]
                } else {
                    vec![]
                }
            },
            AppEvent::Line(line) => self.handle_line(&line),
            AppEvent::Irc(msg) => self.handle_irc(&msg),
            AppEvent::Connecting => {
                let line = Lines::new(&self.env).note_with(
                    "Connecting to ",
                    &self.upstream,
                    &format!(" as {}...", self.state.nick()),
                );
                self.state.add_status_line(line);
                vec![AppAction::ClearScreen, AppAction::Render]
            },
            AppEvent::Connected => self.register(),
            AppEvent::ConnectFailed { reason } => {
                let line = Lines::new(&self.env).error("Connection failed:", &reason);
                self.state.add_status_line(line);
                vec![AppAction::Render]
            },
        }
    }

    /// Registration lines: `NICK` then `USER`.
    pub fn register(&self) -> Vec<AppAction> {
        vec![
            AppAction::Send(IrcCommand::Nick(self.state.nick().to_string())),
            AppAction::Send(IrcCommand::User {
                user: USERNAME.to_string(),
                realname: REALNAME.to_string(),
            }),
        ]
    }

    fn handle_line(&mut self, line: &str) -> Vec<AppAction> {
        let mut actions = vec![AppAction::ClearPrompt];
        let keys = ArrowKeys::parse(line);

        if keys.is_navigation() {
            let Some(recalled) = self.state.history_mut().recall(keys.recall_steps()) else {
                actions.push(AppAction::Render);
                return actions;
            };
            self.state.history_mut().push(&recalled);
            actions.push(AppAction::FlashInput { text: recalled.clone() });
            actions.extend(self.submit(&recalled));
        } else if keys.text.is_empty() {
            actions.push(AppAction::Render);
        } else {
            self.state.history_mut().push(&keys.text);
            actions.extend(self.submit(&keys.text));
        }
        actions
    }

    /// Dispatch one line of user input: chat for the active window, or a
    /// slash command.
    pub fn submit(&mut self, text: &str) -> Vec<AppAction> {
        if !text.starts_with('/') {
            return self.say(text);
        }
        match UserCommand::parse(text) {
            Some(cmd) => self.run_command(cmd),
            None => vec![],
        }
    }

    fn say(&mut self, text: &str) -> Vec<AppAction> {
        let lines = Lines::new(&self.env);
        if self.state.status_active() {
            self.state.add_status_line(lines.note("Cannot send to status. Use /join #channel"));
            return vec![AppAction::Render];
        }

        let target = self.state.active_window().name.clone();
        let line = lines.chat(self.state.nick(), text);
        self.state.add_active_line(line);
        vec![
            AppAction::Send(IrcCommand::Privmsg { target, text: text.to_string() }),
            AppAction::Render,
        ]
    }

    fn run_command(&mut self, cmd: UserCommand) -> Vec<AppAction> {
        let lines = Lines::new(&self.env);
        match cmd {
            UserCommand::Quit => {
                self.state.add_active_line(lines.note("Goodbye."));
                vec![
                    AppAction::Send(IrcCommand::Quit(QUIT_MESSAGE.to_string())),
                    AppAction::Render,
                    AppAction::Quit,
                ]
            },
            UserCommand::Join(channel) => vec![AppAction::Send(IrcCommand::Join(channel))],
            UserCommand::Part(target) => {
                let target = target.unwrap_or_else(|| self.state.active_window().name.clone());
                self.leave(target)
            },
            UserCommand::Close => {
                if self.state.status_active() {
                    return vec![];
                }
                let target = self.state.active_window().name.clone();
                self.leave(target)
            },
            UserCommand::Switch(target) => {
                match target {
                    SwitchTarget::Index(index) => self.state.switch_to_index(index),
                    SwitchTarget::Name(name) => self.state.switch_to_name(&name),
                };
                vec![AppAction::ClearScreen, AppAction::Render]
            },
            UserCommand::Nick(nick) => vec![AppAction::Send(IrcCommand::Nick(nick))],
            UserCommand::Me(text) => {
                if self.state.status_active() {
                    return vec![];
                }
                let target = self.state.active_window().name.clone();
                let line = lines.action(self.state.nick(), &text);
                self.state.add_active_line(line);
                vec![AppAction::Send(IrcCommand::Action { target, text }), AppAction::Render]
            },
            UserCommand::Msg { target, text } => {
                let mut actions = Vec::new();
                let index = self.state.ensure_window(&target);
                if let Some(text) = text {
                    let line = lines.chat(self.state.nick(), &text);
                    self.state.add_line(index, line);
                    actions.push(AppAction::Send(IrcCommand::Privmsg { target, text }));
                }
                self.state.switch_to_index(index);
                actions.extend([AppAction::ClearScreen, AppAction::Render]);
                actions
            },
            UserCommand::Query(target) => {
                let index = self.state.ensure_window(&target);
                self.state.switch_to_index(index);
                vec![AppAction::ClearScreen, AppAction::Render]
            },
            UserCommand::Topic(text) => {
                if self.state.status_active() {
                    return vec![];
                }
                let channel = self.state.active_window().name.clone();
                vec![AppAction::Send(IrcCommand::Topic { channel, text })]
            },
            UserCommand::ToggleNickList => {
                let shown = self.state.toggle_nick_list();
                let note = format!("Nicklist {} [/nl]", visibility(shown));
                self.state.add_active_line(lines.note(&note));
                vec![AppAction::ClearScreen, AppAction::Render]
            },
            UserCommand::ToggleWindowList => {
                let shown = self.state.toggle_window_list();
                let note = format!("Channel list {} [/cl]", visibility(shown));
                self.state.add_active_line(lines.note(&note));
                vec![AppAction::ClearScreen, AppAction::Render]
            },
            UserCommand::NickUp(n) => {
                self.state.scroll_nicks_up(n);
                vec![AppAction::Render]
            },
            UserCommand::NickDown(n) => {
                self.state.scroll_nicks_down(n);
                vec![AppAction::Render]
            },
            UserCommand::Redraw => {
                vec![AppAction::QuerySize, AppAction::ClearScreen, AppAction::Render]
            },
            UserCommand::Resize => {
                self.state.add_active_line(lines.note("Querying terminal size..."));
                vec![AppAction::QuerySize, AppAction::Render]
            },
            UserCommand::Help => {
                for (usage, description) in HELP {
                    let line = if description.is_empty() {
                        lines.heading(usage)
                    } else {
                        lines.help_entry(usage, description)
                    };
                    self.state.add_active_line(line);
                }
                self.state.add_active_line(lines.note(" ↑/↓ + Enter = command history"));
                vec![AppAction::Render]
            },
            UserCommand::Unknown(_) => {
                self.state.add_active_line(lines.note("Unknown command. Type /help"));
                vec![AppAction::Render]
            },
        }
    }

    /// Leave `target` locally, parting first if it is a channel.
    fn leave(&mut self, target: String) -> Vec<AppAction> {
        if self.state.position(&target) == Some(0) {
            return vec![];
        }

        let mut actions = Vec::new();
        self.state.remove_window(&target);
        if is_channel_name(&target) {
            actions.push(AppAction::Send(IrcCommand::Part(target)));
        }
        actions.extend([AppAction::ClearScreen, AppAction::Render]);
        actions
    }
}

fn visibility(shown: bool) -> &'static str {
    if shown { "shown" } else { "hidden" }
}
