//! Server message reducer.
//!
//! Applies each [`IrcEvent`] to the session state and decides whether the
//! frame needs redrawing. Numeric replies other than the names burst are also
//! echoed to the status window before their specific handling runs.

use irctun_proto::{
    IrcCommand, IrcEvent, Message, RPL_ENDOFNAMES, RPL_NAMREPLY, is_channel_name,
};
use tracing::debug;

use crate::{
    App, AppAction, Environment,
    format::{Lines, sanitize},
    nick::fresh_nick,
    roster::fold_case,
};

impl<E: Environment> App<E> {
    /// Apply one server line.
    pub(crate) fn handle_irc(&mut self, msg: &Message) -> Vec<AppAction> {
        let echoed = self.echo_numeric(msg);
        let event = IrcEvent::from_message(msg);
        let mut actions = if matches!(event, IrcEvent::Malformed) && msg.numeric().is_none() {
            self.diagnostic(&msg.command, &msg.params.join(" "))
        } else {
            self.apply(event)
        };
        if echoed && self.state.status_visible() && !actions.contains(&AppAction::Render) {
            actions.push(AppAction::Render);
        }
        actions
    }

    fn echo_numeric(&mut self, msg: &Message) -> bool {
        let Some(code) = msg.numeric() else {
            return false;
        };
        if code == RPL_NAMREPLY || code == RPL_ENDOFNAMES {
            return false;
        }

        // The first parameter is our own nick; it carries no information.
        let text = match msg.params.as_slice() {
            [_, rest @ ..] if !rest.is_empty() => rest.join(" "),
            all => all.join(" "),
        };
        let line = Lines::new(&self.env).numeric(code, &text);
        self.state.add_status_line(line);
        true
    }

    /// Log an unhandled line to status.
    fn diagnostic(&mut self, command: &str, params: &str) -> Vec<AppAction> {
        let line = Lines::new(&self.env).plain(&format!("{command} {params}"));
        self.state.add_status_line(line);
        if self.state.status_visible() { vec![AppAction::Render] } else { vec![] }
    }

    fn apply(&mut self, event: IrcEvent) -> Vec<AppAction> {
        let lines = Lines::new(&self.env);
        match event {
            IrcEvent::Ping { token } => vec![AppAction::Send(IrcCommand::Pong(token))],
            IrcEvent::Welcome => {
                if self.autojoined {
                    return vec![];
                }
                self.autojoined = true;
                self.state.add_status_line(lines.banner("Connected! Type /help for commands"));
                vec![AppAction::Send(IrcCommand::Join(self.channel.clone())), AppAction::Render]
            },
            IrcEvent::ChannelMode { channel, mode } => {
                if let Some(window) = self.state.window_mut(&channel) {
                    window.mode = sanitize(&mode);
                }
                vec![AppAction::Render]
            },
            IrcEvent::Topic { channel, topic } => {
                if let Some(window) = self.state.window_mut(&channel) {
                    window.topic = sanitize(&topic);
                }
                vec![AppAction::Render]
            },
            IrcEvent::Names { channel, names } => {
                if let Some(window) = self.state.window_mut(&channel) {
                    for name in &names {
                        window.roster.insert(name);
                    }
                }
                vec![]
            },
            IrcEvent::EndOfNames => vec![AppAction::Render],
            IrcEvent::NickInUse => {
                let nick = fresh_nick(&self.env, self.state.nick());
                debug!(%nick, "nickname in use, retrying");
                self.state.set_nick(nick.clone());
                let line = lines.note(&format!("Nick taken, trying {nick}"));
                self.state.add_status_line(line);
                vec![AppAction::Send(IrcCommand::Nick(nick)), AppAction::Render]
            },
            IrcEvent::Numeric { .. } | IrcEvent::Malformed => vec![],
            IrcEvent::Join { nick, channel } => {
                if self.state.is_self(&nick) {
                    let index = self.state.ensure_window(&channel);
                    if let Some(window) = self.state.window_at_mut(index) {
                        window.roster.clear();
                        window.nick_scroll = 0;
                        window.push_line(lines.note_with("Joined ", &channel, ""));
                        window.push_line(lines.note("Type to chat │ /help for commands"));
                    }
                    self.state.switch_to_index(index);
                    return vec![
                        AppAction::Send(IrcCommand::Mode(channel)),
                        AppAction::ClearScreen,
                        AppAction::Render,
                    ];
                }

                let Some(index) = self.state.position(&channel) else {
                    return vec![];
                };
                if let Some(window) = self.state.window_at_mut(index) {
                    window.roster.insert(&nick);
                }
                self.state.add_line(index, lines.note(&format!("→ {} joined", sanitize(&nick))));
                vec![AppAction::Render]
            },
            IrcEvent::Part { nick, channel } => {
                if self.state.is_self(&nick) {
                    self.state.remove_window(&channel);
                    return vec![AppAction::ClearScreen, AppAction::Render];
                }

                let Some(index) = self.state.position(&channel) else {
                    return vec![];
                };
                if let Some(window) = self.state.window_at_mut(index) {
                    window.roster.remove(&nick);
                }
                self.state.add_line(index, lines.note(&format!("← {} left", sanitize(&nick))));
                vec![AppAction::Render]
            },
            IrcEvent::Quit { nick, reason } => {
                let affected = self.state.windows_with_nick(&nick);
                let text = if reason.is_empty() {
                    format!("← {} quit", sanitize(&nick))
                } else {
                    format!("← {} quit ({})", sanitize(&nick), sanitize(&reason))
                };
                for &index in &affected {
                    if let Some(window) = self.state.window_at_mut(index) {
                        window.roster.remove(&nick);
                    }
                    self.state.add_line(index, lines.note(&text));
                }
                if affected.is_empty() { vec![] } else { vec![AppAction::Render] }
            },
            IrcEvent::Kick { channel, nick, reason } => {
                let index = self.state.position(&channel);

                if self.state.is_self(&nick) {
                    let Some(index) = index else {
                        return vec![AppAction::Send(IrcCommand::Join(channel))];
                    };
                    let text = if reason.is_empty() {
                        String::new()
                    } else {
                        format!("({reason})")
                    };
                    self.state.add_line(index, lines.error("Kicked! Rejoining...", &text));
                    return vec![AppAction::Send(IrcCommand::Join(channel)), AppAction::Render];
                }

                let Some(index) = index else {
                    return vec![];
                };

                if let Some(window) = self.state.window_at_mut(index) {
                    window.roster.remove(&nick);
                }
                let text = if reason.is_empty() {
                    format!("← {} kicked", sanitize(&nick))
                } else {
                    format!("← {} kicked ({})", sanitize(&nick), sanitize(&reason))
                };
                self.state.add_line(index, lines.note(&text));
                vec![AppAction::Render]
            },
            IrcEvent::Privmsg { sender, target, text, action } => {
                let line = if action {
                    lines.action(&sender, &text)
                } else {
                    lines.chat(&sender, &text)
                };

                if is_channel_name(&target) {
                    let Some(index) = self.state.position(&target) else {
                        return vec![];
                    };
                    if !action && self.state.is_self(&sender) {
                        return vec![];
                    }
                    self.state.add_line(index, line);
                    let mentioned = fold_case(&text).contains(&fold_case(self.state.nick()));
                    if !action
                        && mentioned
                        && index != self.state.active_index()
                        && let Some(window) = self.state.window_at_mut(index)
                    {
                        window.highlight = true;
                    }
                    vec![AppAction::Render]
                } else if self.state.is_self(&target) {
                    let index = self.state.ensure_window(&sender);
                    self.state.add_line(index, line);
                    if index != self.state.active_index()
                        && let Some(window) = self.state.window_at_mut(index)
                    {
                        window.highlight = true;
                    }
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            IrcEvent::Notice { sender, from_server, text } => {
                let line = lines.notice(&sender, &text);
                if from_server {
                    self.state.add_status_line(line);
                } else {
                    self.state.add_active_line(line);
                }
                vec![AppAction::Render]
            },
            IrcEvent::Nick { old, new } => {
                let affected = self.state.windows_with_nick(&old);
                for &index in &affected {
                    if let Some(window) = self.state.window_at_mut(index) {
                        window.roster.rename(&old, &new);
                    }
                }

                if self.state.is_self(&old) {
                    self.state.set_nick(new.clone());
                    let line = lines.note(&format!("You are now {}", sanitize(&new)));
                    self.state.add_active_line(line);
                } else {
                    let text = format!("{} → {}", sanitize(&old), sanitize(&new));
                    for &index in &affected {
                        self.state.add_line(index, lines.note(&text));
                    }
                }
                vec![AppAction::Render]
            },
            IrcEvent::ChannelModeChange { channel } => {
                if let Some(window) = self.state.window_mut(&channel) {
                    window.roster.clear();
                }
                vec![
                    AppAction::Send(IrcCommand::Mode(channel.clone())),
                    AppAction::Send(IrcCommand::Names(channel)),
                ]
            },
            IrcEvent::Other { command, params } => self.diagnostic(&command, &params),
        }
    }
}
