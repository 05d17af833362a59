//! Integration tests for the session state machine.
//!
//! Drives an [`App`] through realistic server conversations and checks the
//! resulting state and outbound lines.

mod common;

use common::{app, input, irc, join, sent};
use irctun_app::{AppAction, AppEvent};

#[test]
fn registration_then_autojoin() {
    let mut app = app(1);

    let connecting = app.handle(AppEvent::Connecting);
    assert_eq!(connecting, vec![AppAction::ClearScreen, AppAction::Render]);

    let nick = app.nick().to_string();
    assert_eq!(sent(&app.handle(AppEvent::Connected)), vec![
        format!("NICK {nick}"),
        "USER tunnel 0 * :Tunnel User".to_string(),
    ]);

    let welcome = irc(&mut app, &format!(":irc.example.net 001 {nick} :Welcome to IRC"));
    assert_eq!(sent(&welcome), vec!["JOIN #home"]);

    join(&mut app, "#home");
    assert_eq!(app.state().active_window().name, "#home");
}

#[test]
fn connect_failure_is_reported_in_status() {
    let mut app = app(1);
    app.handle(AppEvent::Connecting);
    let actions = app.handle(AppEvent::ConnectFailed { reason: "connection refused".into() });

    assert_eq!(actions, vec![AppAction::Render]);
    assert_eq!(app.state().windows()[0].lines().len(), 2);
}

#[test]
fn nick_collision_twice_yields_distinct_candidates() {
    let mut app = app(3);
    let original = app.nick().to_string();

    let first = sent(&irc(&mut app, &format!(":srv 433 * {original} :Nickname is already in use")));
    let second_nick = app.nick().to_string();
    let second = sent(&irc(&mut app, &format!(":srv 433 * {second_nick} :Nickname is already in use")));
    let third_nick = app.nick().to_string();

    assert_eq!(first, vec![format!("NICK {second_nick}")]);
    assert_eq!(second, vec![format!("NICK {third_nick}")]);
    assert_ne!(second_nick.to_lowercase(), original.to_lowercase());
    assert_ne!(third_nick.to_lowercase(), second_nick.to_lowercase());
}

#[test]
fn quit_removes_nick_from_every_window() {
    let mut app = app(5);
    for channel in ["#a", "#b", "#c", "#d"] {
        join(&mut app, channel);
    }
    for channel in ["#a", "#b", "#c"] {
        irc(&mut app, &format!(":srv 353 me = {channel} :@Bob carol"));
    }
    irc(&mut app, ":srv 353 me = #d :carol");

    let before: Vec<usize> = app.state().windows().iter().map(|w| w.lines().len()).collect();
    irc(&mut app, ":bob!b@host QUIT :Ping timeout");
    let after: Vec<usize> = app.state().windows().iter().map(|w| w.lines().len()).collect();

    for name in ["#a", "#b", "#c"] {
        let window = app.state().window(name).unwrap();
        assert!(!window.roster.contains("bob"));
        assert!(window.roster.contains("carol"));
    }
    // status, #a, #b, #c gain nothing/one line each; #d is untouched
    assert_eq!(after[0], before[0]);
    assert_eq!(&after[1..4], &[before[1] + 1, before[2] + 1, before[3] + 1]);
    assert_eq!(after[4], before[4]);
}

#[test]
fn private_conversation_round_trip() {
    let mut app = app(9);
    join(&mut app, "#home");
    let nick = app.nick().to_string();

    irc(&mut app, &format!(":alice!a@h PRIVMSG {nick} :are you there?"));
    assert!(app.state().window("alice").is_some_and(|w| w.highlight));
    assert_eq!(app.state().active_window().name, "#home");

    let actions = input(&mut app, "/sw alice");
    assert_eq!(actions, vec![AppAction::ClearPrompt, AppAction::ClearScreen, AppAction::Render]);
    assert!(app.state().window("alice").is_some_and(|w| !w.highlight));

    let reply = input(&mut app, "yes");
    assert_eq!(sent(&reply), vec!["PRIVMSG alice :yes"]);
}

#[test]
fn me_sends_ctcp_action() {
    let mut app = app(11);
    join(&mut app, "#home");
    let actions = input(&mut app, "/me waves");
    assert_eq!(sent(&actions), vec!["PRIVMSG #home :\u{1}ACTION waves\u{1}"]);
}

#[test]
fn topic_command_targets_active_channel() {
    let mut app = app(13);
    assert!(sent(&input(&mut app, "/topic hi")).is_empty());

    join(&mut app, "#home");
    assert_eq!(sent(&input(&mut app, "/topic")), vec!["TOPIC #home"]);
    assert_eq!(sent(&input(&mut app, "/topic new topic")), vec!["TOPIC #home :new topic"]);
}

#[test]
fn nick_list_scroll_is_clamped() {
    let mut app = app(17);
    join(&mut app, "#big");
    let names: Vec<String> = (0..40).map(|i| format!("user{i}")).collect();
    irc(&mut app, &format!(":srv 353 me = #big :{}", names.join(" ")));

    input(&mut app, "/nd 100");
    let max = 40 + 2 - app.state().main_height();
    assert_eq!(app.state().active_window().nick_scroll, max);

    input(&mut app, "/nup");
    assert_eq!(app.state().active_window().nick_scroll, max - 5);
}

#[test]
fn redraw_queries_size() {
    let mut app = app(19);
    assert_eq!(input(&mut app, "/rd"), vec![
        AppAction::ClearPrompt,
        AppAction::QuerySize,
        AppAction::ClearScreen,
        AppAction::Render,
    ]);
}
