//! Frame rendering checked through a minimal terminal emulator.

use irctun_app::SessionState;
use irctun_proto::Geometry;
use irctun_tui::{View, ansi, clear_prompt, flash_input, render};

/// Just enough of a VT100 to place text: cursor moves, line erase, CR/LF.
/// SGR and mode sequences are consumed without effect.
struct Screen {
    cells: Vec<Vec<char>>,
    cursor: (usize, usize),
}

impl Screen {
    fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![vec![' '; usize::from(width)]; usize::from(height)],
            cursor: (0, 0),
        }
    }

    fn apply(&mut self, bytes: &[u8]) {
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        for unit in ansi::units(&text) {
            match unit {
                ansi::Unit::Control(seq) => self.control(seq),
                ansi::Unit::Visible('\r') => self.cursor.1 = 0,
                ansi::Unit::Visible('\n') => self.cursor.0 += 1,
                ansi::Unit::Visible(c) => {
                    let (row, col) = self.cursor;
                    if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
                        *cell = c;
                    }
                    self.cursor.1 += 1;
                },
            }
        }
    }

    fn control(&mut self, seq: &str) {
        let Some(body) = seq.strip_prefix("\x1b[") else {
            return;
        };
        let (params, last) = body.split_at(body.len() - 1);
        let nums: Vec<usize> = params.split(';').filter_map(|p| p.parse().ok()).collect();
        let (row, col) = self.cursor;
        match last {
            "H" => {
                let r = nums.first().copied().unwrap_or(1);
                let c = nums.get(1).copied().unwrap_or(1);
                self.cursor = (r - 1, c - 1);
            },
            "K" if params == "2" => {
                if let Some(line) = self.cells.get_mut(row) {
                    line.fill(' ');
                }
            },
            "K" => {
                if let Some(line) = self.cells.get_mut(row) {
                    line.iter_mut().skip(col).for_each(|c| *c = ' ');
                }
            },
            "J" => self.cells.iter_mut().for_each(|l| l.fill(' ')),
            _ => {},
        }
    }

    fn text(&self) -> String {
        self.cells
            .iter()
            .map(|l| l.iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn row(&self, row: usize) -> String {
        self.cells[row].iter().collect::<String>().trim_end().to_string()
    }
}

fn state(width: u16, height: u16) -> SessionState {
    let mut state = SessionState::new("tester");
    state.set_geometry(Geometry { width, height });
    let rust = state.ensure_window("#rust");
    if let Some(w) = state.window_mut("#rust") {
        w.mode = "+nt".into();
        w.topic = "Rust talk".into();
        for nick in ["zed", "+voice", "alice", "~owner", "bob2", "@op"] {
            w.roster.insert(nick);
        }
    }
    let bob = state.ensure_window("bob");
    state.switch_to_index(rust);
    state.add_line(bob, "psst".into());
    state
}

fn draw(state: &SessionState) -> Screen {
    let view = View::capture(state);
    let mut screen = Screen::new(view.width, view.height);
    screen.apply(&render(&view).unwrap());
    screen
}

fn nick_pane(screen: &Screen, rows: usize) -> Vec<String> {
    (1..=rows).map(|r| screen.row(r).chars().skip(38).collect::<String>()).collect()
}

#[test]
fn narrow_frame_has_no_side_panes() {
    let mut state = state(40, 8);
    let rust = state.ensure_window("#rust");
    for line in ["one", "two", "three", "four", "five"] {
        state.add_line(rust, line.into());
    }
    state.add_line(
        rust,
        "\x1b[31mthis line is definitely longer than forty columns wide\x1b[0m".into(),
    );

    let screen = draw(&state);
    insta::assert_snapshot!(screen.text(), @r"
 #rust [+nt] │ Rust talk
two
three
four
five
this line is definitely longer than fort
 #rust │ +nt │ 40x8
tester »
");
    assert_eq!(screen.cursor, (7, 9));
}

#[test]
fn wide_frame_shows_windows_and_nicks() {
    let mut state = state(60, 8);
    let rust = state.ensure_window("#rust");
    state.add_line(rust, "hi there".into());
    state.add_line(rust, "0123456789abcdefghijklmnopqrstuvwxyz".into());

    let screen = draw(&state);
    insta::assert_snapshot!(screen.text(), @r"
 #rust [+nt] │ Rust talk
 0 status     │hi there              │ 6 nicks
 1 #rust      │0123456789abcdefghijkl│ ~owner
 2 bob        │                      │ @op
              │                      │ +voice
              │                      │ ▼ /nd
 #rust │ +nt │ 60x8
tester »
");
}

#[test]
fn scrolled_roster_shows_both_hints() {
    let mut state = state(60, 8);
    state.scroll_nicks_down(2);

    let pane = nick_pane(&draw(&state), 5);
    assert_eq!(pane, vec![" 6 nicks", " ▲ /nup", " +voice", " alice", " ▼ /nd"]);
}

#[test]
fn stale_nick_scroll_is_clamped_after_growing() {
    let mut state = state(60, 8);
    state.scroll_nicks_down(100);
    state.set_geometry(Geometry { width: 60, height: 12 });

    let pane = nick_pane(&draw(&state), 7);
    assert_eq!(pane, vec![
        " 6 nicks", " ~owner", " @op", " +voice", " alice", " bob2", " zed"
    ]);
}

#[test]
fn stale_nick_scroll_keeps_last_page_full() {
    let mut state = state(60, 8);
    if let Some(w) = state.window_mut("#rust") {
        for nick in ["user1", "user2", "user3", "user4"] {
            w.roster.insert(nick);
        }
    }
    state.scroll_nicks_down(100);
    state.set_geometry(Geometry { width: 60, height: 10 });

    let pane = nick_pane(&draw(&state), 7);
    assert_eq!(pane, vec![
        " 10 nicks", " ▲ /nup", " user1", " user2", " user3", " user4", " zed"
    ]);
}

#[test]
fn query_window_hides_nick_pane() {
    let mut state = state(80, 10);
    state.switch_to_name("bob");
    let screen = draw(&state);
    assert!(!screen.text().contains("nicks"));
    assert_eq!(screen.row(0), " bob");
}

#[test]
fn frame_confines_scrolling_above_prompt() {
    let state = state(60, 8);
    let bytes = render(&View::capture(&state)).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("\x1b[r"));
    assert!(text.contains("\x1b[?7l"));
    assert!(text.contains("\x1b[1;7r"));
    assert!(text.ends_with("\x1b[?25h"));
}

#[test]
fn long_nick_is_cut_on_prompt() {
    let mut state = state(60, 8);
    state.set_nick("averyveryverylongnickname");
    let screen = draw(&state);
    assert_eq!(screen.row(7), "averyveryverylo »");
    assert_eq!(screen.cursor, (7, 18));
}

#[test]
fn prompt_helpers_touch_only_the_last_row() {
    let state = state(60, 8);
    let view = View::capture(&state);
    let mut screen = draw(&state);

    screen.apply(&flash_input(&view, "/join #rust").unwrap());
    assert_eq!(screen.row(7), "tester » /join #rust");

    screen.apply(&clear_prompt(view.height).unwrap());
    assert_eq!(screen.row(7), "");
    assert_eq!(screen.row(6), " #rust │ +nt │ 60x8");
}
