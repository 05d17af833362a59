//! Nick list pane.
//!
//! The first row is a member count header. When the roster does not fit,
//! the first and last data rows turn into paging hints as needed.

use std::io;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, StyledContent, Stylize},
    terminal::{Clear, ClearType},
};
use irctun_app::Rank;

use super::Layout;
use crate::{View, ansi::clip};

pub(super) struct NickPane<'a> {
    members: &'a [String],
    scroll: usize,
    data_rows: usize,
    show_up: bool,
    show_down: bool,
}

impl<'a> NickPane<'a> {
    pub(super) fn new(view: &'a View, layout: &Layout) -> Self {
        let members = view.members.as_slice();
        let data_rows = usize::from(layout.main_height).saturating_sub(1);

        // The stored offset may predate a resize or a shrinking roster.
        let overflow = members.len() > data_rows;
        let scroll = if overflow {
            view.nick_scroll.min(members.len() - data_rows.saturating_sub(1))
        } else {
            0
        };
        let show_up = overflow && scroll > 0;
        let avail = data_rows.saturating_sub(usize::from(show_up));
        let show_down = overflow && scroll + avail < members.len();

        Self { members, scroll, data_rows, show_up, show_down }
    }

    pub(super) fn render_row(
        &self,
        out: &mut Vec<u8>,
        layout: &Layout,
        row: u16,
    ) -> io::Result<()> {
        let y = row + 1;
        let separator = layout.nick_separator();
        queue!(out, MoveTo(separator, y), Print("│".dark_grey()), MoveTo(separator + 1, y))?;

        if row == 0 {
            let header = format!(" {} nicks", self.members.len());
            queue!(out, Print(header.cyan().bold()))?;
        } else {
            let data = usize::from(row) - 1;
            if data == 0 && self.show_up {
                queue!(out, Print(" ▲ /nup".dark_grey()))?;
            } else if data + 1 == self.data_rows && self.show_down {
                queue!(out, Print(" ▼ /nd".dark_grey()))?;
            } else {
                let index = self.scroll + data - usize::from(self.show_up);
                if let Some(member) = self.members.get(index) {
                    let display =
                        format!(" {}", clip(member, usize::from(layout.nick_width) - 1));
                    queue!(out, Print(styled(display, Rank::of(member))))?;
                }
            }
        }
        queue!(out, Clear(ClearType::UntilNewLine))
    }
}

fn styled(text: String, rank: Rank) -> StyledContent<String> {
    match rank {
        Rank::Owner => text.red().bold(),
        Rank::Admin => text.red(),
        Rank::Op => text.green(),
        Rank::HalfOp => text.cyan(),
        Rank::Voice => text.yellow(),
        Rank::None => text.white(),
    }
}
