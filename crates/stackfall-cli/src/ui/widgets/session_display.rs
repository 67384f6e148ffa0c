use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use stackfall_engine::{SessionState, Snapshot};

use crate::ui::widgets::{
    BoardDisplay, GAME_OVER_BINDINGS, KeyBindingDisplay, PLAY_BINDINGS, PieceDisplay,
    StartDisplay, StatsDisplay, color, style,
};

/// Whole-screen view of a session, chosen by its state.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: Snapshot<'a>,
    show_ghost: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: Snapshot<'a>, show_ghost: bool) -> Self {
        Self {
            snapshot,
            show_ghost,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    fn render_playfield(&self, area: Rect, buf: &mut Buffer) {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = if self.snapshot.is_game_over() {
            color::RED
        } else {
            color::WHITE
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board = BoardDisplay::new(self.snapshot.field())
            .falling_piece(self.snapshot.current_piece().copied())
            .ghost(self.snapshot.ghost_piece().filter(|_| self.show_ghost))
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let next_panel = PieceDisplay::new()
            .matrix(self.snapshot.next_matrix())
            .block(panel("NEXT"));
        let stats = StatsDisplay::new(self.snapshot).block(panel("STATS"));

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(game_board.height()),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(area);

        let [board_column, side_column] = Layout::horizontal([
            Constraint::Length(game_board.width()),
            Constraint::Length(u16::max(next_panel.width(), stats.width())),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);

        let [next_area, stats_area] = Layout::vertical([
            Constraint::Length(next_panel.height()),
            Constraint::Length(stats.height()),
        ])
        .spacing(1)
        .areas(side_column);
        let next_area = next_area.layout::<1>(&Layout::horizontal([Constraint::Length(
            next_panel.width(),
        )]))[0];

        let board_area = board_column;
        let board_width = game_board.width();
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);
        stats.render(stats_area, buf);

        let bindings = if self.snapshot.is_game_over() {
            GAME_OVER_BINDINGS
        } else {
            PLAY_BINDINGS
        };
        KeyBindingDisplay::new(bindings).render(help_area, buf);

        if self.snapshot.is_game_over() {
            self.render_game_over_popup(
                board_area.centered(Constraint::Length(board_width), Constraint::Length(5)),
                buf,
            );
        }
    }

    fn render_game_over_popup(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::new().fg(color::WHITE).bg(color::RED);
        let block = Block::new().style(style);
        let inner = block.inner(area);
        let text = Text::from(vec![
            Line::from("GAME OVER"),
            Line::from(format!("Score: {}", self.snapshot.score())),
            Line::from(format!("Level: {}", self.snapshot.level())),
        ])
        .style(style)
        .centered();

        Clear.render(area, buf);
        block.render(area, buf);
        text.render(inner.centered_vertically(Constraint::Length(3)), buf);
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.snapshot.session_state() {
            SessionState::Start => StartDisplay.render(area, buf),
            SessionState::Playing | SessionState::GameOver => self.render_playfield(area, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use stackfall_engine::{Command, GameSession, PieceSeed};

    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 80, 26);

    fn render_session(session: &GameSession) -> Buffer {
        let mut buf = Buffer::empty(SCREEN);
        SessionDisplay::new(session.snapshot(), true).render(SCREEN, &mut buf);
        buf
    }

    fn render_to_string(session: &GameSession) -> String {
        let area = SCREEN;
        let buf = render_session(session);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn session() -> GameSession {
        GameSession::with_seed(PieceSeed::from_bytes([9; 16]))
    }

    #[test]
    fn test_start_screen() {
        let screen = render_to_string(&session());
        assert!(screen.contains("S T A C K F A L L"));
        assert!(screen.contains("Press Enter to start"));
        assert!(!screen.contains("STATS"));
    }

    #[test]
    fn test_play_screen_panels() {
        let mut session = session();
        session.advance(Command::Confirm);
        let screen = render_to_string(&session);
        assert!(screen.contains("NEXT"));
        assert!(screen.contains("STATS"));
        assert!(screen.contains("SCORE:"));
        assert!(screen.contains("Hard Drop"));
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_popup() {
        let mut session = session();
        session.advance(Command::Confirm);
        while !session.snapshot().is_game_over() {
            session.advance(Command::HardDrop);
        }
        let screen = render_to_string(&session);
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("Level: 1"));
        assert!(screen.contains("Restart"));
    }

    #[test]
    fn test_game_over_board_shows_only_locked_cells() {
        let mut session = session();
        session.advance(Command::Confirm);
        while !session.snapshot().is_game_over() {
            session.advance(Command::HardDrop);
        }
        let buf = render_session(&session);
        let screen = render_to_string(&session);
        assert!(!screen.contains("[]"));

        // the board is the leftmost bordered panel
        let (x0, y0) = (0..SCREEN.height)
            .find_map(|y| {
                (0..SCREEN.width)
                    .find(|&x| buf[(x, y)].symbol() == "┌")
                    .map(|x| (x, y))
            })
            .unwrap();
        let locked_only = BoardDisplay::new(session.field()).block(
            Block::bordered()
                .border_style(color::RED)
                .style(style::DEFAULT),
        );
        let board_area = Rect::new(x0, y0, locked_only.width(), locked_only.height());
        let mut expected = Buffer::empty(SCREEN);
        locked_only.render(board_area, &mut expected);

        // spawn rows sit above the popup
        for y in y0 + 1..y0 + 3 {
            for x in board_area.left() + 1..board_area.right() - 1 {
                assert_eq!(buf[(x, y)], expected[(x, y)], "({x}, {y})");
            }
        }
    }
}
