//! Stateless rendering of the board, HUD and victory banner.

use hanoi_core::{Board, Disk, DragState, Highlight, Mode, PegId, ScoreStore, Session};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::layout::BoardLayout;

const PALETTE: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// Renders one frame and returns the board layout used.
pub fn draw<S: ScoreStore>(frame: &mut Frame, session: &Session<S>, status: &str) -> BoardLayout {
    let [title, hud, board_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    let heading = Paragraph::new("Tower of Hanoi")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(heading, title);

    frame.render_widget(hud_line(session), hud);

    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    let board = session.board();
    let layout = BoardLayout::new(inner, board.peg_count(), board.disk_count());
    if layout.fits() {
        frame.render_widget(BoardView::new(session, layout), inner);
    } else {
        let warning = Paragraph::new(format!(
            "Terminal too small: need {} rows for {} disks",
            layout.required_height(),
            board.disk_count()
        ))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
        frame.render_widget(warning, inner);
    }

    let footer = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" s solve | x stop | r restart | q quit "),
        );
    frame.render_widget(footer, status_area);

    if let Some(outcome) = session.outcome() {
        draw_banner(frame, inner, *outcome.summary().move_count(), *outcome.perfect());
    }

    layout
}

fn hud_line<S: ScoreStore>(session: &Session<S>) -> Paragraph<'static> {
    let board = session.board();
    let minimum = session
        .min_moves()
        .map_or_else(|| "?".to_string(), |m| m.to_string());
    let elapsed = board.elapsed().as_secs();
    let mode = match session.mode() {
        Mode::Manual => Span::styled("manual", Style::default().fg(Color::Green)),
        Mode::AutoPlay => Span::styled("solving", Style::default().fg(Color::Magenta)),
    };
    let best = session.best().map_or_else(
        || "none".to_string(),
        |r| format!("{} moves / {:.1}s", r.move_count(), r.elapsed().as_secs_f32()),
    );

    let line = Line::from(vec![
        Span::raw(format!("Moves: {}  ", board.move_count())),
        Span::raw(format!("Minimum: {}  ", minimum)),
        Span::raw(format!("Time: {:02}:{:02}  ", elapsed / 60, elapsed % 60)),
        Span::raw(format!("Best: {}  ", best)),
        Span::raw("Mode: "),
        mode,
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

fn draw_banner(frame: &mut Frame, area: Rect, moves: u32, perfect: bool) {
    let text = if perfect {
        format!("Perfect! Solved in {} moves", moves)
    } else {
        format!("Solved in {} moves", moves)
    };
    let width = (text.len() as u16 + 4).min(area.width);
    let banner = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(3) / 2,
        width,
        3.min(area.height),
    );
    frame.render_widget(Clear, banner);
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        banner,
    );
}

fn disk_style(disk: Disk) -> Style {
    let color = PALETTE[usize::from(disk.size().saturating_sub(1)) % PALETTE.len()];
    Style::default().bg(color)
}

/// Pegs, stacks, the held disk and the disk in flight.
struct BoardView<'a, S> {
    session: &'a Session<S>,
    layout: BoardLayout,
}

impl<'a, S: ScoreStore> BoardView<'a, S> {
    fn new(session: &'a Session<S>, layout: BoardLayout) -> Self {
        Self { session, layout }
    }

    fn peg_style(&self, peg: PegId) -> Style {
        match self.session.controller().highlight() {
            Some(Highlight::Legal(p)) if p == peg => Style::default().fg(Color::Green),
            Some(Highlight::Illegal(p)) if p == peg => Style::default().fg(Color::Red),
            _ if peg == self.session.board().target_peg() => Style::default().fg(Color::White),
            _ => Style::default().fg(Color::DarkGray),
        }
    }

    /// Peg whose top disk is drawn elsewhere this frame.
    fn lifted_from(&self) -> Option<PegId> {
        if let Some(frame) = self.session.frame() {
            return Some(frame.mov.to);
        }
        match self.session.controller().state() {
            DragState::Dragging { origin, .. } => Some(origin),
            _ => None,
        }
    }

    fn draw_disk(&self, buf: &mut Buffer, center: u16, row: u16, disk: Disk) {
        let (start, width) = self.layout.disk_span(center, disk);
        let area = self.layout.area();
        let label = format!("{:^width$}", disk.size(), width = usize::from(width));
        let visible = area.right().saturating_sub(start).min(width);
        if start < area.x || row < area.y || row >= area.bottom() || visible == 0 {
            return;
        }
        buf.set_stringn(
            start,
            row,
            label,
            usize::from(visible),
            disk_style(disk).fg(Color::Black),
        );
    }

    fn draw_stacks(&self, board: &Board, buf: &mut Buffer) {
        let lifted = self.lifted_from();
        for (peg, stack) in board.pegs().iter().enumerate() {
            let center = self.layout.peg_center(peg);
            let style = self.peg_style(peg);

            let band = self.layout.band(peg);
            let base = "▀".repeat(usize::from(band.width.saturating_sub(2)));
            buf.set_string(band.x + 1, self.layout.base_row(), base, style);
            for level in 0..usize::from(board.disk_count()) + 1 {
                if let Some(row) = self.layout.level_row(level) {
                    buf.set_string(center, row, "│", style);
                }
            }

            let shown = if lifted == Some(peg) {
                stack.len().saturating_sub(1)
            } else {
                stack.len()
            };
            for (level, disk) in stack.disks().iter().take(shown).enumerate() {
                if let Some(row) = self.layout.level_row(level) {
                    self.draw_disk(buf, center, row, *disk);
                }
            }
        }
    }
}

impl<S: ScoreStore> Widget for BoardView<'_, S> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let board = self.session.board();
        self.draw_stacks(board, buf);

        if let Some(frame) = self.session.frame() {
            let (column, row) = self.layout.cell_for(frame.position);
            self.draw_disk(buf, column, row, frame.disk);
        } else if let DragState::Dragging { disk, pointer, .. } = self.session.controller().state() {
            let area = self.layout.area();
            let row = pointer.row.clamp(area.y, area.bottom().saturating_sub(1));
            self.draw_disk(buf, pointer.column, row, disk);
        }
    }
}
