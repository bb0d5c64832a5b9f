//! Interactive frontend on top of ratatui and crossterm
//!
//! Owns the terminal for as long as it lives: raw mode and the alternate
//! screen are entered on creation and restored on drop, even when a menu
//! fails halfway.

use std::io::{Stdout, stdout};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::{debug, trace};

use super::scripted::RenderedView;
use super::{ConfirmAnswer, MenuFrontend, MenuView};
use crate::context::{MenuContext, PreviewLocation};
use crate::error::{Result, SelectError};
use crate::menu::{KeyAction, MenuMode};
use crate::theme::{Colors, Styles};

/// Restores the terminal when dropped
struct TerminalGuard;

impl TerminalGuard {
    fn acquire() -> Result<Self> {
        enable_raw_mode()
            .map_err(|e| SelectError::terminal(format!("Failed to enable raw mode: {}", e)))?;
        crossterm::execute!(stdout(), EnterAlternateScreen, crossterm::cursor::Hide).map_err(
            |e| SelectError::terminal(format!("Failed to enter alternate screen: {}", e)),
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Always attempt cleanup, even if the menu failed
        let _ = disable_raw_mode();
        let _ = crossterm::execute!(stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    }
}

/// Frontend drawing menus on the real terminal
pub struct TerminalFrontend<'ctx> {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    ctx: &'ctx MenuContext,
    last: Option<RenderedView>,
    _guard: TerminalGuard,
}

impl std::fmt::Debug for TerminalFrontend<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalFrontend")
            .field("preview_location", &self.ctx.preview_location)
            .finish_non_exhaustive()
    }
}

impl<'ctx> TerminalFrontend<'ctx> {
    /// Take over the terminal
    pub fn new(ctx: &'ctx MenuContext) -> Result<Self> {
        let guard = TerminalGuard::acquire()?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))
            .map_err(|e| SelectError::terminal(format!("Failed to create terminal: {}", e)))?;
        debug!("terminal frontend ready");

        Ok(Self {
            terminal,
            ctx,
            last: None,
            _guard: guard,
        })
    }

    fn draw(&mut self, question: Option<(&str, bool)>) -> Result<()> {
        let location = self.ctx.preview_location;
        let last = &self.last;
        self.terminal.draw(|f| {
            if let Some(view) = last {
                draw_menu(f, &view.as_view(), location);
            }
            if let Some((question, yes)) = question {
                draw_confirm(f, question, yes);
            }
        })?;
        Ok(())
    }
}

impl MenuFrontend for TerminalFrontend<'_> {
    fn render(&mut self, view: &MenuView<'_>) -> Result<()> {
        self.last = Some(RenderedView::from(view));
        self.draw(None)
    }

    fn next_action(&mut self, mode: MenuMode) -> Result<KeyAction> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = self.ctx.keybindings.resolve(mode, &key) {
                        return Ok(action);
                    }
                    trace!(?key, "unbound key");
                }
                Event::Resize(_, _) => self.draw(None)?,
                _ => {}
            }
        }
    }

    fn confirm(&mut self, question: &str) -> Result<ConfirmAnswer> {
        let mut yes = false;
        loop {
            self.draw(Some((question, yes)))?;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match self.ctx.keybindings.resolve(MenuMode::Confirm, &key) {
                Some(KeyAction::Toggle) => yes = !yes,
                Some(action) => {
                    if let Some(answer) = confirm_answer(action, yes) {
                        return Ok(answer);
                    }
                }
                None => {}
            }
        }
    }
}

/// Answer given by `action` in the confirm dialog, `None` while undecided
fn confirm_answer(action: KeyAction, yes: bool) -> Option<ConfirmAnswer> {
    match action {
        KeyAction::Yes => Some(ConfirmAnswer::Yes),
        KeyAction::No => Some(ConfirmAnswer::No),
        KeyAction::Interrupt => Some(ConfirmAnswer::Interrupted),
        KeyAction::Confirm if yes => Some(ConfirmAnswer::Yes),
        KeyAction::Confirm => Some(ConfirmAnswer::No),
        _ => None,
    }
}

/// Draw a full menu frame
pub fn draw_menu(f: &mut Frame, view: &MenuView<'_>, location: PreviewLocation) {
    let header_lines: Vec<&str> = view.header.map(|h| h.lines().collect()).unwrap_or_default();
    let header_height = u16::try_from(header_lines.len()).unwrap_or(u16::MAX);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Title
            Constraint::Length(header_height), // Header
            Constraint::Min(3),                // Options (+ preview)
            Constraint::Length(1),             // Status
            Constraint::Length(1),             // Key hints
        ])
        .split(f.area());

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(view.title, Styles::title()))),
        chunks[0],
    );

    if !header_lines.is_empty() {
        let lines: Vec<Line> = header_lines
            .iter()
            .map(|l| Line::from(Span::styled(*l, Styles::header())))
            .collect();
        f.render_widget(Paragraph::new(lines), chunks[1]);
    }

    let (list_area, preview_area) = match view.preview {
        Some(_) => {
            let direction = match location {
                PreviewLocation::Right => Direction::Horizontal,
                PreviewLocation::Bottom => Direction::Vertical,
            };
            let split = Layout::default()
                .direction(direction)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(chunks[2]);
            (split[0], Some(split[1]))
        }
        None => (chunks[2], None),
    };

    render_options(f, view, list_area);

    if let (Some(area), Some(text)) = (preview_area, view.preview) {
        let preview = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Info ")
                    .title_style(Styles::title())
                    .border_style(Styles::border()),
            )
            .style(Styles::text())
            .wrap(Wrap { trim: false });
        f.render_widget(preview, area);
    }

    if let Some(status) = view.status {
        f.render_widget(
            Paragraph::new(Span::styled(status, Styles::status())),
            chunks[3],
        );
    }

    f.render_widget(
        Paragraph::new(Span::styled(view.hints.as_str(), Styles::hint())),
        chunks[4],
    );
}

fn render_options(f: &mut Frame, view: &MenuView<'_>, area: Rect) {
    let multi = view.mode == MenuMode::Multi;

    let items: Vec<ListItem> = view
        .rows
        .iter()
        .map(|row| {
            let cursor = if row.focused { "> " } else { "  " };
            let mut spans = vec![Span::styled(cursor, Styles::cursor())];
            if multi {
                let (mark, style) = if row.checked {
                    ("[x] ", Styles::checked())
                } else {
                    ("[ ] ", Styles::text())
                };
                spans.push(Span::styled(mark, style));
            }
            spans.push(Span::raw(row.label));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).highlight_style(Styles::highlight());
    let mut state = ListState::default().with_selected(Some(view.cursor));
    f.render_stateful_widget(list, area, &mut state);
}

/// Draw a yes/no question over whatever is on screen
pub fn draw_confirm(f: &mut Frame, question: &str, yes: bool) {
    let area = centered_rect(50, 7, f.area());
    f.render_widget(Clear, area);

    let (yes_style, no_style) = if yes {
        (Styles::button_selected(), Styles::button())
    } else {
        (Styles::button(), Styles::button_selected())
    };

    let lines = vec![
        Line::from(question.trim_end()),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Yes  ", yes_style),
            Span::raw("    "),
            Span::styled("  No  ", no_style),
        ]),
    ];

    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm ")
                .border_style(ratatui::style::Style::default().fg(Colors::SEVERITY_DANGER)),
        );
    f.render_widget(dialog, area);
}

fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width * width_percent / 100).max(30).min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
