//! TUI application for replaying a recorded hand.
//!
//! The table is drawn on a ratatui canvas from the hand projected at the
//! current replay position. All playback control goes through the replay
//! actor's handle; the UI only redraws from the state the actor publishes.

use crate::{
    commands::{ViewerCommand, parse_command},
    keymap::map_key,
};
use anyhow::{Context, Result};
use hand_replay::{
    Preferences,
    cards::{Card, CardColor},
    geometry::{
        Dimensions, Point, TableLayout,
        constants::{TABLE_BORDER_WIDTH, TABLE_RAIL_WIDTH},
        format_amount, format_pot,
    },
    hand::{Hand, PlayerState, Street, TableState, project},
    playback::{Phase, PlaybackState, ReplayHandle},
};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap,
        canvas::{Canvas, Context as CanvasContext, Line as CanvasLine},
    },
};
use std::{path::PathBuf, time::Duration};

const HELP: &str = "\
space       play / pause
s           stop and rewind
← →         step back / forward
1 2 5 0     speed 1x, 2x, 5x, 10x
f           jump to the end
b           toggle amounts between big blinds and euros
:           open the command line
q, esc      quit

commands:
  play, pause, stop, next, back, finish
  jump <action number>
  speed <1|2|5|10>
  format, help, quit
";
const POLL_TIMEOUT: Duration = Duration::from_millis(50);
/// Segments used to approximate the table ellipse
const ELLIPSE_SEGMENTS: usize = 72;

#[derive(Clone, Copy, PartialEq)]
enum StatusKind {
    Info,
    Error,
}

/// Last message shown in the bottom bar
#[derive(Clone)]
struct Status {
    kind: StatusKind,
    content: String,
}

#[derive(Clone, Copy, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

fn card_span(card: &Card) -> Span<'static> {
    let style = match card.color() {
        CardColor::Red => Style::default().light_red().bold(),
        CardColor::Black => Style::default().white().bold(),
    };
    Span::styled(card.to_string(), style)
}

fn cards_line(cards: &[Card]) -> Line<'static> {
    let mut spans = Vec::with_capacity(cards.len() * 2);
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(card_span(card));
    }
    Line::from(spans)
}

fn table_title(hand: &Hand, street: Street) -> String {
    match hand.played_at {
        Some(played_at) => format!(
            " {} · {} · {} · {}  ",
            hand.table_name,
            hand.id,
            played_at.format("%Y-%m-%d %H:%M"),
            street
        ),
        None => format!(" {} · {} · {}  ", hand.table_name, hand.id, street),
    }
}

fn phase_span(phase: Phase) -> Span<'static> {
    let repr = phase.to_string();
    match phase {
        Phase::Idle => repr.dark_gray(),
        Phase::Playing => repr.light_green().bold(),
        Phase::Paused => repr.light_yellow(),
        Phase::Finished => repr.light_blue(),
    }
}

fn text_width(line: &Line<'_>) -> f64 {
    line.width() as f64
}

/// TUI App state
pub struct TuiApp {
    hand: Hand,
    handle: ReplayHandle,
    state: PlaybackState,
    preferences: Preferences,
    preferences_path: PathBuf,
    /// Whether to display the help menu window
    show_help_menu: bool,
    /// Command line contents while it is open
    prompt: Option<String>,
    status: Option<Status>,
    timeline_state: ListState,
}

impl TuiApp {
    pub fn new(
        hand: Hand,
        handle: ReplayHandle,
        preferences: Preferences,
        preferences_path: PathBuf,
    ) -> Self {
        let state = handle.current();
        Self {
            hand,
            handle,
            state,
            preferences,
            preferences_path,
            show_help_menu: false,
            prompt: None,
            status: None,
            timeline_state: ListState::default(),
        }
    }

    fn amount(&self, cents: u64) -> String {
        format_amount(cents, self.preferences.amount_format, self.hand.big_blind)
    }

    fn set_status(&mut self, kind: StatusKind, content: String) {
        self.status = Some(Status { kind, content });
    }

    /// Apply a command from a key or the command line
    async fn apply(&mut self, command: ViewerCommand) -> Result<Flow> {
        match command {
            ViewerCommand::Playback(command) => {
                log::debug!("Sending {command}");
                self.handle
                    .send(command)
                    .await
                    .context("Replay stopped unexpectedly")?;
            }
            ViewerCommand::ToggleFormat => {
                let format = self.preferences.toggle_amount_format();
                match self.preferences.save(&self.preferences_path) {
                    Ok(()) => self.set_status(StatusKind::Info, format!("Amounts in {format}")),
                    Err(err) => {
                        log::warn!("{err}");
                        self.set_status(StatusKind::Error, err.to_string());
                    }
                }
            }
            ViewerCommand::Help => self.show_help_menu = !self.show_help_menu,
            ViewerCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Handle a key press while the command line is open
    async fn handle_prompt_key(&mut self, code: KeyCode) -> Result<Flow> {
        let Some(input) = self.prompt.as_mut() else {
            return Ok(Flow::Continue);
        };
        match code {
            KeyCode::Enter => {
                let line = std::mem::take(input);
                self.prompt = None;
                match parse_command(&line) {
                    Ok(command) => return self.apply(command).await,
                    Err(err) => self.set_status(StatusKind::Error, err.to_string()),
                }
            }
            KeyCode::Esc => self.prompt = None,
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            _ => {}
        }
        Ok(Flow::Continue)
    }

    async fn handle_key(&mut self, code: KeyCode) -> Result<Flow> {
        if self.prompt.is_some() {
            return self.handle_prompt_key(code).await;
        }
        if self.show_help_menu && matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Tab)
        {
            self.show_help_menu = false;
            return Ok(Flow::Continue);
        }
        if code == KeyCode::Char(':') {
            self.prompt = Some(String::new());
            self.status = None;
            return Ok(Flow::Continue);
        }

        match map_key(code, &self.state) {
            Some(command) => self.apply(command).await,
            None => Ok(Flow::Continue),
        }
    }

    /// Draw a seat: name, stack, bet and known hole cards
    fn draw_seat(&self, ctx: &mut CanvasContext<'_>, at: Point, player: &PlayerState, height: f64) {
        let y = height - at.y;

        let mut name = Span::raw(player.name.clone());
        if player.is_hero {
            name = name.light_green();
        }
        if player.is_active {
            name = name.bold().reversed();
        }
        if player.is_folded {
            name = name.dark_gray();
        }
        let name = Line::from(vec![
            Span::raw(format!("{} ", player.seat)).dark_gray(),
            name,
        ]);
        ctx.print(at.x - text_width(&name) / 2.0, y + 2.0, name);

        let stack = Line::from(self.amount(player.stack));
        let stack = if player.is_folded {
            stack.dark_gray()
        } else {
            stack
        };
        ctx.print(at.x - text_width(&stack) / 2.0, y, stack);

        if !player.cards.is_empty() && !player.is_folded {
            let cards = cards_line(&player.cards);
            ctx.print(at.x - text_width(&cards) / 2.0, y - 2.0, cards);
        } else if player.current_bet > 0 {
            let bet = Line::from(format!("bet {}", self.amount(player.current_bet))).light_yellow();
            ctx.print(at.x - text_width(&bet) / 2.0, y - 2.0, bet);
        }
    }

    /// Render the table canvas
    fn draw_table(&self, frame: &mut Frame, area: Rect, table: &TableState) {
        let block = Block::bordered().title(table_title(&self.hand, table.street));
        let inner = block.inner(area);
        if inner.width == 0 || inner.height == 0 {
            frame.render_widget(block, area);
            return;
        }

        // A terminal cell is about twice as tall as it is wide
        let container = Dimensions {
            width: f64::from(inner.width),
            height: f64::from(inner.height) * 2.0,
        };
        let layout = TableLayout::compute(container);
        let height = container.height;

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([0.0, container.width])
            .y_bounds([0.0, container.height])
            .paint(|ctx| {
                let rail = (TABLE_BORDER_WIDTH + TABLE_RAIL_WIDTH) * layout.scale.scale;
                draw_ellipse(ctx, layout.center, layout.radius_x, layout.radius_y, height, Color::Green);
                draw_ellipse(
                    ctx,
                    layout.center,
                    layout.radius_x + rail,
                    layout.radius_y + rail,
                    height,
                    Color::Rgb(139, 90, 43),
                );
                ctx.layer();

                let dealer = layout.dealer_button(table.dealer);
                ctx.print(dealer.x, height - dealer.y, Span::from("D").black().on_yellow());

                let center_y = height - layout.center.y;
                if !table.board.is_empty() {
                    let board = cards_line(&table.board);
                    ctx.print(layout.center.x - text_width(&board) / 2.0, center_y + 1.0, board);
                }
                let pot = format_pot(table.pot, self.preferences.amount_format, self.hand.big_blind);
                if !pot.is_empty() {
                    let pot = Line::from(pot).bold();
                    ctx.print(layout.center.x - text_width(&pot) / 2.0, center_y - 2.0, pot);
                }

                for player in &table.players {
                    self.draw_seat(ctx, layout.seat(player.seat), player, height);
                }
            });
        frame.render_widget(canvas, area);
    }

    /// Render the action list, grouped by street, with the current action selected
    fn draw_timeline(&mut self, frame: &mut Frame, area: Rect) {
        let current = self.state.current_index();
        let mut items = Vec::with_capacity(self.hand.total() + Street::ALL.len());
        let mut selected = None;
        let mut street = None;

        for action in &self.hand.actions {
            if street != Some(action.street) {
                street = Some(action.street);
                items.push(ListItem::new(
                    Line::from(format!("── {} ──", action.street)).dark_gray(),
                ));
            }
            if action.index == current {
                selected = Some(items.len());
            }

            let mut text = format!("{:>3}. {} {}", action.index + 1, action.actor, action.kind);
            if action.kind.puts_chips_in() {
                text.push(' ');
                text.push_str(&self.amount(action.amount));
            }
            let item = if action.index > current {
                ListItem::new(Line::from(text).dark_gray())
            } else {
                ListItem::new(Line::from(text))
            };
            items.push(item);
        }

        self.timeline_state.select(selected);
        let timeline = List::new(items)
            .block(Block::bordered().title(" actions  "))
            .highlight_style(Style::default().reversed());
        frame.render_stateful_widget(timeline, area, &mut self.timeline_state);
    }

    /// Render phase, position, speed and progress
    fn draw_controls(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().title(" replay  ");
        let inner = block.inner(area);
        if inner.width == 0 || inner.height == 0 {
            frame.render_widget(block, area);
            return;
        }
        frame.render_widget(block, area);

        let [info_area, gauge_area] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(inner);

        let description = self
            .hand
            .actions
            .get(self.state.current_index())
            .map(|action| action.description.clone())
            .unwrap_or_default();
        let info = Line::from(vec![
            phase_span(self.state.phase()),
            format!(
                "  action {} of {}  ",
                self.state.current_index() + 1,
                self.state.total()
            )
            .into(),
            format!("speed {}  ", self.state.speed()).bold(),
            format!("[{}]  ", self.preferences.amount_format).dark_gray(),
            description.italic(),
        ]);
        frame.render_widget(Paragraph::new(info), info_area);

        let gauge = Gauge::default()
            .gauge_style(Style::default().light_green())
            .percent(u16::from(self.state.progress()));
        frame.render_widget(gauge, gauge_area);
    }

    /// Render the command line, or the last status message and key hints
    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        if let Some(input) = &self.prompt {
            frame.render_widget(Paragraph::new(format!(":{input}")), area);
            let cursor = u16::try_from(input.chars().count() + 1).unwrap_or(u16::MAX);
            frame.set_cursor_position(Position::new(
                area.x.saturating_add(cursor),
                area.y,
            ));
            return;
        }

        let mut line = match &self.status {
            Some(Status {
                kind: StatusKind::Error,
                content,
            }) => vec![Span::from(content.clone()).light_red(), " | ".into()],
            Some(Status {
                kind: StatusKind::Info,
                content,
            }) => vec![Span::from(content.clone()).light_blue(), " | ".into()],
            None => Vec::new(),
        };
        line.extend([
            "press ".into(),
            "?".bold().white(),
            " for help, ".into(),
            ":".bold().white(),
            " for commands, or ".into(),
            "q".bold().white(),
            " to exit".into(),
        ]);
        frame.render_widget(Paragraph::new(Line::from(line)), area);
    }

    /// Render the help menu overlay
    fn draw_help_menu(&self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Max(22)]).flex(Flex::Center);
        let horizontal = Layout::horizontal([Constraint::Max(60)]).flex(Flex::Center);
        let [help_menu_area] = vertical.areas(frame.area());
        let [help_menu_area] = horizontal.areas(help_menu_area);
        frame.render_widget(Clear, help_menu_area);

        let help = Paragraph::new(HELP)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(" controls  "));
        frame.render_widget(help, help_menu_area);
    }

    /// Main draw function - orchestrates rendering of all UI components
    fn draw(&mut self, frame: &mut Frame) {
        let window = Layout::vertical([
            Constraint::Min(10),   // Table and timeline
            Constraint::Length(3), // Controls
            Constraint::Length(1), // Help bar
        ]);
        let [top_area, controls_area, help_area] = window.areas(frame.area());

        let [table_area, timeline_area] =
            Layout::horizontal([Constraint::Percentage(68), Constraint::Percentage(32)])
                .areas(top_area);

        let table = project(&self.hand, self.state.current_index());
        self.draw_table(frame, table_area, &table);
        self.draw_timeline(frame, timeline_area);
        self.draw_controls(frame, controls_area);
        self.draw_help_bar(frame, help_area);

        if self.show_help_menu {
            self.draw_help_menu(frame);
        }
    }

    /// Run the TUI application until the user quits
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut updates = self.handle.subscribe();
        log::info!(
            "Replaying hand {} ({} actions) with amounts in {}",
            self.hand.id,
            self.hand.total(),
            self.preferences.amount_format
        );

        loop {
            if updates
                .has_changed()
                .context("Replay stopped unexpectedly")?
            {
                self.state = *updates.borrow_and_update();
            }

            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(POLL_TIMEOUT)?
                && let Event::Key(KeyEvent { code, kind, .. }) = event::read()?
                && kind == KeyEventKind::Press
                && self.handle_key(code).await? == Flow::Quit
            {
                return Ok(());
            }
        }
    }
}

/// Stroke an ellipse given in layout coordinates, flipping y for the canvas.
fn draw_ellipse(
    ctx: &mut CanvasContext<'_>,
    center: Point,
    radius_x: f64,
    radius_y: f64,
    height: f64,
    color: Color,
) {
    let point = |i: usize| {
        let angle = std::f64::consts::TAU * i as f64 / ELLIPSE_SEGMENTS as f64;
        (
            center.x + radius_x * angle.cos(),
            height - (center.y + radius_y * angle.sin()),
        )
    };
    for i in 0..ELLIPSE_SEGMENTS {
        let (x1, y1) = point(i);
        let (x2, y2) = point(i + 1);
        ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_replay::{
        AmountFormat,
        hand::synthetic,
        playback::{ReplayActor, ReplayConfig},
    };
    use ratatui::{Terminal, backend::TestBackend};
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> (TuiApp, tokio::task::JoinHandle<()>) {
        let hand = synthetic::generate(5);
        let (actor, handle) = ReplayActor::new(hand.total(), ReplayConfig::default());
        let task = tokio::spawn(actor.run());
        let app = TuiApp::new(
            hand,
            handle,
            Preferences::default(),
            dir.path().join("prefs.json"),
        );
        (app, task)
    }

    #[tokio::test]
    async fn test_draws_on_small_terminal() {
        let dir = TempDir::new().unwrap();
        let (mut app, _task) = app(&dir);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
    }

    #[tokio::test]
    async fn test_toggle_format_persists() {
        let dir = TempDir::new().unwrap();
        let (mut app, _task) = app(&dir);

        app.handle_key(KeyCode::Char('b')).await.unwrap();
        assert_eq!(app.preferences.amount_format, AmountFormat::Eur);
        assert_eq!(
            Preferences::load(dir.path().join("prefs.json")).amount_format,
            AmountFormat::Eur
        );
    }

    #[tokio::test]
    async fn test_command_line_reaches_actor() {
        let dir = TempDir::new().unwrap();
        let (mut app, _task) = app(&dir);

        for code in [
            KeyCode::Char(':'),
            KeyCode::Char('j'),
            KeyCode::Char('u'),
            KeyCode::Char('m'),
            KeyCode::Char('p'),
            KeyCode::Char(' '),
            KeyCode::Char('3'),
            KeyCode::Enter,
        ] {
            assert!(app.handle_key(code).await.unwrap() == Flow::Continue);
        }

        let state = app.handle.state().await.unwrap();
        assert_eq!(state.current_index(), 2);
        assert_eq!(state.phase(), Phase::Paused);
    }

    #[tokio::test]
    async fn test_bad_command_sets_error_status() {
        let dir = TempDir::new().unwrap();
        let (mut app, _task) = app(&dir);

        for code in [KeyCode::Char(':'), KeyCode::Char('x'), KeyCode::Enter] {
            app.handle_key(code).await.unwrap();
        }
        assert!(app.prompt.is_none());
        assert!(matches!(
            app.status,
            Some(Status {
                kind: StatusKind::Error,
                ..
            })
        ));
    }

    #[test]
    fn test_table_title_shows_played_at() {
        let mut hand = synthetic::generate(5);
        assert_eq!(table_title(&hand, Street::Flop).matches(" · ").count(), 2);

        hand.played_at = Some("2024-03-12T21:04:11Z".parse().unwrap());
        let title = table_title(&hand, Street::Flop);
        assert_eq!(title.matches(" · ").count(), 3);
        assert!(title.contains("2024-03-12 21:04"));
        assert!(title.contains(&hand.table_name));
    }

    #[tokio::test]
    async fn test_quit_key() {
        let dir = TempDir::new().unwrap();
        let (mut app, _task) = app(&dir);
        assert!(app.handle_key(KeyCode::Char('q')).await.unwrap() == Flow::Quit);
    }
}
