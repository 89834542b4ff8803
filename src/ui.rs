use animal_list::{AnimalRepository, ContentMode, DetailView, ListView, LIST_TITLE};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use tracing::{info, warn};

/// Which screen is on top of the navigation stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Detail,
}

pub struct App {
    pub repository: AnimalRepository,
    pub list: ListView,
    pub detail: Option<DetailView>,
    pub table_state: TableState,
    pub status: Option<String>,
}

impl App {
    pub fn new(mut repository: AnimalRepository) -> Self {
        let list = ListView::attach(&mut repository);
        let mut table_state = TableState::default();
        table_state.select(list.selected());

        Self {
            repository,
            list,
            detail: None,
            table_state,
            status: None,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.detail.is_some() {
            Screen::Detail
        } else {
            Screen::List
        }
    }

    /// Apply one key press. Returns false when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('q') {
            return false;
        }

        match self.screen() {
            Screen::List => self.handle_list_key(key.code),
            Screen::Detail => self.handle_detail_key(key.code),
        }
        true
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.list.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.list.select_previous(),
            KeyCode::Home => self.list.select_first(),
            KeyCode::End => self.list.select_last(),
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('a') | KeyCode::Char('+') => {
                self.list.add(&mut self.repository);
                self.status = Some(format!("Added row {}", self.repository.len()));
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Backspace => self.close_detail(),
            KeyCode::Char('z') | KeyCode::Char(' ') => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.toggle_zoom();
                }
            }
            _ => {}
        }
    }

    pub fn open_detail(&mut self) {
        self.detail = self.list.open_selected(&self.repository);
        if let Some(detail) = &self.detail {
            info!(animal = %detail.animal().name, "open detail");
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn delete_selected(&mut self) {
        match self.list.delete_selected(&mut self.repository) {
            Ok(Some(animal)) => self.status = Some(format!("Deleted {}", animal.name)),
            Ok(None) => {}
            Err(err) => {
                warn!(%err, "delete failed");
                self.status = Some(format!("Error: {}", err));
            }
        }
    }

    /// Pick up repository changes before drawing
    pub fn sync(&mut self) {
        self.list.refresh(&self.repository);
        self.table_state.select(self.list.selected());
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app, event::read);

    // Restore terminal before reporting, so the error is readable
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        warn!(%err, "UI loop failed");
    }
    res.context("UI event loop failed")
}

fn run_app<B, E>(terminal: &mut Terminal<B>, app: &mut App, mut next_event: E) -> io::Result<()>
where
    B: ratatui::backend::Backend,
    E: FnMut() -> io::Result<Event>,
{
    loop {
        app.sync();
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = next_event()? {
            if key.kind == KeyEventKind::Press && !app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navigation bar
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match &app.detail {
        Some(detail) => render_detail(f, chunks[1], detail),
        None => render_table(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = match &app.detail {
        Some(detail) => detail.title(),
        None => LIST_TITLE.to_string(),
    };

    let mut spans = vec![];
    if app.detail.is_some() {
        spans.push(Span::styled("‹ Animals", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw("  │  "));
    }
    spans.push(Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        format!("Total: {}", app.repository.len()),
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Thumbnail", "Name", "Description"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.list.rows().iter().map(|row| {
        let cells = vec![
            Cell::from(format!("[{}]", truncate(&row.thumb_name, 16)))
                .style(Style::default().fg(Color::Cyan)),
            Cell::from(truncate(&row.name, 24)),
            Cell::from(truncate(&row.description, 40)).style(Style::default().fg(Color::Gray)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(26),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", LIST_TITLE)),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_detail(f: &mut Frame, area: Rect, detail: &DetailView) {
    let animal = detail.animal();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Image
            Constraint::Length(1), // Name
            Constraint::Length(1), // Description
        ])
        .split(area);

    let image_area = image_rect(chunks[0], detail.content_mode());
    let image = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            animal.image_name(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("({})", detail.content_mode().as_str()),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(image, image_area);

    let name = Paragraph::new(animal.name.as_str()).alignment(Alignment::Center);
    f.render_widget(name, chunks[1]);

    let description = Paragraph::new(Span::styled(
        animal.description.as_str(),
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center);
    f.render_widget(description, chunks[2]);
}

/// Area the image occupies. `Fill` takes everything, `Fit` keeps a 2:1
/// cell ratio (roughly square on screen) centered in `area`.
pub fn image_rect(area: Rect, mode: ContentMode) -> Rect {
    match mode {
        ContentMode::Fill => area,
        ContentMode::Fit => {
            let (width, height) = if area.width >= area.height.saturating_mul(2) {
                (area.height.saturating_mul(2), area.height)
            } else {
                (area.width, area.width / 2)
            };
            Rect::new(
                area.x + (area.width - width) / 2,
                area.y + (area.height - height) / 2,
                width,
                height,
            )
        }
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    match app.screen() {
        Screen::List => {
            let selected = app.list.selected().map(|i| i + 1).unwrap_or(0);
            status_spans.push(Span::styled(
                format!(" Row: {}/{} ", selected, app.list.rows().len()),
                Style::default().fg(Color::Cyan),
            ));
            if let Some(message) = &app.status {
                status_spans.push(Span::raw(" | "));
                status_spans.push(Span::styled(message.clone(), Style::default().fg(Color::Green)));
            }
            status_spans.push(Span::raw(" | "));
            status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Details | "));
            status_spans.push(Span::styled("a", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Add | "));
            status_spans.push(Span::styled("d", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Delete | "));
            status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Nav | "));
        }
        Screen::Detail => {
            status_spans.push(Span::styled("z", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Zoom | "));
            status_spans.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Back | "));
        }
    }
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
