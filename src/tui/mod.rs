//! Terminal UI for listkeep using ratatui
//!
//! One tab per screen: home, the four list managers, sign-in and sign-up.
//! List screens show the form on the left and the collection on the right.

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame, Terminal,
};
use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::debug;

use crate::auth::{AuthBackend, AuthError, AuthForm, AuthMode, AuthOutcome, AuthSession, SimulatedAuth};
use crate::config::{Config, Screen};
use crate::form::{FormController, SubmitOutcome};
use crate::models::{format_number, EntityKind};
use crate::render::{self, format_money, Card, ListAction, ListView, EMPTY_CART_MESSAGE};
use crate::schema::FieldType;
use crate::store::Session;

const FEATURES: [(&str, &str); 4] = [
    ("Book Collection", "Manage your personal library"),
    ("Contact List", "Keep track of your contacts"),
    ("Recipe Manager", "Store your favorite recipes"),
    ("Shopping Cart", "Plan purchases and see the running total"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    List,
}

struct PendingAuth {
    mode: AuthMode,
    rx: oneshot::Receiver<Result<AuthSession, AuthError>>,
    handle: tokio::task::JoinHandle<()>,
}

/// Main TUI application state
pub struct TuiApp {
    config: Config,
    session: Session,
    forms: BTreeMap<EntityKind, FormController>,
    selection: BTreeMap<EntityKind, usize>,
    sign_in: AuthForm,
    sign_up: AuthForm,
    backend: Arc<dyn AuthBackend>,
    pending: Option<PendingAuth>,
    signed_in: Option<AuthSession>,
    screen: Screen,
    focus: Focus,
    field_index: usize,
    status_message: Option<String>,
    should_quit: bool,
}

fn screen_kind(screen: Screen) -> Option<EntityKind> {
    match screen {
        Screen::Books => Some(EntityKind::Book),
        Screen::Contacts => Some(EntityKind::Contact),
        Screen::Recipes => Some(EntityKind::Recipe),
        Screen::Cart => Some(EntityKind::CartItem),
        _ => None,
    }
}

impl TuiApp {
    /// Create a new TUI application
    pub fn new(config: Config) -> Self {
        let backend = Arc::new(SimulatedAuth::new(Duration::from_millis(config.auth_delay_ms)));
        Self::with_backend(config, backend)
    }

    pub fn with_backend(config: Config, backend: Arc<dyn AuthBackend>) -> Self {
        let forms = EntityKind::ALL
            .iter()
            .map(|&kind| (kind, FormController::for_kind(kind)))
            .collect();
        Self {
            screen: config.start_screen,
            config,
            session: Session::new(),
            forms,
            selection: BTreeMap::new(),
            sign_in: AuthForm::sign_in(),
            sign_up: AuthForm::sign_up(),
            backend,
            pending: None,
            signed_in: None,
            focus: Focus::Form,
            field_index: 0,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn form(&self, kind: EntityKind) -> &FormController {
        &self.forms[&kind]
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_app(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;

        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
        res
    }

    fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick = Duration::from_millis(self.config.tick_rate_ms.max(10));
        loop {
            self.poll_auth();
            terminal.draw(|f| self.ui(f))?;

            if event::poll(tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    // ---- input -------------------------------------------------------

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.pending.is_some() {
            if key.code == KeyCode::Esc {
                self.cancel_auth();
            }
            return;
        }

        match key.code {
            KeyCode::Tab => return self.switch_screen(1),
            KeyCode::BackTab => return self.switch_screen(-1),
            _ => {}
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::SignIn => self.handle_auth_key(AuthMode::SignIn, key),
            Screen::SignUp => self.handle_auth_key(AuthMode::SignUp, key),
            screen => {
                if let Some(kind) = screen_kind(screen) {
                    match self.focus {
                        Focus::Form => self.handle_form_key(kind, key),
                        Focus::List => self.handle_list_key(kind, key),
                    }
                }
            }
        }
    }

    fn switch_screen(&mut self, step: isize) {
        self.blur_current_field();
        let count = Screen::ALL.len() as isize;
        let next = (self.screen.index() as isize + step).rem_euclid(count) as usize;
        self.go_to(Screen::ALL[next]);
    }

    fn go_to(&mut self, screen: Screen) {
        self.screen = screen;
        self.focus = Focus::Form;
        self.field_index = 0;
        self.status_message = None;
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) => {
                if let Some(screen) = c
                    .to_digit(10)
                    .and_then(|d| Screen::ALL.get(d as usize))
                {
                    self.go_to(*screen);
                }
            }
            _ => {}
        }
    }

    fn current_form_mut(&mut self) -> Option<&mut FormController> {
        match self.screen {
            Screen::SignIn => Some(self.sign_in.form_mut()),
            Screen::SignUp => Some(self.sign_up.form_mut()),
            screen => screen_kind(screen).and_then(|kind| self.forms.get_mut(&kind)),
        }
    }

    fn blur_current_field(&mut self) {
        if self.focus != Focus::Form {
            return;
        }
        let index = self.field_index;
        if let Some(form) = self.current_form_mut() {
            if let Some(spec) = form.schema().fields.get(index) {
                form.mark_touched(spec.name);
            }
        }
    }

    fn move_field(&mut self, step: isize) {
        let Some(count) = self.current_form_mut().map(|f| f.schema().fields.len()) else {
            return;
        };
        if count == 0 {
            return;
        }
        self.blur_current_field();
        self.field_index = (self.field_index as isize + step).rem_euclid(count as isize) as usize;
    }

    /// Typing, deleting and cycling choices in the focused field
    fn edit_field(&mut self, key: KeyEvent) -> bool {
        let index = self.field_index;
        let Some(form) = self.current_form_mut() else {
            return false;
        };
        let Some(spec) = form.schema().fields.get(index).copied() else {
            return false;
        };
        let mut value = form.value(spec.name).to_string();

        match (spec.field_type, key.code) {
            (FieldType::Choice { options }, KeyCode::Left | KeyCode::Right) => {
                let current = options.iter().position(|o| *o == value);
                let len = options.len() as isize + 1;
                let step = if key.code == KeyCode::Right { 1 } else { -1 };
                // slot 0 is the empty "Select ..." choice
                let slot = current.map_or(0, |i| i as isize + 1);
                let next = (slot + step).rem_euclid(len);
                value = if next == 0 { String::new() } else { options[next as usize - 1].to_string() };
            }
            (FieldType::Choice { .. }, _) => return false,
            (FieldType::Lines, KeyCode::Enter) if key.modifiers.contains(KeyModifiers::ALT) => {
                value.push('\n');
            }
            (_, KeyCode::Char(c)) => value.push(c),
            (_, KeyCode::Backspace) => {
                value.pop();
            }
            _ => return false,
        }
        form.set_field(spec.name, value);
        true
    }

    fn handle_form_key(&mut self, kind: EntityKind, key: KeyEvent) {
        if self.edit_field(key) {
            return;
        }
        match key.code {
            KeyCode::Up => self.move_field(-1),
            KeyCode::Down => self.move_field(1),
            KeyCode::Enter => self.submit_entity(kind),
            KeyCode::Esc => {
                let form = self.forms.entry(kind).or_insert_with(|| FormController::for_kind(kind));
                if form.is_editing() {
                    form.cancel_edit();
                    self.status_message = Some("Edit cancelled".to_string());
                } else {
                    self.blur_current_field();
                    self.focus = Focus::List;
                }
                self.field_index = 0;
            }
            _ => {}
        }
    }

    fn submit_entity(&mut self, kind: EntityKind) {
        let Some(form) = self.forms.get_mut(&kind) else {
            return;
        };
        let store = self.session.store_mut(kind);
        self.status_message = Some(match form.submit(store) {
            Ok(SubmitOutcome::Created(_)) => format!("✓ {} added", kind.noun()),
            Ok(SubmitOutcome::Updated(_)) => format!("✓ {} updated", kind.noun()),
            Ok(SubmitOutcome::Vanished(_)) => format!("✗ {} was deleted while editing", kind.noun()),
            Ok(SubmitOutcome::Duplicate(_)) => format!("✗ {} already exists", kind.noun()),
            Err(errors) => format!("✗ {} field(s) need attention", errors.len()),
        });
        self.field_index = 0;
    }

    fn selected_action(&self, kind: EntityKind, delete: bool) -> Option<ListAction> {
        let index = self.selection.get(&kind).copied().unwrap_or(0);
        let entity = self.session.store(kind).list().nth(index)?;
        let id = entity.id.clone();
        Some(if delete { ListAction::Delete(id) } else { ListAction::Edit(id) })
    }

    fn handle_list_key(&mut self, kind: EntityKind, key: KeyEvent) {
        let len = self.session.store(kind).len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                let sel = self.selection.entry(kind).or_insert(0);
                if *sel + 1 < len {
                    *sel += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let sel = self.selection.entry(kind).or_insert(0);
                *sel = sel.saturating_sub(1);
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(action) = self.selected_action(kind, false) {
                    self.apply(kind, action);
                    self.focus = Focus::Form;
                    self.field_index = 0;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(action) = self.selected_action(kind, true) {
                    self.apply(kind, action);
                    let len = self.session.store(kind).len();
                    let sel = self.selection.entry(kind).or_insert(0);
                    *sel = (*sel).min(len.saturating_sub(1));
                    self.status_message = Some(format!("✓ {} deleted", kind.noun()));
                }
            }
            KeyCode::Esc | KeyCode::Char('i') => self.focus = Focus::Form,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn apply(&mut self, kind: EntityKind, action: ListAction) {
        let form = self.forms.entry(kind).or_insert_with(|| FormController::for_kind(kind));
        render::apply_action(&action, form, self.session.store_mut(kind));
    }

    fn auth_form_mut(&mut self, mode: AuthMode) -> &mut AuthForm {
        match mode {
            AuthMode::SignIn => &mut self.sign_in,
            AuthMode::SignUp => &mut self.sign_up,
        }
    }

    fn handle_auth_key(&mut self, mode: AuthMode, key: KeyEvent) {
        if self.edit_field(key) {
            return;
        }
        match key.code {
            KeyCode::Up => self.move_field(-1),
            KeyCode::Down => self.move_field(1),
            KeyCode::Enter => self.submit_auth(mode),
            KeyCode::Esc => self.go_to(Screen::Home),
            _ => {}
        }
    }

    fn submit_auth(&mut self, mode: AuthMode) {
        let request = match self.auth_form_mut(mode).prepare() {
            Ok(request) => request,
            Err(errors) => {
                self.status_message = Some(format!("✗ {} field(s) need attention", errors.len()));
                return;
            }
        };
        let backend = Arc::clone(&self.backend);
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let result = request.send(&*backend).await;
            let _ = tx.send(result);
        });
        debug!(?mode, "auth request dispatched");
        self.pending = Some(PendingAuth { mode, rx, handle });
        self.status_message = None;
    }

    /// Settle a finished auth request, if any
    fn poll_auth(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => Err(AuthError::Unavailable),
        };
        let mode = pending.mode;
        self.pending = None;
        if let AuthOutcome::SignedIn(session) = self.auth_form_mut(mode).finish(result) {
            let who = session.display_name.clone().unwrap_or_else(|| session.email.clone());
            self.signed_in = Some(session);
            self.go_to(Screen::Home);
            self.status_message = Some(format!("✓ Welcome, {}", who));
        }
    }

    fn cancel_auth(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
            self.auth_form_mut(pending.mode).finish(Err(AuthError::Cancelled));
            self.status_message = Some("Request cancelled".to_string());
        }
    }

    // ---- drawing -----------------------------------------------------

    /// Draw the UI
    pub fn ui(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Footer
            ])
            .split(f.area());

        self.render_tabs(f, chunks[0]);
        match self.screen {
            Screen::Home => self.render_home(f, chunks[1]),
            Screen::SignIn => self.render_auth(f, chunks[1], AuthMode::SignIn),
            Screen::SignUp => self.render_auth(f, chunks[1], AuthMode::SignUp),
            screen => {
                if let Some(kind) = screen_kind(screen) {
                    self.render_manager(f, chunks[1], kind);
                }
            }
        }
        self.render_footer(f, chunks[2]);
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<&str> = Screen::ALL.iter().map(Screen::title).collect();
        let user = match &self.signed_in {
            Some(session) => format!("listkeep - {}", session.email),
            None => "listkeep".to_string(),
        };
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title(user))
            .select(self.screen.index())
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, area);
    }

    fn render_home(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Welcome to listkeep",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from("Manage your books, contacts, recipes, and shopping all in one place"),
            Line::from(""),
        ];
        for (i, (title, description)) in FEATURES.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("[{}] {}", i + 1, title), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  {}", description)),
            ]));
        }
        let paragraph = Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title("Home"))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn form_lines(form: &FormController, active: Option<usize>) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, spec) in form.schema().fields.iter().enumerate() {
            let is_active = active == Some(i);
            let marker = if is_active { "> " } else { "  " };
            let label_style = if is_active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let raw = form.value(spec.name);
            let shown = match spec.field_type {
                FieldType::Secret => "*".repeat(raw.chars().count()),
                FieldType::Choice { .. } if raw.is_empty() => format!("Select {}", spec.label),
                FieldType::Choice { .. } => format!("< {} >", raw),
                _ => raw.to_string(),
            };
            let required = if spec.is_required() { "*" } else { "" };

            let mut value_lines = shown.split('\n');
            lines.push(Line::from(vec![
                Span::styled(format!("{}{}{}: ", marker, spec.label, required), label_style),
                Span::raw(value_lines.next().unwrap_or("").to_string()),
            ]));
            for rest in value_lines {
                lines.push(Line::from(format!("    {}", rest)));
            }
            if let Some(error) = form.visible_error(spec.name) {
                lines.push(Line::from(Span::styled(
                    format!("    {}", error),
                    Style::default().fg(Color::Red),
                )));
            }
        }
        lines
    }

    fn render_manager(&self, f: &mut Frame, area: Rect, kind: EntityKind) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let form = &self.forms[&kind];
        let active = (self.focus == Focus::Form).then_some(self.field_index);
        let mut lines = Self::form_lines(form, active);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("[Enter] {}", form.submit_label(kind)),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));

        let border = |focused: bool| {
            if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            }
        };
        let paragraph = Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border(self.focus == Focus::Form))
                    .title(kind.title()),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, chunks[0]);

        let store = self.session.store(kind);
        let selected = (!store.is_empty()).then(|| self.selection.get(&kind).copied().unwrap_or(0));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border(self.focus == Focus::List))
            .title(format!("{} ({})", kind.title(), store.len()));

        match render::render(store) {
            ListView::Cards { cards } => {
                let items: Vec<ListItem> = cards.iter().map(card_item).collect();
                let list = List::new(items)
                    .block(block)
                    .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
                    .highlight_symbol(">> ");
                let mut state = ListState::default();
                state.select(selected);
                f.render_stateful_widget(list, chunks[1], &mut state);
            }
            ListView::Cart(table) => {
                if table.rows.is_empty() {
                    let empty = Paragraph::new(EMPTY_CART_MESSAGE)
                        .block(block)
                        .style(Style::default().fg(Color::DarkGray))
                        .wrap(Wrap { trim: true });
                    f.render_widget(empty, chunks[1]);
                    return;
                }
                let symbol = self.config.currency_symbol.as_str();
                let rows: Vec<Row> = table
                    .rows
                    .iter()
                    .map(|row| {
                        Row::new(vec![
                            Cell::from(row.name.clone()),
                            Cell::from(row.category.clone()),
                            Cell::from(format_number(row.quantity)),
                            Cell::from(format!("{}{}", symbol, format_number(row.price))),
                            Cell::from(format_money(row.total, symbol)),
                        ])
                    })
                    .collect();
                let header = Row::new(vec!["Item", "Category", "Quantity", "Price", "Total"])
                    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
                let widths = [
                    Constraint::Percentage(30),
                    Constraint::Percentage(22),
                    Constraint::Percentage(14),
                    Constraint::Percentage(16),
                    Constraint::Percentage(18),
                ];
                let inner = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(chunks[1]);
                let widget = Table::new(rows, widths)
                    .header(header)
                    .block(block)
                    .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
                    .highlight_symbol(">> ");
                let mut state = TableState::default();
                state.select(selected);
                f.render_stateful_widget(widget, inner[0], &mut state);

                let total = Paragraph::new(format!("Total: {}", format_money(table.grand_total, symbol)))
                    .block(Block::default().borders(Borders::ALL))
                    .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
                f.render_widget(total, inner[1]);
            }
        }
    }

    fn render_auth(&self, f: &mut Frame, area: Rect, mode: AuthMode) {
        let form = match mode {
            AuthMode::SignIn => &self.sign_in,
            AuthMode::SignUp => &self.sign_up,
        };
        let area = centered_rect(60, 80, area);
        let mut lines = Vec::new();
        if let Some(banner) = form.banner() {
            let heading = match mode {
                AuthMode::SignIn => "Sign in failed",
                AuthMode::SignUp => "Signup failed",
            };
            lines.push(Line::from(Span::styled(
                heading,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(banner.to_string(), Style::default().fg(Color::Red))));
            lines.push(Line::from(""));
        }
        lines.extend(Self::form_lines(form.form(), Some(self.field_index)));
        lines.push(Line::from(""));
        let action = match (mode, form.is_submitting()) {
            (AuthMode::SignIn, true) => "Signing in...".to_string(),
            (AuthMode::SignUp, true) => "Creating account...".to_string(),
            (_, false) => format!("[Enter] {}", mode.title()),
        };
        lines.push(Line::from(Span::styled(
            action,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));

        let paragraph = Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title(mode.title()))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let hints = if self.pending.is_some() {
            "Esc: Cancel request  Ctrl-C: Quit"
        } else {
            match (self.screen, self.focus) {
                (Screen::Home, _) => "1-6: Open screen  Tab: Next  q: Quit",
                (Screen::SignIn | Screen::SignUp, _) => "↑/↓: Field  Enter: Submit  Esc: Home  Tab: Next",
                (_, Focus::Form) => "↑/↓: Field  ←/→: Choose  Alt-Enter: New line  Enter: Save  Esc: List/Cancel edit",
                (_, Focus::List) => "↑/↓: Select  e: Edit  d: Delete  Esc: Form  q: Quit",
            }
        };
        let text = match &self.status_message {
            Some(msg) => format!("{}  |  {}", msg, hints),
            None => hints.to_string(),
        };
        let footer = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(footer, area);
    }
}

/// Multi-line list entry for one card
fn card_item(card: &Card) -> ListItem<'static> {
    let mut lines = vec![Line::from(Span::styled(
        card.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(card.details.iter().map(|d| Line::from(format!("  {}", d))));
    if let Some(image) = &card.image {
        lines.push(Line::from(format!("  Image: {}", image)));
    }
    for section in &card.sections {
        lines.push(Line::from(format!("  {}:", section.heading)));
        for (i, item) in section.items.iter().enumerate() {
            let bullet = if section.numbered { format!("{}.", i + 1) } else { "•".to_string() };
            lines.push(Line::from(format!("    {} {}", bullet, item)));
        }
    }
    lines.push(Line::from(""));
    ListItem::new(Text::from(lines))
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
