// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod pages;

pub use pages::{
    ActivityEntry, Announcement, ConfirmDialog, LATEST_UPDATES, PageView, RECENT_ACTIVITY_LIMIT,
    StatCard, TabSnapshot, build_page, confirm_dialog, dashboard_cards, recent_activity,
    relative_time, render_plain, select_sort_by_id, sortable_column_ids,
};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use nexus_app::table::{
    DatasetKey, PageCommand, Pager, Pagination, TableBody, TableEvent, TableState, Tone,
};
use nexus_app::{
    AppCommand, AppEvent, AppMode, AppState, DashboardCounts, SidebarState, StatusFilter, TabKind,
    User,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use std::io;
use std::num::NonZeroUsize;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::OffsetDateTime;

const SIDEBAR_WIDTH: u16 = 24;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 7;
const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(4);
const TOP_LEVEL_PAGES: [TabKind; 4] = [
    TabKind::Dashboard,
    TabKind::Users,
    TabKind::Roles,
    TabKind::Menus,
];
const MASTER_DATA_PAGES: [TabKind; 2] = [TabKind::Offices, TabKind::Departments];

/// Seam between the console and whatever holds the records.
pub trait AppRuntime {
    fn load_dashboard_counts(&mut self) -> Result<DashboardCounts>;
    /// Users ordered newest login first, at most `limit` of them.
    fn load_recent_logins(&mut self, limit: usize) -> Result<Vec<User>>;
    fn load_tab_snapshot(
        &mut self,
        tab: TabKind,
        filter: StatusFilter,
    ) -> Result<Option<TabSnapshot>>;
    /// Removes one row and returns the toast to show for it.
    fn delete_row(&mut self, tab: TabKind, row_id: i64) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableCommand {
    MoveRow(isize),
    MoveColumn(isize),
    JumpFirstRow,
    JumpLastRow,
    CycleSort,
    ClearSort,
    Page(PageCommand),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TableReaction {
    CursorUpdated,
    Status(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingDelete {
    tab: TabKind,
    row_id: i64,
    dialog: ConfirmDialog,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    dashboard_counts: DashboardCounts,
    recent_logins: Vec<User>,
    active_tab_snapshot: Option<TabSnapshot>,
    table_state: TableState,
    pagination: Pagination,
    status_filter: StatusFilter,
    pending_delete: Option<PendingDelete>,
    help_visible: bool,
    status_token: u64,
}

impl ViewData {
    fn new(pagination: Pagination) -> Self {
        Self {
            pagination,
            ..Self::default()
        }
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    pagination: Pagination,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(error) = execute!(stdout, terminal::EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(error).context("enter alternate screen");
    }

    let result = Terminal::new(CrosstermBackend::new(stdout))
        .context("create terminal")
        .and_then(|mut terminal| {
            event_loop(&mut terminal, state, runtime, pagination, || {
                if !event::poll(Duration::from_millis(120)).context("poll event")? {
                    return Ok(None);
                }
                event::read().context("read event").map(Some)
            })
        });

    // Restore the terminal whatever the loop returned.
    let restored = disable_raw_mode()
        .context("disable raw mode")
        .and_then(|()| {
            execute!(io::stdout(), terminal::LeaveAlternateScreen)
                .context("leave alternate screen")
        });
    result.and(restored)
}

/// Draw and dispatch until quit. Terminal and input failures come back as
/// errors instead of unwinding past the caller's teardown.
fn event_loop<B, R, E>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    runtime: &mut R,
    pagination: Pagination,
    mut next_event: E,
) -> Result<()>
where
    B: Backend,
    R: AppRuntime,
    E: FnMut() -> Result<Option<Event>>,
{
    let mut view_data = ViewData::new(pagination);
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_view_data(state, runtime, &mut view_data) {
        log::warn!("initial load failed: {error:#}");
        state.dispatch(AppCommand::SetStatus(format!("load failed: {error}")));
    }

    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        terminal
            .draw(|frame| render(frame, state, &view_data))
            .context("draw frame")?;

        match next_event()? {
            Some(Event::Key(key)) => {
                if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                    return Ok(());
                }
            }
            Some(_) | None => {}
        }
    }
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_DELAY);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
            emit_status(state, view_data, internal_tx, "help hidden");
        }
        return false;
    }

    match state.mode {
        AppMode::Confirm => {
            handle_confirm_key(state, runtime, view_data, internal_tx, key);
            return false;
        }
        AppMode::Search => {
            handle_search_key(state, view_data, key);
            return false;
        }
        AppMode::Nav => {}
    }

    if handle_table_key(state, view_data, internal_tx, key) {
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) => {
            dispatch_and_refresh(state, runtime, view_data, AppCommand::NextTab, internal_tx);
        }
        (KeyCode::BackTab, _) => {
            dispatch_and_refresh(state, runtime, view_data, AppCommand::PrevTab, internal_tx);
        }
        (KeyCode::Char('b'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            dispatch_and_refresh(
                state,
                runtime,
                view_data,
                AppCommand::ToggleSidebar,
                internal_tx,
            );
        }
        (KeyCode::Char('m'), KeyModifiers::NONE) => {
            dispatch_and_refresh(
                state,
                runtime,
                view_data,
                AppCommand::ToggleMasterData,
                internal_tx,
            );
        }
        (KeyCode::Char(digit @ '1'..='6'), KeyModifiers::NONE) => {
            let index = digit.to_digit(10).map_or(0, |value| value as usize - 1);
            if let Some(tab) = TabKind::ALL.get(index) {
                dispatch_and_refresh(state, runtime, view_data, AppCommand::GoTo(*tab), internal_tx);
            }
        }
        (KeyCode::Char('t'), KeyModifiers::NONE) => {
            cycle_status_filter(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Char('/'), _) => {
            if view_data.active_tab_snapshot.is_some() {
                state.dispatch(AppCommand::EnterSearch);
            } else {
                emit_status(state, view_data, internal_tx, "nothing to search");
            }
        }
        (KeyCode::Char('d'), KeyModifiers::NONE) => {
            open_delete_confirm(state, view_data, internal_tx);
        }
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
            emit_status(state, view_data, internal_tx, "help shown");
        }
        _ => {}
    }
    false
}

fn handle_search_key(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) {
    let events = match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Enter, _) => {
            state.dispatch(AppCommand::ExitSearch);
            return;
        }
        (KeyCode::Backspace, _) => view_data.table_state.pop_search_char(),
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.table_state.clear_search()
        }
        (KeyCode::Char(value), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.table_state.push_search_char(value)
        }
        _ => return,
    };
    apply_table_events(view_data, &events);
    clamp_table_cursor(view_data);
}

fn handle_confirm_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            state.dispatch(AppCommand::CloseConfirm);
            let Some(pending) = view_data.pending_delete.take() else {
                return;
            };
            match runtime.delete_row(pending.tab, pending.row_id) {
                Ok(message) => {
                    if let Err(error) = refresh_view_data(state, runtime, view_data) {
                        emit_status(
                            state,
                            view_data,
                            internal_tx,
                            format!("load failed: {error}"),
                        );
                        return;
                    }
                    emit_status(state, view_data, internal_tx, message);
                }
                Err(error) => {
                    log::warn!(
                        "delete {} row {} failed: {error:#}",
                        pending.tab.label(),
                        pending.row_id
                    );
                    emit_status(state, view_data, internal_tx, error.to_string());
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            view_data.pending_delete = None;
            state.dispatch(AppCommand::CloseConfirm);
            emit_status(state, view_data, internal_tx, "delete canceled");
        }
        _ => {}
    }
}

fn open_delete_confirm(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(page) = active_page(view_data) else {
        return;
    };
    let Some((row_id, label)) = page.selected(view_data.table_state.selected_row) else {
        emit_status(state, view_data, internal_tx, "nothing to delete");
        return;
    };
    let Some(dialog) = confirm_dialog(page.tab, label) else {
        return;
    };
    view_data.pending_delete = Some(PendingDelete {
        tab: page.tab,
        row_id,
        dialog,
    });
    state.dispatch(AppCommand::OpenConfirm);
}

fn cycle_status_filter<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let filters = state.active_tab.status_filters();
    if filters.is_empty() {
        emit_status(state, view_data, internal_tx, "no sub-tabs on this page");
        return;
    }
    let current = filters
        .iter()
        .position(|filter| *filter == view_data.status_filter)
        .unwrap_or(0);
    view_data.status_filter = filters[(current + 1) % filters.len()];
    if let Err(error) = refresh_view_data(state, runtime, view_data) {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("load failed: {error}"),
        );
        return;
    }
    let label = sub_tab_label(state.active_tab, view_data.status_filter);
    emit_status(state, view_data, internal_tx, format!("showing {label}"));
}

fn handle_table_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let can_use_table_keys = !view_data.help_visible
        && state.mode == AppMode::Nav
        && state.active_tab != TabKind::Dashboard
        && view_data.active_tab_snapshot.is_some();
    if !can_use_table_keys {
        return false;
    }

    let Some(command) = table_command_for_key(key) else {
        return false;
    };

    if let TableReaction::Status(message) = apply_table_command(view_data, command) {
        emit_status(state, view_data, internal_tx, message);
    }
    true
}

fn table_command_for_key(key: KeyEvent) -> Option<TableCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(TableCommand::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(TableCommand::MoveRow(-1)),
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => Some(TableCommand::MoveColumn(-1)),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => Some(TableCommand::MoveColumn(1)),
        (KeyCode::Char('g'), _) => Some(TableCommand::JumpFirstRow),
        (KeyCode::Char('G'), _) => Some(TableCommand::JumpLastRow),
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(TableCommand::CycleSort),
        (KeyCode::Char('S'), _) => Some(TableCommand::ClearSort),
        (KeyCode::Char(']'), _) | (KeyCode::PageDown, _) => {
            Some(TableCommand::Page(PageCommand::Next))
        }
        (KeyCode::Char('['), _) | (KeyCode::PageUp, _) => {
            Some(TableCommand::Page(PageCommand::Prev))
        }
        (KeyCode::Char('}'), _) => Some(TableCommand::Page(PageCommand::Last)),
        (KeyCode::Char('{'), _) => Some(TableCommand::Page(PageCommand::First)),
        (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => {
            Some(TableCommand::Page(PageCommand::GrowSize))
        }
        (KeyCode::Char('-'), _) => Some(TableCommand::Page(PageCommand::ShrinkSize)),
        _ => None,
    }
}

fn apply_table_command(view_data: &mut ViewData, command: TableCommand) -> TableReaction {
    let Some(page) = active_page(view_data) else {
        return TableReaction::CursorUpdated;
    };
    match command {
        TableCommand::MoveRow(delta) => {
            view_data.table_state.move_row(delta, page.row_count());
            TableReaction::CursorUpdated
        }
        TableCommand::MoveColumn(delta) => {
            view_data.table_state.move_col(delta, page.column_count());
            TableReaction::CursorUpdated
        }
        TableCommand::JumpFirstRow => {
            view_data.table_state.selected_row = 0;
            TableReaction::CursorUpdated
        }
        TableCommand::JumpLastRow => {
            view_data.table_state.selected_row = page.row_count().saturating_sub(1);
            TableReaction::CursorUpdated
        }
        TableCommand::CycleSort => {
            let column = view_data.table_state.selected_col;
            let Some(snapshot) = &view_data.active_tab_snapshot else {
                return TableReaction::CursorUpdated;
            };
            let status = pages::select_sort_at(snapshot, &mut view_data.table_state, column);
            clamp_table_cursor(view_data);
            TableReaction::Status(status.message())
        }
        TableCommand::ClearSort => {
            let status = view_data.table_state.clear_sort();
            clamp_table_cursor(view_data);
            TableReaction::Status(status.message())
        }
        TableCommand::Page(command) => {
            let events = page.pager.request(command);
            if events.is_empty() {
                return TableReaction::CursorUpdated;
            }
            apply_table_events(view_data, &events);
            view_data.table_state.selected_row = 0;
            clamp_table_cursor(view_data);
            TableReaction::Status(page_status(view_data, &events))
        }
    }
}

fn apply_table_events(view_data: &mut ViewData, events: &[TableEvent]) {
    for event in events {
        if let TableEvent::SearchChanged(term) = event {
            log::debug!("search changed: {term:?}");
        }
        view_data.pagination.apply(event);
    }
}

fn page_status(view_data: &ViewData, events: &[TableEvent]) -> String {
    let resized = events
        .iter()
        .any(|event| matches!(event, TableEvent::PageSizeChangeRequested(_)));
    if resized {
        return format!("{} rows per page", view_data.pagination.page_size);
    }
    match active_page(view_data) {
        Some(page) => format!(
            "page {} of {}",
            page.pager.page_index + 1,
            page.pager.page_count.max(1)
        ),
        None => String::new(),
    }
}

fn active_page(view_data: &ViewData) -> Option<PageView> {
    view_data.active_tab_snapshot.as_ref().map(|snapshot| {
        build_page(
            snapshot,
            &view_data.table_state,
            Some(view_data.pagination),
        )
    })
}

fn clamp_table_cursor(view_data: &mut ViewData) {
    let Some(page) = active_page(view_data) else {
        view_data.table_state.selected_col = 0;
        view_data.table_state.selected_row = 0;
        return;
    };
    if let Some(event) = page.pager.resync_event() {
        view_data.pagination.apply(&event);
    }
    view_data
        .table_state
        .clamp_cursor(page.row_count(), page.column_count());
}

fn dispatch_and_refresh<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    command: AppCommand,
    internal_tx: &Sender<InternalEvent>,
) {
    let events = state.dispatch(command);
    if should_refresh_view(&events) {
        view_data.status_filter = StatusFilter::All;
        if let Err(error) = refresh_view_data(state, runtime, view_data) {
            log::warn!("load {} failed: {error:#}", state.active_tab.label());
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("load failed: {error}"),
            );
        }
    }
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn should_refresh_view(events: &[AppEvent]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, AppEvent::TabChanged(_)))
}

fn refresh_view_data<R: AppRuntime>(
    state: &AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> Result<()> {
    view_data.dashboard_counts = runtime.load_dashboard_counts()?;
    match state.active_tab {
        TabKind::Dashboard => {
            view_data.active_tab_snapshot = None;
            view_data.recent_logins = runtime.load_recent_logins(RECENT_ACTIVITY_LIMIT)?;
        }
        tab => {
            if !tab.status_filters().contains(&view_data.status_filter) {
                view_data.status_filter = StatusFilter::All;
            }
            let key = DatasetKey::new(format!(
                "{}:{}",
                tab.label(),
                view_data.status_filter.label()
            ));
            if view_data.table_state.sync_dataset(key) {
                view_data.pagination.page_index = 0;
            }
            view_data.active_tab_snapshot =
                runtime.load_tab_snapshot(tab, view_data.status_filter)?;
            clamp_table_cursor(view_data);
        }
    }
    Ok(())
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let sidebar_width = match state.sidebar {
        SidebarState::Expanded => SIDEBAR_WIDTH,
        SidebarState::Collapsed => SIDEBAR_COLLAPSED_WIDTH,
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(1)])
        .split(frame.area());

    let sidebar = Paragraph::new(sidebar_text(state))
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(sidebar, columns[0]);

    let header = page_header_text(state, view_data);
    let header_height = u16::try_from(header.lines().count())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(header_height),
            Constraint::Min(1),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(columns[1]);

    let navbar = Paragraph::new(navbar_text(state)).block(
        Block::default()
            .title("Office Nexus")
            .borders(Borders::ALL),
    );
    frame.render_widget(navbar, layout[0]);

    let header_widget = Paragraph::new(header)
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header_widget, layout[1]);

    let now = OffsetDateTime::now_utc();
    if state.active_tab == TabKind::Dashboard {
        render_dashboard(frame, layout[2], view_data, now);
    } else {
        render_table_page(frame, layout[2], state, view_data);
    }

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status_widget, layout[3]);

    let footer = Paragraph::new(footer_text(now.year()))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[4]);

    if let Some(pending) = &view_data.pending_delete {
        let area = centered_rect(56, 30, frame.area());
        frame.render_widget(Clear, area);
        let dialog = Paragraph::new(confirm_overlay_text(&pending.dialog))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(pending.dialog.title)
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Red)),
            );
        frame.render_widget(dialog, area);
    }

    if view_data.help_visible {
        let area = centered_rect(80, 72, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_table_page(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let Some(page) = active_page(view_data) else {
        let empty = Paragraph::new(String::new()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(state.active_tab.label()),
        );
        frame.render_widget(empty, area);
        return;
    };

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);

    let search_style = if state.mode == AppMode::Search {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let search = Paragraph::new(search_line(state, view_data))
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title("search"));
    frame.render_widget(search, parts[0]);

    let widths = vec![Constraint::Min(8); page.column_count().max(1)];
    let header_cells = page.table.headers.iter().map(|header| {
        Cell::from(header.label()).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells);

    let selected = (
        view_data.table_state.selected_row,
        view_data.table_state.selected_col,
    );
    let rows = match &page.table.body {
        TableBody::Rows(rows) => rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                let selected_row = row_index == selected.0;
                let cells = row
                    .iter()
                    .enumerate()
                    .map(|(column_index, cell)| {
                        let mut style = tone_style(cell.tone);
                        if selected_row {
                            style = style.bg(Color::DarkGray);
                        }
                        if selected_row && column_index == selected.1 {
                            style = Style::default()
                                .fg(Color::Black)
                                .bg(Color::Cyan)
                                .add_modifier(Modifier::BOLD);
                        }
                        Cell::from(cell.text.clone()).style(style)
                    })
                    .collect::<Vec<_>>();
                Row::new(cells)
            })
            .collect::<Vec<_>>(),
        TableBody::Empty { message, .. } => {
            vec![Row::new(vec![
                Cell::from(*message).style(Style::default().fg(Color::DarkGray)),
            ])]
        }
    };

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table_title(&page))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, parts[1]);

    let footer = Paragraph::new(pagination_text(&page.pager))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, parts[2]);
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Plain => Style::default(),
        Tone::Muted => Style::default().fg(Color::DarkGray),
        Tone::Accent => Style::default().fg(Color::Cyan),
        Tone::Success => Style::default().fg(Color::Green),
        Tone::Warning => Style::default().fg(Color::Yellow),
    }
}

fn table_title(page: &PageView) -> String {
    let mut title = format!("{} ({})", page.tab.label(), page.pager.filtered_len);
    if let Some(sort) = page.sort {
        title.push_str(&format!(" sorted by {} {}", sort.column, sort.direction.arrow()));
    }
    title
}

fn search_line(state: &AppState, view_data: &ViewData) -> String {
    let term = view_data.table_state.search();
    if state.mode == AppMode::Search {
        format!("{term}█")
    } else if term.is_empty() {
        "Search... (press /)".to_owned()
    } else {
        term.to_owned()
    }
}

fn pagination_text(pager: &Pager) -> String {
    let size = pager
        .page_size
        .map_or(pager.filtered_len, NonZeroUsize::get);
    let mut pieces = Vec::new();
    if pager.can_go_prev() {
        pieces.push("‹".to_owned());
    }
    pieces.extend(pager.window().into_iter().map(|page| {
        if page == pager.page_index {
            format!("[{}]", page + 1)
        } else {
            (page + 1).to_string()
        }
    }));
    if pager.can_go_next() {
        pieces.push("›".to_owned());
    }

    let mut text = format!("Rows per page: {size} | {}", pager.summary());
    if !pieces.is_empty() {
        text.push_str(" | ");
        text.push_str(&pieces.join(" "));
    }
    text
}

fn sub_tab_label(tab: TabKind, filter: StatusFilter) -> &'static str {
    match (tab, filter) {
        (TabKind::Users, StatusFilter::All) => "All Users",
        (TabKind::Offices, StatusFilter::All) => "All Offices",
        (_, StatusFilter::All) => "All",
        (_, StatusFilter::Active) => "Active",
        (_, StatusFilter::Pending) => "Pending",
        (_, StatusFilter::Inactive) => "Inactive",
    }
}

fn sidebar_entry(tab: TabKind, state: &AppState, indent: &str) -> String {
    let marker = if tab == state.active_tab { "›" } else { " " };
    let label = match state.sidebar {
        SidebarState::Expanded => tab.title(),
        SidebarState::Collapsed => short_label(tab),
    };
    format!("{marker} {indent}{label}")
}

const fn short_label(tab: TabKind) -> &'static str {
    match tab {
        TabKind::Dashboard => "Da",
        TabKind::Users => "Us",
        TabKind::Roles => "Ro",
        TabKind::Menus => "Me",
        TabKind::Offices => "Of",
        TabKind::Departments => "De",
    }
}

fn sidebar_text(state: &AppState) -> String {
    let collapsed = state.sidebar == SidebarState::Collapsed;
    let mut lines = vec![
        if collapsed { "ON" } else { "Office Nexus" }.to_owned(),
        String::new(),
    ];
    lines.extend(
        TOP_LEVEL_PAGES
            .iter()
            .map(|tab| sidebar_entry(*tab, state, "")),
    );

    if collapsed {
        lines.extend(
            MASTER_DATA_PAGES
                .iter()
                .map(|tab| sidebar_entry(*tab, state, "")),
        );
        return lines.join("\n");
    }

    let arrow = if state.master_data_expanded { "▾" } else { "▸" };
    lines.push(format!("  Master Data {arrow}"));
    if state.master_data_expanded {
        lines.extend(
            MASTER_DATA_PAGES
                .iter()
                .map(|tab| sidebar_entry(*tab, state, "  ")),
        );
    }
    lines.join("\n")
}

fn navbar_text(state: &AppState) -> String {
    let toggle = match state.sidebar {
        SidebarState::Expanded => "collapse",
        SidebarState::Collapsed => "expand",
    };
    format!("{} | ctrl+b {toggle} sidebar", state.active_tab.title())
}

fn page_header_text(state: &AppState, view_data: &ViewData) -> String {
    let tab = state.active_tab;
    let mut lines = vec![tab.title().to_owned(), tab.subtitle().to_owned()];

    let filters = tab.status_filters();
    if !filters.is_empty() {
        let tabs = filters
            .iter()
            .map(|filter| {
                let label = sub_tab_label(tab, *filter);
                if *filter == view_data.status_filter {
                    format!("[{label}]")
                } else {
                    label.to_owned()
                }
            })
            .collect::<Vec<_>>();
        lines.push(tabs.join("  "));
    }

    if let Some(snapshot) = &view_data.active_tab_snapshot {
        let cards = snapshot.stat_cards();
        if !cards.is_empty() {
            lines.push(format_cards(&cards));
        }
    }
    lines.join("\n")
}

fn format_cards(cards: &[StatCard]) -> String {
    cards
        .iter()
        .map(|card| format!("{}: {}", card.title, card.value))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn dashboard_text(view_data: &ViewData) -> String {
    let mut lines = dashboard_cards(&view_data.dashboard_counts)
        .iter()
        .map(|card| format!("{:<18}{}", card.title, card.value))
        .collect::<Vec<_>>();
    lines.push(String::new());
    lines.push("tab/shift+tab switch pages | 1-6 jump | ? help".to_owned());
    lines.join("\n")
}

fn render_dashboard(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    view_data: &ViewData,
    now: OffsetDateTime,
) {
    let cards = dashboard_text(view_data);
    let cards_height = u16::try_from(cards.lines().count())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(cards_height), Constraint::Min(1)])
        .split(area);
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let cards = Paragraph::new(cards)
        .block(Block::default().borders(Borders::ALL).title("dashboard"));
    frame.render_widget(cards, rows[0]);

    let activity = Paragraph::new(activity_text(view_data, now))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Recent User Activity"),
        );
    frame.render_widget(activity, panels[0]);

    let updates = Paragraph::new(updates_text())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Latest Updates"));
    frame.render_widget(updates, panels[1]);
}

fn activity_text(view_data: &ViewData, now: OffsetDateTime) -> String {
    let entries = recent_activity(&view_data.recent_logins, now);
    if entries.is_empty() {
        return "No recent logins.".to_owned();
    }
    entries
        .iter()
        .map(|entry| format!("{}\n  {}", entry.summary, entry.when))
        .collect::<Vec<_>>()
        .join("\n")
}

fn updates_text() -> String {
    LATEST_UPDATES
        .iter()
        .map(|update| format!("{}\n{}\n{}", update.title, update.body, update.when))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn footer_text(year: i32) -> String {
    format!("© {year} Office Nexus System. All rights reserved.")
}

fn confirm_overlay_text(dialog: &ConfirmDialog) -> String {
    format!(
        "{}\n\ny/enter delete | n/esc cancel",
        dialog.description
    )
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }

    let (mode, hints) = match state.mode {
        AppMode::Nav => (
            "NAV",
            "tab pages | j/k/h/l | s/S sort | [ ] { } pages | +/- size | / search | t filter | d del | ? help | ctrl+q",
        ),
        AppMode::Search => ("SEARCH", "type to filter | ctrl+u clear | enter/esc done"),
        AppMode::Confirm => ("CONFIRM", "y/enter delete | n/esc cancel"),
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ctrl+b sidebar | m master data | 1-6 jump to page | ? help\n\
pages: tab/shift+tab next/prev page | t cycle sub-tab\n\
table: j/k rows | h/l columns | g/G first/last row | s sort column | S clear sort\n\
paging: ]/[ next/prev page | }/{ last/first page | +/- rows per page\n\
search: / start | type to filter | backspace | ctrl+u clear | enter/esc done\n\
delete: d selected row | y/enter confirm | n/esc cancel"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
