//! Interactive terminal interface.
//!
//! This module implements the five-tab application: a kanban board with
//! card movement, the ordered backlog, sprint overview with lifecycle
//! actions, report charts, and a settings page. All data flows through
//! snapshots taken from the stores; every mutation goes back through a
//! store call and the derived views are recomputed from the result.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use tokio::runtime::Runtime;

use crate::backlog::sort_backlog;
use crate::board::group_by_status;
use crate::cmd::{format_days_remaining, sprint_name, user_name};
use crate::fields::{Priority, SprintStatus, Status};
use crate::filter::{filter_tasks, TaskFilter};
use crate::project::{Project, User};
use crate::report::{priority_distribution, sprint_overview, status_distribution, summary};
use crate::sprint::{Sprint, SprintPatch};
use crate::store::Stores;
use crate::task::{Task, TaskPatch};
use crate::tui::colors::{AMBER, BRIGHT_BLUE, DARK_RED, SEA_GREEN, SLATE};

/// The five pages of the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Board,
    Backlog,
    Sprints,
    Reports,
    Settings,
}

impl Tab {
    const ALL: [Tab; 5] = [Tab::Board, Tab::Backlog, Tab::Sprints, Tab::Reports, Tab::Settings];

    fn title(self) -> &'static str {
        match self {
            Tab::Board => "Board",
            Tab::Backlog => "Backlog",
            Tab::Sprints => "Sprints",
            Tab::Reports => "Reports",
            Tab::Settings => "Settings",
        }
    }
}

/// Theme color for a board column.
fn status_color(status: Status) -> Color {
    match status {
        Status::ToDo => SLATE,
        Status::InProgress => AMBER,
        Status::Testing => BRIGHT_BLUE,
        Status::Done => SEA_GREEN,
    }
}

/// Theme color for a priority.
fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => SEA_GREEN,
        Priority::Medium => AMBER,
        Priority::High => DARK_RED,
    }
}

/// Badge color for a sprint state.
fn sprint_color(status: SprintStatus) -> Color {
    match status {
        SprintStatus::Planned => SLATE,
        SprintStatus::Active => BRIGHT_BLUE,
        SprintStatus::Completed => SEA_GREEN,
    }
}

/// Main application state
pub struct App<'a> {
    rt: &'a Runtime,
    stores: &'a Stores,
    tab: Tab,

    // Snapshots from the stores
    tasks: Vec<Task>,
    sprints: Vec<Sprint>,
    projects: Vec<Project>,
    users: Vec<User>,

    filter: TaskFilter,
    selected_column: usize, // Current board column (0-3)
    selected_card: usize,   // Selected card within the column
    column_scroll_offsets: [usize; 4],
    backlog_selected: usize,
    backlog_scroll: usize,
    sprint_selected: usize,
    detail_task: Option<String>, // Task ID shown in the detail popup
    status_message: String,

    // Task ids per board column, recomputed from the filtered snapshot
    columns: [Vec<String>; 4],
}

impl<'a> App<'a> {
    /// Create the app and take the initial snapshots.
    pub fn new(rt: &'a Runtime, stores: &'a Stores) -> Self {
        let mut app = App {
            rt,
            stores,
            tab: Tab::Board,
            tasks: Vec::new(),
            sprints: Vec::new(),
            projects: Vec::new(),
            users: Vec::new(),
            filter: TaskFilter::default(),
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: [0; 4],
            backlog_selected: 0,
            backlog_scroll: 0,
            sprint_selected: 0,
            detail_task: None,
            status_message: String::new(),
            columns: Default::default(),
        };
        app.reload();
        app
    }

    /// Fetch fresh snapshots from every store and rebuild the board.
    fn reload(&mut self) {
        self.tasks = self.rt.block_on(self.stores.tasks.list());
        self.sprints = self.rt.block_on(self.stores.sprints.list());
        self.projects = self.rt.block_on(self.stores.projects.list());
        self.users = self.rt.block_on(self.stores.users.list());
        self.update_columns();
    }

    /// Rebuild the board columns from the filtered task snapshot.
    fn update_columns(&mut self) {
        for (i, column) in self.columns.iter_mut().enumerate() {
            column.clear();
            self.column_scroll_offsets[i] = 0;
        }

        let visible = filter_tasks(&self.tasks, &self.filter);
        for (status, tasks) in group_by_status(&visible) {
            self.columns[status as usize] = tasks.iter().map(|t| t.id.clone()).collect();
        }

        self.clamp_selection();
    }

    /// Ensure selected column and card indices are valid
    fn clamp_selection(&mut self) {
        if self.selected_column >= self.columns.len() {
            self.selected_column = 0;
        }

        let column_len = self.columns[self.selected_column].len();
        if column_len == 0 {
            self.selected_card = 0;
            self.column_scroll_offsets[self.selected_column] = 0;
        } else if self.selected_card >= column_len {
            self.selected_card = column_len - 1;
        }
    }

    /// The filtered backlog in priority/recency order.
    fn backlog_rows(&self) -> Vec<&Task> {
        let visible = filter_tasks(&self.tasks, &self.filter);
        sort_backlog(&visible)
    }

    fn selected_task_id(&self) -> Option<String> {
        self.columns[self.selected_column].get(self.selected_card).cloned()
    }

    /// Replace a task in the local snapshot with the store's version.
    fn apply_task(&mut self, updated: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
            *slot = updated;
        } else {
            self.tasks.insert(0, updated);
        }
        self.update_columns();
    }

    /// Move the selected card to the next or previous board column.
    fn move_card(&mut self, forward: bool) {
        let Some(task_id) = self.selected_task_id() else { return };
        let Some(task) = self.tasks.iter().find(|t| t.id == task_id) else { return };
        let target = if forward { task.status.next() } else { task.status.prev() };
        if target == task.status {
            return;
        }

        let patch = TaskPatch { status: Some(target), ..Default::default() };
        match self.rt.block_on(self.stores.tasks.update(&task_id, patch)) {
            Ok(updated) => {
                self.apply_task(updated);
                self.status_message = format!("Moved task to {}", target.label());
                self.selected_column = target as usize;
                if let Some(pos) =
                    self.columns[self.selected_column].iter().position(|id| *id == task_id)
                {
                    self.selected_card = pos;
                } else {
                    self.clamp_selection();
                }
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    /// Start the selected sprint if it is still planned.
    fn start_selected_sprint(&mut self) {
        let Some(sprint) = self.sprints.get(self.sprint_selected) else { return };
        if sprint.status != SprintStatus::Planned {
            self.status_message = "Only planned sprints can start".into();
            return;
        }
        let id = sprint.id.clone();
        let patch = SprintPatch { status: Some(SprintStatus::Active), ..Default::default() };
        match self.rt.block_on(self.stores.sprints.update(&id, patch)) {
            Ok(updated) => {
                self.status_message = format!("Started {}", updated.name);
                if let Some(slot) = self.sprints.iter_mut().find(|s| s.id == updated.id) {
                    *slot = updated;
                }
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    /// Complete the selected sprint if it is active.
    fn complete_selected_sprint(&mut self) {
        let Some(sprint) = self.sprints.get(self.sprint_selected) else { return };
        if sprint.status != SprintStatus::Active {
            self.status_message = "Only active sprints can complete".into();
            return;
        }
        let id = sprint.id.clone();
        let patch = SprintPatch { status: Some(SprintStatus::Completed), ..Default::default() };
        match self.rt.block_on(self.stores.sprints.update(&id, patch)) {
            Ok(updated) => {
                self.status_message = format!("Completed {}", updated.name);
                if let Some(slot) = self.sprints.iter_mut().find(|s| s.id == updated.id) {
                    *slot = updated;
                }
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn cycle_status_filter(&mut self) {
        self.filter.status = match self.filter.status {
            None => Some(Status::ToDo),
            Some(Status::Done) => None,
            Some(s) => Some(s.next()),
        };
        self.update_columns();
        self.status_message = match self.filter.status {
            Some(s) => format!("Status filter: {}", s.label()),
            None => "Status filter cleared".into(),
        };
    }

    fn cycle_priority_filter(&mut self) {
        self.filter.priority = match self.filter.priority {
            None => Some(Priority::Low),
            Some(Priority::Low) => Some(Priority::Medium),
            Some(Priority::Medium) => Some(Priority::High),
            Some(Priority::High) => None,
        };
        self.update_columns();
        self.status_message = match self.filter.priority {
            Some(p) => format!("Priority filter: {}", p.label()),
            None => "Priority filter cleared".into(),
        };
    }

    fn cycle_assignee_filter(&mut self) {
        self.filter.assignee = match &self.filter.assignee {
            None => self.users.first().map(|u| u.id.clone()),
            Some(current) => match self.users.iter().position(|u| &u.id == current) {
                Some(i) if i + 1 < self.users.len() => Some(self.users[i + 1].id.clone()),
                _ => None,
            },
        };
        self.update_columns();
        self.status_message = match &self.filter.assignee {
            Some(id) => format!("Assignee filter: {}", user_name(&self.users, Some(id))),
            None => "Assignee filter cleared".into(),
        };
    }

    fn cycle_sprint_filter(&mut self) {
        self.filter.sprint = match &self.filter.sprint {
            None => self.sprints.first().map(|s| s.id.clone()),
            Some(current) => match self.sprints.iter().position(|s| &s.id == current) {
                Some(i) if i + 1 < self.sprints.len() => Some(self.sprints[i + 1].id.clone()),
                _ => None,
            },
        };
        self.update_columns();
        self.status_message = match &self.filter.sprint {
            Some(id) => format!("Sprint filter: {}", sprint_name(&self.sprints, Some(id))),
            None => "Sprint filter cleared".into(),
        };
    }

    fn clear_filters(&mut self) {
        self.filter = TaskFilter::default();
        self.update_columns();
        self.status_message = "Filters cleared".into();
    }

    fn next_tab(&mut self) {
        let idx = self.tab as usize;
        self.tab = Tab::ALL[(idx + 1) % Tab::ALL.len()];
    }

    fn prev_tab(&mut self) {
        let idx = self.tab as usize;
        self.tab = Tab::ALL[(idx + Tab::ALL.len() - 1) % Tab::ALL.len()];
    }

    /// Handle keyboard input
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // The detail popup swallows everything except close keys.
                if self.detail_task.is_some() {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                        self.detail_task = None;
                    }
                    return Ok(false);
                }

                self.status_message.clear();

                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(true)
                    }
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(true),

                    KeyCode::Tab => self.next_tab(),
                    KeyCode::BackTab => self.prev_tab(),
                    KeyCode::Char('1') => self.tab = Tab::Board,
                    KeyCode::Char('2') => self.tab = Tab::Backlog,
                    KeyCode::Char('3') => self.tab = Tab::Sprints,
                    KeyCode::Char('4') => self.tab = Tab::Reports,
                    KeyCode::Char('5') => self.tab = Tab::Settings,

                    KeyCode::Char('r') => {
                        self.reload();
                        self.status_message = "Reloaded from stores".into();
                    }
                    KeyCode::Char('f') => self.cycle_status_filter(),
                    KeyCode::Char('p') => self.cycle_priority_filter(),
                    KeyCode::Char('a') => self.cycle_assignee_filter(),
                    KeyCode::Char('y') => self.cycle_sprint_filter(),
                    KeyCode::Char('x') => self.clear_filters(),

                    _ => match self.tab {
                        Tab::Board => self.handle_board_key(key.code, key.modifiers),
                        Tab::Backlog => self.handle_backlog_key(key.code),
                        Tab::Sprints => self.handle_sprints_key(key.code),
                        _ => {}
                    },
                }
            }
        }
        Ok(false)
    }

    fn handle_board_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            // Card movement between columns (check first, before navigation)
            KeyCode::Left if modifiers.contains(KeyModifiers::CONTROL) => self.move_card(false),
            KeyCode::Right if modifiers.contains(KeyModifiers::CONTROL) => self.move_card(true),
            KeyCode::Char('m') => self.move_card(true),
            KeyCode::Char('M') => self.move_card(false),

            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right => {
                if self.selected_column < self.columns.len() - 1 {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up => {
                if self.selected_card > 0 {
                    self.selected_card -= 1;
                }
            }
            KeyCode::Down => {
                let column_len = self.columns[self.selected_column].len();
                if column_len > 0 && self.selected_card < column_len - 1 {
                    self.selected_card += 1;
                }
            }
            KeyCode::Enter => self.detail_task = self.selected_task_id(),
            _ => {}
        }
    }

    fn handle_backlog_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => {
                if self.backlog_selected > 0 {
                    self.backlog_selected -= 1;
                }
            }
            KeyCode::Down => {
                let len = self.backlog_rows().len();
                if len > 0 && self.backlog_selected < len - 1 {
                    self.backlog_selected += 1;
                }
            }
            KeyCode::Enter => {
                let id = self
                    .backlog_rows()
                    .get(self.backlog_selected)
                    .map(|t| t.id.clone());
                self.detail_task = id;
            }
            _ => {}
        }
    }

    fn handle_sprints_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => {
                if self.sprint_selected > 0 {
                    self.sprint_selected -= 1;
                }
            }
            KeyCode::Down => {
                if !self.sprints.is_empty() && self.sprint_selected < self.sprints.len() - 1 {
                    self.sprint_selected += 1;
                }
            }
            KeyCode::Char('s') => self.start_selected_sprint(),
            KeyCode::Char('c') => self.complete_selected_sprint(),
            _ => {}
        }
    }

    /// Render the whole interface
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tab bar
                Constraint::Min(0),    // Page
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_tabs(f, chunks[0]);
        match self.tab {
            Tab::Board => self.render_board(f, chunks[1]),
            Tab::Backlog => self.render_backlog(f, chunks[1]),
            Tab::Sprints => self.render_sprints(f, chunks[1]),
            Tab::Reports => self.render_reports(f, chunks[1]),
            Tab::Settings => self.render_settings(f, chunks[1]),
        }
        self.render_status_bar(f, chunks[2]);

        if self.detail_task.is_some() {
            self.render_task_detail_popup(f);
        }
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
            .collect();
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("sprintboard"))
            .select(self.tab as usize)
            .highlight_style(Style::default().fg(BRIGHT_BLUE).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, area);
    }

    /// Render the kanban board
    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let column_count = self.columns.len();
        let constraints: Vec<Constraint> = (0..column_count)
            .map(|_| Constraint::Percentage(100 / column_count as u16))
            .collect();

        let columns_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (i, &column_area) in columns_layout.iter().enumerate() {
            self.render_column(f, column_area, i, Status::ALL[i]);
        }
    }

    /// Render a single board column
    fn render_column(&mut self, f: &mut Frame, area: Rect, column_index: usize, status: Status) {
        let is_selected = column_index == self.selected_column;
        let column_color = status_color(status);

        let border_style = if is_selected {
            Style::default().fg(column_color).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let title = format!("{} ({})", status.label(), self.columns[column_index].len());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style);

        let inner = block.inner(area);
        f.render_widget(block, area);

        let cards = &self.columns[column_index];
        if cards.is_empty() {
            return;
        }

        let card_height = 5;
        let available_height = inner.height as usize;
        let visible_cards = available_height / card_height;

        // Keep the selected card visible by adjusting this column's scroll.
        let scroll_offset = if is_selected {
            let start_visible = self.column_scroll_offsets[column_index];
            let end_visible = start_visible + visible_cards;

            if self.selected_card < start_visible {
                self.column_scroll_offsets[column_index] = self.selected_card;
                self.selected_card
            } else if self.selected_card >= end_visible && end_visible > 0 {
                let new_offset = self.selected_card - visible_cards + 1;
                self.column_scroll_offsets[column_index] = new_offset;
                new_offset
            } else {
                start_visible
            }
        } else {
            self.column_scroll_offsets[column_index]
        };

        let card_ids: Vec<String> = cards.iter().skip(scroll_offset).cloned().collect();
        let mut current_y = 0;
        let mut rendered_cards = 0;

        for (offset_index, task_id) in card_ids.iter().enumerate() {
            let card_index = scroll_offset + offset_index;
            if let Some(task) = self.tasks.iter().find(|t| t.id == *task_id) {
                if current_y + card_height > available_height {
                    break;
                }

                let is_this_card_selected = is_selected && card_index == self.selected_card;
                let card_area = Rect {
                    x: inner.x,
                    y: inner.y + current_y as u16,
                    width: inner.width,
                    height: card_height as u16,
                };

                render_card(f, card_area, task, &self.users, column_color, is_this_card_selected);

                current_y += card_height;
                rendered_cards += 1;
            }
        }

        // Scroll indicators
        if scroll_offset > 0 {
            let indicator = Paragraph::new(format!("▲ +{} above", scroll_offset))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect { x: inner.x, y: inner.y, width: inner.width, height: 1 },
            );
        }

        let remaining = cards.len() - scroll_offset - rendered_cards;
        if remaining > 0 {
            let indicator = Paragraph::new(format!("▼ +{} below", remaining))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect {
                    x: inner.x,
                    y: inner.y + inner.height - 1,
                    width: inner.width,
                    height: 1,
                },
            );
        }
    }

    /// Render the backlog as an ordered task table
    fn render_backlog(&mut self, f: &mut Frame, area: Rect) {
        let rows: Vec<(String, Priority)> = self
            .backlog_rows()
            .iter()
            .map(|t| {
                let line = format!(
                    "{:<8} {:<12} {:<7} {:<10} {:<14} {}",
                    t.id,
                    t.status.label(),
                    t.priority.label(),
                    t.sprint_id.as_deref().unwrap_or("-"),
                    user_name(&self.users, t.assignee_id.as_deref()),
                    t.title
                );
                (line, t.priority)
            })
            .collect();

        if rows.is_empty() {
            self.backlog_selected = 0;
        } else if self.backlog_selected >= rows.len() {
            self.backlog_selected = rows.len() - 1;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Backlog ({})", rows.len()));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let visible = (inner.height as usize).saturating_sub(1);
        if visible == 0 {
            return;
        }
        if self.backlog_selected < self.backlog_scroll {
            self.backlog_scroll = self.backlog_selected;
        } else if self.backlog_selected >= self.backlog_scroll + visible {
            self.backlog_scroll = self.backlog_selected - visible + 1;
        }

        let mut lines = vec![Line::from(Span::styled(
            format!(
                "{:<8} {:<12} {:<7} {:<10} {:<14} {}",
                "ID", "Status", "Pri", "Sprint", "Assignee", "Title"
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        for (i, (text, priority)) in rows.iter().enumerate().skip(self.backlog_scroll).take(visible) {
            let style = if i == self.backlog_selected {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(priority_color(*priority))
            };
            lines.push(Line::from(Span::styled(text.clone(), style)));
        }

        let list = Paragraph::new(lines);
        f.render_widget(list, inner);
    }

    /// Render the sprint overview with a progress gauge for the selection
    fn render_sprints(&mut self, f: &mut Frame, area: Rect) {
        if !self.sprints.is_empty() && self.sprint_selected >= self.sprints.len() {
            self.sprint_selected = self.sprints.len() - 1;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let refs: Vec<&Task> = self.tasks.iter().collect();
        let rows = sprint_overview(&refs, &self.sprints);
        let today = chrono::Local::now().date_naive();

        let mut lines: Vec<Line> = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            let sprint = row.sprint;
            let marker = if i == self.sprint_selected { "> " } else { "  " };
            let name_style = if i == self.sprint_selected {
                Style::default()
                    .fg(sprint_color(sprint.status))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(sprint_color(sprint.status))
            };
            lines.push(Line::from(vec![
                Span::raw(marker.to_string()),
                Span::styled(format!("{} ", sprint.name), name_style),
                Span::raw(format!(
                    "[{}]  {} to {}  {}",
                    sprint.status.label(),
                    sprint.start_date,
                    sprint.end_date,
                    format_days_remaining(sprint.end_date, today)
                )),
            ]));
            let counts = status_distribution(
                &refs
                    .iter()
                    .copied()
                    .filter(|t| t.sprint_id.as_deref() == Some(sprint.id.as_str()))
                    .collect::<Vec<_>>(),
            );
            let breakdown: Vec<String> = counts
                .iter()
                .map(|(status, n)| format!("{}: {}", status.label(), n))
                .collect();
            lines.push(Line::from(format!(
                "    {}% done ({}/{})   {}",
                row.percent,
                row.done,
                row.total,
                breakdown.join("  ")
            )));
            lines.push(Line::from(""));
        }

        let list = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Sprints ({})", self.sprints.len())),
        );
        f.render_widget(list, chunks[0]);

        if let Some(row) = rows.get(self.sprint_selected) {
            let gauge = Gauge::default()
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("{} progress", row.sprint.name)),
                )
                .gauge_style(Style::default().fg(sprint_color(row.sprint.status)))
                .percent(row.percent as u16);
            f.render_widget(gauge, chunks[1]);
        }
    }

    /// Render the reports page with textual bar charts
    fn render_reports(&self, f: &mut Frame, area: Rect) {
        let refs: Vec<&Task> = self.tasks.iter().collect();
        let stats = summary(&refs, &self.sprints);

        let mut lines = vec![
            Line::from(Span::styled(
                format!(
                    "Tasks: {} total, {} done, {} in progress   Active sprints: {}",
                    stats.total_tasks,
                    stats.done_tasks,
                    stats.in_progress_tasks,
                    stats.active_sprints
                ),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("By status"),
        ];
        for (status, count) in status_distribution(&refs) {
            lines.push(Line::from(vec![
                Span::raw(format!("  {:<13}", status.label())),
                Span::styled("█".repeat(count.min(40)), Style::default().fg(status_color(status))),
                Span::raw(format!(" {count}")),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from("By priority"));
        for (priority, count) in priority_distribution(&refs) {
            lines.push(Line::from(vec![
                Span::raw(format!("  {:<13}", priority.label())),
                Span::styled(
                    "█".repeat(count.min(40)),
                    Style::default().fg(priority_color(priority)),
                ),
                Span::raw(format!(" {count}")),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from("Sprint progress"));
        for row in sprint_overview(&refs, &self.sprints) {
            let filled = (row.percent as usize) / 10;
            lines.push(Line::from(vec![
                Span::raw(format!("  {:<26}", row.sprint.name)),
                Span::styled(
                    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled)),
                    Style::default().fg(sprint_color(row.sprint.status)),
                ),
                Span::raw(format!(" {}% ({}/{})", row.percent, row.done, row.total)),
            ]));
        }

        let report = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Reports"));
        f.render_widget(report, area);
    }

    /// Render project, workflow, and team settings
    fn render_settings(&self, f: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = vec![Line::from(Span::styled(
            "Projects",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        for project in &self.projects {
            let workflow: Vec<&str> = project.workflow.iter().map(|s| s.label()).collect();
            lines.push(Line::from(format!("  {}  {}", project.key, project.name)));
            if !project.description.is_empty() {
                lines.push(Line::from(format!("      {}", project.description)));
            }
            lines.push(Line::from(format!("      Workflow: {}", workflow.join(" > "))));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Team",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for user in &self.users {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<3}", user.initials()),
                    Style::default().fg(BRIGHT_BLUE).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {:<20} {}", user.name, user.email)),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Workflow stages",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for status in Status::ALL {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<13}", status.label()),
                    Style::default().fg(status_color(status)),
                ),
                Span::raw(status.description()),
            ]));
        }

        let settings = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Settings"))
            .wrap(Wrap { trim: false });
        f.render_widget(settings, area);
    }

    /// Render the status bar
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let filters = if self.filter.is_empty() {
                String::new()
            } else {
                let mut active = Vec::new();
                if let Some(s) = self.filter.status {
                    active.push(format!("status={}", s.label()));
                }
                if let Some(p) = self.filter.priority {
                    active.push(format!("priority={}", p.label()));
                }
                if let Some(id) = &self.filter.assignee {
                    active.push(format!("assignee={}", user_name(&self.users, Some(id))));
                }
                if let Some(id) = &self.filter.sprint {
                    active.push(format!("sprint={}", sprint_name(&self.sprints, Some(id))));
                }
                format!(" [{}]", active.join(" "))
            };
            format!(
                "Tab/1-5: pages | f/p/a/y: filters | x: clear | m/M: move card | s/c: sprint | r: reload | q: quit{}",
                filters
            )
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(SLATE).fg(Color::Black))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Render the task detail popup
    fn render_task_detail_popup(&self, f: &mut Frame) {
        let Some(task_id) = &self.detail_task else { return };
        let Some(task) = self.tasks.iter().find(|t| t.id == *task_id) else { return };

        // Centered, 80% of the screen
        let popup_area = {
            let area = f.area();
            let popup_width = (area.width * 80) / 100;
            let popup_height = (area.height * 80) / 100;
            let x = (area.width - popup_width) / 2;
            let y = (area.height - popup_height) / 2;
            Rect::new(x, y, popup_width, popup_height)
        };

        f.render_widget(Clear, popup_area);

        let mut detail_lines = vec![
            Line::from(Span::styled(
                format!("{}: {}", task.id, task.title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Status:       {}", task.status.label())),
            Line::from(format!("Priority:     {}", task.priority.label())),
            Line::from(format!(
                "Assignee:     {}",
                user_name(&self.users, task.assignee_id.as_deref())
            )),
            Line::from(format!(
                "Sprint:       {}",
                sprint_name(&self.sprints, task.sprint_id.as_deref())
            )),
            Line::from(format!("Project:      {}", task.project_id)),
            Line::from(format!("Created:      {}", task.created_at.format("%Y-%m-%d %H:%M"))),
            Line::from(format!("Updated:      {}", task.updated_at.format("%Y-%m-%d %H:%M"))),
            Line::from(""),
            Line::from("Description:"),
            Line::from(if task.description.is_empty() { "-" } else { task.description.as_str() }),
            Line::from(""),
            Line::from(format!("Comments ({}):", task.comments.len())),
        ];
        for comment in &task.comments {
            detail_lines.push(Line::from(format!(
                "  [{}] {}: {}",
                comment.created_at.format("%Y-%m-%d %H:%M"),
                user_name(&self.users, Some(&comment.author_id)),
                comment.text
            )));
        }

        let popup_block = Block::default()
            .borders(Borders::ALL)
            .title("Task Details (Press Enter to close)")
            .title_alignment(Alignment::Center)
            .border_style(
                Style::default()
                    .fg(status_color(task.status))
                    .add_modifier(Modifier::BOLD),
            );

        let popup = Paragraph::new(detail_lines)
            .block(popup_block)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black));

        f.render_widget(popup, popup_area);
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Render a single task card
fn render_card(
    f: &mut Frame,
    area: Rect,
    task: &Task,
    users: &[User],
    column_color: Color,
    is_selected: bool,
) {
    let style = if is_selected {
        Style::default()
            .bg(column_color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray)
    };

    let mut card_text = vec![Line::from(task.id.clone())];

    // Wrap the title into at most two lines for the fixed card height.
    let available_width = area.width.saturating_sub(2) as usize;
    let mut current_line = String::new();
    let mut lines = Vec::new();
    for word in task.title.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= available_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line.clone());
            current_line = word.to_string();
            if lines.len() >= 2 {
                break;
            }
        }
    }
    if !current_line.is_empty() && lines.len() < 2 {
        lines.push(current_line);
    }
    for line in lines {
        card_text.push(Line::from(line));
    }

    card_text.push(Line::from(format!(
        "{} | {}",
        task.priority.label(),
        user_name(users, task.assignee_id.as_deref())
    )));

    let card = Paragraph::new(card_text)
        .block(Block::default().borders(Borders::ALL))
        .style(style)
        .wrap(Wrap { trim: true });

    f.render_widget(card, area);
}
