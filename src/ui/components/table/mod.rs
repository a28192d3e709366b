//! Generic paginated data table with a per-row action menu.
//!
//! [`DataTable`] composes the row renderer, the [`action_menu`] and the
//! [`Pager`]. It renders whatever the consumer hands it and reports what the
//! user asked for as [`TableEvent`]s. Pagination is only ever requested,
//! never applied: the consumer decides what the next [`Pagination`] is.

pub mod action_menu;
pub mod column;
pub mod pagination;
pub mod row;

use std::num::NonZeroU32;
use std::sync::Arc;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Clear, List, ListItem, ListState, Table, TableState,
};

pub use action_menu::{ActionSet, Anchor, Chosen, MenuMsg, MenuState, RowAction};
pub use column::{Column, Record};
pub use pagination::{
    DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZES, PageEvent, PageIntent, Pager, PagerLayout, Pagination,
};
pub use row::{ACTION_GLYPH, ACTION_WIDTH, render_row};

use crate::Theme;
use crate::config::{KeyResolver, NavAction, TableAction};
use crate::ui::{Component, EventResult, Result};

const MENU_WIDTH: u16 = 14;

/// What the user asked the table for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent<T> {
    PageChange(u32),
    PageSizeChange(NonZeroU32),
    View(T),
    Edit(T),
    Delete(T),
}

impl<T> From<Chosen<T>> for TableEvent<T> {
    fn from(chosen: Chosen<T>) -> Self {
        match chosen.action {
            RowAction::View => Self::View(chosen.row),
            RowAction::Edit => Self::Edit(chosen.row),
            RowAction::Delete => Self::Delete(chosen.row),
        }
    }
}

impl<T> From<PageEvent> for TableEvent<T> {
    fn from(event: PageEvent) -> Self {
        match event {
            PageEvent::PageChange(page) => Self::PageChange(page),
            PageEvent::PageSizeChange(size) => Self::PageSizeChange(size),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Listeners {
    page_change: bool,
    page_size_change: bool,
}

/// Where things were drawn last frame, for mouse hit-testing.
#[derive(Debug, Clone, Default)]
struct HitAreas {
    body: Rect,
    offset: usize,
    action_cells: Vec<(usize, Rect)>,
    menu: Rect,
    menu_entries: Vec<(RowAction, Rect)>,
    pager: PagerLayout,
}

impl HitAreas {
    fn clear_menu(&mut self) {
        self.menu = Rect::default();
        self.menu_entries.clear();
    }
}

pub struct DataTable<T> {
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    pagination: Pagination,
    pager: Pager,
    actions: ActionSet,
    listeners: Listeners,
    menu: MenuState<T>,
    state: TableState,
    title: Option<String>,
    hits: HitAreas,
    resolver: Arc<KeyResolver>,
}

impl<T: Record + Clone> DataTable<T> {
    pub fn new(columns: Vec<Column<T>>, resolver: Arc<KeyResolver>) -> Self {
        debug_assert!(!columns.is_empty(), "a table needs at least one column");
        debug_assert!(
            column::duplicate_id(&columns).is_none(),
            "column ids must be unique"
        );
        Self {
            columns,
            rows: Vec::new(),
            pagination: Pagination::default(),
            pager: Pager::default(),
            actions: ActionSet::empty(),
            listeners: Listeners::default(),
            menu: MenuState::Closed,
            state: TableState::default(),
            title: None,
            hits: HitAreas::default(),
            resolver,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_page_sizes(mut self, sizes: Vec<NonZeroU32>) -> Self {
        self.pager = Pager::new(sizes);
        self
    }

    /// Adds the "View" menu entry.
    #[must_use]
    pub const fn on_view(mut self) -> Self {
        self.actions = self.actions.with(RowAction::View);
        self
    }

    /// Adds the "Edit" menu entry.
    #[must_use]
    pub const fn on_edit(mut self) -> Self {
        self.actions = self.actions.with(RowAction::Edit);
        self
    }

    /// Adds the "Delete" menu entry.
    #[must_use]
    pub const fn on_delete(mut self) -> Self {
        self.actions = self.actions.with(RowAction::Delete);
        self
    }

    /// Replaces the whole menu at once.
    #[must_use]
    pub const fn with_actions(mut self, actions: ActionSet) -> Self {
        self.actions = actions;
        self
    }

    #[must_use]
    pub const fn on_page_change(mut self) -> Self {
        self.listeners.page_change = true;
        self
    }

    #[must_use]
    pub const fn on_page_size_change(mut self) -> Self {
        self.listeners.page_size_change = true;
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Replace the displayed rows. Any open menu is closed since its row is gone.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.menu = MenuState::Closed;
        self.hits.clear_menu();
        let selected = match self.state.selected() {
            _ if self.rows.is_empty() => None,
            Some(i) => Some(i.min(self.rows.len() - 1)),
            None => Some(0),
        };
        self.state.select(selected);
    }

    pub const fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = pagination;
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub const fn actions(&self) -> ActionSet {
        self.actions
    }

    pub const fn menu(&self) -> &MenuState<T> {
        &self.menu
    }

    pub fn cursor(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Action cell of row `index`, if it was visible last frame.
    pub fn action_cell(&self, index: usize) -> Option<Rect> {
        self.hits
            .action_cells
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, rect)| *rect)
    }

    /// Menu entry areas from the last frame, in display order.
    pub fn menu_entries(&self) -> &[(RowAction, Rect)] {
        &self.hits.menu_entries
    }

    pub const fn pager_layout(&self) -> PagerLayout {
        self.hits.pager
    }

    fn dispatch_menu(&mut self, msg: MenuMsg<T>) -> EventResult<TableEvent<T>> {
        let state = std::mem::take(&mut self.menu);
        let (next, chosen) = action_menu::reduce(state, msg, self.actions);
        self.menu = next;
        if !self.menu.is_open() {
            self.hits.clear_menu();
        }
        EventResult::consumed_with(chosen.map(TableEvent::from))
    }

    fn open_menu(&mut self, index: usize) -> EventResult<TableEvent<T>> {
        let Some(row) = self.rows.get(index).cloned() else {
            return EventResult::Ignored;
        };
        if self.actions.is_empty() {
            return EventResult::Ignored;
        }
        self.state.select(Some(index));
        let anchor = Anchor {
            row_index: index,
            area: self.action_cell(index),
        };
        self.dispatch_menu(MenuMsg::Open { anchor, row })
    }

    fn request_page(&self, intent: PageIntent) -> EventResult<TableEvent<T>> {
        let listening = match intent {
            PageIntent::Previous | PageIntent::Next => self.listeners.page_change,
            PageIntent::GrowPageSize
            | PageIntent::ShrinkPageSize
            | PageIntent::CyclePageSize => self.listeners.page_size_change,
        };
        if !listening {
            return EventResult::Consumed;
        }
        EventResult::consumed_with(
            self.pager
                .request(&self.pagination, intent)
                .map(TableEvent::from),
        )
    }

    fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = self
            .state
            .selected()
            .map_or(0, |i| (i + 1).min(self.rows.len() - 1));
        self.state.select(Some(i));
    }

    fn select_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(i));
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> EventResult<TableEvent<T>> {
        if self.resolver.matches_nav(&key, NavAction::Down) {
            return self.dispatch_menu(MenuMsg::Next);
        }
        if self.resolver.matches_nav(&key, NavAction::Up) {
            return self.dispatch_menu(MenuMsg::Previous);
        }
        if self.resolver.matches_nav(&key, NavAction::Select) {
            return self.dispatch_menu(MenuMsg::ChooseHighlighted);
        }
        if self.resolver.matches_table(&key, TableAction::CloseMenu) {
            return self.dispatch_menu(MenuMsg::Dismiss);
        }
        // The open menu is modal.
        EventResult::Consumed
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> EventResult<TableEvent<T>> {
        if self.resolver.matches_nav(&key, NavAction::Down) {
            self.select_next();
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Up) {
            self.select_previous();
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Home) {
            if !self.rows.is_empty() {
                self.state.select(Some(0));
            }
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::End) {
            if !self.rows.is_empty() {
                self.state.select(Some(self.rows.len() - 1));
            }
            return EventResult::Consumed;
        }
        if self.resolver.matches_table(&key, TableAction::OpenMenu) {
            return match self.state.selected() {
                Some(index) => self.open_menu(index),
                None => EventResult::Ignored,
            };
        }
        if self.resolver.matches_table(&key, TableAction::PrevPage) {
            return self.request_page(PageIntent::Previous);
        }
        if self.resolver.matches_table(&key, TableAction::NextPage) {
            return self.request_page(PageIntent::Next);
        }
        if self.resolver.matches_table(&key, TableAction::GrowPageSize) {
            return self.request_page(PageIntent::GrowPageSize);
        }
        if self.resolver.matches_table(&key, TableAction::ShrinkPageSize) {
            return self.request_page(PageIntent::ShrinkPageSize);
        }
        EventResult::Ignored
    }

    fn handle_click(&mut self, at: Position) -> EventResult<TableEvent<T>> {
        if self.menu.is_open() {
            let entry = self
                .hits
                .menu_entries
                .iter()
                .find(|(_, rect)| rect.contains(at))
                .map(|(action, _)| *action);
            if let Some(action) = entry {
                return self.dispatch_menu(MenuMsg::Choose(action));
            }
            // Border or padding of the popup.
            if self.hits.menu.contains(at) {
                return EventResult::Consumed;
            }
        }

        let trigger = self
            .hits
            .action_cells
            .iter()
            .find(|(_, rect)| rect.contains(at))
            .map(|(index, _)| *index);
        if let Some(index) = trigger {
            return match self.open_menu(index) {
                EventResult::Ignored => EventResult::Consumed,
                result => result,
            };
        }

        if self.menu.is_open() {
            return self.dispatch_menu(MenuMsg::Dismiss);
        }

        let pager = self.hits.pager;
        if pager.prev.contains(at) {
            return self.request_page(PageIntent::Previous);
        }
        if pager.next.contains(at) {
            return self.request_page(PageIntent::Next);
        }
        if pager.size.contains(at) {
            return self.request_page(PageIntent::CyclePageSize);
        }

        if self.hits.body.contains(at) {
            let index = self.hits.offset + usize::from(at.y - self.hits.body.y);
            if index < self.rows.len() {
                self.state.select(Some(index));
            }
            return EventResult::Consumed;
        }

        EventResult::Ignored
    }

    fn render_menu(&mut self, frame: &mut Frame, theme: &Theme) {
        let (Some(anchor), Some(highlighted)) = (self.menu.anchor(), self.menu.highlighted())
        else {
            return;
        };
        let Some(trigger) = self.action_cell(anchor.row_index).or(anchor.area) else {
            self.hits.clear_menu();
            return;
        };

        let entries = self.actions.entries();
        let height = u16::try_from(entries.len()).unwrap_or(u16::MAX).saturating_add(2);
        let screen = frame.area();

        let below = trigger.bottom();
        let y = if below.saturating_add(height) <= screen.bottom() {
            below
        } else {
            trigger.y.saturating_sub(height)
        };
        // Left of the action column so the other rows' triggers stay clickable.
        let x = trigger.x.saturating_sub(MENU_WIDTH);
        let popup = Rect::new(x, y, MENU_WIDTH, height).clamp(screen);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.mauve()))
            .style(Style::default().bg(theme.base()));
        let inner = block.inner(popup);

        let items: Vec<ListItem> = entries
            .iter()
            .map(|action| {
                let style = if *action == RowAction::Delete {
                    Style::default().fg(theme.red())
                } else {
                    Style::default().fg(theme.text())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", action.icon()), style),
                    Span::styled(action.label(), style),
                ]))
            })
            .collect();
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(theme.selection_bg())
                .add_modifier(Modifier::BOLD),
        );
        let mut list_state = ListState::default().with_selected(Some(highlighted));

        frame.render_widget(Clear, popup);
        frame.render_stateful_widget(list, popup, &mut list_state);

        self.hits.menu = popup;
        self.hits.menu_entries = entries
            .into_iter()
            .zip(inner.rows())
            .collect();
    }
}

impl<T: Record + Clone> Component for DataTable<T> {
    type Output = TableEvent<T>;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        Ok(if self.menu.is_open() {
            self.handle_menu_key(key)
        } else {
            self.handle_table_key(key)
        })
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<EventResult<Self::Output>> {
        let at = Position::new(mouse.column, mouse.row);
        Ok(match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(at),
            MouseEventKind::ScrollDown if !self.menu.is_open() && self.hits.body.contains(at) => {
                self.select_next();
                EventResult::Consumed
            }
            MouseEventKind::ScrollUp if !self.menu.is_open() && self.hits.body.contains(at) => {
                self.select_previous();
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [table_area, pager_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()));
        if let Some(title) = &self.title {
            block = block.title(title.as_str()).title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            );
        }
        let inner = block.inner(table_area);

        let open_row = self.menu.anchor().map(|anchor| anchor.row_index);
        let rows: Vec<_> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| row::body_row(row, &self.columns, open_row == Some(i), theme))
            .collect();

        let widths: Vec<Constraint> = self
            .columns
            .iter()
            .map(Column::constraint)
            .chain([Constraint::Length(ACTION_WIDTH)])
            .collect();

        let table = Table::new(rows, widths)
            .header(row::header_row(&self.columns, theme))
            .block(block)
            .row_highlight_style(
                Style::default()
                    .bg(theme.selection_bg())
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, table_area, &mut self.state);

        let body = Rect {
            y: inner.y.saturating_add(1),
            height: inner.height.saturating_sub(1),
            ..inner
        };
        let offset = self.state.offset();
        let visible = usize::from(body.height).min(self.rows.len().saturating_sub(offset));
        let cell_x = inner.right().saturating_sub(ACTION_WIDTH);
        self.hits.body = body;
        self.hits.offset = offset;
        self.hits.action_cells = (0..visible)
            .filter_map(|i| {
                let y = body.y.saturating_add(u16::try_from(i).ok()?);
                Some((offset + i, Rect::new(cell_x, y, ACTION_WIDTH, 1)))
            })
            .collect();

        self.hits.pager = self
            .pager
            .render(frame, pager_area, &self.pagination, theme);

        self.render_menu(frame, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::{Value, json};

    const WIDTH: u16 = 70;
    const HEIGHT: u16 = 14;

    fn columns() -> Vec<Column<Value>> {
        vec![
            Column::new("name", "Name"),
            Column::new("email", "Email"),
            Column::new("role", "Role").render(|row: &Value| {
                row["role"].as_str().unwrap_or("-").to_uppercase()
            }),
        ]
    }

    fn users() -> Vec<Value> {
        vec![
            json!({ "_id": "u1", "name": "Alice", "email": "alice@example.com", "role": "admin" }),
            json!({ "_id": "u2", "name": "Bob", "email": "bob@example.com", "role": "user" }),
            json!({ "_id": "u3", "name": "Cleo", "email": "cleo@example.com" }),
        ]
    }

    fn table() -> DataTable<Value> {
        let mut table = DataTable::new(columns(), Arc::new(KeyResolver::default()))
            .with_title(" Users ")
            .on_page_change()
            .on_page_size_change();
        table.set_rows(users());
        table.set_pagination(Pagination::new(1, DEFAULT_PAGE_SIZE, 12));
        table
    }

    fn draw(table: &mut DataTable<Value>) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        terminal
            .draw(|frame| table.render(frame, frame.area(), &Theme::default()))
            .unwrap();
        terminal
    }

    fn line(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..WIDTH).map(|x| buffer[(x, y)].symbol()).collect()
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        (0..HEIGHT)
            .map(|y| line(terminal, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(rect: Rect) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rect.x + rect.width / 2,
            row: rect.y,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_renders_header_rows_then_pager() {
        let mut table = table();
        let terminal = draw(&mut table);

        assert!(line(&terminal, 1).contains("NAME"));
        assert!(line(&terminal, 1).contains("EMAIL"));
        assert!(line(&terminal, 2).contains("Alice"));
        assert!(line(&terminal, 3).contains("Bob"));
        assert!(line(&terminal, 4).contains("Cleo"));
        assert!(line(&terminal, HEIGHT - 1).contains("Page 1 of 3"));
    }

    #[test]
    fn test_raw_field_and_render_fn_cells() {
        let mut table = table();
        let terminal = draw(&mut table);

        assert!(line(&terminal, 2).contains("alice@example.com"));
        assert!(line(&terminal, 2).contains("ADMIN"));
        assert!(line(&terminal, 4).contains('-'));
    }

    #[test]
    fn test_action_glyph_drawn_in_action_cell() {
        let mut table = table();
        let terminal = draw(&mut table);

        for index in 0..3 {
            let cell = table.action_cell(index).unwrap();
            let buffer = terminal.backend().buffer();
            assert_eq!(buffer[(cell.x + 1, cell.y)].symbol(), ACTION_GLYPH);
        }
        assert_eq!(table.action_cell(3), None);
    }

    #[test]
    fn test_empty_rows_renders_header_only() {
        let mut table = table();
        table.set_rows(Vec::new());
        table.set_pagination(Pagination::default());
        let terminal = draw(&mut table);

        assert!(line(&terminal, 1).contains("NAME"));
        assert!(!screen(&terminal).contains(ACTION_GLYPH));
        assert!(line(&terminal, HEIGHT - 1).contains("Page 1 of 0"));
        assert_eq!(table.cursor(), None);
    }

    #[test]
    fn test_view_only_menu_has_single_entry() {
        let mut table = DataTable::new(columns(), Arc::new(KeyResolver::default())).on_view();
        table.set_rows(users());
        draw(&mut table);

        let result = table.handle_key(key(KeyCode::Char('m'))).unwrap();
        assert_eq!(result, EventResult::Consumed);
        assert_eq!(table.menu().selected_row(), Some(&users()[0]));

        let terminal = draw(&mut table);
        assert_eq!(table.menu_entries().len(), 1);
        assert_eq!(table.menu_entries()[0].0, RowAction::View);
        assert!(screen(&terminal).contains("View"));
        assert!(!screen(&terminal).contains("Delete"));

        let result = table.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(result, EventResult::Event(TableEvent::View(users()[0].clone())));
        assert!(!table.menu().is_open());
    }

    #[test]
    fn test_menu_entry_click_chooses_and_closes() {
        let mut table = table().on_view().on_edit().on_delete();
        draw(&mut table);

        let cell = table.action_cell(1).unwrap();
        table.handle_mouse(click(cell)).unwrap();
        draw(&mut table);

        let (action, rect) = table.menu_entries()[2];
        assert_eq!(action, RowAction::Delete);

        let result = table.handle_mouse(click(rect)).unwrap();
        assert_eq!(result, EventResult::Event(TableEvent::Delete(users()[1].clone())));
        assert_eq!(table.menu(), &MenuState::Closed);
    }

    #[test]
    fn test_opening_row_b_moves_selection_from_a() {
        let mut table = table().on_view().on_edit();
        draw(&mut table);

        let a = table.action_cell(0).unwrap();
        let b = table.action_cell(2).unwrap();

        table.handle_mouse(click(a)).unwrap();
        assert_eq!(table.menu().selected_row(), Some(&users()[0]));
        draw(&mut table);

        let result = table.handle_mouse(click(b)).unwrap();
        assert_eq!(result, EventResult::Consumed);
        assert_eq!(table.menu().selected_row(), Some(&users()[2]));
        assert_eq!(table.menu().anchor().map(|anchor| anchor.row_index), Some(2));
        assert_eq!(table.cursor(), Some(2));
    }

    #[test]
    fn test_menu_never_covers_action_cells() {
        let mut table = table().on_view().on_edit().on_delete();
        draw(&mut table);

        table.handle_mouse(click(table.action_cell(0).unwrap())).unwrap();
        draw(&mut table);

        let cells: Vec<_> = (0..3).filter_map(|i| table.action_cell(i)).collect();
        for (_, entry) in table.menu_entries() {
            assert!(cells.iter().all(|cell| !cell.intersects(*entry)));
        }

        // Row 2's trigger sits right next to the open popup.
        let result = table.handle_mouse(click(cells[2])).unwrap();
        assert_eq!(result, EventResult::Consumed);
        assert_eq!(table.menu().selected_row(), Some(&users()[2]));
    }

    #[test]
    fn test_click_on_menu_border_keeps_menu_open() {
        let mut table = table().on_view().on_edit();
        draw(&mut table);

        table.handle_mouse(click(table.action_cell(0).unwrap())).unwrap();
        draw(&mut table);

        let first = table.menu_entries()[0].1;
        let border = Rect::new(first.x.saturating_sub(1), first.y, 1, 1);
        let result = table.handle_mouse(click(border)).unwrap();
        assert_eq!(result, EventResult::Consumed);
        assert_eq!(table.menu().selected_row(), Some(&users()[0]));
    }

    #[test]
    fn test_outside_click_and_escape_dismiss() {
        let mut table = table().on_view();
        draw(&mut table);

        table.handle_mouse(click(table.action_cell(0).unwrap())).unwrap();
        assert!(table.menu().is_open());
        let result = table.handle_mouse(click(Rect::new(2, 0, 1, 1))).unwrap();
        assert_eq!(result, EventResult::Consumed);
        assert!(!table.menu().is_open());

        table.handle_key(key(KeyCode::Char('m'))).unwrap();
        assert!(table.menu().is_open());
        table.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(!table.menu().is_open());
    }

    #[test]
    fn test_no_actions_never_opens_menu() {
        let mut table = table();
        draw(&mut table);

        assert_eq!(
            table.handle_key(key(KeyCode::Enter)).unwrap(),
            EventResult::Ignored
        );
        table.handle_mouse(click(table.action_cell(0).unwrap())).unwrap();
        assert!(!table.menu().is_open());
    }

    #[test]
    fn test_set_rows_closes_menu() {
        let mut table = table().on_view();
        draw(&mut table);
        table.handle_key(key(KeyCode::Char('m'))).unwrap();
        assert!(table.menu().is_open());

        table.set_rows(users()[..1].to_vec());
        assert!(!table.menu().is_open());
        assert_eq!(table.cursor(), Some(0));
    }

    #[test]
    fn test_next_page_emits_once() {
        let mut table = table();
        draw(&mut table);

        assert_eq!(
            table.handle_key(key(KeyCode::Char(']'))).unwrap(),
            EventResult::Event(TableEvent::PageChange(2))
        );
        assert_eq!(
            table.handle_mouse(click(table.pager_layout().next)).unwrap(),
            EventResult::Event(TableEvent::PageChange(2))
        );

        table.set_pagination(Pagination::new(3, DEFAULT_PAGE_SIZE, 12));
        assert_eq!(
            table.handle_key(key(KeyCode::Char(']'))).unwrap(),
            EventResult::Consumed
        );
        assert_eq!(
            table.handle_key(key(KeyCode::Char('['))).unwrap(),
            EventResult::Event(TableEvent::PageChange(2))
        );
    }

    #[test]
    fn test_zero_results_controls_never_emit() {
        let mut table = table();
        table.set_pagination(Pagination::new(1, DEFAULT_PAGE_SIZE, 0));
        draw(&mut table);

        for code in [KeyCode::Char(']'), KeyCode::Char('[')] {
            assert_eq!(table.handle_key(key(code)).unwrap(), EventResult::Consumed);
        }
        assert_eq!(
            table.handle_mouse(click(table.pager_layout().prev)).unwrap(),
            EventResult::Consumed
        );
    }

    #[test]
    fn test_page_size_events() {
        let mut table = table();
        draw(&mut table);

        assert_eq!(
            table.handle_key(key(KeyCode::Char('+'))).unwrap(),
            EventResult::Event(TableEvent::PageSizeChange(pagination::page_size(10)))
        );
        assert_eq!(
            table.handle_mouse(click(table.pager_layout().size)).unwrap(),
            EventResult::Event(TableEvent::PageSizeChange(pagination::page_size(10)))
        );
        assert_eq!(
            table.handle_key(key(KeyCode::Char('-'))).unwrap(),
            EventResult::Consumed
        );
    }

    #[test]
    fn test_controls_without_listeners_stay_silent() {
        let mut table = DataTable::new(columns(), Arc::new(KeyResolver::default()));
        table.set_rows(users());
        table.set_pagination(Pagination::new(1, DEFAULT_PAGE_SIZE, 12));
        let terminal = draw(&mut table);

        assert!(line(&terminal, HEIGHT - 1).contains("Page 1 of 3"));
        assert_eq!(
            table.handle_key(key(KeyCode::Char(']'))).unwrap(),
            EventResult::Consumed
        );
        assert_eq!(
            table.handle_key(key(KeyCode::Char('+'))).unwrap(),
            EventResult::Consumed
        );
    }

    #[test]
    fn test_cursor_navigation_and_row_click() {
        let mut table = table();
        draw(&mut table);

        assert_eq!(table.cursor(), Some(0));
        table.handle_key(key(KeyCode::Char('j'))).unwrap();
        table.handle_key(key(KeyCode::Char('j'))).unwrap();
        table.handle_key(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(table.cursor(), Some(2));
        table.handle_key(key(KeyCode::Char('g'))).unwrap();
        assert_eq!(table.cursor(), Some(0));

        let row_b = table.action_cell(1).unwrap();
        table
            .handle_mouse(click(Rect::new(3, row_b.y, 1, 1)))
            .unwrap();
        assert_eq!(table.cursor(), Some(1));
        assert!(!table.menu().is_open());
    }
}
