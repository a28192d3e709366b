//! Generic list screen: one paginated table of a [`Resource`].
//!
//! The screen owns the [`Pagination`] and hands a copy to the table on every
//! load. Table events come back as [`ListMsg`]s on the screen's own channel
//! and are processed in `update()`.

use std::num::NonZeroU32;
use std::sync::Arc;

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use super::ListOptions;
use super::command::{DeleteCmd, FetchPageCmd};
use super::resource::Resource;
use crate::Theme;
use crate::api::{HotelApi, Page, PageRequest};
use crate::config::{DialogAction, GlobalAction, KeyResolver, NavAction, TableAction};
use crate::core::{AppMessage, Command, Event, Screen, UpdateResult};
use crate::ui::components::table::{DataTable, Pagination, TableEvent};
use crate::ui::components::{
    ConfirmDialog, ConfirmEvent, DetailsDialog, DetailsEvent, Keybinding, Spinner, Toast,
};
use crate::ui::{Component, EventResult};

/// Messages processed by a [`ListScreen`].
pub enum ListMsg<R> {
    /// Fetch the current page.
    Load,
    Reload,
    PageChanged(u32),
    PageSizeChanged(NonZeroU32),
    View(R),
    Edit(R),
    RequestDelete(R),
    ConfirmDelete,
    CloseDialog,

    // Command results
    Loaded { seq: u64, page: Page<R> },
    LoadFailed { seq: u64, error: String },
    Deleted { row: R, message: String },
    DeleteFailed { row: R, error: String },
}

impl<R> From<TableEvent<R>> for ListMsg<R> {
    fn from(event: TableEvent<R>) -> Self {
        match event {
            TableEvent::PageChange(page) => Self::PageChanged(page),
            TableEvent::PageSizeChange(size) => Self::PageSizeChanged(size),
            TableEvent::View(row) => Self::View(row),
            TableEvent::Edit(row) => Self::Edit(row),
            TableEvent::Delete(row) => Self::RequestDelete(row),
        }
    }
}

enum Dialog<R> {
    Details(DetailsDialog),
    ConfirmDelete { dialog: ConfirmDialog, row: R },
}

pub struct ListScreen<R: Resource> {
    table: DataTable<R>,
    pagination: Pagination,
    /// Pagination of the rows currently on display. Restored when a load fails.
    shown: Pagination,
    reset_on_size_change: bool,
    api: Arc<dyn HotelApi>,
    resolver: Arc<KeyResolver>,
    app_tx: UnboundedSender<AppMessage>,
    msg_tx: UnboundedSender<ListMsg<R>>,
    msg_rx: UnboundedReceiver<ListMsg<R>>,
    /// Id of the latest fetch. Responses carrying any other id are stale.
    seq: u64,
    loading: bool,
    loaded_once: bool,
    spinner: Spinner,
    dialog: Option<Dialog<R>>,
    title: String,
}

impl<R: Resource> ListScreen<R> {
    pub fn new(
        api: Arc<dyn HotelApi>,
        app_tx: UnboundedSender<AppMessage>,
        resolver: Arc<KeyResolver>,
        options: &ListOptions,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let pagination = Pagination::new(1, options.default_page_size, 0);
        let mut table = DataTable::new(R::columns(), resolver.clone())
            .with_title(R::NAME)
            .with_page_sizes(options.page_sizes.clone())
            .with_actions(R::actions())
            .on_page_change()
            .on_page_size_change();
        table.set_pagination(pagination);

        Self {
            table,
            pagination,
            shown: pagination,
            reset_on_size_change: options
                .reset_page_on_size_change
                .unwrap_or_else(R::reset_page_on_size_change),
            api,
            resolver,
            app_tx,
            msg_tx,
            msg_rx,
            seq: 0,
            loading: false,
            loaded_once: false,
            spinner: Spinner::default().with_label(format!("Loading {}...", R::NAME.to_lowercase())),
            dialog: None,
            title: R::NAME.to_string(),
        }
    }

    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub const fn table(&self) -> &DataTable<R> {
        &self.table
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    fn queue(&self, msg: ListMsg<R>) {
        let _ = self.msg_tx.send(msg);
    }

    fn toast(&self, toast: Toast) {
        let _ = self.app_tx.send(AppMessage::ShowToast(toast));
    }

    fn fetch(&mut self) -> UpdateResult {
        self.seq += 1;
        self.loading = true;
        let request = PageRequest::new(
            self.pagination.current_page,
            self.pagination.items_per_page,
        );
        debug!(
            resource = R::NAME,
            seq = self.seq,
            page = request.page,
            size = request.size.get(),
            "Fetching page"
        );
        FetchPageCmd::<R>::new(self.api.clone(), self.seq, request, self.msg_tx.clone()).into()
    }

    fn is_stale(&self, seq: u64) -> bool {
        if seq == self.seq {
            return false;
        }
        debug!(resource = R::NAME, seq, latest = self.seq, "Dropping stale response");
        true
    }

    fn process_message(&mut self, msg: ListMsg<R>) -> UpdateResult {
        match msg {
            ListMsg::Load | ListMsg::Reload => self.fetch(),

            ListMsg::PageChanged(page) => {
                self.pagination.current_page = page;
                self.table.set_pagination(self.pagination);
                self.fetch()
            }

            ListMsg::PageSizeChanged(size) => {
                self.pagination.items_per_page = size;
                self.pagination = if self.reset_on_size_change {
                    Pagination {
                        current_page: 1,
                        ..self.pagination
                    }
                } else {
                    self.pagination.clamped()
                };
                self.table.set_pagination(self.pagination);
                self.fetch()
            }

            ListMsg::View(row) => {
                self.dialog = Some(Dialog::Details(DetailsDialog::new(
                    format!("{} details", R::SINGULAR),
                    row.details(),
                    self.resolver.clone(),
                )));
                UpdateResult::Idle
            }

            ListMsg::Edit(row) => {
                self.toast(Toast::info(format!("Editing {row} is not supported yet")));
                UpdateResult::Idle
            }

            ListMsg::RequestDelete(row) => {
                let dialog = ConfirmDialog::new(format!("Delete {row}?"), self.resolver.clone())
                    .with_title(format!("Delete {}", R::SINGULAR))
                    .with_detail("This cannot be undone.")
                    .with_confirm_text("Delete")
                    .danger();
                self.dialog = Some(Dialog::ConfirmDelete { dialog, row });
                UpdateResult::Idle
            }

            ListMsg::ConfirmDelete => match self.dialog.take() {
                Some(Dialog::ConfirmDelete { row, .. }) => {
                    debug!(resource = R::NAME, id = row.id(), "Deleting record");
                    DeleteCmd::new(self.api.clone(), row, self.msg_tx.clone()).into()
                }
                other => {
                    self.dialog = other;
                    UpdateResult::Idle
                }
            },

            ListMsg::CloseDialog => {
                self.dialog = None;
                UpdateResult::Idle
            }

            ListMsg::Loaded { seq, page } => {
                if self.is_stale(seq) {
                    return UpdateResult::Idle;
                }
                self.pagination.total_results = page.total_count;
                if !self.pagination.is_in_range() {
                    let requested = self.pagination.current_page;
                    self.pagination = self.pagination.clamped();
                    debug!(
                        resource = R::NAME,
                        requested,
                        clamped = self.pagination.current_page,
                        "Page out of range, refetching"
                    );
                    self.table.set_pagination(self.pagination);
                    return self.fetch();
                }
                self.loading = false;
                self.loaded_once = true;
                self.shown = self.pagination;
                self.table.set_rows(page.items);
                self.table.set_pagination(self.pagination);
                UpdateResult::Idle
            }

            ListMsg::LoadFailed { seq, error } => {
                if self.is_stale(seq) {
                    return UpdateResult::Idle;
                }
                warn!(
                    resource = R::NAME,
                    %error,
                    requested = self.pagination.current_page,
                    "Failed to load page"
                );
                self.loading = false;
                self.loaded_once = true;
                self.pagination = self.shown;
                self.table.set_pagination(self.pagination);
                self.toast(Toast::error(format!(
                    "Failed to load {}: {error}",
                    R::NAME.to_lowercase()
                )));
                UpdateResult::Idle
            }

            ListMsg::Deleted { row, message } => {
                info!(resource = R::NAME, id = row.id(), "Record deleted");
                self.toast(Toast::success(message));
                self.fetch()
            }

            ListMsg::DeleteFailed { row, error } => {
                warn!(resource = R::NAME, id = row.id(), %error, "Delete failed");
                self.toast(Toast::error(format!("Failed to delete {row}: {error}")));
                UpdateResult::Idle
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(dialog) = &mut self.dialog {
            let msg = match dialog {
                Dialog::Details(details) => match details.handle_key(key) {
                    Ok(EventResult::Event(DetailsEvent::Closed)) => Some(ListMsg::CloseDialog),
                    _ => None,
                },
                Dialog::ConfirmDelete { dialog, .. } => match dialog.handle_key(key) {
                    Ok(EventResult::Event(ConfirmEvent::Confirmed)) => {
                        Some(ListMsg::ConfirmDelete)
                    }
                    Ok(EventResult::Event(ConfirmEvent::Cancelled)) => Some(ListMsg::CloseDialog),
                    _ => None,
                },
            };
            if let Some(msg) = msg {
                self.queue(msg);
            }
            // Dialogs are modal
            return true;
        }

        match self.table.handle_key(key) {
            Ok(EventResult::Event(event)) => {
                self.queue(event.into());
                true
            }
            Ok(EventResult::Consumed) => true,
            Ok(EventResult::Ignored) => {
                if self.resolver.matches_global(&key, GlobalAction::Reload) {
                    self.queue(ListMsg::Reload);
                    return true;
                }
                false
            }
            Err(e) => {
                warn!(error = %e, "Table failed to handle key");
                false
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if self.dialog.is_some() {
            return true;
        }
        match self.table.handle_mouse(mouse) {
            Ok(EventResult::Event(event)) => {
                self.queue(event.into());
                true
            }
            Ok(EventResult::Consumed) => true,
            Ok(EventResult::Ignored) => false,
            Err(e) => {
                warn!(error = %e, "Table failed to handle mouse event");
                false
            }
        }
    }
}

impl<R: Resource> Screen for ListScreen<R> {
    fn title(&self) -> &str {
        &self.title
    }

    fn init(&mut self) {
        self.queue(ListMsg::Load);
    }

    fn handle_tick(&mut self) {
        if self.loading {
            self.spinner.handle_tick();
        }
    }

    fn handle_input(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => false,
        }
    }

    fn update(&mut self) -> UpdateResult {
        let mut commands: Vec<Box<dyn Command>> = Vec::new();

        while let Ok(msg) = self.msg_rx.try_recv() {
            match self.process_message(msg) {
                UpdateResult::Idle => {}
                UpdateResult::Commands(cmds) => commands.extend(cmds),
                UpdateResult::Error(e) => return UpdateResult::Error(e),
            }
        }

        if commands.is_empty() {
            UpdateResult::Idle
        } else {
            UpdateResult::Commands(commands)
        }
    }

    fn view(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.loaded_once {
            self.spinner.render(frame, area, theme);
            return;
        }

        if self.loading {
            self.table.set_title(format!("{} (loading...)", R::NAME));
        } else {
            self.table.set_title(R::NAME);
        }
        self.table.render(frame, area, theme);

        match &mut self.dialog {
            Some(Dialog::Details(dialog)) => dialog.render(frame, area, theme),
            Some(Dialog::ConfirmDelete { dialog, .. }) => dialog.render(frame, area, theme),
            None => {}
        }
    }

    fn status(&self) -> Vec<(&'static str, String)> {
        let p = &self.pagination;
        vec![
            ("page", format!("{} of {}", p.current_page, p.total_pages())),
            ("size", p.items_per_page.to_string()),
            ("total", p.total_results.to_string()),
        ]
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let r = &self.resolver;
        match &self.dialog {
            Some(Dialog::Details(_)) => vec![
                Keybinding::hint(
                    format!("{}/{}", r.display_nav(NavAction::Up), r.display_nav(NavAction::Down)),
                    "Scroll",
                ),
                Keybinding::hint(r.display_dialog(DialogAction::Dismiss), "Close"),
            ],
            Some(Dialog::ConfirmDelete { .. }) => vec![
                Keybinding::hint(r.display_dialog(DialogAction::Confirm), "Delete"),
                Keybinding::hint(r.display_dialog(DialogAction::Cancel), "Cancel"),
            ],
            None if self.table.menu().is_open() => vec![
                Keybinding::hint(
                    format!("{}/{}", r.display_nav(NavAction::Up), r.display_nav(NavAction::Down)),
                    "Highlight",
                ),
                Keybinding::hint(r.display_nav(NavAction::Select), "Choose"),
                Keybinding::hint(r.display_table(TableAction::CloseMenu), "Close menu"),
            ],
            None => vec![
                Keybinding::hint(
                    format!("{}/{}", r.display_nav(NavAction::Up), r.display_nav(NavAction::Down)),
                    "Move",
                ),
                Keybinding::hint(r.display_table(TableAction::OpenMenu), "Actions"),
                Keybinding::hint(
                    format!(
                        "{}/{}",
                        r.display_table(TableAction::PrevPage),
                        r.display_table(TableAction::NextPage)
                    ),
                    "Page",
                ),
                Keybinding::hint(
                    format!(
                        "{}/{}",
                        r.display_table(TableAction::ShrinkPageSize),
                        r.display_table(TableAction::GrowPageSize)
                    ),
                    "Page size",
                ),
                Keybinding::new(r.display_global(GlobalAction::Reload), "Reload"),
                Keybinding::new(
                    format!("{}/{}", r.display_nav(NavAction::Home), r.display_nav(NavAction::End)),
                    "First/last row",
                ),
            ],
        }
    }
}
