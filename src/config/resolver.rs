use crate::config::actions::{DialogAction, GlobalAction, NavAction, TableAction};
use crate::config::key::KeyBinding;
use crate::config::keybindings::KeybindingsConfig;
use crossterm::event::KeyEvent;
use std::sync::Arc;

pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(KeybindingsConfig::default()))
    }
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    fn global(&self, action: GlobalAction) -> &KeyBinding {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => &kb.quit,
            GlobalAction::Help => &kb.help,
            GlobalAction::Back => &kb.back,
            GlobalAction::NextScreen => &kb.next_screen,
            GlobalAction::PrevScreen => &kb.prev_screen,
            GlobalAction::Reload => &kb.reload,
        }
    }

    fn nav(&self, action: NavAction) -> &KeyBinding {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => &kb.up,
            NavAction::Down => &kb.down,
            NavAction::Home => &kb.home,
            NavAction::End => &kb.end,
            NavAction::Select => &kb.select,
        }
    }

    fn table(&self, action: TableAction) -> &KeyBinding {
        let kb = &self.keybindings.table;
        match action {
            TableAction::OpenMenu => &kb.open_menu,
            TableAction::CloseMenu => &kb.close_menu,
            TableAction::PrevPage => &kb.prev_page,
            TableAction::NextPage => &kb.next_page,
            TableAction::GrowPageSize => &kb.grow_page_size,
            TableAction::ShrinkPageSize => &kb.shrink_page_size,
        }
    }

    fn dialog(&self, action: DialogAction) -> &KeyBinding {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Confirm => &kb.confirm,
            DialogAction::Cancel => &kb.cancel,
            DialogAction::Dismiss => &kb.dismiss,
        }
    }

    // Global actions
    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        self.global(action).matches(event)
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        self.global(action).display()
    }

    // Navigation actions
    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        self.nav(action).matches(event)
    }

    pub fn display_nav(&self, action: NavAction) -> String {
        self.nav(action).display()
    }

    // Table actions
    pub fn matches_table(&self, event: &KeyEvent, action: TableAction) -> bool {
        self.table(action).matches(event)
    }

    pub fn display_table(&self, action: TableAction) -> String {
        self.table(action).display()
    }

    // Dialog actions
    pub fn matches_dialog(&self, event: &KeyEvent, action: DialogAction) -> bool {
        self.dialog(action).matches(event)
    }

    pub fn display_dialog(&self, action: DialogAction) -> String {
        self.dialog(action).display()
    }
}
