use serde::{Deserialize, Serialize};

use crate::config::key::KeyBinding;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub help: KeyBinding,
    pub back: KeyBinding,
    pub next_screen: KeyBinding,
    pub prev_screen: KeyBinding,
    pub reload: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationKeybindings {
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub home: KeyBinding,
    pub end: KeyBinding,
    pub select: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableKeybindings {
    pub open_menu: KeyBinding,
    pub close_menu: KeyBinding,
    pub prev_page: KeyBinding,
    pub next_page: KeyBinding,
    pub grow_page_size: KeyBinding,
    pub shrink_page_size: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogKeybindings {
    pub confirm: KeyBinding,
    pub cancel: KeyBinding,
    pub dismiss: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub navigation: NavigationKeybindings,
    pub table: TableKeybindings,
    pub dialog: DialogKeybindings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::key::Key;
    use crossterm::event::KeyCode;

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: KeybindingsConfig = toml::from_str(
            r#"
            [table]
            next_page = ["n", "Right"]
            "#,
        )
        .unwrap();

        assert_eq!(
            config.table.next_page,
            KeyBinding::multiple(vec![Key::new(KeyCode::Char('n')), Key::new(KeyCode::Right)])
        );
        assert_eq!(
            config.table.prev_page,
            TableKeybindings::default().prev_page
        );
        assert_eq!(config.global.quit, GlobalKeybindings::default().quit);
    }
}
