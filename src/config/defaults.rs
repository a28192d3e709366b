use crate::config::key::{Key, KeyBinding};
use crate::config::keybindings::{
    DialogKeybindings, GlobalKeybindings, NavigationKeybindings, TableKeybindings,
};
use crossterm::event::KeyCode;

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::new(KeyCode::Char('q')).into(),
            help: Key::new(KeyCode::Char('?')).into(),
            back: Key::new(KeyCode::Esc).into(),
            next_screen: Key::new(KeyCode::Tab).into(),
            prev_screen: Key::new(KeyCode::BackTab).into(),
            reload: Key::new(KeyCode::Char('r')).into(),
        }
    }
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('k')),
                Key::new(KeyCode::Up),
            ]),
            down: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('j')),
                Key::new(KeyCode::Down),
            ]),
            home: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('g')),
                Key::new(KeyCode::Home),
            ]),
            end: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('G')),
                Key::new(KeyCode::End),
            ]),
            select: Key::new(KeyCode::Enter).into(),
        }
    }
}

impl Default for TableKeybindings {
    fn default() -> Self {
        Self {
            open_menu: KeyBinding::multiple(vec![
                Key::new(KeyCode::Enter),
                Key::new(KeyCode::Char('m')),
            ]),
            close_menu: KeyBinding::multiple(vec![
                Key::new(KeyCode::Esc),
                Key::new(KeyCode::Char('m')),
            ]),
            prev_page: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('[')),
                Key::new(KeyCode::Left),
            ]),
            next_page: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char(']')),
                Key::new(KeyCode::Right),
            ]),
            grow_page_size: Key::new(KeyCode::Char('+')).into(),
            shrink_page_size: Key::new(KeyCode::Char('-')).into(),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            confirm: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('y')),
                Key::new(KeyCode::Char('Y')),
                Key::new(KeyCode::Enter),
            ]),
            cancel: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('n')),
                Key::new(KeyCode::Char('N')),
                Key::new(KeyCode::Esc),
            ]),
            dismiss: KeyBinding::multiple(vec![
                Key::new(KeyCode::Enter),
                Key::new(KeyCode::Esc),
                Key::new(KeyCode::Char('q')),
            ]),
        }
    }
}
