//! Per-row contextual menu.
//!
//! The menu is a small state machine: `Closed` or `Open` on exactly one row.
//! Every transition goes through [`reduce`], so the table never pokes at the
//! state directly.

use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

impl RowAction {
    /// Display order of the menu entries.
    pub const ALL: [Self; 3] = [Self::View, Self::Edit, Self::Delete];

    pub const fn label(self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::View => "◉",
            Self::Edit => "✎",
            Self::Delete => "✖",
        }
    }
}

/// Menu entries the consumer asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet {
    view: bool,
    edit: bool,
    delete: bool,
}

impl ActionSet {
    pub const fn empty() -> Self {
        Self {
            view: false,
            edit: false,
            delete: false,
        }
    }

    #[must_use]
    pub const fn with(mut self, action: RowAction) -> Self {
        match action {
            RowAction::View => self.view = true,
            RowAction::Edit => self.edit = true,
            RowAction::Delete => self.delete = true,
        }
        self
    }

    pub const fn contains(self, action: RowAction) -> bool {
        match action {
            RowAction::View => self.view,
            RowAction::Edit => self.edit,
            RowAction::Delete => self.delete,
        }
    }

    pub const fn is_empty(self) -> bool {
        !(self.view || self.edit || self.delete)
    }

    /// Entries in display order.
    pub fn entries(self) -> Vec<RowAction> {
        RowAction::ALL
            .into_iter()
            .filter(|action| self.contains(*action))
            .collect()
    }
}

impl FromIterator<RowAction> for ActionSet {
    fn from_iter<I: IntoIterator<Item = RowAction>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// The trigger an open menu hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// Index of the row in the rows the table was given.
    pub row_index: usize,
    /// Screen area of the row's action cell, if it has been drawn.
    pub area: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState<T> {
    Closed,
    Open {
        anchor: Anchor,
        row: T,
        highlighted: usize,
    },
}

impl<T> Default for MenuState<T> {
    fn default() -> Self {
        Self::Closed
    }
}

impl<T> MenuState<T> {
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// The row the open menu belongs to.
    pub const fn selected_row(&self) -> Option<&T> {
        match self {
            Self::Open { row, .. } => Some(row),
            Self::Closed => None,
        }
    }

    pub const fn anchor(&self) -> Option<Anchor> {
        match self {
            Self::Open { anchor, .. } => Some(*anchor),
            Self::Closed => None,
        }
    }

    pub const fn highlighted(&self) -> Option<usize> {
        match self {
            Self::Open { highlighted, .. } => Some(*highlighted),
            Self::Closed => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum MenuMsg<T> {
    /// A row's trigger was activated. Re-targets an already open menu.
    Open { anchor: Anchor, row: T },
    Next,
    Previous,
    ChooseHighlighted,
    Choose(RowAction),
    /// Outside click or escape.
    Dismiss,
}

/// An entry was picked; the consumer handles it with the row it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chosen<T> {
    pub action: RowAction,
    pub row: T,
}

/// Apply one message to the menu.
///
/// Choosing an entry always closes the menu. Entries missing from `actions`
/// can never be chosen, and a table with no actions never opens a menu.
pub fn reduce<T>(
    state: MenuState<T>,
    msg: MenuMsg<T>,
    actions: ActionSet,
) -> (MenuState<T>, Option<Chosen<T>>) {
    let count = actions.entries().len();

    match (state, msg) {
        (_, MenuMsg::Open { .. }) if actions.is_empty() => (MenuState::Closed, None),
        (_, MenuMsg::Open { anchor, row }) => (
            MenuState::Open {
                anchor,
                row,
                highlighted: 0,
            },
            None,
        ),
        (_, MenuMsg::Dismiss) | (MenuState::Closed, _) => (MenuState::Closed, None),
        (
            MenuState::Open {
                anchor,
                row,
                highlighted,
            },
            MenuMsg::Next,
        ) => (
            MenuState::Open {
                anchor,
                row,
                highlighted: (highlighted + 1).min(count.saturating_sub(1)),
            },
            None,
        ),
        (
            MenuState::Open {
                anchor,
                row,
                highlighted,
            },
            MenuMsg::Previous,
        ) => (
            MenuState::Open {
                anchor,
                row,
                highlighted: highlighted.saturating_sub(1),
            },
            None,
        ),
        (MenuState::Open { row, highlighted, .. }, MenuMsg::ChooseHighlighted) => {
            let chosen = actions
                .entries()
                .get(highlighted)
                .map(|&action| Chosen { action, row });
            (MenuState::Closed, chosen)
        }
        (MenuState::Open { row, .. }, MenuMsg::Choose(action)) if actions.contains(action) => {
            (MenuState::Closed, Some(Chosen { action, row }))
        }
        (state @ MenuState::Open { .. }, MenuMsg::Choose(_)) => (state, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(row_index: usize) -> Anchor {
        Anchor {
            row_index,
            area: None,
        }
    }

    fn open(row: &'static str, index: usize, actions: ActionSet) -> MenuState<&'static str> {
        reduce(
            MenuState::Closed,
            MenuMsg::Open {
                anchor: anchor(index),
                row,
            },
            actions,
        )
        .0
    }

    #[test]
    fn test_entries_follow_supplied_handlers() {
        let only_view: ActionSet = [RowAction::View].into_iter().collect();
        assert_eq!(only_view.entries(), vec![RowAction::View]);

        let all: ActionSet = [RowAction::Delete, RowAction::View, RowAction::Edit]
            .into_iter()
            .collect();
        assert_eq!(all.entries(), RowAction::ALL.to_vec());
        assert!(ActionSet::empty().is_empty());
    }

    #[test]
    fn test_choosing_only_entry_emits_row_and_closes() {
        let actions = ActionSet::empty().with(RowAction::View);
        let state = open("alice", 0, actions);
        assert_eq!(state.selected_row(), Some(&"alice"));

        let (state, chosen) = reduce(state, MenuMsg::ChooseHighlighted, actions);
        assert_eq!(
            chosen,
            Some(Chosen {
                action: RowAction::View,
                row: "alice"
            })
        );
        assert_eq!(state, MenuState::Closed);
        assert_eq!(state.selected_row(), None);
    }

    #[test]
    fn test_opening_another_row_retargets() {
        let actions = ActionSet::empty().with(RowAction::View).with(RowAction::Delete);
        let state = open("a", 0, actions);

        let (state, chosen) = reduce(
            state,
            MenuMsg::Open {
                anchor: anchor(1),
                row: "b",
            },
            actions,
        );

        assert_eq!(chosen, None);
        assert_eq!(state.selected_row(), Some(&"b"));
        assert_eq!(state.anchor().map(|a| a.row_index), Some(1));
        assert_eq!(state.highlighted(), Some(0));
    }

    #[test]
    fn test_dismiss_closes_without_action() {
        let actions = ActionSet::empty().with(RowAction::Edit);
        let (state, chosen) = reduce(open("a", 0, actions), MenuMsg::Dismiss, actions);
        assert_eq!(state, MenuState::Closed);
        assert_eq!(chosen, None);
    }

    #[test]
    fn test_no_actions_never_opens() {
        assert_eq!(open("a", 0, ActionSet::empty()), MenuState::Closed);
    }

    #[test]
    fn test_unsupported_choice_is_ignored() {
        let actions = ActionSet::empty().with(RowAction::View);
        let state = open("a", 0, actions);

        let (state, chosen) = reduce(state, MenuMsg::Choose(RowAction::Delete), actions);
        assert!(state.is_open());
        assert_eq!(chosen, None);
    }

    #[test]
    fn test_highlight_stays_within_entries() {
        let actions = ActionSet::empty().with(RowAction::View).with(RowAction::Delete);
        let mut state = open("a", 0, actions);

        for _ in 0..5 {
            state = reduce(state, MenuMsg::Next, actions).0;
        }
        assert_eq!(state.highlighted(), Some(1));

        let (state, chosen) = reduce(state, MenuMsg::ChooseHighlighted, actions);
        assert_eq!(chosen.map(|c| c.action), Some(RowAction::Delete));
        assert!(!state.is_open());

        let state = reduce(open("a", 0, actions), MenuMsg::Previous, actions).0;
        assert_eq!(state.highlighted(), Some(0));
    }

    #[test]
    fn test_closed_menu_ignores_navigation() {
        let actions = ActionSet::empty().with(RowAction::View);
        let (state, chosen) = reduce(MenuState::<&str>::Closed, MenuMsg::ChooseHighlighted, actions);
        assert_eq!(state, MenuState::Closed);
        assert_eq!(chosen, None);
    }
}
