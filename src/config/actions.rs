#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    Help,
    Back,
    NextScreen,
    PrevScreen,
    Reload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Up,
    Down,
    Home,
    End,
    Select,
}

/// Actions owned by the data table: the row menu and the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    OpenMenu,
    CloseMenu,
    PrevPage,
    NextPage,
    GrowPageSize,
    ShrinkPageSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Confirm,
    Cancel,
    Dismiss,
}
