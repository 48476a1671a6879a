// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AppMode, TabKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Expanded,
    Collapsed,
}

impl SidebarState {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_tab: TabKind,
    pub sidebar: SidebarState,
    pub master_data_expanded: bool,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            active_tab: TabKind::Dashboard,
            sidebar: SidebarState::Expanded,
            master_data_expanded: false,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    GoTo(TabKind),
    ToggleSidebar,
    ToggleMasterData,
    EnterSearch,
    ExitSearch,
    OpenConfirm,
    CloseConfirm,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    TabChanged(TabKind),
    SidebarChanged(SidebarState),
    MasterDataToggled(bool),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::GoTo(tab) => self.go_to(tab),
            AppCommand::ToggleSidebar => {
                self.sidebar = self.sidebar.toggled();
                let label = match self.sidebar {
                    SidebarState::Expanded => "sidebar expanded",
                    SidebarState::Collapsed => "sidebar collapsed",
                };
                vec![
                    AppEvent::SidebarChanged(self.sidebar),
                    self.set_status(label),
                ]
            }
            AppCommand::ToggleMasterData => {
                self.master_data_expanded = !self.master_data_expanded;
                vec![AppEvent::MasterDataToggled(self.master_data_expanded)]
            }
            AppCommand::EnterSearch => self.set_mode(AppMode::Search),
            AppCommand::ExitSearch | AppCommand::CloseConfirm => self.set_mode(AppMode::Nav),
            AppCommand::OpenConfirm => self.set_mode(AppMode::Confirm),
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = TabKind::ALL;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.go_to(tabs[next])
    }

    fn go_to(&mut self, tab: TabKind) -> Vec<AppEvent> {
        if tab == self.active_tab {
            return Vec::new();
        }
        self.active_tab = tab;
        let mut events = vec![AppEvent::TabChanged(tab)];
        if tab.is_master_data() && !self.master_data_expanded {
            self.master_data_expanded = true;
            events.push(AppEvent::MasterDataToggled(true));
        }
        events
    }

    fn set_mode(&mut self, mode: AppMode) -> Vec<AppEvent> {
        if self.mode == mode {
            return Vec::new();
        }
        self.mode = mode;
        vec![AppEvent::ModeChanged(mode)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState, SidebarState};
    use crate::{AppMode, TabKind};

    #[test]
    fn tab_rotation_wraps() {
        let mut state = AppState {
            active_tab: TabKind::Dashboard,
            ..AppState::default()
        };

        let events = state.dispatch(AppCommand::PrevTab);
        assert_eq!(state.active_tab, TabKind::Departments);
        assert_eq!(
            events,
            vec![
                AppEvent::TabChanged(TabKind::Departments),
                AppEvent::MasterDataToggled(true),
            ]
        );

        state.dispatch(AppCommand::NextTab);
        assert_eq!(state.active_tab, TabKind::Dashboard);
        assert!(state.master_data_expanded);
    }

    #[test]
    fn visiting_master_data_page_expands_group_once() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::GoTo(TabKind::Offices));
        assert_eq!(
            events,
            vec![
                AppEvent::TabChanged(TabKind::Offices),
                AppEvent::MasterDataToggled(true),
            ]
        );

        let events = state.dispatch(AppCommand::GoTo(TabKind::Departments));
        assert_eq!(events, vec![AppEvent::TabChanged(TabKind::Departments)]);
        assert!(state.dispatch(AppCommand::GoTo(TabKind::Departments)).is_empty());
    }

    #[test]
    fn toggle_sidebar_updates_status() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::ToggleSidebar);
        assert_eq!(state.sidebar, SidebarState::Collapsed);
        assert_eq!(
            events,
            vec![
                AppEvent::SidebarChanged(SidebarState::Collapsed),
                AppEvent::StatusUpdated("sidebar collapsed".to_owned()),
            ],
        );

        state.dispatch(AppCommand::ToggleSidebar);
        assert_eq!(state.sidebar, SidebarState::Expanded);
    }

    #[test]
    fn master_data_group_toggles() {
        let mut state = AppState::default();
        assert_eq!(
            state.dispatch(AppCommand::ToggleMasterData),
            vec![AppEvent::MasterDataToggled(true)]
        );
        assert_eq!(
            state.dispatch(AppCommand::ToggleMasterData),
            vec![AppEvent::MasterDataToggled(false)]
        );
    }

    #[test]
    fn mode_transitions() {
        let mut state = AppState::default();

        state.dispatch(AppCommand::EnterSearch);
        assert_eq!(state.mode, AppMode::Search);

        state.dispatch(AppCommand::ExitSearch);
        assert_eq!(state.mode, AppMode::Nav);

        state.dispatch(AppCommand::OpenConfirm);
        assert_eq!(state.mode, AppMode::Confirm);

        state.dispatch(AppCommand::CloseConfirm);
        assert_eq!(state.mode, AppMode::Nav);
        assert!(state.dispatch(AppCommand::CloseConfirm).is_empty());
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::default();

        state.dispatch(AppCommand::SetStatus("saved".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("saved"));

        let events = state.dispatch(AppCommand::ClearStatus);
        assert_eq!(events, vec![AppEvent::StatusCleared]);
        assert_eq!(state.status_line, None);
    }
}
