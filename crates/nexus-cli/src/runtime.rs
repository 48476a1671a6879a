// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use nexus_app::{
    DashboardCounts, DepartmentId, MenuItemId, OfficeId, RoleId, StatusFilter, TabKind, User,
    UserId,
};
use nexus_data::{EntityRef, Store};
use nexus_tui::TabSnapshot;

pub struct StoreRuntime {
    store: Store,
}

impl StoreRuntime {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Snapshot of one page straight from the store, without going through the
/// console. `--print` uses this too.
pub fn tab_snapshot(store: &Store, tab: TabKind, filter: StatusFilter) -> Option<TabSnapshot> {
    let snapshot = match tab {
        TabKind::Dashboard => return None,
        TabKind::Users => TabSnapshot::Users(store.list_users(filter)),
        TabKind::Roles => TabSnapshot::Roles(store.list_roles()),
        TabKind::Menus => TabSnapshot::Menus(store.list_menu_items()),
        TabKind::Offices => TabSnapshot::Offices(store.list_offices(filter)),
        TabKind::Departments => TabSnapshot::Departments(store.list_departments()),
    };
    Some(snapshot)
}

fn entity_ref(tab: TabKind, row_id: i64) -> Result<EntityRef> {
    let target = match tab {
        TabKind::Dashboard => bail!("the dashboard has no rows to delete"),
        TabKind::Users => EntityRef::User(UserId::new(row_id)),
        TabKind::Roles => EntityRef::Role(RoleId::new(row_id)),
        TabKind::Menus => EntityRef::MenuItem(MenuItemId::new(row_id)),
        TabKind::Offices => EntityRef::Office(OfficeId::new(row_id)),
        TabKind::Departments => EntityRef::Department(DepartmentId::new(row_id)),
    };
    Ok(target)
}

impl nexus_tui::AppRuntime for StoreRuntime {
    fn load_dashboard_counts(&mut self) -> Result<DashboardCounts> {
        Ok(self.store.dashboard_counts())
    }

    fn load_recent_logins(&mut self, limit: usize) -> Result<Vec<User>> {
        Ok(self.store.recent_logins(limit))
    }

    fn load_tab_snapshot(
        &mut self,
        tab: TabKind,
        filter: StatusFilter,
    ) -> Result<Option<TabSnapshot>> {
        let snapshot = tab_snapshot(&self.store, tab, filter);
        if let Some(snapshot) = &snapshot {
            log::info!(
                "loaded {} {} rows (filter {})",
                snapshot.row_count(),
                tab.label(),
                filter.label()
            );
        }
        Ok(snapshot)
    }

    fn delete_row(&mut self, tab: TabKind, row_id: i64) -> Result<String> {
        let target = entity_ref(tab, row_id)?;
        match self.store.delete(target) {
            Ok(deleted) => {
                log::info!("deleted {}", target.slug());
                Ok(deleted.message())
            }
            Err(error) => {
                log::warn!("delete of {} refused: {error:#}", target.slug());
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreRuntime, tab_snapshot};
    use anyhow::Result;
    use nexus_app::{StatusFilter, TabKind};
    use nexus_data::{DEMO_USER_COUNT, Store};
    use nexus_testkit::fixture_now;
    use nexus_tui::{AppRuntime, TabSnapshot};

    fn demo_runtime() -> StoreRuntime {
        StoreRuntime::new(Store::demo(fixture_now()))
    }

    #[test]
    fn dashboard_has_no_snapshot() -> Result<()> {
        let mut runtime = demo_runtime();
        assert_eq!(
            runtime.load_tab_snapshot(TabKind::Dashboard, StatusFilter::All)?,
            None
        );
        Ok(())
    }

    #[test]
    fn user_snapshot_respects_status_filter() -> Result<()> {
        let mut runtime = demo_runtime();
        let all = runtime
            .load_tab_snapshot(TabKind::Users, StatusFilter::All)?
            .map(|snapshot| snapshot.row_count());
        assert_eq!(all, Some(DEMO_USER_COUNT));

        let Some(TabSnapshot::Users(inactive)) =
            runtime.load_tab_snapshot(TabKind::Users, StatusFilter::Inactive)?
        else {
            panic!("users page should load a user snapshot");
        };
        assert!(!inactive.is_empty());
        assert!(inactive.len() < DEMO_USER_COUNT);
        assert!(
            inactive
                .iter()
                .all(|user| user.status == nexus_app::UserStatus::Inactive)
        );
        Ok(())
    }

    #[test]
    fn snapshot_kind_matches_tab() {
        let store = Store::demo(fixture_now());
        for tab in TabKind::ALL {
            let snapshot = tab_snapshot(&store, tab, StatusFilter::All);
            assert_eq!(snapshot.map(|snapshot| snapshot.tab_kind()), match tab {
                TabKind::Dashboard => None,
                other => Some(other),
            });
        }
    }

    #[test]
    fn delete_row_removes_user_and_reports_name() -> Result<()> {
        let mut runtime = demo_runtime();
        let message = runtime.delete_row(TabKind::Users, 3)?;
        assert_eq!(message, "User \"User 3\" has been deleted");
        assert_eq!(
            runtime.load_dashboard_counts()?.users,
            DEMO_USER_COUNT - 1
        );

        let error = runtime
            .delete_row(TabKind::Users, 3)
            .expect_err("second delete should fail");
        assert!(error.to_string().contains("not found or already deleted"));
        Ok(())
    }

    #[test]
    fn default_role_is_protected() -> Result<()> {
        let mut runtime = demo_runtime();
        let default_role = runtime
            .store
            .list_roles()
            .into_iter()
            .find(|role| role.is_default)
            .map(|role| role.id.get());
        let Some(default_role) = default_role else {
            panic!("demo data should carry a default role");
        };

        let error = runtime
            .delete_row(TabKind::Roles, default_role)
            .expect_err("default role delete should fail");
        assert_eq!(error.to_string(), "default role cannot be deleted");
        assert_eq!(runtime.store.list_roles().len(), 6);
        Ok(())
    }

    #[test]
    fn recent_logins_come_from_store() -> Result<()> {
        let mut runtime = demo_runtime();
        let recent = runtime.load_recent_logins(5)?;
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].name, "User 1");
        Ok(())
    }

    #[test]
    fn dashboard_rows_cannot_be_deleted() {
        let mut runtime = demo_runtime();
        let error = runtime
            .delete_row(TabKind::Dashboard, 1)
            .expect_err("dashboard delete should fail");
        assert!(error.to_string().contains("no rows to delete"));
    }
}
