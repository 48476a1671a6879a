// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Column definitions and derived page content for every table page.
//!
//! The console and the CLI's `--print` both build tables here so the two
//! surfaces agree on headers, tones and sort keys.

use nexus_app::table::{
    Cell, Column, DataTable, Pager, Pagination, RenderedTable, SortState, TableBody, TableState,
    TableStatus, Tone,
};
use nexus_app::{
    DashboardCounts, Department, MenuItem, MenuSummary, Office, Record, RecordStatus, Role,
    RoleSummary, TabKind, User, UserStatus, format_timestamp,
};
use serde::Serialize;
use time::OffsetDateTime;

const COLUMN_GAP: &str = "  ";

/// How many logins the dashboard activity panel lists.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum TabSnapshot {
    Users(Vec<User>),
    Roles(Vec<Role>),
    Menus(Vec<MenuItem>),
    Offices(Vec<Office>),
    Departments(Vec<Department>),
}

impl TabSnapshot {
    pub const fn tab_kind(&self) -> TabKind {
        match self {
            Self::Users(_) => TabKind::Users,
            Self::Roles(_) => TabKind::Roles,
            Self::Menus(_) => TabKind::Menus,
            Self::Offices(_) => TabKind::Offices,
            Self::Departments(_) => TabKind::Departments,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Self::Users(rows) => rows.len(),
            Self::Roles(rows) => rows.len(),
            Self::Menus(rows) => rows.len(),
            Self::Offices(rows) => rows.len(),
            Self::Departments(rows) => rows.len(),
        }
    }

    /// Summary cards shown above the table. Computed from the snapshot so
    /// they follow deletions without a second query.
    pub fn stat_cards(&self) -> Vec<StatCard> {
        match self {
            Self::Roles(rows) => {
                let summary = RoleSummary::from_roles(rows);
                vec![
                    StatCard::new("Total Roles", summary.total_roles.to_string()),
                    StatCard::new(
                        "Active Permissions",
                        summary.active_permissions.to_string(),
                    ),
                    StatCard::new(
                        "Unused Permissions",
                        summary.unused_permissions.to_string(),
                    ),
                ]
            }
            Self::Menus(rows) => {
                let summary = MenuSummary::from_items(rows);
                vec![
                    StatCard::new(
                        "Navigation Structure",
                        format!(
                            "{} parent items with {} child items",
                            summary.parents, summary.children
                        ),
                    ),
                    StatCard::new(
                        "Access Control",
                        format!("{} roles with custom menu access", summary.distinct_roles),
                    ),
                    StatCard::new(
                        "Visibility Status",
                        format!(
                            "{} visible items, {} hidden items",
                            summary.visible, summary.hidden
                        ),
                    ),
                ]
            }
            Self::Users(_) | Self::Offices(_) | Self::Departments(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
}

impl StatCard {
    fn new(title: &'static str, value: impl Into<String>) -> Self {
        Self {
            title,
            value: value.into(),
        }
    }
}

pub fn dashboard_cards(counts: &DashboardCounts) -> Vec<StatCard> {
    vec![
        StatCard::new("Total Users", counts.users.to_string()),
        StatCard::new("Active Roles", counts.roles.to_string()),
        StatCard::new("Menu Items", counts.menu_items.to_string()),
        StatCard::new("Office Locations", counts.offices.to_string()),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub summary: String,
    pub when: String,
}

/// Login feed for the dashboard. `users` is expected newest first.
pub fn recent_activity(users: &[User], now: OffsetDateTime) -> Vec<ActivityEntry> {
    users
        .iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|user| ActivityEntry {
            summary: format!("{} logged in", user.name),
            when: relative_time(now, user.last_login),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Announcement {
    pub title: &'static str,
    pub body: &'static str,
    pub when: &'static str,
}

pub const LATEST_UPDATES: [Announcement; 3] = [
    Announcement {
        title: "System Update",
        body: "Version 1.0.4 released with bug fixes and performance improvements.",
        when: "2 days ago",
    },
    Announcement {
        title: "New Department Added",
        body: "Marketing department has been added to the system.",
        when: "3 days ago",
    },
    Announcement {
        title: "Database Maintenance",
        body: "Scheduled database maintenance completed successfully.",
        when: "5 days ago",
    },
];

/// Coarse age of `then` as seen from `now`, e.g. `3 hours ago`. Future
/// instants and anything under a minute read as `just now`.
pub fn relative_time(now: OffsetDateTime, then: OffsetDateTime) -> String {
    let elapsed = now - then;
    let (count, unit) = if elapsed.whole_days() > 0 {
        (elapsed.whole_days(), "day")
    } else if elapsed.whole_hours() > 0 {
        (elapsed.whole_hours(), "hour")
    } else if elapsed.whole_minutes() > 0 {
        (elapsed.whole_minutes(), "minute")
    } else {
        return "just now".to_owned();
    };
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

/// One computed page: rendered cells plus what the console needs to act on
/// the visible rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub tab: TabKind,
    pub search: String,
    pub sort: Option<SortState>,
    pub table: RenderedTable,
    pub pager: Pager,
    pub row_ids: Vec<i64>,
    #[serde(skip)]
    pub row_labels: Vec<String>,
}

impl PageView {
    pub fn column_count(&self) -> usize {
        self.table.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    pub fn selected(&self, row: usize) -> Option<(i64, &str)> {
        let id = *self.row_ids.get(row)?;
        let label = self.row_labels.get(row)?;
        Some((id, label.as_str()))
    }
}

/// Filter, sort and paginate `snapshot` through its page's columns.
pub fn build_page(
    snapshot: &TabSnapshot,
    state: &TableState,
    pagination: Option<Pagination>,
) -> PageView {
    let tab = snapshot.tab_kind();
    match snapshot {
        TabSnapshot::Users(rows) => page_view(tab, rows, state, pagination),
        TabSnapshot::Roles(rows) => page_view(tab, rows, state, pagination),
        TabSnapshot::Menus(rows) => page_view(tab, rows, state, pagination),
        TabSnapshot::Offices(rows) => page_view(tab, rows, state, pagination),
        TabSnapshot::Departments(rows) => page_view(tab, rows, state, pagination),
    }
}

/// Sort by the column at `index`, as the header cursor selects it.
pub fn select_sort_at(
    snapshot: &TabSnapshot,
    state: &mut TableState,
    index: usize,
) -> TableStatus {
    match snapshot {
        TabSnapshot::Users(rows) => {
            DataTable::new(rows, User::columns()).select_sort_at(state, index)
        }
        TabSnapshot::Roles(rows) => {
            DataTable::new(rows, Role::columns()).select_sort_at(state, index)
        }
        TabSnapshot::Menus(rows) => {
            DataTable::new(rows, MenuItem::columns()).select_sort_at(state, index)
        }
        TabSnapshot::Offices(rows) => {
            DataTable::new(rows, Office::columns()).select_sort_at(state, index)
        }
        TabSnapshot::Departments(rows) => {
            DataTable::new(rows, Department::columns()).select_sort_at(state, index)
        }
    }
}

/// Sort by column id, as named on the command line.
pub fn select_sort_by_id(tab: TabKind, state: &mut TableState, id: &str) -> TableStatus {
    match tab {
        TabKind::Users => state.select_sort_column(&User::columns(), id),
        TabKind::Roles => state.select_sort_column(&Role::columns(), id),
        TabKind::Menus => state.select_sort_column(&MenuItem::columns(), id),
        TabKind::Offices => state.select_sort_column(&Office::columns(), id),
        TabKind::Departments => state.select_sort_column(&Department::columns(), id),
        TabKind::Dashboard => TableStatus::SortUnavailable,
    }
}

/// Ids of the sortable columns on `tab`, for usage errors.
pub fn sortable_column_ids(tab: TabKind) -> Vec<&'static str> {
    fn sortable<R>(columns: Vec<Column<'_, R>>) -> Vec<&'static str> {
        columns
            .into_iter()
            .filter(|column| column.sortable)
            .map(|column| column.id)
            .collect()
    }
    match tab {
        TabKind::Users => sortable(User::columns()),
        TabKind::Roles => sortable(Role::columns()),
        TabKind::Menus => sortable(MenuItem::columns()),
        TabKind::Offices => sortable(Office::columns()),
        TabKind::Departments => sortable(Department::columns()),
        TabKind::Dashboard => Vec::new(),
    }
}

trait PageRecord: Record + Sized {
    fn columns<'a>() -> Vec<Column<'a, Self>>;

    fn row_id(&self) -> i64;

    fn row_label(&self) -> &str;
}

fn page_view<'a, R: PageRecord>(
    tab: TabKind,
    rows: &'a [R],
    state: &TableState,
    pagination: Option<Pagination>,
) -> PageView {
    let mut table = DataTable::new(rows, R::columns());
    if let Some(pagination) = pagination {
        table = table.with_pagination(pagination);
    }
    let view = table.view(state);
    let rendered = table.render_view(&view);
    PageView {
        tab,
        search: state.search().to_owned(),
        sort: view.sort(),
        table: rendered,
        pager: view.pager,
        row_ids: view.rows().iter().map(|row| row.row_id()).collect(),
        row_labels: view
            .rows()
            .iter()
            .map(|row| row.row_label().to_owned())
            .collect(),
    }
}

fn user_status_tone(status: UserStatus) -> Tone {
    match status {
        UserStatus::Active => Tone::Success,
        UserStatus::Pending => Tone::Warning,
        UserStatus::Inactive => Tone::Muted,
    }
}

fn record_status_cell(status: RecordStatus) -> Cell {
    let tone = match status {
        RecordStatus::Active => Tone::Success,
        RecordStatus::Inactive => Tone::Muted,
    };
    Cell::toned(status.label(), tone)
}

impl PageRecord for User {
    fn columns<'a>() -> Vec<Column<'a, Self>> {
        vec![
            Column::new("name", "Name", |user: &User| {
                Cell::new(format!("{} <{}>", user.name, user.email))
            })
            .sortable(),
            Column::new("role", "Role", |user: &User| Cell::new(user.role.as_str())).sortable(),
            Column::new("status", "Status", |user: &User| {
                Cell::toned(user.status.label(), user_status_tone(user.status))
            })
            .sortable(),
            Column::new("last_login", "Last Login", |user: &User| {
                Cell::toned(format_timestamp(user.last_login), Tone::Muted)
            })
            .sortable(),
        ]
    }

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn row_label(&self) -> &str {
        &self.name
    }
}

impl PageRecord for Role {
    fn columns<'a>() -> Vec<Column<'a, Self>> {
        vec![
            Column::new("name", "Role", |role: &Role| {
                if role.is_default {
                    Cell::toned(
                        format!("{} (Default) · {}", role.name, role.description),
                        Tone::Accent,
                    )
                } else {
                    Cell::new(format!("{} · {}", role.name, role.description))
                }
            })
            .sortable(),
            Column::new("permissions", "Permissions", |role: &Role| {
                Cell::new(format!(
                    "{} / {} ({}%)",
                    role.permissions,
                    role.total_permissions,
                    role.coverage_percent()
                ))
            }),
            Column::new("users", "Users", |role: &Role| Cell::new(role.users.to_string()))
                .sortable(),
        ]
    }

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn row_label(&self) -> &str {
        &self.name
    }
}

impl PageRecord for MenuItem {
    fn columns<'a>() -> Vec<Column<'a, Self>> {
        vec![
            Column::new("title", "Menu Item", |item: &MenuItem| {
                let arrow = if item.parent.is_some() { "→ " } else { "" };
                Cell::new(format!("{arrow}{} ({})", item.title, item.path))
            })
            .sortable(),
            Column::new("icon", "Icon", |item: &MenuItem| {
                Cell::toned(item.icon.as_str(), Tone::Muted)
            }),
            Column::new("order", "Order", |item: &MenuItem| {
                Cell::new(item.order.to_string())
            })
            .sortable(),
            Column::new("visible", "Status", |item: &MenuItem| {
                if item.visible {
                    Cell::toned("Visible", Tone::Success)
                } else {
                    Cell::toned("Hidden", Tone::Muted)
                }
            }),
            Column::new("roles", "Access", |item: &MenuItem| {
                Cell::new(access_label(&item.roles))
            }),
        ]
    }

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn row_label(&self) -> &str {
        &self.title
    }
}

fn access_label(roles: &[String]) -> String {
    match roles {
        [first, _, _, ..] => format!("{first} +{} more", roles.len() - 1),
        _ => roles.join(", "),
    }
}

impl PageRecord for Office {
    fn columns<'a>() -> Vec<Column<'a, Self>> {
        vec![
            Column::new("name", "Office", |office: &Office| {
                Cell::new(format!(
                    "{} · {}, {}",
                    office.name, office.city, office.country
                ))
            })
            .sortable(),
            Column::new("contact", "Contact", |office: &Office| {
                Cell::new(format!("{} · {}", office.phone, office.email))
            }),
            Column::new("employees", "Employees", |office: &Office| {
                Cell::new(office.employees.to_string())
            })
            .sortable(),
            Column::new("status", "Status", |office: &Office| {
                record_status_cell(office.status)
            })
            .sortable(),
        ]
    }

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn row_label(&self) -> &str {
        &self.name
    }
}

impl PageRecord for Department {
    fn columns<'a>() -> Vec<Column<'a, Self>> {
        vec![
            Column::new("name", "Department", |department: &Department| {
                Cell::new(format!("{} · {}", department.name, department.description))
            })
            .sortable(),
            Column::new("head", "Department Head", |department: &Department| {
                match &department.head {
                    Some(head) => Cell::new(head.as_str()),
                    None => Cell::toned("Not assigned", Tone::Muted),
                }
            }),
            Column::new("office", "Office", |department: &Department| {
                Cell::new(department.office.as_str())
            })
            .sortable(),
            Column::new("employees", "Employees", |department: &Department| {
                Cell::new(department.employees.to_string())
            })
            .sortable(),
            Column::new("status", "Status", |department: &Department| {
                record_status_cell(department.status)
            })
            .sortable(),
        ]
    }

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn row_label(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: &'static str,
    pub description: String,
}

pub fn confirm_dialog(tab: TabKind, label: &str) -> Option<ConfirmDialog> {
    let (title, description) = match tab {
        TabKind::Users => ("Delete User", plain_delete_text(label)),
        TabKind::Roles => (
            "Delete Role",
            format!(
                "Are you sure you want to delete {label}? This action will remove this role from all users and cannot be undone."
            ),
        ),
        TabKind::Menus => (
            "Delete Menu Item",
            format!(
                "Are you sure you want to delete \"{label}\"? This may affect navigation for users."
            ),
        ),
        TabKind::Offices => ("Delete Office", plain_delete_text(label)),
        TabKind::Departments => ("Delete Department", plain_delete_text(label)),
        TabKind::Dashboard => return None,
    };
    Some(ConfirmDialog { title, description })
}

fn plain_delete_text(label: &str) -> String {
    format!("Are you sure you want to delete {label}? This action cannot be undone.")
}

/// Column-aligned text for non-interactive output.
pub fn render_plain(page: &PageView) -> String {
    let headers = page
        .table
        .headers
        .iter()
        .map(|header| header.label())
        .collect::<Vec<_>>();
    let rows = match &page.table.body {
        TableBody::Rows(rows) => rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.text.clone()).collect::<Vec<_>>())
            .collect::<Vec<_>>(),
        TableBody::Empty { .. } => Vec::new(),
    };

    let mut widths = headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();
    for row in &rows {
        for (width, text) in widths.iter_mut().zip(row) {
            *width = (*width).max(text.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&align_line(&headers, &widths));
    out.push('\n');
    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>();
    out.push_str(&align_line(&rule, &widths));
    out.push('\n');
    match &page.table.body {
        TableBody::Rows(_) => {
            for row in &rows {
                out.push_str(&align_line(row, &widths));
                out.push('\n');
            }
        }
        TableBody::Empty { message, .. } => {
            out.push_str(message);
            out.push('\n');
        }
    }
    out.push('\n');
    out.push_str(&page.pager.summary().to_string());
    if page.pager.is_paginated() && page.pager.page_count > 0 {
        out.push_str(&format!(
            " (page {} of {})",
            page.pager.page_index + 1,
            page.pager.page_count
        ));
    }
    out.push('\n');
    out
}

fn align_line(values: &[String], widths: &[usize]) -> String {
    let line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let pad = width.saturating_sub(value.chars().count());
            format!("{value}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::{
        TabSnapshot, access_label, build_page, confirm_dialog, dashboard_cards, recent_activity,
        relative_time, render_plain, select_sort_at, select_sort_by_id, sortable_column_ids,
    };
    use nexus_app::table::{Pagination, TableBody, TableState, TableStatus, Tone};
    use nexus_app::{
        DashboardCounts, Department, DepartmentId, MenuItem, MenuItemId, RecordStatus, Role,
        RoleId, SortDirection, TabKind, UserStatus,
    };
    use nexus_testkit::{OfficeFaker, fixture_now};
    use std::num::NonZeroUsize;
    use time::Duration;

    fn role(id: i64, name: &str, permissions: u32, users: u32, is_default: bool) -> Role {
        Role {
            id: RoleId::new(id),
            name: name.to_owned(),
            description: format!("{name} access"),
            permissions,
            total_permissions: 42,
            users,
            is_default,
        }
    }

    fn menu(id: i64, title: &str, parent: Option<i64>, roles: &[&str]) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(id),
            title: title.to_owned(),
            path: format!("/{}", title.to_lowercase()),
            icon: "folder".to_owned(),
            parent: parent.map(MenuItemId::new),
            order: id as i32,
            visible: id != 3,
            roles: roles.iter().map(|role| (*role).to_owned()).collect(),
        }
    }

    fn cell_text(snapshot: &TabSnapshot, row: usize, column: usize) -> String {
        let page = build_page(snapshot, &TableState::default(), None);
        match page.table.body {
            TableBody::Rows(rows) => rows[row][column].text.clone(),
            TableBody::Empty { .. } => panic!("expected rows"),
        }
    }

    #[test]
    fn user_status_cells_carry_tones() {
        let mut faker = OfficeFaker::new(3);
        let mut users = faker.users(3);
        users[0].status = UserStatus::Active;
        users[1].status = UserStatus::Pending;
        users[2].status = UserStatus::Inactive;
        let page = build_page(&TabSnapshot::Users(users), &TableState::default(), None);

        let TableBody::Rows(rows) = page.table.body else {
            panic!("expected rows");
        };
        let tones = rows.iter().map(|row| row[2].tone).collect::<Vec<_>>();
        assert_eq!(tones, vec![Tone::Success, Tone::Warning, Tone::Muted]);
        assert_eq!(rows[1][2].text, "Pending");
        assert_eq!(page.row_ids, vec![1, 2, 3]);
    }

    #[test]
    fn role_cells_mark_default_and_coverage() {
        let snapshot = TabSnapshot::Roles(vec![
            role(1, "Administrator", 42, 3, false),
            role(2, "User", 15, 20, true),
        ]);
        assert_eq!(cell_text(&snapshot, 1, 0), "User (Default) · User access");
        assert_eq!(cell_text(&snapshot, 1, 1), "15 / 42 (36%)");
        assert_eq!(cell_text(&snapshot, 0, 1), "42 / 42 (100%)");
    }

    #[test]
    fn menu_cells_show_hierarchy_and_access() {
        let snapshot = TabSnapshot::Menus(vec![
            menu(1, "Reports", None, &["admin", "manager", "user"]),
            menu(2, "Daily", Some(1), &["admin"]),
            menu(3, "Archive", None, &["admin", "manager"]),
        ]);
        assert_eq!(cell_text(&snapshot, 0, 0), "Reports (/reports)");
        assert_eq!(cell_text(&snapshot, 1, 0), "→ Daily (/daily)");
        assert_eq!(cell_text(&snapshot, 0, 4), "admin +2 more");
        assert_eq!(cell_text(&snapshot, 2, 4), "admin, manager");
        assert_eq!(cell_text(&snapshot, 2, 3), "Hidden");
    }

    #[test]
    fn access_label_lists_short_role_sets() {
        assert_eq!(access_label(&[]), "");
        assert_eq!(access_label(&["admin".to_owned()]), "admin");
    }

    #[test]
    fn department_without_head_is_not_assigned() {
        let snapshot = TabSnapshot::Departments(vec![Department {
            id: DepartmentId::new(1),
            name: "Finance".to_owned(),
            description: "Money".to_owned(),
            head: None,
            office: "Headquarters".to_owned(),
            employees: 12,
            status: RecordStatus::Active,
        }]);
        assert_eq!(cell_text(&snapshot, 0, 1), "Not assigned");
    }

    #[test]
    fn sorting_by_header_position_and_id() {
        let snapshot = TabSnapshot::Roles(vec![
            role(1, "Administrator", 42, 3, false),
            role(2, "User", 15, 20, true),
            role(3, "Auditor", 10, 3, false),
        ]);
        let mut state = TableState::default();

        assert_eq!(
            select_sort_at(&snapshot, &mut state, 1),
            TableStatus::SortUnavailable
        );
        assert_eq!(
            select_sort_at(&snapshot, &mut state, 2),
            TableStatus::SortAsc("Users")
        );
        assert_eq!(
            select_sort_by_id(TabKind::Roles, &mut state, "users"),
            TableStatus::SortDesc("Users")
        );

        let page = build_page(&snapshot, &state, None);
        assert_eq!(page.row_ids, vec![2, 1, 3]);
        assert_eq!(page.table.headers[2].sort, Some(SortDirection::Desc));
        assert_eq!(page.table.headers[2].label(), "Users ↓");
    }

    #[test]
    fn sortable_ids_follow_column_flags() {
        assert_eq!(
            sortable_column_ids(TabKind::Users),
            vec!["name", "role", "status", "last_login"]
        );
        assert_eq!(sortable_column_ids(TabKind::Menus), vec!["title", "order"]);
        assert!(sortable_column_ids(TabKind::Dashboard).is_empty());
    }

    #[test]
    fn paginated_page_reports_selection_targets() {
        let mut faker = OfficeFaker::new(9);
        let snapshot = TabSnapshot::Users(faker.users(25));
        let size = NonZeroUsize::new(10).expect("non-zero");
        let pagination = Pagination {
            page_index: 2,
            page_size: size,
        };
        let page = build_page(&snapshot, &TableState::default(), Some(pagination));

        assert_eq!(page.row_count(), 5);
        assert_eq!(page.pager.page_count, 3);
        assert_eq!(page.selected(0).map(|(id, _)| id), Some(21));
        assert_eq!(page.selected(5), None);
        assert_eq!(
            page.pager.summary().to_string(),
            "Showing 21 to 25 of 25 results"
        );
    }

    #[test]
    fn stat_cards_follow_snapshot() {
        let roles = TabSnapshot::Roles(vec![
            role(1, "Administrator", 42, 3, false),
            role(2, "User", 15, 20, true),
        ]);
        let cards = roles.stat_cards();
        assert_eq!(cards[0].value, "2");
        assert_eq!(cards[1].value, "57");
        assert_eq!(cards[2].value, "27");

        let menus = TabSnapshot::Menus(vec![
            menu(1, "Reports", None, &["admin", "manager"]),
            menu(2, "Daily", Some(1), &["admin"]),
            menu(3, "Archive", None, &["auditor"]),
        ]);
        let cards = menus.stat_cards();
        assert_eq!(cards[0].value, "2 parent items with 1 child items");
        assert_eq!(cards[1].value, "3 roles with custom menu access");
        assert_eq!(cards[2].value, "2 visible items, 1 hidden items");

        assert!(TabSnapshot::Users(Vec::new()).stat_cards().is_empty());
    }

    #[test]
    fn dashboard_cards_use_counts() {
        let cards = dashboard_cards(&DashboardCounts {
            users: 25,
            roles: 6,
            menu_items: 10,
            offices: 5,
            departments: 6,
        });
        let titles = cards.iter().map(|card| card.title).collect::<Vec<_>>();
        assert_eq!(
            titles,
            vec!["Total Users", "Active Roles", "Menu Items", "Office Locations"]
        );
        assert_eq!(cards[3].value, "5");
    }

    #[test]
    fn relative_time_picks_largest_whole_unit() {
        let now = fixture_now();
        assert_eq!(relative_time(now, now), "just now");
        assert_eq!(relative_time(now, now + Duration::hours(1)), "just now");
        assert_eq!(relative_time(now, now - Duration::seconds(59)), "just now");
        assert_eq!(relative_time(now, now - Duration::minutes(1)), "1 minute ago");
        assert_eq!(relative_time(now, now - Duration::minutes(59)), "59 minutes ago");
        assert_eq!(relative_time(now, now - Duration::minutes(61)), "1 hour ago");
        assert_eq!(relative_time(now, now - Duration::hours(23)), "23 hours ago");
        assert_eq!(relative_time(now, now - Duration::hours(49)), "2 days ago");
    }

    #[test]
    fn recent_activity_caps_at_five_logins() {
        let now = fixture_now();
        let mut users = OfficeFaker::new(4).users(8);
        for (index, user) in users.iter_mut().enumerate() {
            user.name = format!("User {}", index + 1);
            user.last_login = now - Duration::hours(index as i64 + 1);
        }

        let entries = recent_activity(&users, now);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].summary, "User 1 logged in");
        assert_eq!(entries[0].when, "1 hour ago");
        assert_eq!(entries[4].when, "5 hours ago");
        assert!(recent_activity(&[], now).is_empty());
    }

    #[test]
    fn confirm_dialog_wording_per_page() {
        let user = confirm_dialog(TabKind::Users, "User 3").expect("users deletable");
        assert_eq!(user.title, "Delete User");
        assert_eq!(
            user.description,
            "Are you sure you want to delete User 3? This action cannot be undone."
        );

        let menu = confirm_dialog(TabKind::Menus, "Reports").expect("menus deletable");
        assert_eq!(
            menu.description,
            "Are you sure you want to delete \"Reports\"? This may affect navigation for users."
        );

        let role = confirm_dialog(TabKind::Roles, "Auditor").expect("roles deletable");
        assert!(role.description.contains("remove this role from all users"));
        assert_eq!(confirm_dialog(TabKind::Dashboard, "x"), None);
    }

    #[test]
    fn plain_rendering_aligns_columns() {
        let snapshot = TabSnapshot::Roles(vec![
            role(1, "Admin", 42, 3, false),
            role(2, "Auditor", 10, 12, false),
        ]);
        let mut state = TableState::default();
        select_sort_by_id(TabKind::Roles, &mut state, "users");
        let text = render_plain(&build_page(&snapshot, &state, None));
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "Role                      Permissions     Users ↑");
        assert!(lines[1].starts_with("------------------------  "));
        assert!(lines[2].starts_with("Admin · Admin access     "));
        assert_eq!(lines[5], "Showing 1 to 2 of 2 results");
    }

    #[test]
    fn plain_rendering_of_empty_page_shows_placeholder() {
        let text = render_plain(&build_page(
            &TabSnapshot::Offices(Vec::new()),
            &TableState::default(),
            Some(Pagination::default()),
        ));
        assert!(text.contains("No data found"));
        assert!(text.ends_with("Showing 0 to 0 of 0 results\n"));
    }
}
