// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! In-memory mock store behind the console. Every change is lost when the
//! process exits.

use anyhow::{Result, bail};
use nexus_app::{
    DashboardCounts, Department, DepartmentId, MenuItem, MenuItemId, Office, OfficeId,
    RecordStatus, Role, RoleId, StatusFilter, User, UserId, UserStatus,
};
use time::{Duration, OffsetDateTime};

pub const APP_NAME: &str = "office-nexus";
pub const DEMO_USER_COUNT: usize = 25;

const TOTAL_PERMISSIONS: u32 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Role,
    MenuItem,
    Office,
    Department,
}

impl EntityKind {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Role => "role",
            Self::MenuItem => "menu item",
            Self::Office => "office",
            Self::Department => "department",
        }
    }

    pub const fn noun(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Role => "Role",
            Self::MenuItem => "Menu item",
            Self::Office => "Office",
            Self::Department => "Department",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    User(UserId),
    Role(RoleId),
    MenuItem(MenuItemId),
    Office(OfficeId),
    Department(DepartmentId),
}

impl EntityRef {
    pub const fn kind(self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::Role(_) => EntityKind::Role,
            Self::MenuItem(_) => EntityKind::MenuItem,
            Self::Office(_) => EntityKind::Office,
            Self::Department(_) => EntityKind::Department,
        }
    }

    pub const fn id(self) -> i64 {
        match self {
            Self::User(id) => id.get(),
            Self::Role(id) => id.get(),
            Self::MenuItem(id) => id.get(),
            Self::Office(id) => id.get(),
            Self::Department(id) => id.get(),
        }
    }

    pub fn slug(self) -> String {
        match self {
            Self::User(id) => id.slug(),
            Self::Role(id) => id.slug(),
            Self::MenuItem(id) => id.slug(),
            Self::Office(id) => id.slug(),
            Self::Department(id) => id.slug(),
        }
    }
}

/// What a successful delete removed, for the confirmation toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    pub kind: EntityKind,
    pub name: String,
}

impl Deleted {
    pub fn message(&self) -> String {
        format!("{} \"{}\" has been deleted", self.kind.noun(), self.name)
    }
}

/// Initial collections for a [`Store`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seed {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub menu_items: Vec<MenuItem>,
    pub offices: Vec<Office>,
    pub departments: Vec<Department>,
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    users: Vec<User>,
    roles: Vec<Role>,
    menu_items: Vec<MenuItem>,
    offices: Vec<Office>,
    departments: Vec<Department>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: Seed) -> Self {
        Self {
            users: seed.users,
            roles: seed.roles,
            menu_items: seed.menu_items,
            offices: seed.offices,
            departments: seed.departments,
        }
    }

    /// The demo organisation. Last-login times are fixed offsets from `now`.
    pub fn demo(now: OffsetDateTime) -> Self {
        Self::from_seed(Seed {
            users: demo_users(now),
            roles: demo_roles(),
            menu_items: demo_menu_items(),
            offices: demo_offices(),
            departments: demo_departments(),
        })
    }

    pub fn list_users(&self, filter: StatusFilter) -> Vec<User> {
        self.users
            .iter()
            .filter(|user| filter.admits_user(user.status))
            .cloned()
            .collect()
    }

    pub fn list_roles(&self) -> Vec<Role> {
        self.roles.clone()
    }

    pub fn list_menu_items(&self) -> Vec<MenuItem> {
        self.menu_items.clone()
    }

    pub fn list_offices(&self, filter: StatusFilter) -> Vec<Office> {
        self.offices
            .iter()
            .filter(|office| filter.admits_record(office.status))
            .cloned()
            .collect()
    }

    pub fn list_departments(&self) -> Vec<Department> {
        self.departments.clone()
    }

    pub fn dashboard_counts(&self) -> DashboardCounts {
        DashboardCounts {
            users: self.users.len(),
            roles: self.roles.len(),
            menu_items: self.menu_items.len(),
            offices: self.offices.len(),
            departments: self.departments.len(),
        }
    }

    /// Users ordered by most recent login, newest first, capped at `limit`.
    pub fn recent_logins(&self, limit: usize) -> Vec<User> {
        let mut users = self.users.clone();
        users.sort_by(|a, b| b.last_login.cmp(&a.last_login).then(a.id.cmp(&b.id)));
        users.truncate(limit);
        users
    }

    pub fn delete(&mut self, target: EntityRef) -> Result<Deleted> {
        let name = match target {
            EntityRef::User(id) => self.delete_user(id)?.name,
            EntityRef::Role(id) => self.delete_role(id)?.name,
            EntityRef::MenuItem(id) => self.delete_menu_item(id)?.title,
            EntityRef::Office(id) => self.delete_office(id)?.name,
            EntityRef::Department(id) => self.delete_department(id)?.name,
        };
        Ok(Deleted {
            kind: target.kind(),
            name,
        })
    }

    pub fn delete_user(&mut self, id: UserId) -> Result<User> {
        let index = position(&self.users, |user| user.id == id, EntityRef::User(id))?;
        Ok(self.users.remove(index))
    }

    pub fn delete_role(&mut self, id: RoleId) -> Result<Role> {
        let index = position(&self.roles, |role| role.id == id, EntityRef::Role(id))?;
        if self.roles[index].is_default {
            bail!("default role cannot be deleted");
        }
        Ok(self.roles.remove(index))
    }

    pub fn delete_menu_item(&mut self, id: MenuItemId) -> Result<MenuItem> {
        let index = position(
            &self.menu_items,
            |item| item.id == id,
            EntityRef::MenuItem(id),
        )?;
        let children = self
            .menu_items
            .iter()
            .filter(|item| item.parent == Some(id))
            .count();
        if children > 0 {
            bail!(
                "menu item {} has {children} child item(s) -- delete them first",
                id.get()
            );
        }
        Ok(self.menu_items.remove(index))
    }

    pub fn delete_office(&mut self, id: OfficeId) -> Result<Office> {
        let index = position(&self.offices, |office| office.id == id, EntityRef::Office(id))?;
        let name = &self.offices[index].name;
        let departments = self
            .departments
            .iter()
            .filter(|department| &department.office == name)
            .count();
        if departments > 0 {
            bail!(
                "office {} has {departments} department(s) -- delete departments first",
                id.get()
            );
        }
        Ok(self.offices.remove(index))
    }

    pub fn delete_department(&mut self, id: DepartmentId) -> Result<Department> {
        let index = position(
            &self.departments,
            |department| department.id == id,
            EntityRef::Department(id),
        )?;
        Ok(self.departments.remove(index))
    }
}

fn position<T>(items: &[T], matches: impl Fn(&T) -> bool, target: EntityRef) -> Result<usize> {
    match items.iter().position(matches) {
        Some(index) => Ok(index),
        None => bail!(
            "{} {} not found or already deleted",
            target.kind().tag(),
            target.id()
        ),
    }
}

fn demo_users(now: OffsetDateTime) -> Vec<User> {
    (0..DEMO_USER_COUNT)
        .map(|i| {
            let role = match i % 3 {
                0 => "Admin",
                1 => "Manager",
                _ => "User",
            };
            let status = if i % 5 == 0 {
                UserStatus::Inactive
            } else if i % 7 == 0 {
                UserStatus::Pending
            } else {
                UserStatus::Active
            };
            // Spread logins over roughly the last four months.
            let minutes_ago = ((i as i64 * 7_919) % 2_777) * 60 + (i as i64 * 13) % 60;
            User {
                id: UserId::new(i as i64 + 1),
                name: format!("User {}", i + 1),
                email: format!("user{}@example.com", i + 1),
                role: role.to_owned(),
                status,
                last_login: now - Duration::minutes(minutes_ago),
            }
        })
        .collect()
}

fn demo_roles() -> Vec<Role> {
    [
        ("Administrator", "Full access to all features", 42, 3, false),
        (
            "Manager",
            "Manage department resources and users",
            30,
            8,
            false,
        ),
        ("User", "Basic user access", 15, 24, true),
        (
            "Accountant",
            "Access to financial data and reports",
            18,
            5,
            false,
        ),
        ("HR", "Human resources administration", 25, 4, false),
        ("Auditor", "Read-only access to all data", 20, 2, false),
    ]
    .into_iter()
    .zip(1_i64..)
    .map(
        |((name, description, permissions, users, is_default), id)| Role {
            id: RoleId::new(id),
            name: name.to_owned(),
            description: description.to_owned(),
            permissions,
            total_permissions: TOTAL_PERMISSIONS,
            users,
            is_default,
        },
    )
    .collect()
}

fn demo_menu_items() -> Vec<MenuItem> {
    const MASTER_DATA: i64 = 5;
    let rows: [(&str, &str, &str, Option<i64>, i32, &[&str]); 10] = [
        ("Dashboard", "/", "LayoutDashboard", None, 1, &["All Roles"]),
        ("Users", "/users", "Users", None, 2, &["Admin", "Manager"]),
        ("Roles", "/roles", "ShieldCheck", None, 3, &["Admin"]),
        ("Menus", "/menus", "Menu", None, 4, &["Admin"]),
        ("Master Data", "#", "Building2", None, 5, &["Admin", "Manager"]),
        (
            "Offices",
            "/master/offices",
            "Building",
            Some(MASTER_DATA),
            1,
            &["Admin", "Manager"],
        ),
        (
            "Departments",
            "/master/departments",
            "Briefcase",
            Some(MASTER_DATA),
            2,
            &["Admin", "Manager"],
        ),
        (
            "Positions",
            "/master/positions",
            "Users",
            Some(MASTER_DATA),
            3,
            &["Admin", "Manager", "HR"],
        ),
        (
            "Assets",
            "/master/assets",
            "Package",
            Some(MASTER_DATA),
            4,
            &["Admin", "Manager", "User"],
        ),
        ("Settings", "/settings", "Settings", None, 6, &["Admin"]),
    ];

    rows.into_iter()
        .zip(1_i64..)
        .map(|((title, path, icon, parent, order, roles), id)| MenuItem {
            id: MenuItemId::new(id),
            title: title.to_owned(),
            path: path.to_owned(),
            icon: icon.to_owned(),
            parent: parent.map(MenuItemId::new),
            order,
            visible: true,
            roles: roles.iter().map(|role| (*role).to_owned()).collect(),
        })
        .collect()
}

fn demo_offices() -> Vec<Office> {
    [
        (
            "Headquarters",
            "123 Main Street",
            "New York",
            "USA",
            "+1 (555) 123-4567",
            "hq@example.com",
            120,
            RecordStatus::Active,
        ),
        (
            "West Coast Office",
            "456 Tech Blvd",
            "San Francisco",
            "USA",
            "+1 (555) 987-6543",
            "sf@example.com",
            85,
            RecordStatus::Active,
        ),
        (
            "European HQ",
            "78 King Street",
            "London",
            "UK",
            "+44 (0) 20 7946 0958",
            "london@example.com",
            65,
            RecordStatus::Active,
        ),
        (
            "Asia Pacific HQ",
            "42 Marina Bay",
            "Singapore",
            "Singapore",
            "+65 6123 4567",
            "singapore@example.com",
            50,
            RecordStatus::Active,
        ),
        (
            "South Office",
            "789 Palm Avenue",
            "Miami",
            "USA",
            "+1 (555) 345-6789",
            "miami@example.com",
            0,
            RecordStatus::Inactive,
        ),
    ]
    .into_iter()
    .zip(1_i64..)
    .map(
        |((name, address, city, country, phone, email, employees, status), id)| Office {
            id: OfficeId::new(id),
            name: name.to_owned(),
            address: address.to_owned(),
            city: city.to_owned(),
            country: country.to_owned(),
            phone: phone.to_owned(),
            email: email.to_owned(),
            employees,
            status,
        },
    )
    .collect()
}

fn demo_departments() -> Vec<Department> {
    [
        (
            "Engineering",
            "Software development and IT operations",
            Some("Jane Smith"),
            "Headquarters",
            45,
            RecordStatus::Active,
        ),
        (
            "Marketing",
            "Brand strategy and customer acquisition",
            Some("John Doe"),
            "West Coast Office",
            18,
            RecordStatus::Active,
        ),
        (
            "Human Resources",
            "Employee management and recruitment",
            Some("Lisa Johnson"),
            "Headquarters",
            8,
            RecordStatus::Active,
        ),
        (
            "Finance",
            "Accounting and financial planning",
            Some("Mike Wilson"),
            "Headquarters",
            12,
            RecordStatus::Active,
        ),
        (
            "Customer Support",
            "User assistance and complaint resolution",
            None,
            "European HQ",
            20,
            RecordStatus::Active,
        ),
        (
            "Research",
            "Product research and innovation",
            None,
            "South Office",
            0,
            RecordStatus::Inactive,
        ),
    ]
    .into_iter()
    .zip(1_i64..)
    .map(
        |((name, description, head, office, employees, status), id)| Department {
            id: DepartmentId::new(id),
            name: name.to_owned(),
            description: description.to_owned(),
            head: head.map(str::to_owned),
            office: office.to_owned(),
            employees,
            status,
        },
    )
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{DEMO_USER_COUNT, EntityKind, EntityRef, Store};
    use nexus_app::{StatusFilter, UserId, UserStatus};
    use time::OffsetDateTime;

    #[test]
    fn demo_users_follow_role_and_status_cycle() {
        let store = Store::demo(OffsetDateTime::UNIX_EPOCH);
        let users = store.list_users(StatusFilter::All);
        assert_eq!(users.len(), DEMO_USER_COUNT);

        assert_eq!(users[0].name, "User 1");
        assert_eq!(users[0].role, "Admin");
        assert_eq!(users[0].status, UserStatus::Inactive);
        assert_eq!(users[1].role, "Manager");
        assert_eq!(users[2].role, "User");
        assert_eq!(users[7].status, UserStatus::Pending);
        assert_eq!(users[10].status, UserStatus::Inactive);
        assert_eq!(users[21].status, UserStatus::Pending);
        assert_eq!(users[1].email, "user2@example.com");
    }

    #[test]
    fn demo_logins_are_in_the_past() {
        let now = OffsetDateTime::UNIX_EPOCH;
        let store = Store::demo(now);
        assert!(
            store
                .list_users(StatusFilter::All)
                .iter()
                .all(|user| user.last_login <= now)
        );
    }

    #[test]
    fn entity_ref_reports_kind_and_id() {
        let target = EntityRef::User(UserId::new(3));
        assert_eq!(target.kind(), EntityKind::User);
        assert_eq!(target.id(), 3);
        assert_eq!(EntityKind::MenuItem.noun(), "Menu item");
    }
}
