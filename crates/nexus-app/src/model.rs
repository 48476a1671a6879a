// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::OffsetDateTime;

use crate::ids::*;
use crate::record::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Pending => "Pending",
        }
    }
}

/// Lifecycle of offices and departments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    Active,
    Inactive,
}

impl RecordStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// Sub-tab shown in a page header; narrows the collection handed to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Pending,
    Inactive,
}

impl StatusFilter {
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "pending" => Some(Self::Pending),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn admits_user(self, status: UserStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => status == UserStatus::Active,
            Self::Pending => status == UserStatus::Pending,
            Self::Inactive => status == UserStatus::Inactive,
        }
    }

    pub fn admits_record(self, status: RecordStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => status == RecordStatus::Active,
            Self::Pending => false,
            Self::Inactive => status == RecordStatus::Inactive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TabKind {
    Dashboard,
    Users,
    Roles,
    Menus,
    Offices,
    Departments,
}

impl TabKind {
    pub const ALL: [Self; 6] = [
        Self::Dashboard,
        Self::Users,
        Self::Roles,
        Self::Menus,
        Self::Offices,
        Self::Departments,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Roles => "roles",
            Self::Menus => "menus",
            Self::Offices => "offices",
            Self::Departments => "departments",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.label().eq_ignore_ascii_case(value.trim()))
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
            Self::Roles => "Roles",
            Self::Menus => "Menu Management",
            Self::Offices => "Offices",
            Self::Departments => "Departments",
        }
    }

    pub const fn subtitle(self) -> &'static str {
        match self {
            Self::Dashboard => "Welcome to Office Nexus System",
            Self::Users => "Manage user accounts and permissions",
            Self::Roles => "Manage roles and permissions",
            Self::Menus => "Configure and organize application menus",
            Self::Offices => "Manage your organization's office locations",
            Self::Departments => "Manage your organization's departments",
        }
    }

    /// Pages grouped under the sidebar's "Master Data" entry.
    pub const fn is_master_data(self) -> bool {
        matches!(self, Self::Offices | Self::Departments)
    }

    pub const fn status_filters(self) -> &'static [StatusFilter] {
        match self {
            Self::Users => &[
                StatusFilter::All,
                StatusFilter::Active,
                StatusFilter::Pending,
                StatusFilter::Inactive,
            ],
            Self::Offices => &[
                StatusFilter::All,
                StatusFilter::Active,
                StatusFilter::Inactive,
            ],
            Self::Dashboard | Self::Roles | Self::Menus | Self::Departments => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    Nav,
    Search,
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: UserStatus,
    pub last_login: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub description: String,
    pub permissions: u32,
    pub total_permissions: u32,
    pub users: u32,
    pub is_default: bool,
}

impl Role {
    /// Share of the permission catalogue granted, rounded to a whole percent.
    pub fn coverage_percent(&self) -> u32 {
        if self.total_permissions == 0 {
            return 0;
        }
        let ratio = f64::from(self.permissions) / f64::from(self.total_permissions);
        (ratio * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub title: String,
    pub path: String,
    pub icon: String,
    pub parent: Option<MenuItemId>,
    pub order: i32,
    pub visible: bool,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    pub id: OfficeId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub employees: u32,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub description: String,
    pub head: Option<String>,
    pub office: String,
    pub employees: u32,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardCounts {
    pub users: usize,
    pub roles: usize,
    pub menu_items: usize,
    pub offices: usize,
    pub departments: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RoleSummary {
    pub total_roles: usize,
    pub active_permissions: u32,
    pub unused_permissions: u32,
}

impl RoleSummary {
    pub fn from_roles(roles: &[Role]) -> Self {
        Self {
            total_roles: roles.len(),
            active_permissions: roles.iter().map(|role| role.permissions).sum(),
            unused_permissions: roles
                .iter()
                .map(|role| role.total_permissions.saturating_sub(role.permissions))
                .sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MenuSummary {
    pub parents: usize,
    pub children: usize,
    pub distinct_roles: usize,
    pub visible: usize,
    pub hidden: usize,
}

impl MenuSummary {
    pub fn from_items(items: &[MenuItem]) -> Self {
        let distinct_roles = items
            .iter()
            .flat_map(|item| item.roles.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .len();
        let parents = items.iter().filter(|item| item.parent.is_none()).count();
        let visible = items.iter().filter(|item| item.visible).count();
        Self {
            parents,
            children: items.len() - parents,
            distinct_roles,
            visible,
            hidden: items.len() - visible,
        }
    }
}

impl Record for User {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id.get())),
            "name" => Some(FieldValue::from(self.name.as_str())),
            "email" => Some(FieldValue::from(self.email.as_str())),
            "role" => Some(FieldValue::from(self.role.as_str())),
            "status" => Some(FieldValue::from(self.status.as_str())),
            "last_login" => Some(FieldValue::Timestamp(self.last_login)),
            _ => None,
        }
    }

    fn field_values(&self) -> Vec<FieldValue> {
        ["id", "name", "email", "role", "status", "last_login"]
            .into_iter()
            .filter_map(|name| self.field(name))
            .collect()
    }
}

impl Record for Role {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id.get())),
            "name" => Some(FieldValue::from(self.name.as_str())),
            "description" => Some(FieldValue::from(self.description.as_str())),
            "permissions" => Some(FieldValue::Int(i64::from(self.permissions))),
            "total_permissions" => Some(FieldValue::Int(i64::from(self.total_permissions))),
            "users" => Some(FieldValue::Int(i64::from(self.users))),
            "is_default" => Some(FieldValue::Bool(self.is_default)),
            _ => None,
        }
    }

    fn field_values(&self) -> Vec<FieldValue> {
        [
            "id",
            "name",
            "description",
            "permissions",
            "total_permissions",
            "users",
            "is_default",
        ]
        .into_iter()
        .filter_map(|name| self.field(name))
        .collect()
    }
}

impl Record for MenuItem {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id.get())),
            "title" => Some(FieldValue::from(self.title.as_str())),
            "path" => Some(FieldValue::from(self.path.as_str())),
            "icon" => Some(FieldValue::from(self.icon.as_str())),
            "parent" => Some(
                self.parent
                    .map(|parent| FieldValue::Int(parent.get()))
                    .unwrap_or(FieldValue::Null),
            ),
            "order" => Some(FieldValue::Int(i64::from(self.order))),
            "visible" => Some(FieldValue::Bool(self.visible)),
            "roles" => Some(FieldValue::List(self.roles.clone())),
            _ => None,
        }
    }

    fn field_values(&self) -> Vec<FieldValue> {
        [
            "id", "title", "path", "icon", "parent", "order", "visible", "roles",
        ]
        .into_iter()
        .filter_map(|name| self.field(name))
        .collect()
    }
}

impl Record for Office {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id.get())),
            "name" => Some(FieldValue::from(self.name.as_str())),
            "address" => Some(FieldValue::from(self.address.as_str())),
            "city" => Some(FieldValue::from(self.city.as_str())),
            "country" => Some(FieldValue::from(self.country.as_str())),
            "phone" => Some(FieldValue::from(self.phone.as_str())),
            "email" => Some(FieldValue::from(self.email.as_str())),
            "employees" => Some(FieldValue::Int(i64::from(self.employees))),
            "status" => Some(FieldValue::from(self.status.as_str())),
            _ => None,
        }
    }

    fn field_values(&self) -> Vec<FieldValue> {
        [
            "id",
            "name",
            "address",
            "city",
            "country",
            "phone",
            "email",
            "employees",
            "status",
        ]
        .into_iter()
        .filter_map(|name| self.field(name))
        .collect()
    }
}

impl Record for Department {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id.get())),
            "name" => Some(FieldValue::from(self.name.as_str())),
            "description" => Some(FieldValue::from(self.description.as_str())),
            "head" => Some(
                self.head
                    .as_deref()
                    .map(FieldValue::from)
                    .unwrap_or(FieldValue::Null),
            ),
            "office" => Some(FieldValue::from(self.office.as_str())),
            "employees" => Some(FieldValue::Int(i64::from(self.employees))),
            "status" => Some(FieldValue::from(self.status.as_str())),
            _ => None,
        }
    }

    fn field_values(&self) -> Vec<FieldValue> {
        [
            "id",
            "name",
            "description",
            "head",
            "office",
            "employees",
            "status",
        ]
        .into_iter()
        .filter_map(|name| self.field(name))
        .collect()
    }
}
