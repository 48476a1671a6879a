// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use nexus_app::{
    Department, DepartmentId, MenuItem, MenuItemId, Office, OfficeId, RecordStatus, Role, RoleId,
    User, UserId, UserStatus,
};
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use time::{Duration, OffsetDateTime};

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];
const ROLE_NAMES: [&str; 6] = ["Admin", "Manager", "User", "Accountant", "HR", "Auditor"];
const EMAIL_DOMAINS: [&str; 4] = [
    "example.com",
    "officenexus.test",
    "corp.local",
    "staff.example.org",
];
const CITIES: [(&str, &str); 8] = [
    ("New York", "USA"),
    ("San Francisco", "USA"),
    ("Miami", "USA"),
    ("London", "UK"),
    ("Berlin", "Germany"),
    ("Singapore", "Singapore"),
    ("Toronto", "Canada"),
    ("Sydney", "Australia"),
];
const STREET_NAMES: [&str; 10] = [
    "Main", "Market", "Harbour", "Regent", "Orchard", "King", "Queen", "Park", "River", "Union",
];
const OFFICE_KINDS: [&str; 5] = ["Office", "HQ", "Hub", "Branch", "Campus"];
const DEPARTMENT_NAMES: [&str; 10] = [
    "Engineering",
    "Marketing",
    "Human Resources",
    "Finance",
    "Customer Support",
    "Research",
    "Legal",
    "Operations",
    "Sales",
    "Procurement",
];
const MENU_ICONS: [&str; 8] = [
    "LayoutDashboard",
    "Users",
    "Shield",
    "Menu",
    "Database",
    "Building",
    "Layers",
    "Settings",
];
const WORDS: [&str; 20] = [
    "manage",
    "review",
    "approve",
    "report",
    "budget",
    "staff",
    "access",
    "records",
    "audit",
    "policy",
    "payroll",
    "vendor",
    "contract",
    "office",
    "support",
    "planning",
    "quarterly",
    "regional",
    "internal",
    "training",
];

const TOTAL_PERMISSIONS: u32 = 42;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator for console entities. The same seed always yields the
/// same sequence.
#[derive(Debug, Clone)]
pub struct OfficeFaker {
    rng: DeterministicRng,
}

impl OfficeFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn user(&mut self, id: i64) -> User {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let domain = self.pick(&EMAIL_DOMAINS);
        let status = match self.rng.int_n(5) {
            0 => UserStatus::Inactive,
            1 => UserStatus::Pending,
            _ => UserStatus::Active,
        };
        let minutes = self.int_range_i64(0, 60 * 24 * 90);
        User {
            id: UserId::new(id),
            name: format!("{first} {last}"),
            email: format!(
                "{}.{}@{domain}",
                first.to_ascii_lowercase(),
                last.to_ascii_lowercase()
            ),
            role: self.pick(&ROLE_NAMES).to_owned(),
            status,
            last_login: fixture_now() - Duration::minutes(minutes),
        }
    }

    pub fn users(&mut self, count: usize) -> Vec<User> {
        (1..=count as i64).map(|id| self.user(id)).collect()
    }

    pub fn role(&mut self, id: i64) -> Role {
        let permissions = self.int_range_i64(1, i64::from(TOTAL_PERMISSIONS)) as u32;
        Role {
            id: RoleId::new(id),
            name: self.pick(&ROLE_NAMES).to_owned(),
            description: self.sentence(4, 9),
            permissions,
            total_permissions: TOTAL_PERMISSIONS,
            users: self.int_range_i64(0, 30) as u32,
            is_default: false,
        }
    }

    pub fn office(&mut self, id: i64) -> Office {
        let (city, country) = CITIES[self.rng.int_n(CITIES.len())];
        let street = self.pick(&STREET_NAMES);
        let kind = self.pick(&OFFICE_KINDS);
        let status = if self.rng.int_n(4) == 0 {
            RecordStatus::Inactive
        } else {
            RecordStatus::Active
        };
        Office {
            id: OfficeId::new(id),
            name: format!("{city} {kind}"),
            address: format!("{} {street} Street", self.int_range_i64(1, 999)),
            city: city.to_owned(),
            country: country.to_owned(),
            phone: format!(
                "+1 ({:03}) {:03}-{:04}",
                self.int_range_i64(200, 999),
                self.int_range_i64(200, 999),
                self.int_range_i64(0, 9_999),
            ),
            email: format!(
                "{}@officenexus.test",
                city.to_ascii_lowercase().replace(' ', "")
            ),
            employees: match status {
                RecordStatus::Active => self.int_range_i64(5, 150) as u32,
                RecordStatus::Inactive => 0,
            },
            status,
        }
    }

    pub fn department(&mut self, id: i64, office: &str) -> Department {
        let head = if self.rng.bool() {
            Some(format!(
                "{} {}",
                self.pick(&FIRST_NAMES),
                self.pick(&LAST_NAMES)
            ))
        } else {
            None
        };
        Department {
            id: DepartmentId::new(id),
            name: self.pick(&DEPARTMENT_NAMES).to_owned(),
            description: self.sentence(3, 8),
            head,
            office: office.to_owned(),
            employees: self.int_range_i64(0, 60) as u32,
            status: RecordStatus::Active,
        }
    }

    pub fn menu_item(&mut self, id: i64, parent: Option<MenuItemId>) -> MenuItem {
        let title = self.pick(&WORDS);
        let mut label = title.to_owned();
        if let Some(first) = label.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        let role_count = self.int_range_i64(1, 3) as usize;
        let mut roles = Vec::with_capacity(role_count);
        while roles.len() < role_count {
            let role = self.pick(&ROLE_NAMES).to_owned();
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        MenuItem {
            id: MenuItemId::new(id),
            title: label,
            path: format!("/{title}"),
            icon: self.pick(&MENU_ICONS).to_owned(),
            parent,
            order: self.int_range_i64(1, 9) as i32,
            visible: self.rng.int_n(5) != 0,
            roles,
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range_i64(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn sentence(&mut self, min_words: usize, max_words: usize) -> String {
        let count = self.int_range_i64(min_words as i64, max_words as i64) as usize;
        let mut parts = Vec::with_capacity(count);
        for _ in 0..count {
            parts.push(self.pick(&WORDS).to_owned());
        }
        let mut sentence = parts.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let config_path = dir.path().join("config.toml");
    Ok((dir, config_path))
}

pub fn fixture_datetime() -> &'static str {
    "2026-02-19T12:34:56Z"
}

/// Fixed instant the fakers and demo data are anchored to.
pub fn fixture_now() -> OffsetDateTime {
    // 2026-02-19T12:34:56Z
    OffsetDateTime::from_unix_timestamp(1_771_504_496).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

/// Plain JSON records for exercising the table without domain types.
pub fn json_records(value: Value) -> Vec<Map<String, Value>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        Value::Object(map) => vec![map],
        _ => Vec::new(),
    }
}

pub fn people_fixture() -> Vec<Map<String, Value>> {
    json_records(json!([
        {"name": "Bob", "age": 30},
        {"name": "Al", "age": 25},
        {"name": "Cy", "age": 25},
    ]))
}

#[cfg(test)]
mod tests {
    use super::{
        OfficeFaker, fixture_datetime, fixture_now, json_records, people_fixture,
        temp_config_path,
    };
    use nexus_app::RecordStatus;
    use serde_json::json;
    use std::collections::BTreeSet;
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    #[test]
    fn new_deterministic_seed() {
        let mut left = OfficeFaker::new(42);
        let mut right = OfficeFaker::new(42);
        assert_eq!(left.user(1), right.user(1));
        assert_eq!(left.office(1), right.office(1));
    }

    #[test]
    fn user() {
        let mut faker = OfficeFaker::new(2);
        let user = faker.user(7);

        assert_eq!(user.id.get(), 7);
        assert!(!user.name.is_empty());
        assert!(user.email.contains('@'));
        assert!(!user.role.is_empty());
        assert!(user.last_login <= fixture_now());
    }

    #[test]
    fn users_have_sequential_ids() {
        let mut faker = OfficeFaker::new(3);
        let ids = faker
            .users(5)
            .into_iter()
            .map(|user| user.id.get())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn role_permissions_within_catalogue() {
        let mut faker = OfficeFaker::new(4);
        for id in 1..20 {
            let role = faker.role(id);
            assert!(role.permissions >= 1);
            assert!(role.permissions <= role.total_permissions);
            assert!(role.description.ends_with('.'));
        }
    }

    #[test]
    fn inactive_offices_have_no_employees() {
        let mut found_inactive = false;
        for seed in 0_u64..50_u64 {
            let mut faker = OfficeFaker::new(seed);
            let office = faker.office(1);
            if office.status == RecordStatus::Inactive {
                assert_eq!(office.employees, 0);
                found_inactive = true;
                break;
            }
        }
        assert!(found_inactive);
    }

    #[test]
    fn department_belongs_to_given_office() {
        let mut faker = OfficeFaker::new(5);
        let department = faker.department(3, "Headquarters");
        assert_eq!(department.office, "Headquarters");
        assert!(!department.name.is_empty());
    }

    #[test]
    fn menu_item_roles_are_distinct() {
        let mut faker = OfficeFaker::new(6);
        for id in 1..20 {
            let item = faker.menu_item(id, None);
            let distinct = item.roles.iter().collect::<BTreeSet<_>>();
            assert_eq!(distinct.len(), item.roles.len());
            assert!(item.path.starts_with('/'));
        }
    }

    #[test]
    fn variety_across_seeds() {
        let mut names = BTreeSet::new();
        for seed in 0_u64..20_u64 {
            let mut faker = OfficeFaker::new(seed);
            names.insert(faker.user(1).name);
        }
        assert!(names.len() >= 10, "got {}", names.len());
    }

    #[test]
    fn fixture_now_matches_fixture_datetime() {
        let parsed = OffsetDateTime::parse(fixture_datetime(), &Rfc3339).expect("rfc3339");
        assert_eq!(parsed, fixture_now());
    }

    #[test]
    fn json_records_keeps_objects_only() {
        let records = json_records(json!([{"a": 1}, 2, {"b": null}]));
        assert_eq!(records.len(), 2);
        assert_eq!(people_fixture().len(), 3);
    }

    #[test]
    fn temp_config_path_lives_in_temp_dir() {
        let (dir, path) = temp_config_path().expect("temp dir");
        assert!(path.starts_with(dir.path()));
        assert!(!path.exists());
    }
}
