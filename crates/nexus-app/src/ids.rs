// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }

            /// Slug form used in log lines, e.g. `user-3`.
            pub fn slug(self) -> String {
                format!("{}-{}", Self::PREFIX, self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(UserId, "user");
entity_id!(RoleId, "role");
entity_id!(MenuItemId, "menu");
entity_id!(OfficeId, "office");
entity_id!(DepartmentId, "dept");

#[cfg(test)]
mod tests {
    use super::{DepartmentId, UserId};

    #[test]
    fn slug_uses_entity_prefix() {
        assert_eq!(UserId::new(7).slug(), "user-7");
        assert_eq!(DepartmentId::from(2).slug(), "dept-2");
    }
}
