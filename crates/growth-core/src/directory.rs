//! # User Directory
//!
//! Administrative user list behind the settings page. Roles are displayed,
//! never enforced.

use crate::error::{GrowthError, GrowthResult, Issue, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Employee,
}

impl Role {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Manager => "Manager",
            Self::Employee => "Employee",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub status: UserStatus,
}

/// Contents of the add/edit user dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
}

impl UserDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        let issues = [
            ("name", &self.name),
            ("email", &self.email),
            ("department", &self.department),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| Issue::missing_field(field))
        .collect();
        ValidationError::check(issues)
    }
}

/// Users keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirectory {
    users: BTreeMap<u64, User>,
    next_id: u64,
}

impl UserDirectory {
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
            next_id,
        }
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&User> {
        self.users.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Number of users holding each role.
    #[must_use]
    pub fn count_by_role(&self) -> BTreeMap<Role, usize> {
        let mut counts = BTreeMap::new();
        for user in self.users.values() {
            *counts.entry(user.role).or_insert(0) += 1;
        }
        counts
    }

    /// Add a user; new users start active.
    pub fn add(&mut self, draft: UserDraft) -> GrowthResult<&User> {
        draft.validate()?;
        let id = self.next_id;
        self.next_id += 1;
        let user = User {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
            department: draft.department,
            status: UserStatus::Active,
        };
        Ok(self.users.entry(id).or_insert(user))
    }

    /// Replace the editable fields of an existing user. Status is kept.
    pub fn update(&mut self, id: u64, draft: UserDraft) -> GrowthResult<&User> {
        draft.validate()?;
        let user = self.users.get_mut(&id).ok_or(GrowthError::UnknownUser(id))?;
        user.name = draft.name;
        user.email = draft.email;
        user.role = draft.role;
        user.department = draft.department;
        Ok(user)
    }

    pub fn remove(&mut self, id: u64) -> GrowthResult<User> {
        self.users.remove(&id).ok_or(GrowthError::UnknownUser(id))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueKind;

    fn draft(name: &str, role: Role) -> UserDraft {
        UserDraft {
            name: name.to_string(),
            email: format!("{}@nordica.com", name.to_lowercase()),
            role,
            department: "RH".to_string(),
        }
    }

    #[test]
    fn add_assigns_ids_and_activates() {
        let mut dir = UserDirectory::default();
        let first = dir.add(draft("Maria", Role::Manager)).map(|u| (u.id, u.status));
        assert_eq!(first, Ok((1, UserStatus::Active)));
        let second = dir.add(draft("Ana", Role::Employee)).map(|u| u.id);
        assert_eq!(second, Ok(2));
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn presence_checks_name_every_missing_field() {
        let mut dir = UserDirectory::default();
        let err = dir.add(UserDraft::default()).unwrap_err();
        let GrowthError::Validation(validation) = err else {
            panic!("expected validation error");
        };
        assert_eq!(validation.subjects(), vec!["name", "email", "department"]);
        assert!(validation.has("email", IssueKind::MissingField));
        assert!(dir.is_empty());
    }

    #[test]
    fn update_keeps_status_and_rejects_unknown() {
        let mut dir = UserDirectory::new(vec![User {
            id: 4,
            name: "Ana Costa".to_string(),
            email: "ana.costa@nordica.com".to_string(),
            role: Role::Employee,
            department: "Marketing".to_string(),
            status: UserStatus::Inactive,
        }]);
        let updated = dir
            .update(4, draft("Ana", Role::Manager))
            .map(|u| (u.role, u.status));
        assert_eq!(updated, Ok((Role::Manager, UserStatus::Inactive)));
        assert_eq!(
            dir.update(9, draft("X", Role::Admin)).unwrap_err(),
            GrowthError::UnknownUser(9)
        );
        assert_eq!(dir.add(draft("Carlos", Role::Admin)).map(|u| u.id), Ok(5));
    }

    #[test]
    fn remove_and_role_counts() {
        let mut dir = UserDirectory::default();
        dir.add(draft("A", Role::Admin)).unwrap();
        dir.add(draft("B", Role::Employee)).unwrap();
        dir.add(draft("C", Role::Employee)).unwrap();

        assert_eq!(dir.count_by_role().get(&Role::Employee), Some(&2));
        assert_eq!(dir.remove(2).map(|u| u.name), Ok("B".to_string()));
        assert_eq!(dir.remove(2).unwrap_err(), GrowthError::UnknownUser(2));
        assert_eq!(dir.count_by_role().get(&Role::Employee), Some(&1));
    }
}
