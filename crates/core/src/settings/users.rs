//! Console user list.

use serde::{Deserialize, Serialize};

use super::validate::{Validate, ValidationErrors};
use crate::types::{Email, EmailError, Role, UserStatus};

/// Errors from editing a [`UserList`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserListError {
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("a user with email {0} already exists")]
    Duplicate(String),
    #[error("no user at position {0}")]
    NoSuchUser(usize),
}

/// One console user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub email: Email,
    pub role: Role,
    #[serde(default)]
    pub status: UserStatus,
}

/// Ordered list of console users with unique emails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserList(Vec<UserEntry>);

impl UserList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UserEntry> {
        self.0.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&UserEntry> {
        self.0.get(index)
    }

    /// Returns `true` if an entry has this email, ignoring case.
    #[must_use]
    pub fn contains_email(&self, email: &Email) -> bool {
        self.0.iter().any(|u| u.email.same_address(email))
    }

    /// Appends a new user in the `invited` state.
    ///
    /// # Errors
    ///
    /// Returns [`UserListError::InvalidEmail`] for a malformed address and
    /// [`UserListError::Duplicate`] if the address is already listed. The
    /// list is unchanged on error.
    pub fn invite(&mut self, email: &str, role: Role) -> Result<&UserEntry, UserListError> {
        let email = Email::parse(email)?;
        if self.contains_email(&email) {
            return Err(UserListError::Duplicate(email.into_inner()));
        }
        self.0.push(UserEntry {
            email,
            role,
            status: UserStatus::Invited,
        });
        self.0
            .last()
            .ok_or(UserListError::NoSuchUser(self.0.len()))
    }

    /// Removes the user at `index`, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`UserListError::NoSuchUser`] if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Result<UserEntry, UserListError> {
        if index >= self.0.len() {
            return Err(UserListError::NoSuchUser(index));
        }
        Ok(self.0.remove(index))
    }

    /// Changes the role of the user at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`UserListError::NoSuchUser`] if `index` is out of range.
    pub fn set_role(&mut self, index: usize, role: Role) -> Result<&UserEntry, UserListError> {
        let entry = self
            .0
            .get_mut(index)
            .ok_or(UserListError::NoSuchUser(index))?;
        entry.role = role;
        Ok(entry)
    }

    /// Marks the user at `index` as having accepted their invite.
    ///
    /// # Errors
    ///
    /// Returns [`UserListError::NoSuchUser`] if `index` is out of range.
    pub fn activate(&mut self, index: usize) -> Result<&UserEntry, UserListError> {
        let entry = self
            .0
            .get_mut(index)
            .ok_or(UserListError::NoSuchUser(index))?;
        entry.status = UserStatus::Active;
        Ok(entry)
    }
}

impl From<Vec<UserEntry>> for UserList {
    fn from(users: Vec<UserEntry>) -> Self {
        Self(users)
    }
}

impl<'a> IntoIterator for &'a UserList {
    type Item = &'a UserEntry;
    type IntoIter = std::slice::Iter<'a, UserEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Validate for UserList {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (i, user) in self.0.iter().enumerate() {
            let field = format!("users[{i}].email");
            // Emails arrive through a transparent deserializer, so re-check them here.
            errors.check(&field, Email::parse(user.email.as_str()));
            if self.0.iter().take(i).any(|u| u.email.same_address(&user.email)) {
                errors.push(field, format!("{} is already listed", user.email));
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> UserList {
        let mut users = UserList::new();
        users.invite("owner@example.com", Role::Owner).unwrap();
        users.invite("staff@example.com", Role::Staff).unwrap();
        users.invite("viewer@example.com", Role::Viewer).unwrap();
        users
    }

    #[test]
    fn test_invite_appends_invited() {
        let users = sample();
        assert_eq!(users.len(), 3);
        let last = users.get(2).unwrap();
        assert_eq!(last.email.as_str(), "viewer@example.com");
        assert_eq!(last.status, UserStatus::Invited);
    }

    #[test]
    fn test_invite_duplicate_rejected() {
        let mut users = sample();
        let err = users.invite("STAFF@example.com", Role::Viewer).unwrap_err();
        assert!(matches!(err, UserListError::Duplicate(_)));
        assert_eq!(users.len(), 3);
    }

    #[test]
    fn test_invite_invalid_email_rejected() {
        let mut users = sample();
        let err = users.invite("not-an-email", Role::Staff).unwrap_err();
        assert!(matches!(err, UserListError::InvalidEmail(_)));
        assert_eq!(users.len(), 3);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut users = sample();
        let removed = users.remove(1).unwrap();
        assert_eq!(removed.email.as_str(), "staff@example.com");
        let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["owner@example.com", "viewer@example.com"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut users = sample();
        assert_eq!(users.remove(3), Err(UserListError::NoSuchUser(3)));
        assert_eq!(users.len(), 3);
    }

    #[test]
    fn test_set_role_and_activate() {
        let mut users = sample();
        users.set_role(2, Role::Staff).unwrap();
        users.activate(2).unwrap();
        let entry = users.get(2).unwrap();
        assert_eq!(entry.role, Role::Staff);
        assert_eq!(entry.status, UserStatus::Active);
        assert!(users.activate(9).is_err());
    }

    #[test]
    fn test_validate_catches_duplicates_from_json() {
        let users: UserList = serde_json::from_str(
            r#"[
                {"email":"a@example.com","role":"owner","status":"active"},
                {"email":"A@example.com","role":"staff"}
            ]"#,
        )
        .unwrap();
        let errors = users.validate().unwrap_err();
        assert!(errors.has("users[1].email"));
        assert!(!errors.has("users[0].email"));
    }

    #[test]
    fn test_validate_catches_malformed_email_from_json() {
        let users: UserList =
            serde_json::from_str(r#"[{"email":"nobody","role":"viewer"}]"#).unwrap();
        assert!(users.validate().unwrap_err().has("users[0].email"));
    }

    #[test]
    fn test_status_defaults_to_invited() {
        let users: UserList =
            serde_json::from_str(r#"[{"email":"a@example.com","role":"viewer"}]"#).unwrap();
        assert_eq!(users.get(0).unwrap().status, UserStatus::Invited);
    }
}
