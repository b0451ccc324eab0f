use std::sync::Arc;

use chrono::Utc;

use crate::error::{Error, Result};
use crate::kv::KeyValueStore;
use crate::model::{Role, User, UserPatch};
use crate::slug::generate_id;
use crate::storage::StorageAccessor;

const DEFAULT_ADMIN_NAME: &str = "Administrator";
const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

#[derive(Debug)]
pub struct UserDirectory<S> {
    storage: Arc<StorageAccessor<S>>,
}

impl<S: KeyValueStore> UserDirectory<S> {
    pub fn new(storage: Arc<StorageAccessor<S>>) -> Self {
        Self { storage }
    }

    /// Stored users. An empty store is seeded with a default admin.
    pub fn users(&self) -> Result<Vec<User>> {
        let users = self.storage.get_users()?;
        if !users.is_empty() {
            return Ok(users);
        }

        let seeded = vec![User {
            id: generate_id(),
            name: DEFAULT_ADMIN_NAME.to_owned(),
            email: DEFAULT_ADMIN_EMAIL.to_owned(),
            role: Role::Admin,
            created_at: Utc::now(),
        }];
        self.storage.save_users(&seeded)?;
        tracing::info!(email = DEFAULT_ADMIN_EMAIL, "seeded default admin user");
        Ok(seeded)
    }

    pub fn add_user(&self, name: &str, email: &str, role: Role) -> Result<User> {
        let mut users = self.users()?;
        let user = User {
            id: generate_id(),
            name: name.to_owned(),
            email: email.to_owned(),
            role,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        self.storage.save_users(&users)?;
        tracing::info!(user_id = %user.id, %role, "added user");
        Ok(user)
    }

    pub fn update_user(&self, id: &str, patch: UserPatch) -> Result<User> {
        let mut users = self.users()?;
        let demotes = patch.role.is_some_and(|role| role != Role::Admin);
        if demotes && is_last_admin(&users, id) {
            return Err(Error::LastAdmin);
        }

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Err(Error::UserNotFound { id: id.to_owned() });
        };
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        let updated = user.clone();

        self.storage.save_users(&users)?;
        self.refresh_current_user(&updated)?;
        Ok(updated)
    }

    pub fn delete_user(&self, id: &str) -> Result<()> {
        let mut users = self.users()?;
        if !users.iter().any(|u| u.id == id) {
            return Err(Error::UserNotFound { id: id.to_owned() });
        }
        if is_last_admin(&users, id) {
            return Err(Error::LastAdmin);
        }

        users.retain(|u| u.id != id);
        self.storage.save_users(&users)?;
        if self.current_user()?.is_some_and(|u| u.id == id) {
            self.storage.clear_current_user()?;
        }
        tracing::info!(user_id = %id, "deleted user");
        Ok(())
    }

    pub fn set_current_user(&self, id: &str) -> Result<User> {
        let users = self.users()?;
        let Some(user) = users.into_iter().find(|u| u.id == id) else {
            return Err(Error::UserNotFound { id: id.to_owned() });
        };
        self.storage.save_current_user(&user)?;
        Ok(user)
    }

    pub fn current_user(&self) -> Result<Option<User>> {
        Ok(self.storage.get_current_user()?)
    }

    pub fn logout(&self) -> Result<()> {
        self.storage.clear_current_user()?;
        Ok(())
    }

    fn refresh_current_user(&self, updated: &User) -> Result<()> {
        if self.current_user()?.is_some_and(|u| u.id == updated.id) {
            self.storage.save_current_user(updated)?;
        }
        Ok(())
    }
}

fn is_last_admin(users: &[User], id: &str) -> bool {
    let mut admins = users.iter().filter(|u| u.role == Role::Admin);
    match (admins.next(), admins.next()) {
        (Some(only), None) => only.id == id,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn directory() -> UserDirectory<MemoryStore> {
        UserDirectory::new(Arc::new(StorageAccessor::new(MemoryStore::new())))
    }

    #[test]
    fn first_read_seeds_a_single_admin() -> Result<()> {
        let dir = directory();
        let users = dir.users()?;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Admin);
        assert_eq!(dir.users()?, users);
        Ok(())
    }

    #[test]
    fn deleting_the_last_admin_is_rejected() -> Result<()> {
        let dir = directory();
        let admin = dir.users()?.remove(0);
        dir.add_user("Eve", "eve@example.com", Role::Editor)?;
        let before = dir.users()?;

        let err = dir.delete_user(&admin.id).expect_err("last admin");
        assert!(matches!(err, Error::LastAdmin));
        assert_eq!(dir.users()?, before);
        Ok(())
    }

    #[test]
    fn admin_can_be_deleted_when_another_remains() -> Result<()> {
        let dir = directory();
        let admin = dir.users()?.remove(0);
        dir.add_user("Bob", "bob@example.com", Role::Admin)?;

        dir.delete_user(&admin.id)?;
        let users = dir.users()?;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Bob");
        Ok(())
    }

    #[test]
    fn demoting_the_last_admin_is_rejected() -> Result<()> {
        let dir = directory();
        let admin = dir.users()?.remove(0);
        let patch = UserPatch {
            role: Some(Role::Editor),
            ..UserPatch::default()
        };
        assert!(matches!(
            dir.update_user(&admin.id, patch),
            Err(Error::LastAdmin)
        ));
        assert_eq!(dir.users()?[0].role, Role::Admin);
        Ok(())
    }

    #[test]
    fn unknown_user_is_reported() {
        let dir = directory();
        assert!(matches!(
            dir.delete_user("ghost"),
            Err(Error::UserNotFound { .. })
        ));
        assert!(matches!(
            dir.set_current_user("ghost"),
            Err(Error::UserNotFound { .. })
        ));
    }

    #[test]
    fn current_user_follows_updates_and_deletion() -> Result<()> {
        let dir = directory();
        let editor = dir.add_user("Eve", "eve@example.com", Role::Editor)?;
        dir.set_current_user(&editor.id)?;

        let patch = UserPatch {
            name: Some("Eve Adams".to_owned()),
            ..UserPatch::default()
        };
        dir.update_user(&editor.id, patch)?;
        assert_eq!(
            dir.current_user()?.map(|u| u.name),
            Some("Eve Adams".to_owned())
        );

        dir.delete_user(&editor.id)?;
        assert_eq!(dir.current_user()?, None);
        Ok(())
    }
}
