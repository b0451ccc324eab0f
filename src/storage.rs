use anyhow::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::kv::KeyValueStore;
use crate::model::{AppSettings, LandingPage, MediaItem, User};

pub const PAGES_KEY: &str = "landing_pages";
pub const USERS_KEY: &str = "users";
pub const CURRENT_USER_KEY: &str = "current_user";
pub const SETTINGS_KEY: &str = "app_settings";
pub const MEDIA_KEY: &str = "media_gallery";

#[derive(Debug)]
pub struct StorageAccessor<S> {
    store: S,
}

impl<S: KeyValueStore> StorageAccessor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_pages(&self) -> anyhow::Result<Vec<LandingPage>> {
        Ok(self.read(PAGES_KEY)?.unwrap_or_default())
    }

    pub fn save_pages(&self, pages: &[LandingPage]) -> anyhow::Result<()> {
        self.write(PAGES_KEY, pages)
    }

    pub fn get_users(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.read(USERS_KEY)?.unwrap_or_default())
    }

    pub fn save_users(&self, users: &[User]) -> anyhow::Result<()> {
        self.write(USERS_KEY, users)
    }

    pub fn get_current_user(&self) -> anyhow::Result<Option<User>> {
        self.read(CURRENT_USER_KEY)
    }

    pub fn save_current_user(&self, user: &User) -> anyhow::Result<()> {
        self.write(CURRENT_USER_KEY, user)
    }

    pub fn clear_current_user(&self) -> anyhow::Result<()> {
        self.store
            .remove(CURRENT_USER_KEY)
            .with_context(|| format!("remove {CURRENT_USER_KEY}"))
    }

    pub fn get_settings(&self) -> anyhow::Result<AppSettings> {
        Ok(self.read(SETTINGS_KEY)?.unwrap_or_default())
    }

    pub fn save_settings(&self, settings: &AppSettings) -> anyhow::Result<()> {
        self.write(SETTINGS_KEY, settings)
    }

    pub fn get_media(&self) -> anyhow::Result<Vec<MediaItem>> {
        Ok(self.read(MEDIA_KEY)?.unwrap_or_default())
    }

    pub fn save_media(&self, items: &[MediaItem]) -> anyhow::Result<()> {
        self.write(MEDIA_KEY, items)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        let Some(raw) = self.store.get(key).with_context(|| format!("read {key}"))? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw).with_context(|| format!("parse stored {key}"))?;
        Ok(Some(value))
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let raw = serde_json::to_string(value).with_context(|| format!("serialize {key}"))?;
        self.store
            .set(key, &raw)
            .with_context(|| format!("write {key}"))
    }
}
