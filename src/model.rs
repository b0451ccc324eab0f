use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::block::ContentBlock;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HeaderLayout {
    #[default]
    Centered,
    Left,
    Split,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageHeader {
    pub title: String,
    pub subtitle: String,
    pub image: Option<String>,
    pub text: String,
    pub layout: HeaderLayout,
    pub background_color: String,
    pub text_color: String,
}

impl Default for PageHeader {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            image: None,
            text: String::new(),
            layout: HeaderLayout::Centered,
            background_color: "#1f2937".to_owned(),
            text_color: "#ffffff".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageFooter {
    pub show_company_name: bool,
    pub show_copyright: bool,
    pub show_privacy_link: bool,
    pub custom_text: Option<String>,
}

impl Default for PageFooter {
    fn default() -> Self {
        Self {
            show_company_name: true,
            show_copyright: true,
            show_privacy_link: true,
            custom_text: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageDesign {
    pub primary_color: String,
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
    pub max_width: u32,
    pub border_radius: u32,
}

impl Default for PageDesign {
    fn default() -> Self {
        Self {
            primary_color: "#2563eb".to_owned(),
            background_color: "#ffffff".to_owned(),
            text_color: "#1f2937".to_owned(),
            font_family: "Inter, system-ui, sans-serif".to_owned(),
            max_width: 800,
            border_radius: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LandingPage {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub header: PageHeader,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    #[serde(default)]
    pub footer: PageFooter,
    #[serde(default)]
    pub design: PageDesign,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(default)]
    pub published: bool,
}

impl LandingPage {
    pub fn ordered_blocks(&self) -> Vec<&ContentBlock> {
        let mut blocks: Vec<&ContentBlock> = self.blocks.iter().collect();
        blocks.sort_by_key(|b| b.order);
        blocks
    }
}

/// Shallow patch applied by `update_page`. `None` leaves a field unchanged;
/// the SEO fields take `Some(None)` to clear them.
#[derive(Debug, Clone, Default)]
pub struct PagePatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub header: Option<PageHeader>,
    pub blocks: Option<Vec<ContentBlock>>,
    pub footer: Option<PageFooter>,
    pub design: Option<PageDesign>,
    pub seo_title: Option<Option<String>>,
    pub seo_description: Option<Option<String>>,
    pub published: Option<bool>,
}

impl PagePatch {
    pub fn published(published: bool) -> Self {
        Self {
            published: Some(published),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::Editor => f.write_str("editor"),
        }
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            other => anyhow::bail!("unknown role: {other}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CookieCategories {
    pub necessary: bool,
    pub analytics: bool,
    pub marketing: bool,
    pub preferences: bool,
}

impl Default for CookieCategories {
    fn default() -> Self {
        Self {
            necessary: true,
            analytics: false,
            marketing: false,
            preferences: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub cookie_banner_enabled: bool,
    pub cookie_categories: CookieCategories,
    pub company_name: String,
    pub company_logo: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            cookie_banner_enabled: true,
            cookie_categories: CookieCategories::default(),
            company_name: "My Company".to_owned(),
            company_logo: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub data_uri: String,
    pub uploaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_fill_missing_fields_with_defaults() -> anyhow::Result<()> {
        let settings: AppSettings =
            serde_json::from_str(r#"{"companyName":"Acme","cookieBannerEnabled":false}"#)?;
        assert_eq!(settings.company_name, "Acme");
        assert!(!settings.cookie_banner_enabled);
        assert!(settings.cookie_categories.necessary);
        Ok(())
    }

    #[test]
    fn role_round_trips_through_text() -> anyhow::Result<()> {
        assert_eq!("Admin".parse::<Role>()?, Role::Admin);
        assert_eq!(Role::Editor.to_string(), "editor");
        assert!("owner".parse::<Role>().is_err());
        Ok(())
    }
}
