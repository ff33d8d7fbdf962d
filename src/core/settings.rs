//! Settings projection.
//!
//! The settings object is persisted wholesale under the `settings` key
//! and hydrated over a fixed schema of defaults: every field carries its
//! own default function, so a missing key resolves to its default and
//! unknown keys in an old payload are ignored. Adding a field is a
//! one-line, type-checked change here.

use crate::repository::Repository;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

fn default_store_name() -> String {
    "E-Commerce DZ".to_string()
}
fn default_phone() -> String {
    String::new()
}
fn default_address() -> String {
    String::new()
}
fn default_welcome_msg() -> String {
    "شكراً لتسوقكم معنا".to_string()
}
fn default_currency() -> String {
    "دج".to_string()
}
fn default_date_format() -> String {
    "dmy".to_string()
}
fn default_lang() -> String {
    "ar".to_string()
}
fn default_theme() -> String {
    "light".to_string()
}
fn default_color() -> String {
    "default".to_string()
}
fn default_font_size() -> u32 {
    15
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_paper_size() -> String {
    "A5".to_string()
}

/// Store identity and behavioral flags consumed by the presentation
/// layer but owned here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_store_name")]
    pub store_name: String,
    #[serde(default = "default_phone")]
    pub phone: String,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_welcome_msg")]
    pub welcome_msg: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_true")]
    pub notif_stock: bool,
    #[serde(default = "default_true")]
    pub notif_debt: bool,
    #[serde(default = "default_false")]
    pub auto_backup: bool,
    #[serde(default = "default_paper_size")]
    pub paper_size: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_name: default_store_name(),
            phone: default_phone(),
            address: default_address(),
            welcome_msg: default_welcome_msg(),
            currency: default_currency(),
            date_format: default_date_format(),
            lang: default_lang(),
            theme: default_theme(),
            color: default_color(),
            font_size: default_font_size(),
            sound_enabled: default_true(),
            notif_stock: default_true(),
            notif_debt: default_true(),
            auto_backup: default_false(),
            paper_size: default_paper_size(),
        }
    }
}

/// A partial settings update from the settings screen. Every field is
/// optional; absent fields leave the current value untouched.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub welcome_msg: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub date_format: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub font_size: Option<u32>,
    #[serde(default)]
    pub sound_enabled: Option<bool>,
    #[serde(default)]
    pub notif_stock: Option<bool>,
    #[serde(default)]
    pub notif_debt: Option<bool>,
    #[serde(default)]
    pub auto_backup: Option<bool>,
    #[serde(default)]
    pub paper_size: Option<String>,
}

impl SettingsPatch {
    /// Folds the patch into `settings`, field by field.
    fn apply(self, settings: &mut Settings) {
        if let Some(v) = self.store_name {
            settings.store_name = v;
        }
        if let Some(v) = self.phone {
            settings.phone = v;
        }
        if let Some(v) = self.address {
            settings.address = v;
        }
        if let Some(v) = self.welcome_msg {
            settings.welcome_msg = v;
        }
        if let Some(v) = self.currency {
            settings.currency = v;
        }
        if let Some(v) = self.date_format {
            settings.date_format = v;
        }
        if let Some(v) = self.lang {
            settings.lang = v;
        }
        if let Some(v) = self.theme {
            settings.theme = v;
        }
        if let Some(v) = self.color {
            settings.color = v;
        }
        if let Some(v) = self.font_size {
            settings.font_size = v;
        }
        if let Some(v) = self.sound_enabled {
            settings.sound_enabled = v;
        }
        if let Some(v) = self.notif_stock {
            settings.notif_stock = v;
        }
        if let Some(v) = self.notif_debt {
            settings.notif_debt = v;
        }
        if let Some(v) = self.auto_backup {
            settings.auto_backup = v;
        }
        if let Some(v) = self.paper_size {
            settings.paper_size = v;
        }
    }
}

/// Merges `patch` into the current settings and persists the whole
/// object. The settings screen calls this on save.
#[instrument(skip(repo, patch))]
pub async fn save(repo: &mut Repository, patch: SettingsPatch) {
    repo.mutate_settings(|settings| patch.apply(settings)).await;
    info!("Settings saved.");
}
