//! Per-user image display settings.
//!
//! Kept in process memory only. A user's entry is created with the default
//! (both images shown) the first time it is read or written.

use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    pub show_weakness_image: bool,
    pub show_tempered_image: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_weakness_image: true,
            show_tempered_image: true,
        }
    }
}

/// Which image setting a command changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    All,
    Weakness,
    Tempered,
}

/// Settings before and after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingChange {
    pub target: ImageTarget,
    pub before: DisplaySettings,
    pub after: DisplaySettings,
}

impl SettingChange {
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

#[derive(Debug, Default)]
pub struct SettingsStore {
    users: Mutex<HashMap<String, DisplaySettings>>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current settings for `user_id`, inserting the defaults on first access.
    pub fn get_or_default(&self, user_id: &str) -> DisplaySettings {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        *users.entry(user_id.to_string()).or_default()
    }

    /// Turn the targeted image(s) on or off.
    pub fn set(&self, user_id: &str, target: ImageTarget, enable: bool) -> SettingChange {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        let settings = users.entry(user_id.to_string()).or_default();
        let before = *settings;
        if matches!(target, ImageTarget::All | ImageTarget::Weakness) {
            settings.show_weakness_image = enable;
        }
        if matches!(target, ImageTarget::All | ImageTarget::Tempered) {
            settings.show_tempered_image = enable;
        }
        SettingChange {
            target,
            before,
            after: *settings,
        }
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
