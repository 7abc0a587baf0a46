//! Bot engine - turns an inbound text into reply messages.

use tracing::{debug, info};

use crate::bot::catalog::Catalog;
use crate::bot::format;
use crate::bot::message::OutboundMessage;
use crate::bot::monsters;
use crate::bot::settings::{DisplaySettings, ImageTarget, SettingsStore};
use crate::bot::skills::search_skill;
use crate::classifier::{Intent, classify};

/// Bot configuration.
#[derive(Debug, Clone, Default)]
pub struct BotConfig {
    /// Image sent with weakness results, if any.
    pub weakness_image_url: Option<String>,
    /// Image sent with tempered-monster results, if any.
    pub tempered_image_url: Option<String>,
}

/// The bot engine.
pub struct BotEngine {
    catalog: Catalog,
    settings: SettingsStore,
    config: BotConfig,
}

impl BotEngine {
    pub fn new(catalog: Catalog, config: BotConfig) -> Self {
        Self {
            catalog,
            settings: SettingsStore::new(),
            config,
        }
    }

    #[cfg(test)]
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Build the reply for one text message. Never fails: every input ends in
    /// at least one text message.
    pub fn handle_text(&self, user_id: Option<&str>, text: &str) -> Vec<OutboundMessage> {
        let intent = classify(text, &self.catalog);
        let preview: String = text.chars().take(50).collect();
        info!("Message from {}: \"{preview}\" → {:?}", user_id.unwrap_or("unknown"), intent);
        let messages = self.respond(user_id, intent);
        if let Some(reply) = messages.first().and_then(OutboundMessage::as_text) {
            debug!("Reply ({} messages): {:?}", messages.len(), reply.lines().next().unwrap_or(""));
        }
        messages
    }

    pub fn respond(&self, user_id: Option<&str>, intent: Intent) -> Vec<OutboundMessage> {
        let data = self.catalog.data();
        match intent {
            Intent::ImageMenu { enable } => vec![OutboundMessage::with_quick_reply(
                format::image_menu_prompt(enable),
                &format::image_menu_buttons(enable),
            )],
            Intent::SetImageDisplay { target, enable } => {
                let Some(user_id) = user_id else {
                    return vec![OutboundMessage::text(format::SETTINGS_NEED_USER)];
                };
                let change = self.settings.set(user_id, target, enable);
                debug!(
                    "Display settings for {user_id}: {:?} ({} users tracked)",
                    change.after,
                    self.settings.len()
                );
                vec![OutboundMessage::text(format::setting_change(&change))]
            }
            Intent::ShowSettings => {
                let settings = self.display_settings(user_id);
                vec![OutboundMessage::text(format::current_settings(&settings))]
            }
            Intent::Help => vec![OutboundMessage::text(format::HELP_TEXT)],
            Intent::WeaknessByElement(element) => {
                let report = monsters::weakness_by_element(data, &element);
                let text = format::element_weakness(&report);
                self.with_image(user_id, ImageTarget::Weakness, text, !report.is_empty())
            }
            Intent::WeaknessByMonster(name) => match monsters::monster_weakness(data, &name) {
                Some(report) => {
                    let text = format::monster_weakness(&report);
                    self.with_image(user_id, ImageTarget::Weakness, text, true)
                }
                None => vec![OutboundMessage::text(format::monster_not_found(&name))],
            },
            Intent::TemperedByLevel(level) => {
                let report = monsters::tempered_by_level(data, level);
                let text = format::tempered_level(&report);
                self.with_image(user_id, ImageTarget::Tempered, text, !report.monsters.is_empty())
            }
            Intent::TemperedByMonster(name) => match monsters::tempered_by_monster(data, &name) {
                Some(report) => {
                    let text = format::tempered_monster(&report);
                    self.with_image(user_id, ImageTarget::Tempered, text, true)
                }
                None => vec![OutboundMessage::text(format::tempered_not_found(&name))],
            },
            Intent::SkillSearch(text) => {
                if text.is_empty() {
                    return vec![OutboundMessage::text(format::EMPTY_QUERY)];
                }
                let reply = match search_skill(&data.skills, &text) {
                    Some(hit) => format::skill(&hit),
                    None => format::skill_not_found(&text),
                };
                vec![OutboundMessage::text(reply)]
            }
        }
    }

    fn display_settings(&self, user_id: Option<&str>) -> DisplaySettings {
        match user_id {
            Some(id) => self.settings.get_or_default(id),
            None => DisplaySettings::default(),
        }
    }

    /// Text reply, followed by the image for `kind` when the lookup succeeded
    /// and the user has that image enabled.
    fn with_image(
        &self,
        user_id: Option<&str>,
        kind: ImageTarget,
        text: String,
        found: bool,
    ) -> Vec<OutboundMessage> {
        let mut messages = vec![OutboundMessage::text(text)];
        if !found {
            return messages;
        }

        let settings = self.display_settings(user_id);
        let (show, url) = match kind {
            ImageTarget::Tempered => (settings.show_tempered_image, &self.config.tempered_image_url),
            _ => (settings.show_weakness_image, &self.config.weakness_image_url),
        };
        if let Some(url) = url.as_deref().filter(|_| show) {
            messages.push(OutboundMessage::image(url));
        }
        messages
    }
}
