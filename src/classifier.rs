//! Query classification.
//!
//! Incoming text is tested against an ordered list of rules; the first rule
//! that returns an intent wins. Text that no rule claims is a skill search.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::bot::catalog::Catalog;
use crate::bot::settings::ImageTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Ask which images to turn on (`true`) or off.
    ImageMenu { enable: bool },
    SetImageDisplay { target: ImageTarget, enable: bool },
    ShowSettings,
    Help,
    /// Element name including the "属性" suffix.
    WeaknessByElement(String),
    WeaknessByMonster(String),
    TemperedByLevel(u8),
    TemperedByMonster(String),
    SkillSearch(String),
}

type Rule = fn(&str, &Catalog) -> Option<Intent>;

/// Classification rules, highest priority first.
pub const RULES: &[(&str, Rule)] = &[
    ("settings_command", settings_command),
    ("help", help),
    ("prefix_command", prefix_command),
    ("exact_monster", exact_monster),
    ("element_weakness", element_weakness),
    ("tempered_level", tempered_level),
    ("tempered_monster", tempered_monster),
    ("monster_weakness", monster_weakness),
];

const HELP_TRIGGERS: &[&str] = &["ヘルプ", "help", "使い方"];
const WEAKNESS_WORD: &str = "弱点";
const TEMPERED_WORD: &str = "歴戦";

static ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:弱点\s*)?([火水雷氷龍])(?:属性)?(?:\s*(?:弱点|弱い))?$")
        .expect("element pattern is valid")
});

static TEMPERED_LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^歴戦(?:の個体)?(?:レベル|危険度)?\s*([1-3])$").expect("tempered level pattern is valid")
});

static TEMPERED_MONSTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^歴戦\s+([ァ-ヶー・]+)$").expect("tempered monster pattern is valid")
});

/// Full-width spaces become ASCII spaces; surrounding whitespace is trimmed.
pub fn normalize(text: &str) -> String {
    text.replace('\u{3000}', " ").trim().to_string()
}

pub fn classify(text: &str, catalog: &Catalog) -> Intent {
    let text = normalize(text);
    for (name, rule) in RULES {
        if let Some(intent) = rule(&text, catalog) {
            debug!("Rule {name} matched");
            return intent;
        }
    }
    Intent::SkillSearch(text)
}

fn settings_command(text: &str, _: &Catalog) -> Option<Intent> {
    let intent = match text {
        "画像オン" => Intent::ImageMenu { enable: true },
        "画像オフ" => Intent::ImageMenu { enable: false },
        "画像表示オン" => Intent::SetImageDisplay { target: ImageTarget::All, enable: true },
        "画像表示オフ" => Intent::SetImageDisplay { target: ImageTarget::All, enable: false },
        "弱点画像オン" => Intent::SetImageDisplay { target: ImageTarget::Weakness, enable: true },
        "弱点画像オフ" => Intent::SetImageDisplay { target: ImageTarget::Weakness, enable: false },
        "歴戦画像オン" => Intent::SetImageDisplay { target: ImageTarget::Tempered, enable: true },
        "歴戦画像オフ" => Intent::SetImageDisplay { target: ImageTarget::Tempered, enable: false },
        "設定確認" => Intent::ShowSettings,
        _ => return None,
    };
    Some(intent)
}

fn help(text: &str, _: &Catalog) -> Option<Intent> {
    let lower = text.to_lowercase();
    HELP_TRIGGERS
        .contains(&lower.as_str())
        .then_some(Intent::Help)
}

/// `弱点:名前` / `歴戦：名前`. The name resolves loosely; an unknown name is
/// passed through so the handler can report it.
fn prefix_command(text: &str, catalog: &Catalog) -> Option<Intent> {
    let (word, rest) = [WEAKNESS_WORD, TEMPERED_WORD]
        .into_iter()
        .find_map(|word| text.strip_prefix(word).map(|rest| (word, rest)))?;
    let name = rest
        .strip_prefix(':')
        .or_else(|| rest.strip_prefix('：'))?
        .trim();
    if name.is_empty() {
        return None;
    }

    let name = catalog.find_monster(name).unwrap_or(name).to_string();
    if word == WEAKNESS_WORD {
        Some(Intent::WeaknessByMonster(name))
    } else {
        Some(Intent::TemperedByMonster(name))
    }
}

fn exact_monster(text: &str, catalog: &Catalog) -> Option<Intent> {
    catalog
        .resolve_monster(text)
        .map(|name| Intent::WeaknessByMonster(name.to_string()))
}

fn element_weakness(text: &str, _: &Catalog) -> Option<Intent> {
    let caps = ELEMENT_RE.captures(text)?;
    Some(Intent::WeaknessByElement(format!("{}属性", &caps[1])))
}

fn tempered_level(text: &str, _: &Catalog) -> Option<Intent> {
    let caps = TEMPERED_LEVEL_RE.captures(text)?;
    let level = caps[1].parse().ok()?;
    Some(Intent::TemperedByLevel(level))
}

fn tempered_monster(text: &str, catalog: &Catalog) -> Option<Intent> {
    let caps = TEMPERED_MONSTER_RE.captures(text)?;
    catalog
        .resolve_monster(&caps[1])
        .map(|name| Intent::TemperedByMonster(name.to_string()))
}

/// `名前弱点`, `名前 弱点`, `弱点名前`, `弱点 名前`.
fn monster_weakness(text: &str, catalog: &Catalog) -> Option<Intent> {
    let name = text
        .strip_suffix(WEAKNESS_WORD)
        .map(str::trim_end)
        .or_else(|| text.strip_prefix(WEAKNESS_WORD).map(str::trim_start))?;
    catalog
        .resolve_monster(name)
        .map(|name| Intent::WeaknessByMonster(name.to_string()))
}
