//! Static game datasets loaded once at startup.
//!
//! Three JSON files back the bot: skills (with the decorations and armor that
//! grant them), monster elemental weaknesses, and tempered-monster danger
//! levels. A missing or malformed file never stops the process: it is logged
//! and replaced by an empty dataset of the same shape, so lookups simply miss.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Skill file names, most recent first.
pub const SKILL_FILES: &[&str] = &["updated_mhwilds_skills.json", "mhwilds_skills.json"];
pub const WEAKNESS_FILE: &str = "mhwilds_weakness.json";
pub const TEMPERED_FILE: &str = "mhwilds_tempered_monsters.json";

/// Errors that can occur when reading a dataset file.
#[derive(Debug)]
pub enum DataError {
    ReadFile { path: PathBuf, source: std::io::Error },
    ParseJson { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFile { path, source } => {
                write!(f, "failed to read dataset '{}': {}", path.display(), source)
            }
            Self::ParseJson { path, source } => {
                write!(f, "failed to parse dataset '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFile { source, .. } => Some(source),
            Self::ParseJson { source, .. } => Some(source),
        }
    }
}

// =============================================================================
// SKILLS
// =============================================================================

/// Effect text for one level of a skill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LevelEffect {
    #[serde(rename = "レベル")]
    pub level: u32,
    #[serde(rename = "効果", default)]
    pub effect: String,
}

/// A decoration granting the skill that lists it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Decoration {
    #[serde(rename = "装飾品名")]
    pub name: String,
    #[serde(rename = "装飾品Lv", default)]
    pub level: u32,
}

/// An armor piece granting the skill that lists it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArmorPiece {
    #[serde(rename = "防具名")]
    pub name: String,
    #[serde(rename = "スキルレベル", default)]
    pub skill_level: u32,
    /// Decoration slot sizes, in file order.
    #[serde(rename = "スロット", default)]
    pub slots: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Skill {
    #[serde(rename = "スキル名")]
    pub name: String,
    #[serde(rename = "効果", default)]
    pub effect: String,
    #[serde(rename = "最大レベル", default)]
    pub max_level: u32,
    #[serde(rename = "レベル別効果", default)]
    pub level_effects: Vec<LevelEffect>,
    #[serde(rename = "装飾品", default)]
    pub decorations: Vec<Decoration>,
    #[serde(rename = "装備", default)]
    pub armor: Vec<ArmorPiece>,
}

pub fn parse_skills(json: &str) -> Result<Vec<Skill>, serde_json::Error> {
    serde_json::from_str(json)
}

// =============================================================================
// WEAKNESSES
// =============================================================================

/// How effective an element is against a monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaknessSymbol {
    /// ◎
    VeryWeak,
    /// ○
    Weak,
    /// △
    Slight,
    /// ×
    Resistant,
    /// -
    Unknown,
}

impl WeaknessSymbol {
    /// Parse a symbol from the dataset. Anything outside the closed set reads as unknown.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "◎" => Self::VeryWeak,
            "○" => Self::Weak,
            "△" => Self::Slight,
            "×" => Self::Resistant,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryWeak => "◎",
            Self::Weak => "○",
            Self::Slight => "△",
            Self::Resistant => "×",
            Self::Unknown => "-",
        }
    }

    /// Human-readable label shown next to the symbol.
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryWeak => "特効",
            Self::Weak => "弱点",
            Self::Slight => "やや有効",
            Self::Resistant => "耐性",
            Self::Unknown => "不明",
        }
    }

    /// Built-in ordering, higher is weaker.
    pub fn rank(self) -> i64 {
        match self {
            Self::VeryWeak => 4,
            Self::Weak => 3,
            Self::Slight => 2,
            Self::Resistant => 1,
            Self::Unknown => 0,
        }
    }

    pub fn is_effective(self) -> bool {
        matches!(self, Self::VeryWeak | Self::Weak)
    }
}

impl fmt::Display for WeaknessSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Elemental weaknesses of one monster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterWeakness {
    pub name: String,
    /// Element name → symbol, in file order.
    pub elements: Vec<(String, WeaknessSymbol)>,
}

impl MonsterWeakness {
    pub fn symbol_for(&self, element: &str) -> Option<WeaknessSymbol> {
        self.elements
            .iter()
            .find(|(name, _)| name == element)
            .map(|(_, symbol)| *symbol)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WeaknessData {
    pub monsters: Vec<MonsterWeakness>,
    /// Optional symbol → rank table supplied by the dataset.
    pub symbol_ranks: HashMap<String, i64>,
    /// Optional element → icon table supplied by the dataset.
    pub element_icons: HashMap<String, String>,
}

impl WeaknessData {
    /// Rank of a symbol, preferring the dataset's table over the built-in order.
    pub fn rank_of(&self, symbol: WeaknessSymbol) -> i64 {
        self.symbol_ranks
            .get(symbol.as_str())
            .copied()
            .unwrap_or_else(|| symbol.rank())
    }

    pub fn icon_for(&self, element: &str) -> Option<&str> {
        self.element_icons
            .get(element)
            .map(String::as_str)
            .filter(|icon| !icon.is_empty())
    }
}

#[derive(Deserialize)]
struct WeaknessFile {
    #[serde(rename = "モンスター情報", default)]
    monsters: Vec<WeaknessRecord>,
    #[serde(rename = "弱点レベル", default)]
    symbol_ranks: HashMap<String, i64>,
    #[serde(rename = "属性アイコン", default)]
    element_icons: HashMap<String, String>,
}

#[derive(Deserialize)]
struct WeaknessRecord {
    #[serde(rename = "モンスター名")]
    name: String,
    #[serde(rename = "弱点", default, deserialize_with = "ordered_pairs")]
    elements: Vec<(String, String)>,
}

/// Deserialize a JSON object into its entries, keeping document order.
fn ordered_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of element name to weakness symbol")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, String>()? {
                pairs.push(entry);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}

pub fn parse_weakness(json: &str) -> Result<WeaknessData, serde_json::Error> {
    let file: WeaknessFile = serde_json::from_str(json)?;
    let monsters = file
        .monsters
        .into_iter()
        .map(|record| MonsterWeakness {
            name: record.name,
            elements: record
                .elements
                .into_iter()
                .map(|(element, symbol)| {
                    let parsed = WeaknessSymbol::parse(&symbol);
                    (element, parsed)
                })
                .collect(),
        })
        .collect();

    Ok(WeaknessData {
        monsters,
        symbol_ranks: file.symbol_ranks,
        element_icons: file.element_icons,
    })
}

// =============================================================================
// TEMPERED MONSTERS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemperedMonster {
    pub name: String,
    /// Danger level, always 1..=3.
    pub level: u8,
}

#[derive(Debug, Clone, Default)]
pub struct TemperedData {
    pub monsters: Vec<TemperedMonster>,
    /// Level (as a string key, e.g. "2") → description.
    pub descriptions: HashMap<String, String>,
}

impl TemperedData {
    pub fn description(&self, level: u8) -> Option<&str> {
        self.descriptions
            .get(&level.to_string())
            .map(String::as_str)
            .filter(|desc| !desc.is_empty())
    }
}

#[derive(Deserialize)]
struct TemperedFile {
    #[serde(rename = "モンスター一覧", default)]
    monsters: Vec<TemperedRecord>,
    #[serde(rename = "歴戦危険度説明", default)]
    descriptions: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TemperedRecord {
    #[serde(rename = "モンスター名")]
    name: String,
    #[serde(rename = "歴戦危険度")]
    level: i64,
}

pub fn parse_tempered(json: &str) -> Result<TemperedData, serde_json::Error> {
    let file: TemperedFile = serde_json::from_str(json)?;
    let mut monsters = Vec::with_capacity(file.monsters.len());
    for record in file.monsters {
        match u8::try_from(record.level) {
            Ok(level @ 1..=3) => monsters.push(TemperedMonster { name: record.name, level }),
            _ => warn!(
                "Dropping tempered entry {} with danger level {} (expected 1-3)",
                record.name, record.level
            ),
        }
    }
    Ok(TemperedData {
        monsters,
        descriptions: file.descriptions,
    })
}

// =============================================================================
// DATASET
// =============================================================================

/// All three datasets. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub skills: Vec<Skill>,
    pub weakness: WeaknessData,
    pub tempered: TemperedData,
}

impl Dataset {
    /// Load every dataset from `data_dir`, falling back to empty data per file.
    pub fn load(data_dir: &Path) -> Self {
        let skill_paths: Vec<PathBuf> = SKILL_FILES.iter().map(|f| data_dir.join(f)).collect();
        let skills = load_or_default("skills", &skill_paths, parse_skills);
        let weakness = load_or_default("weakness", &[data_dir.join(WEAKNESS_FILE)], parse_weakness);
        let tempered = load_or_default("tempered", &[data_dir.join(TEMPERED_FILE)], parse_tempered);

        let dataset = Self { skills, weakness, tempered };
        info!(
            "Loaded datasets: {} skills, {} weakness entries, {} tempered entries",
            dataset.skills.len(),
            dataset.weakness.monsters.len(),
            dataset.tempered.monsters.len()
        );
        dataset
    }

    /// Canonical monster names: weakness entries in file order, then
    /// tempered-only entries.
    pub fn monster_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        let all = self
            .weakness
            .monsters
            .iter()
            .map(|m| &m.name)
            .chain(self.tempered.monsters.iter().map(|m| &m.name));
        for name in all {
            if seen.insert(name.as_str()) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Exact name match, else the first entry whose name contains `name`.
    /// A monster known only from the tempered data gets no substring match.
    pub fn find_weakness(&self, name: &str) -> Option<&MonsterWeakness> {
        let monsters = &self.weakness.monsters;
        if let Some(monster) = monsters.iter().find(|m| m.name == name) {
            return Some(monster);
        }
        if self.tempered.monsters.iter().any(|m| m.name == name) {
            return None;
        }
        monsters.iter().find(|m| m.name.contains(name))
    }

    /// Exact name match, else the first entry whose name contains `name`.
    /// A monster known only from the weakness data gets no substring match.
    pub fn find_tempered(&self, name: &str) -> Option<&TemperedMonster> {
        let monsters = &self.tempered.monsters;
        if let Some(monster) = monsters.iter().find(|m| m.name == name) {
            return Some(monster);
        }
        if self.weakness.monsters.iter().any(|m| m.name == name) {
            return None;
        }
        monsters.iter().find(|m| m.name.contains(name))
    }

    pub fn tempered_level(&self, exact_name: &str) -> Option<u8> {
        self.tempered
            .monsters
            .iter()
            .find(|m| m.name == exact_name)
            .map(|m| m.level)
    }
}

fn read_dataset<T>(
    path: &Path,
    parse: fn(&str) -> Result<T, serde_json::Error>,
) -> Result<T, DataError> {
    let json = std::fs::read_to_string(path).map_err(|e| DataError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&json).map_err(|e| DataError::ParseJson {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read the first existing candidate; any failure yields `T::default()`.
fn load_or_default<T: Default>(
    what: &str,
    candidates: &[PathBuf],
    parse: fn(&str) -> Result<T, serde_json::Error>,
) -> T {
    let Some(path) = candidates.iter().find(|p| p.exists()) else {
        warn!("No {what} dataset found (tried {:?}), starting empty", candidates);
        return T::default();
    };

    match read_dataset(path, parse) {
        Ok(data) => {
            info!("Loaded {what} dataset from {:?}", path);
            data
        }
        Err(e) => {
            warn!("{e}; serving {what} lookups from an empty dataset");
            T::default()
        }
    }
}
