//! Monster weakness and tempered-level lookups.

use crate::bot::data::{Dataset, MonsterWeakness, TemperedMonster, WeaknessSymbol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedElement<'a> {
    pub element: &'a str,
    pub symbol: WeaknessSymbol,
    pub icon: Option<&'a str>,
}

/// Weaknesses of one monster, strongest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaknessReport<'a> {
    pub monster: &'a MonsterWeakness,
    pub elements: Vec<RankedElement<'a>>,
    pub tempered_level: Option<u8>,
}

impl<'a> WeaknessReport<'a> {
    /// Elements marked ◎ or ○, in ranked order.
    pub fn effective_elements(&self) -> impl Iterator<Item = &RankedElement<'a>> + '_ {
        self.elements.iter().filter(|e| e.symbol.is_effective())
    }
}

pub fn monster_weakness<'a>(data: &'a Dataset, name: &str) -> Option<WeaknessReport<'a>> {
    let monster = data.find_weakness(name)?;
    let weakness = &data.weakness;

    let mut elements: Vec<RankedElement> = monster
        .elements
        .iter()
        .map(|(element, symbol)| RankedElement {
            element,
            symbol: *symbol,
            icon: weakness.icon_for(element),
        })
        .collect();
    // Stable: equal ranks keep file order.
    elements.sort_by_key(|e| std::cmp::Reverse(weakness.rank_of(e.symbol)));

    Some(WeaknessReport {
        monster,
        elements,
        tempered_level: data.tempered_level(&monster.name),
    })
}

/// Monsters weak to one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementReport<'a> {
    pub element: String,
    pub very_weak: Vec<&'a str>,
    pub weak: Vec<&'a str>,
}

impl ElementReport<'_> {
    pub fn is_empty(&self) -> bool {
        self.very_weak.is_empty() && self.weak.is_empty()
    }
}

/// `element` carries the "属性" suffix, matching the dataset keys.
pub fn weakness_by_element<'a>(data: &'a Dataset, element: &str) -> ElementReport<'a> {
    let mut very_weak = Vec::new();
    let mut weak = Vec::new();
    for monster in &data.weakness.monsters {
        match monster.symbol_for(element) {
            Some(WeaknessSymbol::VeryWeak) => very_weak.push(monster.name.as_str()),
            Some(WeaknessSymbol::Weak) => weak.push(monster.name.as_str()),
            _ => {}
        }
    }
    very_weak.sort_unstable();
    weak.sort_unstable();
    ElementReport {
        element: element.to_string(),
        very_weak,
        weak,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelReport<'a> {
    pub level: u8,
    pub description: Option<&'a str>,
    pub monsters: Vec<&'a str>,
}

pub fn tempered_by_level(data: &Dataset, level: u8) -> LevelReport<'_> {
    let mut monsters: Vec<&str> = data
        .tempered
        .monsters
        .iter()
        .filter(|m| m.level == level)
        .map(|m| m.name.as_str())
        .collect();
    monsters.sort_unstable();
    LevelReport {
        level,
        description: data.tempered.description(level),
        monsters,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemperedReport<'a> {
    pub monster: &'a TemperedMonster,
    pub description: Option<&'a str>,
    /// Other monsters sharing the danger level, sorted.
    pub same_level: Vec<&'a str>,
}

pub fn tempered_by_monster<'a>(data: &'a Dataset, name: &str) -> Option<TemperedReport<'a>> {
    let monster = data.find_tempered(name)?;
    let mut same_level: Vec<&str> = data
        .tempered
        .monsters
        .iter()
        .filter(|m| m.level == monster.level && m.name != monster.name)
        .map(|m| m.name.as_str())
        .collect();
    same_level.sort_unstable();
    Some(TemperedReport {
        monster,
        description: data.tempered.description(monster.level),
        same_level,
    })
}
