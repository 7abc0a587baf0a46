//! Skill lookup by skill, decoration, or armor name.

use crate::bot::data::{ArmorPiece, Decoration, Skill};

/// How a skill was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillMatch<'a> {
    ByName,
    ByDecoration(&'a Decoration),
    ByArmor(&'a ArmorPiece),
}

impl SkillMatch<'_> {
    /// Label used in the reply header, e.g. `装飾品「攻撃珠」`.
    pub fn label(&self) -> String {
        match self {
            SkillMatch::ByName => "スキル名".to_string(),
            SkillMatch::ByDecoration(deco) => format!("装飾品「{}」", deco.name),
            SkillMatch::ByArmor(armor) => format!("装備「{}」", armor.name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillHit<'a> {
    pub skill: &'a Skill,
    pub matched: SkillMatch<'a>,
}

/// Find the first skill matching `text` as a substring.
///
/// Skill names are tried first, then decoration names, then armor names. Each
/// stage scans in dataset order and the first hit wins; a decoration or armor
/// hit resolves to the skill that lists it.
pub fn search_skill<'a>(skills: &'a [Skill], text: &str) -> Option<SkillHit<'a>> {
    if let Some(skill) = skills.iter().find(|s| s.name.contains(text)) {
        return Some(SkillHit {
            skill,
            matched: SkillMatch::ByName,
        });
    }

    let by_decoration = skills.iter().find_map(|skill| {
        skill
            .decorations
            .iter()
            .find(|d| d.name.contains(text))
            .map(|deco| SkillHit {
                skill,
                matched: SkillMatch::ByDecoration(deco),
            })
    });
    if by_decoration.is_some() {
        return by_decoration;
    }

    skills.iter().find_map(|skill| {
        skill
            .armor
            .iter()
            .find(|a| a.name.contains(text))
            .map(|armor| SkillHit {
                skill,
                matched: SkillMatch::ByArmor(armor),
            })
    })
}
