//! Read-only lookup context shared by the classifier and every handler.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::bot::alias::AliasTable;
use crate::bot::data::Dataset;

/// Datasets plus the canonical monster list and alias table derived from them.
pub struct Catalog {
    data: Dataset,
    aliases: AliasTable,
    names: Vec<String>,
    known: HashSet<String>,
}

impl Catalog {
    pub fn new(data: Dataset, curated_aliases: &HashMap<String, String>) -> Self {
        let names = data.monster_names();
        let aliases = AliasTable::build(&names, curated_aliases);
        for (alias, name) in aliases.iter() {
            trace!("Alias {alias} → {name}");
        }
        let known = names.iter().cloned().collect();
        Self {
            data,
            aliases,
            names,
            known,
        }
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Canonical monster names in dataset order.
    pub fn monster_names(&self) -> &[String] {
        &self.names
    }

    /// Canonical name for `text` if it is a monster name or an alias of one.
    pub fn resolve_monster(&self, text: &str) -> Option<&str> {
        if let Some(name) = self.known.get(text) {
            return Some(name.as_str());
        }
        self.aliases.get(text)
    }

    /// Like [`Self::resolve_monster`], falling back to the first canonical
    /// name containing `text`.
    pub fn find_monster(&self, text: &str) -> Option<&str> {
        if text.is_empty() {
            return None;
        }
        self.resolve_monster(text).or_else(|| {
            self.names
                .iter()
                .find(|name| name.contains(text))
                .map(String::as_str)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::data::{parse_tempered, parse_weakness};

    fn catalog() -> Catalog {
        let data = Dataset {
            weakness: parse_weakness(
                r#"{"モンスター情報": [
                    {"モンスター名": "ゴア・マガラ"},
                    {"モンスター名": "リオレウス"},
                    {"モンスター名": "リオレウス亜種"}
                ]}"#,
            )
            .unwrap(),
            tempered: parse_tempered(
                r#"{"モンスター一覧": [{"モンスター名": "チャタカブラ", "歴戦危険度": 1}]}"#,
            )
            .unwrap(),
            ..Default::default()
        };
        let curated = HashMap::from([("レウス".to_string(), "リオレウス".to_string())]);
        Catalog::new(data, &curated)
    }

    #[test]
    fn test_resolves_canonical_and_aliases() {
        let catalog = catalog();
        assert_eq!(catalog.resolve_monster("チャタカブラ"), Some("チャタカブラ"));
        assert_eq!(catalog.resolve_monster("ゴアマガラ"), Some("ゴア・マガラ"));
        assert_eq!(catalog.resolve_monster("レウス"), Some("リオレウス"));
        assert_eq!(catalog.resolve_monster("マガラ"), None);
    }

    #[test]
    fn test_find_falls_back_to_substring_in_order() {
        let catalog = catalog();
        assert_eq!(catalog.find_monster("マガラ"), Some("ゴア・マガラ"));
        assert_eq!(catalog.find_monster("オレウス"), Some("リオレウス"));
        assert_eq!(catalog.find_monster(""), None);
        assert_eq!(catalog.find_monster("ラージャン"), None);
    }

    #[test]
    fn test_canonical_list_spans_both_datasets() {
        let catalog = catalog();
        assert_eq!(catalog.monster_names().len(), 4);
        assert_eq!(catalog.monster_names()[3], "チャタカブラ");
        assert_eq!(catalog.aliases().len(), 2);
    }
}
