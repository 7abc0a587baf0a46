//! Monster-name aliases.
//!
//! Players rarely type names exactly as the dataset spells them. Two mechanical
//! rules derive shorter forms from each canonical name ("・" removed, "亜種"
//! removed); hand-curated aliases from the config file sit on top and always
//! win over derived ones.

use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, warn};

/// Separator found in compound monster names.
const NAME_SEPARATOR: &str = "・";
/// Suffix marking a variant (subspecies) of a monster.
const VARIANT_SUFFIX: &str = "亜種";

/// Alias → canonical monster name.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    map: BTreeMap<String, String>,
}

impl AliasTable {
    /// Build the table from the canonical name list and curated overrides.
    ///
    /// Curated aliases whose target is not a canonical name, or whose key is
    /// itself a canonical name, are dropped. When two canonical names derive
    /// the same alias the smallest name wins, so the result does not depend
    /// on input order.
    pub fn build(canonical: &[String], curated: &HashMap<String, String>) -> Self {
        let names: HashSet<&str> = canonical.iter().map(String::as_str).collect();
        let mut map = BTreeMap::new();
        let mut kept = HashSet::new();

        for (alias, target) in curated {
            if !names.contains(target.as_str()) {
                warn!("Dropping alias {alias} → {target}: unknown monster");
                continue;
            }
            if names.contains(alias.as_str()) {
                warn!("Dropping alias {alias} → {target}: alias is itself a monster name");
                continue;
            }
            map.insert(alias.clone(), target.clone());
            kept.insert(alias.as_str());
        }

        for name in canonical {
            for marker in [NAME_SEPARATOR, VARIANT_SUFFIX] {
                if !name.contains(marker) {
                    continue;
                }
                let stripped = name.replace(marker, "");
                if stripped.is_empty()
                    || names.contains(stripped.as_str())
                    || kept.contains(stripped.as_str())
                {
                    continue;
                }
                match map.get(&stripped) {
                    Some(existing) if existing <= name => {}
                    _ => {
                        map.insert(stripped, name.clone());
                    }
                }
            }
        }

        debug!("Built alias table with {} entries", map.len());
        Self { map }
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.map.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
