//! Label pools
//!
//! Two read-only lists of labels, "strong" and "weak", handed to the game at
//! startup. Missing or malformed input degrades to empty pools, which simply
//! means that classification never spawns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sim::{Classification, PcgRandom};

/// Built-in strong labels
pub const DEFAULT_STRONG: &[&str] = &[
    "J@ck_2025!", "A9!rT_3k#Z", "M3ena$2048", "S!lver_F0x88", "Kite#Wind_77",
    "C0bAlt!_Nine", "Aur0ra@Sun*", "N!ght_Owl#39", "R1ver$Flow_09", "H@wk-Eye_55",
    "Xy!_93vK#2", "G@laxy-R1ngs_7", "Pyth0n@Flask!", "Djang0_R0cks#", "C0d3C@se_!2",
    "Str0ng&P@ss_01", "Trail#Bl@ze_66", "M00n_L@ke!5", "Gh0st$Guard_33", "S@feK#ey_90",
];

/// Built-in weak labels
pub const DEFAULT_WEAK: &[&str] = &[
    "12345", "password", "qwerty", "111111", "abc123",
    "iloveyou", "admin", "letmein", "welcome", "sunshine",
    "dragon", "football", "monkey", "login", "princess",
    "qwerty123", "1q2w3e", "000000", "passw0rd", "user",
];

/// The strong and weak label pools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelPools {
    pub strong: Vec<String>,
    pub weak: Vec<String>,
}

impl LabelPools {
    pub fn new(strong: Vec<String>, weak: Vec<String>) -> Self {
        Self { strong, weak }
    }

    /// Both pools empty: nothing will ever spawn
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in pools
    pub fn builtin() -> Self {
        Self {
            strong: DEFAULT_STRONG.iter().map(|s| s.to_string()).collect(),
            weak: DEFAULT_WEAK.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Pools handed over by the host page, if any
    ///
    /// Nothing injected means nothing to catch: both pools stay empty.
    pub fn from_injected(json: Option<&str>) -> Self {
        match json {
            Some(json) => Self::from_json(json),
            None => {
                log::warn!("No label pools injected, nothing will spawn");
                Self::empty()
            }
        }
    }

    /// Parse `{ "strong": [...], "weak": [...] }`
    ///
    /// Each key is read on its own: a missing or malformed key yields an
    /// empty pool for that classification only. Input that is not a JSON
    /// object yields two empty pools rather than an error.
    pub fn from_json(json: &str) -> Self {
        let value = match serde_json::from_str::<Value>(json) {
            Ok(value @ Value::Object(_)) => value,
            Ok(_) => {
                log::warn!("Label pools are not a JSON object, treating as empty");
                return Self::empty();
            }
            Err(e) => {
                log::warn!("Malformed label pools ({}), treating as empty", e);
                return Self::empty();
            }
        };

        let pools = Self {
            strong: pool_field(&value, "strong"),
            weak: pool_field(&value, "weak"),
        };
        log::info!(
            "Loaded label pools: {} strong, {} weak",
            pools.strong.len(),
            pools.weak.len()
        );
        pools
    }

    /// Shuffle both pools so each run feels fresh
    pub fn shuffled(mut self, rng: &mut PcgRandom) -> Self {
        rng.shuffle(&mut self.strong);
        rng.shuffle(&mut self.weak);
        self
    }

    /// Pool for a classification
    pub fn pool(&self, class: Classification) -> &[String] {
        match class {
            Classification::Strong => &self.strong,
            Classification::Weak => &self.weak,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.strong.is_empty() && self.weak.is_empty()
    }
}

/// One pool out of the parsed object, empty if absent or not a string list
fn pool_field(value: &Value, key: &str) -> Vec<String> {
    let Some(field) = value.get(key) else {
        return Vec::new();
    };
    match Vec::<String>::deserialize(field) {
        Ok(labels) => labels,
        Err(e) => {
            log::warn!("Malformed '{}' pool ({}), treating as empty", key, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sizes() {
        let pools = LabelPools::builtin();
        assert_eq!(pools.strong.len(), 20);
        assert_eq!(pools.weak.len(), 20);
    }

    #[test]
    fn test_from_json_missing_key_is_empty_pool() {
        let pools = LabelPools::from_json(r#"{ "strong": ["Aa1!Bb2@"] }"#);
        assert_eq!(pools.strong, vec!["Aa1!Bb2@".to_string()]);
        assert!(pools.weak.is_empty());
    }

    #[test]
    fn test_from_json_malformed_is_empty() {
        assert!(LabelPools::from_json("not json").is_empty());
        assert!(LabelPools::from_json(r#"["a", "b"]"#).is_empty());
        assert!(LabelPools::from_json(r#"{ "strong": 5 }"#).is_empty());
    }

    #[test]
    fn test_malformed_pool_keeps_sibling() {
        let pools = LabelPools::from_json(r#"{ "strong": ["Aa1!Bb2@"], "weak": 5 }"#);
        assert_eq!(pools.strong, vec!["Aa1!Bb2@".to_string()]);
        assert!(pools.weak.is_empty());

        let pools = LabelPools::from_json(r#"{ "strong": [1, 2], "weak": ["123"] }"#);
        assert!(pools.strong.is_empty());
        assert_eq!(pools.weak, vec!["123".to_string()]);
    }

    #[test]
    fn test_nothing_injected_is_empty() {
        assert!(LabelPools::from_injected(None).is_empty());
        let pools = LabelPools::from_injected(Some(r#"{ "weak": ["qwerty"] }"#));
        assert_eq!(pools.weak, vec!["qwerty".to_string()]);
    }

    #[test]
    fn test_shuffle_keeps_contents() {
        let mut rng = PcgRandom::new(3);
        let pools = LabelPools::builtin().shuffled(&mut rng);
        let mut strong = pools.strong.clone();
        strong.sort();
        let mut expected: Vec<String> = DEFAULT_STRONG.iter().map(|s| s.to_string()).collect();
        expected.sort();
        assert_eq!(strong, expected);
    }
}
