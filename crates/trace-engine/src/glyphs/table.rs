use std::collections::BTreeMap;

use serde::Deserialize;

use super::registry::{CharacterProvider, ScriptId};
use super::stroke::StrokeSpec;
use super::Character;
use crate::api::error::Result;

/// A glyph table as stored on disk.
///
/// ```json
/// { "script": "numbers", "label": "Numbers",
///   "characters": { "1": { "name": "1", "pronunciation": "one",
///                          "strokes": [{"line": {"from": [50, 20], "to": [50, 80], "steps": 20}}] } } }
/// ```
#[derive(Debug, Deserialize)]
pub struct GlyphTable {
    pub script: String,
    pub label: String,
    pub characters: BTreeMap<String, GlyphDef>,
}

/// Definition of a single glyph in a table.
#[derive(Debug, Deserialize)]
pub struct GlyphDef {
    pub name: String,
    #[serde(default)]
    pub pronunciation: String,
    pub strokes: Vec<StrokeSpec>,
}

impl GlyphTable {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Character provider backed by one glyph table.
///
/// Stroke generators are expanded once, at construction.
#[derive(Debug, Clone)]
pub struct TableProvider {
    script: ScriptId,
    label: String,
    characters: BTreeMap<String, Character>,
}

impl TableProvider {
    pub fn new(script: ScriptId, table: GlyphTable) -> Self {
        if table.script != script.slug() {
            log::warn!(
                "glyph table labelled '{}' registered as script '{}'",
                table.script,
                script
            );
        }

        let characters = table
            .characters
            .into_iter()
            .map(|(id, def)| {
                let strokes = def.strokes.iter().map(StrokeSpec::to_points).collect();
                let character = Character {
                    id: id.clone(),
                    strokes,
                    display_name: def.name,
                    pronunciation: def.pronunciation,
                };
                (id, character)
            })
            .collect();

        Self {
            script,
            label: table.label,
            characters,
        }
    }

    pub fn from_json(script: ScriptId, json: &str) -> Result<Self> {
        Ok(Self::new(script, GlyphTable::from_json(json)?))
    }
}

impl CharacterProvider for TableProvider {
    fn script(&self) -> ScriptId {
        self.script
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn get_character(&self, id: &str) -> Option<&Character> {
        self.characters.get(id)
    }

    fn character_ids(&self) -> Vec<&str> {
        // BTreeMap iterates in key order
        self.characters.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const TABLE: &str = r#"{
        "script": "chinese",
        "label": "Chinese",
        "characters": {
            "二": { "name": "二", "pronunciation": "èr (two)", "strokes": [
                {"line": {"from": [20, 40], "to": [80, 40], "steps": 10}},
                {"line": {"from": [20, 60], "to": [80, 60], "steps": 10}}
            ]},
            "一": { "name": "一", "pronunciation": "yī (one)", "strokes": [
                {"line": {"from": [20, 50], "to": [80, 50], "steps": 10}}
            ]},
            "口": { "name": "口", "strokes": [] }
        }
    }"#;

    #[test]
    fn parse_and_expand_table() {
        let provider = TableProvider::from_json(ScriptId::Chinese, TABLE).unwrap();
        assert_eq!(provider.label(), "Chinese");

        let one = provider.get_character("一").unwrap();
        assert_eq!(one.id, "一");
        assert_eq!(one.pronunciation, "yī (one)");
        assert_eq!(one.strokes.len(), 1);
        assert_eq!(one.strokes[0].len(), 11);
        assert_eq!(one.strokes[0][0], Vec2::new(20.0, 50.0));

        assert_eq!(provider.get_character("二").unwrap().point_count(), 22);
    }

    #[test]
    fn missing_pronunciation_defaults_to_empty() {
        let provider = TableProvider::from_json(ScriptId::Chinese, TABLE).unwrap();
        let mouth = provider.get_character("口").unwrap();
        assert!(mouth.pronunciation.is_empty());
        assert_eq!(mouth.point_count(), 0);
    }

    #[test]
    fn ids_are_sorted() {
        let provider = TableProvider::from_json(ScriptId::Chinese, TABLE).unwrap();
        let ids = provider.character_ids();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn unknown_id_is_none() {
        let provider = TableProvider::from_json(ScriptId::Chinese, TABLE).unwrap();
        assert!(provider.get_character("猫").is_none());
    }

    #[test]
    fn malformed_table_is_a_parse_error() {
        let err = TableProvider::from_json(ScriptId::Numbers, r#"{ "script": "numbers" }"#).unwrap_err();
        assert!(matches!(err, crate::api::error::TraceError::Parse(_)));
    }
}
