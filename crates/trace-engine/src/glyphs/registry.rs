use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::table::TableProvider;
use super::Character;
use crate::api::error::{Result, TraceError};

/// The writing systems the tutor ships tables for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScriptId {
    English,
    Numbers,
    Korean,
    Chinese,
}

impl ScriptId {
    /// Menu order.
    pub const ALL: [ScriptId; 4] = [Self::English, Self::Numbers, Self::Korean, Self::Chinese];

    /// Stable lowercase identifier used by the host and the tables.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Numbers => "numbers",
            Self::Korean => "korean",
            Self::Chinese => "chinese",
        }
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ScriptId {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|script| script.slug() == s)
            .ok_or_else(|| TraceError::UnknownScript(s.to_string()))
    }
}

/// Read-only source of character geometry for one script.
pub trait CharacterProvider {
    fn script(&self) -> ScriptId;

    /// Human-readable script name for menus (e.g. "Korean").
    fn label(&self) -> &str;

    fn get_character(&self, id: &str) -> Option<&Character>;

    /// All ids, sorted.
    fn character_ids(&self) -> Vec<&str>;

    fn len(&self) -> usize {
        self.character_ids().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Glyph tables compiled into the crate.
const BUILTIN_TABLES: [(ScriptId, &str); 4] = [
    (ScriptId::English, include_str!("../../data/english.json")),
    (ScriptId::Numbers, include_str!("../../data/numbers.json")),
    (ScriptId::Korean, include_str!("../../data/korean.json")),
    (ScriptId::Chinese, include_str!("../../data/chinese.json")),
];

/// Lookup table from script to provider, built once at startup.
#[derive(Default)]
pub struct ScriptRegistry {
    providers: HashMap<ScriptId, Box<dyn CharacterProvider>>,
}

impl ScriptRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in glyph table.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for (script, json) in BUILTIN_TABLES {
            let provider = TableProvider::from_json(script, json)?;
            log::debug!("loaded {} glyphs for {}", provider.len(), script);
            registry.register(Box::new(provider));
        }
        Ok(registry)
    }

    /// Add or replace the provider for its script.
    pub fn register(&mut self, provider: Box<dyn CharacterProvider>) {
        self.providers.insert(provider.script(), provider);
    }

    pub fn provider(&self, script: ScriptId) -> Result<&dyn CharacterProvider> {
        self.providers
            .get(&script)
            .map(|p| &**p)
            .ok_or_else(|| TraceError::UnknownScript(script.to_string()))
    }

    pub fn get_character(&self, script: ScriptId, id: &str) -> Result<&Character> {
        self.provider(script)?
            .get_character(id)
            .ok_or_else(|| TraceError::UnknownCharacter {
                script,
                id: id.to_string(),
            })
    }

    /// Registered scripts in menu order.
    pub fn scripts(&self) -> Vec<ScriptId> {
        let mut scripts: Vec<ScriptId> = self.providers.keys().copied().collect();
        scripts.sort();
        scripts
    }

    /// The id after `id` in sorted order, wrapping to the first.
    pub fn next_id(&self, script: ScriptId, id: &str) -> Result<&str> {
        let ids = self.provider(script)?.character_ids();
        let pos = ids.iter().position(|candidate| *candidate == id).ok_or_else(|| {
            TraceError::UnknownCharacter {
                script,
                id: id.to_string(),
            }
        })?;
        Ok(ids[(pos + 1) % ids.len()])
    }
}
