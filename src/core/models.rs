use std::{
    fmt,
    path::PathBuf,
    str::FromStr,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::WendaError;

/// One quizzable unit projected out of a raw vocabulary row. Immutable once
/// constructed; distractor deduplication compares `answer` string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub prompt: String,
    pub answer: String,
    pub audio: PathBuf,
    pub meaning: String,
}

/// HSK 3.0 difficulty tier, 1 (lowest) through 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band(u8);

impl Band {
    pub const ALL: [Band; 6] = [Band(1), Band(2), Band(3), Band(4), Band(5), Band(6)];

    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(Band(level))
    }

    pub fn level(&self) -> u8 {
        self.0
    }
}

impl Default for Band {
    fn default() -> Self {
        Band(1)
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a dataset holds single characters or multi-character words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Characters,
    Vocabulary,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Characters, ContentType::Vocabulary];

    /// Stem used in table filenames: `band{n}_{stem}.csv`.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ContentType::Characters => "char",
            ContentType::Vocabulary => "vocab",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Characters => write!(f, "Characters"),
            ContentType::Vocabulary => write!(f, "Vocabulary"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterForm {
    #[default]
    Simplified,
    Traditional,
}

impl fmt::Display for CharacterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterForm::Simplified => write!(f, "simplified"),
            CharacterForm::Traditional => write!(f, "traditional"),
        }
    }
}

impl FromStr for CharacterForm {
    type Err = WendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_value(s).as_str() {
            "simplified" => Ok(CharacterForm::Simplified),
            "traditional" => Ok(CharacterForm::Traditional),
            _ => Err(WendaError::InvalidPreference { setting: "characters", value: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingSystem {
    #[default]
    Pinyin,
    Zhuyin,
}

impl fmt::Display for ReadingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingSystem::Pinyin => write!(f, "pinyin"),
            ReadingSystem::Zhuyin => write!(f, "zhuyin"),
        }
    }
}

impl FromStr for ReadingSystem {
    type Err = WendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_value(s).as_str() {
            "pinyin" => Ok(ReadingSystem::Pinyin),
            "zhuyin" => Ok(ReadingSystem::Zhuyin),
            _ => Err(WendaError::InvalidPreference { setting: "readings", value: s.to_string() }),
        }
    }
}

/// Preference value normalization. The old hand-edited config format allowed
/// quoted and mixed-case values, so parsing still accepts them.
pub fn normalize_value(raw: &str) -> String {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').to_lowercase()
}

/// Display preferences, read once at load/reload time. Missing or unreadable
/// stored values fall back to these defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub characters: CharacterForm,
    #[serde(default)]
    pub readings: ReadingSystem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_accepts_quoted_and_mixed_case_values() {
        assert_eq!("traditional".parse::<CharacterForm>().unwrap(), CharacterForm::Traditional);
        assert_eq!("  'Traditional' ".parse::<CharacterForm>().unwrap(), CharacterForm::Traditional);
        assert_eq!("\"ZHUYIN\"".parse::<ReadingSystem>().unwrap(), ReadingSystem::Zhuyin);
    }

    #[test]
    fn unknown_preference_values_are_errors() {
        assert!("kanji".parse::<CharacterForm>().is_err());
        assert!("romaji".parse::<ReadingSystem>().is_err());
    }

    #[test]
    fn defaults_are_simplified_and_pinyin() {
        let prefs = Preferences::default();
        assert_eq!(prefs.characters, CharacterForm::Simplified);
        assert_eq!(prefs.readings, ReadingSystem::Pinyin);
    }

    #[test]
    fn band_rejects_out_of_range_levels() {
        assert!(Band::new(0).is_none());
        assert!(Band::new(7).is_none());
        assert_eq!(Band::new(4).unwrap().level(), 4);
    }
}
