use std::path::{
    Path,
    PathBuf,
};

use csv::{
    ReaderBuilder,
    StringRecord,
};

use crate::core::{
    Band,
    CharacterForm,
    ContentType,
    Entry,
    Preferences,
    ReadingSystem,
    WendaError,
};

pub const SIMPLIFIED_COL: usize = 0;
pub const TRADITIONAL_COL: usize = 1;
pub const PINYIN_COL: usize = 2;
pub const ZHUYIN_COL: usize = 3;
pub const AUDIO_COL: usize = 4;
pub const MEANING_COL: usize = 5;

/// A usable row carries both character forms, both readings, an audio path
/// and a meaning.
pub const MIN_FIELDS: usize = 6;

pub fn table_path(data_dir: &Path, band: Band, content: ContentType) -> PathBuf {
    data_dir.join(format!("band{}_{}.csv", band.level(), content.file_stem()))
}

/// Raw rows of a band table with all columns intact. The vocabulary-selection
/// dialog needs the unprojected rows.
pub fn read_rows(path: &Path) -> Result<Vec<StringRecord>, WendaError> {
    if !path.exists() {
        return Err(WendaError::MissingDataFile(path.display().to_string()));
    }

    let mut reader = ReaderBuilder::new().has_headers(false).flexible(true).from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Projects raw rows into quiz entries using the current preferences. Rows
/// with fewer than [`MIN_FIELDS`] fields are skipped individually with a
/// warning; loading continues.
pub fn entries_from_rows(rows: &[StringRecord], prefs: &Preferences) -> Vec<Entry> {
    let prompt_col = match prefs.characters {
        CharacterForm::Simplified => SIMPLIFIED_COL,
        CharacterForm::Traditional => TRADITIONAL_COL,
    };
    let answer_col = match prefs.readings {
        ReadingSystem::Pinyin => PINYIN_COL,
        ReadingSystem::Zhuyin => ZHUYIN_COL,
    };

    let mut entries = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        if row.len() < MIN_FIELDS {
            eprintln!(
                "Skipping row {}: expected at least {} fields, found {}",
                index + 1,
                MIN_FIELDS,
                row.len()
            );
            continue;
        }

        entries.push(Entry {
            prompt: row[prompt_col].to_string(),
            answer: row[answer_col].to_string(),
            audio: PathBuf::from(&row[AUDIO_COL]),
            meaning: row[MEANING_COL].to_string(),
        });
    }
    entries
}

/// Fail-soft table load: a missing or unreadable file yields an empty entry
/// set after one diagnostic line, never an error to the caller.
pub fn load_table(
    data_dir: &Path,
    band: Band,
    content: ContentType,
    prefs: &Preferences,
) -> Vec<Entry> {
    let path = table_path(data_dir, band, content);
    match read_rows(&path) {
        Ok(rows) => entries_from_rows(&rows, prefs),
        Err(e) => {
            eprintln!("Failed to load {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const SAMPLE: &str = "\
你,妳,nǐ,ㄋㄧˇ,audio/ni.wav,you
好,好,hǎo,ㄏㄠˇ,audio/hao.wav,good
short
谢,謝,xiè,ㄒㄧㄝˋ,audio/xie.wav,\"to thank, thanks\"
";

    fn write_table(dir: &TempDir, band: Band, content: ContentType, body: &str) {
        fs::write(table_path(dir.path(), band, content), body).unwrap();
    }

    #[test]
    fn table_path_formats_band_and_stem() {
        let path = table_path(Path::new("assets/data"), Band::new(2).unwrap(), ContentType::Characters);
        assert!(path.ends_with("band2_char.csv"));

        let path = table_path(Path::new("assets/data"), Band::new(5).unwrap(), ContentType::Vocabulary);
        assert!(path.ends_with("band5_vocab.csv"));
    }

    #[test]
    fn short_rows_are_skipped_and_loading_continues() {
        let dir = TempDir::new().unwrap();
        let band = Band::new(1).unwrap();
        write_table(&dir, band, ContentType::Characters, SAMPLE);

        let entries = load_table(dir.path(), band, ContentType::Characters, &Preferences::default());

        let prompts: Vec<&str> = entries.iter().map(|e| e.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["你", "好", "谢"]);
        assert_eq!(entries[2].meaning, "to thank, thanks");
        assert_eq!(entries[0].audio, PathBuf::from("audio/ni.wav"));
    }

    #[test]
    fn columns_follow_both_preference_axes() {
        let dir = TempDir::new().unwrap();
        let band = Band::new(1).unwrap();
        write_table(&dir, band, ContentType::Characters, SAMPLE);

        let prefs = Preferences {
            characters: CharacterForm::Traditional,
            readings: ReadingSystem::Zhuyin,
        };
        let entries = load_table(dir.path(), band, ContentType::Characters, &prefs);

        assert_eq!(entries[0].prompt, "妳");
        assert_eq!(entries[0].answer, "ㄋㄧˇ");
    }

    #[test]
    fn missing_file_loads_an_empty_set() {
        let dir = TempDir::new().unwrap();
        let entries = load_table(
            dir.path(),
            Band::new(6).unwrap(),
            ContentType::Vocabulary,
            &Preferences::default(),
        );
        assert!(entries.is_empty());
    }

    #[test]
    fn read_rows_reports_a_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = table_path(dir.path(), Band::new(1).unwrap(), ContentType::Vocabulary);
        assert!(matches!(read_rows(&path), Err(WendaError::MissingDataFile(_))));
    }
}
