//! Command implementations.

pub mod clear;
pub mod config;
pub mod extract;
pub mod list;

pub use self::clear::execute_clear;
pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::list::execute_list;

use crate::config::Config;
use crate::error::Result;
use satbara_store::SqliteStore;
use std::fs;
use std::io::{BufRead, Write};

/// Open the configured record store, creating its directory if needed.
pub fn open_store(config: &Config) -> Result<SqliteStore> {
    let path = config.database_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(SqliteStore::new(&path)?)
}

/// Write a yes/no question to `prompt` and read the answer from `input`.
///
/// Callers pass stderr as `prompt` so that stdout keeps only the record.
/// Anything but `y` or `yes` is a no.
pub fn confirm(question: &str, input: &mut impl BufRead, prompt: &mut impl Write) -> Result<bool> {
    write!(prompt, "{} [y/N] ", question)?;
    prompt.flush()?;

    let mut response = String::new();
    input.read_line(&mut response)?;

    let answer = response.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_confirm_answers() {
        let ask = |answer: &str| confirm("Save?", &mut Cursor::new(answer), &mut Vec::new()).unwrap();
        assert!(ask("y\n"));
        assert!(ask("YES\n"));
        assert!(!ask("n\n"));
        assert!(!ask("\n"));
        assert!(!ask(""));
    }

    #[test]
    fn test_confirm_writes_question_to_prompt_stream() {
        let mut prompt = Vec::new();
        confirm("Save this record?", &mut Cursor::new("y\n"), &mut prompt).unwrap();
        assert_eq!(String::from_utf8(prompt).unwrap(), "Save this record? [y/N] ");
    }

    #[test]
    fn test_open_store_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.store.database_path = Some(dir.path().join("nested").join("records.db"));

        let store = open_store(&config).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(dir.path().join("nested").join("records.db").exists());
    }
}
