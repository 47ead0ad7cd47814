//! Clear command implementation.

use crate::cli::ClearArgs;
use crate::commands::{confirm, open_store};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use satbara_domain::RecordStore;
use std::io::{self, BufRead};

/// Execute the clear command.
pub async fn execute_clear(args: ClearArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut store = open_store(config)?;
    let removed = clear_records(&mut store, args.yes, &mut io::stdin().lock())?;

    match removed {
        Some(count) => println!("{}", formatter.bulk_result("Deleted", count)),
        None => println!("{}", formatter.info("Operation cancelled")),
    }
    Ok(())
}

/// Clear the store after confirmation; `None` if the user declined.
fn clear_records<S>(store: &mut S, yes: bool, input: &mut impl BufRead) -> Result<Option<usize>>
where
    S: RecordStore,
    crate::error::CliError: From<S::Error>,
{
    if !yes {
        let count = store.list()?.len();
        if count == 0 {
            return Ok(Some(0));
        }
        if !confirm(
            &format!("About to delete {} record(s). Continue?", count),
            input,
            &mut io::stderr(),
        )? {
            return Ok(None);
        }
    }

    Ok(Some(store.clear()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use satbara_domain::SatBaraData;
    use satbara_store::SqliteStore;
    use std::io::Cursor;

    fn store_with(n: usize) -> SqliteStore {
        let mut store = SqliteStore::new(":memory:").unwrap();
        for _ in 0..n {
            store.append(SatBaraData::default(), None).unwrap();
        }
        store
    }

    #[test]
    fn test_clear_with_yes_skips_question() {
        let mut store = store_with(3);
        // Empty input would read as "no" if the question were asked
        let removed = clear_records(&mut store, true, &mut Cursor::new("")).unwrap();
        assert_eq!(removed, Some(3));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_clear_confirmed() {
        let mut store = store_with(2);
        let removed = clear_records(&mut store, false, &mut Cursor::new("y\n")).unwrap();
        assert_eq!(removed, Some(2));
    }

    #[test]
    fn test_clear_declined_keeps_records() {
        let mut store = store_with(2);
        let removed = clear_records(&mut store, false, &mut Cursor::new("n\n")).unwrap();
        assert_eq!(removed, None);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_clear_empty_store_asks_nothing() {
        let mut store = store_with(0);
        let removed = clear_records(&mut store, false, &mut Cursor::new("")).unwrap();
        assert_eq!(removed, Some(0));
    }
}
