//! List command implementation.

use crate::commands::open_store;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use satbara_domain::RecordStore;

/// Execute the list command.
pub async fn execute_list(config: &Config, formatter: &Formatter) -> Result<()> {
    let store = open_store(config)?;
    let records = store.list()?;
    println!("{}", formatter.format_stored(&records)?);
    Ok(())
}
