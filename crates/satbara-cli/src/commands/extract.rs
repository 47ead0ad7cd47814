//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::commands::{confirm, open_store};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use satbara_domain::{InferenceProvider, RecordStore, StoredRecord};
use satbara_extractor::{ExtractionOutcome, Extractor, SourceDocument};
use satbara_llm::{LlmError, OllamaProvider};
use std::io;
use tracing::debug;

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    config
        .inference
        .validate()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let document = SourceDocument::from_path(&args.file).await?;
    debug!(
        "Read {} ({}, {} bytes)",
        document.file_name,
        document.mime_type,
        document.bytes.len()
    );

    let provider = OllamaProvider::new(&config.inference.endpoint, &config.inference.model)
        .with_timeout(config.inference.request_timeout());
    let extractor = Extractor::new(provider, config.inference.clone());

    let outcome = run_extraction(&extractor, &document, formatter).await?;
    println!("{}", formatter.format_record(&outcome.record)?);

    if !args.save {
        return Ok(());
    }

    if !args.yes && !confirm("Save this record?", &mut io::stdin().lock(), &mut io::stderr())? {
        eprintln!("{}", formatter.info("Record not saved"));
        return Ok(());
    }

    let mut store = open_store(config)?;
    let stored = save_outcome(&mut store, outcome)?;
    eprintln!("{}", formatter.success(&format!("Record saved: {}", stored.id)));

    Ok(())
}

/// Show the advisory and busy line, then run one extraction.
///
/// Status lines go to stderr so that stdout carries only the record.
pub async fn run_extraction<P>(
    extractor: &Extractor<P>,
    document: &SourceDocument,
    formatter: &Formatter,
) -> Result<ExtractionOutcome>
where
    P: InferenceProvider<Error = LlmError>,
{
    if let Some(advisory) = extractor.advisory_for(document) {
        eprintln!("{}", formatter.warning(advisory));
    }
    eprintln!(
        "{}",
        formatter.busy(&document.file_name, extractor.provider().model_name())
    );

    Ok(extractor.extract(document).await?)
}

/// Hand a confirmed record to the store.
pub fn save_outcome<S>(store: &mut S, outcome: ExtractionOutcome) -> Result<StoredRecord>
where
    S: RecordStore,
    CliError: From<S::Error>,
{
    Ok(store.append(outcome.record, Some(outcome.metadata.file_name))?)
}
