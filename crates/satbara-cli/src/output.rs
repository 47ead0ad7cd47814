//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use satbara_domain::{LandArea, SatBaraData, StoredRecord};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format one extracted record.
    pub fn format_record(&self, record: &SatBaraData) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Quiet => Ok(serde_json::to_string(record)?),
            OutputFormat::Table => Ok(self.format_record_table(record)),
        }
    }

    /// Format saved records.
    pub fn format_stored(&self, records: &[StoredRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(self.format_stored_table(records)),
            OutputFormat::Quiet => {
                let ids: Vec<String> = records.iter().map(|r| r.id.to_string()).collect();
                Ok(ids.join("\n"))
            }
        }
    }

    fn format_record_table(&self, record: &SatBaraData) -> String {
        let revenue = record
            .land_revenue
            .as_ref()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        let area = record
            .total_land_area
            .as_ref()
            .map(format_area)
            .unwrap_or_else(|| "-".to_string());
        let mutations = if record.mutation_entries.is_empty() {
            "-".to_string()
        } else {
            record.mutation_entries.join(", ")
        };

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Village", or_dash(&record.village_name)]);
        builder.push_record(["Taluka", or_dash(&record.taluka)]);
        builder.push_record(["District", or_dash(&record.district)]);
        builder.push_record(["Survey No.", or_dash(&record.survey_number)]);
        builder.push_record(["Subdivision", or_dash(&record.subdivision_number)]);
        builder.push_record(["Total Area", area.as_str()]);
        builder.push_record(["Land Revenue", revenue.as_str()]);
        builder.push_record(["Other Rights", or_dash(&record.other_rights)]);
        builder.push_record(["Mutation Entries", mutations.as_str()]);

        let mut sections = vec![styled(builder.build())];

        sections.push(self.section(
            "Occupants",
            ["Name", "Occupancy", "Share"],
            record.occupant_details.iter().map(|o| {
                [
                    o.name.clone(),
                    or_dash(&o.occupancy_type).to_string(),
                    or_dash(&o.area_share).to_string(),
                ]
            }),
        ));
        sections.push(self.section(
            "Crops",
            ["Season", "Crop", "Area"],
            record.crop_details.iter().map(|c| {
                [
                    or_dash(&c.season).to_string(),
                    c.crop_name.clone(),
                    or_dash(&c.area).to_string(),
                ]
            }),
        ));
        sections.push(self.section(
            "Encumbrances",
            ["Type", "Details", "Mutation Entry"],
            record.encumbrances.iter().map(|e| {
                [
                    e.kind.clone(),
                    e.details.clone(),
                    or_dash(&e.mutation_entry_number).to_string(),
                ]
            }),
        ));

        sections.join("\n\n")
    }

    /// A titled sub-table, or a one-line note when there are no rows
    fn section(
        &self,
        title: &str,
        header: [&str; 3],
        rows: impl ExactSizeIterator<Item = [String; 3]>,
    ) -> String {
        if rows.len() == 0 {
            return format!("{}: none", self.colorize(title, "cyan"));
        }

        let mut builder = Builder::default();
        builder.push_record(header);
        for row in rows {
            builder.push_record(row);
        }
        format!("{}\n{}", self.colorize(title, "cyan"), styled(builder.build()))
    }

    fn format_stored_table(&self, records: &[StoredRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No records saved.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "File", "Saved At", "Village", "Survey No.", "District", "Occupants"]);

        for record in records {
            let id = record.id.to_string();
            let saved_at = record.extraction_timestamp.to_string();
            let occupants = record.data.occupant_details.len().to_string();
            builder.push_record([
                &id[..8], // Truncate ID for readability
                record.file_name.as_deref().unwrap_or("-"),
                saved_at.as_str(),
                or_dash(&record.data.village_name),
                or_dash(&record.data.survey_number),
                or_dash(&record.data.district),
                occupants.as_str(),
            ]);
        }

        styled(builder.build())
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format the line shown while an extraction is in flight.
    pub fn busy(&self, file_name: &str, model: &str) -> String {
        self.colorize(
            &format!("… Extracting data from {} with {}", file_name, model),
            "magenta",
        )
    }

    /// Format bulk operation result.
    pub fn bulk_result(&self, operation: &str, count: usize) -> String {
        self.success(&format!("{} {} record(s)", operation, count))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Render an area like `1.2 ha 30 R`
fn format_area(area: &LandArea) -> String {
    let parts: Vec<String> = [
        area.hectare.as_ref().map(|v| format!("{} ha", v)),
        area.r.as_ref().map(|v| format!("{} R", v)),
        area.sq_meter.as_ref().map(|v| format!("{} sq m", v)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" ")
    }
}
