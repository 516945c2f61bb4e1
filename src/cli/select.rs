use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use requisitions::{
    DetailedFilter, DetailedRequisition, Filter, FilterSet, Matches, RecordError, Requisition,
    storage::{RawDetailedRequisition, RawRequisition, load_listing},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::instrument;

use super::terminal::{self, Colorize};

/// Command arguments for `reqfilter match`.
#[derive(Debug, Parser)]
pub struct Select {
    /// Filter document (YAML, TOML or JSON, by extension)
    #[arg(short, long, value_name = "FILE")]
    filters: PathBuf,

    /// Listing document holding the requisitions to select from
    #[arg(value_name = "LISTING")]
    listing: PathBuf,

    /// Match detail-page criteria too (every record must carry its details)
    #[arg(long)]
    detailed: bool,

    /// Skip records that cannot be parsed instead of failing
    #[arg(long)]
    skip_invalid: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

impl Select {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let mut out = std::io::stdout().lock();
        if self.detailed {
            self.select::<RawDetailedRequisition, DetailedRequisition, DetailedFilter>(&mut out)
        } else {
            self.select::<RawRequisition, Requisition, Filter>(&mut out)
        }
    }

    fn select<Raw, R, F>(&self, out: &mut impl Write) -> anyhow::Result<()>
    where
        Raw: DeserializeOwned,
        R: TryFrom<Raw, Error = RecordError> + Matches<F> + AsRef<Requisition> + Serialize + Sync,
        F: DeserializeOwned + Sync,
    {
        let filters = FilterSet::<F>::load(&self.filters)
            .with_context(|| format!("failed to load filters from {}", self.filters.display()))?;
        if filters.is_empty() {
            tracing::warn!(
                "{} declares no filters, so no requisition will be selected",
                self.filters.display()
            );
        }

        let raw: Vec<Raw> = load_listing(&self.listing)
            .with_context(|| format!("failed to load listing from {}", self.listing.display()))?;
        let records: Vec<R> = bind(raw, &self.listing, self.skip_invalid)?;

        let selected: Vec<&R> = filters.par_select(&records);
        tracing::info!(
            "{} of {} requisitions meet at least one of {} filters",
            selected.len(),
            records.len(),
            filters.len()
        );

        match self.output {
            OutputFormat::Table => output_table(out, &selected, records.len())?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&selected)?)?,
            OutputFormat::Summary => {
                writeln!(out, "selected={} total={}", selected.len(), records.len())?;
            }
        }

        Ok(())
    }
}

/// Converts raw records to typed records, stopping at the first invalid one
/// unless `skip_invalid` is set.
fn bind<Raw, R>(raw: Vec<Raw>, listing: &Path, skip_invalid: bool) -> anyhow::Result<Vec<R>>
where
    R: TryFrom<Raw, Error = RecordError>,
{
    let mut records = Vec::with_capacity(raw.len());

    for (index, raw) in raw.into_iter().enumerate() {
        match R::try_from(raw) {
            Ok(record) => records.push(record),
            Err(error) if skip_invalid => {
                tracing::warn!("Skipping requisition {index} of {}: {error}", listing.display());
            }
            Err(error) => {
                return Err(error).with_context(|| {
                    format!("invalid requisition {index} in {}", listing.display())
                });
            }
        }
    }

    Ok(records)
}

fn output_table<R: AsRef<Requisition>>(
    out: &mut impl Write,
    selected: &[&R],
    total: usize,
) -> io::Result<()> {
    if selected.is_empty() {
        return writeln!(
            out,
            "{}",
            format!("No requisitions selected (0 of {total})").warning()
        );
    }

    writeln!(
        out,
        "{}",
        format!(
            "{:<14} {:<5} {:>7} {:>5} {:<18} {:>5} {:>12} {:>12}",
            "ID", "GRADE", "RATE", "SCORE", "DESTINATION", "TERM", "AMOUNT", "REMAINING"
        )
        .dim()
    )?;

    for record in selected {
        let requisition: &Requisition = (*record).as_ref();
        writeln!(
            out,
            "{:<14} {}    {:>6.2}% {:>5} {:<18} {:>5} {:>12.2} {:>12.2}",
            requisition.id().as_str(),
            terminal::grade(requisition.grade()),
            requisition.interest_rate(),
            requisition.score(),
            requisition.destination().label(),
            requisition.term(),
            requisition.amount(),
            requisition.remaining_funding_amount(),
        )?;
    }

    writeln!(
        out,
        "\n{}",
        format!("{} of {total} requisitions selected", selected.len()).success()
    )
}
