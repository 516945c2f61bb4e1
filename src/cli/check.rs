use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use requisitions::{DetailedFilter, Filter, FilterSet};
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::terminal::Colorize;

/// Command arguments for `reqfilter check`.
#[derive(Debug, Parser)]
pub struct Check {
    /// Filter document (YAML, TOML or JSON, by extension)
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Read detail-page criteria as well as summary criteria
    #[arg(long)]
    detailed: bool,
}

/// The configuration keys a filter sets.
trait Constrained {
    fn constrained_criteria(&self) -> Vec<&'static str>;
}

impl Constrained for Filter {
    fn constrained_criteria(&self) -> Vec<&'static str> {
        Self::constrained_criteria(self)
    }
}

impl Constrained for DetailedFilter {
    fn constrained_criteria(&self) -> Vec<&'static str> {
        Self::constrained_criteria(self)
    }
}

impl Check {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let lines = if self.detailed {
            self.describe::<DetailedFilter>()?
        } else {
            self.describe::<Filter>()?
        };

        for line in &lines {
            println!("{line}");
        }

        Ok(())
    }

    fn describe<F: DeserializeOwned + Constrained>(&self) -> anyhow::Result<Vec<String>> {
        let filters = FilterSet::<F>::load(&self.path)
            .with_context(|| format!("failed to load filters from {}", self.path.display()))?;
        Ok(describe(&filters))
    }
}

fn describe<F: Constrained>(filters: &FilterSet<F>) -> Vec<String> {
    if filters.is_empty() {
        return vec!["No filters declared: nothing will be selected".warning()];
    }

    let mut lines: Vec<String> = filters
        .iter()
        .enumerate()
        .map(|(index, filter)| {
            let criteria = filter.constrained_criteria();
            if criteria.is_empty() {
                format!("{:>3}. {}", index + 1, "matches every requisition".dim())
            } else {
                format!("{:>3}. {}", index + 1, criteria.join(", "))
            }
        })
        .collect();

    lines.push(format!("\n{}", format!("{} filters loaded", filters.len()).success()));
    lines
}
