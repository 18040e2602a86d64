//! Summary reporting for a harvest run

/// What happened to one translation listing URL during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// Artifact written successfully
    Harvested,

    /// Artifact already existed; no network activity performed
    SkippedExisting,

    /// Translation code not on the allow-list; no books fetched
    SkippedNotAllowed,

    /// Attempt abandoned; no artifact retained
    Failed { reason: String },
}

/// Per-run summary of translation outcomes, in processing order
#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    pub outcomes: Vec<(String, TranslationOutcome)>,
}

impl HarvestReport {
    pub fn record(&mut self, id: impl Into<String>, outcome: TranslationOutcome) {
        self.outcomes.push((id.into(), outcome));
    }

    pub fn harvested(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|(id, o)| {
            matches!(o, TranslationOutcome::Harvested).then_some(id.as_str())
        })
    }

    pub fn harvested_count(&self) -> usize {
        self.harvested().count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, TranslationOutcome::Failed { .. }))
            .count()
    }
}

/// Prints a run summary to stdout in a formatted manner
pub fn print_report(report: &HarvestReport) {
    println!("=== Harvest Summary ===\n");

    if report.outcomes.is_empty() {
        println!("No translations were considered.");
        return;
    }

    for (id, outcome) in &report.outcomes {
        match outcome {
            TranslationOutcome::Harvested => println!("  {} - harvested", id),
            TranslationOutcome::SkippedExisting => {
                println!("  {} - skipped (already materialized)", id)
            }
            TranslationOutcome::SkippedNotAllowed => {
                println!("  {} - skipped (not on allow-list)", id)
            }
            TranslationOutcome::Failed { reason } => println!("  {} - failed: {}", id, reason),
        }
    }

    println!();
    println!(
        "Harvested: {}, Failed: {}, Total considered: {}",
        report.harvested_count(),
        report.failed_count(),
        report.outcomes.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = HarvestReport::default();
        report.record("aa", TranslationOutcome::SkippedNotAllowed);
        report.record(
            "bb",
            TranslationOutcome::Failed {
                reason: "no books found".to_string(),
            },
        );
        report.record("cc", TranslationOutcome::Harvested);

        assert_eq!(report.harvested_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.harvested().collect::<Vec<_>>(), vec!["cc"]);
    }
}
