//! Pass rates for a finished run.
use super::OutcomeRecord;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CategoryStats {
    pub total: usize,
    pub exact_match: usize,
    pub correct: usize,
}

impl CategoryStats {
    fn add(&mut self, record: &OutcomeRecord) {
        self.total += 1;
        self.exact_match += record.exact_match as usize;
        self.correct += record.correct as usize;
    }

    pub fn exact_match_rate(&self) -> f64 {
        rate(self.exact_match, self.total)
    }

    pub fn correct_rate(&self) -> f64 {
        rate(self.correct, self.total)
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Failed rows count as incorrect, they need no special handling here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub overall: CategoryStats,
    pub by_category: BTreeMap<String, CategoryStats>,
}

impl RunSummary {
    pub fn from_records(records: &[OutcomeRecord]) -> RunSummary {
        let mut summary = RunSummary::default();
        for record in records {
            summary.overall.add(record);
            summary
                .by_category
                .entry(record.query_category.clone())
                .or_default()
                .add(record);
        }
        summary
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<24} {:>11} {:>8}", "query_category", "exact_match", "correct")?;
        for (category, stats) in self.by_category.iter() {
            writeln!(
                f,
                "{:<24} {:>11.6} {:>8.6}",
                category,
                stats.exact_match_rate(),
                stats.correct_rate()
            )?;
        }
        write!(f, "Average correct rate: {:.2}", self.overall.correct_rate())
    }
}
