//! Cross-tabulation of age group against smoking status

use lungcap_core::{Level, RecordTable, YesNo};

/// Age bucket split at a threshold; the threshold itself is in the younger group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeGroup {
    Younger,
    Older,
}

impl AgeGroup {
    pub const ALL: [Self; 2] = [Self::Younger, Self::Older];

    pub fn classify(age: f64, split: f64) -> Self {
        if age <= split {
            Self::Younger
        } else {
            Self::Older
        }
    }

    pub fn label(&self, split: f64) -> String {
        match self {
            Self::Younger => format!("Younger (≤{split})"),
            Self::Older => format!("Older (>{split})"),
        }
    }
}

/// Age group × smoking counts with margins
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    pub split: f64,
    /// `counts[group][smoke]`, smoke indexed No = 0, Yes = 1
    pub counts: [[usize; 2]; 2],
}

impl CrossTab {
    /// Tabulate rows where both age and smoking status are present
    pub fn age_by_smoke(records: &RecordTable, split: f64) -> Self {
        let mut counts = [[0usize; 2]; 2];
        for record in records.records() {
            if let (Some(age), Some(smoke)) = (record.age, record.smoke) {
                let g = AgeGroup::classify(age, split) as usize;
                let s = usize::from(smoke == YesNo::Yes);
                counts[g][s] += 1;
            }
        }
        Self { split, counts }
    }

    pub fn row_labels(&self) -> Vec<String> {
        AgeGroup::ALL.iter().map(|g| g.label(self.split)).collect()
    }

    pub fn column_labels(&self) -> [&'static str; 2] {
        [YesNo::LEVELS[0].label(), YesNo::LEVELS[1].label()]
    }

    pub fn row_total(&self, group: AgeGroup) -> usize {
        self.counts[group as usize].iter().sum()
    }

    pub fn column_total(&self, smoke: YesNo) -> usize {
        let s = usize::from(smoke == YesNo::Yes);
        self.counts.iter().map(|row| row[s]).sum()
    }

    pub fn grand_total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Percent of each row falling in each smoking column; empty rows give zeros
    pub fn row_percentages(&self) -> [[f64; 2]; 2] {
        let mut pct = [[0.0; 2]; 2];
        for (g, row) in self.counts.iter().enumerate() {
            let total: usize = row.iter().sum();
            if total > 0 {
                for (s, &c) in row.iter().enumerate() {
                    pct[g][s] = c as f64 / total as f64 * 100.0;
                }
            }
        }
        pct
    }
}
