//! Sample size, summaries, frequency tables, the age × smoking cross-tab and
//! the exploratory charts

use crate::{load_records, AnalysisConfig, Report, Result};
use lungcap_core::{Categorical, Continuous, Dataset, YesNo};
use lungcap_describe::{
    describe_continuous, outcome_groups, AgeGroup, CrossTab, FrequencyTable,
};
use lungcap_report::{
    fixed, percent, save_chart, BoxJitterChart, ReportStyle, ScatterChart, Series, Table,
};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Integer with comma thousands separators
fn grouped(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn frequency_title(column: Categorical) -> &'static str {
    match column {
        Categorical::Gender => "Gender",
        Categorical::Smoke => "Smoking Status",
        Categorical::Caesarean => "Caesarean Birth",
    }
}

fn frequency_table(freq: &FrequencyTable) -> Table {
    let mut table = Table::new([freq.column.name(), "Count", "Percent"]);
    for row in &freq.rows {
        table.push_row([row.label.clone(), row.count.to_string(), percent(row.percent)]);
    }
    table
}

fn crosstab_tables(ct: &CrossTab) -> (Table, Table) {
    let [no, yes] = ct.column_labels();
    let mut counts = Table::new(["Age_Group", no, yes, "All"]);
    let mut shares = Table::new(["Age_Group", no, yes]);
    let pct = ct.row_percentages();
    for (g, group) in AgeGroup::ALL.iter().enumerate() {
        let label = group.label(ct.split);
        counts.push_row([
            label.clone(),
            ct.counts[g][0].to_string(),
            ct.counts[g][1].to_string(),
            ct.row_total(*group).to_string(),
        ]);
        shares.push_row([label, percent(pct[g][0]), percent(pct[g][1])]);
    }
    counts.push_row([
        "All".to_string(),
        ct.column_total(YesNo::No).to_string(),
        ct.column_total(YesNo::Yes).to_string(),
        ct.grand_total().to_string(),
    ]);
    (counts, shares)
}

fn scatter_by_gender(data: &Dataset, x: Continuous, title: &str, x_label: &str) -> ScatterChart {
    let series = Categorical::Gender
        .levels()
        .iter()
        .map(|&level| Series {
            label: level.to_string(),
            points: data
                .iter()
                .filter(|s| Categorical::Gender.label(s) == level)
                .map(|s| (x.value(s), s.lung_cap))
                .collect(),
        })
        .collect();
    ScatterChart {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: "Lung Capacity".to_string(),
        series,
    }
}

fn box_chart(data: &Dataset, by: Categorical, title: &str, seed: u64) -> BoxJitterChart {
    BoxJitterChart {
        title: title.to_string(),
        x_label: by.name().to_string(),
        y_label: "Lung Capacity".to_string(),
        groups: outcome_groups(data, by),
        seed,
    }
}

/// Write the four exploratory charts
pub fn render_charts(data: &Dataset, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let style = ReportStyle::default();
    let dir = &config.output_dir;
    let mut paths = Vec::new();
    paths.extend(save_chart(
        &scatter_by_gender(data, Continuous::Height, "Lung Capacity vs. Height", "Height (inches)"),
        dir,
        "fig_lungcap_vs_height",
        &style,
    )?);
    paths.extend(save_chart(
        &scatter_by_gender(data, Continuous::Age, "Lung Capacity vs. Age", "Age (years)"),
        dir,
        "fig_lungcap_vs_age",
        &style,
    )?);
    paths.extend(save_chart(
        &box_chart(data, Categorical::Gender, "Lung Capacity by Gender", config.seed),
        dir,
        "fig_lungcap_by_gender",
        &style,
    )?);
    paths.extend(save_chart(
        &box_chart(data, Categorical::Smoke, "Lung Capacity by Smoking Status", config.seed),
        dir,
        "fig_lungcap_by_smoke",
        &style,
    )?);
    Ok(paths)
}

#[instrument(skip_all, fields(path = %config.data_path.display()))]
pub fn run(config: &AnalysisConfig) -> Result<Report> {
    let records = load_records(config)?;
    let mut report = Report::new();

    report.titled("Sample Size", format!("N = {}", grouped(records.len())));

    let mut summary = Table::new(["", "N", "Mean", "SD", "Min", "Q1", "Median", "Q3", "Max"]);
    for s in describe_continuous(&records)? {
        let cells = [s.mean, s.std_dev, s.min, s.q1, s.median, s.q3, s.max].map(|v| fixed(v, 2));
        summary.push_row([s.name, s.count.to_string()].into_iter().chain(cells));
    }
    report.titled("Continuous Variables", summary);

    for column in [Categorical::Gender, Categorical::Smoke, Categorical::Caesarean] {
        let freq = FrequencyTable::from_records(&records, column);
        report.titled(frequency_title(column), frequency_table(&freq));
    }

    let ct = CrossTab::age_by_smoke(&records, config.age_split);
    let (counts, shares) = crosstab_tables(&ct);
    report.titled("Cross-tab: Smoking by Age Group", counts);
    report.section(format!("Row % (each age group sums to 100%):\n{shares}"));

    if config.render_charts {
        let data = records.complete_cases();
        let paths = render_charts(&data, config)?;
        info!(charts = paths.len(), "exploratory charts written");
        report.add_charts(paths);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lungcap_core::{Gender, Record, RecordTable};

    #[test]
    fn test_grouped_digits() {
        assert_eq!(grouped(7), "7");
        assert_eq!(grouped(654), "654");
        assert_eq!(grouped(1000), "1,000");
        assert_eq!(grouped(1234567), "1,234,567");
    }

    #[test]
    fn test_crosstab_layout() {
        let record = |age: f64, smoke: YesNo| Record {
            lung_cap: Some(6.0),
            age: Some(age),
            height: Some(60.0),
            smoke: Some(smoke),
            gender: Some(Gender::Female),
            caesarean: Some(YesNo::No),
        };
        let records = RecordTable::new(vec![
            record(10.0, YesNo::No),
            record(13.0, YesNo::Yes),
            record(15.0, YesNo::Yes),
            record(16.0, YesNo::No),
        ]);
        let (counts, shares) = crosstab_tables(&CrossTab::age_by_smoke(&records, 13.0));
        assert_eq!(counts.rows()[0], vec!["Younger (≤13)", "1", "1", "2"]);
        assert_eq!(counts.rows()[2], vec!["All", "2", "2", "4"]);
        assert_eq!(shares.rows()[1], vec!["Older (>13)", "50.0%", "50.0%"]);
    }
}
