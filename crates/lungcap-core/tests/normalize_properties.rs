//! Property tests for schema normalization

mod common;

use common::{raw_table, GENDER_SPELLINGS, SMOKE_SPELLINGS};
use lungcap_core::{canonicalize, normalize, Categorical, Continuous};
use proptest::prelude::*;

fn numeric_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => (0.5f64..15.0).prop_map(|v| format!("{v:.3}")),
        1 => Just(String::new()),
        1 => Just("n/a".to_string()),
    ]
}

fn label_cell(spellings: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop_oneof![
        9 => prop::sample::select(spellings).prop_map(str::to_string),
        1 => Just("unknown".to_string()),
    ]
}

fn row() -> impl Strategy<Value = [String; 6]> {
    (
        numeric_cell(),
        numeric_cell(),
        numeric_cell(),
        label_cell(&SMOKE_SPELLINGS),
        label_cell(&GENDER_SPELLINGS),
        label_cell(&SMOKE_SPELLINGS),
    )
        .prop_map(|(a, b, c, d, e, f)| [a, b, c, d, e, f])
}

proptest! {
    #[test]
    fn normalization_is_idempotent(rows in prop::collection::vec(row(), 0..60)) {
        let once = normalize(&raw_table(&rows)).unwrap();
        let twice = normalize(&once.to_raw_table()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn categorical_values_are_canonical(rows in prop::collection::vec(row(), 1..60)) {
        let data = normalize(&raw_table(&rows)).unwrap();
        let text = data.to_raw_table();
        for row in text.rows() {
            prop_assert!(row[3] == "Yes" || row[3] == "No");
            prop_assert!(row[4] == "Male" || row[4] == "Female");
            prop_assert!(row[5] == "Yes" || row[5] == "No");
        }
        for subject in data.iter() {
            for column in Categorical::ALL {
                prop_assert!(column.levels().contains(&column.label(subject)));
            }
        }
    }

    #[test]
    fn rows_only_shrink_and_stay_complete(rows in prop::collection::vec(row(), 0..60)) {
        let raw = raw_table(&rows);
        let records = canonicalize(&raw).unwrap();
        prop_assert_eq!(records.len(), raw.len());

        let data = records.complete_cases();
        prop_assert!(data.len() <= raw.len());
        for column in Continuous::ALL {
            prop_assert!(data.column(column).iter().all(|v| v.is_finite()));
        }
    }
}
