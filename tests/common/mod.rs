//! Shared fixtures for the end-to-end tests

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::path::PathBuf;

const SMOKE_YES: [&str; 5] = ["yes", "Yes", " Y ", "1", "TRUE"];
const SMOKE_NO: [&str; 5] = ["no", "N", "0", "false", "No"];
const MALE: [&str; 4] = ["male", "M", "Male", "MALE"];
const FEMALE: [&str; 4] = ["female", "f", "Female", "F"];

/// CSV text with an index column, `valid` complete rows in mixed spellings,
/// and three rows that normalization must drop
pub fn cohort_csv(valid: usize, seed: u64) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let height_noise = Normal::new(0.0, 2.5).unwrap();
    let noise = Normal::new(0.0, 1.0).unwrap();

    let mut out = String::from("Unnamed: 0,LungCap,Age,Height,Smoke,Gender,Caesarean\n");
    for i in 0..valid {
        let age = rng.gen_range(3..=19) as f64;
        let height = ((46.0 + 1.3 * age + height_noise.sample(&mut rng)) * 10.0).round() / 10.0;
        let smoke = rng.gen_bool(if age > 10.0 { 0.3 } else { 0.02 });
        let male = rng.gen_bool(0.5);
        let caesarean = rng.gen_bool(0.2);
        let lung_cap = -11.5 + 0.12 * age + 0.27 * height - if smoke { 0.6 } else { 0.0 }
            + if male { 0.35 } else { 0.0 }
            - if caesarean { 0.2 } else { 0.0 }
            + noise.sample(&mut rng);

        let pick = |labels: &[&'static str]| labels[i % labels.len()];
        out.push_str(&format!(
            "{},{lung_cap},{age},{height},{},{},{}\n",
            i + 1,
            pick(if smoke { &SMOKE_YES } else { &SMOKE_NO }),
            pick(if male { &MALE } else { &FEMALE }),
            pick(if caesarean { &SMOKE_YES } else { &SMOKE_NO }),
        ));
    }
    let n = valid;
    out.push_str(&format!("{},abc,12,60.1,no,male,no\n", n + 1));
    out.push_str(&format!("{},7.1,12,60.1,maybe,male,no\n", n + 2));
    out.push_str(&format!("{},7.1,12,,no,female,no\n", n + 3));
    out
}

/// Fresh scratch directory for one test
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lungcap-stats-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write the default cohort and return its path
pub fn write_cohort(name: &str) -> PathBuf {
    let dir = scratch_dir(name);
    let path = dir.join("LungCapData.csv");
    std::fs::write(&path, cohort_csv(654, 42)).unwrap();
    path
}
