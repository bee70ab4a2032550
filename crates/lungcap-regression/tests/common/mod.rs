//! Common test utilities for lungcap-regression tests

use lungcap_core::{Dataset, Gender, Subject, YesNo};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Synthetic cohort whose lung capacity grows with age and height, is lower
/// for smokers and spreads more for taller subjects
pub fn synthetic_dataset(n: usize, seed: u64) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();

    let subjects = (0..n)
        .map(|_| {
            let age: f64 = rng.gen_range(3.0..19.0);
            let height = 46.0 + 1.3 * age + rng.gen_range(-4.0..4.0);
            let smoke = age > 10.0 && rng.gen_bool(0.2);
            let male = rng.gen_bool(0.5);
            let sd = 0.6 + 0.02 * (height - 46.0);
            let lung_cap = -11.5 + 0.12 * age + 0.27 * height - 0.6 * f64::from(u8::from(smoke))
                + 0.35 * f64::from(u8::from(male))
                + sd * noise.sample(&mut rng);
            Subject {
                lung_cap,
                age,
                height,
                smoke: YesNo::from(smoke),
                gender: if male { Gender::Male } else { Gender::Female },
                caesarean: YesNo::from(rng.gen_bool(0.23)),
            }
        })
        .collect();
    Dataset::new(subjects)
}
