//! Two-sample t-tests

use crate::types::{TestResult, VarianceAssumption};
use lungcap_core::inference::t_two_sided_p;
use lungcap_core::{Error, Result};

/// Mean and sample variance (ddof = 1)
pub(crate) fn mean_var(x: &[f64]) -> (f64, f64) {
    let n = x.len() as f64;
    let mean = x.iter().sum::<f64>() / n;
    let var = x.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var)
}

/// Two-sided test of equal means; the statistic is positive when `first`
/// has the larger mean
pub fn t_test(first: &[f64], second: &[f64], variance: VarianceAssumption) -> Result<TestResult> {
    for sample in [first, second] {
        if sample.len() < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: sample.len(),
            });
        }
        if sample.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("t-test sample"));
        }
    }

    let (n1, n2) = (first.len() as f64, second.len() as f64);
    let (m1, v1) = mean_var(first);
    let (m2, v2) = mean_var(second);

    let (std_error, df) = match variance {
        VarianceAssumption::Equal => {
            let df = n1 + n2 - 2.0;
            let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / df;
            ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
        }
        VarianceAssumption::Unequal => {
            let (a, b) = (v1 / n1, v2 / n2);
            let df = (a + b).powi(2) / (a * a / (n1 - 1.0) + b * b / (n2 - 1.0));
            ((a + b).sqrt(), df)
        }
    };
    if std_error == 0.0 {
        return Err(Error::Computation(
            "Both samples are constant; t statistic undefined".to_string(),
        ));
    }

    let t = (m1 - m2) / std_error;
    Ok(TestResult::new(
        variance.test_kind(),
        t,
        t_two_sided_p(t, df)?,
        Some(df),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TestKind;
    use approx::assert_relative_eq;

    const A: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
    const B: [f64; 5] = [2.0, 4.0, 6.0, 8.0, 10.0];

    #[test]
    fn test_student() {
        let r = t_test(&A, &B, VarianceAssumption::Equal).unwrap();
        assert_eq!(r.kind, TestKind::StudentT);
        assert_relative_eq!(r.statistic, -1.897366596, epsilon = 1e-8);
        assert_eq!(r.df, Some(8.0));
        assert_relative_eq!(r.p_value, t_two_sided_p(-1.897366596, 8.0).unwrap(), epsilon = 1e-8);
    }

    #[test]
    fn test_welch() {
        let r = t_test(&A, &B, VarianceAssumption::Unequal).unwrap();
        assert_eq!(r.kind, TestKind::WelchT);
        // equal group sizes give the same statistic as the pooled test
        assert_relative_eq!(r.statistic, -1.897366596, epsilon = 1e-8);
        assert_relative_eq!(r.df.unwrap(), 5.882352941, epsilon = 1e-8);
        let student = t_test(&A, &B, VarianceAssumption::Equal).unwrap();
        assert!(r.p_value > student.p_value);
    }

    #[test]
    fn test_sign_follows_first_sample() {
        let r = t_test(&B, &A, VarianceAssumption::Equal).unwrap();
        assert!(r.statistic > 0.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(t_test(&[1.0], &B, VarianceAssumption::Equal).is_err());
        assert!(t_test(&[2.0, 2.0], &[2.0, 2.0, 2.0], VarianceAssumption::Equal).is_err());
        assert!(t_test(&[1.0, f64::NAN], &B, VarianceAssumption::Unequal).is_err());
    }
}
