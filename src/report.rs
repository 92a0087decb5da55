//! Aggregation of the check results of one validation run.

use crate::validate::CheckResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub results: Vec<CheckResult>,
}
impl Report {
    pub fn new(results: Vec<CheckResult>) -> Self {
        Self { results }
    }

    /// One line per result, in the order the checks ran.
    pub fn lines(&self) -> Vec<String> {
        self.results.iter().map(ToString::to_string).collect()
    }

    pub fn passed(&self) -> bool {
        self.results.iter().all(CheckResult::passed)
    }

    pub fn failures(&self) -> usize {
        self.results.iter().filter(|result| !result.passed()).count()
    }

    pub fn verdict(&self) -> String {
        if self.passed() {
            format!("PASS: all {} checks passed", self.results.len())
        } else {
            format!("FAIL: {} of {} checks failed", self.failures(), self.results.len())
        }
    }

    /// Process exit status: zero when every check passed.
    pub fn exit_status(&self) -> u8 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

impl From<Vec<CheckResult>> for Report {
    fn from(results: Vec<CheckResult>) -> Self {
        Self::new(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::ratio;

    fn result(latex_repr_ok: bool, decimal_repr_ok: Option<bool>) -> CheckResult {
        CheckResult {
            label: "Problem".into(),
            expected: ratio(1, 2),
            latex_repr_ok,
            decimal_repr_ok,
            message: "".into(),
        }
    }

    #[test]
    fn result_pass_rules() {
        assert!(result(true, None).passed());
        assert!(result(true, Some(true)).passed());
        assert!(!result(true, Some(false)).passed());
        assert!(!result(false, None).passed());
        assert!(!result(false, Some(true)).passed());
    }

    #[test]
    fn all_passing() {
        let report = Report::new(vec![result(true, None), result(true, Some(true))]);
        assert!(report.passed());
        assert_eq!(0, report.failures());
        assert_eq!(0, report.exit_status());
        assert_eq!("PASS: all 2 checks passed", report.verdict());
    }

    #[test]
    fn one_failing() {
        let report = Report::from(vec![result(true, None), result(true, Some(false))]);
        assert!(!report.passed());
        assert_eq!(1, report.failures());
        assert_eq!(1, report.exit_status());
        assert_eq!("FAIL: 1 of 2 checks failed", report.verdict());
    }

    #[test]
    fn empty_passes() {
        let report = Report::new(vec![]);
        assert!(report.passed());
        assert!(report.lines().is_empty());
    }

    #[test]
    fn lines() {
        let report = Report::new(vec![result(true, None), result(false, Some(true))]);
        assert_eq!(
            vec![
                "[PASS] Problem: expected 1/2 ≈ 0.500000 | fraction OK | ".to_string(),
                "[FAIL] Problem: expected 1/2 ≈ 0.500000 | fraction MISSING | decimal OK | ".to_string(),
            ],
            report.lines()
        );
    }
}
