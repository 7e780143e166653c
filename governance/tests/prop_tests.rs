use proptest::prelude::*;

use cps_governance::{classify_progress_report, classify_proposal, tally, DisplayStatus, Percentage};
use cps_types::{PeriodName, ProgressReportStatus, ProposalStatus};

fn period() -> impl Strategy<Value = PeriodName> {
    prop::sample::select(PeriodName::ALL.to_vec())
}

proptest! {
    /// approved(a, t) is a/t truncated to a tenth of a percent, and 0 when t is 0.
    #[test]
    fn approved_is_truncated_ratio(t in 0u64..1_000_000, a_frac in 0.0f64..=1.0) {
        let a = (t as f64 * a_frac) as u64;
        let result = tally(a as u128, 0, t as u128);
        if t == 0 {
            prop_assert_eq!(result.approved, Percentage::ZERO);
        } else {
            let exact = a as f64 / t as f64 * 100.0;
            let got = result.approved.as_f64();
            prop_assert!(got <= exact + 1e-9);
            prop_assert!(exact - got < 0.1 + 1e-9);
        }
        prop_assert!(result.approved <= Percentage::HUNDRED);
    }

    /// The three shares sum to 100.0 whenever anything was cast.
    #[test]
    fn shares_sum_to_hundred(a in 0u128..10_000, r in 0u128..10_000, extra in 0u128..10_000) {
        let total = a + r + extra;
        let t = tally(a, r, total);
        let sum = t.approved.tenths() + t.rejected.tenths() + t.abstained.tenths();
        if total == 0 {
            prop_assert_eq!(sum, 0);
        } else {
            prop_assert_eq!(sum, 1000);
        }
    }

    /// Repeated calls agree.
    #[test]
    fn tally_is_idempotent(a in any::<u64>(), r in any::<u64>(), t in any::<u64>()) {
        let (a, r, t) = (a as u128, r as u128, t as u128);
        prop_assert_eq!(tally(a, r, t), tally(a, r, t));
    }

    /// Every known raw status in every period has a visible display status.
    #[test]
    fn classifier_is_total(p in period(), idx in 0usize..6, report_idx in 0usize..3) {
        let status = ProposalStatus::ALL[idx];
        prop_assert!(classify_proposal(status.as_wire(), p).is_visible());
        let report = ProgressReportStatus::ALL[report_idx];
        prop_assert!(classify_progress_report(report.as_wire(), p).is_visible());
    }

    /// Arbitrary strings never panic and fall back to Unknown when unrecognised.
    #[test]
    fn classifier_never_panics(raw in ".*", p in period()) {
        let status = classify_proposal(&raw, p);
        if ProposalStatus::parse(&raw).is_none() {
            prop_assert_eq!(status, DisplayStatus::Unknown);
        }
        let _ = classify_progress_report(&raw, p);
    }
}
