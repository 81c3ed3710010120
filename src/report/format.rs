//! Formatted terminal output for fit results.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{FitOptions, FitReport};

/// Format the full diagnostic report for one fitted sweep.
pub fn format_fit_report(report: &FitReport, options: &FitOptions) -> String {
    let s = &report.series;
    let q = &report.quality;
    let mut out = String::new();

    out.push_str(&format!("=== prony - Prony series fit: {} ===\n", report.label));
    out.push_str(&format!(
        "Points: n={} | f=[{:.3e}, {:.3e}] Hz\n",
        q.n,
        report.points[0].frequency_hz,
        report.points[report.points.len() - 1].frequency_hz,
    ));
    out.push_str(&format!("E_inf (modulus at lowest f) : {:.6}\n", s.e_inf));
    out.push_str(&format!("E_max (modulus at highest f): {:.6}\n", s.e_max));
    out.push_str(&format!("E_0   (E_inf + sum of E_i)  : {:.6}\n", s.e_zero));

    out.push_str("\nProny terms:\n");
    out.push_str(&format!(
        "{:>3} {:>14} {:>14} {:>12}\n",
        "i", "tau_s", "E_i", "g_i"
    ));
    out.push_str(&format!("{:->3} {:->14} {:->14} {:->12}\n", "", "", "", ""));
    for (i, term) in s.terms.iter().enumerate() {
        let dropped = if term.weight > options.inclusion_threshold {
            ""
        } else {
            "  (dropped)"
        };
        out.push_str(&format!(
            "{:>3} {:>14.6e} {:>14.4} {:>12.6}{dropped}\n",
            i, term.tau_seconds, term.modulus, term.weight
        ));
    }

    out.push_str(&format!(
        "\nSum of weights: {:.9} | 1 - E_inf/E_0: {:.9}\n",
        s.weight_sum(),
        1.0 - s.e_inf / s.e_zero
    ));
    out.push_str(&format!(
        "Retained terms (g_i > {:e}): {}\n",
        options.inclusion_threshold,
        s.retained(options.inclusion_threshold).len()
    ));

    out.push_str("\nFit quality:\n");
    out.push_str(&format!("- residual norm : {:.6}\n", q.residual_norm));
    out.push_str(&format!("- mean rel error: {:.4}%\n", q.mean_rel_error_pct));
    out.push_str(&format!("- max rel error : {:.4}%\n", q.max_rel_error_pct));
    if q.within_tolerance {
        out.push_str(&format!(
            "- verdict       : OK (within {:.1}%)\n",
            options.error_threshold_pct
        ));
    } else {
        out.push_str(&format!(
            "- verdict       : POOR FIT (exceeds {:.1}%); consider adjusting --terms or reviewing the data\n",
            options.error_threshold_pct
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitQuality, PointFit, PronySeries, PronyTerm};

    fn report(within: bool) -> FitReport {
        FitReport {
            label: "sweep".to_string(),
            series: PronySeries {
                e_inf: 30.0,
                e_max: 110.0,
                e_zero: 120.0,
                terms: vec![
                    PronyTerm {
                        tau_seconds: 0.01,
                        modulus: 50.0,
                        weight: 50.0 / 120.0,
                    },
                    PronyTerm {
                        tau_seconds: 1.0,
                        modulus: 0.0,
                        weight: 0.0,
                    },
                    PronyTerm {
                        tau_seconds: 100.0,
                        modulus: 40.0,
                        weight: 40.0 / 120.0,
                    },
                ],
            },
            points: vec![
                PointFit {
                    frequency_hz: 0.01,
                    measured: 31.0,
                    fitted: 30.9,
                    rel_error_pct: 0.3,
                },
                PointFit {
                    frequency_hz: 100.0,
                    measured: 110.0,
                    fitted: 111.0,
                    rel_error_pct: 0.9,
                },
            ],
            quality: FitQuality {
                residual_norm: 1.5,
                mean_rel_error_pct: 0.6,
                max_rel_error_pct: 0.9,
                within_tolerance: within,
                n: 2,
            },
        }
    }

    #[test]
    fn report_carries_key_figures() {
        let txt = format_fit_report(&report(true), &FitOptions::default());
        assert!(txt.contains("=== prony - Prony series fit: sweep ==="));
        assert!(txt.contains("E_inf (modulus at lowest f) : 30.000000"));
        assert!(txt.contains("E_0   (E_inf + sum of E_i)  : 120.000000"));
        assert!(txt.contains("Sum of weights: 0.750000000 | 1 - E_inf/E_0: 0.750000000"));
        assert!(txt.contains("Retained terms (g_i > 1e-4): 2"));
        assert!(txt.contains("- verdict       : OK (within 5.0%)"));
    }

    #[test]
    fn zero_weight_terms_are_marked_dropped() {
        let txt = format_fit_report(&report(true), &FitOptions::default());
        let dropped: Vec<&str> = txt.lines().filter(|l| l.ends_with("(dropped)")).collect();
        assert_eq!(dropped.len(), 1);
        assert!(dropped[0].trim_start().starts_with('1'));
    }

    #[test]
    fn poor_fit_verdict_flips() {
        let txt = format_fit_report(&report(false), &FitOptions::default());
        assert!(txt.contains("POOR FIT (exceeds 5.0%)"));
    }
}
