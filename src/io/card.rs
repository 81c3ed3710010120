//! Material-card emission.
//!
//! The card is the machine-readable hand-off to a finite-element solver, so
//! its layout is fixed:
//!
//! ```text
//! *Material, name=ViscoelasticMaterial
//! *Elastic, modulus=<E_0 to 2 decimals>
//! *Viscoelastic, time=PRONY
//! <g_i to 6 decimals>, 0.000000, <tau_i in %.6e notation>
//! ```
//!
//! One coefficient line per retained term, ascending in relaxation time. The
//! second column is the (unused) bulk weight, always `0.000000`. Terms whose
//! weight does not exceed the inclusion threshold are omitted outright, not
//! zero-filled; downstream consumers expect the shorter card.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{FitOptions, PronySeries};
use crate::error::AppError;

/// Render a material card to a `String`.
pub fn render_card(series: &PronySeries, options: &FitOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!("*Material, name={}\n", options.material_name));
    out.push_str(&format!("*Elastic, modulus={:.2}\n", series.e_zero));
    out.push_str("*Viscoelastic, time=PRONY\n");

    for term in series.retained(options.inclusion_threshold) {
        out.push_str(&format!(
            "{:.6}, 0.000000, {}\n",
            term.weight,
            format_scientific(term.tau_seconds)
        ));
    }

    out
}

/// Write a material card to a file.
pub fn write_card(path: &Path, series: &PronySeries, options: &FitOptions) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            4,
            format!("Failed to create material card '{}': {e}", path.display()),
        )
    })?;
    file.write_all(render_card(series, options).as_bytes())
        .map_err(|e| {
            AppError::new(
                4,
                format!("Failed to write material card '{}': {e}", path.display()),
            )
        })?;
    Ok(())
}

/// Format like C's `%.6e`: six fractional digits, signed two-digit exponent.
///
/// Rust's `{:.6e}` writes `2.738602e-1`; card consumers parse the
/// `2.738602e-01` shape, so the exponent is re-padded here.
fn format_scientific(v: f64) -> String {
    let s = format!("{v:.6e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => format!("{mantissa}e{exp:+03}"),
            Err(_) => s,
        },
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PronyTerm;

    fn series() -> PronySeries {
        PronySeries {
            e_inf: 32.157853,
            e_max: 3093.966722,
            e_zero: 3216.0,
            terms: vec![
                PronyTerm {
                    tau_seconds: 1e-6,
                    modulus: 900.0,
                    weight: 0.2738602,
                },
                PronyTerm {
                    tau_seconds: 1e-2,
                    modulus: 0.3,
                    weight: 0.00009,
                },
                PronyTerm {
                    tau_seconds: 1e2,
                    modulus: 1200.0,
                    weight: 0.3731343,
                },
            ],
        }
    }

    #[test]
    fn scientific_format_pads_exponent() {
        assert_eq!(format_scientific(0.2738602), "2.738602e-01");
        assert_eq!(format_scientific(1234.5), "1.234500e+03");
        assert_eq!(format_scientific(1e-6), "1.000000e-06");
        assert_eq!(format_scientific(1e6), "1.000000e+06");
        assert_eq!(format_scientific(1.0), "1.000000e+00");
    }

    #[test]
    fn card_layout_is_fixed() {
        let card = render_card(&series(), &FitOptions::default());
        let lines: Vec<&str> = card.lines().collect();

        assert_eq!(lines[0], "*Material, name=ViscoelasticMaterial");
        assert_eq!(lines[1], "*Elastic, modulus=3216.00");
        assert_eq!(lines[2], "*Viscoelastic, time=PRONY");
        // The 9e-5 term is below the inclusion threshold and disappears.
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[3], "0.273860, 0.000000, 1.000000e-06");
        assert_eq!(lines[4], "0.373134, 0.000000, 1.000000e+02");
    }

    #[test]
    fn coefficient_lines_match_consumer_pattern() {
        let card = render_card(&series(), &FitOptions::default());
        for line in card.lines().skip(3) {
            let fields: Vec<&str> = line.split(", ").collect();
            assert_eq!(fields.len(), 3, "bad line: {line}");
            assert!(fields[0].parse::<f64>().is_ok());
            assert_eq!(fields[1], "0.000000");
            assert!(fields[2].contains('e'));
            assert!(fields[2].parse::<f64>().is_ok());
        }
    }

    #[test]
    fn custom_name_and_threshold() {
        let options = FitOptions {
            material_name: "Rubber60".to_string(),
            inclusion_threshold: 0.3,
            ..FitOptions::default()
        };
        let card = render_card(&series(), &options);
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(lines[0], "*Material, name=Rubber60");
        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("0.373134, "));
    }

    #[test]
    fn headers_are_emitted_even_when_no_term_survives() {
        let options = FitOptions {
            inclusion_threshold: 1.0,
            ..FitOptions::default()
        };
        let card = render_card(&series(), &options);
        assert_eq!(card.lines().count(), 3);
        assert!(card.ends_with("time=PRONY\n"));
    }
}
