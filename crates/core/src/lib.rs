//! Core constants and shared primitives for the MRUV calculator workspace.

/// Defaults shared by the engine, the session controller and the binaries.
pub mod constants {
    /// Decimal places used for numeric results in explanations.
    pub const DISPLAY_DECIMALS: usize = 2;
    /// Start of the default sampling window (s).
    pub const DEFAULT_WINDOW_START_S: f64 = 0.0;
    /// End of the default sampling window (s).
    pub const DEFAULT_WINDOW_END_S: f64 = 10.0;
    /// Default sampling step (s).
    pub const DEFAULT_STEP_S: f64 = 0.1;
    /// File name of the session history in the working directory.
    pub const HISTORY_FILE: &str = "history.json";
    /// Absolute tolerance used when comparing roots and interval bounds.
    pub const ROOT_TOLERANCE: f64 = 1.0e-9;
}

/// Number formatting helpers for labels and explanations.
pub mod format {
    use super::constants::DISPLAY_DECIMALS;

    /// Round to the display precision used in explanations.
    #[inline]
    pub fn round_display(value: f64) -> f64 {
        let factor = 10f64.powi(DISPLAY_DECIMALS as i32);
        (value * factor).round() / factor
    }

    /// Format with the fixed display precision, e.g. `35.00`.
    pub fn fixed(value: f64) -> String {
        // avoid printing "-0.00"
        let rounded = round_display(value);
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        format!("{:.*}", DISPLAY_DECIMALS, rounded)
    }

    /// Shortest readable rendering of a coefficient: `5`, `-4.9`, `0.125`.
    ///
    /// Integral values drop the fractional part, everything else is rounded to
    /// ten significant decimals so that `0.1 + 0.2` prints as `0.3`.
    pub fn compact(value: f64) -> String {
        if !value.is_finite() {
            return format!("{value}");
        }
        let value = if value == 0.0 { 0.0 } else { value };
        if value.fract() == 0.0 && value.abs() < 1.0e15 {
            return format!("{}", value as i64);
        }
        let text = format!("{value:.10}");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        if text == "-0" {
            "0".to_string()
        } else {
            text.to_string()
        }
    }

    /// Label for a highlighted instant, e.g. `s(3.0)`.
    pub fn instant_label(symbol: &str, t: f64) -> String {
        format!("{symbol}({t:.1})")
    }
}

/// Small floating-point comparison helpers.
pub mod numeric {
    use super::constants::ROOT_TOLERANCE;

    /// True when `a` and `b` agree within an absolute/relative tolerance.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        let scale = a.abs().max(b.abs()).max(1.0);
        (a - b).abs() <= ROOT_TOLERANCE * scale
    }

    /// True when `value` is zero within the shared tolerance.
    #[inline]
    pub fn is_negligible(value: f64) -> bool {
        value.abs() <= ROOT_TOLERANCE
    }
}
