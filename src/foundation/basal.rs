use std::fmt::Debug;

/// A plain value usable as a constant leaf of a formuloid graph.
///
/// Basal values never depend on the parameter. The only behavior they must provide is a short
/// textual form for formula dumps; user types (e.g. a color enum) can rely on the default `?`.
pub trait Basal: Clone + Default + Debug + 'static {
    /// Append the formula text of this value to `out`.
    fn write_basal(&self, out: &mut String) {
        out.push('?');
    }
}

impl Basal for bool {
    fn write_basal(&self, out: &mut String) {
        out.push_str(if *self { "true" } else { "false" });
    }
}

impl Basal for i32 {
    fn write_basal(&self, out: &mut String) {
        out.push_str(&self.to_string());
    }
}

impl Basal for i64 {
    fn write_basal(&self, out: &mut String) {
        out.push_str(&self.to_string());
        out.push('l');
    }
}

impl Basal for f32 {
    fn write_basal(&self, out: &mut String) {
        write_float(out, f64::from(*self), "f");
    }
}

impl Basal for f64 {
    fn write_basal(&self, out: &mut String) {
        write_float(out, *self, "");
    }
}

impl Basal for String {
    fn write_basal(&self, out: &mut String) {
        out.push('"');
        write_simplified_str(out, self, STRING_CUT);
        out.push('"');
    }
}

/// Significant digits used when dumping floating point values.
const FLOAT_PRECISION: usize = 6;

/// Characters kept before a long string gets cut in formula dumps.
const STRING_CUT: usize = 16;

/// Write `value` in `%.6g` style, appending `.` to integral-looking output and then `suffix`.
///
/// Six digits are not always enough to represent the value; dumps are for debugging only.
pub(crate) fn write_float(out: &mut String, value: f64, suffix: &str) {
    if value.is_nan() {
        out.push_str("nan");
        return;
    }
    if value.is_infinite() {
        out.push_str(if value > 0.0 { "inf" } else { "-inf" });
        return;
    }

    // The exponent must be taken after rounding to the target precision.
    let sci = format!("{:.*e}", FLOAT_PRECISION - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    let text = if exp < -4 || exp >= FLOAT_PRECISION as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.unsigned_abs())
    } else {
        let decimals = (FLOAT_PRECISION as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_owned()
    };

    out.push_str(&text);
    if text.chars().all(|c| c.is_ascii_digit() || c == '-' || c == '+') {
        out.push('.');
    }
    out.push_str(suffix);
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Write a string so that it survives as a single formula token.
///
/// Spaces become `_`; quotes, parentheses and non-printable characters become `?`. Strings
/// significantly longer than `cut` are truncated with a trailing `...`.
pub(crate) fn write_simplified_str(out: &mut String, s: &str, cut: usize) {
    let chars: Vec<char> = s.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        let c = match c {
            ' ' => '_',
            '"' | '(' | ')' => '?',
            c if !c.is_ascii_graphic() => '?',
            c => c,
        };
        out.push(c);
        if i >= cut && chars.len() - i > 8 {
            out.push_str("...");
            break;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/basal.rs"]
mod tests;
