/// Which value the readout and the trend overlay track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadoutValue {
    /// Value of the ranked leader (e.g. a "World" row).
    #[default]
    Leader,
    /// Sum over all entities.
    Sum,
}

/// How the readout line is built from a value.
///
/// `Total: 7.80 billion` is `label = "Total"`, `divisor = 1e9`, `decimals = 2`,
/// `unit = "billion"`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReadoutFormat {
    /// Value source.
    pub value: ReadoutValue,
    /// Text before the number.
    pub label: String,
    /// The value is divided by this before formatting.
    pub divisor: f64,
    /// Fraction digits.
    pub decimals: usize,
    /// Text after the number.
    pub unit: String,
}

impl Default for ReadoutFormat {
    fn default() -> Self {
        Self {
            value: ReadoutValue::Leader,
            label: "Total".to_owned(),
            divisor: 1.0,
            decimals: 0,
            unit: String::new(),
        }
    }
}

impl ReadoutFormat {
    /// Render the readout line for `value`.
    pub fn render(&self, value: f64) -> String {
        let number = format_number(value / self.divisor, self.decimals);
        let mut out = String::new();
        if !self.label.is_empty() {
            out.push_str(&self.label);
            out.push_str(": ");
        }
        out.push_str(&number);
        if !self.unit.is_empty() {
            out.push(' ');
            out.push_str(&self.unit);
        }
        out
    }
}

/// Format with `,` thousands separators and `.` as decimal point.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 2);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(f) = frac_part {
        grouped.push('.');
        grouped.push_str(f);
    }

    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    if value < 0.0 && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
#[path = "../../tests/unit/chart/format.rs"]
mod tests;
