//! Number, percentage, and direction formatting for report tables.

/// Direction of a change, rendered as an arrow in the `Dir` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn of(change: i64) -> Self {
        match change.signum() {
            1 => Self::Up,
            -1 => Self::Down,
            _ => Self::Flat,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Flat => "→",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.symbol())
    }
}

/// Format an integer with comma thousands separators, e.g. `-1,234,567`.
pub fn format_number(n: impl Into<i128>) -> String {
    let n = n.into();
    let digits = n.unsigned_abs().to_string();
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk))
        .collect::<Vec<_>>()
        .join(",");

    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a percentage with one decimal, a `+` for positive values, and `%`.
pub fn format_percentage(pct: f64) -> String {
    let sign = if pct > 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, pct)
}
