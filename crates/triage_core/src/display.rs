//! Display attributes derived from a classification result.

use crate::EmailAnalysis;

/// Category label the backend uses for emails that need action.
pub const PRODUCTIVE_CATEGORY: &str = "Produtivo";

/// Shown while a submission is in flight.
pub const LOADING_TEXT: &str = "Analyzing email...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryClass {
    Productive,
    Unproductive,
}

impl CategoryClass {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryClass::Productive => "category-productive",
            CategoryClass::Unproductive => "category-unproductive",
        }
    }
}

/// Three-band confidence scale, plus a neutral colour when there is no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceColor {
    Success,
    Warning,
    Danger,
    Neutral,
}

impl ConfidenceColor {
    pub fn hex(self) -> &'static str {
        match self {
            ConfidenceColor::Success => "#2ecc71",
            ConfidenceColor::Warning => "#f39c12",
            ConfidenceColor::Danger => "#e74c3c",
            ConfidenceColor::Neutral => "#95a5a6",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ConfidenceColor::Success => (0x2e, 0xcc, 0x71),
            ConfidenceColor::Warning => (0xf3, 0x9c, 0x12),
            ConfidenceColor::Danger => (0xe7, 0x4c, 0x3c),
            ConfidenceColor::Neutral => (0x95, 0xa5, 0xa6),
        }
    }
}

/// Exact, case-sensitive match against [`PRODUCTIVE_CATEGORY`].
pub fn category_class(analysis: &EmailAnalysis) -> CategoryClass {
    if analysis.category == PRODUCTIVE_CATEGORY {
        CategoryClass::Productive
    } else {
        CategoryClass::Unproductive
    }
}

pub fn confidence_color(analysis: Option<&EmailAnalysis>) -> ConfidenceColor {
    match analysis {
        None => ConfidenceColor::Neutral,
        Some(a) if a.confidence >= 0.80 => ConfidenceColor::Success,
        Some(a) if a.confidence >= 0.60 => ConfidenceColor::Warning,
        Some(_) => ConfidenceColor::Danger,
    }
}

/// Human-readable size in base 1024 with at most two decimals, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}
