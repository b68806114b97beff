//! Display and validation helpers shared by the patient pages.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::net::types::{Patient, Vitals};

const NOT_RECORDED: &str = "Not recorded";

/// `"critical"` -> `"Critical"`.
#[must_use]
pub fn format_status(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One decimal place, e.g. `55.0%`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Vitals with units, `Not recorded` for missing readings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VitalsDisplay {
    pub blood_pressure: String,
    pub heart_rate: String,
    pub temperature: String,
    pub oxygen_level: String,
}

#[must_use]
pub fn format_vitals(vitals: Option<&Vitals>) -> VitalsDisplay {
    let vitals = vitals.cloned().unwrap_or_default();
    VitalsDisplay {
        blood_pressure: vitals
            .blood_pressure
            .filter(|bp| !bp.trim().is_empty())
            .map_or_else(|| NOT_RECORDED.to_owned(), |bp| format!("{bp} mmHg")),
        heart_rate: vitals.heart_rate.map_or_else(|| NOT_RECORDED.to_owned(), |hr| format!("{hr} bpm")),
        temperature: vitals.temperature.map_or_else(|| NOT_RECORDED.to_owned(), |t| format!("{t:.1}°C")),
        oxygen_level: vitals.oxygen_level.map_or_else(|| NOT_RECORDED.to_owned(), |o| format!("{o:.1}%")),
    }
}

/// `Some("")` and `None` both show as `N/A`.
#[must_use]
pub fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_owned(),
        _ => "N/A".to_owned(),
    }
}

/// `local@domain.tld` shape check; no whitespace anywhere.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// At least 8 characters with upper, lower, digit and a special character.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SPECIAL_CHARS.contains(c))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Age,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Stable sort; names compare case-insensitively.
pub fn sort_patients(patients: &mut [Patient], key: SortKey, order: SortOrder) {
    patients.sort_by(|a, b| {
        let ord = match key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Age => a.age.cmp(&b.age),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

/// Share of patients per status, in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatusStatistics {
    pub total: usize,
    pub active: f64,
    pub recovered: f64,
    pub critical: f64,
}

#[must_use]
pub fn status_statistics(patients: &[Patient]) -> StatusStatistics {
    let total = patients.len();
    if total == 0 {
        return StatusStatistics::default();
    }
    #[allow(clippy::cast_precision_loss)]
    let share = |status: &str| {
        let count = patients.iter().filter(|p| p.status.eq_ignore_ascii_case(status)).count();
        count as f64 * 100.0 / total as f64
    };
    StatusStatistics { total, active: share("active"), recovered: share("recovered"), critical: share("critical") }
}
