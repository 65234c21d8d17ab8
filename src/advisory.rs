//! Health Advisory
//!
//! Threshold alerts and activity recommendations derived from an AQI value.
//! Timestamps are supplied by the caller so every function here stays pure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// AQI above which a moderate alert is raised.
pub const MODERATE_ALERT_AQI: u32 = 100;
/// AQI above which a severe alert is raised.
pub const SEVERE_ALERT_AQI: u32 = 200;
/// AQI above which an emergency alert is raised.
pub const EMERGENCY_ALERT_AQI: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Moderate,
    Severe,
    Emergency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub title: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "no_items")]
    pub actions: &'static [&'static str],
    #[serde(skip_serializing_if = "no_items")]
    pub affected_groups: &'static [&'static str],
    pub aqi: u32,
    pub issued_at: DateTime<Utc>,
}

fn no_items(list: &&'static [&'static str]) -> bool {
    list.is_empty()
}

/// Regular air-quality alert: severe above 200, moderate above 100.
pub fn air_quality_alert(aqi: u32, issued_at: DateTime<Utc>) -> Option<Alert> {
    let (level, title, message) = if aqi > SEVERE_ALERT_AQI {
        (
            AlertLevel::Severe,
            "Poor Air Quality Alert",
            "Air quality is poor. Limit outdoor activities.",
        )
    } else if aqi > MODERATE_ALERT_AQI {
        (
            AlertLevel::Moderate,
            "Moderate Air Quality",
            "Sensitive individuals should limit outdoor activities.",
        )
    } else {
        return None;
    };

    Some(Alert {
        level,
        title,
        message,
        actions: &[],
        affected_groups: &[],
        aqi,
        issued_at,
    })
}

/// Emergency alert above 300.
pub fn emergency_alert(aqi: u32, issued_at: DateTime<Utc>) -> Option<Alert> {
    (aqi > EMERGENCY_ALERT_AQI).then(|| Alert {
        level: AlertLevel::Emergency,
        title: "SEVERE AIR QUALITY EMERGENCY",
        message: "Extremely hazardous air quality. Stay indoors, avoid all outdoor activities.",
        actions: &[
            "Close all windows",
            "Use air purifiers",
            "Seek medical help if experiencing symptoms",
        ],
        affected_groups: &["Everyone", "Especially sensitive individuals"],
        aqi,
        issued_at,
    })
}

/// All alerts that apply to `aqi`, most severe first.
pub fn alerts_for(aqi: u32, issued_at: DateTime<Utc>) -> Vec<Alert> {
    emergency_alert(aqi, issued_at)
        .into_iter()
        .chain(air_quality_alert(aqi, issued_at))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserGroup {
    #[default]
    General,
    Sensitive,
    Elderly,
    Children,
}

impl FromStr for UserGroup {
    type Err = std::convert::Infallible;

    /// Unrecognised groups get general guidance.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "sensitive" => UserGroup::Sensitive,
            "elderly" => UserGroup::Elderly,
            "children" => UserGroup::Children,
            _ => UserGroup::General,
        })
    }
}

/// Activity guidance for one user group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub user_group: UserGroup,
    pub aqi: u32,
    pub outdoor_activities: &'static str,
    pub exercise: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication: Option<&'static str>,
}

/// Recommendations for `group` at `aqi`.
///
/// Elderly and children follow the sensitive-group thresholds.
pub fn recommendations(aqi: u32, group: UserGroup) -> Recommendations {
    match group {
        UserGroup::General => Recommendations {
            user_group: group,
            aqi,
            outdoor_activities: tiered(aqi, 100, 200, "Safe", "Limited", "Avoid"),
            exercise: tiered(aqi, 100, 200, "Normal", "Reduce intensity", "Indoor only"),
            windows: Some(tiered(aqi, 100, 200, "Open", "Limited opening", "Keep closed")),
            medication: None,
        },
        UserGroup::Sensitive | UserGroup::Elderly | UserGroup::Children => Recommendations {
            user_group: group,
            aqi,
            outdoor_activities: tiered(aqi, 50, 100, "Safe", "Limited", "Avoid"),
            exercise: if aqi > 100 { "Light only" } else { "Normal" },
            windows: None,
            medication: Some(if aqi < 100 { "Normal" } else { "Have rescue inhaler ready" }),
        },
    }
}

fn tiered(aqi: u32, low: u32, high: u32, a: &'static str, b: &'static str, c: &'static str) -> &'static str {
    if aqi < low {
        a
    } else if aqi < high {
        b
    } else {
        c
    }
}
