//! Read-only projections over stored collections: display sort orders,
//! listing counters and the feeding/potty reminders. Nothing here is
//! persisted.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{Apartment, ApartmentStatus, DailyLogEntry, LogType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    Latest,
    Oldest,
    PriceLow,
    PriceHigh,
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(SortOption::Latest),
            "oldest" => Ok(SortOption::Oldest),
            "price-low" => Ok(SortOption::PriceLow),
            "price-high" => Ok(SortOption::PriceHigh),
            other => Err(format!(
                "Unknown sort option: {} (expected latest|oldest|price-low|price-high)",
                other
            )),
        }
    }
}

/// Numeric value of a display price such as "$2,400".
///
/// Everything except digits, `.` and `-` is dropped; anything that still does
/// not parse counts as 0.
pub fn parse_price(price: &str) -> f64 {
    let cleaned: String = price
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Stable sort of the listings for display.
pub fn sorted_apartments(apartments: &[Apartment], order: SortOption) -> Vec<&Apartment> {
    let mut list: Vec<&Apartment> = apartments.iter().collect();
    let by_price = |a: &&Apartment, b: &&Apartment| -> Ordering {
        parse_price(&a.price).total_cmp(&parse_price(&b.price))
    };
    match order {
        SortOption::PriceLow => list.sort_by(by_price),
        SortOption::PriceHigh => list.sort_by(|a, b| by_price(b, a)),
        SortOption::Oldest => list.sort_by_key(|a| a.created_at),
        SortOption::Latest => list.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    list
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApartmentStats {
    pub saved: usize,
    pub toured: usize,
    pub applied: usize,
}

pub fn apartment_stats(apartments: &[Apartment]) -> ApartmentStats {
    let count = |status: ApartmentStatus| apartments.iter().filter(|a| a.status == status).count();
    ApartmentStats {
        saved: apartments.len(),
        toured: count(ApartmentStatus::Touring),
        applied: count(ApartmentStatus::Applied),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Potty,
    Lunch,
    Dinner,
}

impl AlertKind {
    /// Stable id used to dismiss the alert.
    pub fn id(self) -> &'static str {
        match self {
            AlertKind::Potty => "potty_alert",
            AlertKind::Lunch => "lunch_alert",
            AlertKind::Dinner => "dinner_alert",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub detail: String,
    pub icon: &'static str,
    /// Label for the one-tap log action offered with the alert.
    pub action: &'static str,
    pub action_type: LogType,
}

fn label_mentions(logs: &[DailyLogEntry], word: &str) -> bool {
    logs.iter()
        .any(|entry| entry.label.to_lowercase().contains(word))
}

/// Reminders for the current `hour` (0-23), skipping dismissed alert ids.
///
/// The potty alert follows the most recent meal, which is the first Meal entry
/// since logs are stored newest first. At most one meal reminder is raised.
pub fn smart_alerts(
    logs: &[DailyLogEntry],
    hour: u32,
    dismissed: &[String],
    puppy_name: &str,
) -> Vec<Alert> {
    let is_dismissed = |kind: AlertKind| dismissed.iter().any(|d| d == kind.id());
    let mut alerts = Vec::new();

    let last_meal = logs.iter().find(|entry| entry.kind == LogType::Meal);
    if let Some(meal) = last_meal {
        if !is_dismissed(AlertKind::Potty) {
            alerts.push(Alert {
                kind: AlertKind::Potty,
                message: "Potty Break Alert".to_string(),
                detail: format!(
                    "{} finished \"{}\" at {}. High probability of needing a bathroom break in the next 15-30 minutes.",
                    puppy_name, meal.label, meal.time
                ),
                icon: "warning",
                action: "Log Potty",
                action_type: LogType::Pee,
            });
        }
    }

    if (11..=13).contains(&hour)
        && !label_mentions(logs, "lunch")
        && !is_dismissed(AlertKind::Lunch)
    {
        alerts.push(Alert {
            kind: AlertKind::Lunch,
            message: "Lunch Time Soon".to_string(),
            detail: format!(
                "{} hasn't had lunch yet. Prepare 1.5 cups of puppy kibble.",
                puppy_name
            ),
            icon: "restaurant",
            action: "Log Lunch",
            action_type: LogType::Meal,
        });
    } else if (17..=19).contains(&hour)
        && !label_mentions(logs, "dinner")
        && !is_dismissed(AlertKind::Dinner)
    {
        alerts.push(Alert {
            kind: AlertKind::Dinner,
            message: "Dinner Reminder".to_string(),
            detail: "It's dinner time for a growing Golden! High energy expected if skipped."
                .to_string(),
            icon: "notifications_active",
            action: "Log Dinner",
            action_type: LogType::Meal,
        });
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn parse_price_handles_display_strings() {
        assert_eq!(parse_price("$2,400"), 2400.0);
        assert_eq!(parse_price("$1,950.50/mo"), 1950.5);
        assert_eq!(parse_price("call"), 0.0);
    }

    #[test]
    fn sort_options_reorder_without_touching_input() {
        fn titles(apartments: &[Apartment], order: SortOption) -> Vec<&str> {
            sorted_apartments(apartments, order)
                .into_iter()
                .map(|a| a.title.as_str())
                .collect()
        }
        let apartments = seed::apartments();

        assert_eq!(
            titles(&apartments, SortOption::PriceLow),
            ["Sunnyside Unit 4B", "The Lofts at River", "Greenview Apts"]
        );
        assert_eq!(
            titles(&apartments, SortOption::PriceHigh),
            ["Greenview Apts", "The Lofts at River", "Sunnyside Unit 4B"]
        );
        assert_eq!(
            titles(&apartments, SortOption::Oldest),
            ["Sunnyside Unit 4B", "Greenview Apts", "The Lofts at River"]
        );
        assert_eq!(apartments, seed::apartments());
    }

    #[test]
    fn stats_count_statuses() {
        let stats = apartment_stats(&seed::apartments());
        assert_eq!(
            stats,
            ApartmentStats {
                saved: 3,
                toured: 1,
                applied: 1
            }
        );
    }

    #[test]
    fn potty_alert_follows_latest_meal() {
        let alerts = smart_alerts(&seed::daily_logs(), 9, &[], "Cooper");
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Potty);
        assert!(alerts[0].detail.contains("\"Breakfast (1.5 cups)\" at 08:00 AM"));
    }

    #[test]
    fn meal_reminders_respect_window_and_dismissals() {
        let logs = seed::daily_logs();
        let dismissed = vec!["potty_alert".to_string()];

        let noon = smart_alerts(&logs, 12, &dismissed, "Cooper");
        assert_eq!(noon.iter().map(|a| a.kind).collect::<Vec<_>>(), [AlertKind::Lunch]);

        let evening = smart_alerts(&logs, 18, &dismissed, "Cooper");
        assert_eq!(evening.iter().map(|a| a.kind).collect::<Vec<_>>(), [AlertKind::Dinner]);

        let dismissed = vec!["potty_alert".to_string(), "lunch_alert".to_string()];
        assert!(smart_alerts(&logs, 12, &dismissed, "Cooper").is_empty());
        assert!(smart_alerts(&[], 15, &[], "Cooper").is_empty());
    }
}
