//! SLA progress computation.
//!
//! Maps a ticket's creation time, SLA deadline and the current time to a
//! clamped percentage of the SLA window consumed plus a severity tier.
//! Finished tickets (resolved or closed) have no SLA indicator.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::HelpdeskError;
use crate::types::TicketStatus;

/// Percentage above which a ticket is critical.
pub const CRITICAL_THRESHOLD: f64 = 80.0;

/// Percentage above which a ticket is in warning.
pub const WARNING_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlaTier {
    Normal,
    Warning,
    Critical,
    Breached,
}

enum_display_fromstr!(
    SlaTier,
    HelpdeskError::invalid_tier,
    {
        Normal => "normal",
        Warning => "warning",
        Critical => "critical",
        Breached => "breached",
    }
);

impl SlaTier {
    /// Classify a percentage. An externally set breach flag wins over
    /// anything the percentage says.
    pub fn classify(percentage: f64, breached: bool) -> Self {
        if breached {
            SlaTier::Breached
        } else if percentage > CRITICAL_THRESHOLD {
            SlaTier::Critical
        } else if percentage > WARNING_THRESHOLD {
            SlaTier::Warning
        } else {
            SlaTier::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlaProgress {
    /// Share of the SLA window consumed, always within `0.0..=100.0`.
    pub percentage: f64,
    pub tier: SlaTier,
}

impl SlaProgress {
    /// Percentage rounded for display.
    pub fn rounded(&self) -> u8 {
        self.percentage.round() as u8
    }
}

/// Compute SLA progress for a ticket.
///
/// Elapsed and total time are measured in whole minutes. A window of zero
/// (or negative) length counts as already expired once `now` has reached
/// `created_at`.
pub fn sla_progress(
    created_at: Timestamp,
    deadline: Timestamp,
    now: Timestamp,
    status: TicketStatus,
    breached: bool,
) -> Option<SlaProgress> {
    if status.is_terminal() {
        return None;
    }

    let percentage = window_percentage(created_at, deadline, now);
    Some(SlaProgress {
        percentage,
        tier: SlaTier::classify(percentage, breached),
    })
}

fn window_percentage(created_at: Timestamp, deadline: Timestamp, now: Timestamp) -> f64 {
    let total = whole_minutes(deadline.duration_since(created_at));
    let elapsed = whole_minutes(now.duration_since(created_at));

    if total <= 0 {
        return if now >= created_at { 100.0 } else { 0.0 };
    }

    (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

fn whole_minutes(duration: SignedDuration) -> i64 {
    duration.as_secs() / 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::ToSpan;

    fn t0() -> Timestamp {
        "2024-03-01T09:00:00Z".parse().unwrap()
    }

    fn progress_at(hours: i64, breached: bool) -> SlaProgress {
        let created = t0();
        let deadline = created + 24.hours();
        sla_progress(
            created,
            deadline,
            created + hours.hours(),
            TicketStatus::Open,
            breached,
        )
        .unwrap()
    }

    #[test]
    fn test_finished_tickets_have_no_indicator() {
        let created = t0();
        let deadline = created + 24.hours();
        for status in [TicketStatus::Resolved, TicketStatus::Closed] {
            assert!(sla_progress(created, deadline, created, status, false).is_none());
            assert!(sla_progress(created, deadline, created, status, true).is_none());
        }
    }

    #[test]
    fn test_twenty_hours_into_a_day_is_critical() {
        let p = progress_at(20, false);
        assert!((p.percentage - 83.333).abs() < 0.01);
        assert_eq!(p.rounded(), 83);
        assert_eq!(p.tier, SlaTier::Critical);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(progress_at(0, false).tier, SlaTier::Normal);
        // exactly 50% is not yet a warning
        assert_eq!(progress_at(12, false).tier, SlaTier::Normal);
        assert_eq!(progress_at(13, false).tier, SlaTier::Warning);
        assert_eq!(SlaTier::classify(80.0, false), SlaTier::Warning);
        assert_eq!(SlaTier::classify(80.01, false), SlaTier::Critical);
    }

    #[test]
    fn test_breach_flag_overrides_percentage() {
        let p = progress_at(1, true);
        assert_eq!(p.tier, SlaTier::Breached);
        assert!(p.percentage < 10.0);
    }

    #[test]
    fn test_percentage_is_clamped() {
        assert_eq!(progress_at(48, false).percentage, 100.0);
        assert_eq!(progress_at(-3, false).percentage, 0.0);
    }

    #[test]
    fn test_percentage_within_bounds_across_range() {
        for hours in -5..=200 {
            let p = progress_at(hours, false);
            assert!((0.0..=100.0).contains(&p.percentage), "hours={hours}");
        }
    }

    #[test]
    fn test_zero_window_is_immediately_expired() {
        let created = t0();
        let p = sla_progress(created, created, created, TicketStatus::InProgress, false).unwrap();
        assert_eq!(p.percentage, 100.0);
        assert_eq!(p.tier, SlaTier::Critical);

        let before = created - 5.minutes();
        let p = sla_progress(created, created, before, TicketStatus::Open, false).unwrap();
        assert_eq!(p.percentage, 0.0);
    }

    #[test]
    fn test_deadline_before_creation_does_not_fault() {
        let created = t0();
        let deadline = created - 1.hours();
        let p = sla_progress(created, deadline, created + 1.hours(), TicketStatus::Open, false)
            .unwrap();
        assert_eq!(p.percentage, 100.0);
    }

    #[test]
    fn test_elapsed_measured_in_whole_minutes() {
        let created = t0();
        let deadline = created + 100.minutes();
        let now = created + 50.minutes() + 59.seconds();
        let p = sla_progress(created, deadline, now, TicketStatus::Open, false).unwrap();
        assert_eq!(p.percentage, 50.0);
    }

    #[test]
    fn test_tier_parse_and_display() {
        assert_eq!("Critical".parse::<SlaTier>().unwrap(), SlaTier::Critical);
        assert_eq!(SlaTier::Breached.to_string(), "breached");
        assert!("late".parse::<SlaTier>().is_err());
    }
}
