//! Freshness policy shared by the GitHub-analysis and ATS-score caches.
//!
//! Both caches are rows in PostgreSQL; staleness is decided on read and a
//! stale entry is overwritten by the recomputed result. The check-then-compute
//! sequence is not serialized per key; see DESIGN.md for the accepted race.

use chrono::{DateTime, Duration, Utc};

/// Maximum age of a cached GitHub analysis before it is re-fetched.
pub fn github_analysis_window() -> Duration {
    Duration::hours(24)
}

/// Maximum age of a cached ATS score before it is recomputed.
pub fn ats_score_window() -> Duration {
    Duration::days(7)
}

/// A cached record is fresh while its age is strictly below the window.
pub fn is_fresh(recorded_at: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    now.signed_duration_since(recorded_at) < window
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_analysis_fresh_at_23_hours() {
        let now = Utc::now();
        let recorded = now - Duration::hours(23);
        assert!(is_fresh(recorded, now, github_analysis_window()));
    }

    #[test]
    fn test_github_analysis_stale_at_25_hours() {
        let now = Utc::now();
        let recorded = now - Duration::hours(25);
        assert!(!is_fresh(recorded, now, github_analysis_window()));
    }

    #[test]
    fn test_ats_score_fresh_at_6_days() {
        let now = Utc::now();
        let recorded = now - Duration::days(6);
        assert!(is_fresh(recorded, now, ats_score_window()));
    }

    #[test]
    fn test_ats_score_stale_at_8_days() {
        let now = Utc::now();
        let recorded = now - Duration::days(8);
        assert!(!is_fresh(recorded, now, ats_score_window()));
    }

    #[test]
    fn test_exact_window_boundary_is_stale() {
        let now = Utc::now();
        let recorded = now - Duration::hours(24);
        assert!(!is_fresh(recorded, now, github_analysis_window()));
    }
}
