use crate::session::Session;
use std::time::SystemTime;

/// Derived figures for one session, computed on demand from the session's
/// counters and timestamps. Counters are running totals, so a corrected
/// mistake no longer weighs on accuracy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub elapsed_secs: f64,
    /// Fraction of accepted keystrokes that matched, in [0, 1].
    pub accuracy: f64,
    /// Correct characters / 5 per minute, the standard word convention.
    pub raw_wpm: f64,
}

impl Metrics {
    pub fn snapshot(session: &Session) -> Self {
        let elapsed_secs = elapsed_secs(session);
        let accuracy = if session.typed == 0 {
            0.0
        } else {
            session.correct as f64 / session.typed as f64
        };
        let minutes = elapsed_secs / 60.0;
        let raw_wpm = if minutes <= 0.0 {
            0.0
        } else {
            (session.correct as f64 / 5.0) / minutes
        };

        Self {
            elapsed_secs,
            accuracy,
            raw_wpm,
        }
    }
}

fn elapsed_secs(session: &Session) -> f64 {
    let Some(started) = session.started_at else {
        return 0.0;
    };
    let end = session.ended_at.unwrap_or_else(SystemTime::now);
    match end.duration_since(started) {
        Ok(elapsed) => elapsed.as_secs_f64(),
        // A clock that went backwards floors at zero rather than erroring
        Err(_) => 0.0,
    }
}
