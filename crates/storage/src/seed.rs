//! Sample events loaded into the events store at startup.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::Database;
use crate::dto::event::NewEvent;
use crate::error::Result;
use crate::repository::event::EventRepository;

/// What to do with the events store at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedMode {
    /// Leave the store alone.
    Never,
    /// Insert the sample events only when the store holds no events.
    #[default]
    IfEmpty,
    /// Delete all events, then insert the sample events.
    Reset,
}

impl FromStr for SeedMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" | "off" => Ok(Self::Never),
            "if_empty" | "if-empty" => Ok(Self::IfEmpty),
            "reset" => Ok(Self::Reset),
            other => Err(format!(
                "unknown seed mode '{other}' (expected never, if_empty or reset)"
            )),
        }
    }
}

impl fmt::Display for SeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Never => "never",
            Self::IfEmpty => "if_empty",
            Self::Reset => "reset",
        };
        f.write_str(name)
    }
}

pub fn sample_events() -> Vec<NewEvent> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

    vec![
        NewEvent {
            name: "Tech Symposium 2025".to_string(),
            council: "IEEE Student Council".to_string(),
            start_date: date(2025, 11, 15),
            end_date: date(2025, 11, 16),
            venue: "College Auditorium".to_string(),
        },
        NewEvent {
            name: "Cultural Fest".to_string(),
            council: "Cultural Council".to_string(),
            start_date: date(2025, 12, 1),
            end_date: date(2025, 12, 3),
            venue: "College Ground".to_string(),
        },
        NewEvent {
            name: "Code Sprint".to_string(),
            council: "CSI Student Chapter".to_string(),
            start_date: date(2025, 10, 25),
            end_date: date(2025, 10, 25),
            venue: "Computer Labs".to_string(),
        },
    ]
}

/// Apply `mode` to the events store. Returns how many events were inserted.
///
/// Registrations are never touched; after a reset they keep their snapshot
/// of the events they were made for.
pub async fn seed_events(db: &Database, mode: SeedMode) -> Result<usize> {
    let repo = EventRepository::new(db.events_pool());

    match mode {
        SeedMode::Never => return Ok(0),
        SeedMode::IfEmpty => {
            if repo.count().await? > 0 {
                tracing::debug!("events store already populated, skipping seed");
                return Ok(0);
            }
        }
        SeedMode::Reset => {
            let removed = repo.delete_all().await?;
            tracing::info!(removed, "cleared events before reseeding");
        }
    }

    let samples = sample_events();
    for event in &samples {
        repo.create(event).await?;
    }

    tracing::info!(inserted = samples.len(), %mode, "seeded sample events");
    Ok(samples.len())
}
