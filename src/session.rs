use chrono::{Local, TimeDelta};
use std::io::{self, Write};
use tracing::info;

use crate::config::Settings;
use crate::render::{Renderer, format_time};
use crate::skip::SkipToken;
use crate::timer::{self, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Rest,
    LongRest,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Rest => "rest",
            Phase::LongRest => "longRest",
        }
    }

    pub fn minutes(self, settings: &Settings) -> u64 {
        match self {
            Phase::Work => settings.work_minutes,
            Phase::Rest => settings.rest_minutes,
            Phase::LongRest => settings.long_rest_minutes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub phase: Phase,
    pub session: u64,
}

/// Endless work/rest cycle: `sessions` work+rest pairs, then a long rest.
#[derive(Debug, Clone)]
pub struct Schedule {
    sessions: u64,
    next: Step,
}

impl Schedule {
    pub fn new(settings: &Settings) -> Self {
        Schedule {
            sessions: settings.sessions_before_long_rest.max(1),
            next: Step {
                phase: Phase::Work,
                session: 1,
            },
        }
    }
}

impl Iterator for Schedule {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let current = self.next;
        let Step { phase, session } = current;
        self.next = match phase {
            Phase::Work => Step {
                phase: Phase::Rest,
                session,
            },
            Phase::Rest if session < self.sessions => Step {
                phase: Phase::Work,
                session: session + 1,
            },
            Phase::Rest => Step {
                phase: Phase::LongRest,
                session,
            },
            Phase::LongRest => Step {
                phase: Phase::Work,
                session: 1,
            },
        };
        Some(current)
    }
}

/// Run the Pomodoro cycle forever. Only returns if output fails.
pub async fn run<W: Write>(
    settings: &Settings,
    skip: &SkipToken,
    renderer: &mut Renderer<W>,
) -> io::Result<()> {
    drive(Schedule::new(settings), settings, skip, renderer).await
}

pub async fn drive<W, I>(
    steps: I,
    settings: &Settings,
    skip: &SkipToken,
    renderer: &mut Renderer<W>,
) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = Step>,
{
    for step in steps {
        let minutes = step.phase.minutes(settings);
        announce(step, minutes, settings.sessions_before_long_rest);

        if timer::run(minutes, step.phase, skip, renderer).await? == Outcome::Skipped {
            info!("Skipped {}", step.phase.label());
        }
    }
    Ok(())
}

fn announce(step: Step, minutes: u64, sessions: u64) {
    let total_secs = minutes.saturating_mul(60);
    let ends_at = i64::try_from(total_secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|d| Local::now().checked_add_signed(d))
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    info!(
        "Starting {} ({}/{sessions}), {} until {ends_at}",
        step.phase.label(),
        step.session,
        format_time(total_secs),
    );
}
