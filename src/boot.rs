//! Full-screen boot splash. Ticks a fake diagnostic feed and a progress bar
//! until it reaches 100%, marks the session booted, lingers briefly on the
//! finished frame, then reports `Done`. A session that already booted skips
//! the whole thing.

use crate::{
    effects::driver::{PollState, Pollable},
    screen::{Line, Span},
    session::SessionStore,
};
use crossterm::style::Color;
use std::time::{Duration, Instant};

const BOOT_TICK: Duration = Duration::from_millis(50);
const LINGER: Duration = Duration::from_millis(800);
const BAR_WIDTH: usize = 40;
/// The log holds at most this many lines; the oldest scrolls off.
const LOG_LINES: usize = 7;

const SYSTEM_MESSAGES: [&str; 9] = [
    "LOADING KERNEL...",
    "BYPASSING SECURITY PROTOCOLS...",
    "CONNECTING TO NEURAL NET...",
    "DECRYPTING ASSETS...",
    "VERIFYING RELICS...",
    "ESTABLISHING SECURE CONNECTION...",
    "SYNCING WITH ROGUE VERGE DATABASE...",
    "OPTIMIZING REALITY RENDERING...",
    "SYSTEM CHECK: OK.",
];

pub(crate) struct BootSequence {
    progress: f32,
    logs: Vec<String>,
    next_due: Instant,
    finished_at: Option<Instant>,
    skipped: bool,
    rng: fastrand::Rng,
    session: SessionStore,
}

impl BootSequence {
    pub(crate) fn new(session: SessionStore, now: Instant) -> Self {
        Self {
            progress: 0.0,
            logs: vec!["> INITIALIZING SYSTEM...".to_string()],
            next_due: now + BOOT_TICK,
            finished_at: None,
            skipped: session.has_booted(),
            rng: fastrand::Rng::new(),
            session,
        }
    }

    fn push_log(&mut self) {
        let message = SYSTEM_MESSAGES[self.rng.usize(..SYSTEM_MESSAGES.len())];
        let hex = self.rng.u32(..16_777_215);
        if self.logs.len() == LOG_LINES {
            self.logs.remove(0);
        }
        self.logs.push(format!("> [0x{hex:X}] {message}"));
    }

    fn status_label(&self) -> &'static str {
        if self.progress < 100.0 {
            "LOADING..."
        } else {
            "COMPLETE"
        }
    }

    #[cfg(test)]
    fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Render the splash as a fixed-width block centered in `width` columns.
    pub(crate) fn view(&self, width: usize) -> Vec<Line> {
        let margin = " ".repeat(width.saturating_sub(BAR_WIDTH) / 2);
        let block = |spans: Vec<Span>| {
            let mut line = Line::new().push(Span::new(margin.clone()));
            for span in spans {
                line = line.push(span);
            }
            line
        };
        let centered = |text: &str, color: Color| {
            let pad = BAR_WIDTH.saturating_sub(text.chars().count()) / 2;
            block(vec![Span::new(format!("{}{text}", " ".repeat(pad))).fg(color)])
        };

        let filled = ((self.progress / 100.0) * BAR_WIDTH as f32) as usize;
        let filled = filled.min(BAR_WIDTH);
        let mut lines = vec![
            Line::blank(),
            centered("ROGUE VERGE", Color::White),
            centered("SYSTEM BOOTLOADER V2.0", Color::DarkGrey),
            Line::blank(),
            block(vec![
                Span::new("█".repeat(filled)).fg(Color::White),
                Span::new("░".repeat(BAR_WIDTH - filled)).fg(Color::DarkGrey),
            ]),
            block(vec![Span::new(format!(
                "{:<30}{:>10}",
                self.status_label(),
                format!("{}%", self.progress.floor())
            ))
            .fg(Color::Grey)]),
            Line::blank(),
        ];
        for log in &self.logs {
            lines.push(block(vec![
                Span::new("│ ").fg(Color::DarkGrey),
                Span::new(log.clone()).fg(Color::Red),
            ]));
        }
        lines.push(block(vec![
            Span::new("│ ").fg(Color::DarkGrey),
            Span::new("_").fg(Color::Red),
        ]));
        lines
    }
}

impl Pollable for BootSequence {
    fn poll(&mut self, now: Instant) -> PollState {
        if self.skipped {
            return PollState::Done;
        }
        if let Some(at) = self.finished_at {
            return if now.duration_since(at) >= LINGER {
                PollState::Done
            } else {
                PollState::Unmodified
            };
        }
        if now < self.next_due {
            return PollState::Unmodified;
        }
        self.next_due += BOOT_TICK;
        if self.next_due < now {
            self.next_due = now + BOOT_TICK;
        }
        self.progress = (self.progress + self.rng.f32() * 4.0).min(100.0);
        if self.rng.f32() > 0.7 {
            self.push_log();
        }
        if self.progress >= 100.0 {
            self.session.mark_booted();
            self.finished_at = Some(now);
        }
        PollState::Modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish(boot: &mut BootSequence, t0: Instant) -> Instant {
        for tick in 1..20_000u32 {
            let now = t0 + BOOT_TICK * tick;
            boot.poll(now);
            if boot.finished_at.is_some() {
                return now;
            }
        }
        panic!("boot sequence never finished");
    }

    #[test]
    fn test_booted_session_skips_immediately() {
        let session = SessionStore::new();
        session.mark_booted();
        let mut boot = BootSequence::new(session, Instant::now());
        assert_eq!(boot.poll(Instant::now()), PollState::Done);
        assert_eq!(boot.logs(), ["> INITIALIZING SYSTEM..."]);
    }

    #[test]
    fn test_progress_is_monotonic_and_capped() {
        let t0 = Instant::now();
        let session = SessionStore::new();
        let mut boot = BootSequence::new(session, t0);
        let mut last = 0.0f32;
        for tick in 1..20_000u32 {
            boot.poll(t0 + BOOT_TICK * tick);
            assert!(boot.progress >= last);
            assert!(boot.progress <= 100.0);
            last = boot.progress;
            if boot.finished_at.is_some() {
                break;
            }
        }
        assert_eq!(boot.progress, 100.0);
    }

    #[test]
    fn test_completion_sets_the_session_flag_then_lingers() {
        let t0 = Instant::now();
        let session = SessionStore::new();
        let mut boot = BootSequence::new(session.clone(), t0);
        assert!(!session.has_booted());
        let end = finish(&mut boot, t0);
        assert!(session.has_booted());
        assert_eq!(boot.poll(end + LINGER - Duration::from_millis(1)), PollState::Unmodified);
        assert_eq!(boot.poll(end + LINGER), PollState::Done);
    }

    #[test]
    fn test_log_feed_keeps_a_bounded_tail() {
        let t0 = Instant::now();
        let mut boot = BootSequence::new(SessionStore::new(), t0);
        finish(&mut boot, t0);
        assert!(boot.logs().len() <= LOG_LINES);
        for log in boot.logs() {
            assert!(log.starts_with("> "), "malformed log {log:?}");
        }
    }

    #[test]
    fn test_oldest_log_scrolls_off_at_the_cap() {
        let mut boot = BootSequence::new(SessionStore::new(), Instant::now());
        for _ in 0..LOG_LINES + 3 {
            boot.push_log();
        }
        assert_eq!(boot.logs().len(), LOG_LINES);
        // The initial line gets no special treatment once the cap is hit.
        assert!(boot.logs().iter().all(|log| log != "> INITIALIZING SYSTEM..."));
    }

    #[test]
    fn test_nothing_is_due_between_ticks() {
        let t0 = Instant::now();
        let mut boot = BootSequence::new(SessionStore::new(), t0);
        assert_eq!(boot.poll(t0), PollState::Unmodified);
        assert_eq!(boot.poll(t0 + BOOT_TICK), PollState::Modified);
        assert_eq!(boot.poll(t0 + BOOT_TICK + Duration::from_millis(1)), PollState::Unmodified);
    }

    #[test]
    fn test_view_carries_the_bootloader_banner() {
        let boot = BootSequence::new(SessionStore::new(), Instant::now());
        let lines = boot.view(80);
        let text: String = lines.iter().map(Line::plain_text).collect();
        assert!(text.contains("SYSTEM BOOTLOADER V2.0"));
        assert!(text.contains("INITIALIZING SYSTEM"));
    }
}
