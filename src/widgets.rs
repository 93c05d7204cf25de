//! Screen-side bindings for the scramble engine plus the two free-running
//! ambient effects: the terminal title scrambler and the data stream
//! border.

use crate::effects::{
    chars,
    driver::{PollState, Pollable, RunHandle, ScrambleDriver},
    scramble::{scramble_frame, RevealDirection, RevealMode, ScrambleError, ScrambleSpec},
};
use std::{
    cell::RefCell,
    rc::Rc,
    time::{Duration, Instant},
};

/// When a bound text starts its scramble.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum TriggerPolicy {
    /// Restart on every pointer-enter or focus.
    Hover,
    /// Fire once when at least `threshold` of the text's rows scroll into
    /// view; never again for the binding's lifetime.
    Viewport { threshold: f32 },
    /// Only fires when the owner calls `trigger` directly.
    Manual,
}

/// A piece of screen text bound to the scramble engine. Owns the display
/// cell frames land in and enforces at most one live run per binding:
/// retriggering cancels the previous run before starting the next.
pub(crate) struct ScrambleText {
    spec: ScrambleSpec,
    cell: Rc<RefCell<String>>,
    policy: TriggerPolicy,
    handle: Option<RunHandle>,
    fired: bool,
}

impl ScrambleText {
    /// Parameters are validated here, when the binding is built, so later
    /// triggers cannot fail.
    pub(crate) fn new(spec: ScrambleSpec, policy: TriggerPolicy) -> Result<Self, ScrambleError> {
        spec.validate()?;
        let cell = Rc::new(RefCell::new(spec.target().to_string()));
        Ok(Self { spec, cell, policy, handle: None, fired: false })
    }

    /// The text currently on screen: the target while idle, the latest
    /// frame while a run is live.
    pub(crate) fn display(&self) -> String {
        self.cell.borrow().clone()
    }

    pub(crate) fn target(&self) -> &str {
        self.spec.target()
    }

    pub(crate) fn is_scrambling(&self) -> bool {
        self.handle.as_ref().is_some_and(RunHandle::is_active)
    }

    /// Cancel any live run and start a new one from fully scrambled.
    pub(crate) fn trigger(&mut self, effects: &mut ScrambleDriver, now: Instant) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
        let cell = Rc::downgrade(&self.cell);
        let started = effects.start(self.spec.clone(), now, move |frame| {
            // The owning page may have unmounted the cell mid-run; a frame
            // with nowhere to land is skipped, not an error.
            if let Some(cell) = cell.upgrade() {
                *cell.borrow_mut() = frame.to_string();
            }
        });
        // Parameters were validated when the binding was built.
        if let Ok(handle) = started {
            self.handle = Some(handle);
        }
    }

    pub(crate) fn on_hover(&mut self, effects: &mut ScrambleDriver, now: Instant) {
        if self.policy == TriggerPolicy::Hover {
            self.trigger(effects, now);
        }
    }

    /// Feed the binding its current visible fraction. Viewport bindings
    /// fire the first time the fraction reaches their threshold and stay
    /// spent afterwards, even if the text scrolls away and back.
    pub(crate) fn on_visibility(
        &mut self,
        fraction: f32,
        effects: &mut ScrambleDriver,
        now: Instant,
    ) {
        let TriggerPolicy::Viewport { threshold } = self.policy else {
            return;
        };
        if self.fired || fraction < threshold {
            return;
        }
        self.fired = true;
        self.trigger(effects, now);
    }
}

/// Fraction of the row range `[top, top + height)` visible in a viewport
/// showing rows `[scroll, scroll + viewport)`.
pub(crate) fn visible_fraction(top: usize, height: usize, scroll: usize, viewport: usize) -> f32 {
    if height == 0 || viewport == 0 {
        return 0.0;
    }
    let visible = (top + height).min(scroll + viewport).saturating_sub(top.max(scroll));
    visible as f32 / height as f32
}

const TITLE_TICK: Duration = Duration::from_millis(30);
const TITLE_WINDOW: Duration = Duration::from_millis(600);
/// Title positions settle three per tick.
const TITLE_STEP: f32 = 3.0;

/// Scrambles the terminal title toward the current page's title. Runs on
/// its own fixed cadence and snaps to the exact title once the window
/// elapses, whatever the counter says.
pub(crate) struct TitleScramble {
    target: String,
    frame: String,
    started: Instant,
    next_due: Instant,
    boundary: f32,
    rng: fastrand::Rng,
    pool: Vec<char>,
    done: bool,
}

impl TitleScramble {
    pub(crate) fn new<S: Into<String>>(target: S, now: Instant) -> Self {
        let target = target.into();
        Self {
            frame: target.clone(),
            target,
            started: now,
            next_due: now + TITLE_TICK,
            boundary: 0.0,
            rng: fastrand::Rng::new(),
            pool: chars::pool_from(chars::CIPHER_CHARS),
            done: false,
        }
    }

    pub(crate) fn title(&self) -> &str {
        &self.frame
    }
}

impl Pollable for TitleScramble {
    fn poll(&mut self, now: Instant) -> PollState {
        if self.done {
            return PollState::Done;
        }
        if now < self.next_due {
            return PollState::Unmodified;
        }
        self.next_due += TITLE_TICK;
        if self.next_due < now {
            self.next_due = now + TITLE_TICK;
        }
        if now.duration_since(self.started) > TITLE_WINDOW {
            self.frame = self.target.clone();
            self.done = true;
            return PollState::Done;
        }
        self.frame = scramble_frame(
            &self.target,
            RevealMode::Sequential { direction: RevealDirection::Start },
            self.boundary,
            &self.pool,
            &mut self.rng,
        );
        self.boundary += TITLE_STEP;
        PollState::Modified
    }
}

/// A short feed of noise that scrolls one column per tick, drawn along the
/// edges of the relic plate pane.
const DATA_STREAM: &str = "RVQ/NDU1NDUwNiBHSEs0OUQhIzUgQ09SQUlOMDAwMSBaMTAxMjQw";
const STREAM_TICK: Duration = Duration::from_millis(120);

pub(crate) struct DataStreamBorder {
    offset: usize,
    next_due: Instant,
}

impl DataStreamBorder {
    pub(crate) fn new(now: Instant) -> Self {
        Self { offset: 0, next_due: now + STREAM_TICK }
    }

    /// The current `width`-column window of the stream, wrapping around.
    pub(crate) fn line(&self, width: usize) -> String {
        DATA_STREAM
            .chars()
            .cycle()
            .skip(self.offset % DATA_STREAM.len())
            .take(width)
            .collect()
    }
}

impl Pollable for DataStreamBorder {
    fn poll(&mut self, now: Instant) -> PollState {
        if now < self.next_due {
            return PollState::Unmodified;
        }
        self.next_due += STREAM_TICK;
        if self.next_due < now {
            self.next_due = now + STREAM_TICK;
        }
        self.offset = self.offset.wrapping_add(1);
        PollState::Modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(30);

    fn spec(target: &str) -> ScrambleSpec {
        ScrambleSpec::new(target).speed(TICK).pool("#@%&")
    }

    fn run_to_idle(widget: &ScrambleText, effects: &mut ScrambleDriver, from: Instant) {
        for tick in 1..200u32 {
            effects.poll(from + TICK * tick);
            if !widget.is_scrambling() {
                return;
            }
        }
        panic!("binding never went idle");
    }

    #[test]
    fn test_display_starts_at_the_target_text() {
        let widget = ScrambleText::new(spec("ROGUE"), TriggerPolicy::Manual)
            .expect("failed to build binding");
        assert_eq!(widget.display(), "ROGUE");
        assert!(!widget.is_scrambling());
    }

    #[test]
    fn test_invalid_parameters_fail_at_binding_time() {
        let result = ScrambleText::new(spec("ROGUE").speed(Duration::ZERO), TriggerPolicy::Hover);
        assert!(matches!(result, Err(ScrambleError::NonPositiveSpeed)));
    }

    #[test]
    fn test_hover_restarts_and_the_stale_run_never_fires() {
        let t0 = Instant::now();
        let mut effects = ScrambleDriver::new();
        let mut widget = ScrambleText::new(spec("ROGUE"), TriggerPolicy::Hover)
            .expect("failed to build binding");
        widget.on_hover(&mut effects, t0);
        assert!(widget.is_scrambling());
        assert_eq!(effects.poll(t0 + TICK), PollState::Modified);
        // Retrigger halfway through the old run's second period.
        widget.on_hover(&mut effects, t0 + TICK + TICK / 2);
        // The old run's tick would land here; it must stay silent.
        assert_eq!(effects.poll(t0 + TICK * 2), PollState::Unmodified);
        assert_eq!(effects.poll(t0 + TICK * 2 + TICK / 2), PollState::Modified);
    }

    #[test]
    fn test_completed_run_leaves_the_exact_target_on_screen() {
        let t0 = Instant::now();
        let mut effects = ScrambleDriver::new();
        let mut widget = ScrambleText::new(spec("ROGUE VERGE"), TriggerPolicy::Manual)
            .expect("failed to build binding");
        widget.trigger(&mut effects, t0);
        run_to_idle(&widget, &mut effects, t0);
        assert_eq!(widget.display(), "ROGUE VERGE");
    }

    #[test]
    fn test_viewport_policy_fires_once_per_lifetime() {
        let t0 = Instant::now();
        let mut effects = ScrambleDriver::new();
        let mut widget =
            ScrambleText::new(spec("ROGUE"), TriggerPolicy::Viewport { threshold: 0.1 })
                .expect("failed to build binding");
        widget.on_visibility(0.05, &mut effects, t0);
        assert!(!widget.is_scrambling());
        widget.on_visibility(0.25, &mut effects, t0);
        assert!(widget.is_scrambling());
        run_to_idle(&widget, &mut effects, t0);
        // Scrolling away and back in is not a second trigger.
        widget.on_visibility(0.0, &mut effects, t0);
        widget.on_visibility(1.0, &mut effects, t0);
        assert!(!widget.is_scrambling());
    }

    #[test]
    fn test_manual_policy_ignores_hover_and_visibility() {
        let t0 = Instant::now();
        let mut effects = ScrambleDriver::new();
        let mut widget = ScrambleText::new(spec("ROGUE"), TriggerPolicy::Manual)
            .expect("failed to build binding");
        widget.on_hover(&mut effects, t0);
        widget.on_visibility(1.0, &mut effects, t0);
        assert!(!widget.is_scrambling());
        widget.trigger(&mut effects, t0);
        assert!(widget.is_scrambling());
    }

    #[test]
    fn test_frames_for_a_dropped_binding_are_swallowed() {
        let t0 = Instant::now();
        let mut effects = ScrambleDriver::new();
        let mut widget = ScrambleText::new(spec("ROGUE"), TriggerPolicy::Manual)
            .expect("failed to build binding");
        widget.trigger(&mut effects, t0);
        drop(widget);
        // The run keeps ticking with nowhere to deliver, then retires.
        for tick in 1..=16u32 {
            effects.poll(t0 + TICK * tick);
        }
        assert_eq!(effects.poll(t0 + TICK * 17), PollState::Unmodified);
    }

    #[test]
    fn test_visible_fraction_measures_row_overlap() {
        assert_eq!(visible_fraction(0, 10, 0, 20), 1.0);
        assert_eq!(visible_fraction(15, 10, 0, 20), 0.5);
        assert_eq!(visible_fraction(30, 10, 0, 20), 0.0);
        assert_eq!(visible_fraction(5, 10, 10, 20), 0.5);
        assert_eq!(visible_fraction(0, 0, 0, 20), 0.0);
    }

    #[test]
    fn test_title_settles_three_positions_per_tick_and_snaps_on_time() {
        let t0 = Instant::now();
        let mut title = TitleScramble::new("ROGUE VERGE", t0);
        assert_eq!(title.poll(t0 + TITLE_TICK), PollState::Modified);
        assert_eq!(title.poll(t0 + TITLE_TICK * 2), PollState::Modified);
        // Second render ran with the boundary at three.
        assert!(title.title().starts_with("ROG"));
        assert_eq!(title.title().chars().count(), 11);
        let late = t0 + TITLE_WINDOW + TITLE_TICK;
        assert_eq!(title.poll(late), PollState::Done);
        assert_eq!(title.title(), "ROGUE VERGE");
        assert_eq!(title.poll(late + TITLE_TICK), PollState::Done);
    }

    #[test]
    fn test_data_stream_scrolls_one_column_per_tick_and_wraps() {
        let t0 = Instant::now();
        let mut border = DataStreamBorder::new(t0);
        let first = border.line(12);
        assert_eq!(first.chars().count(), 12);
        assert_eq!(border.poll(t0 + STREAM_TICK), PollState::Modified);
        let second = border.line(12);
        assert_eq!(&first[1..], &second[..11]);
        // A full cycle of the stream returns to the start.
        for tick in 2..=DATA_STREAM.len() as u32 {
            border.poll(t0 + STREAM_TICK * tick);
        }
        assert_eq!(border.line(12), first);
    }
}
