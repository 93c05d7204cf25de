//! Cooperative scheduling for every animated effect. The event loop fetches
//! the time once per pass and hands it to each pollable, so tests can drive
//! the whole pipeline with synthesized instants instead of wall-clock
//! sleeps.

use crate::effects::scramble::{ScrambleError, ScrambleSpec, Scrambler};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// Outcome of polling a live effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PollState {
    /// The effect produced a new frame and the screen should redraw.
    Modified,
    /// Nothing was due yet.
    Unmodified,
    /// The effect finished and can be dropped.
    Done,
}

/// An effect stepped cooperatively from the event loop.
pub(crate) trait Pollable {
    fn poll(&mut self, now: Instant) -> PollState;
}

/// Handle to a live scramble run. Cancelling is idempotent: cancelling
/// twice, or after the run completed on its own, changes nothing.
#[derive(Clone, Debug)]
pub(crate) struct RunHandle {
    active: Arc<AtomicBool>,
}

impl RunHandle {
    pub(crate) fn cancel(&self) {
        self.active.store(false, Ordering::Relaxed);
    }

    /// Whether the run is still producing frames. Turns false on cancel and
    /// on natural completion.
    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }
}

struct ActiveRun {
    scrambler: Scrambler,
    sink: Box<dyn FnMut(&str)>,
    period: Duration,
    next_due: Instant,
    active: Arc<AtomicBool>,
}

/// Owns every live scramble run and steps them from the event loop. Frames
/// are produced on the loop's own thread; cancellation is a flag checked at
/// tick time, so a cancelled run never emits again even when a tick was
/// already due.
#[derive(Default)]
pub(crate) struct ScrambleDriver {
    runs: Vec<ActiveRun>,
}

impl ScrambleDriver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Validate `spec` and begin a run, delivering one frame per tick
    /// period through `sink`. The first frame lands one full period after
    /// `now`. An empty target emits its single frame before this returns
    /// and never schedules a tick.
    pub(crate) fn start(
        &mut self,
        spec: ScrambleSpec,
        now: Instant,
        mut sink: impl FnMut(&str) + 'static,
    ) -> Result<RunHandle, ScrambleError> {
        let period = spec.period();
        let empty = spec.target().is_empty();
        let mut scrambler = Scrambler::new(spec)?;
        let active = Arc::new(AtomicBool::new(true));
        let handle = RunHandle { active: active.clone() };
        if empty {
            if let Some(frame) = scrambler.next_frame() {
                sink(&frame);
            }
            active.store(false, Ordering::Relaxed);
            return Ok(handle);
        }
        self.runs.push(ActiveRun {
            scrambler,
            sink: Box::new(sink),
            period,
            next_due: now + period,
            active,
        });
        Ok(handle)
    }
}

impl Pollable for ScrambleDriver {
    /// Step every run with a tick due. Returns `Modified` when any frame
    /// was emitted; the driver itself is never `Done`, it just idles empty.
    fn poll(&mut self, now: Instant) -> PollState {
        let mut modified = false;
        self.runs.retain_mut(|run| {
            if !run.active.load(Ordering::Relaxed) {
                return false;
            }
            if now < run.next_due {
                return true;
            }
            // Late polls coalesce into a single tick instead of bursting
            // the whole backlog.
            run.next_due += run.period;
            if run.next_due < now {
                run.next_due = now + run.period;
            }
            match run.scrambler.next_frame() {
                Some(frame) => {
                    (run.sink)(&frame);
                    modified = true;
                    if run.scrambler.is_done() {
                        run.active.store(false, Ordering::Relaxed);
                        false
                    } else {
                        true
                    }
                }
                None => {
                    run.active.store(false, Ordering::Relaxed);
                    false
                }
            }
        });
        if modified {
            PollState::Modified
        } else {
            PollState::Unmodified
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::scramble::RevealDirection;
    use std::{cell::RefCell, rc::Rc};

    const TICK: Duration = Duration::from_millis(30);

    fn spec(target: &str) -> ScrambleSpec {
        ScrambleSpec::new(target).speed(TICK).pool("#@%&")
    }

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink_frames = frames.clone();
        (frames, move |frame: &str| sink_frames.borrow_mut().push(frame.to_string()))
    }

    #[test]
    fn test_no_frame_before_first_period_elapses() {
        let t0 = Instant::now();
        let mut driver = ScrambleDriver::new();
        let (frames, sink) = recorder();
        driver.start(spec("ROGUE"), t0, sink).expect("start failed");
        assert_eq!(driver.poll(t0), PollState::Unmodified);
        assert_eq!(driver.poll(t0 + TICK - Duration::from_millis(1)), PollState::Unmodified);
        assert_eq!(driver.poll(t0 + TICK), PollState::Modified);
        assert_eq!(frames.borrow().len(), 1);
    }

    #[test]
    fn test_cancelled_run_emits_nothing_even_when_a_tick_is_due() {
        let t0 = Instant::now();
        let mut driver = ScrambleDriver::new();
        let (frames, sink) = recorder();
        let handle = driver.start(spec("ROGUE"), t0, sink).expect("start failed");
        driver.poll(t0 + TICK);
        assert_eq!(frames.borrow().len(), 1);
        handle.cancel();
        assert!(!handle.is_active());
        // The next tick was already due; the flag check must win.
        assert_eq!(driver.poll(t0 + TICK * 2), PollState::Unmodified);
        assert_eq!(frames.borrow().len(), 1);
        handle.cancel();
        assert_eq!(driver.poll(t0 + TICK * 3), PollState::Unmodified);
        assert_eq!(frames.borrow().len(), 1);
    }

    #[test]
    fn test_run_completes_with_exact_target_and_deactivates() {
        let t0 = Instant::now();
        let mut driver = ScrambleDriver::new();
        let (frames, sink) = recorder();
        let handle = driver
            .start(spec("ROGUE").sequential(RevealDirection::Start), t0, sink)
            .expect("start failed");
        for tick in 1..=40u32 {
            driver.poll(t0 + TICK * tick);
        }
        assert!(!handle.is_active());
        assert_eq!(frames.borrow().len(), 16);
        assert_eq!(frames.borrow().last().map(String::as_str), Some("ROGUE"));
        handle.cancel();
        assert_eq!(driver.poll(t0 + TICK * 41), PollState::Unmodified);
        assert_eq!(frames.borrow().len(), 16);
    }

    #[test]
    fn test_empty_target_emits_once_synchronously() {
        let t0 = Instant::now();
        let mut driver = ScrambleDriver::new();
        let (frames, sink) = recorder();
        let handle = driver.start(spec(""), t0, sink).expect("start failed");
        assert_eq!(frames.borrow().as_slice(), [String::new()]);
        assert!(!handle.is_active());
        assert_eq!(driver.poll(t0 + TICK * 10), PollState::Unmodified);
        assert_eq!(frames.borrow().len(), 1);
    }

    #[test]
    fn test_late_poll_coalesces_into_a_single_tick() {
        let t0 = Instant::now();
        let mut driver = ScrambleDriver::new();
        let (frames, sink) = recorder();
        driver.start(spec("ROGUE"), t0, sink).expect("start failed");
        // Ten periods late still yields exactly one frame.
        assert_eq!(driver.poll(t0 + TICK * 10), PollState::Modified);
        assert_eq!(frames.borrow().len(), 1);
        assert_eq!(driver.poll(t0 + TICK * 10 + Duration::from_millis(1)), PollState::Unmodified);
        assert_eq!(driver.poll(t0 + TICK * 11), PollState::Modified);
        assert_eq!(frames.borrow().len(), 2);
    }

    #[test]
    fn test_invalid_spec_fails_before_any_frame() {
        let t0 = Instant::now();
        let mut driver = ScrambleDriver::new();
        let (frames, sink) = recorder();
        let result = driver.start(spec("ROGUE").speed(Duration::ZERO), t0, sink);
        assert_eq!(result.err(), Some(ScrambleError::NonPositiveSpeed));
        assert_eq!(driver.poll(t0 + TICK), PollState::Unmodified);
        assert!(frames.borrow().is_empty());
    }

    #[test]
    fn test_replacement_run_ticks_on_its_own_schedule() {
        let t0 = Instant::now();
        let mut driver = ScrambleDriver::new();
        let (old_frames, old_sink) = recorder();
        let (new_frames, new_sink) = recorder();
        let old = driver.start(spec("ROGUE"), t0, old_sink).expect("start failed");
        driver.poll(t0 + TICK);
        old.cancel();
        let half = TICK / 2;
        driver.start(spec("ROGUE"), t0 + TICK + half, new_sink).expect("start failed");
        // The old run's second tick would land here; only the new run may
        // fire from now on, and not before its own first period elapses.
        assert_eq!(driver.poll(t0 + TICK * 2), PollState::Unmodified);
        assert_eq!(driver.poll(t0 + TICK * 2 + half), PollState::Modified);
        assert_eq!(old_frames.borrow().len(), 1);
        assert_eq!(new_frames.borrow().len(), 1);
    }
}
