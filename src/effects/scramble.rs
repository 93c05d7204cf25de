//! The text scramble engine. A [`Scrambler`] walks a target string from
//! random glyph noise to the exact target text, one frame per tick, with the
//! reveal order controlled by [`RevealMode`].

use crate::effects::chars;
use std::time::Duration;

const DEFAULT_SPEED: Duration = Duration::from_millis(50);
const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// Sequential reveals advance a third of a position per tick, so a position
/// settles every three ticks.
const SEQUENTIAL_STEP: f32 = 3.0;

/// Order in which positions settle during a sequential reveal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum RevealDirection {
    /// First character first.
    #[default]
    Start,
    /// Last character first.
    End,
    /// Middle outward. The settle radius grows at half the counter rate
    /// while completion still waits for the counter to reach the full
    /// length, so center reveals hold their final frame for several ticks
    /// before the run ends.
    Center,
}

/// How scrambled positions converge to the target text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum RevealMode {
    /// Every position keeps re-randomizing until the iteration budget is
    /// spent, then the whole string snaps to the target at once.
    Burst { max_iterations: u32 },
    /// Positions settle one after another, ordered by `direction`.
    Sequential { direction: RevealDirection },
}

impl Default for RevealMode {
    fn default() -> Self {
        Self::Burst { max_iterations: DEFAULT_MAX_ITERATIONS }
    }
}

/// Errors surfaced synchronously when a run is created, before any frame is
/// produced.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ScrambleError {
    #[error("scramble speed must be a positive duration")]
    NonPositiveSpeed,

    #[error("scramble character pool is empty")]
    EmptyPool,
}

/// Parameters for one scramble run. Validated once when the run starts,
/// never mid-run.
#[derive(Clone, Debug)]
pub(crate) struct ScrambleSpec {
    target: String,
    speed: Duration,
    mode: RevealMode,
    pool: Vec<char>,
}

impl ScrambleSpec {
    pub(crate) fn new<S: Into<String>>(target: S) -> Self {
        Self {
            target: target.into(),
            speed: DEFAULT_SPEED,
            mode: RevealMode::default(),
            pool: chars::pool_from(chars::DECRYPT_CHARS),
        }
    }

    /// Tick period. One frame is produced per period.
    pub(crate) fn speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }

    pub(crate) fn sequential(mut self, direction: RevealDirection) -> Self {
        self.mode = RevealMode::Sequential { direction };
        self
    }

    pub(crate) fn burst(mut self, max_iterations: u32) -> Self {
        self.mode = RevealMode::Burst { max_iterations };
        self
    }

    pub(crate) fn pool(mut self, glyphs: &str) -> Self {
        self.pool = chars::pool_from(glyphs);
        self
    }

    /// Restrict the pool to the glyphs of the target itself, ignoring
    /// whitespace. An empty target leaves the pool untouched.
    pub(crate) fn target_pool(mut self) -> Self {
        let mut glyphs: Vec<char> =
            self.target.chars().filter(|c| !c.is_whitespace()).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        if !glyphs.is_empty() {
            self.pool = glyphs;
        }
        self
    }

    pub(crate) fn target(&self) -> &str {
        &self.target
    }

    pub(crate) fn period(&self) -> Duration {
        self.speed
    }

    pub(crate) fn validate(&self) -> Result<(), ScrambleError> {
        if self.speed.is_zero() {
            return Err(ScrambleError::NonPositiveSpeed);
        }
        if self.pool.is_empty() {
            return Err(ScrambleError::EmptyPool);
        }
        Ok(())
    }
}

/// Whether the position at `index` shows its true character once the
/// iteration counter reaches `counter`, for a target of `len` characters.
fn settled_at(mode: RevealMode, len: usize, counter: f32, index: usize) -> bool {
    match mode {
        RevealMode::Burst { max_iterations } => counter >= max_iterations as f32,
        RevealMode::Sequential { direction } => {
            let index = index as f32;
            match direction {
                RevealDirection::Start => index < counter,
                RevealDirection::End => index > len as f32 - counter,
                RevealDirection::Center => {
                    let center = (len / 2) as f32;
                    (index - center).abs() < counter / 2.0
                }
            }
        }
    }
}

/// Render one frame of `target` at `counter`. Settled positions show their
/// true character, whitespace always passes through, and every other
/// position draws a fresh random glyph from `pool`.
pub(crate) fn scramble_frame(
    target: &str,
    mode: RevealMode,
    counter: f32,
    pool: &[char],
    rng: &mut fastrand::Rng,
) -> String {
    let len = target.chars().count();
    target
        .chars()
        .enumerate()
        .map(|(index, ch)| {
            if ch.is_whitespace() || settled_at(mode, len, counter, index) {
                ch
            } else {
                pool[rng.usize(..pool.len())]
            }
        })
        .collect()
}

/// One in-flight run: steps once per tick and yields display frames until
/// the target text settles. The last frame yielded is always exactly the
/// target.
#[derive(Debug)]
pub(crate) struct Scrambler {
    spec: ScrambleSpec,
    len: usize,
    ticks: u32,
    done: bool,
    rng: fastrand::Rng,
}

impl Scrambler {
    pub(crate) fn new(spec: ScrambleSpec) -> Result<Self, ScrambleError> {
        spec.validate()?;
        let len = spec.target.chars().count();
        Ok(Self { spec, len, ticks: 0, done: false, rng: fastrand::Rng::new() })
    }

    #[cfg(test)]
    fn seeded(spec: ScrambleSpec, seed: u64) -> Result<Self, ScrambleError> {
        let mut scrambler = Self::new(spec)?;
        scrambler.rng = fastrand::Rng::with_seed(seed);
        Ok(scrambler)
    }

    /// Iteration counter for the current tick. Derived from the tick count
    /// rather than accumulated, so position boundaries land exactly.
    fn counter(&self) -> f32 {
        match self.spec.mode {
            RevealMode::Sequential { .. } => self.ticks as f32 / SEQUENTIAL_STEP,
            RevealMode::Burst { .. } => self.ticks as f32,
        }
    }

    fn complete(&self) -> bool {
        if self.spec.target.is_empty() {
            return true;
        }
        match self.spec.mode {
            RevealMode::Sequential { .. } => self.counter() >= self.len as f32,
            RevealMode::Burst { max_iterations } => self.counter() >= max_iterations as f32,
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        self.done
    }

    /// Produce the next display frame, or `None` once the run is over.
    pub(crate) fn next_frame(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        if self.complete() {
            self.done = true;
            return Some(self.spec.target.clone());
        }
        let frame = scramble_frame(
            &self.spec.target,
            self.spec.mode,
            self.counter(),
            &self.spec.pool,
            &mut self.rng,
        );
        self.ticks += 1;
        Some(frame)
    }
}
