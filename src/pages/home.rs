//! The landing page: a glitch noise block hiding the sigil reveal, the
//! portrait that wakes the system, the hover call to action, and the
//! pointer telemetry readout.

use crate::{
    content::strings,
    effects::driver::ScrambleDriver,
    effects::scramble::{RevealDirection, ScrambleError},
    pages::{PageContext, ViewContext},
    screen::{Line, Span},
    widgets::{ScrambleText, TriggerPolicy},
};
use itertools::Itertools;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const GLITCH_ROWS: usize = 12;
const GLITCH_TICK: Duration = Duration::from_millis(90);
/// Noise row replaced by the sigil text once it has been revealed.
const SIGIL_ROW: usize = GLITCH_ROWS / 2;
/// Scrolling this deep into the glitch block reveals the sigil; scrolling
/// back above it re-arms the reveal.
const SIGIL_ARM_SCROLL: usize = 8;

const CTA_ROW: usize = GLITCH_ROWS + 13;
const STATUS_ROW: usize = GLITCH_ROWS + 15;

const SIGIL_TEXT: &str = "ROGUE VERGE";

const PORTRAIT_DORMANT: [&str; 9] = [
    "┌──────────────────────┐",
    "│ ·                  · │",
    "│    ░░░░░░░░░░░░░     │",
    "│    ░░  ▒▒▒▒  ░░░     │",
    "│    ░░░░▒▒▒▒░░░░░     │",
    "│      ░░░░░░░░░       │",
    "│        ░░░░          │",
    "│ ·                  · │",
    "└──────────────────────┘",
];

const PORTRAIT_AWAKENED: [&str; 9] = [
    "╔══════════════════════╗",
    "║ ◆                  ◆ ║",
    "║    ▓▓▓▓▓▓▓▓▓▓▓▓▓     ║",
    "║    ▓▓──████──▓▓▓     ║",
    "║    ▓▓▓▓████▓▓▓▓▓     ║",
    "║      ▓▓▓▓▓▓▓▓▓       ║",
    "║        ████          ║",
    "║ ◆                  ◆ ║",
    "╚══════════════════════╝",
];

/// One row of static. `intensity` in [0, 1] scales the fill density from
/// 30% up to 80% of the cells.
fn noise_row(seed: u64, width: usize, intensity: f32) -> String {
    let mut rng = fastrand::Rng::with_seed(seed);
    let cutoff = 3 + (intensity.clamp(0.0, 1.0) * 5.0) as u32;
    (0..width)
        .map(|_| {
            if rng.u32(..10) >= cutoff {
                ' '
            } else {
                match rng.u32(..4) {
                    0 => '░',
                    1 => '▒',
                    2 => '▓',
                    _ => '█',
                }
            }
        })
        .collect()
}

pub(crate) struct HomeScreen {
    cta: ScrambleText,
    sigil: ScrambleText,
    sigil_armed: bool,
    sigil_shown: bool,
    epoch: u64,
    next_glitch: Instant,
    depth: usize,
    rng: fastrand::Rng,
}

impl HomeScreen {
    pub(crate) fn new(ctx: &PageContext) -> Result<Self, ScrambleError> {
        let t = strings(ctx.language);
        let mut rng = fastrand::Rng::new();
        let epoch = rng.u64(..);
        Ok(Self {
            cta: ScrambleText::new(ctx.settings.cipher_spec(t.home_cta), TriggerPolicy::Hover)?,
            sigil: ScrambleText::new(
                ctx.settings.decrypt_sequential_spec(SIGIL_TEXT, RevealDirection::Center),
                TriggerPolicy::Manual,
            )?,
            sigil_armed: true,
            sigil_shown: false,
            epoch,
            next_glitch: ctx.now + GLITCH_TICK,
            depth: 0,
            rng,
        })
    }

    /// Re-randomize the glitch block on its own cadence.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        if now < self.next_glitch {
            return false;
        }
        self.next_glitch += GLITCH_TICK;
        if self.next_glitch < now {
            self.next_glitch = now + GLITCH_TICK;
        }
        self.epoch = self.rng.u64(..);
        true
    }

    /// Track scroll depth for the noise intensity, and arm or fire the
    /// sigil reveal from it.
    pub(crate) fn observe(
        &mut self,
        scroll: usize,
        _viewport: usize,
        effects: &mut ScrambleDriver,
        now: Instant,
    ) {
        self.depth = scroll;
        if scroll >= SIGIL_ARM_SCROLL {
            if self.sigil_armed {
                self.sigil_armed = false;
                self.sigil_shown = true;
                self.sigil.trigger(effects, now);
            }
        } else {
            self.sigil_armed = true;
        }
    }

    /// Pointer movement in content coordinates. Only the call to action
    /// reacts, and only while the system is dormant.
    pub(crate) fn on_mouse(
        &mut self,
        row: usize,
        column: usize,
        width: usize,
        effects: &mut ScrambleDriver,
        now: Instant,
    ) {
        if row != CTA_ROW {
            return;
        }
        let cta_width = self.cta.target().width();
        let start = width.saturating_sub(cta_width) / 2;
        if (start..start + cta_width).contains(&column) {
            self.cta.on_hover(effects, now);
        }
    }

    pub(crate) fn view(&self, ctx: &ViewContext) -> Vec<Line> {
        let theme = &ctx.theme;
        let mut lines = Vec::with_capacity(STATUS_ROW + 3);
        let mut intensity = self.depth as f32 / SIGIL_ARM_SCROLL as f32;
        if ctx.awakened {
            intensity += 0.3;
        }
        for row in 0..GLITCH_ROWS {
            if row == SIGIL_ROW && self.sigil_shown {
                let color = if self.sigil.is_scrambling() { theme.accent } else { theme.highlight };
                let mut span = Span::new(self.sigil.display()).fg(color);
                if !self.sigil.is_scrambling() {
                    span = span.bold();
                }
                lines.push(Line::new().push(span).centered());
            } else {
                let seed = self.epoch ^ (row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
                lines.push(
                    Line::new()
                        .push(Span::new(noise_row(seed, ctx.width, intensity)).fg(theme.dim)),
                );
            }
        }
        lines.push(Line::blank());
        let portrait =
            if ctx.awakened { &PORTRAIT_AWAKENED } else { &PORTRAIT_DORMANT };
        let frame_color = if ctx.awakened { theme.highlight } else { theme.frame };
        for row in portrait {
            lines.push(Line::new().push(Span::new(*row).fg(frame_color)).centered());
        }
        lines.push(Line::blank());
        let caption = if ctx.awakened { "SYSTEM: AWAKENED" } else { "SYSTEM: DORMANT" };
        let caption_color = if ctx.awakened { theme.highlight } else { theme.dim };
        lines.push(
            Line::new()
                .push(Span::new(caption.chars().join(" ")).fg(caption_color))
                .centered(),
        );
        lines.push(Line::blank());
        if ctx.awakened {
            lines.push(Line::blank());
        } else {
            let color = if self.cta.is_scrambling() { theme.accent } else { theme.fg };
            lines.push(Line::new().push(Span::new(self.cta.display()).fg(color)).centered());
        }
        lines.push(Line::blank());
        let (x, y) = ctx.pointer;
        lines.push(
            Line::new()
                .push(Span::new(format!("LOC: [{x}, {y}]")).fg(theme.dim))
                .push(Span::new("    VEL: 65%    ").fg(theme.dim))
                .push(Span::new("SYSTEM_READY").fg(theme.accent))
                .centered(),
        );
        lines.push(Line::blank());
        lines
    }
}
