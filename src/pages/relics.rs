//! The relic archive and the single-relic detail view. Archive cards
//! decrypt their notes the first time they scroll into view; the detail
//! page cycles recovered plates inside a data stream frame.

use crate::{
    content::{strings, Relic, RELICS},
    effects::driver::{PollState, Pollable, ScrambleDriver},
    effects::scramble::ScrambleError,
    pages::{PageContext, ViewContext},
    screen::{wrap, Line, Span},
    widgets::{visible_fraction, DataStreamBorder, ScrambleText, TriggerPolicy},
};
use itertools::Itertools;
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

const CARDS_TOP: usize = 3;
const CARD_ROWS: usize = 5;
const CARD_STRIDE: usize = CARD_ROWS + 1;
const CARD_INNER: usize = 40;

fn pad(text: &str, cols: usize) -> String {
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat(' ').take(cols.saturating_sub(text.width())));
    padded
}

struct Card {
    relic: &'static Relic,
    note: ScrambleText,
}

pub(crate) struct RelicsScreen {
    cards: Vec<Card>,
    selected: usize,
}

impl RelicsScreen {
    pub(crate) fn new(ctx: &PageContext) -> Result<Self, ScrambleError> {
        let threshold = ctx.settings.viewport_threshold;
        let cards = RELICS
            .iter()
            .map(|relic| {
                let note = ScrambleText::new(
                    ctx.settings.decrypt_spec(relic.note.get(ctx.language)),
                    TriggerPolicy::Viewport { threshold },
                )?;
                Ok(Card { relic, note })
            })
            .collect::<Result<_, ScrambleError>>()?;
        Ok(Self { cards, selected: 0 })
    }

    pub(crate) fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(self.cards.len().saturating_sub(1));
    }

    pub(crate) fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(crate) fn selected_relic(&self) -> &'static Relic {
        self.cards[self.selected].relic
    }

    pub(crate) fn selection_rows(&self) -> (usize, usize) {
        (CARDS_TOP + self.selected * CARD_STRIDE, CARD_ROWS)
    }

    /// Feed every card its visible fraction; notes fire their decrypt the
    /// first time enough of their card scrolls in.
    pub(crate) fn observe(
        &mut self,
        scroll: usize,
        viewport: usize,
        effects: &mut ScrambleDriver,
        now: Instant,
    ) {
        for (index, card) in self.cards.iter_mut().enumerate() {
            let top = CARDS_TOP + index * CARD_STRIDE;
            let fraction = visible_fraction(top, CARD_ROWS, scroll, viewport);
            card.note.on_visibility(fraction, effects, now);
        }
    }

    pub(crate) fn view(&self, ctx: &ViewContext) -> Vec<Line> {
        let theme = &ctx.theme;
        let mut lines = vec![
            Line::new()
                .push(Span::new("  ARCHIVE").fg(theme.highlight).bold())
                .push(Span::new(" // RECOVERED DATA").fg(theme.dim)),
            Line::new().push(Span::new(format!("  {}", "▔".repeat(CARD_INNER))).fg(theme.frame)),
            Line::blank(),
        ];
        for (index, card) in self.cards.iter().enumerate() {
            let active = index == self.selected;
            let frame_color = if active { theme.accent } else { theme.frame };
            let (corners, bar, side) = if active {
                (('╔', '╗', '╚', '╝'), '═', "║")
            } else {
                (('┌', '┐', '└', '┘'), '─', "│")
            };
            let edge = bar.to_string().repeat(CARD_INNER);
            let note_color = if card.note.is_scrambling() { theme.accent } else { theme.fg };
            let inner = |text: String, color| {
                Line::new()
                    .push(Span::new(format!("  {side}")).fg(frame_color))
                    .push(Span::new(pad(&text, CARD_INNER)).fg(color))
                    .push(Span::new(side).fg(frame_color))
            };
            lines.push(
                Line::new()
                    .push(Span::new(format!("  {}{edge}{}", corners.0, corners.1)).fg(frame_color)),
            );
            lines.push(inner(format!(" [{}]", card.relic.code), theme.accent));
            lines.push(inner(format!(" {}", card.note.display()), note_color));
            lines.push(inner(format!(" {}", card.relic.price.display(ctx.language)), theme.dim));
            lines.push(
                Line::new()
                    .push(Span::new(format!("  {}{edge}{}", corners.2, corners.3)).fg(frame_color)),
            );
            lines.push(Line::blank());
        }
        lines
    }
}

const PANE_INNER: usize = 36;
const PANE_ROWS: usize = 7;

pub(crate) struct DetailScreen {
    relic: &'static Relic,
    plate: usize,
    border: DataStreamBorder,
}

impl DetailScreen {
    pub(crate) fn new(relic: &'static Relic, ctx: &PageContext) -> Self {
        Self { relic, plate: 0, border: DataStreamBorder::new(ctx.now) }
    }

    /// Move through the plates, wrapping around at both ends.
    pub(crate) fn slide(&mut self, step: isize) {
        let count = self.relic.plates.len() as isize;
        self.plate = (self.plate as isize + step).rem_euclid(count) as usize;
    }

    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        self.border.poll(now) == PollState::Modified
    }

    pub(crate) fn view(&self, ctx: &ViewContext) -> Vec<Line> {
        let theme = &ctx.theme;
        let t = strings(ctx.language);
        let mut lines = vec![
            Line::new().push(Span::new(format!("  < {}", t.back_to_archive)).fg(theme.dim)),
            Line::blank(),
        ];

        let stream = self.border.line(PANE_INNER + 4);
        lines.push(Line::new().push(Span::new(stream.clone()).fg(theme.dim)).centered());
        let plate_rows: Vec<&str> = self.relic.plates[self.plate].lines().collect();
        let top_gap = PANE_ROWS.saturating_sub(plate_rows.len()) / 2;
        for row in 0..PANE_ROWS {
            let art = row
                .checked_sub(top_gap)
                .and_then(|index| plate_rows.get(index))
                .copied()
                .unwrap_or("");
            let lead = PANE_INNER.saturating_sub(art.width()) / 2;
            lines.push(
                Line::new()
                    .push(Span::new("│ ").fg(theme.frame))
                    .push(Span::new(pad(&format!("{}{art}", " ".repeat(lead)), PANE_INNER)))
                    .push(Span::new(" │").fg(theme.frame))
                    .centered(),
            );
        }
        lines.push(Line::new().push(Span::new(stream).fg(theme.dim)).centered());
        if self.relic.plates.len() > 1 {
            let dots = (0..self.relic.plates.len())
                .map(|index| if index == self.plate { "●" } else { "○" })
                .join(" ");
            lines.push(Line::new().push(Span::new(dots).fg(theme.accent)).centered());
        }
        lines.push(Line::blank());

        lines.push(
            Line::new().push(Span::new(format!("  {}", self.relic.code)).fg(theme.highlight).bold()),
        );
        lines.push(
            Line::new()
                .push(Span::new(format!("  {}", self.relic.note.get(ctx.language))).fg(theme.accent)),
        );
        lines.push(Line::blank());
        lines.push(Line::new().push(Span::new("  [ DESCRIPTION ]").fg(theme.dim)));
        let cols = ctx.width.saturating_sub(4).clamp(16, 64);
        for row in wrap(self.relic.description.get(ctx.language), cols) {
            lines.push(Line::new().push(Span::new(format!("  {row}")).fg(theme.fg)));
        }
        lines.push(Line::blank());
        lines.push(
            Line::new().push(
                Span::new(format!("  {}", self.relic.price.display(ctx.language)))
                    .fg(theme.highlight)
                    .bold(),
            ),
        );
        lines.push(
            Line::new()
                .push(Span::new(format!("  [ {} ]", t.acquire_asset)).fg(theme.fg))
                .push(Span::new("  rogueverge.com").fg(theme.dim)),
        );
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{Config, Settings},
        content::Language,
        theme::Theme,
    };
    use std::time::Duration;

    fn fixture() -> (Settings, Instant) {
        (Settings::from_config(&Config::default()), Instant::now())
    }

    fn view_ctx() -> ViewContext {
        ViewContext {
            width: 80,
            theme: Theme::dormant(),
            language: Language::En,
            awakened: false,
            pointer: (0, 0),
        }
    }

    #[test]
    fn test_selection_clamps_at_both_ends() {
        let (settings, now) = fixture();
        let ctx = PageContext { language: Language::En, settings: &settings, now };
        let mut screen = RelicsScreen::new(&ctx).expect("failed to build archive");
        screen.select_prev();
        assert_eq!(screen.selected_relic().code, "RV-001");
        for _ in 0..20 {
            screen.select_next();
        }
        assert_eq!(screen.selected_relic().code, RELICS[RELICS.len() - 1].code);
    }

    #[test]
    fn test_selection_rows_track_the_card_stride() {
        let (settings, now) = fixture();
        let ctx = PageContext { language: Language::En, settings: &settings, now };
        let mut screen = RelicsScreen::new(&ctx).expect("failed to build archive");
        assert_eq!(screen.selection_rows(), (CARDS_TOP, CARD_ROWS));
        screen.select_next();
        assert_eq!(screen.selection_rows(), (CARDS_TOP + CARD_STRIDE, CARD_ROWS));
    }

    #[test]
    fn test_only_visible_notes_start_decrypting() {
        let (settings, now) = fixture();
        let ctx = PageContext { language: Language::En, settings: &settings, now };
        let mut effects = ScrambleDriver::new();
        let mut screen = RelicsScreen::new(&ctx).expect("failed to build archive");
        screen.observe(0, 12, &mut effects, now);
        assert!(screen.cards[0].note.is_scrambling());
        assert!(!screen.cards[5].note.is_scrambling());
        // Scrolling the last card in fires it exactly once.
        screen.observe(30, 12, &mut effects, now);
        assert!(screen.cards[5].note.is_scrambling());
        for tick in 1..=40u32 {
            effects.poll(now + Duration::from_millis(50) * tick);
        }
        screen.observe(0, 12, &mut effects, now);
        screen.observe(30, 12, &mut effects, now);
        assert!(!screen.cards[5].note.is_scrambling());
    }

    #[test]
    fn test_archive_view_lists_every_code_and_marks_the_selection() {
        let (settings, now) = fixture();
        let ctx = PageContext { language: Language::En, settings: &settings, now };
        let screen = RelicsScreen::new(&ctx).expect("failed to build archive");
        let text: String = screen.view(&view_ctx()).iter().map(Line::plain_text).collect();
        assert!(text.contains("ARCHIVE"));
        for relic in RELICS {
            assert!(text.contains(relic.code), "missing {}", relic.code);
        }
        assert!(text.contains('╔'), "selected card frame missing");
    }

    #[test]
    fn test_detail_slides_wrap_in_both_directions() {
        let (settings, now) = fixture();
        let ctx = PageContext { language: Language::En, settings: &settings, now };
        let relic = &RELICS[2];
        let mut screen = DetailScreen::new(relic, &ctx);
        assert_eq!(screen.plate, 0);
        screen.slide(-1);
        assert_eq!(screen.plate, relic.plates.len() - 1);
        screen.slide(1);
        assert_eq!(screen.plate, 0);
        screen.slide(1);
        assert_eq!(screen.plate, 1);
    }

    #[test]
    fn test_detail_view_localizes_note_price_and_chrome() {
        let (settings, now) = fixture();
        let ctx = PageContext { language: Language::En, settings: &settings, now };
        let screen = DetailScreen::new(&RELICS[0], &ctx);
        let en: String = screen.view(&view_ctx()).iter().map(Line::plain_text).collect();
        assert!(en.contains("RV-001"));
        assert!(en.contains("First Sigil Jacket"));
        assert!(en.contains("SOLD OUT"));
        assert!(en.contains("BACK TO ARCHIVE"));
        assert!(en.contains("ACQUIRE ASSET"));
        let zh_ctx = ViewContext { language: Language::ZhTw, ..view_ctx() };
        let zh: String = screen.view(&zh_ctx).iter().map(Line::plain_text).collect();
        assert!(zh.contains("已售罄"));
        assert!(zh.contains("返回檔案庫"));
    }

    #[test]
    fn test_detail_border_scrolls_on_tick() {
        let (settings, now) = fixture();
        let ctx = PageContext { language: Language::En, settings: &settings, now };
        let mut screen = DetailScreen::new(&RELICS[1], &ctx);
        let before = screen.view(&view_ctx())[2].plain_text();
        assert!(!screen.tick(now + Duration::from_millis(1)));
        assert!(screen.tick(now + Duration::from_millis(120)));
        let after = screen.view(&view_ctx())[2].plain_text();
        assert_ne!(before, after);
    }

    #[test]
    fn test_detail_hides_dots_for_single_plate_relics() {
        let (settings, now) = fixture();
        let ctx = PageContext { language: Language::En, settings: &settings, now };
        let single = &RELICS[1];
        assert_eq!(single.plates.len(), 1);
        let screen = DetailScreen::new(single, &ctx);
        let text: String = screen.view(&view_ctx()).iter().map(Line::plain_text).collect();
        assert!(!text.contains('●'));
        let multi = DetailScreen::new(&RELICS[2], &ctx);
        let text: String = multi.view(&view_ctx()).iter().map(Line::plain_text).collect();
        assert!(text.contains("● ○ ○"));
    }
}
