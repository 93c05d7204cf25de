//! The page router and the navigation chrome. Pages are mounted by name;
//! mounting builds the page's screen state fresh and unmounts whatever was
//! there, which also orphans any scramble runs still writing to it.

pub(crate) mod home;
pub(crate) mod me;
pub(crate) mod relics;

use crate::{
    config::Settings,
    content::{strings, Language, Relic},
    effects::{driver::ScrambleDriver, scramble::ScrambleError},
    screen::{Line, Span},
    theme::Theme,
    widgets::{ScrambleText, TriggerPolicy},
};
use std::{ops::Range, time::Instant};
use strum::{Display, EnumString};
use unicode_width::UnicodeWidthStr;

/// Pages the router can mount, addressed by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum Page {
    #[default]
    Home,
    Relics,
    RelicDetail,
    Me,
}

/// Everything a screen needs at mount time.
#[derive(Clone, Copy)]
pub(crate) struct PageContext<'a> {
    pub(crate) language: Language,
    pub(crate) settings: &'a Settings,
    pub(crate) now: Instant,
}

/// Everything a screen needs to lay out one frame.
pub(crate) struct ViewContext {
    pub(crate) width: usize,
    pub(crate) theme: Theme,
    pub(crate) language: Language,
    pub(crate) awakened: bool,
    pub(crate) pointer: (u16, u16),
}

pub(crate) const NAV_ROWS: usize = 2;
const NAV_GAP: usize = 4;
const LOGO: &str = "ROGUE VERGE";

/// Fixed chrome at the top of every page: the logo and the two hover
/// scrambled navigation labels, with an underline marking the active one.
pub(crate) struct Nav {
    relics: ScrambleText,
    me: ScrambleText,
}

impl Nav {
    pub(crate) fn new(ctx: &PageContext) -> Result<Self, ScrambleError> {
        let t = strings(ctx.language);
        Ok(Self {
            relics: ScrambleText::new(
                ctx.settings.cipher_spec(t.relics_title),
                TriggerPolicy::Hover,
            )?,
            me: ScrambleText::new(ctx.settings.cipher_spec(t.me_title), TriggerPolicy::Hover)?,
        })
    }

    /// Rebuilt on language switch so the labels re-bind to the new text.
    pub(crate) fn rebuild(&mut self, ctx: &PageContext) -> Result<(), ScrambleError> {
        *self = Self::new(ctx)?;
        Ok(())
    }

    /// Column ranges of the clickable items on the nav row. Measured
    /// against the stable target widths, not the shimmering frames.
    fn spans(&self, width: usize) -> [(Page, Range<usize>); 3] {
        let me_width = self.me.target().width();
        let relics_width = self.relics.target().width();
        let me_start = width.saturating_sub(me_width + 2);
        let relics_start = me_start.saturating_sub(relics_width + NAV_GAP);
        [
            (Page::Home, 1..1 + LOGO.width()),
            (Page::Relics, relics_start..relics_start + relics_width),
            (Page::Me, me_start..me_start + me_width),
        ]
    }

    pub(crate) fn hit(&self, width: usize, column: usize) -> Option<Page> {
        self.spans(width)
            .into_iter()
            .find(|(_, range)| range.contains(&column))
            .map(|(page, _)| page)
    }

    /// Pointer movement over a nav label restarts its scramble.
    pub(crate) fn on_mouse_move(
        &mut self,
        width: usize,
        column: usize,
        effects: &mut ScrambleDriver,
        now: Instant,
    ) {
        match self.hit(width, column) {
            Some(Page::Relics) => self.relics.on_hover(effects, now),
            Some(Page::Me) => self.me.on_hover(effects, now),
            _ => {}
        }
    }

    /// Keyboard navigation lands focus on a label; flash it like a hover.
    pub(crate) fn focus(&mut self, page: Page, effects: &mut ScrambleDriver, now: Instant) {
        match page {
            Page::Relics | Page::RelicDetail => self.relics.on_hover(effects, now),
            Page::Me => self.me.on_hover(effects, now),
            Page::Home => {}
        }
    }

    pub(crate) fn view(&self, width: usize, theme: &Theme, current: Page) -> Vec<Line> {
        let [(_, logo_range), (_, relics_range), (_, me_range)] = self.spans(width);
        let relics_active = matches!(current, Page::Relics | Page::RelicDetail);
        let relics_color = if relics_active { theme.accent } else { theme.fg };
        let me_color = if current == Page::Me { theme.accent } else { theme.fg };

        let row = Line::new()
            .push(Span::new(" "))
            .push(Span::new(LOGO).fg(theme.highlight).bold())
            .push(Span::new(" ".repeat(relics_range.start.saturating_sub(logo_range.end))))
            .push(Span::new(self.relics.display()).fg(relics_color))
            .push(Span::new(" ".repeat(NAV_GAP)))
            .push(Span::new(self.me.display()).fg(me_color));

        let underline_range = match current {
            Page::Relics | Page::RelicDetail => Some(relics_range),
            Page::Me => Some(me_range),
            Page::Home => None,
        };
        let underline = match underline_range {
            Some(range) => Line::new()
                .push(Span::new(" ".repeat(range.start)))
                .push(Span::new("▔".repeat(range.len())).fg(theme.accent)),
            None => Line::blank(),
        };
        vec![row, underline]
    }
}

enum Mounted {
    Home(home::HomeScreen),
    Relics(relics::RelicsScreen),
    Detail(relics::DetailScreen),
    Me(me::MeScreen),
}

/// Owns the current page, its mounted screen state, and the scroll
/// position. Navigation always resets scroll to the top.
pub(crate) struct Router {
    page: Page,
    mounted: Mounted,
    selected: Option<&'static Relic>,
    scroll: usize,
}

impl Router {
    pub(crate) fn new(ctx: &PageContext) -> Result<Self, ScrambleError> {
        Ok(Self {
            page: Page::Home,
            mounted: Mounted::Home(home::HomeScreen::new(ctx)?),
            selected: None,
            scroll: 0,
        })
    }

    pub(crate) fn page(&self) -> Page {
        self.page
    }

    pub(crate) fn scroll(&self) -> usize {
        self.scroll
    }

    /// Window title for the current page.
    pub(crate) fn title(&self) -> String {
        match self.page {
            Page::Home => "ROGUE VERGE".to_string(),
            Page::Relics => "RELICs // DATA LOG".to_string(),
            Page::RelicDetail => format!(
                "[ R / V ] RELIC // {}",
                self.selected.map(|relic| relic.code).unwrap_or("UNKNOWN")
            ),
            Page::Me => "[ ME ] // PROFILE".to_string(),
        }
    }

    /// Mount `page` fresh. Asking for the detail page with nothing
    /// selected lands on the archive instead.
    pub(crate) fn navigate(&mut self, page: Page, ctx: &PageContext) -> Result<(), ScrambleError> {
        self.mounted = match page {
            Page::Home => Mounted::Home(home::HomeScreen::new(ctx)?),
            Page::Relics => Mounted::Relics(relics::RelicsScreen::new(ctx)?),
            Page::RelicDetail => match self.selected {
                Some(relic) => Mounted::Detail(relics::DetailScreen::new(relic, ctx)),
                None => return self.navigate(Page::Relics, ctx),
            },
            Page::Me => Mounted::Me(me::MeScreen::new()),
        };
        self.page = page;
        self.scroll = 0;
        Ok(())
    }

    pub(crate) fn open_relic(
        &mut self,
        relic: &'static Relic,
        ctx: &PageContext,
    ) -> Result<(), ScrambleError> {
        self.selected = Some(relic);
        self.navigate(Page::RelicDetail, ctx)
    }

    /// Step the mounted screen's free-running effects.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        match &mut self.mounted {
            Mounted::Home(screen) => screen.tick(now),
            Mounted::Detail(screen) => screen.tick(now),
            Mounted::Relics(_) | Mounted::Me(_) => false,
        }
    }

    /// Feed visibility to the mounted screen's viewport-gated bindings and
    /// scroll-armed triggers.
    pub(crate) fn observe(
        &mut self,
        viewport: usize,
        effects: &mut ScrambleDriver,
        now: Instant,
    ) {
        match &mut self.mounted {
            Mounted::Home(screen) => screen.observe(self.scroll, viewport, effects, now),
            Mounted::Relics(screen) => screen.observe(self.scroll, viewport, effects, now),
            Mounted::Detail(_) | Mounted::Me(_) => {}
        }
    }

    pub(crate) fn view(&self, ctx: &ViewContext) -> Vec<Line> {
        match &self.mounted {
            Mounted::Home(screen) => screen.view(ctx),
            Mounted::Relics(screen) => screen.view(ctx),
            Mounted::Detail(screen) => screen.view(ctx),
            Mounted::Me(screen) => screen.view(ctx),
        }
    }

    pub(crate) fn scroll_by(&mut self, delta: isize, content_rows: usize, viewport: usize) {
        let max = content_rows.saturating_sub(viewport);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    /// Scroll just far enough to bring a row range fully into view.
    pub(crate) fn reveal(&mut self, top: usize, height: usize, viewport: usize) {
        if top < self.scroll {
            self.scroll = top;
        } else if top + height > self.scroll + viewport {
            self.scroll = (top + height).saturating_sub(viewport);
        }
    }

    pub(crate) fn select_next(&mut self) {
        if let Mounted::Relics(screen) = &mut self.mounted {
            screen.select_next();
        }
    }

    pub(crate) fn select_prev(&mut self) {
        if let Mounted::Relics(screen) = &mut self.mounted {
            screen.select_prev();
        }
    }

    pub(crate) fn selected_relic(&self) -> Option<&'static Relic> {
        match &self.mounted {
            Mounted::Relics(screen) => Some(screen.selected_relic()),
            _ => None,
        }
    }

    /// Row range of the archive's selected card, for keeping it in view.
    pub(crate) fn selection_rows(&self) -> Option<(usize, usize)> {
        match &self.mounted {
            Mounted::Relics(screen) => Some(screen.selection_rows()),
            _ => None,
        }
    }

    pub(crate) fn slide(&mut self, step: isize) {
        if let Mounted::Detail(screen) = &mut self.mounted {
            screen.slide(step);
        }
    }

    /// Pointer movement translated into the page's content coordinates.
    pub(crate) fn on_content_mouse(
        &mut self,
        row: usize,
        column: usize,
        width: usize,
        effects: &mut ScrambleDriver,
        now: Instant,
    ) {
        if let Mounted::Home(screen) = &mut self.mounted {
            screen.on_mouse(row, column, width, effects, now);
        }
    }
}
