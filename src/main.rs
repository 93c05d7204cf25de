//! ROGUE VERGE, a cyberpunk portfolio for the terminal. Boots a fake
//! diagnostic splash, then serves the home, archive, and profile pages
//! with scramble-decrypt text effects driven from a single event loop.

mod boot;
mod config;
mod content;
mod effects;
mod pages;
mod screen;
mod session;
mod theme;
mod widgets;

use crate::{
    boot::BootSequence,
    config::{Config, EffectsConfig, Settings},
    content::{relic_by_code, Language, Relic},
    effects::{
        driver::{PollState, Pollable, ScrambleDriver},
        scramble::ScrambleError,
    },
    pages::{Nav, Page, PageContext, Router, ViewContext, NAV_ROWS},
    screen::{Line, Screen, Span},
    session::SessionStore,
    theme::Theme,
    widgets::TitleScramble,
};
use anyhow::{anyhow, Context};
use clap::Parser;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::{
    io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use unicode_width::UnicodeWidthStr;

/// Event loop pacing; animations tick on their own cadences on top.
const FRAME: Duration = Duration::from_millis(16);
const FOOTER_ROWS: usize = 1;
/// The pointer readout refreshes at most this often.
const LOC_THROTTLE: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Interface language (zh-TW or en)
    #[clap(short, long, env = "ROGUEVERGE_LANGUAGE")]
    language: Option<Language>,

    /// Skip the boot splash
    #[clap(long)]
    skip_boot: bool,

    /// Path to the configuration file
    #[clap(short, long, env = "ROGUEVERGE_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Open a relic's detail page directly by code
    #[clap(long, value_name = "CODE")]
    relic: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("[rogueverge] error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let overlay = Config {
        language: cli.language,
        skip_boot: cli.skip_boot.then_some(true),
        effects: EffectsConfig::default(),
    };
    let config = config.merged(&overlay)?;
    let settings = Settings::from_config(&config);
    settings.validate()?;

    // Resolve the deep link before touching the terminal so a bad code
    // fails with a plain message.
    let deep_link = cli
        .relic
        .as_deref()
        .map(|code| relic_by_code(code).ok_or_else(|| anyhow!("no relic with code {code:?}")))
        .transpose()?;

    let session = SessionStore::new();
    let mut screen = Screen::open().context("preparing the terminal")?;
    if settings.skip_boot || deep_link.is_some() {
        session.mark_booted();
    } else if !run_boot(&mut screen, &session)? {
        return Ok(());
    }

    let now = Instant::now();
    let mut app = App::new(settings, now)?;
    if let Some(relic) = deep_link {
        app.open(relic, now)?;
    }
    app.run(&mut screen)
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => match Config::default_path() {
            Some(path) if path.exists() => Config::load(&path)
                .with_context(|| format!("loading configuration from {}", path.display())),
            _ => Ok(Config::default()),
        },
    }
}

/// Drive the boot splash to completion. Returns false when the user quits
/// instead of waiting it out.
fn run_boot(screen: &mut Screen, session: &SessionStore) -> anyhow::Result<bool> {
    let mut boot = BootSequence::new(session.clone(), Instant::now());
    let (width, _) = screen.size();
    screen.draw(&boot.view(width as usize))?;
    loop {
        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(false);
                    }
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(false),
                    _ => {}
                },
                Event::Resize(w, h) => screen.resize(w, h),
                _ => {}
            }
        }
        match boot.poll(Instant::now()) {
            PollState::Modified => {
                let (width, _) = screen.size();
                screen.draw(&boot.view(width as usize))?;
            }
            PollState::Unmodified => {}
            PollState::Done => return Ok(true),
        }
    }
}

struct App {
    settings: Settings,
    language: Language,
    router: Router,
    nav: Nav,
    effects: ScrambleDriver,
    title: Option<TitleScramble>,
    awakened: bool,
    pointer: (u16, u16),
    pointer_seen: Instant,
    content_rows: usize,
    dirty: bool,
    quit: bool,
}

impl App {
    fn new(settings: Settings, now: Instant) -> Result<Self, ScrambleError> {
        let language = settings.language;
        let ctx = PageContext { language, settings: &settings, now };
        let router = Router::new(&ctx)?;
        let nav = Nav::new(&ctx)?;
        let title = TitleScramble::new(router.title(), now);
        Ok(Self {
            settings,
            language,
            router,
            nav,
            effects: ScrambleDriver::new(),
            title: Some(title),
            awakened: false,
            pointer: (0, 0),
            pointer_seen: now,
            content_rows: 0,
            dirty: true,
            quit: false,
        })
    }

    fn run(&mut self, screen: &mut Screen) -> anyhow::Result<()> {
        self.draw(screen)?;
        while !self.quit {
            let (width, height) = screen.size();
            let viewport = content_viewport(height);
            if event::poll(FRAME)? {
                loop {
                    match event::read()? {
                        Event::Key(key) if key.kind != KeyEventKind::Release => {
                            self.on_key(key, viewport, Instant::now())?;
                        }
                        Event::Mouse(mouse) => {
                            self.on_mouse(mouse, width as usize, viewport, Instant::now())?;
                        }
                        Event::Resize(w, h) => {
                            screen.resize(w, h);
                            self.dirty = true;
                        }
                        _ => {}
                    }
                    if self.quit || !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
                if self.quit {
                    break;
                }
            }

            let now = Instant::now();
            if self.router.tick(now) {
                self.dirty = true;
            }
            if self.effects.poll(now) == PollState::Modified {
                self.dirty = true;
            }
            let mut title_finished = false;
            if let Some(title) = self.title.as_mut() {
                match title.poll(now) {
                    PollState::Modified => screen.set_title(title.title())?,
                    PollState::Done => {
                        screen.set_title(title.title())?;
                        title_finished = true;
                    }
                    PollState::Unmodified => {}
                }
            }
            if title_finished {
                self.title = None;
            }
            self.router.observe(viewport, &mut self.effects, now);
            if self.dirty {
                self.draw(screen)?;
                self.dirty = false;
            }
        }
        Ok(())
    }

    fn navigate_to(&mut self, page: Page, now: Instant) -> Result<(), ScrambleError> {
        let ctx = PageContext { language: self.language, settings: &self.settings, now };
        self.router.navigate(page, &ctx)?;
        self.nav.focus(page, &mut self.effects, now);
        self.title = Some(TitleScramble::new(self.router.title(), now));
        self.dirty = true;
        Ok(())
    }

    fn open(&mut self, relic: &'static Relic, now: Instant) -> Result<(), ScrambleError> {
        let ctx = PageContext { language: self.language, settings: &self.settings, now };
        self.router.open_relic(relic, &ctx)?;
        self.title = Some(TitleScramble::new(self.router.title(), now));
        self.dirty = true;
        Ok(())
    }

    /// Switch languages in place: rebind the nav labels and remount the
    /// current page so every string re-resolves.
    fn toggle_language(&mut self, now: Instant) -> Result<(), ScrambleError> {
        self.language = self.language.toggle();
        let ctx = PageContext { language: self.language, settings: &self.settings, now };
        self.nav.rebuild(&ctx)?;
        self.navigate_to(self.router.page(), now)
    }

    fn reveal_selection(&mut self, viewport: usize) {
        if let Some((top, height)) = self.router.selection_rows() {
            self.router.reveal(top, height, viewport);
        }
    }

    fn on_key(&mut self, key: KeyEvent, viewport: usize, now: Instant) -> Result<(), ScrambleError> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
                return Ok(());
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.router.page() == Page::RelicDetail {
                    self.navigate_to(Page::Relics, now)?;
                } else {
                    self.quit = true;
                }
                return Ok(());
            }
            KeyCode::Char('h') => self.navigate_to(Page::Home, now)?,
            KeyCode::Char('r') => self.navigate_to(Page::Relics, now)?,
            KeyCode::Char('m') => self.navigate_to(Page::Me, now)?,
            KeyCode::Char('l') => self.toggle_language(now)?,
            KeyCode::Up => {
                if self.router.page() == Page::Relics {
                    self.router.select_prev();
                    self.reveal_selection(viewport);
                } else {
                    self.router.scroll_by(-1, self.content_rows, viewport);
                }
            }
            KeyCode::Down => {
                if self.router.page() == Page::Relics {
                    self.router.select_next();
                    self.reveal_selection(viewport);
                } else {
                    self.router.scroll_by(1, self.content_rows, viewport);
                }
            }
            KeyCode::Char('k') => self.router.scroll_by(-1, self.content_rows, viewport),
            KeyCode::Char('j') => self.router.scroll_by(1, self.content_rows, viewport),
            KeyCode::PageUp => {
                self.router.scroll_by(-(viewport as isize), self.content_rows, viewport);
            }
            KeyCode::PageDown => {
                self.router.scroll_by(viewport as isize, self.content_rows, viewport);
            }
            KeyCode::Left => self.router.slide(-1),
            KeyCode::Right => self.router.slide(1),
            KeyCode::Tab => {
                self.router.select_next();
                self.reveal_selection(viewport);
            }
            KeyCode::Enter => match self.router.page() {
                Page::Home => self.awakened = !self.awakened,
                Page::Relics => {
                    if let Some(relic) = self.router.selected_relic() {
                        self.open(relic, now)?;
                    }
                }
                _ => {}
            },
            _ => return Ok(()),
        }
        self.dirty = true;
        Ok(())
    }

    fn on_mouse(
        &mut self,
        mouse: MouseEvent,
        width: usize,
        viewport: usize,
        now: Instant,
    ) -> Result<(), ScrambleError> {
        let row = mouse.row as usize;
        let column = mouse.column as usize;
        match mouse.kind {
            MouseEventKind::Moved => {
                if now.duration_since(self.pointer_seen) >= LOC_THROTTLE {
                    self.pointer_seen = now;
                    self.pointer = (mouse.column, mouse.row);
                    self.dirty = true;
                }
                if row < NAV_ROWS {
                    self.nav.on_mouse_move(width, column, &mut self.effects, now);
                } else {
                    let content_row = row - NAV_ROWS + self.router.scroll();
                    self.router.on_content_mouse(
                        content_row,
                        column,
                        width,
                        &mut self.effects,
                        now,
                    );
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if row < NAV_ROWS {
                    if let Some(page) = self.nav.hit(width, column) {
                        self.navigate_to(page, now)?;
                    }
                    return Ok(());
                }
                let content_row = row - NAV_ROWS + self.router.scroll();
                match self.router.page() {
                    Page::Home => {
                        self.awakened = !self.awakened;
                        self.dirty = true;
                    }
                    // The back hint sits on the detail page's first row.
                    Page::RelicDetail if content_row == 0 => {
                        self.navigate_to(Page::Relics, now)?;
                    }
                    _ => {}
                }
            }
            MouseEventKind::ScrollUp => {
                self.router.scroll_by(-2, self.content_rows, viewport);
                self.dirty = true;
            }
            MouseEventKind::ScrollDown => {
                self.router.scroll_by(2, self.content_rows, viewport);
                self.dirty = true;
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, screen: &mut Screen) -> io::Result<()> {
        let (width, height) = screen.size();
        let width = width as usize;
        let viewport = content_viewport(height);
        let theme = Theme::for_state(self.awakened);
        let mut lines = self.nav.view(width, &theme, self.router.page());
        let content = self.router.view(&ViewContext {
            width,
            theme,
            language: self.language,
            awakened: self.awakened,
            pointer: self.pointer,
        });
        self.content_rows = content.len();
        // A page switch can leave the old scroll past the new page's end.
        self.router.scroll_by(0, self.content_rows, viewport);
        let scroll = self.router.scroll();
        lines.extend(content.into_iter().skip(scroll).take(viewport));
        while lines.len() < NAV_ROWS + viewport {
            lines.push(Line::blank());
        }
        lines.push(self.footer(width, &theme));
        screen.draw(&lines)
    }

    fn footer(&self, width: usize, theme: &Theme) -> Line {
        let hints = " h home · r relics · m me · l language · q quit";
        let (zh_color, en_color) = match self.language {
            Language::ZhTw => (theme.accent, theme.dim),
            Language::En => (theme.dim, theme.accent),
        };
        let gap = width.saturating_sub(hints.width() + "ZH / EN ".width());
        Line::new()
            .push(Span::new(hints).fg(theme.dim))
            .push(Span::new(" ".repeat(gap)))
            .push(Span::new("ZH").fg(zh_color))
            .push(Span::new(" / ").fg(theme.frame))
            .push(Span::new("EN ").fg(en_color))
    }
}

fn content_viewport(height: u16) -> usize {
    (height as usize).saturating_sub(NAV_ROWS + FOOTER_ROWS).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_language_and_relic_code() {
        let cli = Cli::parse_from(["rogueverge", "--language", "en", "--relic", "rv-003"]);
        assert_eq!(cli.language, Some(Language::En));
        assert_eq!(cli.relic.as_deref(), Some("rv-003"));
        let cli = Cli::parse_from(["rogueverge", "-l", "zh"]);
        assert_eq!(cli.language, Some(Language::ZhTw));
        assert!(!cli.skip_boot);
    }

    #[test]
    fn test_viewport_always_leaves_room_for_content() {
        assert_eq!(content_viewport(24), 21);
        assert_eq!(content_viewport(3), 1);
        assert_eq!(content_viewport(0), 1);
    }
}
