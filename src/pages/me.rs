//! The profile page. Static content rendered straight from the profile
//! data; localization happens at view time so a language switch needs no
//! remount logic here.

use crate::{
    content::{strings, Engagement, PROFILE},
    pages::ViewContext,
    screen::{wrap, Line, Span},
    theme::Theme,
};
use itertools::Itertools;

pub(crate) struct MeScreen;

impl MeScreen {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn view(&self, ctx: &ViewContext) -> Vec<Line> {
        let theme = &ctx.theme;
        let t = strings(ctx.language);
        let cols = ctx.width.saturating_sub(8).clamp(24, 72);
        let mut lines = vec![
            Line::new().push(Span::new(format!("  {}", PROFILE.name.to_uppercase()))
                .fg(theme.highlight)
                .bold()),
            Line::new().push(Span::new(format!("  {}", t.me_subtitle)).fg(theme.accent)),
            Line::new().push(Span::new(format!("  {}", "▔".repeat(cols))).fg(theme.frame)),
            Line::blank(),
        ];

        lines.push(section("01", t.me_education, theme));
        lines.push(
            Line::new()
                .push(Span::new(format!("  {}", PROFILE.education.school.get(ctx.language))).bold())
                .push(Span::new(format!("  {}", PROFILE.education.period)).fg(theme.dim)),
        );
        for row in wrap(PROFILE.education.summary.get(ctx.language), cols) {
            lines.push(Line::new().push(Span::new(format!("  {row}")).fg(theme.fg)));
        }
        lines.push(Line::blank());

        lines.push(section("02", t.me_experience, theme));
        for engagement in PROFILE.experiences {
            engagement_lines(&mut lines, engagement, ctx, cols);
        }

        lines.push(section("03", t.me_leadership, theme));
        for engagement in PROFILE.leadership {
            engagement_lines(&mut lines, engagement, ctx, cols);
        }

        lines.push(section("04", t.me_skills, theme));
        for group in PROFILE.skills {
            lines.push(
                Line::new().push(Span::new(format!("  {}", group.label.get(ctx.language))).fg(theme.accent)),
            );
            let items = group.items.iter().map(|item| item.get(ctx.language)).join(" / ");
            for row in wrap(&items, cols) {
                lines.push(Line::new().push(Span::new(format!("  {row}")).fg(theme.fg)));
            }
            lines.push(Line::blank());
        }
        lines
    }
}

fn section(number: &str, label: &str, theme: &Theme) -> Line {
    Line::new()
        .push(Span::new(format!("  {number} // ")).fg(theme.dim))
        .push(Span::new(label).fg(theme.highlight).bold())
}

fn engagement_lines(lines: &mut Vec<Line>, engagement: &Engagement, ctx: &ViewContext, cols: usize) {
    let theme = &ctx.theme;
    lines.push(
        Line::new()
            .push(Span::new(format!("  {}", engagement.title.get(ctx.language))).bold())
            .push(Span::new(format!("  {}", engagement.period)).fg(theme.dim)),
    );
    let role = engagement.role.get(ctx.language);
    if !role.is_empty() {
        lines.push(Line::new().push(Span::new(format!("  {role}")).fg(theme.accent)));
    }
    for detail in engagement.details {
        for (index, row) in wrap(detail.get(ctx.language), cols).into_iter().enumerate() {
            let lead = if index == 0 { "  :: " } else { "     " };
            lines.push(Line::new().push(Span::new(format!("{lead}{row}")).fg(theme.fg)));
        }
    }
    lines.push(Line::blank());
}
