//! Draws composed feature and selection frames onto a ratatui `Frame`.

use crate::model::{BrowserBlock, Era, SupportStatus};
use crate::ui::layout::{self, FeatureFrame, FeatureLayout, CARD_WIDTH, NO_BROWSERS, NO_RANGES};
use crate::ui::selection::{self, SelectionFrame, HINT, TITLE};
use crate::ui::text::{ellipsize, usage_summary, wrap_lines, SupportLine};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const KEY_LEGEND: &str =
    "←/→ h/l browser  ↑/↓ j/k ranges  PgUp/PgDn page  Home/End  Tab [ ] sections  q/Esc quit";

pub fn render_feature(frame: &mut Frame, composed: &FeatureFrame, theme: &Theme) {
    match composed {
        FeatureFrame::TooSmall { width, height } => render_too_small(
            frame,
            (*width, *height),
            (layout::MIN_WIDTH, layout::MIN_HEIGHT),
            theme,
        ),
        FeatureFrame::Full(full) => {
            render_heading(frame, full, theme);
            render_support(frame, full, theme);
            render_details(frame, full, theme);
            render_footer(frame, full, theme);
        }
    }
}

pub fn render_selection(frame: &mut Frame, composed: &SelectionFrame, theme: &Theme) {
    let area = match composed {
        SelectionFrame::TooSmall { width, height } => {
            render_too_small(
                frame,
                (*width, *height),
                (selection::MIN_WIDTH, selection::MIN_HEIGHT),
                theme,
            );
            return;
        }
        SelectionFrame::List { area, .. } => *area,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {TITLE} "))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let width = usize::from(inner.width.saturating_sub(2));
    let lines: Vec<Line> = composed
        .rows()
        .into_iter()
        .map(|(text, focused)| {
            if focused {
                Line::from(Span::styled(
                    format!("› {}", pad(&ellipsize(&text, width), width)),
                    Style::default()
                        .fg(theme.badge_fg)
                        .bg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", ellipsize(&text, width)),
                    Style::default().fg(theme.fg),
                ))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let hint = Paragraph::new(Span::styled(
        ellipsize(HINT, usize::from(inner.width)),
        Style::default().fg(theme.fg_dim),
    ));
    frame.render_widget(hint, chunks[2]);
}

fn render_too_small(frame: &mut Frame, current: (u16, u16), required: (u16, u16), theme: &Theme) {
    let text = vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(theme.unsupported)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Current: {}x{}", current.0, current.1)),
        Line::from(format!("Required: {}x{}", required.0, required.1)),
        Line::from(Span::styled(
            "Press q to quit",
            Style::default().fg(theme.fg_dim),
        )),
    ];

    let panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.fg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.unsupported)),
        );
    frame.render_widget(panel, frame.area());
}

fn render_heading(frame: &mut Frame, full: &FeatureLayout, theme: &Theme) {
    let area = full.regions.heading;
    let feature = full.feature;
    let width = usize::from(area.width.saturating_sub(2));
    let rows = usize::from(area.height.saturating_sub(2));

    let mut title = vec![Span::styled(
        ellipsize(&feature.title, width),
        Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
    )];
    if let Some(status) = &feature.spec_status {
        title.push(Span::styled(
            format!("  [{status}]"),
            Style::default().fg(theme.tertiary),
        ));
    }

    let mut lines = vec![Line::from(title)];
    if let Some(url) = &feature.spec_url {
        lines.push(Line::from(Span::styled(
            ellipsize(&format!("Spec: {url}"), width),
            Style::default().fg(theme.secondary),
        )));
    }
    let usage = usage_summary(feature).unwrap_or_else(|| "Usage: unavailable".to_string());
    lines.push(Line::from(Span::styled(
        ellipsize(&usage, width),
        Style::default().fg(theme.fg_dim),
    )));
    if !feature.description.trim().is_empty() {
        let description = &feature.description;
        let room = rows.saturating_sub(lines.len());
        let wrapped = wrap_lines(description, width);
        let cut = wrapped.len() > room;
        for (i, line) in wrapped.into_iter().take(room).enumerate() {
            let line = if cut && i + 1 == room {
                ellipsize(&format!("{line} …"), width)
            } else {
                line
            };
            lines.push(Line::from(Span::styled(line, Style::default().fg(theme.fg))));
        }
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.fg_dim));
    if !feature.slug.is_empty() {
        block = block.title(format!(" /{} ", feature.slug));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The status shown on a carousel card: current release, else the newest past one.
fn headline_status(block: &BrowserBlock) -> Option<SupportStatus> {
    block
        .ranges
        .iter()
        .find(|r| r.era == Era::Current)
        .or_else(|| block.ranges.iter().rev().find(|r| r.era == Era::Past))
        .map(|r| r.status)
}

fn render_support(frame: &mut Frame, full: &FeatureLayout, theme: &Theme) {
    let area = full.regions.support;
    let total = full.feature.browser_blocks.len();
    let title = if total == 0 {
        " Browser Support ".to_string()
    } else {
        format!(" Browser Support {}/{} ", full.browsers.cursor + 1, total)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(focused) = full.focused else {
        frame.render_widget(
            Paragraph::new(Span::styled(NO_BROWSERS, Style::default().fg(theme.fg_dim))),
            inner,
        );
        return;
    };

    let slot = usize::from(CARD_WIDTH);
    let carousel: Vec<Span> = full
        .visible_browsers()
        .iter()
        .enumerate()
        .map(|(offset, browser)| {
            let icon = headline_status(browser).map_or("", SupportStatus::icon);
            let text = pad(
                &ellipsize(&format!(" {} {}", browser.name, icon), slot - 1),
                slot,
            );
            if full.browsers.start + offset == full.browsers.cursor {
                Span::styled(
                    text,
                    Style::default()
                        .fg(theme.badge_fg)
                        .bg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(text, Style::default().fg(theme.fg))
            }
        })
        .collect();

    let mut lines = vec![Line::from(carousel)];
    let header = if full.range_total == 0 {
        focused.name.clone()
    } else {
        format!(
            "{} · ranges {}-{} of {}",
            focused.name,
            full.range_start + 1,
            full.range_start + full.ranges.len(),
            full.range_total
        )
    };
    lines.push(Line::from(Span::styled(
        ellipsize(&header, usize::from(inner.width)),
        Style::default().fg(theme.fg_dim),
    )));

    if full.ranges.is_empty() {
        lines.push(Line::from(Span::styled(
            NO_RANGES,
            Style::default().fg(theme.fg_dim),
        )));
    }
    for range in full.ranges {
        let line = SupportLine::from_range(range, true);
        let status_style = Style::default().fg(theme.status_color(range.status));
        let mut spans = vec![
            Span::styled(format!(" {} ", line.icon), status_style),
            Span::styled(
                format!(" {} ", line.label),
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            ),
            Span::styled(line.era, Style::default().fg(theme.era_color(range.era))),
            Span::styled(format!("  {}", line.status), status_style),
        ];
        if let Some(usage) = line.usage {
            spans.push(Span::styled(
                format!("  usage:{usage}"),
                Style::default().fg(theme.fg_dim),
            ));
        }
        if let Some(notes) = line.notes {
            spans.push(Span::styled(
                format!("  notes:{notes}"),
                Style::default().fg(theme.fg_dim),
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_details(frame: &mut Frame, full: &FeatureLayout, theme: &Theme) {
    let area = full.regions.details;

    let mut tabs = vec![Span::raw(" ")];
    for (i, name) in full.tab_names.iter().enumerate() {
        if i > 0 {
            tabs.push(Span::styled(" │ ", Style::default().fg(theme.fg_dim)));
        }
        let style = if i == full.tab_index {
            Style::default()
                .fg(theme.tertiary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.fg_dim)
        };
        tabs.push(Span::styled(name.to_string(), style));
    }
    tabs.push(Span::raw(" "));

    let shown_end = full.tab_scroll + full.tab_lines.len();
    let position = if full.tab_total_lines == 0 {
        String::new()
    } else {
        format!(
            " {}-{} of {} ",
            full.tab_scroll + 1,
            shown_end,
            full.tab_total_lines
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(tabs))
        .title_bottom(Line::from(position).right_aligned())
        .border_style(Style::default().fg(theme.fg_dim));

    let lines: Vec<Line> = full
        .tab_lines
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(theme.fg))))
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut Frame, full: &FeatureLayout, theme: &Theme) {
    let area = full.regions.footer;
    let width = usize::from(area.width);

    let mut legend = Vec::new();
    for status in SupportStatus::all() {
        legend.push(Span::styled(
            format!(" {} ", status.icon()),
            Style::default()
                .fg(theme.badge_fg)
                .bg(theme.status_color(status)),
        ));
        legend.push(Span::styled(
            format!(" {}  ", status.label()),
            Style::default().fg(theme.status_color(status)),
        ));
    }

    let mut position = Vec::new();
    let total = full.feature.browser_blocks.len();
    if total > 0 {
        position.push(format!("Browser {}/{}", full.browsers.cursor + 1, total));
    }
    if let Some(name) = full.tab_names.get(full.tab_index) {
        position.push(format!(
            "Tab {}/{} {}",
            full.tab_index + 1,
            full.tab_names.len(),
            name
        ));
    }

    let lines = vec![
        Line::from(legend),
        Line::from(Span::styled(
            ellipsize(KEY_LEGEND, width),
            Style::default().fg(theme.fg_dim),
        )),
        Line::from(Span::styled(
            ellipsize(&position.join(" · "), width),
            Style::default().fg(theme.secondary),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Right-pad `value` with spaces to `width` display columns.
fn pad(value: &str, width: usize) -> String {
    let used = value.width();
    if used >= width {
        return value.to_string();
    }
    format!("{value}{}", " ".repeat(width - used))
}

/// Flatten a buffer region into one string per row, for assertions.
#[cfg(test)]
pub(crate) fn buffer_rows(
    buffer: &ratatui::buffer::Buffer,
    area: ratatui::layout::Rect,
) -> Vec<String> {
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect()
        })
        .collect()
}
