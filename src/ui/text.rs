//! Text helpers: wrapping, truncation, and support-line formatting.

use crate::model::{FeatureRecord, SupportRange};
use regex::Regex;
use std::sync::OnceLock;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

fn global_usage_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Global usage:\s*([0-9]+(?:\.[0-9]+)?)%").ok())
        .as_ref()
}

/// Pull `12.34%` out of a tooltip such as `Global usage: 12.34% - Supported`.
pub fn global_usage(title: &str) -> Option<String> {
    global_usage_re()?
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("{}%", m.as_str()))
}

/// Word-wrap `text` to `width` display columns, keeping blank lines.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            out.push(String::new());
            continue;
        }

        let mut line = String::new();
        let mut line_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            let gap = usize::from(!line.is_empty());

            if line_width + gap + word_width <= width {
                if gap == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                line_width += gap + word_width;
                continue;
            }

            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
                line_width = 0;
            }

            if word_width <= width {
                line.push_str(word);
                line_width = word_width;
            } else {
                // Hard-split words longer than a whole line
                for ch in word.chars() {
                    let w = ch.width().unwrap_or(0);
                    if line_width + w > width && !line.is_empty() {
                        out.push(std::mem::take(&mut line));
                        line_width = 0;
                    }
                    line.push(ch);
                    line_width += w;
                }
            }
        }
        if !line.is_empty() {
            out.push(line);
        }
    }

    out
}

/// Shorten `value` to `width` columns, marking the cut with `…`.
pub fn ellipsize(value: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if value.width() <= width {
        return value.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in value.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// The pieces of one support-range row, styled separately by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportLine {
    pub icon: &'static str,
    pub label: String,
    pub era: String,
    pub status: &'static str,
    pub usage: Option<String>,
    pub notes: Option<String>,
}

impl SupportLine {
    pub fn from_range(range: &SupportRange, include_usage: bool) -> Self {
        let usage = if include_usage {
            range.title.as_deref().and_then(global_usage)
        } else {
            None
        };
        let notes = (!range.note_refs.is_empty()).then(|| range.note_refs.join(","));

        Self {
            icon: range.status.icon(),
            label: range.label.clone(),
            era: format!("[{}]", range.era.label()),
            status: range.status.label(),
            usage,
            notes,
        }
    }

    /// Unstyled form, used for width checks and tests.
    pub fn plain(&self) -> String {
        let mut s = format!(" {}  {} {}  {}", self.icon, self.label, self.era, self.status);
        if let Some(usage) = &self.usage {
            s.push_str(&format!("  usage:{usage}"));
        }
        if let Some(notes) = &self.notes {
            s.push_str(&format!("  notes:{notes}"));
        }
        s
    }
}

/// `Usage: ✅ 95.12%  ◐ 1.20%  Total 96.32%`, or `None` when nothing is known.
pub fn usage_summary(feature: &FeatureRecord) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(supported) = feature.usage_supported {
        parts.push(format!("✅ {supported:.2}%"));
    }
    if let Some(partial) = feature.usage_partial {
        parts.push(format!("◐ {partial:.2}%"));
    }
    if let Some(total) = feature.usage_total {
        parts.push(format!("Total {total:.2}%"));
    }
    (!parts.is_empty()).then(|| format!("Usage: {}", parts.join("  ")))
}
