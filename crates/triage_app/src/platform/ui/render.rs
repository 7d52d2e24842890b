use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use triage_core::{AppViewModel, CategoryClass, ConfidenceColor, LOADING_TEXT};

use super::constants::{Offered, COMMAND_BAR, TEXT_TAIL_LINES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    Heading,
    Muted,
    Notice,
    Error,
    Category(CategoryClass),
    Confidence(ConfidenceColor),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: LineStyle,
}

impl Line {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Full interactive screen for the current view.
pub fn render(view: &AppViewModel, status: Option<&str>) -> Vec<Line> {
    let mut lines = vec![Line::new(LineStyle::Heading, "Mail triage")];

    lines.extend(render_input(view));

    if let Some(notice) = &view.notice {
        lines.push(Line::new(LineStyle::Notice, format!("! {notice}")));
    }

    lines.push(Line::new(LineStyle::Plain, ""));
    lines.extend(render_result(view));

    if let Some(status) = status {
        lines.push(Line::new(LineStyle::Muted, status));
    }
    lines.push(Line::new(LineStyle::Muted, command_bar(view)));
    lines
}

/// Lists only the commands that would do something right now.
fn command_bar(view: &AppViewModel) -> String {
    COMMAND_BAR
        .iter()
        .filter(|(_, offered)| match offered {
            Offered::Always => true,
            Offered::WithText => view.can_submit_text,
            Offered::WithFile => view.can_submit_file,
            Offered::WithResult => view.analysis.is_some(),
        })
        .map(|(label, _)| *label)
        .collect::<Vec<_>>()
        .join("  ")
}

fn render_input(view: &AppViewModel) -> Vec<Line> {
    let mut lines = Vec::new();
    if view.email_text.is_empty() {
        lines.push(Line::new(
            LineStyle::Muted,
            "Type or paste the email text, then :send",
        ));
    } else {
        let text_lines: Vec<&str> = view.email_text.lines().collect();
        lines.push(Line::new(
            LineStyle::Plain,
            format!(
                "Email text ({} lines, {} chars):",
                text_lines.len(),
                view.email_text.chars().count()
            ),
        ));
        let skip = text_lines.len().saturating_sub(TEXT_TAIL_LINES);
        if skip > 0 {
            lines.push(Line::new(LineStyle::Muted, format!("  | ... {skip} more")));
        }
        lines.extend(
            text_lines
                .iter()
                .skip(skip)
                .map(|line| Line::new(LineStyle::Plain, format!("  | {line}"))),
        );
    }

    match &view.selected_file {
        Some(file) => lines.push(Line::new(
            LineStyle::Plain,
            format!(
                "File: {} ({}), :sendfile to analyze",
                file.file_name, file.size_label
            ),
        )),
        None => lines.push(Line::new(
            LineStyle::Muted,
            "No file selected. Use :file <path> or drop a .txt/.pdf file here.",
        )),
    }
    lines
}

/// Result area only; also used for one-shot output.
pub fn render_result(view: &AppViewModel) -> Vec<Line> {
    if view.loading {
        return vec![Line::new(LineStyle::Heading, LOADING_TEXT)];
    }
    if let Some(error) = &view.error {
        return vec![Line::new(LineStyle::Error, format!("Error: {error}"))];
    }
    let (Some(analysis), Some(class)) = (&view.analysis, view.category_class) else {
        return Vec::new();
    };

    let mut lines = vec![
        Line::new(
            LineStyle::Category(class),
            format!("Category: {}", analysis.category),
        ),
        Line::new(
            LineStyle::Confidence(view.confidence_color),
            format!(
                "Confidence: {}",
                view.confidence_label.as_deref().unwrap_or("-")
            ),
        ),
        Line::new(LineStyle::Plain, "Suggested response (:copy to copy):"),
    ];
    lines.extend(indented(&analysis.suggested_response, LineStyle::Plain));
    lines.push(Line::new(LineStyle::Muted, "Original text preview:"));
    lines.extend(indented(&analysis.original_text_preview, LineStyle::Muted));
    lines
}

fn indented(text: &str, style: LineStyle) -> impl Iterator<Item = Line> + '_ {
    text.lines()
        .map(move |line| Line::new(style, format!("    {line}")))
}

/// Writes lines to `out`. `clear` repaints the whole screen; `color` turns
/// styling on.
pub fn paint(out: &mut impl Write, lines: &[Line], clear: bool, color: bool) -> io::Result<()> {
    if clear {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    for line in lines {
        if color {
            let (fg, bold) = style_of(line.style);
            if let Some(fg) = fg {
                queue!(out, SetForegroundColor(fg))?;
            }
            if bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            queue!(
                out,
                Print(&line.text),
                SetAttribute(Attribute::Reset),
                ResetColor,
                Print("\n")
            )?;
        } else {
            queue!(out, Print(&line.text), Print("\n"))?;
        }
    }
    out.flush()
}

fn style_of(style: LineStyle) -> (Option<Color>, bool) {
    match style {
        LineStyle::Plain => (None, false),
        LineStyle::Heading => (None, true),
        LineStyle::Muted => (Some(Color::DarkGrey), false),
        LineStyle::Notice => (Some(Color::Yellow), true),
        LineStyle::Error => (Some(rgb(ConfidenceColor::Danger)), true),
        LineStyle::Category(CategoryClass::Productive) => (Some(Color::Green), true),
        LineStyle::Category(CategoryClass::Unproductive) => (Some(Color::Red), true),
        LineStyle::Confidence(color) => (Some(rgb(color)), false),
    }
}

fn rgb(color: ConfidenceColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb { r, g, b }
}
