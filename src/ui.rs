use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::keyboard::{key_for_char, KEY_ROWS};
use crate::snapshot::Snapshot;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

/// Which screen the front end is showing.
#[derive(Clone, Debug, PartialEq)]
pub enum View {
    Typing,
    TierSelect,
    Finished,
}

/// Everything the terminal needs to draw one frame.
pub struct FrameData<'a> {
    pub snapshot: &'a Snapshot,
    pub view: &'a View,
    pub tiers: &'a [&'a str],
    /// Inline message on the tier-select screen (e.g. an invalid tier).
    pub notice: Option<&'a str>,
}

pub fn draw(f: &mut Frame, data: &FrameData) {
    match data.view {
        View::Typing => render_typing(f, data.snapshot),
        View::TierSelect => render_tier_select(f, data),
        View::Finished => render_summary(f, data.snapshot),
    }
}

fn render_typing(f: &mut Frame, snap: &Snapshot) {
    let area = f.area();

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let sentence_lines =
        ((snap.masked.width() as f64 / max_chars_per_line as f64).ceil() as u16).max(1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),                  // status line
            Constraint::Min(1),                     // top padding
            Constraint::Length(sentence_lines),     // masked sentence
            Constraint::Min(1),                     // bottom padding
            Constraint::Length(KEY_ROWS.len() as u16 + 1), // keyboard + space bar
            Constraint::Length(1),                  // help line
        ])
        .split(area);

    render_status(f, chunks[0], snap);
    render_sentence(f, chunks[2], snap);
    render_keyboard(f, chunks[4], snap.highlight);

    let help = Paragraph::new(Span::styled(
        "type the sentence, enter to submit | (tab) tier | (esc) quit",
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(help, chunks[5]);
}

fn render_status(f: &mut Frame, area: Rect, snap: &Snapshot) {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let elapsed = snap
        .elapsed_secs
        .map_or(String::from("--"), |s| format!("{s:.1}s"));

    let status = Line::from(vec![
        Span::styled(format!("grade {}", snap.tier), bold),
        Span::styled("  score ", dim),
        Span::styled(snap.score.to_string(), bold),
        Span::styled("  level ", dim),
        Span::styled(format!("{}/{}", snap.level, snap.max_level), bold),
        Span::styled("  time ", dim),
        Span::styled(elapsed, bold),
        Span::styled("  acc ", dim),
        Span::styled(format!("{:.1}%", snap.accuracy), bold),
        Span::styled(format!("  {}", snap.phase), dim.add_modifier(Modifier::ITALIC)),
    ]);

    f.render_widget(Paragraph::new(status).alignment(Alignment::Center), area);
}

fn render_sentence(f: &mut Frame, area: Rect, snap: &Snapshot) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let typed_style = if snap.incorrect_flash {
        bold.fg(Color::Red)
    } else {
        bold.fg(Color::Green)
    };
    let rest_style = bold.add_modifier(Modifier::DIM);

    let typed: String = snap.masked.chars().take(snap.typed_len).collect();
    let rest: String = snap.masked.chars().skip(snap.typed_len).collect();

    let spans = vec![
        Span::styled(typed, typed_style),
        Span::styled(rest, rest_style),
    ];

    let single_line = snap.masked.width() <= area.width as usize;
    let widget = Paragraph::new(Line::from(spans))
        .alignment(if single_line {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: false });

    f.render_widget(widget, area);
}

fn render_keyboard(f: &mut Frame, area: Rect, highlight: Option<char>) {
    let target_cap = highlight.and_then(key_for_char);

    let cap_style = Style::default().fg(Color::White);
    let lit_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = KEY_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&key| {
                    let style = if target_cap == Some(key) {
                        lit_style
                    } else {
                        cap_style
                    };
                    Span::styled(format!(" {} ", key.to_ascii_uppercase()), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let space_style = if target_cap == Some(' ') {
        lit_style
    } else {
        cap_style
    };
    lines.push(Line::from(Span::styled("[ space ]", space_style)));

    let keyboard = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(keyboard, area);
}

fn render_tier_select(f: &mut Frame, data: &FrameData) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(3),    // tier list
            Constraint::Length(1), // notice
            Constraint::Length(1), // help
        ])
        .split(area);

    let title = Paragraph::new("Pick a grade")
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let active = data.snapshot.tier.as_str();
    let lines: Vec<Line> = data
        .tiers
        .iter()
        .map(|&tier| {
            let marker = if tier == active { "▸" } else { " " };
            let style = if tier == active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{marker} grade {tier}"), style))
        })
        .collect();
    let list = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(list, chunks[1]);

    if let Some(msg) = data.notice {
        let notice = Paragraph::new(Span::styled(
            msg.to_string(),
            Style::default().fg(Color::Red),
        ))
        .alignment(Alignment::Center);
        f.render_widget(notice, chunks[2]);
    }

    let help = Paragraph::new(Span::styled(
        "press a grade number to switch (resets progress) | (esc) back",
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);
}

fn render_summary(f: &mut Frame, snap: &Snapshot) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Min(1),    // padding
            Constraint::Length(6), // summary
            Constraint::Min(1),    // padding
            Constraint::Length(1), // help
        ])
        .split(area);

    let avg = snap
        .avg_round_secs
        .map_or(String::from("--"), |s| format!("{s:.1}s"));

    let lines = vec![
        Line::from(Span::styled(
            "Session complete!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("grade {}  score {}", snap.tier, snap.score)),
        Line::from(format!("rounds {}", snap.rounds_completed)),
        Line::from(format!("accuracy {:.1}%", snap.accuracy)),
        Line::from(format!("avg time per sentence {avg}")),
    ];

    let summary = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(summary, chunks[1]);

    let help = Paragraph::new(Span::styled(
        "(r) play again | (tab) change grade | (esc) quit",
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);
}
