use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use summarizer_core::{AppViewModel, Dialog, Focus, SUPPORTED_UPLOAD_EXTENSIONS};

use super::input::{HELP, HISTORY_HELP};
use super::layout::{centered_rect, regions};
use super::theme::{palette, Palette};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const INPUT_PLACEHOLDER: &str = "Paste your text here...";
const SUMMARY_PLACEHOLDER: &str = "Summary will appear here...";

pub fn draw(frame: &mut Frame, view: &AppViewModel) {
    let colors = palette(view.theme);
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(colors.background).fg(colors.text)),
        area,
    );

    let regions = regions(area);
    draw_header(frame, regions.header, view, &colors);
    draw_input(frame, regions.input, view, &colors);
    draw_result(frame, regions.result, view, &colors);
    draw_history(frame, regions.history, view, &colors);
    draw_footer(frame, regions.footer, view, &colors);

    if let Some(prompt) = &view.path_prompt {
        draw_path_prompt(frame, prompt, &colors);
    }
    if let Some(dialog) = &view.dialog {
        draw_dialog(frame, dialog, &colors);
    }
}

fn card<'a>(title: &'a str, focused: bool, colors: &Palette) -> Block<'a> {
    let border = if focused {
        colors.focus_border
    } else {
        colors.border
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn draw_header(frame: &mut Frame, area: Rect, view: &AppViewModel, colors: &Palette) {
    let line = Line::from(vec![
        Span::styled(
            " LLM Summarizer ",
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  model: {}", view.model.label()),
            Style::default().fg(colors.text),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_input(frame: &mut Frame, area: Rect, view: &AppViewModel, colors: &Palette) {
    let block = card(" Input ", view.focus == Focus::Editor, colors);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(4)])
        .split(inner);

    let editor = if view.draft_text.is_empty() {
        Paragraph::new(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(colors.muted),
        ))
    } else {
        let paragraph = Paragraph::new(view.draft_text.as_str())
            .wrap(Wrap { trim: false });
        let rows = paragraph.line_count(parts[0].width);
        paragraph.scroll((tail_offset(rows, parts[0].height), 0))
    };
    frame.render_widget(editor, parts[0]);

    let file_line = match &view.attached_file {
        Some(name) => Line::from(vec![
            Span::styled("File: ", Style::default().fg(colors.muted)),
            Span::raw(name.clone()),
        ]),
        None => Line::from(Span::styled(
            "File: none (F3 to attach)",
            Style::default().fg(colors.muted),
        )),
    };
    let model_line = Line::from(vec![
        Span::styled("Model: ", Style::default().fg(colors.muted)),
        Span::styled(
            view.model.label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    let button_line = if view.submitting {
        let spinner = SPINNER_FRAMES[view.spinner_frame as usize % SPINNER_FRAMES.len()];
        Line::from(Span::styled(
            format!("[ {spinner} {} ]", view.submit_label),
            Style::default().fg(colors.muted),
        ))
    } else {
        Line::from(Span::styled(
            format!("[ {} ]", view.submit_label),
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let mut lines = vec![file_line, model_line, button_line];
    if let Some(error) = &view.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(colors.error),
        )));
    }
    frame.render_widget(Paragraph::new(lines), parts[1]);
}

/// Scroll offset that keeps the last wrapped row of the editor visible.
fn tail_offset(rows: usize, height: u16) -> u16 {
    let rows = u16::try_from(rows).unwrap_or(u16::MAX);
    rows.saturating_sub(height)
}

fn draw_result(frame: &mut Frame, area: Rect, view: &AppViewModel, colors: &Palette) {
    let title = match view.summary_model {
        Some(model) => format!(" Summary ({}) ", model.label()),
        None => " Summary ".to_string(),
    };
    let block = card(&title, false, colors);
    let body = match &view.summary {
        Some(summary) => Paragraph::new(summary.as_str()),
        None => Paragraph::new(Span::styled(
            SUMMARY_PLACEHOLDER,
            Style::default().fg(colors.muted),
        )),
    };
    frame.render_widget(body.block(block).wrap(Wrap { trim: true }), area);
}

fn draw_history(frame: &mut Frame, area: Rect, view: &AppViewModel, colors: &Palette) {
    let title = if view.can_clear_all {
        format!(" History ({}) ", view.history.len())
    } else {
        " History ".to_string()
    };
    let focused = view.focus == Focus::History;
    let block = card(&title, focused, colors);

    if view.history.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No summaries yet.",
            Style::default().fg(colors.muted),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = view
        .history
        .iter()
        .map(|row| {
            ListItem::new(Text::from(vec![
                Line::from(vec![
                    Span::styled("Model: ", Style::default().fg(colors.muted)),
                    Span::styled(
                        row.model_label.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    row.text_preview.replace('\n', " "),
                    Style::default().fg(colors.muted),
                )),
                Line::from(row.summary.replace('\n', " ")),
                Line::from(""),
            ]))
        })
        .collect();

    let mut highlight = Style::default().bg(colors.highlight);
    if focused {
        highlight = highlight.add_modifier(Modifier::BOLD);
    }
    let list = List::new(items).block(block).highlight_style(highlight);
    let mut state = ListState::default().with_selected(view.selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &AppViewModel, colors: &Palette) {
    let status = match &view.status_line {
        Some(line) => Line::from(Span::styled(line.clone(), Style::default().fg(colors.ok))),
        None => Line::from(""),
    };
    let help = match view.focus {
        Focus::Editor => HELP.to_string(),
        Focus::History => format!("{HISTORY_HELP} | {HELP}"),
    };
    let lines = vec![
        status,
        Line::from(Span::styled(help, Style::default().fg(colors.muted))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_path_prompt(frame: &mut Frame, prompt: &str, colors: &Palette) {
    let area = centered_rect(64, 6, frame.area());
    frame.render_widget(Clear, area);

    let accepted = SUPPORTED_UPLOAD_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(", ");
    let block = Block::default()
        .title(" Attach document ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.focus_border));
    let lines = vec![
        Line::from(Span::styled(
            format!("Path ({accepted}):"),
            Style::default().fg(colors.muted),
        )),
        Line::from(format!("{prompt}_")),
        Line::from(Span::styled(
            "[Enter] attach  [Esc] cancel",
            Style::default().fg(colors.muted),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(colors.background).fg(colors.text)),
        area,
    );
}

fn draw_dialog(frame: &mut Frame, dialog: &Dialog, colors: &Palette) {
    let (title, message, buttons, border) = match dialog {
        Dialog::Alert(message) => (" Notice ", message.as_str(), "[Enter] OK", colors.error),
        Dialog::ConfirmClearAll => (
            " Confirm ",
            "Delete all history?",
            "[y] Yes  [n] No",
            colors.focus_border,
        ),
    };

    let area = centered_rect(50, 7, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let lines = vec![
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            buttons,
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(colors.background).fg(colors.text)),
        area,
    );
}
