pub mod map;
pub mod results;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Screen};
use crate::question::{Question, QuestionType};
use crate::session::POINTS_PER_QUESTION;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            Screen::Start => render_start(self, area, buf),
            Screen::Playing => render_playing(self, area, buf),
            Screen::Finished => results::render(self, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn render_start(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "IOE English Master",
            bold().fg(Color::Yellow),
        )),
        Line::from(Span::styled("Grade 8 · Exam #05", dim())),
    ])
    .alignment(Alignment::Center);
    title.render(chunks[1], buf);

    let total = app.full_bank().len();
    let summary = Paragraph::new(Span::raw(format!(
        "{} questions · {} points each",
        total, POINTS_PER_QUESTION
    )))
    .alignment(Alignment::Center);
    summary.render(chunks[2], buf);

    let name = Paragraph::new(Line::from(vec![
        Span::styled("Enter your name: ", dim()),
        Span::styled(&app.name_input, bold()),
        Span::styled("█", dim()),
    ]))
    .alignment(Alignment::Center);
    name.render(chunks[3], buf);

    let legend = Paragraph::new(Span::styled(
        "(enter) start / (esc) quit",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    legend.render(chunks[4], buf);
}

fn render_playing(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // progress gauge
            Constraint::Min(5),    // question card
            Constraint::Length(3), // question map
            Constraint::Length(1), // legend
        ])
        .split(area);

    render_progress(app, chunks[0], buf);

    match app.session.current_question() {
        Some(question) => render_card(app, question, chunks[1], buf),
        None => {
            let empty = Paragraph::new("The question bank is empty. Press ctrl+f to finish.")
                .style(dim())
                .alignment(Alignment::Center);
            empty.render(chunks[1], buf);
        }
    }

    map::render(app, chunks[2], buf);

    let legend_text = if app.show_feedback {
        "(enter) next / (pgup/pgdn) navigate / (ctrl+f) finish / (esc) quit"
    } else {
        match app.session.current_question().map(|q| q.kind) {
            Some(QuestionType::MultipleChoice) => {
                "(↑/↓) select / (enter) submit / (tab) hint / (pgup/pgdn) navigate / (ctrl+f) finish"
            }
            Some(QuestionType::Rearrange) => {
                "(←/→) highlight / (space) pick / (backspace) undo / (enter) submit / (tab) hint"
            }
            _ => "type your answer / (enter) submit / (tab) hint / (pgup/pgdn) navigate",
        }
    };
    let legend = Paragraph::new(Span::styled(
        legend_text,
        Style::default().add_modifier(Modifier::ITALIC),
    ));
    legend.render(chunks[3], buf);
}

fn render_progress(app: &App, area: Rect, buf: &mut Buffer) {
    let total = app.session.total();
    let position = if total == 0 {
        0
    } else {
        app.session.current_index() + 1
    };
    let ratio = if total == 0 {
        0.0
    } else {
        position as f64 / total as f64
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} · {} pts ", app.player_name_label(), app.session.points())),
        )
        .gauge_style(Style::default().fg(Color::Blue))
        .label(format!("{} / {}", position, total))
        .ratio(ratio);
    gauge.render(area, buf);
}

fn render_card(app: &App, question: &Question, area: Rect, buf: &mut Buffer) {
    let text_width = question.text.width().max(1);
    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let text_lines = (text_width as f64 / inner_width as f64).ceil() as u16;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Question {} · {} ", question.id, question.kind));
    let inner = block.inner(area);
    block.render(area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(text_lines + 1),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(inner);

    let prompt = Paragraph::new(question.text.as_str())
        .style(bold())
        .wrap(Wrap { trim: true });
    prompt.render(chunks[0], buf);

    match question.kind {
        QuestionType::MultipleChoice => render_choices(app, question, chunks[1], buf),
        QuestionType::FillInBlank => render_fill_input(app, question, chunks[1], buf),
        QuestionType::Rearrange => render_rearrange(app, question, chunks[1], buf),
    }

    render_feedback(app, question, chunks[2], buf);
}

fn render_choices(app: &App, question: &Question, area: Rect, buf: &mut Buffer) {
    let markers = ["A", "B", "C", "D", "E", "F"];
    let answer = app
        .session
        .answer_for(question.id)
        .map(|a| a.user_answer.clone());

    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let marker = markers.get(idx).copied().unwrap_or("?");
            let style = if app.show_feedback {
                if *option == question.correct_answer {
                    bold().fg(Color::Green)
                } else if Some(option) == answer.as_ref() {
                    bold().fg(Color::Red)
                } else {
                    dim()
                }
            } else if idx == app.card.selected_option {
                bold().fg(Color::Blue).add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" ({}) {} ", marker, option), style))
        })
        .collect();

    Paragraph::new(lines).render(area, buf);
}

fn render_fill_input(app: &App, question: &Question, area: Rect, buf: &mut Buffer) {
    let line = if app.show_feedback {
        let result = app.session.answer_for(question.id);
        let (text, style) = match result {
            Some(r) if r.is_correct => (r.user_answer.clone(), bold().fg(Color::Green)),
            Some(r) => (r.user_answer.clone(), bold().fg(Color::Red)),
            None => (String::new(), dim()),
        };
        Line::from(vec![Span::styled("  > ", dim()), Span::styled(text, style)])
    } else {
        Line::from(vec![
            Span::styled("  > ", dim()),
            Span::styled(app.card.draft.clone(), bold()),
            Span::styled("█", dim()),
        ])
    };

    Paragraph::new(line).render(area, buf);
}

fn render_rearrange(app: &App, question: &Question, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let sentence = if app.show_feedback {
        app.session
            .answer_for(question.id)
            .map(|a| a.user_answer.clone())
            .unwrap_or_default()
    } else {
        app.card.chosen.join(" ")
    };
    let sentence_style = if app.show_feedback {
        match app.session.answer_for(question.id) {
            Some(r) if r.is_correct => bold().fg(Color::Green),
            _ => bold().fg(Color::Red),
        }
    } else {
        bold()
    };
    let built = Line::from(vec![
        Span::styled("  sentence: ", dim()),
        Span::styled(sentence, sentence_style),
    ]);
    Paragraph::new(built).render(chunks[0], buf);

    if !app.show_feedback {
        let mut spans = vec![Span::styled("  pieces:   ", dim())];
        for (idx, fragment) in app.card.available.iter().enumerate() {
            let style = if idx == app.card.fragment_cursor {
                bold().fg(Color::Blue).add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!("[{}]", fragment), style));
            spans.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(spans)).render(chunks[1], buf);
    }
}

fn render_feedback(app: &App, question: &Question, area: Rect, buf: &mut Buffer) {
    let mut lines = Vec::new();

    if app.show_feedback {
        match app.session.answer_for(question.id) {
            Some(r) if r.is_correct => lines.push(Line::from(Span::styled(
                "✓ Correct!",
                bold().fg(Color::Green),
            ))),
            Some(r) => lines.push(Line::from(Span::styled(
                format!("✗ Incorrect · answer: {}", r.correct_answer),
                bold().fg(Color::Red),
            ))),
            None => {}
        }
        if let Some(explanation) = &question.explanation {
            lines.push(Line::from(Span::styled(
                explanation.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
    } else if app.card.hint_visible {
        let hint = question
            .explanation
            .as_deref()
            .unwrap_or("No hint for this question.");
        lines.push(Line::from(Span::styled(
            format!("Hint: {}", hint),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

impl App {
    fn player_name_label(&self) -> &str {
        if self.player_name.is_empty() {
            "Player"
        } else {
            &self.player_name
        }
    }
}
