use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::App;

/// One numbered cell per active question, coloured by its answer state, with
/// the current question highlighted. The learner reads this to decide where
/// to jump with pgup/pgdn.
pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    let mut spans = Vec::new();

    for (idx, question) in app.session.active_questions().iter().enumerate() {
        let mut style = match app.session.answer_for(question.id) {
            Some(result) if result.is_correct => Style::default().fg(Color::Green),
            Some(_) => Style::default().fg(Color::Red),
            None => Style::default().add_modifier(Modifier::DIM),
        };
        if idx == app.session.current_index() {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        spans.push(Span::styled(format!(" {} ", idx + 1), style));
        spans.push(Span::raw(" "));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Question Map "))
        .wrap(Wrap { trim: true });
    paragraph.render(area, buf);
}
