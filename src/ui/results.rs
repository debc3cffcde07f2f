use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use crate::app::App;

/// Message tier for the headline, by rounded percentage.
fn verdict(percentage: u32) -> (&'static str, Color) {
    if percentage >= 90 {
        ("Outstanding!", Color::Yellow)
    } else if percentage >= 70 {
        ("Great Job!", Color::Green)
    } else if percentage < 50 {
        ("Keep Practicing!", Color::Gray)
    } else {
        ("Good effort!", Color::Blue)
    }
}

pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(5)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(3), // headline
            Constraint::Length(1), // tallies
            Constraint::Min(3),    // summary table
            Constraint::Length(1), // legend
        ])
        .split(area);

    let session = &app.session;
    let (message, color) = verdict(session.percentage());

    let name = if app.player_name.is_empty() {
        String::new()
    } else {
        format!(" {}", app.player_name)
    };
    let headline = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{}{}", message, name),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} pts", session.points()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    headline.render(chunks[0], buf);

    let tallies = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} correct", session.correct_count()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} incorrect", session.wrong_count()),
            Style::default().fg(Color::Red),
        ),
        Span::raw("   "),
        Span::raw(format!("{}%", session.percentage())),
    ]))
    .alignment(Alignment::Center);
    tallies.render(chunks[1], buf);

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Your Answer"),
        Cell::from("Correct Answer"),
        Cell::from(""),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = session
        .results()
        .iter()
        .map(|result| {
            let (mark, mark_style) = if result.is_correct {
                ("✓", Style::default().fg(Color::Green))
            } else {
                ("✗", Style::default().fg(Color::Red))
            };
            let user_answer = if result.user_answer.is_empty() {
                Span::styled("(no answer)", Style::default().add_modifier(Modifier::DIM))
            } else {
                Span::raw(result.user_answer.clone())
            };
            Row::new(vec![
                Cell::from(result.question_id.to_string()),
                Cell::from(user_answer),
                Cell::from(result.correct_answer.clone()),
                Cell::from(Span::styled(mark, mark_style)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        &[
            Constraint::Length(4),
            Constraint::Percentage(45),
            Constraint::Percentage(45),
            Constraint::Length(2),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Question Summary "),
    );
    table.render(chunks[2], buf);

    let legend_text = if session.wrong_count() > 0 {
        "(r)estart full exam / retry (w)rong answers / (esc)ape"
    } else {
        "(r)estart full exam / (esc)ape"
    };
    let legend = Paragraph::new(Span::styled(
        legend_text,
        Style::default().add_modifier(Modifier::ITALIC),
    ));
    legend.render(chunks[3], buf);
}
