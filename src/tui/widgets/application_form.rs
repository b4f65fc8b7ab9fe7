//! Application Form Widget
//!
//! Modal dialog for requesting access to a dataset.

use crate::application::{self, FormField};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::tui::ui::centered_rect;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const LABEL_WIDTH: u16 = 10;

/// Render the application modal
pub fn render_application_form(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", application::DIALOG_TITLE))
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Description
            Constraint::Length(3), // Name
            Constraint::Length(3), // Organization
            Constraint::Length(3), // Email
            Constraint::Min(4),    // Purpose
            Constraint::Length(1), // Error
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    let description = Paragraph::new(Span::styled(
        application::DIALOG_DESCRIPTION,
        Theme::text_secondary(),
    ))
    .wrap(Wrap { trim: true });
    frame.render_widget(description, chunks[0]);

    for (field, area) in FormField::ALL.into_iter().zip(chunks[1..5].iter()) {
        render_field(frame, *area, app, field);
    }

    if let Some(error) = &app.form.error {
        let line = Line::from(Span::styled(error.as_str(), Theme::error()));
        frame.render_widget(Paragraph::new(line), chunks[5]);
    }

    render_footer(frame, chunks[6]);
}

fn render_field(frame: &mut Frame, area: Rect, app: &App, field: FormField) {
    let focused = app.form.focused == field;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(10)])
        .split(area);

    let label_style = if focused {
        Theme::shortcut_key()
    } else {
        Theme::text()
    };
    // Vertically align the label with the input line inside the border
    let label = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(field.label(), label_style)),
    ]);
    frame.render_widget(label, columns[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });
    let input_area = block.inner(columns[1]);
    frame.render_widget(block, columns[1]);
    frame.render_widget(app.form.input(field), input_area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("[Enter]", Theme::shortcut_key()),
        Span::styled(format!(" {} ", application::SUBMIT_LABEL), Theme::shortcut_desc()),
        Span::styled("[Tab]", Theme::shortcut_key()),
        Span::styled(" 下一欄 ", Theme::shortcut_desc()),
        Span::styled("[Esc]", Theme::shortcut_key()),
        Span::styled(" 取消", Theme::shortcut_desc()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
