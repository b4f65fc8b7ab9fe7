//! Confirmation shown after an application is submitted.

use crate::application::{self, Acknowledgment};
use crate::tui::theme::{Icons, Theme};
use crate::tui::ui::centered_rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_acknowledgment(frame: &mut Frame, ack: &Acknowledgment) {
    let area = centered_rect(50, 40, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            format!("{} {}", Icons::COMPLETE, ack.title()),
            Theme::success(),
        )),
        Line::from(""),
        Line::from(Span::styled(ack.message(), Theme::text())),
        Line::from(""),
        Line::from(Span::styled(
            format!("資料集：{}", ack.dataset_name),
            Theme::text_secondary(),
        )),
        Line::from(Span::styled(
            format!("申請編號：{}", ack.reference),
            Theme::text_dim(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {} ", application::ACK_CONFIRM),
            Theme::button_primary(),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {} ", ack.title()))
                .borders(Borders::ALL)
                .border_style(Theme::border_focused()),
        );

    frame.render_widget(paragraph, area);
}
