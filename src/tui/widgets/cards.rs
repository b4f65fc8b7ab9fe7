//! Category and dataset cards shared by the home and listing screens.

use crate::catalog::display;
use crate::catalog::CategorySummary;
use crate::models::DatasetRecord;
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows needed by a dataset card, borders included
pub const DATASET_CARD_HEIGHT: u16 = 8;

/// Which statistic a dataset card shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    /// Home screen ranking: article count
    Popular,
    /// Category listing: article, book or word count
    Listing,
}

fn card_block(title: String, selected: bool) -> Block<'static> {
    let (title_style, border_style) = if selected {
        (Theme::selected(), Theme::border_focused())
    } else {
        (Theme::heading(), Theme::border())
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

pub fn render_category_card(
    frame: &mut Frame,
    area: Rect,
    summary: &CategorySummary,
    selected: bool,
) {
    let prefix = if selected { Icons::SELECTED } else { " " };
    let block = card_block(format!(" {} {} ", prefix, summary.category.icon()), selected);

    let lines = vec![
        Line::from(Span::styled(summary.title, Theme::heading())),
        Line::from(Span::styled(
            format!("{} 個資料集", summary.count),
            Theme::text_secondary(),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_dataset_card(
    frame: &mut Frame,
    area: Rect,
    record: &DatasetRecord,
    kind: CardKind,
    selected: bool,
) {
    let block = card_block(format!(" {} ", record.name), selected);

    let stat = match kind {
        CardKind::Popular => display::popular_quantity_line(record),
        CardKind::Listing => display::card_stat_line(record),
    };

    let action_style = if selected {
        Theme::button_primary()
    } else {
        Theme::shortcut_key()
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("提供者：{}", record.provider),
            Theme::text_secondary(),
        )),
        Line::from(Span::styled(stat, Theme::text_secondary())),
        Line::from(Span::styled(
            format!("授權類型：{}", display::license_type(record)),
            Theme::text_secondary(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(record.content_type.clone(), Theme::tag()),
            Span::raw("   "),
            Span::styled(format!(" 查看詳情 {} ", Icons::CHEVRON), action_style),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
