//! UI Rendering
//!
//! Main UI layout and rendering logic for the TUI.

use crate::catalog::{display, Category};
use crate::navigation::Screen;
use crate::tui::app::{App, Overlay, LISTING_COLUMNS};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets::{self, CardKind, DATASET_CARD_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const CATEGORY_CARD_HEIGHT: u16 = 4;

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    if app.is_loading() {
        render_loading(frame, chunks[1]);
    } else {
        match &app.screen {
            Screen::Home => render_home(frame, chunks[1], app),
            Screen::CategoryList(category) => render_listing(frame, chunks[1], app, *category),
            Screen::DatasetDetail(_) => render_detail(frame, chunks[1], app),
        }
    }

    render_status_bar(frame, chunks[2], app);

    // Render modal overlays
    match app.overlay {
        Overlay::Help => render_help(frame),
        Overlay::Application => widgets::render_application_form(frame, app),
        Overlay::Acknowledgment => {
            if let Some(ack) = &app.acknowledgment {
                widgets::render_acknowledgment(frame, ack);
            }
        }
        Overlay::None => {}
    }
}

/// Render the header with navigation and login state
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(28)])
        .split(inner);

    let title = match app.screen {
        Screen::Home => Line::from(vec![
            Span::raw(format!("{} ", Icons::DATABASE)),
            Span::styled(app.screen.title(), Theme::title()),
        ]),
        _ => Line::from(vec![
            Span::styled(format!("{} 返回", Icons::ARROW_LEFT), Theme::shortcut_desc()),
            Span::raw("  "),
            Span::styled(app.screen.title(), Theme::title()),
        ]),
    };
    frame.render_widget(Paragraph::new(title), columns[0]);

    // Login controls only exist on the home screen
    if app.screen == Screen::Home {
        let session = if app.session.logged_in {
            Line::from(vec![
                Span::raw(format!("{} ", Icons::USER)),
                Span::styled(app.session.username.as_str(), Theme::text()),
                Span::raw("  "),
                Span::styled("[l]", Theme::shortcut_key()),
                Span::styled(" 登出", Theme::shortcut_desc()),
            ])
        } else {
            Line::from(vec![
                Span::styled("[l]", Theme::shortcut_key()),
                Span::styled(" 登入  註冊", Theme::shortcut_desc()),
            ])
        };
        frame.render_widget(Paragraph::new(session).alignment(Alignment::Right), columns[1]);
    }
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let middle = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let paragraph = Paragraph::new(Span::styled("載入中...", Theme::text_secondary()))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, middle[1]);
}

fn render_home(frame: &mut Frame, area: Rect, app: &App) {
    let popular = app.popular();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),                    // Hero
            Constraint::Length(1),                    // Categories heading
            Constraint::Length(CATEGORY_CARD_HEIGHT), // Category cards
            Constraint::Length(1),                    // Spacing
            Constraint::Length(1),                    // Popular heading
            Constraint::Length(DATASET_CARD_HEIGHT),  // Popular cards
            Constraint::Min(0),                       // Spacing
            Constraint::Length(1),                    // Footer
        ])
        .split(area);

    let hero = Paragraph::new(vec![
        Line::from(Span::styled("高品質中文訓練資料的最佳來源", Theme::heading())),
        Line::from(Span::styled(
            "整合台灣各類型內容提供者的數位內容，為AI訓練專案提供完整解決方案",
            Theme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(hero, chunks[0]);

    frame.render_widget(
        Paragraph::new(Span::styled("資料集分類", Theme::heading())),
        chunks[1],
    );

    let summaries = app
        .catalog
        .as_ref()
        .map(|catalog| catalog.category_summaries())
        .unwrap_or_default();
    let category_areas = equal_columns(chunks[2], summaries.len());
    for (i, (summary, card_area)) in summaries.iter().zip(category_areas.iter()).enumerate() {
        widgets::render_category_card(frame, *card_area, summary, app.selected == i);
    }

    frame.render_widget(
        Paragraph::new(Span::styled("熱門資料集", Theme::heading())),
        chunks[4],
    );

    let offset = Category::ALL.len();
    let popular_areas = equal_columns(chunks[5], popular.len());
    for (i, (record, card_area)) in popular.iter().zip(popular_areas.iter()).enumerate() {
        widgets::render_dataset_card(
            frame,
            *card_area,
            record,
            CardKind::Popular,
            app.selected == offset + i,
        );
    }

    let footer = Paragraph::new(Span::styled(
        "© 2024 台灣中文語料資料市集. All rights reserved.",
        Theme::text_dim(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[7]);
}

fn render_listing(frame: &mut Frame, area: Rect, app: &App, category: Category) {
    let records = app.listing(category);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let heading = Paragraph::new(Span::styled(
        format!("{} ({})", category.ui_label(), records.len()),
        Theme::heading(),
    ));
    frame.render_widget(heading, chunks[0]);

    if records.is_empty() {
        let empty = Paragraph::new(Span::styled("此分類目前沒有資料集", Theme::text_secondary()))
            .alignment(Alignment::Center);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let grid = chunks[1];
    let total_rows = records.len().div_ceil(LISTING_COLUMNS);
    let visible_rows = ((grid.height / DATASET_CARD_HEIGHT) as usize).max(1);
    let selected_row = app.selected / LISTING_COLUMNS;
    let first_row = (selected_row + 1).saturating_sub(visible_rows);

    for (slot, row) in (first_row..total_rows.min(first_row + visible_rows)).enumerate() {
        let y = grid.y + slot as u16 * DATASET_CARD_HEIGHT;
        let height = DATASET_CARD_HEIGHT.min(grid.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let row_area = Rect::new(grid.x, y, grid.width, height);

        let start = row * LISTING_COLUMNS;
        let end = (start + LISTING_COLUMNS).min(records.len());
        let columns = equal_columns(row_area, LISTING_COLUMNS);
        for (index, card_area) in (start..end).zip(columns.iter()) {
            widgets::render_dataset_card(
                frame,
                *card_area,
                records[index],
                CardKind::Listing,
                app.selected == index,
            );
        }
    }
}

fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(record) = app.current_dataset() else {
        let missing = Paragraph::new(Span::styled("找不到此資料集", Theme::error()))
            .alignment(Alignment::Center);
        frame.render_widget(missing, area);
        return;
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", record.name), Theme::title()))
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(inner);

    let mut lines = Vec::new();
    push_section(&mut lines, "基本資訊", display::basic_info_lines(record));
    push_section(&mut lines, "資料統計", display::detail_stat_lines(record));
    push_section(&mut lines, "授權資訊", display::licensing_lines(record));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);

    let button = Paragraph::new(Line::from(vec![
        Span::styled("[Enter] ", Theme::shortcut_key()),
        Span::styled(" 申請使用此資料集 ", Theme::button_primary()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(button, chunks[1]);
}

fn push_section(lines: &mut Vec<Line<'static>>, heading: &'static str, body: Vec<String>) {
    lines.push(Line::from(Span::styled(heading, Theme::heading())));
    for text in body {
        lines.push(Line::from(Span::styled(text, Theme::text())));
    }
    lines.push(Line::from(""));
}

/// Split an area into `count` equally wide columns
fn equal_columns(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let constraints = vec![Constraint::Ratio(1, count as u32); count];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let shortcuts: &[(&str, &str)] = match (&app.overlay, &app.screen) {
        (Overlay::Application, _) => &[("[Enter]", "送出"), ("[Tab]", "下一欄"), ("[Esc]", "取消")],
        (Overlay::Acknowledgment, _) | (Overlay::Help, _) => &[("[Enter]", "確定")],
        (Overlay::None, Screen::Home) => &[
            ("[←→]", "選擇"),
            ("[Enter]", "開啟"),
            ("[l]", "登入/登出"),
            ("[q]", "離開"),
            ("[?]", "說明"),
        ],
        (Overlay::None, Screen::CategoryList(_)) => &[
            ("[←→]", "選擇"),
            ("[Enter]", "查看詳情"),
            ("[Esc]", "返回"),
            ("[q]", "離開"),
        ],
        (Overlay::None, Screen::DatasetDetail(_)) => &[
            ("[Enter/a]", "申請使用"),
            ("[Esc]", "返回"),
            ("[q]", "離開"),
        ],
    };

    let mut spans = Vec::new();
    if let Some(status) = &app.status {
        spans.push(Span::styled(status.as_str(), Theme::error()));
        spans.push(Span::raw(" │ "));
    }
    for (key, desc) in shortcuts {
        spans.push(Span::styled(format!(" {}", key), Theme::shortcut_key()));
        spans.push(Span::styled(format!(" {} ", desc), Theme::shortcut_desc()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the help modal
fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let entries = [
        ("←/→ ↑/↓      ", "Move selection"),
        ("Enter        ", "Open selection / Apply / Confirm"),
        ("Esc, ⌫       ", "Back to home / Close dialog"),
        ("Tab          ", "Next form field"),
        ("a            ", "Apply for the current dataset"),
        ("l            ", "Log in / Log out (home screen)"),
        ("q, Ctrl+Q    ", "Quit application"),
        ("Ctrl+C       ", "Force quit"),
        ("F1 / ?       ", "Show this help"),
    ];

    let mut help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
    ];
    help_lines.extend(entries.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(*key, Theme::shortcut_key()),
            Span::styled(*desc, Theme::text()),
        ])
    }));
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Theme::text_dim(),
    )));

    let paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Config;
    use crate::models::{DataStats, DatasetId, DatasetRecord};
    use crate::tui::event::AppAction;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app_with(records: Vec<DatasetRecord>) -> App {
        let config = Config::from_lookup(|_| None).unwrap();
        let mut app = App::new(config);
        app.catalog = Some(Catalog::new(records));
        app
    }

    fn record(id: u64, name: &str, content_type: &str, articles: Option<u64>) -> DatasetRecord {
        DatasetRecord {
            id: DatasetId::Number(id),
            name: name.to_string(),
            provider: "provider".to_string(),
            content_type: content_type.to_string(),
            last_update: "2024-01-01".to_string(),
            data_stats: Some(DataStats {
                article_count: articles,
                ..Default::default()
            }),
            licensing: Default::default(),
        }
    }

    fn screen_text(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_loading_screen() {
        let config = Config::from_lookup(|_| None).unwrap();
        let app = App::new(config);
        assert!(screen_text(&app).contains("載"));
    }

    #[test]
    fn test_home_renders_without_panicking() {
        let app = app_with(vec![
            record(1, "Alpha", "新聞", Some(10)),
            record(2, "Beta", "雜誌", None),
        ]);
        let text = screen_text(&app);
        assert!(text.contains("Alpha"));
        assert!(text.contains("Beta"));
    }

    #[test]
    fn test_empty_listing() {
        let mut app = app_with(vec![record(1, "Alpha", "新聞", Some(10))]);
        app.handle_action(AppAction::MoveRight);
        app.handle_action(AppAction::MoveRight);
        app.handle_action(AppAction::MoveRight);
        app.handle_action(AppAction::Submit);
        assert_eq!(app.screen, Screen::CategoryList(Category::Education));

        // renders the empty state instead of cards
        assert!(!screen_text(&app).contains("Alpha"));
    }

    #[test]
    fn test_listing_scrolls_to_selection() {
        let records: Vec<DatasetRecord> = (0..30)
            .map(|i| record(i, &format!("Set{:02}", i), "圖書", Some(i)))
            .collect();
        let mut app = app_with(records);
        app.handle_action(AppAction::MoveRight);
        app.handle_action(AppAction::MoveRight);
        app.handle_action(AppAction::Submit);
        assert_eq!(app.screen, Screen::CategoryList(Category::Book));

        for _ in 0..29 {
            app.handle_action(AppAction::MoveRight);
        }
        let text = screen_text(&app);
        assert!(text.contains("Set29"));
        assert!(!text.contains("Set00"));
    }

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert!(popup.x >= area.x && popup.right() <= area.right());
    }
}
