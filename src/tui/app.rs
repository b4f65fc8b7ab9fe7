//! Application State
//!
//! Contains the main application state and input handling for the TUI.

use crate::application::{self, Acknowledgment, ApplicationForm, FormField};
use crate::catalog::{self, Catalog, Category, RankingField};
use crate::config::Config;
use crate::models::DatasetRecord;
use crate::navigation::{Screen, Session, Transition};
use crate::tui::event::AppAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Modifier, Style};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tui_textarea::TextArea;

/// Cards per row on the category listing
pub const LISTING_COLUMNS: usize = 3;

/// Modal drawn on top of the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Help,
    Application,
    Acknowledgment,
}

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    CatalogLoaded(Catalog),
    LoadFailed(String),
}

/// Input state of the application dialog
pub struct FormState {
    pub inputs: Vec<TextArea<'static>>,
    pub focused: FormField,
    pub error: Option<String>,
}

impl FormState {
    pub fn new() -> Self {
        let mut state = Self {
            inputs: FormField::ALL.iter().map(|_| TextArea::default()).collect(),
            focused: FormField::Name,
            error: None,
        };
        state.refresh_cursor();
        state
    }

    pub fn input(&self, field: FormField) -> &TextArea<'static> {
        &self.inputs[field.index()]
    }

    pub fn focus(&mut self, field: FormField) {
        self.focused = field;
        self.refresh_cursor();
    }

    /// Only the focused field shows a cursor
    fn refresh_cursor(&mut self) {
        let focused = self.focused.index();
        for (i, input) in self.inputs.iter_mut().enumerate() {
            input.set_cursor_line_style(Style::default());
            if i == focused {
                input.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
            } else {
                input.set_cursor_style(Style::default());
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.inputs[self.focused.index()].input(key);
        self.error = None;
    }

    pub fn values(&self) -> ApplicationForm {
        let mut form = ApplicationForm::default();
        for field in FormField::ALL {
            form.set(field, self.inputs[field.index()].lines().join("\n"));
        }
        form
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Main application state
pub struct App {
    pub config: Config,

    // UI State
    pub session: Session,
    pub screen: Screen,
    pub overlay: Overlay,
    pub selected: usize,
    pub should_quit: bool,
    pub status: Option<String>,

    // Catalog, `None` while loading
    pub catalog: Option<Catalog>,

    // Application dialog
    pub form: FormState,
    pub acknowledgment: Option<Acknowledgment>,

    // Async communication
    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let session = Session::new(config.ui.username.clone());
        let (event_tx, event_rx) = mpsc::channel(16);

        Self {
            config,
            session,
            screen: Screen::Home,
            overlay: Overlay::None,
            selected: 0,
            should_quit: false,
            status: None,
            catalog: None,
            form: FormState::new(),
            acknowledgment: None,
            event_rx,
            event_tx,
        }
    }

    /// Load the dataset collection in the background
    pub fn start_loading(&self) {
        let source = catalog::source_from_config(&self.config);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let event = match catalog::load_catalog(source.as_ref()).await {
                Ok(catalog) => AppEvent::CatalogLoaded(catalog),
                Err(e) => AppEvent::LoadFailed(e.to_string()),
            };
            tx.send(event).await.ok();
        });
    }

    pub fn is_loading(&self) -> bool {
        self.catalog.is_none()
    }

    /// Poll for async events
    pub fn poll_events(&mut self) {
        let mut collected = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            collected.push(event);
        }

        for event in collected {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::CatalogLoaded(catalog) => {
                info!("Catalog ready with {} datasets", catalog.len());
                self.catalog = Some(catalog);
            }
            AppEvent::LoadFailed(reason) => {
                self.status = Some(format!("資料載入失敗：{}", reason));
                self.catalog = Some(Catalog::default());
            }
        }
    }

    // === Catalog views ===

    pub fn popular(&self) -> Vec<&DatasetRecord> {
        match &self.catalog {
            Some(catalog) => {
                catalog.top_by_popularity(RankingField::ArticleCount, self.config.ui.popular_limit)
            }
            None => Vec::new(),
        }
    }

    pub fn listing(&self, category: Category) -> Vec<&DatasetRecord> {
        match &self.catalog {
            Some(catalog) => catalog.filter_by(category),
            None => Vec::new(),
        }
    }

    pub fn current_dataset(&self) -> Option<&DatasetRecord> {
        match (&self.screen, &self.catalog) {
            (Screen::DatasetDetail(id), Some(catalog)) => catalog.find_by_id(id),
            _ => None,
        }
    }

    /// Number of selectable items on the current screen
    fn selection_len(&self) -> usize {
        match &self.screen {
            Screen::Home => Category::ALL.len() + self.popular().len(),
            Screen::CategoryList(category) => self.listing(*category).len(),
            Screen::DatasetDetail(_) => 0,
        }
    }

    fn move_selection(&mut self, forward: bool, step: usize) {
        let len = self.selection_len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = if forward {
            (self.selected + step).min(len - 1)
        } else {
            self.selected.saturating_sub(step)
        };
    }

    /// Up and Down move a whole row on the listing grid
    fn row_step(&self) -> usize {
        match self.screen {
            Screen::CategoryList(_) => LISTING_COLUMNS,
            _ => 1,
        }
    }

    fn navigate(&mut self, transition: Transition) {
        debug!("Navigation: {:?}", transition);
        if matches!(transition, Transition::ViewDetails(_)) {
            self.form = FormState::new();
        }
        self.screen = self.screen.apply(transition);
        self.selected = 0;
        self.overlay = Overlay::None;
    }

    fn activate_selection(&mut self) {
        if matches!(self.screen, Screen::DatasetDetail(_)) {
            self.open_application();
            return;
        }

        let transition = match &self.screen {
            Screen::Home => {
                if let Some(&category) = Category::ALL.get(self.selected) {
                    Some(Transition::SelectCategory(category))
                } else {
                    self.popular()
                        .get(self.selected - Category::ALL.len())
                        .map(|record| Transition::ViewDetails(record.id.clone()))
                }
            }
            Screen::CategoryList(category) => self
                .listing(*category)
                .get(self.selected)
                .map(|record| Transition::ViewDetails(record.id.clone())),
            Screen::DatasetDetail(_) => None,
        };

        if let Some(transition) = transition {
            self.navigate(transition);
        }
    }

    fn go_back(&mut self) {
        if self.screen != Screen::Home {
            self.navigate(Transition::Back);
        }
    }

    // === Application dialog ===

    fn open_application(&mut self) {
        if self.current_dataset().is_some() {
            self.overlay = Overlay::Application;
        }
    }

    fn submit_application(&mut self) {
        let form = self.form.values();
        let result = match self.current_dataset() {
            Some(record) => application::submit(&form, record),
            None => return,
        };

        match result {
            Ok(ack) => {
                self.acknowledgment = Some(ack);
                self.form = FormState::new();
                self.overlay = Overlay::Acknowledgment;
            }
            Err(e) => {
                if let Some(&field) = form.invalid_fields().first() {
                    self.form.focus(field);
                }
                self.form.error = Some(match e {
                    crate::types::AppError::InvalidApplication(message) => message,
                    other => other.to_string(),
                });
            }
        }
    }

    // === Input ===

    /// Handle a user action
    pub fn handle_action(&mut self, action: AppAction) {
        match self.overlay {
            Overlay::Application => self.handle_form_action(action),
            Overlay::Help => match action {
                AppAction::Tick => {}
                AppAction::Quit | AppAction::ForceQuit => self.should_quit = true,
                _ => self.overlay = Overlay::None,
            },
            Overlay::Acknowledgment => match action {
                AppAction::Submit | AppAction::Escape => {
                    self.overlay = Overlay::None;
                }
                AppAction::Quit | AppAction::ForceQuit => self.should_quit = true,
                _ => {}
            },
            Overlay::None => self.handle_screen_action(action),
        }
    }

    fn handle_form_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit | AppAction::ForceQuit => self.should_quit = true,
            AppAction::Escape => self.overlay = Overlay::None,
            AppAction::Submit => self.submit_application(),
            AppAction::NextField | AppAction::MoveDown => self.form.focus(self.form.focused.next()),
            AppAction::PrevField | AppAction::MoveUp => self.form.focus(self.form.focused.prev()),
            AppAction::DeleteKey => {
                self.form
                    .handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
            }
            AppAction::MoveLeft => {
                self.form.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
            }
            AppAction::MoveRight => {
                self.form.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
            }
            AppAction::Input(key) => self.form.handle_key(key),
            AppAction::ToggleHelp | AppAction::Tick => {}
        }
    }

    fn handle_screen_action(&mut self, action: AppAction) {
        if self.is_loading() {
            if matches!(action, AppAction::Quit | AppAction::ForceQuit) {
                self.should_quit = true;
            }
            return;
        }

        match action {
            AppAction::Quit | AppAction::ForceQuit => self.should_quit = true,
            AppAction::Submit => self.activate_selection(),
            AppAction::ToggleHelp => self.overlay = Overlay::Help,
            AppAction::Escape | AppAction::DeleteKey => self.go_back(),
            AppAction::MoveUp => self.move_selection(false, self.row_step()),
            AppAction::MoveDown => self.move_selection(true, self.row_step()),
            AppAction::MoveLeft | AppAction::PrevField => self.move_selection(false, 1),
            AppAction::MoveRight | AppAction::NextField => self.move_selection(true, 1),
            AppAction::Input(key) => self.handle_shortcut(key),
            AppAction::Tick => {}
        }
    }

    fn handle_shortcut(&mut self, key: KeyEvent) {
        if key.modifiers != KeyModifiers::NONE && key.modifiers != KeyModifiers::SHIFT {
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.overlay = Overlay::Help,
            KeyCode::Char('l') if self.screen == Screen::Home => {
                self.session.toggle();
                info!("Logged in: {}", self.session.logged_in);
            }
            KeyCode::Char('a') => self.open_application(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataStats, DatasetId};

    fn record(id: u64, content_type: &str, articles: Option<u64>) -> DatasetRecord {
        DatasetRecord {
            id: DatasetId::Number(id),
            name: format!("資料集{}", id),
            provider: "提供者".to_string(),
            content_type: content_type.to_string(),
            last_update: "2024-01-01".to_string(),
            data_stats: Some(DataStats {
                article_count: articles,
                ..Default::default()
            }),
            licensing: Default::default(),
        }
    }

    fn loaded_app() -> App {
        let config = Config::from_lookup(|_| None).unwrap();
        let mut app = App::new(config);
        app.handle_event(AppEvent::CatalogLoaded(Catalog::new(vec![
            record(1, "新聞", Some(100)),
            record(2, "圖書", Some(900)),
            record(3, "新聞", Some(50)),
            record(4, "教育", None),
        ])));
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_action(AppAction::Input(KeyEvent::new(
                KeyCode::Char(ch),
                KeyModifiers::NONE,
            )));
        }
    }

    #[test]
    fn test_loading_ignores_navigation() {
        let config = Config::from_lookup(|_| None).unwrap();
        let mut app = App::new(config);
        assert!(app.is_loading());

        app.handle_action(AppAction::Submit);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_load_failure_shows_empty_catalog() {
        let config = Config::from_lookup(|_| None).unwrap();
        let mut app = App::new(config);
        app.handle_event(AppEvent::LoadFailed("missing file".to_string()));

        assert!(!app.is_loading());
        assert!(app.status.as_deref().unwrap().contains("missing file"));
        assert!(app.popular().is_empty());
    }

    #[test]
    fn test_select_category_from_home() {
        let mut app = loaded_app();
        app.handle_action(AppAction::Submit);
        assert_eq!(app.screen, Screen::CategoryList(Category::News));

        let names: Vec<&str> = app
            .listing(Category::News)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["資料集1", "資料集3"]);
    }

    #[test]
    fn test_popular_selection_opens_detail() {
        let mut app = loaded_app();
        // skip the four category cards
        for _ in 0..4 {
            app.handle_action(AppAction::MoveRight);
        }
        app.handle_action(AppAction::Submit);

        assert_eq!(app.screen, Screen::DatasetDetail(DatasetId::Number(2)));
        assert_eq!(app.current_dataset().map(|r| r.name.as_str()), Some("資料集2"));
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = loaded_app();
        for _ in 0..20 {
            app.handle_action(AppAction::MoveDown);
        }
        // 4 categories + 3 popular datasets
        assert_eq!(app.selected, 6);

        for _ in 0..20 {
            app.handle_action(AppAction::MoveUp);
        }
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_listing_rows_step_by_columns() {
        let config = Config::from_lookup(|_| None).unwrap();
        let mut app = App::new(config);
        let records = (1..=8).map(|id| record(id, "圖書", Some(id))).collect();
        app.handle_event(AppEvent::CatalogLoaded(Catalog::new(records)));

        app.handle_action(AppAction::MoveRight);
        app.handle_action(AppAction::MoveRight);
        app.handle_action(AppAction::Submit);
        assert_eq!(app.screen, Screen::CategoryList(Category::Book));

        app.handle_action(AppAction::MoveRight);
        assert_eq!(app.selected, 1);
        app.handle_action(AppAction::MoveDown);
        assert_eq!(app.selected, 1 + LISTING_COLUMNS);
        // the last row is partial, so Down clamps to the last card
        app.handle_action(AppAction::MoveDown);
        assert_eq!(app.selected, 7);
        app.handle_action(AppAction::MoveUp);
        assert_eq!(app.selected, 7 - LISTING_COLUMNS);
        app.handle_action(AppAction::MoveUp);
        app.handle_action(AppAction::MoveUp);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_back_returns_home() {
        let mut app = loaded_app();
        app.handle_action(AppAction::Submit);
        app.handle_action(AppAction::Submit);
        assert!(matches!(app.screen, Screen::DatasetDetail(_)));

        app.handle_action(AppAction::Escape);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_login_toggle_only_on_home() {
        let mut app = loaded_app();
        type_text(&mut app, "l");
        assert!(app.session.logged_in);

        app.handle_action(AppAction::Submit);
        type_text(&mut app, "l");
        assert!(app.session.logged_in);

        app.handle_action(AppAction::Escape);
        type_text(&mut app, "l");
        assert!(!app.session.logged_in);
    }

    #[test]
    fn test_application_flow() {
        let mut app = loaded_app();
        app.handle_action(AppAction::Submit);
        app.handle_action(AppAction::Submit);
        app.handle_action(AppAction::Submit);
        assert_eq!(app.overlay, Overlay::Application);

        // typing 'q' in the form is text, not quit
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        app.handle_action(AppAction::DeleteKey);

        app.handle_action(AppAction::Submit);
        assert_eq!(app.overlay, Overlay::Application);
        assert_eq!(app.form.error.as_deref(), Some("請填寫姓名"));

        type_text(&mut app, "Lin");
        app.handle_action(AppAction::NextField);
        type_text(&mut app, "Lab");
        app.handle_action(AppAction::NextField);
        type_text(&mut app, "lin@example.com");
        app.handle_action(AppAction::NextField);
        type_text(&mut app, "research");

        let values = app.form.values();
        assert_eq!(values.name, "Lin");
        assert_eq!(values.email, "lin@example.com");

        app.handle_action(AppAction::Submit);
        assert_eq!(app.overlay, Overlay::Acknowledgment);
        assert_eq!(
            app.acknowledgment.as_ref().map(|a| a.dataset_id.clone()),
            Some(DatasetId::Number(1))
        );
        assert!(app.form.values().name.is_empty());

        app.handle_action(AppAction::Submit);
        assert_eq!(app.overlay, Overlay::None);
        assert!(matches!(app.screen, Screen::DatasetDetail(_)));
    }

    #[test]
    fn test_invalid_email_focuses_field() {
        let mut app = loaded_app();
        app.handle_action(AppAction::Submit);
        app.handle_action(AppAction::Submit);
        // 'a' opens the dialog from the detail screen
        type_text(&mut app, "a");
        assert_eq!(app.overlay, Overlay::Application);

        type_text(&mut app, "x");
        for field in [FormField::Organization, FormField::Email, FormField::Purpose] {
            app.handle_action(AppAction::NextField);
            assert_eq!(app.form.focused, field);
            type_text(&mut app, "x");
        }
        app.handle_action(AppAction::Submit);

        assert_eq!(app.form.focused, FormField::Email);
        assert_eq!(app.form.error.as_deref(), Some("Email 格式不正確"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = loaded_app();
        type_text(&mut app, "?");
        assert_eq!(app.overlay, Overlay::Help);

        app.handle_action(AppAction::Tick);
        assert_eq!(app.overlay, Overlay::Help);

        app.handle_action(AppAction::MoveDown);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_quit_shortcut() {
        let mut app = loaded_app();
        type_text(&mut app, "q");
        assert!(app.should_quit);
    }
}
