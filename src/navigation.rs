//! Screen state machine and session flag.

use crate::catalog::Category;
use crate::models::DatasetId;

/// Which screen is displayed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    CategoryList(Category),
    DatasetDetail(DatasetId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    SelectCategory(Category),
    ViewDetails(DatasetId),
    /// Always returns to the home screen, clearing any selection
    Back,
}

impl Screen {
    pub fn apply(&self, transition: Transition) -> Screen {
        match transition {
            Transition::SelectCategory(category) => Screen::CategoryList(category),
            Transition::ViewDetails(id) => Screen::DatasetDetail(id),
            Transition::Back => Screen::Home,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "台灣中文語料資料市集",
            Screen::CategoryList(category) => category.ui_label(),
            Screen::DatasetDetail(_) => "資料集詳情",
        }
    }
}

/// Login state; there is no real authentication
#[derive(Debug, Clone)]
pub struct Session {
    pub logged_in: bool,
    pub username: String,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            logged_in: false,
            username: username.into(),
        }
    }

    /// Both "登入" and "註冊" end up here
    pub fn login(&mut self) {
        self.logged_in = true;
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
    }

    pub fn toggle(&mut self) {
        self.logged_in = !self.logged_in;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let home = Screen::Home;
        let list = home.apply(Transition::SelectCategory(Category::Book));
        assert_eq!(list, Screen::CategoryList(Category::Book));

        let detail = list.apply(Transition::ViewDetails(DatasetId::Number(5)));
        assert_eq!(detail, Screen::DatasetDetail(DatasetId::Number(5)));
    }

    #[test]
    fn test_back_always_returns_home() {
        assert_eq!(Screen::Home.apply(Transition::Back), Screen::Home);
        assert_eq!(
            Screen::CategoryList(Category::News).apply(Transition::Back),
            Screen::Home
        );
        assert_eq!(
            Screen::DatasetDetail(DatasetId::Number(1)).apply(Transition::Back),
            Screen::Home
        );
    }

    #[test]
    fn test_titles() {
        assert_eq!(Screen::Home.title(), "台灣中文語料資料市集");
        assert_eq!(Screen::CategoryList(Category::Magazine).title(), "期刊內容");
        assert_eq!(Screen::DatasetDetail(DatasetId::Number(1)).title(), "資料集詳情");
    }

    #[test]
    fn test_session_toggle() {
        let mut session = Session::new("布丁");
        assert!(!session.logged_in);
        session.login();
        assert!(session.logged_in);
        session.toggle();
        assert!(!session.logged_in);
        session.toggle();
        session.logout();
        assert!(!session.logged_in);
    }
}
