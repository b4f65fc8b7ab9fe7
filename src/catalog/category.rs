//! Category Table
//!
//! The four dataset categories and the fixed mapping between the labels shown
//! in the UI and the `contentType` labels stored on each record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    News,
    Magazine,
    Book,
    Education,
}

/// One row of the category table
#[derive(Debug, Clone, Copy)]
pub struct CategoryLabels {
    pub category: Category,
    pub ui_label: &'static str,
    pub stored_label: &'static str,
    pub slug: &'static str,
    pub icon: &'static str,
}

/// Single edit site for categories; order is the home screen order
static CATEGORY_TABLE: [CategoryLabels; 4] = [
    CategoryLabels {
        category: Category::News,
        ui_label: "新聞內容",
        stored_label: "新聞",
        slug: "news",
        icon: "📰",
    },
    CategoryLabels {
        category: Category::Magazine,
        ui_label: "期刊內容",
        stored_label: "雜誌",
        slug: "magazine",
        icon: "📖",
    },
    CategoryLabels {
        category: Category::Book,
        ui_label: "圖書內容",
        stored_label: "圖書",
        slug: "book",
        icon: "🗄",
    },
    CategoryLabels {
        category: Category::Education,
        ui_label: "教育內容",
        stored_label: "教育",
        slug: "education",
        icon: "🎓",
    },
];

impl Category {
    pub const ALL: [Category; 4] = [
        Category::News,
        Category::Magazine,
        Category::Book,
        Category::Education,
    ];

    // Table rows are in discriminant order
    fn labels(self) -> &'static CategoryLabels {
        &CATEGORY_TABLE[self as usize]
    }

    pub fn ui_label(self) -> &'static str {
        self.labels().ui_label
    }

    pub fn stored_label(self) -> &'static str {
        self.labels().stored_label
    }

    pub fn slug(self) -> &'static str {
        self.labels().slug
    }

    pub fn icon(self) -> &'static str {
        self.labels().icon
    }

    pub fn from_ui_label(label: &str) -> Option<Self> {
        CATEGORY_TABLE
            .iter()
            .find(|row| row.ui_label == label)
            .map(|row| row.category)
    }

    pub fn from_stored_label(label: &str) -> Option<Self> {
        CATEGORY_TABLE
            .iter()
            .find(|row| row.stored_label == label)
            .map(|row| row.category)
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        CATEGORY_TABLE
            .iter()
            .find(|row| row.slug.eq_ignore_ascii_case(slug))
            .map(|row| row.category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ui_label())
    }
}

/// Accepts a UI label, a stored label or an English slug
impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::from_ui_label(s)
            .or_else(|| Self::from_stored_label(s))
            .or_else(|| Self::from_slug(s))
            .ok_or_else(|| {
                let known: Vec<&str> = CATEGORY_TABLE.iter().map(|row| row.slug).collect();
                format!("unknown category '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_to_stored_mapping() {
        assert_eq!(Category::from_ui_label("新聞內容").map(Category::stored_label), Some("新聞"));
        assert_eq!(Category::from_ui_label("期刊內容").map(Category::stored_label), Some("雜誌"));
        assert_eq!(Category::from_ui_label("圖書內容").map(Category::stored_label), Some("圖書"));
        assert_eq!(Category::from_ui_label("教育內容").map(Category::stored_label), Some("教育"));
        assert_eq!(Category::from_ui_label("影音內容"), None);
    }

    #[test]
    fn test_mapping_is_a_bijection() {
        for category in Category::ALL {
            assert_eq!(Category::from_ui_label(category.ui_label()), Some(category));
            assert_eq!(Category::from_stored_label(category.stored_label()), Some(category));
        }
    }

    #[test]
    fn test_stored_label_is_not_a_ui_label() {
        assert_eq!(Category::from_ui_label("新聞"), None);
    }

    #[test]
    fn test_from_str_accepts_all_spellings() {
        assert_eq!("教育內容".parse::<Category>(), Ok(Category::Education));
        assert_eq!("雜誌".parse::<Category>(), Ok(Category::Magazine));
        assert_eq!("Book".parse::<Category>(), Ok(Category::Book));
        assert!("music".parse::<Category>().is_err());
    }
}
