//! Display Fallbacks
//!
//! Every optional record field reaches the screen through one of these
//! functions, so a missing value always renders as a placeholder.

use crate::models::DatasetRecord;

pub const NOT_PROVIDED: &str = "未提供";
pub const NOT_SPECIFIED: &str = "未指定";
pub const USAGE_SEPARATOR: &str = "、";

/// Group digits by thousands, e.g. `1234567` -> `"1,234,567"`
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn non_zero(value: Option<u64>) -> Option<u64> {
    value.filter(|n| *n > 0)
}

/// Statistic line on category list cards.
///
/// Article count, then book count, then word count, then "未提供".
/// Zero article and book counts are treated as absent.
pub fn card_stat_line(record: &DatasetRecord) -> String {
    if let Some(articles) = non_zero(record.article_count()) {
        format!("文章數：{}", format_number(articles))
    } else if let Some(books) = non_zero(record.book_count()) {
        format!("書籍數：{}", format_number(books))
    } else {
        let words = record
            .word_count()
            .map(format_number)
            .unwrap_or_else(|| NOT_PROVIDED.to_string());
        format!("字數：{}", words)
    }
}

/// Quantity line on popular dataset cards
pub fn popular_quantity_line(record: &DatasetRecord) -> String {
    let articles = record
        .article_count()
        .map(format_number)
        .unwrap_or_else(|| NOT_PROVIDED.to_string());
    format!("數量：{} 篇", articles)
}

pub fn license_type(record: &DatasetRecord) -> &str {
    record
        .licensing
        .license_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(NOT_SPECIFIED)
}

pub fn allowed_usage(record: &DatasetRecord) -> String {
    record.licensing.allowed_usage.join(USAGE_SEPARATOR)
}

pub fn pricing_line(record: &DatasetRecord) -> Option<String> {
    record
        .licensing
        .pricing
        .as_ref()
        .and_then(|pricing| pricing.amount)
        .map(|amount| format!("價格：NT$ {}", format_number(amount)))
}

/// Statistic lines on the detail screen; absent statistics are omitted
pub fn detail_stat_lines(record: &DatasetRecord) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(articles) = non_zero(record.article_count()) {
        lines.push(format!("文章數量：{}", format_number(articles)));
    }
    if let Some(words) = non_zero(record.word_count()) {
        lines.push(format!("總字數：{}", format_number(words)));
    }
    if let Some(range) = record.time_range() {
        lines.push(format!("資料時間範圍：{} 至 {}", range.start, range.end));
    }
    lines
}

pub fn basic_info_lines(record: &DatasetRecord) -> Vec<String> {
    vec![
        format!("提供者：{}", record.provider),
        format!("內容類型：{}", record.content_type),
        format!("最後更新：{}", record.last_update),
    ]
}

pub fn licensing_lines(record: &DatasetRecord) -> Vec<String> {
    let mut lines = vec![
        format!("授權類型：{}", license_type(record)),
        format!("允許用途：{}", allowed_usage(record)),
    ];
    lines.extend(pricing_line(record));
    lines
}
