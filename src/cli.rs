//! Command line interface
//!
//! `browse` opens the TUI; the other subcommands answer one catalog query
//! and print it as text or JSON.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::catalog::{display, Catalog, Category, RankingField};
use crate::models::DatasetRecord;
use crate::types::AppError;

#[derive(Parser, Debug)]
#[clap(name = "corpus-market", version, about = "台灣中文語料資料市集")]
pub struct Cli {
    /// Dataset collection JSON file (defaults to the bundled sample data)
    #[clap(long, global = true)]
    pub data: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// `browse` when no subcommand is given
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Browse)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Open the interactive browser
    Browse,

    /// Dataset counts per category
    Categories {
        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Most popular datasets
    Popular {
        /// Number of datasets to show
        #[clap(long, short = 'n')]
        limit: Option<usize>,

        /// Statistic to rank by
        #[clap(long, value_enum, default_value = "article")]
        by: RankBy,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Datasets in one category
    List {
        /// Category label (新聞內容), stored label (新聞) or slug (news)
        category: Category,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Details of one dataset
    Show {
        /// Dataset id
        id: String,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    Article,
    Word,
    Book,
}

impl From<RankBy> for RankingField {
    fn from(by: RankBy) -> Self {
        match by {
            RankBy::Article => RankingField::ArticleCount,
            RankBy::Word => RankingField::WordCount,
            RankBy::Book => RankingField::BookCount,
        }
    }
}

/// Render the output of a query command
pub fn execute(command: &Command, catalog: &Catalog, default_limit: usize) -> Result<String> {
    match command {
        Command::Browse => anyhow::bail!("browse is interactive and has no text output"),
        Command::Categories { json } => categories(catalog, *json),
        Command::Popular { limit, by, json } => {
            popular(catalog, limit.unwrap_or(default_limit), (*by).into(), *json)
        }
        Command::List { category, json } => list(catalog, *category, *json),
        Command::Show { id, json } => show(catalog, id, *json),
    }
}

fn categories(catalog: &Catalog, json: bool) -> Result<String> {
    let summaries = catalog.category_summaries();
    if json {
        return Ok(serde_json::to_string_pretty(&summaries)?);
    }

    let mut out = String::new();
    for summary in &summaries {
        writeln!(
            out,
            "{} {}  {} 個資料集",
            summary.category.icon(),
            summary.title,
            summary.count
        )?;
    }
    Ok(out)
}

fn popular(catalog: &Catalog, limit: usize, field: RankingField, json: bool) -> Result<String> {
    let top = catalog.top_by_popularity(field, limit);
    if json {
        return Ok(serde_json::to_string_pretty(&top)?);
    }

    let mut out = String::new();
    for (rank, record) in top.iter().enumerate() {
        writeln!(out, "{}. {} ({})", rank + 1, record.name, record.provider)?;
        writeln!(out, "   {}", ranking_line(record, field))?;
    }
    Ok(out)
}

fn ranking_line(record: &DatasetRecord, field: RankingField) -> String {
    let (label, unit) = match field {
        RankingField::ArticleCount => return display::popular_quantity_line(record),
        RankingField::WordCount => ("字數", ""),
        RankingField::BookCount => ("書籍數", " 本"),
    };
    match field.value(record) {
        Some(n) => format!("{}：{}{}", label, display::format_number(n), unit),
        None => format!("{}：{}", label, display::NOT_PROVIDED),
    }
}

fn list(catalog: &Catalog, category: Category, json: bool) -> Result<String> {
    let records = catalog.filter_by(category);
    if json {
        return Ok(serde_json::to_string_pretty(&records)?);
    }

    let mut out = String::new();
    writeln!(out, "{} ({})", category.ui_label(), records.len())?;
    if records.is_empty() {
        writeln!(out, "此分類目前沒有資料集")?;
    }
    for record in records {
        writeln!(out)?;
        writeln!(out, "[{}] {}", record.id, record.name)?;
        writeln!(out, "    提供者：{}", record.provider)?;
        writeln!(out, "    {}", display::card_stat_line(record))?;
        writeln!(out, "    授權類型：{}", display::license_type(record))?;
    }
    Ok(out)
}

fn show(catalog: &Catalog, id: &str, json: bool) -> Result<String> {
    let record = catalog
        .find_by_key(id)
        .ok_or_else(|| AppError::NotFound(format!("dataset '{}'", id)))?;
    if json {
        return Ok(serde_json::to_string_pretty(record)?);
    }

    let mut out = String::new();
    writeln!(out, "{}", record.name)?;
    for (heading, lines) in [
        ("基本資訊", display::basic_info_lines(record)),
        ("資料統計", display::detail_stat_lines(record)),
        ("授權資訊", display::licensing_lines(record)),
    ] {
        writeln!(out)?;
        writeln!(out, "{}", heading)?;
        for line in lines {
            writeln!(out, "  {}", line)?;
        }
    }
    Ok(out)
}
