//! Dataset Application
//!
//! The "申請使用此資料集" form. Submitting a complete form only produces an
//! acknowledgment; nothing is stored or sent anywhere.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{DatasetId, DatasetRecord};
use crate::types::{AppError, AppResult};

pub const DIALOG_TITLE: &str = "申請使用資料集";
pub const DIALOG_DESCRIPTION: &str = "請填寫以下資訊，我們會在5個工作天內完成審核。";
pub const SUBMIT_LABEL: &str = "送出申請";
pub const ACK_TITLE: &str = "申請已送出";
pub const ACK_MESSAGE: &str = "感謝您的申請！我們會在5個工作天內完成審核，並以Email通知您審核結果。";
pub const ACK_CONFIRM: &str = "確定";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Organization,
    Email,
    Purpose,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Organization,
        FormField::Email,
        FormField::Purpose,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "姓名",
            FormField::Organization => "單位",
            FormField::Email => "Email",
            FormField::Purpose => "用途說明",
        }
    }

    /// Struct field name, as reported by the validator
    pub fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Organization => "organization",
            FormField::Email => "email",
            FormField::Purpose => "purpose",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Validate, Serialize)]
pub struct ApplicationForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub organization: String,
    #[validate(custom(function = "not_blank"), email)]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub purpose: String,
}

impl ApplicationForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Organization => &self.organization,
            FormField::Email => &self.email,
            FormField::Purpose => &self.purpose,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Organization => self.organization = value,
            FormField::Email => self.email = value,
            FormField::Purpose => self.purpose = value,
        }
    }

    /// Fields failing their checks, in form order
    pub fn invalid_fields(&self) -> Vec<FormField> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => {
                let field_errors = errors.field_errors();
                FormField::ALL
                    .into_iter()
                    .filter(|field| field_errors.contains_key(field.key()))
                    .collect()
            }
        }
    }

    /// Message for the first failing field
    pub fn check(&self) -> AppResult<()> {
        match self.invalid_fields().first() {
            None => Ok(()),
            Some(&field) => Err(AppError::InvalidApplication(problem_message(self, field))),
        }
    }
}

fn problem_message(form: &ApplicationForm, field: FormField) -> String {
    if form.get(field).trim().is_empty() {
        format!("請填寫{}", field.label())
    } else {
        format!("{} 格式不正確", field.label())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Acknowledgment {
    pub reference: Uuid,
    pub dataset_id: DatasetId,
    pub dataset_name: String,
    pub submitted_at: DateTime<Utc>,
}

impl Acknowledgment {
    pub fn title(&self) -> &'static str {
        ACK_TITLE
    }

    pub fn message(&self) -> &'static str {
        ACK_MESSAGE
    }
}

pub fn submit(form: &ApplicationForm, record: &DatasetRecord) -> AppResult<Acknowledgment> {
    form.check()?;

    let acknowledgment = Acknowledgment {
        reference: Uuid::new_v4(),
        dataset_id: record.id.clone(),
        dataset_name: record.name.clone(),
        submitted_at: Utc::now(),
    };

    info!(
        dataset_id = %record.id,
        reference = %acknowledgment.reference,
        "Application submitted"
    );
    Ok(acknowledgment)
}
