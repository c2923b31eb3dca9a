use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Content category. The wire value doubles as the upload subfolder, so the
/// mapping from category to storage location lives in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// General foundation activities (`kegiatan`).
    Kegiatan,
    /// Social Impact Assessment program (`sia`).
    Sia,
    /// Social Return on Investment program (`sroi`).
    Sroi,
}

impl Category {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "kegiatan" => Some(Self::Kegiatan),
            "sia" => Some(Self::Sia),
            "sroi" => Some(Self::Sroi),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kegiatan => "kegiatan",
            Self::Sia => "sia",
            Self::Sroi => "sroi",
        }
    }

    /// Upload subfolder for files in this category.
    pub fn subfolder(&self) -> &'static str {
        self.as_str()
    }

    /// Projects belong to one of the two assessment programs; plain
    /// activities do not appear there.
    pub fn is_project_category(&self) -> bool {
        matches!(self, Self::Sia | Self::Sroi)
    }
}

/// Parse an activity category form value; absent defaults to `kegiatan`.
pub fn parse_activity_category(raw: Option<&str>) -> Result<Category, AppError> {
    match raw {
        None => Ok(Category::Kegiatan),
        Some(s) => Category::parse(s)
            .ok_or_else(|| AppError::Validation("Category must be one of: kegiatan, sia, sroi".into())),
    }
}

/// Parse a project category form value; absent defaults to `sia`.
pub fn parse_project_category(raw: Option<&str>) -> Result<Category, AppError> {
    match raw {
        None => Ok(Category::Sia),
        Some(s) => match Category::parse(s) {
            Some(c) if c.is_project_category() => Ok(c),
            _ => Err(AppError::Validation(
                "Category must be one of: sia, sroi".into(),
            )),
        },
    }
}
