//! Category model
//!
//! Every expense is filed under one category owned by the same user. A new
//! user starts with a fixed set of default categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, UserId};

/// 24-bit RGB display color, serialized as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const GRAY: Color = Color(0x9E9E9E);

    pub const fn from_rgb(rgb: u32) -> Self {
        Self(rgb & 0x00FF_FFFF)
    }

    pub const fn rgb(&self) -> u32 {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GRAY
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl FromStr for Color {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(CategoryValidationError::InvalidColor(s.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Color::from_rgb)
            .map_err(|_| CategoryValidationError::InvalidColor(s.to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An expense category belonging to one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    /// Owning user
    pub user_id: UserId,

    pub name: String,

    #[serde(default)]
    pub color: Color,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(user_id: UserId, name: impl Into<String>, color: Color) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            user_id,
            name: name.into(),
            color,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.updated_at = Utc::now();
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.chars().count() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Categories created for every new user
pub const DEFAULT_CATEGORIES: &[(&str, u32)] = &[
    ("Food", 0xF44336),
    ("Transport", 0x2196F3),
    ("Housing", 0x795548),
    ("Utilities", 0xFF9800),
    ("Entertainment", 0x9C27B0),
    ("Shopping", 0xE91E63),
    ("Health", 0x4CAF50),
    ("Other", 0x9E9E9E),
];

/// Build the default category set for a user
pub fn default_categories(user_id: UserId) -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, rgb)| Category::new(user_id, *name, Color::from_rgb(*rgb)))
        .collect()
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(s) => write!(f, "Invalid color '{}', expected #RRGGBB", s),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
