//! # User Messages
//!
//! Texts shown to the shopper when a cart operation fails.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Failure                      Operation        Message key              │
//! │  ───────                      ─────────        ───────────              │
//! │  Insufficient / zero stock    add, update      out_of_stock             │
//! │  Anything else                add              add_failed               │
//! │  Anything else                remove           remove_failed            │
//! │  Anything else                update           update_failed            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::PtBr => write!(f, "pt-BR"),
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Ok(Locale::En),
            "pt" | "pt-br" => Ok(Locale::PtBr),
            other => Err(format!(
                "Unknown locale: '{}'. Valid options: en, pt-BR",
                other
            )),
        }
    }
}

/// The four cart messages for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub out_of_stock: String,
    pub add_failed: String,
    pub remove_failed: String,
    pub update_failed: String,
}

impl Messages {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Messages {
                out_of_stock: "Requested quantity out of stock".to_string(),
                add_failed: "Error adding product".to_string(),
                remove_failed: "Error removing product".to_string(),
                update_failed: "Error updating product quantity".to_string(),
            },
            Locale::PtBr => Messages {
                out_of_stock: "Quantidade solicitada fora de estoque".to_string(),
                add_failed: "Erro na adição do produto".to_string(),
                remove_failed: "Erro na remoção do produto".to_string(),
                update_failed: "Erro na alteração de quantidade do produto".to_string(),
            },
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Messages::for_locale(Locale::default())
    }
}
