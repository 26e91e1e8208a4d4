//! Model catalog: human-readable, price-annotated labels mapped to provider model ids.

use serde::Serialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelOption {
    pub label: &'static str,
    pub id: &'static str,
}

/// Selectable models, first entry is the default.
pub const MODEL_CATALOG: &[ModelOption] = &[
    ModelOption {
        label: "GPT-5 (input $1.25 / output $10)",
        id: "gpt-5",
    },
    ModelOption {
        label: "GPT-5 mini (input $0.25 / output $2)",
        id: "gpt-5-mini",
    },
    ModelOption {
        label: "GPT-5 nano (input $0.05 / output $0.40)",
        id: "gpt-5-nano",
    },
    ModelOption {
        label: "GPT-4o mini (input $0.15 / output $0.60)",
        id: "gpt-4o-mini",
    },
    ModelOption {
        label: "GPT-4.5 (input $75 / output $150)",
        id: "gpt-4.5",
    },
    ModelOption {
        label: "o1-pro (input $150 / output $600)",
        id: "o1-pro",
    },
];

pub fn default_model() -> &'static ModelOption {
    &MODEL_CATALOG[0]
}

/// Resolves a request's model selection (id or label) to a catalog entry.
/// A blank or absent selection resolves to the default.
pub fn resolve_model(selection: Option<&str>) -> Result<&'static ModelOption, AppError> {
    let selection = selection.map(str::trim).unwrap_or_default();
    if selection.is_empty() {
        return Ok(default_model());
    }

    MODEL_CATALOG
        .iter()
        .find(|m| m.id == selection || m.label == selection)
        .ok_or_else(|| AppError::Validation(format!("Unknown model '{selection}'")))
}
