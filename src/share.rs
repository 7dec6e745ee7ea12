//! Clipboard share actions and the toast shown for their outcome.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plan::PlanCatalog;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareTarget {
    SummaryPitch,
    ShareText,
}

impl ShareTarget {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "summary_pitch" => Some(Self::SummaryPitch),
            "share_text" => Some(Self::ShareText),
            _ => None,
        }
    }

    /// Text the host should write to the clipboard.
    pub fn text<'a>(&self, catalog: &'a PlanCatalog) -> &'a str {
        match self {
            Self::SummaryPitch => &catalog.summary_pitch,
            Self::ShareText => &catalog.share_text,
        }
    }

    fn copied_description(&self) -> &'static str {
        match self {
            Self::SummaryPitch => "Summary pitch has been copied.",
            Self::ShareText => "Share text has been copied.",
        }
    }
}

/// The clipboard write was rejected by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

pub fn copy_toast(target: ShareTarget, result: Result<(), ClipboardError>) -> Toast {
    match result {
        Ok(()) => Toast {
            title: "Copied to clipboard".to_string(),
            description: target.copied_description().to_string(),
            variant: ToastVariant::Default,
        },
        Err(e) => {
            tracing::warn!(?target, error = %e, "copy failed");
            Toast {
                title: "Copy failed".to_string(),
                description: "Please try again.".to_string(),
                variant: ToastVariant::Destructive,
            }
        }
    }
}
