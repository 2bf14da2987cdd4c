//! Tiering types.
//!
//! This module contains the types that drive model selection:
//! - [`Feature`] - User-facing feature kinds
//! - [`Tier`] - Entitlement tier
//! - [`ModelId`] - Concrete backing model identifier
//! - [`ModelCatalog`] - Maps (feature, tier) to a model identifier

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Feature
// ============================================================================

/// User-facing feature kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Text chat completion (tiered).
    TextCompletion,
    /// Image generation from a prompt (tiered).
    ImageGeneration,
    /// Image analysis with a vision model (not tiered).
    ImageAnalysis,
}

impl Feature {
    /// Returns the display name for this feature.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TextCompletion => "Text completion",
            Self::ImageGeneration => "Image generation",
            Self::ImageAnalysis => "Image analysis",
        }
    }

    /// Returns true if this feature selects a different model per tier.
    pub fn is_tiered(&self) -> bool {
        matches!(self, Self::TextCompletion | Self::ImageGeneration)
    }
}

// ============================================================================
// Tier
// ============================================================================

/// Entitlement tier for a feature invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Default tier for unverified users.
    #[default]
    Standard,
    /// Premium tier reached through a verified purchase.
    Advanced,
}

impl Tier {
    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Advanced => "Advanced",
        }
    }

    /// Builds a tier from a premium flag.
    pub fn from_premium(premium: bool) -> Self {
        if premium { Self::Advanced } else { Self::Standard }
    }
}

// ============================================================================
// Model Id
// ============================================================================

/// Identifier of a concrete backing model, as the API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Creates a model identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// Model Catalog
// ============================================================================

/// Maps (feature, tier) pairs to concrete model identifiers.
///
/// The defaults match the hosted API's current line-up; deployments can
/// override individual identifiers without touching selection logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCatalog {
    /// Chat model for standard-tier users.
    pub chat_standard: ModelId,
    /// Chat model for advanced-tier users.
    pub chat_advanced: ModelId,
    /// Image-generation model for standard-tier users.
    pub image_standard: ModelId,
    /// Image-generation model for advanced-tier users.
    pub image_advanced: ModelId,
    /// Vision model used for image analysis regardless of tier.
    pub vision: ModelId,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            chat_standard: ModelId::new("gpt-3.5-turbo"),
            chat_advanced: ModelId::new("gpt-4-turbo"),
            image_standard: ModelId::new("dall-e-2"),
            image_advanced: ModelId::new("dall-e-3"),
            vision: ModelId::new("gpt-4-turbo"),
        }
    }
}

impl ModelCatalog {
    /// Resolves the model for a feature at a tier.
    ///
    /// Image analysis always resolves to the vision model; the tier only
    /// affects tiered features.
    pub fn resolve(&self, feature: Feature, tier: Tier) -> ModelId {
        match (feature, tier) {
            (Feature::TextCompletion, Tier::Standard) => self.chat_standard.clone(),
            (Feature::TextCompletion, Tier::Advanced) => self.chat_advanced.clone(),
            (Feature::ImageGeneration, Tier::Standard) => self.image_standard.clone(),
            (Feature::ImageGeneration, Tier::Advanced) => self.image_advanced.clone(),
            (Feature::ImageAnalysis, _) => self.vision.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
