//! Core types for style selection and slider parameters.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::utils::ExplorerError;

/// The closed set of visual styles.
///
/// Dispatch over this enum is total; style identifiers arriving from the
/// frontend as strings are parsed at the command boundary, where an unknown
/// identifier surfaces as a selection error instead of a fallback branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    #[default]
    None,
    Bw,
    Sketch,
    Cartoon,
    Blur,
    Painting,
    AutoEnhance,
    Vivid,
    Vintage,
}

impl Style {
    /// Every style in dispatch-table order.
    pub const ALL: [Style; 9] = [
        Style::None,
        Style::Bw,
        Style::Sketch,
        Style::Cartoon,
        Style::Blur,
        Style::Painting,
        Style::AutoEnhance,
        Style::Vivid,
        Style::Vintage,
    ];

    /// The wire identifier, also used as the download filename suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::None => "none",
            Style::Bw => "bw",
            Style::Sketch => "sketch",
            Style::Cartoon => "cartoon",
            Style::Blur => "blur",
            Style::Painting => "painting",
            Style::AutoEnhance => "auto-enhance",
            Style::Vivid => "vivid",
            Style::Vintage => "vintage",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| ExplorerError::unknown_style(s))
    }
}

/// Rendering quality mode.
///
/// Fast trades fidelity for latency: a smaller processing size and cheaper
/// kernels. High quality uses the discussion's slider parameters in full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Fast,
    High,
}

/// Per-discussion slider values.
///
/// Defaults match the initial slider positions of the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleParams {
    /// Gaussian kernel size for the blur style (odd, 3-31)
    pub blur_radius: u32,
    /// Painting effect strength (10-200)
    pub painting_detail: u32,
    /// Painting color smoothing (0.1-1.0)
    pub painting_color_smooth: f64,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            blur_radius: 9,
            painting_detail: 60,
            painting_color_smooth: 0.6,
        }
    }
}

/// Addresses a single slider within [`StyleParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamKey {
    BlurRadius,
    PaintingDetail,
    PaintingColorSmooth,
}

impl StyleParams {
    /// Writes one slider value. The caller validates the range first.
    pub fn set(&mut self, key: ParamKey, value: f64) {
        match key {
            ParamKey::BlurRadius => self.blur_radius = value as u32,
            ParamKey::PaintingDetail => self.painting_detail = value as u32,
            ParamKey::PaintingColorSmooth => self.painting_color_smooth = value,
        }
    }

    pub fn get(&self, key: ParamKey) -> f64 {
        match key {
            ParamKey::BlurRadius => self.blur_radius as f64,
            ParamKey::PaintingDetail => self.painting_detail as f64,
            ParamKey::PaintingColorSmooth => self.painting_color_smooth,
        }
    }
}
