//! Media generation parameters and history entries.
//!
//! Aspect ratios, resolutions, styles, and model identifiers mirror the
//! option sets the studio UI exposes; the provider client in
//! `studio-infra` turns them into request shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Aspect ratio for image generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Tall,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "3:4")]
    Portrait,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Wide => "16:9",
            AspectRatio::Tall => "9:16",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Portrait => "3:4",
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Square
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1:1" => Ok(AspectRatio::Square),
            "16:9" => Ok(AspectRatio::Wide),
            "9:16" => Ok(AspectRatio::Tall),
            "4:3" => Ok(AspectRatio::Landscape),
            "3:4" => Ok(AspectRatio::Portrait),
            other => Err(format!("invalid aspect ratio: '{other}'")),
        }
    }
}

/// Target resolution for generation or enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageResolution {
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "2K")]
    K2,
    #[serde(rename = "4K")]
    K4,
    #[serde(rename = "8K")]
    K8,
}

impl ImageResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageResolution::P480 => "480p",
            ImageResolution::P720 => "720p",
            ImageResolution::P1080 => "1080p",
            ImageResolution::K2 => "2K",
            ImageResolution::K4 => "4K",
            ImageResolution::K8 => "8K",
        }
    }
}

impl fmt::Display for ImageResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Artistic style tag appended to the generation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageStyle {
    Photographic,
    Anime,
    Painting,
    Fantasy,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Cartoon,
    Minimalist,
    Abstract,
    #[serde(rename = "3D Render")]
    Render3d,
    Realistic,
}

impl ImageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Photographic => "Photographic",
            ImageStyle::Anime => "Anime",
            ImageStyle::Painting => "Painting",
            ImageStyle::Fantasy => "Fantasy",
            ImageStyle::SciFi => "Sci-Fi",
            ImageStyle::Cartoon => "Cartoon",
            ImageStyle::Minimalist => "Minimalist",
            ImageStyle::Abstract => "Abstract",
            ImageStyle::Render3d => "3D Render",
            ImageStyle::Realistic => "Realistic",
        }
    }
}

impl fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Image model backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageModel {
    #[serde(rename = "imagen-4.0-generate-001")]
    Imagen4,
    #[serde(rename = "gemini-2.5-flash-image")]
    GeminiFlashImage,
}

impl ImageModel {
    /// Provider-side model identifier.
    pub fn id(&self) -> &'static str {
        match self {
            ImageModel::Imagen4 => "imagen-4.0-generate-001",
            ImageModel::GeminiFlashImage => "gemini-2.5-flash-image",
        }
    }
}

impl fmt::Display for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Parameters for a single image generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    pub resolution: ImageResolution,
    #[serde(default)]
    pub styles: Vec<ImageStyle>,
    pub model: ImageModel,
    pub number_of_images: u32,
}

/// Aspect ratio for video generation (narrower set than images).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoAspectRatio {
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Tall,
}

impl VideoAspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoAspectRatio::Wide => "16:9",
            VideoAspectRatio::Tall => "9:16",
        }
    }
}

/// Target resolution for video generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoResolution {
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "4K")]
    K4,
}

impl VideoResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoResolution::P720 => "720p",
            VideoResolution::P1080 => "1080p",
            VideoResolution::K4 => "4K",
        }
    }
}

/// Handle to a long-running video generation operation.
///
/// Video generation is fire-and-poll: `generate` returns an operation
/// name, `check` refreshes it until `done` with a download URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoOperation {
    /// Provider-side operation name used for polling.
    pub name: String,
    pub done: bool,
    /// Download URI for the finished video, present once `done`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_uri: Option<String>,
}

/// What kind of result a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Image,
    Edit,
    Video,
    Analysis,
    Enhancement,
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryKind::Image => write!(f, "image"),
            HistoryKind::Edit => write!(f, "edit"),
            HistoryKind::Video => write!(f, "video"),
            HistoryKind::Analysis => write!(f, "analysis"),
            HistoryKind::Enhancement => write!(f, "enhancement"),
        }
    }
}

impl FromStr for HistoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(HistoryKind::Image),
            "edit" => Ok(HistoryKind::Edit),
            "video" => Ok(HistoryKind::Video),
            "analysis" => Ok(HistoryKind::Analysis),
            "enhancement" => Ok(HistoryKind::Enhancement),
            other => Err(format!("invalid history kind: '{other}'")),
        }
    }
}

/// One saved generation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub kind: HistoryKind,
    /// The prompt (or question) that produced this result.
    pub prompt: String,
    /// Result payload: a data URL for media, plain text for analyses.
    pub payload: String,
    pub created_at: DateTime<Utc>,
}
