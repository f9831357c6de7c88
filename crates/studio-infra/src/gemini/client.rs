//! GeminiClient -- HTTP client for the Generative Language API.
//!
//! Backs the core [`SuggestionService`] and [`PromptSynthesizer`] ports
//! and carries the image, video, and analysis operations the REST layer
//! exposes directly.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use studio_core::promptbot::{PromptSynthesizer, SuggestionService};
use studio_types::error::{MediaError, SuggestionError, SynthesisError};
use studio_types::media::{
    ImageGenerationRequest, ImageModel, ImageResolution, VideoAspectRatio, VideoOperation,
    VideoResolution,
};
use studio_types::prompt::{AnswerSet, CameraAngle};

use super::prompts;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImagenInstance,
    ImagenParameters, ImagenRequest, ImagenResponse, InlineData, OperationResponse, Part,
    ThinkingConfig, VideoImage, VideoInstance, VideoParameters, VideoRequest,
    default_safety_settings,
};

/// Internal failure shape shared by all Gemini calls, mapped into the
/// per-domain error enums at the operation boundary.
enum ApiFailure {
    Http(String),
    Provider { status: u16, message: String },
    InvalidResponse(String),
}

impl From<ApiFailure> for SuggestionError {
    fn from(f: ApiFailure) -> Self {
        match f {
            ApiFailure::Http(m) => SuggestionError::Http(m),
            ApiFailure::Provider { status, message } => {
                SuggestionError::Provider { status, message }
            }
            ApiFailure::InvalidResponse(m) => SuggestionError::InvalidResponse(m),
        }
    }
}

impl From<ApiFailure> for SynthesisError {
    fn from(f: ApiFailure) -> Self {
        match f {
            ApiFailure::Http(m) => SynthesisError::Http(m),
            ApiFailure::Provider { status, message } => {
                SynthesisError::Provider { status, message }
            }
            ApiFailure::InvalidResponse(m) => SynthesisError::InvalidResponse(m),
        }
    }
}

impl From<ApiFailure> for MediaError {
    fn from(f: ApiFailure) -> Self {
        match f {
            ApiFailure::Http(m) => MediaError::Http(m),
            ApiFailure::Provider { status, message } => MediaError::Provider { status, message },
            ApiFailure::InvalidResponse(m) => MediaError::InvalidResponse(m),
        }
    }
}

/// Gemini API client.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing HTTP request headers. It never appears in Debug output,
/// Display output, or tracing logs.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    /// Rotates through [`prompts::CAMERA_TYPES`], one step per polish
    /// call.
    camera_type_cursor: AtomicUsize,
}

impl GeminiClient {
    const SUGGESTION_MODEL: &'static str = "gemini-2.5-flash";
    const POLISH_MODEL: &'static str = "gemini-2.5-pro";
    const ANALYSIS_MODEL: &'static str = "gemini-2.5-flash";
    const DEEP_ANALYSIS_MODEL: &'static str = "gemini-2.5-pro";
    const IMAGE_EDIT_MODEL: &'static str = "gemini-2.5-flash-image";
    const VIDEO_MODEL: &'static str = "veo-3.1-fast-generate-preview";

    /// Thinking budget for deep image analysis.
    const DEEP_THINKING_BUDGET: u32 = 32_768;

    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // 5 min timeout for long generations
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            camera_type_cursor: AtomicUsize::new(0),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn next_camera_type(&self) -> &'static str {
        let i = self.camera_type_cursor.fetch_add(1, Ordering::Relaxed);
        prompts::CAMERA_TYPES[i % prompts::CAMERA_TYPES.len()]
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiFailure> {
        let response = self
            .client
            .post(self.url(path))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ApiFailure::Http(format!("HTTP request failed: {e}")))?;

        Self::read_json(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiFailure> {
        let response = self
            .client
            .get(self.url(path))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| ApiFailure::Http(format!("HTTP request failed: {e}")))?;

        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiFailure> {
        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ApiFailure::Provider {
                status: status.as_u16(),
                message: error_body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiFailure::InvalidResponse(format!("failed to parse response: {e}")))
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiFailure> {
        self.post_json(&format!("/v1beta/models/{model}:generateContent"), request)
            .await
    }

    // -- prompt-builder ports -----------------------------------------------

    /// Fetch per-step suggestions as structured JSON.
    ///
    /// A malformed payload degrades to the canned fallback list rather
    /// than an error; only transport and provider failures propagate.
    pub async fn generate_suggestions(
        &self,
        step_prompt: &str,
    ) -> Result<Vec<String>, SuggestionError> {
        let request = GenerateContentRequest {
            contents: vec![Content::from_parts(vec![Part::text(
                prompts::options_request_text(step_prompt),
            )])],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(prompts::options_response_schema()),
                ..Default::default()
            }),
            safety_settings: default_safety_settings(),
        };

        let response = self
            .generate_content(Self::SUGGESTION_MODEL, &request)
            .await?;

        let Some(text) = response.first_text() else {
            warn!("suggestion response had no text, serving fallback options");
            return Ok(fallback_options());
        };

        match serde_json::from_str::<serde_json::Value>(text.trim()) {
            Ok(parsed) => match parsed.get("options").and_then(|o| o.as_array()) {
                Some(options) => Ok(options
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .take(5)
                    .collect()),
                None => Ok(Vec::new()),
            },
            Err(e) => {
                warn!(error = %e, "failed to parse options JSON, serving fallback options");
                Ok(fallback_options())
            }
        }
    }

    /// Polish the collected answers into one final image prompt.
    pub async fn polish_prompt(
        &self,
        answers: &AnswerSet,
        camera_angle: CameraAngle,
    ) -> Result<String, SynthesisError> {
        let camera_type = self.next_camera_type();
        let request = GenerateContentRequest {
            contents: vec![Content::from_parts(vec![Part::text(
                prompts::polish_request_text(answers, camera_angle, camera_type),
            )])],
            generation_config: None,
            safety_settings: default_safety_settings(),
        };

        let response = self.generate_content(Self::POLISH_MODEL, &request).await?;
        let text = response
            .first_text()
            .ok_or_else(|| SynthesisError::InvalidResponse("no text in response".to_string()))?;
        Ok(text.trim().to_string())
    }

    // -- media operations ---------------------------------------------------

    /// Generate one or more images, returned as `data:` URLs.
    pub async fn generate_image(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<Vec<String>, MediaError> {
        let mut prompt = request.prompt.clone();
        if !request.styles.is_empty() {
            let styles: Vec<&str> = request.styles.iter().map(|s| s.as_str()).collect();
            prompt.push_str(&format!(", in the style of {}", styles.join(", ")));
        }

        match request.model {
            ImageModel::Imagen4 => {
                prompt.push_str(prompts::resolution_suffix(request.resolution));
                let body = ImagenRequest {
                    instances: vec![ImagenInstance { prompt }],
                    parameters: ImagenParameters {
                        sample_count: request.number_of_images,
                        aspect_ratio: request.aspect_ratio.as_str().to_string(),
                        output_mime_type: "image/jpeg".to_string(),
                    },
                };

                let response: ImagenResponse = self
                    .post_json(
                        &format!("/v1beta/models/{}:predict", ImageModel::Imagen4.id()),
                        &body,
                    )
                    .await?;

                if response.predictions.is_empty() {
                    return Err(MediaError::NoMedia);
                }
                Ok(response
                    .predictions
                    .into_iter()
                    .map(|p| {
                        let mime = p.mime_type.as_deref().unwrap_or("image/jpeg");
                        format!("data:{mime};base64,{}", p.bytes_base64_encoded)
                    })
                    .collect())
            }
            ImageModel::GeminiFlashImage => {
                let body = GenerateContentRequest {
                    contents: vec![Content::from_parts(vec![Part::text(prompt)])],
                    generation_config: Some(GenerationConfig {
                        response_modalities: Some(vec!["IMAGE".to_string()]),
                        ..Default::default()
                    }),
                    safety_settings: default_safety_settings(),
                };

                let response = self
                    .generate_content(ImageModel::GeminiFlashImage.id(), &body)
                    .await?;
                let inline = response.first_inline_data().ok_or(MediaError::NoMedia)?;
                Ok(vec![inline.to_data_url()])
            }
        }
    }

    /// Edit an image with a text instruction, returning a `data:` URL.
    pub async fn edit_image(
        &self,
        image: &InlineData,
        prompt: &str,
    ) -> Result<String, MediaError> {
        self.image_to_image(image, prompt.to_string()).await
    }

    /// Upscale an image toward a target resolution, returning a `data:`
    /// URL.
    pub async fn enhance_image(
        &self,
        image: &InlineData,
        target: ImageResolution,
    ) -> Result<String, MediaError> {
        self.image_to_image(image, prompts::enhancement_prompt(target))
            .await
    }

    async fn image_to_image(
        &self,
        image: &InlineData,
        prompt: String,
    ) -> Result<String, MediaError> {
        let body = GenerateContentRequest {
            contents: vec![Content::from_parts(vec![
                Part::inline(image.mime_type.clone(), image.data.clone()),
                Part::text(prompt),
            ])],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_string()]),
                ..Default::default()
            }),
            safety_settings: default_safety_settings(),
        };

        let response = self.generate_content(Self::IMAGE_EDIT_MODEL, &body).await?;
        let inline = response.first_inline_data().ok_or(MediaError::NoMedia)?;
        Ok(inline.to_data_url())
    }

    /// Answer a question about an image. Deep analysis switches to the
    /// pro model with a raised thinking budget.
    pub async fn analyze_image(
        &self,
        image: &InlineData,
        prompt: &str,
        deep: bool,
    ) -> Result<String, MediaError> {
        let (model, config) = if deep {
            (
                Self::DEEP_ANALYSIS_MODEL,
                Some(GenerationConfig {
                    thinking_config: Some(ThinkingConfig {
                        thinking_budget: Self::DEEP_THINKING_BUDGET,
                    }),
                    ..Default::default()
                }),
            )
        } else {
            (Self::ANALYSIS_MODEL, None)
        };

        let body = GenerateContentRequest {
            contents: vec![Content::from_parts(vec![
                Part::inline(image.mime_type.clone(), image.data.clone()),
                Part::text(prompt),
            ])],
            generation_config: config,
            safety_settings: default_safety_settings(),
        };

        let response = self.generate_content(model, &body).await?;
        response
            .first_text()
            .ok_or_else(|| MediaError::InvalidResponse("no text in response".to_string()))
    }

    /// Start a video generation. Returns a pending operation handle to
    /// poll with [`Self::check_video_operation`].
    pub async fn generate_video(
        &self,
        prompt: &str,
        aspect_ratio: VideoAspectRatio,
        resolution: VideoResolution,
        image: Option<&InlineData>,
    ) -> Result<VideoOperation, MediaError> {
        let body = VideoRequest {
            instances: vec![VideoInstance {
                prompt: prompt.to_string(),
                image: image.map(|i| VideoImage {
                    bytes_base64_encoded: i.data.clone(),
                    mime_type: i.mime_type.clone(),
                }),
            }],
            parameters: VideoParameters {
                sample_count: 1,
                resolution: resolution.as_str().to_string(),
                aspect_ratio: aspect_ratio.as_str().to_string(),
            },
        };

        let response: OperationResponse = self
            .post_json(
                &format!("/v1beta/models/{}:predictLongRunning", Self::VIDEO_MODEL),
                &body,
            )
            .await?;
        Self::into_video_operation(response)
    }

    /// Refresh a video operation by name.
    pub async fn check_video_operation(&self, name: &str) -> Result<VideoOperation, MediaError> {
        let response: OperationResponse = self.get_json(&format!("/v1beta/{name}")).await?;
        Self::into_video_operation(response)
    }

    fn into_video_operation(response: OperationResponse) -> Result<VideoOperation, MediaError> {
        if let Some(error) = response.error {
            return Err(MediaError::Provider {
                status: error.code,
                message: error.message,
            });
        }
        let video_uri = response.video_uri();
        Ok(VideoOperation {
            name: response.name,
            done: response.done,
            video_uri,
        })
    }
}

fn fallback_options() -> Vec<String> {
    prompts::FALLBACK_OPTIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// GeminiClient intentionally does NOT derive Debug to prevent accidental
// exposure of internal state.

impl SuggestionService for GeminiClient {
    async fn suggestions(
        &self,
        _context: &str,
        step_prompt: &str,
    ) -> Result<Vec<String>, SuggestionError> {
        self.generate_suggestions(step_prompt).await
    }
}

impl PromptSynthesizer for GeminiClient {
    async fn synthesize(
        &self,
        answers: &AnswerSet,
        camera_angle: CameraAngle,
    ) -> Result<String, SynthesisError> {
        self.polish_prompt(answers, camera_angle).await
    }
}
