//! Prompt text assembled for the Gemini calls.
//!
//! Templates live here so the client stays request plumbing; tests pin
//! the exact wording the provider is tuned against.

use studio_types::media::ImageResolution;
use studio_types::prompt::{AnswerSet, CameraAngle, StepKey};

/// Photography descriptors appended to a polished prompt, rotated per
/// request.
pub const CAMERA_TYPES: [&str; 8] = [
    "shot with a DSLR camera, Canon EOS R5",
    "captured on a Sony Alpha a7 IV, cinematic look",
    "photographed with a Nikon Z7 II, professional quality",
    "Leica M11 rangefinder shot",
    "captured on film, Kodak Portra 400",
    "shot on a high-end Hasselblad X2D 100C",
    "FujiFilm GFX 100S medium format photo",
    "iPhone 15 Pro, hyperrealistic photo",
];

/// Canned suggestions served when the provider's JSON cannot be parsed.
pub const FALLBACK_OPTIONS: [&str; 5] = [
    "An interesting choice",
    "A classic option",
    "Something unexpected",
    "A vibrant setting",
    "A minimalist approach",
];

/// Full request text for a suggestion fetch: the step prompt plus the
/// JSON output instruction.
pub fn options_request_text(step_prompt: &str) -> String {
    format!(
        "{step_prompt} Return the response as a JSON object with a single key \"options\" which is an array of 5 strings."
    )
}

/// Response schema constraining the suggestion call to `{"options": [..]}`.
pub fn options_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "options": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["options"]
    })
}

/// Full request text for the final polish call.
pub fn polish_request_text(
    answers: &AnswerSet,
    camera_angle: CameraAngle,
    camera_type: &str,
) -> String {
    let field = |key: StepKey| answers.get(key).unwrap_or_default();
    let context = format!(
        "Subject: {}\nAction: {}\nSetting: {}\nStyle: {}\nMood/Lighting: {}\nCamera Angle: {}",
        field(StepKey::Subject),
        field(StepKey::Action),
        field(StepKey::Setting),
        field(StepKey::Style),
        field(StepKey::Mood),
        camera_angle.label(),
    );

    format!(
        "Based on the following details, craft a single, rich, detailed paragraph to be used as a prompt for an image generation model. Combine the elements smoothly and creatively. End the entire prompt with the phrase: \", {camera_type}\". Do not return anything else except the prompt itself, with no extra formatting or quotation marks. \n\n{context}"
    )
}

/// Quality keywords appended to an Imagen prompt per target resolution.
pub fn resolution_suffix(resolution: ImageResolution) -> &'static str {
    match resolution {
        ImageResolution::P480 => "",
        ImageResolution::P720 => ", 720p, HD, high definition",
        ImageResolution::P1080 => ", 1080p, Full HD, high resolution, detailed",
        ImageResolution::K2 => ", 2K resolution, QHD, highly detailed, professional quality",
        ImageResolution::K4 => ", 4K, ultra high resolution, professional quality, sharp focus",
        // 8K is an enhancement-only target; no generation suffix.
        ImageResolution::K8 => "",
    }
}

/// The super-resolution instruction for the enhancement call, with an
/// extra protocol block for 8K targets.
pub fn enhancement_prompt(target: ImageResolution) -> String {
    let mut prompt = format!(
        "\
Your role is an expert digital image processing AI specializing in super-resolution. Your task is to upscale the provided image to a {target} resolution. The result must be a masterpiece of clarity and detail.

**Core Directives:**

1.  **Primary Goal: Tack-Sharp Output:** The final image must be exceptionally sharp, crisp, and clear. Eliminate all forms of blur, haziness, and digital compression artifacts. Details, edges, and textures must be perfectly defined and resolved.
2.  **Authenticity is Paramount:** You must NOT invent, hallucinate, or alter the content of the image. Faithfully reconstruct and enhance only the details present in the original source. The identity and structure of objects, faces, and text are inviolable.
3.  **Texture and Micro-Detail Fidelity:**
    *   Preserve and enhance high-frequency details and micro-textures. Avoid creating a smooth, \"airbrushed,\" or \"painterly\" effect. The output should look natural, not artificial.
    *   For human subjects, ensure natural skin texture is maintained. Pores, fine lines, and individual hair strands must be rendered realistically.
    *   For artwork, preserve the original artist's style, including brushwork and canvas/paper texture.
4.  **Artifact and Noise Removal:** Meticulously remove digital noise (e.g., JPEG artifacts, sensor noise) using advanced de-noising techniques without sacrificing critical image detail.
5.  **Subtle Corrections Only:** Apply minimal and subtle improvements to lighting, contrast, and color balance only if it is absolutely essential for achieving photorealism. Respect the original color palette.

**Output Mandate:**

The final output must be a high-resolution, photorealistic, and artifact-free upscale. It must withstand intense scrutiny and high levels of magnification (200% to 500%), appearing sharp and detailed, NOT blurry, smudged, or plasticky.
"
    );

    if target == ImageResolution::K8 {
        prompt.push_str(
            "\
**Critical 8K Upscaling Protocol - MAXIMUM FIDELITY**

This is an 8K (7680x4320) super-resolution task. Standard upscaling is insufficient. Execute a professional-grade, multi-stage enhancement process with zero tolerance for softness or artifacts.

*   **De-Blurring & Sharpening:** Apply a deconvolution sharpening algorithm to counteract any source image softness. The goal is not just sharpness, but *acutance*\u{2014}the perceived sharpness of edges. All edges must be crisp and well-defined without haloing.
*   **Detail Reconstruction:** Focus on reconstructing and generating high-frequency details. This includes textures like fabric weave, wood grain, skin pores, and fine lines in architecture. The result must not look upscaled; it must look like it was captured natively at 8K.
*   **Noise & Artifact Elimination:** Perform a meticulous analysis and removal of any compression artifacts (JPEG blocking) or sensor noise. The final image must have a clean, smooth tonal transition in all areas.
*   **Zoom Scrutiny Mandate:** The primary success metric is clarity under magnification. The output image **MUST** be tack-sharp, clear, and detailed when viewed at 200% magnification. Any visible blur, pixelation, or smudging at this zoom level is an absolute failure of the task.
*   **Final Output Standard:** The deliverable must be an image of professional photographic quality, suitable for high-end digital displays and large-format printing. Do not compromise.
",
        );
    }

    prompt
}
