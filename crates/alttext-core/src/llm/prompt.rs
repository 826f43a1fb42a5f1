//! Prompt text shared by every provider.

/// Asks for three varied, concise alt text descriptions as a numbered list.
pub const ALT_TEXT_PROMPT: &str = "Generate 3 different alt text descriptions for this image. \
Vary the level of detail and focus in each description.
Each alt text should:
1. Be clear and concise
2. Avoid starting with \"An image of\" or \"A photo of\"
3. Focus on the most important elements
4. Use natural language

Return the descriptions in this format:
1. [first description]
2. [second description]
3. [third description]";

/// Prompt with the base64 image inlined as text, for APIs without image blocks.
pub fn with_inline_image(image_base64: &str) -> String {
    format!("{ALT_TEXT_PROMPT}\n\nHere's the base64 encoded image: {image_base64}")
}
