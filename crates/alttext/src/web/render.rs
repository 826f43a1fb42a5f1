//! Server-rendered HTML: the home page and the fragments swapped into it.

use alttext_core::{GenerationResult, Provider};
use html_escape::{encode_double_quoted_attribute, encode_text};

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Full home page. Shows the API key form when no key is configured.
pub fn home_page(provider: Provider, api_key_missing: bool, max_upload_mb: u64) -> String {
    let api_key_section = if api_key_missing {
        api_key_form(provider)
    } else {
        String::new()
    };

    INDEX_TEMPLATE
        .replace("{{provider}}", &encode_text(provider.label()))
        .replace("{{api_key_section}}", &api_key_section)
        .replace("{{max_upload_mb}}", &max_upload_mb.to_string())
        .replace(
            "{{upload_disabled}}",
            if api_key_missing { "disabled" } else { "" },
        )
}

fn api_key_form(provider: Provider) -> String {
    format!(
        r#"
        <form method="post" action="/saveApiKey" class="bg-yellow-50 border border-yellow-400 p-6 rounded-lg mb-6 space-y-3">
            <p class="font-bold text-yellow-800">{label} API key not configured</p>
            <input type="hidden" name="mode" value="{mode}">
            <input type="password" name="apiKey" placeholder="Enter your {label} API key" required
                   class="w-full border rounded px-3 py-2">
            <button type="submit" class="bg-yellow-600 text-white px-4 py-2 rounded hover:bg-yellow-700">
                Save API Key
            </button>
        </form>
    "#,
        label = encode_text(provider.label()),
        mode = encode_double_quoted_attribute(provider.as_str()),
    )
}

/// Success fragment listing each alternative as its own block.
pub fn success(result: &GenerationResult) -> String {
    let options: String = result
        .options()
        .map(|option| {
            format!(
                r#"
                <div class="bg-white p-3 rounded border border-green-200">
                    <p>{}</p>
                </div>
            "#,
                encode_text(option)
            )
        })
        .collect();

    format!(
        r#"
        <div class="bg-green-50 border border-green-400 text-green-700 px-4 py-3 rounded-lg">
            <h3 class="font-bold mb-4">Generated Alt Text Options:</h3>
            <div class="space-y-4">{options}</div>
            <button onclick="location.reload()" class="mt-4 bg-green-100 text-green-700 px-4 py-2 rounded hover:bg-green-200">
                Upload New Image
            </button>
        </div>
    "#
    )
}

/// Error fragment for the upload form; "Try Again" resets the form.
pub fn upload_error(message: &str) -> String {
    format!(
        r#"
        <div class="bg-red-50 border border-red-400 text-red-700 px-4 py-3 rounded-lg">
            <p class="font-bold mb-2">Error: {}</p>
            <button
                onclick="document.getElementById('uploadForm').reset(); this.closest('.bg-red-50').remove()"
                class="bg-red-100 text-red-700 px-4 py-2 rounded hover:bg-red-200"
            >
                Try Again
            </button>
        </div>
    "#,
        encode_text(message)
    )
}

/// Error fragment for the API key form; "Try Again" returns home.
pub fn api_key_error(message: &str) -> String {
    format!(
        r#"
        <div class="bg-red-50 border border-red-400 text-red-700 px-4 py-3 rounded-lg">
            <p class="font-bold">Error: {}</p>
            <button onclick="window.location.href='/'" class="mt-2 bg-red-100 text-red-700 px-4 py-2 rounded hover:bg-red-200">
                Try Again
            </button>
        </div>
    "#,
        encode_text(message)
    )
}
