// SEO metadata prompt. Replace `{budgets}` and `{story_json}` before sending.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::seo::metadata::SEO_FIELDS;

pub const SEO_MAX_TOKENS: u32 = 1000;

pub const SEO_PROMPT_TEMPLATE: &str = r#"You are an SEO specialist. Write search and social metadata for the web page whose CMS content is given below.

Return a JSON object with exactly these string fields, keeping each within its character budget:
{budgets}

Write for people first: describe what the page offers, in the page's own language, without keyword stuffing.

PAGE CONTENT (JSON):
{story_json}

"#;

/// Fills the template with the field budgets and the story content.
pub fn build_seo_prompt(story_json: &str) -> String {
    let budgets = SEO_FIELDS
        .iter()
        .map(|f| format!("- \"{}\": at most {} characters", f.name, f.max_chars))
        .collect::<Vec<_>>()
        .join("\n");
    let mut prompt = SEO_PROMPT_TEMPLATE
        .replace("{budgets}", &budgets)
        .replace("{story_json}", story_json);
    prompt.push_str(JSON_ONLY_INSTRUCTION);
    prompt
}
