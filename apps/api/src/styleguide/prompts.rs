// Styleguide validation prompt. Replace `{content_json}` and `{styleguide_json}` before sending.
//
// The reply repeats the "content" key once per field, which is why it is
// read with `extract::extract_content_blocks` rather than a JSON parser.

pub const VALIDATION_MAX_TOKENS: u32 = 1000;

pub const VALIDATION_PROMPT_TEMPLATE: &str = r#"You are a strict JSON validator. Given the content and styleguide below, check every field of the content and decide whether it follows the styleguide. When a field does not follow it, explain briefly why, then give your recommended fix on a new line. Only report fields named "content". There may be several fields named "content"; report all of them.

Content:
{content_json}

Styleguide:
{styleguide_json}

Respond strictly in this JSON format:
{
  "fieldName": {
    "follows": boolean,
    "_uid": "string (the original _uid of the block holding the field)",
    "explanation": "string (only when follows is false)"
  }
}

Example of the expected response:
{
  "content": {
    "follows": true,
    "_uid": "b67099fb-d304-4403-9d27-80792f757b4d",
    "explanation": ""
  },
  "content": {
    "follows": false,
    "_uid": "6be42f71-15fb-4ec0-9f30-fe6a7ad38b1e",
    "explanation": "The content does not meet the styleguide requirements because ..."
  }
}

Return only the JSON object, with no commentary or formatting."#;

pub fn build_validation_prompt(content_json: &str, styleguide_json: &str) -> String {
    VALIDATION_PROMPT_TEMPLATE
        .replace("{content_json}", content_json)
        .replace("{styleguide_json}", styleguide_json)
}
