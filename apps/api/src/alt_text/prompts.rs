// Alt-text prompt. The reply is stored verbatim, so it must be the alt text itself.

pub const ALT_TEXT_MAX_TOKENS: u32 = 300;

pub const ALT_TEXT_PROMPT: &str = "\
Write alternative text for the attached image, for use in the `alt` attribute of a web page. \
Describe what the image shows and, where it matters, what it communicates. \
Keep it to one or two sentences and under 125 characters where possible. \
Do not start with \"Image of\" or \"Picture of\". \
If the image is purely decorative and conveys no information, reply with exactly: presentation-only \
Reply with the alt text only, without quotes or any other text.";
