use regex::Regex;

/// Finds CMS asset CDN image URLs in free text.
///
/// Matches `https://a-<region>.<domain>/f/<space>/<w>x<h>/<hex id>/<name>.<ext>`
/// where `<ext>` is one of jpg, jpeg, png, gif (any case). The region part
/// is optional so the unprefixed EU host `a.<domain>` matches too.
#[derive(Debug, Clone)]
pub struct AssetUrlMatcher {
    pattern: Regex,
}

impl AssetUrlMatcher {
    pub fn new(domain: &str) -> Result<Self, regex::Error> {
        let pattern = format!(
            r"(?i)https?://a(?:-[a-z]+)?\.{}/f/\d+/\d+x\d+/[0-9a-f]+/[\w.\-]+\.(?:jpeg|jpg|png|gif)\b",
            regex::escape(domain)
        );
        Ok(Self {
            pattern: Regex::new(&pattern)?,
        })
    }

    /// Returns the first asset image URL in `text`, or `None` if there is none.
    pub fn find<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.pattern.find(text).map(|m| m.as_str())
    }
}
