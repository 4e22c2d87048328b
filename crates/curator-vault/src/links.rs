//! Internal link extraction.
//!
//! Internal links use the wiki syntax `[[Target]]`, optionally with an alias
//! (`[[Target|shown text]]`), a heading (`[[Target#Section]]`) or as an
//! embed (`![[Target]]`). Parsing is best-effort: anything that does not look
//! like a complete link is left alone.

/// A single internal link found in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalLink {
    /// Name of the linked document.
    pub target: String,
    /// Text shown instead of the target, if any.
    pub alias: Option<String>,
    /// Heading within the target, if any.
    pub heading: Option<String>,
    /// Whether the link embeds the target (`![[...]]`).
    pub embed: bool,
}

impl InternalLink {
    /// Extracts all internal links from a single line or block of text.
    pub fn parse_all(text: &str) -> Vec<InternalLink> {
        let bytes = text.as_bytes();
        let mut links = Vec::new();
        let mut i = 0usize;

        while i + 1 < bytes.len() {
            if bytes[i] == b'[' && bytes[i + 1] == b'[' {
                let embed = i > 0 && bytes[i - 1] == b'!';
                let start = i + 2;
                if let Some(len) = text[start..].find("]]") {
                    let inner = &text[start..start + len];
                    if let Some(link) = Self::parse_inner(inner, embed) {
                        links.push(link);
                    }
                    i = start + len + 2;
                    continue;
                }
                break;
            }
            i += 1;
        }

        links
    }

    fn parse_inner(inner: &str, embed: bool) -> Option<InternalLink> {
        if inner.contains('\n') || inner.contains("[[") {
            return None;
        }

        let (left, alias) = match inner.split_once('|') {
            Some((left, alias)) => (left, Some(alias.trim()).filter(|a| !a.is_empty())),
            None => (inner, None),
        };
        let (target, heading) = match left.split_once('#') {
            Some((target, heading)) => (target, Some(heading.trim()).filter(|h| !h.is_empty())),
            None => (left, None),
        };

        let target = target.trim();
        if target.is_empty() {
            return None;
        }

        Some(InternalLink {
            target: target.to_string(),
            alias: alias.map(str::to_string),
            heading: heading.map(str::to_string),
            embed,
        })
    }
}

/// Returns the distinct target names linked from `text`, in order of appearance.
pub fn internal_link_targets(text: &str) -> Vec<String> {
    let mut targets: Vec<String> = Vec::new();
    for link in InternalLink::parse_all(text) {
        if !targets.contains(&link.target) {
            targets.push(link.target);
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_links() {
        assert_eq!(
            internal_link_targets("[[Alice]] met [[Bob]]"),
            vec!["Alice", "Bob"]
        );
    }

    #[test]
    fn test_alias_heading_and_embed() {
        let links = InternalLink::parse_all("see ![[Plan#Goals|the goals]] and [[Bob|B]]");
        assert_eq!(links.len(), 2);

        assert_eq!(links[0].target, "Plan");
        assert_eq!(links[0].heading.as_deref(), Some("Goals"));
        assert_eq!(links[0].alias.as_deref(), Some("the goals"));
        assert!(links[0].embed);

        assert_eq!(links[1].target, "Bob");
        assert!(!links[1].embed);
    }

    #[test]
    fn test_duplicates_and_broken_links() {
        assert_eq!(
            internal_link_targets("[[Alice]], [[Alice]] and [[]] and [[unclosed"),
            vec!["Alice"]
        );
    }

    #[test]
    fn test_heading_only_link_is_skipped() {
        assert!(internal_link_targets("[[#Local heading]]").is_empty());
    }

    #[test]
    fn test_non_ascii_names() {
        assert_eq!(internal_link_targets("🟢 [[Zoë]] & [[Łukasz]]"), vec!["Zoë", "Łukasz"]);
    }
}
