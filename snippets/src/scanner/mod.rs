pub mod error;

pub use error::ScanError;

use regex::Regex;

use crate::block::CodeBlock;

/// Finds tagged fenced blocks by pattern rather than by Markdown structure.
///
/// A block is the fence, the tag, then every character up to the next
/// occurrence of the fence's first character, then the fence. With the
/// default fence this means a block body can never contain a backtick.
pub struct Scanner {
    pattern: Regex,
}

impl Scanner {
    pub fn new(fence: &str, tag: &str) -> Result<Self, ScanError> {
        let Some(stop) = fence.chars().next() else {
            return Err(ScanError::EmptyFence);
        };
        let fence = regex::escape(fence);
        let stop = regex::escape(&stop.to_string());
        let pattern = Regex::new(&format!(
            "{fence}{tag}([^{stop}]*){fence}",
            tag = regex::escape(tag)
        ))?;
        Ok(Scanner { pattern })
    }

    /// All non-overlapping matches in `source`, left to right.
    pub fn scan(&self, source: &str) -> Vec<CodeBlock> {
        self.pattern
            .captures_iter(source)
            .enumerate()
            .filter_map(|(index, caps)| {
                let whole = caps.get(0)?;
                let body = caps.get(1)?;
                Some(CodeBlock {
                    index,
                    content: body.as_str().to_string(),
                    span: whole.range(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<String> {
        Scanner::new("```", "rust")
            .unwrap()
            .scan(source)
            .into_iter()
            .map(|b| b.content)
            .collect()
    }

    #[test]
    fn finds_blocks_in_order() {
        let src = "a\n```rust\none\n```\nb\n```rust\ntwo\n```\n";
        assert_eq!(scan(src), vec!["\none\n", "\ntwo\n"]);
    }

    #[test]
    fn adjacent_blocks_stay_separate() {
        let src = "```rust\none\n``````rust\ntwo\n```";
        assert_eq!(scan(src), vec!["\none\n", "\ntwo\n"]);
    }

    #[test]
    fn other_tags_are_ignored() {
        let src = "```toml\nx = 1\n```\n```\nplain\n```\n";
        assert!(scan(src).is_empty());
    }

    #[test]
    fn unterminated_fence_yields_nothing() {
        let src = "```rust\nfn main() {}\n";
        assert!(scan(src).is_empty());
    }

    #[test]
    fn inner_backtick_prevents_match() {
        let src = "```rust\nlet s = `x`;\n```\n";
        assert!(scan(src).is_empty());
    }

    #[test]
    fn info_string_suffix_is_captured() {
        let src = "```rust,ignore\nfoo();\n```";
        assert_eq!(scan(src), vec![",ignore\nfoo();\n"]);
    }

    #[test]
    fn empty_body() {
        assert_eq!(scan("```rust```"), vec![""]);
    }

    #[test]
    fn spans_and_indices() {
        let src = "x\n```rust\na\n```\n```rust\nb\n```";
        let blocks = Scanner::new("```", "rust").unwrap().scan(src);
        assert_eq!(blocks[0].index, 0);
        assert_eq!(blocks[1].index, 1);
        assert_eq!(&src[blocks[0].span.clone()], "```rust\na\n```");
        assert_eq!(blocks[0].line(src), 2);
        assert_eq!(blocks[1].line(src), 5);
    }

    #[test]
    fn custom_fence_stops_at_its_own_character() {
        let blocks = Scanner::new("~~~", "py")
            .unwrap()
            .scan("~~~py\nprint(`x`)\n~~~");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, "\nprint(`x`)\n");
    }

    #[test]
    fn metacharacters_are_literal() {
        let scanner = Scanner::new("```", "c++").unwrap();
        assert_eq!(scanner.scan("```c++\nint x;\n```").len(), 1);
        assert!(scanner.scan("```cc\n```").is_empty());
    }

    #[test]
    fn empty_fence_is_rejected() {
        assert!(matches!(Scanner::new("", "rust"), Err(ScanError::EmptyFence)));
    }
}
