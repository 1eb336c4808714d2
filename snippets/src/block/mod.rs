use std::ops::Range;

/// A fenced code block matched in the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// Zero-based position in scan order.
    pub index: usize,
    /// Raw text between the tag and the closing fence, untrimmed.
    pub content: String,
    /// Byte span of the whole match, opening fence through closing fence.
    pub span: Range<usize>,
}

impl CodeBlock {
    /// 1-based line of the opening fence in `source`.
    pub fn line(&self, source: &str) -> usize {
        source[..self.span.start.min(source.len())]
            .bytes()
            .filter(|&b| b == b'\n')
            .count()
            + 1
    }
}
