pub mod finding;

pub use finding::{Finding, FindingKind};

use std::ops::Range;

use log::debug;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser as CmarkParser, Tag};

use crate::block::CodeBlock;

/// A fenced code block as CommonMark sees it.
struct MarkdownFence {
    info: String,
    span: Range<usize>,
}

/// Compare scanner matches against the fenced blocks a CommonMark parser finds.
///
/// Only fenced blocks whose info string starts with `tag` are considered.
/// Findings never alter what gets extracted. Fences CommonMark does not
/// know (anything but three or more backticks or tildes) are not audited.
pub fn audit(
    source: &str,
    file_id: usize,
    fence: &str,
    tag: &str,
    blocks: &[CodeBlock],
) -> Vec<Finding> {
    if !is_commonmark_fence(fence) {
        debug!("skipping audit: '{}' is not a CommonMark fence", fence);
        return Vec::new();
    }

    let fences: Vec<MarkdownFence> = markdown_fences(source)
        .into_iter()
        .filter(|f| {
            f.info.starts_with(tag) && source[f.span.clone()].trim_start().starts_with(fence)
        })
        .collect();

    let mut findings = Vec::new();

    for md in &fences {
        let opening = opening_line(source, &md.span);
        let Some(block) = blocks.iter().find(|b| md.span.contains(&b.span.start)) else {
            findings.push(
                Finding::new(
                    FindingKind::NotExtracted,
                    format!("fenced `{}` block is not extracted", md.info),
                    opening,
                    file_id,
                )
                .with_note(
                    "the tag must directly follow the fence, and block bodies end at the \
                     first backtick; check for a space before the tag, inline code, or a \
                     missing closing fence",
                ),
            );
            continue;
        };

        if block.span.end <= closing_line_start(source, &md.span) {
            findings.push(
                Finding::new(
                    FindingKind::Truncated,
                    format!("block {} ends before its closing fence", block.index),
                    block.span.clone(),
                    file_id,
                )
                .with_note("only the text up to the first inner fence is written"),
            );
        }

        if md.info != tag {
            findings.push(
                Finding::new(
                    FindingKind::InfoCarried,
                    format!("info string `{}` continues past `{}`", md.info, tag),
                    opening,
                    file_id,
                )
                .with_note(format!(
                    "`{}` is written into block {} after the preamble",
                    &md.info[tag.len()..],
                    block.index
                )),
            );
        }
    }

    for block in blocks {
        if !fences.iter().any(|md| md.span.contains(&block.span.start)) {
            findings.push(Finding::new(
                FindingKind::OutsideBlock,
                format!("block {} is not a fenced `{}` block", block.index, tag),
                block.span.clone(),
                file_id,
            ));
        }
    }

    findings.sort_by_key(|f| f.span.start);
    findings
}

fn is_commonmark_fence(fence: &str) -> bool {
    fence.len() >= 3 && (fence.chars().all(|c| c == '`') || fence.chars().all(|c| c == '~'))
}

fn markdown_fences(source: &str) -> Vec<MarkdownFence> {
    CmarkParser::new_ext(source, Options::empty())
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => Some(MarkdownFence {
                info: info.trim().to_string(),
                span: range,
            }),
            _ => None,
        })
        .collect()
}

fn opening_line(source: &str, span: &Range<usize>) -> Range<usize> {
    let end = source[span.clone()]
        .find('\n')
        .map(|n| span.start + n)
        .unwrap_or(span.end);
    span.start..end
}

/// Offset of the last line of a fenced block, where its closing fence sits.
fn closing_line_start(source: &str, span: &Range<usize>) -> usize {
    source[span.clone()]
        .trim_end()
        .rfind('\n')
        .map(|n| span.start + n + 1)
        .unwrap_or(span.start)
}
