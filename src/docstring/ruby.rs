//! Ruby `#` comment blocks.

use super::{is_waymark_comment, line_spans, normalize_lines, DocstringFormat, DocstringInfo, DocstringKind};
use crate::classify;
use crate::language::Language;

pub(super) fn extract(text: &str) -> Option<DocstringInfo> {
    let spans = line_spans(text);
    let lines: Vec<&str> = spans.iter().map(|&(s, e)| &text[s..e]).collect();

    let is_doc = |i: usize, line: &str| {
        let t = line.trim_start();
        t.starts_with('#')
            && !(i == 0 && classify::is_shebang(t))
            && !classify::is_ruby_magic_comment(t)
            && !is_waymark_comment(t)
    };

    let start = (0..lines.len()).find(|&i| is_doc(i, lines[i]))?;
    let mut end = start;
    while end < lines.len() && is_doc(end, lines[end]) {
        end += 1;
    }

    let stripped = lines[start..end]
        .iter()
        .map(|l| {
            let body = &l.trim_start()[1..];
            body.strip_prefix(' ').unwrap_or(body).to_string()
        })
        .collect();

    let prefix_is_preamble = lines[..start].iter().enumerate().all(|(i, l)| {
        let t = l.trim();
        t.is_empty()
            || (i == 0 && classify::is_shebang(t))
            || classify::is_ruby_magic_comment(t)
            || is_waymark_comment(t)
    });
    let owner_follows = lines.get(end).is_some_and(|l| Language::Ruby.is_owner_line(l));

    let kind = if prefix_is_preamble && !owner_follows {
        DocstringKind::File
    } else {
        DocstringKind::Function
    };

    Some(DocstringInfo {
        language: Language::Ruby,
        kind,
        format: DocstringFormat::Ruby,
        raw: text[spans[start].0..spans[end - 1].1].to_string(),
        content: normalize_lines(stripped),
        start_line: start + 1,
        end_line: end,
    })
}
