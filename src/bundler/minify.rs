use once_cell::sync::Lazy;
use regex::Regex;

static BETWEEN_TAGS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r">\s+<").ok());
static HTML_COMMENT: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").ok());

/// Drop comments and the whitespace between tags.
#[must_use]
pub fn minify_html(html: &str) -> String {
    let mut out = html.to_string();
    if let Some(re) = HTML_COMMENT.as_ref() {
        out = re.replace_all(&out, "").into_owned();
    }
    if let Some(re) = BETWEEN_TAGS.as_ref() {
        out = re.replace_all(&out, "><").into_owned();
    }
    out.trim().to_string()
}

/// Where a line of script ends up after scanning it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    Template,
    BlockComment,
}

/// Track template literals and block comments across one line.
///
/// Quotes are closed by the end of the line; a `//` outside any literal
/// ends the scan.
fn scan_line(line: &str, mut state: ScanState) -> ScanState {
    let mut chars = line.chars().peekable();
    let mut quote: Option<char> = None;
    while let Some(c) = chars.next() {
        match state {
            ScanState::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = ScanState::Code;
                }
            }
            ScanState::Template => match c {
                '\\' => {
                    chars.next();
                }
                '`' => state = ScanState::Code,
                _ => {}
            },
            ScanState::Code => match (quote, c) {
                (Some(_), '\\') => {
                    chars.next();
                }
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '\'' | '"') => quote = Some(c),
                (None, '`') => state = ScanState::Template,
                (None, '/') if chars.peek() == Some(&'/') => break,
                (None, '/') if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = ScanState::BlockComment;
                }
                (None, _) => {}
            },
        }
    }
    state
}

/// Drop blank lines, whole-line `//` comments and indentation.
///
/// Lines inside a template literal are kept byte for byte, so multi-line
/// strings containing comment markers or indentation survive.
#[must_use]
pub fn minify_script(source: &str) -> String {
    let mut state = ScanState::Code;
    let mut kept: Vec<&str> = Vec::new();
    for line in source.lines() {
        let start = state;
        state = scan_line(line, start);
        let mut text = line;
        if start != ScanState::Template {
            text = text.trim_start();
        }
        if state != ScanState::Template {
            text = text.trim_end();
        }
        let comment = start == ScanState::Code && text.starts_with("//");
        if start != ScanState::Template && (text.is_empty() || comment) {
            continue;
        }
        kept.push(text);
    }
    kept.join("\n")
}
