use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub matched: bool,
    pub text: &'a str,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            matched: false,
            text,
        }
    }

    fn hit(text: &'a str) -> Self {
        Self {
            matched: true,
            text,
        }
    }
}

/// Splits `text` into alternating plain and matched segments, always starting
/// and ending with a plain one (either may be empty). Zero-length matches are
/// skipped.
pub fn highlight<'a>(text: &'a str, pattern: &Regex) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in pattern.find_iter(text) {
        if m.start() == m.end() {
            continue;
        }
        segments.push(Segment::plain(&text[last..m.start()]));
        segments.push(Segment::hit(m.as_str()));
        last = m.end();
    }
    segments.push(Segment::plain(&text[last..]));

    segments
}
