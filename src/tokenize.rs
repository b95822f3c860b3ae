// Whitespace-preserving word segmentation for the reveal text. Words and
// the whitespace runs between them come back as separate segments, so
// joining the segments reproduces the input byte for byte.

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Word(String),
    Whitespace(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Word(text) => text,
            Segment::Whitespace(text) => text,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Segment::Word(_))
    }
}

pub fn split_keep_whitespace(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (i, ch) in text.char_indices() {
        let ws = ch.is_whitespace();
        match current {
            None => current = Some(ws),
            Some(prev) if prev != ws => {
                segments.push(make_segment(&text[start..i], prev));
                start = i;
                current = Some(ws);
            }
            _ => {}
        }
    }
    if let Some(prev) = current {
        segments.push(make_segment(&text[start..], prev));
    }
    segments
}

fn make_segment(text: &str, whitespace: bool) -> Segment {
    if whitespace {
        Segment::Whitespace(text.to_owned())
    } else {
        Segment::Word(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text()).collect()
    }

    #[test]
    fn preserves_double_space_between_words() {
        let segments = split_keep_whitespace("a  b");
        assert_eq!(
            segments,
            vec![
                Segment::Word("a".to_owned()),
                Segment::Whitespace("  ".to_owned()),
                Segment::Word("b".to_owned()),
            ]
        );
    }

    #[test]
    fn joining_segments_reproduces_input() {
        for text in &["a  b", "  leading", "trailing \t", "one\ntwo  three", ""] {
            assert_eq!(join(&split_keep_whitespace(text)), *text);
        }
    }

    #[test]
    fn empty_input_yields_no_segments() {
        assert!(split_keep_whitespace("").is_empty());
    }

    #[test]
    fn single_word_is_one_segment() {
        assert_eq!(
            split_keep_whitespace("hello"),
            vec![Segment::Word("hello".to_owned())]
        );
    }

    #[test]
    fn mixed_whitespace_kept_verbatim() {
        let segments = split_keep_whitespace("a \t\n b");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1], Segment::Whitespace(" \t\n ".to_owned()));
    }

    #[test]
    fn counts_words_not_whitespace() {
        let segments = split_keep_whitespace("when ai runs the busywork");
        assert_eq!(segments.iter().filter(|s| s.is_word()).count(), 5);
    }

    #[test]
    fn handles_multibyte_words() {
        let segments = split_keep_whitespace("héllo wörld");
        assert_eq!(join(&segments), "héllo wörld");
        assert_eq!(segments.iter().filter(|s| s.is_word()).count(), 2);
    }
}
