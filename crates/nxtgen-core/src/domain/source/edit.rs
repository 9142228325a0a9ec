use std::ops::Range;

/// Replace `range` of the original text with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl TextEdit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            range: at..at,
            replacement: text.into(),
        }
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            replacement: text.into(),
        }
    }
}

/// Apply non-overlapping edits, all expressed against the original text.
///
/// Edits at the same offset keep the order in which they were given.
pub fn apply_edits(src: &str, edits: &[TextEdit]) -> String {
    let mut order: Vec<usize> = (0..edits.len()).collect();
    order.sort_by_key(|&i| (edits[i].range.start, i));

    let mut out = src.to_string();
    for &i in order.iter().rev() {
        let edit = &edits[i];
        debug_assert!(edit.range.end <= src.len());
        out.replace_range(edit.range.clone(), &edit.replacement);
    }
    out
}
