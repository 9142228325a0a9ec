use super::{Mutation, MutationOutcome};

/// Ensure a stylesheet contains `block`.
///
/// `marker` is a line unique to the block; when present nothing changes. The
/// block replaces the first matching `anchor` line, or is prepended when the
/// stylesheet has none.
pub fn ensure_block(src: &str, block: &str, marker: &str, anchors: &[&str]) -> Mutation {
    if src.contains(marker) {
        return Mutation::unchanged(src);
    }

    let text = match anchors.iter().find_map(|a| src.find(a).map(|at| (at, a.len()))) {
        Some((at, len)) => {
            let mut text = String::with_capacity(src.len() + block.len());
            text.push_str(&src[..at]);
            text.push_str(block);
            text.push_str(&src[at + len..]);
            text
        }
        None => format!("{block}\n{src}"),
    };

    Mutation {
        text,
        outcome: MutationOutcome::Applied {
            edits: vec!["add stylesheet block".into()],
        },
    }
}
