//! Relative path text for copied image references.

use std::collections::VecDeque;

use super::segments::{PathSegments, SEPARATOR};

const PARENT: &str = "..";

/// Relative path from `root` to `target`, compared segment by segment.
///
/// Each index past the shared prefix where the root still has a segment adds
/// a leading `..`; each index where the target has a differing or additional
/// segment appends that segment. Segments that happen to match again after
/// the first divergence add nothing, so the result is only a true relative
/// path when the tails differ throughout.
///
/// An empty `root` returns `target` unchanged.
pub fn relative_path(root: &str, target: &str) -> String {
    if root.is_empty() {
        return target.to_string();
    }

    let root = PathSegments::parse(root);
    let target = PathSegments::parse(target);

    let mut path: VecDeque<&str> = VecDeque::new();
    for i in 0..root.len().max(target.len()) {
        match (root.get(i), target.get(i)) {
            (None, Some(seg)) => path.push_back(seg),
            (Some(_), None) => path.push_front(PARENT),
            (Some(r), Some(t)) if r != t => {
                path.push_front(PARENT);
                path.push_back(t);
            }
            _ => {}
        }
    }

    let mut out = String::new();
    for (i, seg) in path.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(seg);
    }
    out
}
