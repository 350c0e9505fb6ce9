use crate::{ViewId, ViewTree};

/// Finds the nearest enabled scrollable ancestor of `view`.
///
/// Walks the containment chain outward and returns the first ancestor that
/// is a scroll container with scrolling enabled and is not excluded. The
/// walk runs fresh on every adjustment pass; the view tree may have changed
/// since the last focus event.
///
/// Exclusions: a scroll container sitting directly inside a list container
/// or a list row is skipped — list internals own their scrolling and must
/// not be hijacked. A scrollable but scroll-disabled ancestor is also
/// skipped, continuing the walk further up.
pub fn resolve_scroll_ancestor<T: ViewTree>(tree: &T, view: ViewId) -> Option<ViewId> {
    let mut current = tree.parent(view);

    while let Some(candidate) = current {
        if tree.is_scroll_container(candidate)
            && tree.is_scroll_enabled(candidate)
            && !is_excluded(tree, candidate)
        {
            ktrace!(view, candidate, "resolved scroll ancestor");
            return Some(candidate);
        }
        current = tree.parent(candidate);
    }

    ktrace!(view, "no scroll ancestor");
    None
}

fn is_excluded<T: ViewTree>(tree: &T, container: ViewId) -> bool {
    match tree.parent(container) {
        Some(parent) => tree.is_list_container(parent) || tree.is_list_row(parent),
        None => false,
    }
}
