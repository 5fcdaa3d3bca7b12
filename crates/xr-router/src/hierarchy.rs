use xr_core::PointerEventKind;

use crate::Scene;

/// Parent chains longer than this are treated as cyclic and cut.
pub(crate) const MAX_HIERARCHY_DEPTH: usize = 64;

/// `target` and its ancestors, nearest first.
pub(crate) fn ancestors<S: Scene>(
    scene: &S,
    target: S::Target,
) -> impl Iterator<Item = S::Target> + '_ {
    std::iter::successors(Some(target), move |t| scene.parent(*t)).take(MAX_HIERARCHY_DEPTH)
}

/// Nearest object that is an ancestor-or-self of both `a` and `b`.
pub(crate) fn common_root<S: Scene>(scene: &S, a: S::Target, b: S::Target) -> Option<S::Target> {
    ancestors(scene, a).find(|x| ancestors(scene, b).any(|y| y == *x))
}

/// Nearest ancestor-or-self of `target` that declares a `kind` handler.
pub(crate) fn resolve_handler<S: Scene>(
    scene: &mut S,
    target: S::Target,
    kind: PointerEventKind,
) -> Option<S::Target> {
    let mut current = Some(target);
    for _ in 0..MAX_HIERARCHY_DEPTH {
        let t = current?;
        if scene.handlers(t).is_some_and(|h| h.has(kind)) {
            return Some(t);
        }
        current = scene.parent(t);
    }
    None
}
