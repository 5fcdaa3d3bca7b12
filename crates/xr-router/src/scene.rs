use core::fmt;

use xr_core::{HitResult, LayerMask, PointerEventKind, PointerRecord, Ray, TargetId};

/// A target's callback for one event kind.
pub type Handler<T> = Box<dyn FnMut(&PointerRecord<T>)>;

/// Host scene as seen by the router: hit-testing, hierarchy, and per-target handler slots.
pub trait Scene {
    type Target: TargetId;

    /// Nearest hit along `ray` among objects on `mask`. Must be synchronous and side-effect free.
    fn raycast(&self, ray: &Ray, mask: LayerMask) -> HitResult<Self::Target>;

    /// Parent in the scene hierarchy; handler lookup for press, click and drop bubbles up it.
    fn parent(&self, _target: Self::Target) -> Option<Self::Target> {
        None
    }

    /// Handler slots of `target`, or `None` for objects without any (or that no longer exist).
    fn handlers(&mut self, target: Self::Target) -> Option<&mut HandlerSet<Self::Target>>;
}

/// Optional handler slots a target declares.
///
/// Absence of a slot is never an error: the router probes slots with plain conditionals (press,
/// falling back to click) and skips what is missing.
pub struct HandlerSet<T> {
    hover_enter: Option<Handler<T>>,
    hover_exit: Option<Handler<T>>,
    press: Option<Handler<T>>,
    click: Option<Handler<T>>,
    begin_drag: Option<Handler<T>>,
    drag: Option<Handler<T>>,
    end_drag: Option<Handler<T>>,
    drop: Option<Handler<T>>,
    pointer_up: Option<Handler<T>>,
    select: Option<Handler<T>>,
    deselect: Option<Handler<T>>,
    update_selected: Option<Handler<T>>,
}

impl<T> HandlerSet<T> {
    pub fn new() -> Self {
        Self {
            hover_enter: None,
            hover_exit: None,
            press: None,
            click: None,
            begin_drag: None,
            drag: None,
            end_drag: None,
            drop: None,
            pointer_up: None,
            select: None,
            deselect: None,
            update_selected: None,
        }
    }

    /// Builder form of [`HandlerSet::set`].
    pub fn on(
        mut self,
        kind: PointerEventKind,
        handler: impl FnMut(&PointerRecord<T>) + 'static,
    ) -> Self {
        self.set(kind, handler);
        self
    }

    pub fn set(
        &mut self,
        kind: PointerEventKind,
        handler: impl FnMut(&PointerRecord<T>) + 'static,
    ) {
        *self.slot_mut(kind) = Some(Box::new(handler));
    }

    pub fn clear(&mut self, kind: PointerEventKind) {
        *self.slot_mut(kind) = None;
    }

    pub fn has(&self, kind: PointerEventKind) -> bool {
        self.slot(kind).is_some()
    }

    /// Run the slot for `kind`; returns whether the target handled it.
    pub fn invoke(&mut self, kind: PointerEventKind, record: &PointerRecord<T>) -> bool {
        match self.slot_mut(kind) {
            Some(handler) => {
                handler(record);
                true
            }
            None => false,
        }
    }

    fn slot(&self, kind: PointerEventKind) -> &Option<Handler<T>> {
        match kind {
            PointerEventKind::HoverEnter => &self.hover_enter,
            PointerEventKind::HoverExit => &self.hover_exit,
            PointerEventKind::Press => &self.press,
            PointerEventKind::Click => &self.click,
            PointerEventKind::BeginDrag => &self.begin_drag,
            PointerEventKind::Drag => &self.drag,
            PointerEventKind::EndDrag => &self.end_drag,
            PointerEventKind::Drop => &self.drop,
            PointerEventKind::PointerUp => &self.pointer_up,
            PointerEventKind::Select => &self.select,
            PointerEventKind::Deselect => &self.deselect,
            PointerEventKind::UpdateSelected => &self.update_selected,
        }
    }

    fn slot_mut(&mut self, kind: PointerEventKind) -> &mut Option<Handler<T>> {
        match kind {
            PointerEventKind::HoverEnter => &mut self.hover_enter,
            PointerEventKind::HoverExit => &mut self.hover_exit,
            PointerEventKind::Press => &mut self.press,
            PointerEventKind::Click => &mut self.click,
            PointerEventKind::BeginDrag => &mut self.begin_drag,
            PointerEventKind::Drag => &mut self.drag,
            PointerEventKind::EndDrag => &mut self.end_drag,
            PointerEventKind::Drop => &mut self.drop,
            PointerEventKind::PointerUp => &mut self.pointer_up,
            PointerEventKind::Select => &mut self.select,
            PointerEventKind::Deselect => &mut self.deselect,
            PointerEventKind::UpdateSelected => &mut self.update_selected,
        }
    }
}

impl<T> Default for HandlerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for HandlerSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const KINDS: [PointerEventKind; 12] = [
            PointerEventKind::HoverEnter,
            PointerEventKind::HoverExit,
            PointerEventKind::Press,
            PointerEventKind::Click,
            PointerEventKind::BeginDrag,
            PointerEventKind::Drag,
            PointerEventKind::EndDrag,
            PointerEventKind::Drop,
            PointerEventKind::PointerUp,
            PointerEventKind::Select,
            PointerEventKind::Deselect,
            PointerEventKind::UpdateSelected,
        ];
        f.debug_set()
            .entries(KINDS.iter().filter(|k| self.has(**k)).map(|k| k.tag()))
            .finish()
    }
}
