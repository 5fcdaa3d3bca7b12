use glam::Vec3;
use tracing::{debug, trace};
use xr_core::{DeviceId, HitResult, PointerEventKind, PointerRecord, Ray, TargetId};
use xr_pointer::PointerDevice;
use xr_tools::{TraceEvent, TraceSink};

use crate::hierarchy::{common_root, resolve_handler, MAX_HIERARCHY_DEPTH};
use crate::{ControllerState, RouterConfig, RouterError, Scene};

struct ControllerEntry<T: TargetId> {
    id: DeviceId,
    device: Box<dyn PointerDevice<T>>,
    state: ControllerState<T>,
}

/// Routes every registered pointer device's ray and button edges into scene events.
///
/// One instance per host; it is passed around explicitly and driven once per frame with
/// [`PointerEventRouter::process_frame`]. Selection is router-wide: any device's successful press
/// can replace it.
pub struct PointerEventRouter<T: TargetId> {
    config: RouterConfig,
    entries: Vec<ControllerEntry<T>>,
    selected: Option<T>,
    /// Record handed to handlers for events raised outside a device's frame.
    base_record: PointerRecord<T>,
    trace: Option<Box<dyn TraceSink>>,
    frame: u64,
    next_id: u32,
}

impl<T: TargetId> Default for PointerEventRouter<T> {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}

impl<T: TargetId> PointerEventRouter<T> {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            base_record: PointerRecord {
                position: config.screen_center(),
                ..PointerRecord::new()
            },
            config,
            entries: Vec::new(),
            selected: None,
            trace: None,
            frame: 0,
            next_id: 0,
        }
    }

    pub fn with_trace_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.set_trace_sink(sink);
        self
    }

    pub fn set_trace_sink(&mut self, sink: impl TraceSink + 'static) {
        self.trace = Some(Box::new(sink));
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Number of frames processed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Register `device` under a fresh id. Devices are processed in registration order.
    pub fn register<D: PointerDevice<T> + 'static>(&mut self, device: D) -> DeviceId {
        let mut id = DeviceId(self.next_id);
        while self.contains(id) {
            id = DeviceId(id.0.wrapping_add(1));
        }
        self.next_id = id.0.wrapping_add(1);
        self.insert(id, Box::new(device));
        id
    }

    pub fn register_with_id<D: PointerDevice<T> + 'static>(
        &mut self,
        id: DeviceId,
        device: D,
    ) -> Result<(), RouterError> {
        if self.contains(id) {
            return Err(RouterError::AlreadyRegistered(id));
        }
        self.insert(id, Box::new(device));
        Ok(())
    }

    fn insert(&mut self, id: DeviceId, device: Box<dyn PointerDevice<T>>) {
        debug!(device = ?id, "registered pointer device");
        self.entries.push(ControllerEntry {
            id,
            device,
            state: ControllerState::new(),
        });
    }

    /// Remove a device. Its open press cycle is closed (end-drag, pointer-up) and its hover chain
    /// receives exit events before the state is dropped.
    pub fn unregister<S: Scene<Target = T>>(
        &mut self,
        id: DeviceId,
        scene: &mut S,
    ) -> Result<Box<dyn PointerDevice<T>>, RouterError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(RouterError::NotRegistered(id))?;
        let ControllerEntry {
            mut device,
            mut state,
            ..
        } = self.entries.remove(index);

        let mut dispatch = Dispatch {
            frame: self.frame,
            config: &self.config,
            selected: &mut self.selected,
            trace: &mut self.trace,
        };
        dispatch.release(scene, device.as_mut(), &mut state, false);
        if let Some(old) = state.hover.take() {
            device.on_hover_exit(old);
        }
        dispatch.update_hover_chain(scene, &mut state.record, None);
        debug!(device = ?id, "unregistered pointer device");
        Ok(device)
    }

    pub fn contains(&self, id: DeviceId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn device_ids(&self) -> impl Iterator<Item = DeviceId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mutable access to a registered device, e.g. to push a new pose before the frame.
    pub fn device_mut(&mut self, id: DeviceId) -> Option<&mut (dyn PointerDevice<T> + 'static)> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| e.device.as_mut())
    }

    pub fn state(&self, id: DeviceId) -> Option<&ControllerState<T>> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.state)
    }

    /// The record handed to handlers for `id`'s events. Same allocation for the device's lifetime.
    pub fn pointer_record(&self, id: DeviceId) -> Option<&PointerRecord<T>> {
        self.state(id).map(ControllerState::record)
    }

    pub fn selected(&self) -> Option<T> {
        self.selected
    }

    /// Deselect the current selection, if any.
    pub fn clear_selection<S: Scene<Target = T>>(&mut self, scene: &mut S) {
        let mut dispatch = Dispatch {
            frame: self.frame,
            config: &self.config,
            selected: &mut self.selected,
            trace: &mut self.trace,
        };
        dispatch.clear_selection(scene, &self.base_record);
    }

    /// Run one frame: every registered device, in registration order.
    pub fn process_frame<S: Scene<Target = T>>(&mut self, scene: &mut S) {
        self.frame += 1;
        trace!(frame = self.frame, devices = self.entries.len(), "pointer frame");

        let mut dispatch = Dispatch {
            frame: self.frame,
            config: &self.config,
            selected: &mut self.selected,
            trace: &mut self.trace,
        };
        for entry in &mut self.entries {
            dispatch.process_device(scene, entry);
        }
    }
}

/// Borrowed router state needed while one device's entry is mutably borrowed.
struct Dispatch<'a, T: TargetId> {
    frame: u64,
    config: &'a RouterConfig,
    selected: &'a mut Option<T>,
    trace: &'a mut Option<Box<dyn TraceSink>>,
}

impl<T: TargetId> Dispatch<'_, T> {
    fn process_device<S: Scene<Target = T>>(
        &mut self,
        scene: &mut S,
        entry: &mut ControllerEntry<T>,
    ) {
        let ControllerEntry { id, device, state } = entry;
        let id = *id;
        let mask = self.config.layer_mask;

        let ray = {
            let scene_ref: &S = scene;
            let mut raycast = |origin: Vec3, direction: Vec3| {
                match Ray::try_new(origin, direction) {
                    Some(probe) => scene_ref.raycast(&probe, mask),
                    None => HitResult::miss(),
                }
            };
            device.compute_ray(&mut raycast)
        };
        let Some(ray) = ray.and_then(|r| Ray::try_new(r.origin, r.direction)) else {
            trace!(device = ?id, "no ray this frame");
            return;
        };

        let record = &mut *state.record;
        record.reset(self.frame, self.config.screen_center());
        record.device = Some(id);
        record.ray = Some(ray);
        let hit = scene.raycast(&ray, mask);
        record.current_raycast = hit;
        let target = hit.hit_target().copied();

        if state.hover != target {
            debug!(device = ?id, from = ?state.hover, to = ?target, "hover changed");
            if let Some(old) = state.hover {
                device.on_hover_exit(old);
            }
            if let Some(new) = target {
                device.on_hover_enter(new);
            }
            state.hover = target;
        }
        self.update_hover_chain(scene, record, target);

        if device.button_down() {
            self.press(scene, id, device.as_mut(), state);
        }
        if device.button_up() {
            self.release(scene, device.as_mut(), state, true);
        }

        if let Some(dragged) = state.dragged {
            let record = &mut *state.record;
            record.current = Some(dragged);
            self.execute(scene, dragged, PointerEventKind::Drag, record);
            device.on_pointer_event(PointerEventKind::Drag, record);
        }

        if let Some(selected) = *self.selected {
            let record = &mut *state.record;
            record.current = Some(selected);
            self.execute(scene, selected, PointerEventKind::UpdateSelected, record);
        }

        if hit.is_hit() {
            device.limit_visual_distance(hit.distance);
        }
    }

    fn press<S: Scene<Target = T>>(
        &mut self,
        scene: &mut S,
        id: DeviceId,
        device: &mut dyn PointerDevice<T>,
        state: &mut ControllerState<T>,
    ) {
        let Some(hovered) = state.hover else {
            trace!(device = ?id, "press with nothing under the pointer");
            return;
        };
        if state.is_pressing() {
            debug!(device = ?id, "release edge was missed; closing the previous press cycle");
            self.release(scene, device, state, false);
        }
        self.clear_selection(scene, &state.record);

        let record = &mut *state.record;
        record.press_position = record.position;
        record.press_raycast = record.current_raycast;
        record.pointer_press = None;
        record.current = Some(hovered);

        let owner = match self.execute_hierarchy(scene, hovered, PointerEventKind::Press, record) {
            Some(owner) => {
                device.on_pointer_event(PointerEventKind::Press, record);
                record.current = Some(owner);
                self.execute(scene, owner, PointerEventKind::Click, record);
                device.on_pointer_event(PointerEventKind::Click, record);
                Some(owner)
            }
            None => {
                device.on_pointer_event(PointerEventKind::Press, record);
                let owner = self.execute_hierarchy(scene, hovered, PointerEventKind::Click, record);
                device.on_pointer_event(PointerEventKind::Click, record);
                owner
            }
        };

        let pressed = owner.unwrap_or(hovered);
        record.pointer_press = Some(pressed);
        state.pressed = Some(pressed);
        if let Some(owner) = owner {
            record.current = Some(owner);
            self.select(scene, owner, record);
        }

        record.current = Some(pressed);
        self.execute(scene, pressed, PointerEventKind::BeginDrag, record);
        device.on_pointer_event(PointerEventKind::BeginDrag, record);
        record.pointer_drag = Some(pressed);
        state.dragged = Some(pressed);
        debug!(device = ?id, object = ?pressed, "press");
    }

    /// Close the open press cycle. `with_drop` delivers a drop to the hover target first.
    fn release<S: Scene<Target = T>>(
        &mut self,
        scene: &mut S,
        device: &mut dyn PointerDevice<T>,
        state: &mut ControllerState<T>,
        with_drop: bool,
    ) {
        let record = &mut *state.record;
        if let Some(dragged) = state.dragged.take() {
            record.current = Some(dragged);
            self.execute(scene, dragged, PointerEventKind::EndDrag, record);
            device.on_pointer_event(PointerEventKind::EndDrag, record);
            if let (true, Some(hovered)) = (with_drop, state.hover) {
                record.current = Some(hovered);
                self.execute_hierarchy(scene, hovered, PointerEventKind::Drop, record);
            }
            record.pointer_drag = None;
        }
        if let Some(pressed) = state.pressed.take() {
            record.current = Some(pressed);
            self.execute(scene, pressed, PointerEventKind::PointerUp, record);
            device.on_pointer_event(PointerEventKind::PointerUp, record);
            record.pointer_press = None;
        }
    }

    /// Move the hover chain from `record.pointer_enter` to `new_enter`: exits from the old deepest
    /// object up to (not including) the common root, then enters down from the new one.
    fn update_hover_chain<S: Scene<Target = T>>(
        &mut self,
        scene: &mut S,
        record: &mut PointerRecord<T>,
        new_enter: Option<T>,
    ) {
        if new_enter.is_none() || record.pointer_enter.is_none() {
            let mut hovered = std::mem::take(&mut record.hovered);
            for &t in &hovered {
                record.current = Some(t);
                self.execute(scene, t, PointerEventKind::HoverExit, record);
            }
            hovered.clear();
            record.hovered = hovered;
            if new_enter.is_none() {
                record.pointer_enter = None;
                return;
            }
        }
        let Some(new_enter) = new_enter else {
            return;
        };
        if record.pointer_enter == Some(new_enter) {
            return;
        }

        let root = record
            .pointer_enter
            .and_then(|old| common_root(scene, old, new_enter));

        let mut current = record.pointer_enter;
        for _ in 0..MAX_HIERARCHY_DEPTH {
            let Some(t) = current.filter(|t| Some(*t) != root) else {
                break;
            };
            record.current = Some(t);
            self.execute(scene, t, PointerEventKind::HoverExit, record);
            record.hovered.retain(|h| *h != t);
            current = scene.parent(t);
        }

        record.pointer_enter = Some(new_enter);
        let mut current = Some(new_enter);
        for depth in 0..MAX_HIERARCHY_DEPTH {
            let Some(t) = current.filter(|t| Some(*t) != root) else {
                break;
            };
            record.current = Some(t);
            self.execute(scene, t, PointerEventKind::HoverEnter, record);
            // entered objects sit below the surviving ancestors
            record.hovered.insert(depth, t);
            current = scene.parent(t);
        }
    }

    fn clear_selection<S: Scene<Target = T>>(&mut self, scene: &mut S, record: &PointerRecord<T>) {
        if let Some(previous) = self.selected.take() {
            debug!(object = ?previous, "deselect");
            self.execute(scene, previous, PointerEventKind::Deselect, record);
        }
    }

    /// Make `target` the router-wide selection if it declares a select handler.
    fn select<S: Scene<Target = T>>(
        &mut self,
        scene: &mut S,
        target: T,
        record: &PointerRecord<T>,
    ) {
        self.clear_selection(scene, record);
        if !scene.handlers(target).is_some_and(|h| h.has(PointerEventKind::Select)) {
            return;
        }
        debug!(object = ?target, "select");
        *self.selected = Some(target);
        self.execute(scene, target, PointerEventKind::Select, record);
    }

    /// Deliver `kind` to exactly `target`; returns whether it was handled.
    fn execute<S: Scene<Target = T>>(
        &mut self,
        scene: &mut S,
        target: T,
        kind: PointerEventKind,
        record: &PointerRecord<T>,
    ) -> bool {
        let handled = scene
            .handlers(target)
            .is_some_and(|h| h.invoke(kind, record));
        self.emit(kind, record.device, target, handled);
        handled
    }

    /// Deliver `kind` to the nearest ancestor-or-self of `target` that declares it.
    fn execute_hierarchy<S: Scene<Target = T>>(
        &mut self,
        scene: &mut S,
        target: T,
        kind: PointerEventKind,
        record: &PointerRecord<T>,
    ) -> Option<T> {
        match resolve_handler(scene, target, kind) {
            Some(owner) => {
                self.execute(scene, owner, kind, record);
                Some(owner)
            }
            None => {
                self.emit(kind, record.device, target, false);
                None
            }
        }
    }

    fn emit(&mut self, kind: PointerEventKind, device: Option<DeviceId>, target: T, handled: bool) {
        trace!(frame = self.frame, event = kind.tag(), object = ?target, handled, "pointer event");
        if let Some(sink) = self.trace.as_mut() {
            sink.emit(TraceEvent::pointer(self.frame, kind, device, target).with_handled(handled));
        }
    }
}
