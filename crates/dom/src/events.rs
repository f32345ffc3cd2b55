//! DOM Events implementation.
//!
//! Listeners are stored as plain payloads of type `L` rather than boxed
//! closures. The owner of the `EventManager` decides what a payload means
//! when `dispatch` hands it back, which lets handlers borrow the document
//! mutably while an event is being delivered.

use crate::node::NodeId;
use std::collections::HashMap;

/// Event type enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyDown,
    Focus,
    Blur,
    FocusIn,
    FocusOut,
}

impl EventType {
    /// Check if event bubbles by default.
    pub fn bubbles(&self) -> bool {
        !matches!(self, EventType::Focus | EventType::Blur)
    }

    /// Check if event is cancelable by default.
    pub fn cancelable(&self) -> bool {
        matches!(self, EventType::Click | EventType::KeyDown)
    }
}

/// Event phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventPhase {
    None = 0,
    Capturing = 1,
    AtTarget = 2,
    Bubbling = 3,
}

/// Interface-specific event data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EventDetail {
    #[default]
    None,
    /// Keyboard event: `key` is the produced value, `code` the physical key.
    Key { key: String, code: String },
    /// Focus event: the node losing or gaining focus in exchange.
    Focus { related_target: Option<NodeId> },
}

/// DOM Event.
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: Option<NodeId>,
    /// Current target during propagation.
    pub current_target: Option<NodeId>,
    pub phase: EventPhase,
    pub bubbles: bool,
    pub cancelable: bool,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
    pub detail: EventDetail,
}

impl Event {
    pub fn new(event_type: EventType) -> Self {
        let bubbles = event_type.bubbles();
        let cancelable = event_type.cancelable();

        Self {
            event_type,
            target: None,
            current_target: None,
            phase: EventPhase::None,
            bubbles,
            cancelable,
            default_prevented: false,
            propagation_stopped: false,
            detail: EventDetail::None,
        }
    }

    /// A `keydown` event.
    pub fn key_down(key: &str, code: &str) -> Self {
        let mut event = Self::new(EventType::KeyDown);
        event.detail = EventDetail::Key {
            key: key.to_string(),
            code: code.to_string(),
        };
        event
    }

    /// A focus-family event (`focus`, `blur`, `focusin`, `focusout`).
    pub fn focus(event_type: EventType, related_target: Option<NodeId>) -> Self {
        let mut event = Self::new(event_type);
        event.detail = EventDetail::Focus { related_target };
        event
    }

    /// Key value of a keyboard event.
    pub fn key(&self) -> Option<&str> {
        match &self.detail {
            EventDetail::Key { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Physical key code of a keyboard event.
    pub fn code(&self) -> Option<&str> {
        match &self.detail {
            EventDetail::Key { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Prevent default action.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Event listener options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventListenerOptions {
    pub capture: bool,
    pub once: bool,
}

/// A registered listener.
#[derive(Clone, Debug)]
pub struct EventListener<L> {
    pub listener: L,
    pub options: EventListenerOptions,
}

/// Event manager for handling event dispatch.
pub struct EventManager<L> {
    /// Listeners by node and event type.
    listeners: HashMap<NodeId, HashMap<EventType, Vec<EventListener<L>>>>,
}

impl<L: Clone> EventManager<L> {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    /// Add event listener for a node.
    pub fn add_listener(
        &mut self,
        node: NodeId,
        event_type: EventType,
        listener: L,
        options: EventListenerOptions,
    ) {
        self.listeners
            .entry(node)
            .or_default()
            .entry(event_type)
            .or_default()
            .push(EventListener { listener, options });
    }

    /// Get listeners for a node and event type.
    pub fn get_listeners(&self, node: NodeId, event_type: &EventType) -> Vec<&EventListener<L>> {
        self.listeners
            .get(&node)
            .and_then(|n| n.get(event_type))
            .map(|l| l.iter().collect())
            .unwrap_or_default()
    }

    /// Remove every listener whose payload matches `predicate`.
    pub fn remove_where<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&L) -> bool,
    {
        for node_listeners in self.listeners.values_mut() {
            for type_listeners in node_listeners.values_mut() {
                type_listeners.retain(|l| !predicate(&l.listener));
            }
            node_listeners.retain(|_, l| !l.is_empty());
        }
        self.listeners.retain(|_, n| !n.is_empty());
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners
            .values()
            .flat_map(|n| n.values())
            .map(|l| l.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatch `event` to `target`.
    ///
    /// `ancestors` is the propagation path above the target, nearest first.
    /// `invoke` is called once per matching listener in capture, target, and
    /// bubble order. Returns false when the default action was prevented.
    pub fn dispatch<F>(
        &mut self,
        target: NodeId,
        event: &mut Event,
        ancestors: &[NodeId],
        mut invoke: F,
    ) -> bool
    where
        F: FnMut(&L, &mut Event),
    {
        event.target = Some(target);

        event.phase = EventPhase::Capturing;
        for &node in ancestors.iter().rev() {
            event.current_target = Some(node);
            self.invoke_listeners(node, event, &mut invoke);
            if event.propagation_stopped {
                return self.finish(event);
            }
        }

        event.phase = EventPhase::AtTarget;
        event.current_target = Some(target);
        self.invoke_listeners(target, event, &mut invoke);
        if event.propagation_stopped {
            return self.finish(event);
        }

        if event.bubbles {
            event.phase = EventPhase::Bubbling;
            for &node in ancestors {
                event.current_target = Some(node);
                self.invoke_listeners(node, event, &mut invoke);
                if event.propagation_stopped {
                    return self.finish(event);
                }
            }
        }

        self.finish(event)
    }

    fn finish(&self, event: &mut Event) -> bool {
        event.phase = EventPhase::None;
        event.current_target = None;
        !event.default_prevented
    }

    fn invoke_listeners<F>(&mut self, node: NodeId, event: &mut Event, invoke: &mut F)
    where
        F: FnMut(&L, &mut Event),
    {
        let phase = event.phase;
        let matching: Vec<(usize, EventListener<L>)> = self
            .listeners
            .get(&node)
            .and_then(|n| n.get(&event.event_type))
            .map(|listeners| {
                listeners
                    .iter()
                    .enumerate()
                    .filter(|(_, l)| match phase {
                        EventPhase::Capturing => l.options.capture,
                        EventPhase::Bubbling => !l.options.capture,
                        _ => true,
                    })
                    .map(|(i, l)| (i, l.clone()))
                    .collect()
            })
            .unwrap_or_default();

        let mut spent = Vec::new();
        for (index, entry) in matching {
            invoke(&entry.listener, event);
            if entry.options.once {
                spent.push(index);
            }
        }

        if spent.is_empty() {
            return;
        }
        if let Some(type_listeners) = self
            .listeners
            .get_mut(&node)
            .and_then(|n| n.get_mut(&event.event_type))
        {
            let mut index = 0;
            type_listeners.retain(|_| {
                let keep = !spent.contains(&index);
                index += 1;
                keep
            });
        }
    }
}

impl<L: Clone> Default for EventManager<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn node_ids(count: usize) -> Vec<NodeId> {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_event_creation() {
        let event = Event::new(EventType::Click);
        assert!(event.bubbles);
        assert!(event.cancelable);
        assert!(!event.default_prevented);

        let blur = Event::new(EventType::Blur);
        assert!(!blur.bubbles);

        let key = Event::key_down("a", "KeyA");
        assert!(key.bubbles);
        assert!(key.cancelable);
        assert!(!Event::focus(EventType::FocusIn, None).cancelable);
    }

    #[test]
    fn test_prevent_default() {
        let mut event = Event::new(EventType::Click);
        event.prevent_default();
        assert!(event.default_prevented);

        let mut uncancelable = Event::new(EventType::Focus);
        uncancelable.prevent_default();
        assert!(!uncancelable.default_prevented);
    }

    #[test]
    fn test_key_detail() {
        let event = Event::key_down(" ", "Space");
        assert_eq!(event.key(), Some(" "));
        assert_eq!(event.code(), Some("Space"));
        assert_eq!(Event::new(EventType::Click).code(), None);
    }

    #[test]
    fn test_dispatch_order() {
        let ids = node_ids(3);
        let (root, parent, target) = (ids[0], ids[1], ids[2]);
        let mut manager: EventManager<&'static str> = EventManager::new();
        let capture = EventListenerOptions {
            capture: true,
            once: false,
        };

        manager.add_listener(root, EventType::Click, "root-capture", capture);
        manager.add_listener(parent, EventType::Click, "parent-bubble", Default::default());
        manager.add_listener(target, EventType::Click, "target", Default::default());
        manager.add_listener(root, EventType::Click, "root-bubble", Default::default());

        let mut seen = Vec::new();
        let mut event = Event::new(EventType::Click);
        manager.dispatch(target, &mut event, &[parent, root], |l, _| seen.push(*l));

        assert_eq!(seen, vec!["root-capture", "target", "parent-bubble", "root-bubble"]);
        assert_eq!(event.target, Some(target));
        assert_eq!(event.phase, EventPhase::None);
    }

    #[test]
    fn test_non_bubbling_event_stays_at_target() {
        let ids = node_ids(2);
        let mut manager: EventManager<u8> = EventManager::new();
        manager.add_listener(ids[0], EventType::Blur, 1, Default::default());
        manager.add_listener(ids[1], EventType::Blur, 2, Default::default());

        let mut seen = Vec::new();
        let mut event = Event::focus(EventType::Blur, None);
        manager.dispatch(ids[1], &mut event, &[ids[0]], |l, _| seen.push(*l));
        assert_eq!(seen, vec![2]);
    }

    #[test]
    fn test_stop_propagation() {
        let ids = node_ids(2);
        let mut manager: EventManager<u8> = EventManager::new();
        manager.add_listener(ids[1], EventType::Click, 1, Default::default());
        manager.add_listener(ids[0], EventType::Click, 2, Default::default());

        let mut seen = Vec::new();
        let mut event = Event::new(EventType::Click);
        manager.dispatch(ids[1], &mut event, &[ids[0]], |l, ev| {
            seen.push(*l);
            ev.stop_propagation();
        });
        assert_eq!(seen, vec![1]);
    }

    #[test]
    fn test_once_and_removal() {
        let ids = node_ids(1);
        let mut manager: EventManager<u8> = EventManager::new();
        let once = EventListenerOptions {
            capture: false,
            once: true,
        };
        manager.add_listener(ids[0], EventType::KeyDown, 1, once);
        manager.add_listener(ids[0], EventType::KeyDown, 2, Default::default());
        manager.add_listener(ids[0], EventType::Click, 3, Default::default());
        assert_eq!(manager.len(), 3);

        let mut count = 0;
        let mut event = Event::key_down("a", "KeyA");
        manager.dispatch(ids[0], &mut event, &[], |_, _| count += 1);
        assert_eq!(count, 2);
        assert_eq!(manager.get_listeners(ids[0], &EventType::KeyDown).len(), 1);

        manager.remove_where(|l| *l == 3);
        assert_eq!(manager.len(), 1);
        manager.remove_where(|l| *l == 2);
        assert!(manager.is_empty());
    }
}
