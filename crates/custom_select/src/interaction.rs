//! Interaction handling: the Closed/Open state machine and key dispatch.
//!
//! Listeners are registered with the page's [`EventManager`] as plain
//! [`SelectListener`] values. When the page dispatches an event it hands
//! each matching listener back to [`handle_event`] together with the widget
//! it belongs to.

use crate::page::{TimerTask, WidgetId};
use crate::select::Select;
use dom::{Document, Event, EventListenerOptions, EventManager, EventType, NodeId};
use event_loop::TimerQueue;
use std::time::Duration;

/// Which part of the synthetic subtree a listener is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerTarget {
    Label,
    /// The item of the option at this index.
    Option(usize),
    Container,
}

/// Listener payload stored in the page's event manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectListener {
    pub widget: WidgetId,
    pub target: ListenerTarget,
}

/// What a keydown on the container does, decided by its key code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Toggle,
    Previous,
    Next,
    Close,
    Search,
}

impl KeyAction {
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => KeyAction::Toggle,
            "ArrowUp" => KeyAction::Previous,
            "ArrowDown" => KeyAction::Next,
            "Enter" | "Escape" => KeyAction::Close,
            _ => KeyAction::Search,
        }
    }
}

/// Page state an event handler may touch besides the widget itself.
pub(crate) struct Host<'a> {
    pub document: &'a mut Document,
    pub timers: &'a mut TimerQueue<TimerTask>,
    pub debounce: Duration,
}

/// Attach the widget's listeners: label click, one click per option item,
/// container blur and container keydown.
pub fn register_listeners(events: &mut EventManager<SelectListener>, widget: WidgetId, select: &Select) {
    let listen = |events: &mut EventManager<SelectListener>, node: NodeId, event_type, target| {
        events.add_listener(
            node,
            event_type,
            SelectListener { widget, target },
            EventListenerOptions::default(),
        );
    };

    listen(events, select.label(), EventType::Click, ListenerTarget::Label);
    for (index, option) in select.options().iter().enumerate() {
        listen(events, option.item, EventType::Click, ListenerTarget::Option(index));
    }
    listen(events, select.container(), EventType::Blur, ListenerTarget::Container);
    listen(events, select.container(), EventType::KeyDown, ListenerTarget::Container);
}

/// Run the handler for one delivered listener.
pub(crate) fn handle_event(listener: &SelectListener, event: &Event, widget: &mut Select, host: &mut Host<'_>) {
    match (listener.target, &event.event_type) {
        (ListenerTarget::Label, EventType::Click) => widget.toggle(host.document),
        (ListenerTarget::Option(index), EventType::Click) => {
            if let Err(err) = widget.select_index(host.document, index) {
                tracing::warn!(%err, index, "option click ignored");
            }
            widget.set_open(host.document, false);
        }
        (ListenerTarget::Container, EventType::Blur) => widget.set_open(host.document, false),
        (ListenerTarget::Container, EventType::KeyDown) => {
            on_key_down(listener.widget, event, widget, host)
        }
        _ => {}
    }
}

fn on_key_down(id: WidgetId, event: &Event, widget: &mut Select, host: &mut Host<'_>) {
    let code = event.code().unwrap_or_default();
    let action = KeyAction::from_code(code);
    tracing::trace!(code, ?action, "custom select keydown");

    match action {
        KeyAction::Toggle => widget.toggle(host.document),
        KeyAction::Previous => {
            if let Some(index) = widget.selected_option_index().filter(|&i| i > 0) {
                step_to(widget, host.document, index - 1);
            }
        }
        KeyAction::Next => {
            if let Some(index) = widget.selected_option_index() {
                if index + 1 < widget.len() {
                    step_to(widget, host.document, index + 1);
                }
            }
        }
        KeyAction::Close => widget.set_open(host.document, false),
        KeyAction::Search => search(id, event.key().unwrap_or_default(), widget, host),
    }
}

fn step_to(widget: &mut Select, document: &mut Document, index: usize) {
    if let Err(err) = widget.select_index(document, index) {
        tracing::warn!(%err, index, "arrow navigation failed");
    }
}

/// Append `key` to the search term, restart the reset timer and select the
/// first matching option.
fn search(id: WidgetId, key: &str, widget: &mut Select, host: &mut Host<'_>) {
    if !widget.search.push_key(key) {
        return;
    }

    let timer = host.timers.set_timeout(TimerTask::ResetSearch(id), host.debounce);
    if let Some(previous) = widget.search.arm_reset(timer) {
        host.timers.clear(previous);
    }

    let found = widget.search.find_match(&widget.options);
    tracing::debug!(term = widget.search.buffer(), ?found, "type-ahead search");
    if let Some(index) = found {
        step_to(widget, host.document, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectConfig;
    use slotmap::SlotMap;

    #[test]
    fn test_key_actions() {
        assert_eq!(KeyAction::from_code("Space"), KeyAction::Toggle);
        assert_eq!(KeyAction::from_code("ArrowUp"), KeyAction::Previous);
        assert_eq!(KeyAction::from_code("ArrowDown"), KeyAction::Next);
        assert_eq!(KeyAction::from_code("Enter"), KeyAction::Close);
        assert_eq!(KeyAction::from_code("Escape"), KeyAction::Close);
        assert_eq!(KeyAction::from_code("KeyA"), KeyAction::Search);
        assert_eq!(KeyAction::from_code("Tab"), KeyAction::Search);
    }

    #[test]
    fn test_register_listeners() {
        let mut doc = Document::new();
        let native = doc.create_element("select");
        doc.append_to_body(native);
        for value in ["a", "b", "c"] {
            let option = doc.create_element_with_attributes("option", &[("value", value)]);
            doc.tree.append_child(native, option);
        }
        let select = Select::new(&mut doc, native, &SelectConfig::default()).unwrap();

        let mut widgets: SlotMap<WidgetId, ()> = SlotMap::with_key();
        let id = widgets.insert(());
        let mut events = EventManager::new();
        register_listeners(&mut events, id, &select);

        assert_eq!(events.len(), 6);
        let label = events.get_listeners(select.label(), &EventType::Click);
        assert_eq!(label.len(), 1);
        assert_eq!(label[0].listener.target, ListenerTarget::Label);

        let item = select.options()[2].item;
        let item_listeners = events.get_listeners(item, &EventType::Click);
        assert_eq!(item_listeners[0].listener.target, ListenerTarget::Option(2));
        assert_eq!(item_listeners[0].listener.widget, id);

        assert_eq!(events.get_listeners(select.container(), &EventType::Blur).len(), 1);
        assert_eq!(events.get_listeners(select.container(), &EventType::KeyDown).len(), 1);
    }
}
