//! Page host.
//!
//! A [`Page`] owns the document, its event manager, the timer queue and
//! every widget enhanced on it. User actions (`click`, `focus`, `blur`,
//! `key_down`) are turned into DOM events and dispatched synchronously;
//! `advance` moves the virtual clock and delivers due timers.

use crate::bootstrap::{self, BootstrapReport};
use crate::config::SelectConfig;
use crate::interaction::{self, Host, SelectListener};
use crate::select::Select;
use common::{SelectError, SelectResult};
use dom::{Document, Event, EventManager, EventType, NodeId};
use event_loop::TimerQueue;
use slotmap::SlotMap;
use std::time::Duration;

slotmap::new_key_type! {
    /// Widget handle.
    pub struct WidgetId;
}

/// Work scheduled on the page's timer queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTask {
    /// Clear the type-ahead buffer of a widget.
    ResetSearch(WidgetId),
}

/// A document together with the custom selects enhancing it.
pub struct Page {
    config: SelectConfig,
    document: Document,
    events: EventManager<SelectListener>,
    timers: TimerQueue<TimerTask>,
    widgets: SlotMap<WidgetId, Select>,
}

impl Page {
    /// A page with an empty document.
    pub fn new(config: SelectConfig) -> Self {
        Self::with_document(Document::new(), config)
    }

    pub fn with_document(document: Document, config: SelectConfig) -> Self {
        Self {
            config,
            document,
            events: EventManager::new(),
            timers: TimerQueue::new(),
            widgets: SlotMap::with_key(),
        }
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Enhance one native element and wire its listeners.
    pub fn enhance(&mut self, native: NodeId) -> SelectResult<WidgetId> {
        if self.widget_for(native).is_some() {
            return Err(SelectError::AlreadyEnhanced);
        }
        let select = Select::new(&mut self.document, native, &self.config)?;
        let id = self.widgets.insert(select);
        if let Some(select) = self.widgets.get(id) {
            interaction::register_listeners(&mut self.events, id, select);
        }
        tracing::debug!(?id, "widget enhanced");
        Ok(id)
    }

    /// Enhance every element carrying the marker attribute.
    pub fn enhance_all(&mut self) -> BootstrapReport {
        bootstrap::enhance_all(self)
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Select> {
        self.widgets.get(id)
    }

    pub fn widgets(&self) -> impl Iterator<Item = (WidgetId, &Select)> + '_ {
        self.widgets.iter()
    }

    /// The widget enhancing `native`, if any.
    pub fn widget_for(&self, native: NodeId) -> Option<WidgetId> {
        self.widgets
            .iter()
            .find(|(_, w)| w.native() == native)
            .map(|(id, _)| id)
    }

    /// Programmatic selection on a widget.
    pub fn select_value(&mut self, id: WidgetId, value: &str) -> SelectResult<()> {
        let widget = self.widgets.get_mut(id).ok_or(SelectError::UnknownWidget)?;
        widget.select_value(&mut self.document, value)
    }

    /// Tear a widget down: drop its listeners and pending timer, remove its
    /// subtree and show the native element again.
    pub fn discard(&mut self, id: WidgetId) -> SelectResult<()> {
        let widget = self.widgets.remove(id).ok_or(SelectError::UnknownWidget)?;

        self.events.remove_where(|l| l.widget == id);
        if let Some(timer) = widget.search.pending_reset() {
            self.timers.clear(timer);
        }

        let container = widget.container();
        if let Some(active) = self.document.active_element {
            if self.document.tree.is_inclusive_descendant(active, container) {
                self.document.active_element = None;
            }
        }
        self.document.tree.remove(container);
        if let Some(elem) = self.document.tree.get_element_mut(widget.native()) {
            elem.remove_style_property("display");
        }

        tracing::debug!(?id, "widget discarded");
        Ok(())
    }

    /// The focused element.
    pub fn focused(&self) -> Option<NodeId> {
        self.document.active_element
    }

    /// Click `node`: move focus to its nearest focusable ancestor (or drop
    /// focus when there is none), then dispatch `click`.
    pub fn click(&mut self, node: NodeId) -> SelectResult<bool> {
        if !self.document.tree.contains(node) {
            return Err(SelectError::NodeNotFound);
        }
        match self.document.focusable_ancestor(node) {
            Some(focus) => self.focus(focus)?,
            None => self.blur(),
        }
        Ok(self.dispatch(node, Event::new(EventType::Click)))
    }

    /// Move focus to `node`, firing `blur`/`focusout` on the previously
    /// focused element and `focus`/`focusin` on `node`.
    pub fn focus(&mut self, node: NodeId) -> SelectResult<()> {
        if !self.document.tree.contains(node) {
            return Err(SelectError::NodeNotFound);
        }
        let previous = self.document.active_element;
        if previous == Some(node) {
            return Ok(());
        }

        self.document.active_element = Some(node);
        if let Some(previous) = previous {
            self.dispatch(previous, Event::focus(EventType::Blur, Some(node)));
            self.dispatch(previous, Event::focus(EventType::FocusOut, Some(node)));
        }
        self.dispatch(node, Event::focus(EventType::Focus, previous));
        self.dispatch(node, Event::focus(EventType::FocusIn, previous));
        Ok(())
    }

    /// Drop focus from the focused element.
    pub fn blur(&mut self) {
        if let Some(previous) = self.document.active_element.take() {
            self.dispatch(previous, Event::focus(EventType::Blur, None));
            self.dispatch(previous, Event::focus(EventType::FocusOut, None));
        }
    }

    /// Press a key on the focused element, or on the body when nothing has
    /// focus. Returns false when a listener prevented the default action.
    pub fn key_down(&mut self, key: &str, code: &str) -> bool {
        let target = self.document.active_element.unwrap_or(self.document.body);
        self.dispatch(target, Event::key_down(key, code))
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Advance virtual time, delivering every timer that comes due. Returns
    /// how many fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let fired = self.timers.advance(by);
        for timer in &fired {
            match timer.payload {
                TimerTask::ResetSearch(id) => {
                    if let Some(widget) = self.widgets.get_mut(id) {
                        if widget.search.expire(timer.id) {
                            tracing::debug!(?id, "type-ahead buffer cleared");
                        }
                    }
                }
            }
        }
        fired.len()
    }

    /// Number of timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.events.len()
    }

    fn dispatch(&mut self, target: NodeId, mut event: Event) -> bool {
        let path = self.document.event_path(target);
        let debounce = self.config.search_debounce();
        let Page {
            document,
            events,
            timers,
            widgets,
            ..
        } = self;

        events.dispatch(target, &mut event, &path, |listener, event| {
            if let Some(widget) = widgets.get_mut(listener.widget) {
                let mut host = Host {
                    document: &mut *document,
                    timers: &mut *timers,
                    debounce,
                };
                interaction::handle_event(listener, event, widget, &mut host);
            }
        })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(SelectConfig::default())
    }
}
