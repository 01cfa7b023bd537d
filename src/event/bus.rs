use std::cell::RefCell;
use crate::event::{EventHandler, SketchEvent};

/// A simple event bus for broadcasting sketch events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        self.handlers.borrow_mut().push(Box::new(handler));
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Emit an event to all registered handlers.
    ///
    /// The handler list is detached while it runs, so a handler may subscribe
    /// or emit on the same bus. Handlers it subscribes start with the next
    /// event, and a nested emit does not reach the handlers being dispatched.
    pub fn emit(&self, event: SketchEvent) {
        let mut dispatching = std::mem::take(&mut *self.handlers.borrow_mut());
        for handler in &mut dispatching {
            handler.handle_event(&event);
        }
        let mut handlers = self.handlers.borrow_mut();
        dispatching.append(&mut handlers);
        *handlers = dispatching;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_every_handler() {
        let bus = EventBus::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let counter = first.clone();
        bus.subscribe(move |_: &SketchEvent| counter.set(counter.get() + 1));
        let counter = second.clone();
        bus.subscribe(move |event: &SketchEvent| {
            if *event == SketchEvent::ToolMoved {
                counter.set(counter.get() + 1);
            }
        });

        bus.emit(SketchEvent::DrawingChanged);
        bus.emit(SketchEvent::ToolMoved);

        assert_eq!(bus.handler_count(), 2);
        assert_eq!(first.get(), 2);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_handler_may_subscribe_during_emit() {
        let bus = Rc::new(EventBus::new());
        let late = Rc::new(Cell::new(0));

        let inner_bus = Rc::downgrade(&bus);
        let counter = late.clone();
        let mut subscribed = false;
        bus.subscribe(move |_: &SketchEvent| {
            if subscribed {
                return;
            }
            subscribed = true;
            if let Some(bus) = inner_bus.upgrade() {
                let counter = counter.clone();
                bus.subscribe(move |_: &SketchEvent| counter.set(counter.get() + 1));
                bus.emit(SketchEvent::ToolChanged);
            }
        });

        bus.emit(SketchEvent::DrawingChanged);
        // The nested emit reached the handler added a moment before it
        assert_eq!(late.get(), 1);
        assert_eq!(bus.handler_count(), 2);

        bus.emit(SketchEvent::ToolMoved);
        assert_eq!(late.get(), 2);
    }
}
