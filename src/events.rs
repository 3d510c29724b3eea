//! Event propagation through the document, focus changes and the trace buffer.

use super::*;

/// `(bubbles, cancelable)` for the events the page fires on its own.
fn event_flags(event_type: &str) -> (bool, bool) {
    match event_type {
        "focus" | "blur" => (false, false),
        "input" | "focusin" | "focusout" => (true, false),
        _ => (true, true),
    }
}

impl Page {
    pub(crate) fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> Result<EventState> {
        let (bubbles, cancelable) = event_flags(event_type);
        self.dispatch_event_with_options(target, event_type, bubbles, cancelable)
    }

    /// Runs capture listeners from the root down, then the target's own
    /// listeners, then (when `bubbles`) bubble listeners back up.
    pub(crate) fn dispatch_event_with_options(
        &mut self,
        target: NodeId,
        event_type: &str,
        bubbles: bool,
        cancelable: bool,
    ) -> Result<EventState> {
        let mut ancestors = Vec::new();
        let mut cursor = self.dom.parent(target);
        while let Some(node) = cursor {
            ancestors.push(node);
            cursor = self.dom.parent(node);
        }

        let mut route: Vec<(NodeId, bool)> = ancestors.iter().rev().map(|node| (*node, true)).collect();
        route.push((target, true));
        route.push((target, false));
        if bubbles {
            route.extend(ancestors.iter().map(|node| (*node, false)));
        }

        let mut event = EventState::new(target, cancelable);
        for (node, capture) in route {
            event.current_target = node;
            for listener in self.listeners.get(node, event_type, capture) {
                if self.tracing_events() {
                    let line = format!(
                        "[event] {event_type} target={} current={} capture={capture} behavior={:?}",
                        self.trace_node_label(target),
                        self.trace_node_label(node),
                        listener.behavior
                    );
                    self.trace_line(line);
                }
                self.run_behavior(listener.behavior, &mut event)?;
            }
        }

        if self.tracing_events() {
            let line = format!(
                "[event] done {event_type} target={} default_prevented={}",
                self.trace_node_label(target),
                event.default_prevented
            );
            self.trace_line(line);
        }
        Ok(event)
    }

    /// Moves focus to `node`, blurring the previous holder first. Hidden
    /// inputs and disabled controls never take focus.
    pub(crate) fn focus_node(&mut self, node: NodeId) -> Result<()> {
        let hidden = self
            .dom
            .attr(node, "type")
            .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden"))
            && self.dom.is_tag(node, "input");
        if hidden || self.dom.disabled(node) || self.active_element == Some(node) {
            return Ok(());
        }

        if let Some(previous) = self.active_element {
            self.blur_node(previous)?;
        }
        self.active_element = Some(node);
        for event_type in ["focusin", "focus"] {
            self.dispatch_event(node, event_type)?;
        }
        Ok(())
    }

    pub(crate) fn blur_node(&mut self, node: NodeId) -> Result<()> {
        if self.active_element != Some(node) {
            return Ok(());
        }
        for event_type in ["focusout", "blur"] {
            self.dispatch_event(node, event_type)?;
        }
        // A blur listener may already have moved focus on.
        if self.active_element == Some(node) {
            self.active_element = None;
        }
        Ok(())
    }

    fn tracing_events(&self) -> bool {
        self.trace_state.enabled && self.trace_state.events
    }

    pub(crate) fn trace_timer_line(&mut self, line: String) {
        if self.trace_state.enabled && self.trace_state.timers {
            self.trace_line(line);
        }
    }

    /// Appends to the bounded trace buffer and mirrors the line to `log`.
    pub(crate) fn trace_line(&mut self, line: String) {
        if !self.trace_state.enabled {
            return;
        }
        log::debug!("{line}");
        if self.trace_state.logs.len() >= self.trace_state.log_limit {
            self.trace_state.logs.pop_front();
        }
        self.trace_state.logs.push_back(line);
    }

    pub(crate) fn trace_node_label(&self, node: NodeId) -> String {
        match self.dom.attr(node, "id").filter(|id| !id.is_empty()) {
            Some(id) => format!("#{id}"),
            None => self
                .dom
                .tag_name(node)
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| format!("node-{}", node.0)),
        }
    }
}
