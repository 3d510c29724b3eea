use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Listener {
    pub(crate) capture: bool,
    pub(crate) behavior: Behavior,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: &str, listener: Listener) {
        let listeners = self
            .map
            .entry(node_id)
            .or_default()
            .entry(event.to_string())
            .or_default();
        // Re-adding an identical listener is a no-op, as with addEventListener.
        if !listeners.contains(&listener) {
            listeners.push(listener);
        }
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str, capture: bool) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|listener| listener.capture == capture)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, event: &str) -> usize {
        self.map
            .values()
            .filter_map(|events| events.get(event))
            .map(Vec::len)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    /// Node whose listener is running.
    pub(crate) current_target: NodeId,
    pub(crate) cancelable: bool,
    pub(crate) default_prevented: bool,
}

impl EventState {
    pub(crate) fn new(target: NodeId, cancelable: bool) -> Self {
        Self {
            current_target: target,
            cancelable,
            default_prevented: false,
        }
    }

    pub(crate) fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationNavigationKind {
    /// A link's default action.
    LinkActivation,
    /// Script assigned `location.href`.
    HrefSet,
    /// A form's default submission.
    FormSubmission,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNavigation {
    pub kind: LocationNavigationKind,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub action: String,
    pub method: String,
    pub entries: Vec<(String, String)>,
}

#[derive(Debug, Default)]
pub(crate) struct PlatformMockState {
    pub(crate) confirm_messages: Vec<String>,
    pub(crate) confirm_responses: VecDeque<bool>,
    pub(crate) default_confirm_response: bool,
    pub(crate) location_navigations: Vec<LocationNavigation>,
    pub(crate) form_submissions: Vec<FormSubmission>,
    pub(crate) scroll_requests: Vec<String>,
    pub(crate) console_messages: Vec<String>,
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
        }
    }
}

/// Per-page bookkeeping owned by the enhancements and the toolkit shim.
#[derive(Debug, Default)]
pub(crate) struct EnhancerState {
    pub(crate) search_timers: HashMap<NodeId, i64>,
    pub(crate) tooltips: Vec<NodeId>,
}
