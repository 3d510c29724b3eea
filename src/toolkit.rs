//! Stand-in for the page's UI toolkit (Bootstrap 5): dismissible alerts and
//! tooltip registration.

use super::*;

impl Page {
    /// Closes an alert the way `bootstrap.Alert#close` does.
    ///
    /// `close.bs.alert` may cancel the close. A `.fade` alert stays in the
    /// document for the fade transition before it is detached.
    pub(crate) fn close_alert(&mut self, alert: NodeId) -> Result<()> {
        if !self.dom.is_connected(alert) {
            return Ok(());
        }

        let close = self.dispatch_event_with_options(alert, "close.bs.alert", true, true)?;
        if close.default_prevented {
            return Ok(());
        }

        self.dom.class_remove(alert, "show")?;
        if self.dom.class_contains(alert, "fade") {
            self.schedule_timeout(TimerCallback::DetachAlert(alert), self.config.alert_fade_ms);
            Ok(())
        } else {
            self.detach_alert(alert)
        }
    }

    pub(crate) fn detach_alert(&mut self, alert: NodeId) -> Result<()> {
        if !self.dom.is_connected(alert) {
            return Ok(());
        }
        if self.active_element.is_some_and(|active| self.is_within(active, alert)) {
            self.active_element = None;
        }
        self.dom.remove_node(alert)?;
        self.dispatch_event_with_options(alert, "closed.bs.alert", true, false)?;
        log::debug!(
            "event=alert_closed module=toolkit alert={}",
            self.trace_node_label(alert)
        );
        Ok(())
    }

    /// Default action of a `[data-bs-dismiss="alert"]` control.
    pub(crate) fn dismiss_alert_from(&mut self, trigger: NodeId) -> Result<()> {
        if let Some(alert) = self.dom.closest(trigger, ".alert")? {
            self.close_alert(alert)?;
        }
        Ok(())
    }

    pub(crate) fn register_tooltip(&mut self, node: NodeId) {
        if !self.enhancer.tooltips.contains(&node) {
            self.enhancer.tooltips.push(node);
        }
    }

    /// Number of elements carrying a toolkit tooltip.
    pub fn tooltip_count(&self) -> usize {
        self.enhancer.tooltips.len()
    }

    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.dom.parent(current);
        }
        false
    }
}
