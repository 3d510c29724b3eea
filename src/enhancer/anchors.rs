use super::*;

impl Page {
    /// In-page links scroll instead of jumping.
    pub(super) fn smooth_scroll(&mut self, event: &mut EventState) -> Result<()> {
        event.prevent_default();
        let Some(href) = self.dom.attr(event.current_target, "href") else {
            return Ok(());
        };

        // A bare `#` or other non-selector fragment has no target.
        let target = match self.dom.query_selector(&href) {
            Ok(target) => target,
            Err(err) => {
                log::debug!("event=scroll_skipped module=anchors href={href:?} error={err}");
                None
            }
        };
        if target.is_some() {
            self.trace_line(format!("[scroll] smooth target={href}"));
            self.platform_mocks.scroll_requests.push(href);
        }
        Ok(())
    }
}
