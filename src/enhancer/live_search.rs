use super::*;

impl Page {
    /// Restarts the debounce window for the search input.
    pub(super) fn debounce_search(&mut self, event: &mut EventState) -> Result<()> {
        let input = event.current_target;
        if let Some(pending) = self.enhancer.search_timers.remove(&input) {
            self.clear_timer(pending);
        }
        let timer_id = self.schedule_timeout(
            TimerCallback::SubmitSearch(input),
            self.config.search_debounce_ms,
        );
        self.enhancer.search_timers.insert(input, timer_id);
        Ok(())
    }

    pub(crate) fn submit_search(&mut self, input: NodeId) -> Result<()> {
        self.enhancer.search_timers.remove(&input);

        let query = self.dom.value(input)?;
        let length = utf16_len(&query);
        if length != 0 && length < self.config.search_min_chars {
            log::debug!("event=search_skipped module=live_search length={length}");
            return Ok(());
        }

        let Some(form) = self.dom.find_ancestor_by_tag(input, "form") else {
            return Ok(());
        };
        log::debug!("event=search_submit module=live_search length={length}");
        self.submit_form(form)
    }
}
