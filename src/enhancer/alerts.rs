use super::*;

impl Page {
    /// Queues a close for every alert rendered with the page.
    pub(super) fn schedule_alert_dismissal(&mut self) -> Result<usize> {
        let alerts = self.dom.query_selector_all(".alert")?;
        for alert in &alerts {
            self.schedule_timeout(TimerCallback::CloseAlert(*alert), self.config.alert_dismiss_ms);
        }
        Ok(alerts.len())
    }

    pub(super) fn animate_success_alert(&mut self) -> Result<()> {
        if let Some(alert) = self.dom.query_selector(".alert-success")? {
            self.dom.style_set(alert, "animation", "fadeInUp 0.5s ease-out")?;
        }
        Ok(())
    }
}
