use super::*;

const FALLBACK_EMPLOYEE_NAME: &str = "this employee";

pub(crate) fn delete_confirmation_message(employee_name: &str) -> String {
    format!(
        "⚠️ DELETE CONFIRMATION\n\n\
         Are you sure you want to delete employee \"{employee_name}\"?\n\n\
         This action cannot be undone and will permanently remove:\n\
         • Employee record\n\
         • All associated data\n\n\
         Click OK to proceed or Cancel to abort."
    )
}

impl Page {
    pub(super) fn confirm_delete(&mut self, event: &mut EventState) -> Result<()> {
        event.prevent_default();
        let link = event.current_target;

        let employee_name = self.employee_name_for(link)?;
        let accepted = self.confirm(&delete_confirmation_message(&employee_name));
        log::info!(
            "event=delete_confirm module=delete_confirm accepted={accepted} employee={employee_name:?}"
        );
        if !accepted {
            return Ok(());
        }

        if let Some(href) = self.dom.attr(link, "href") {
            let to = resolve_url(self.url(), &href);
            self.navigate(LocationNavigationKind::HrefSet, to);
        }
        Ok(())
    }

    /// Raw text of the row's second cell, preferring its `span`. The
    /// fallback only covers links with no such cell.
    fn employee_name_for(&self, link: NodeId) -> Result<String> {
        let Some(row) = self.dom.closest(link, "tr")? else {
            return Ok(FALLBACK_EMPLOYEE_NAME.to_string());
        };
        let cell = match self.dom.query_selector_from(row, "td:nth-child(2) span")? {
            Some(span) => Some(span),
            None => self.dom.query_selector_from(row, "td:nth-child(2)")?,
        };
        Ok(cell
            .map(|node| self.dom.text_content(node))
            .unwrap_or_else(|| FALLBACK_EMPLOYEE_NAME.to_string()))
    }
}
