use super::*;

impl Page {
    pub(super) fn highlight_edit_row(&mut self, event: &mut EventState) -> Result<()> {
        if let Some(row) = self.dom.closest(event.current_target, "tr")? {
            self.dom.class_add(row, "editing")?;
        }
        Ok(())
    }
}
