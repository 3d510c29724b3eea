use super::*;

const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;

impl Page {
    pub(super) fn validate_submit(&mut self, event: &mut EventState) -> Result<()> {
        let form = event.current_target;
        let submit_button = self.dom.query_selector_from(form, SUBMIT_BUTTON)?;

        if let Some(button) = submit_button {
            self.dom.class_add(button, "btn-loading")?;
            self.dom.set_disabled(button, true)?;
            self.schedule_timeout(
                TimerCallback::RevertSubmitButton(button),
                self.config.submit_revert_ms,
            );
        }

        let rules = self.config.rules.clone();
        let mut is_valid = true;
        for field in EmployeeField::ALL {
            let Some(input) = self.dom.query_selector_from(form, field.input_selector())? else {
                continue;
            };
            let raw = self.dom.value(input)?;
            match check_form_field(field, &raw, &rules) {
                Some(issue) => {
                    is_valid = false;
                    self.show_field_error(input, &issue.to_string())?;
                }
                None => self.clear_field_error(input)?,
            }
        }

        if !is_valid {
            event.prevent_default();
            if let Some(button) = submit_button {
                self.revert_submit_button(button)?;
            }
            log::debug!(
                "event=form_rejected module=form_validation form={}",
                self.trace_node_label(form)
            );
        }
        Ok(())
    }

    pub(crate) fn revert_submit_button(&mut self, button: NodeId) -> Result<()> {
        self.dom.class_remove(button, "btn-loading")?;
        self.dom.set_disabled(button, false)
    }

    fn show_field_error(&mut self, input: NodeId, message: &str) -> Result<()> {
        self.dom.class_add(input, "is-invalid")?;

        if let Some(parent) = self.dom.parent(input) {
            if let Some(existing) = self.dom.query_selector_from(parent, ".invalid-feedback")? {
                self.dom.remove_node(existing)?;
            }
            let feedback = self.dom.create_detached_element("div");
            self.dom.set_attr(feedback, "class", "invalid-feedback")?;
            self.dom.set_text_content(feedback, message)?;
            self.dom.append_child(parent, feedback)?;
        }

        // Only the first invalid field in the document takes focus.
        if self.dom.query_selector(".is-invalid")? == Some(input) {
            self.focus_node(input)?;
        }
        Ok(())
    }

    fn clear_field_error(&mut self, input: NodeId) -> Result<()> {
        self.dom.class_remove(input, "is-invalid")?;
        if let Some(parent) = self.dom.parent(input) {
            if let Some(existing) = self.dom.query_selector_from(parent, ".invalid-feedback")? {
                self.dom.remove_node(existing)?;
            }
        }
        Ok(())
    }
}
