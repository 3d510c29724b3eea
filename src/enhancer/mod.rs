//! Progressive enhancements installed on every page load.
//!
//! Each enhancement wires one [`Behavior`] onto the matching elements. The
//! listener store keeps the behavior tag, and [`Page::run_behavior`] routes a
//! dispatched event back to the enhancement that owns it.

use super::*;

mod alerts;
mod anchors;
mod delete_confirm;
mod form_validation;
mod live_search;
mod row_highlight;
mod salary_format;

#[cfg(test)]
pub(crate) use delete_confirm::delete_confirmation_message;

pub(crate) const LOADED_MESSAGE: &str = "Employee Management System loaded";
pub(crate) const READY_MESSAGE: &str = "✅ Employee Management System initialized successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Behavior {
    ValidateSubmit,
    DebounceSearch,
    ConfirmDelete,
    HighlightEditRow,
    FormatSalary,
    SmoothScroll,
}

impl Page {
    pub(crate) fn install_enhancements(&mut self) -> Result<()> {
        self.console_log(LOADED_MESSAGE);

        let alerts = self.schedule_alert_dismissal()?;
        let forms = self.wire(Behavior::ValidateSubmit, "form", "submit")?;
        let search_inputs = self.wire_search_input()?;
        let delete_links = self.wire(Behavior::ConfirmDelete, r#"a[onclick*="confirm"]"#, "click")?;
        let edit_links = self.wire(Behavior::HighlightEditRow, r#"a[href*="/edit/"]"#, "click")?;
        let salary_inputs = self.wire(Behavior::FormatSalary, r#"input[name="salary"]"#, "blur")?;
        self.animate_success_alert()?;
        let tooltips = self.init_tooltips()?;
        let anchors = self.wire(Behavior::SmoothScroll, r##"a[href^="#"]"##, "click")?;

        log::info!(
            "event=page_enhance module=enhancer status=ok alerts={alerts} forms={forms} search_inputs={search_inputs} delete_links={delete_links} edit_links={edit_links} salary_inputs={salary_inputs} tooltips={tooltips} anchors={anchors}"
        );
        self.console_log(READY_MESSAGE);
        Ok(())
    }

    /// Attaches `behavior` as a bubbling `event` listener on every element
    /// matching `selector`, returning how many were wired.
    fn wire(&mut self, behavior: Behavior, selector: &str, event: &str) -> Result<usize> {
        let targets = self.dom.query_selector_all(selector)?;
        for target in &targets {
            self.listeners.add(
                *target,
                event,
                Listener {
                    capture: false,
                    behavior,
                },
            );
        }
        Ok(targets.len())
    }

    fn wire_search_input(&mut self) -> Result<usize> {
        let Some(input) = self.dom.query_selector(r#"input[name="query"]"#)? else {
            return Ok(0);
        };
        self.listeners.add(
            input,
            "input",
            Listener {
                capture: false,
                behavior: Behavior::DebounceSearch,
            },
        );
        Ok(1)
    }

    fn init_tooltips(&mut self) -> Result<usize> {
        let targets = self.dom.query_selector_all(r#"[data-bs-toggle="tooltip"]"#)?;
        for target in &targets {
            self.register_tooltip(*target);
        }
        Ok(targets.len())
    }

    pub(crate) fn run_behavior(&mut self, behavior: Behavior, event: &mut EventState) -> Result<()> {
        match behavior {
            Behavior::ValidateSubmit => self.validate_submit(event),
            Behavior::DebounceSearch => self.debounce_search(event),
            Behavior::ConfirmDelete => self.confirm_delete(event),
            Behavior::HighlightEditRow => self.highlight_edit_row(event),
            Behavior::FormatSalary => self.format_salary(event),
            Behavior::SmoothScroll => self.smooth_scroll(event),
        }
    }
}
