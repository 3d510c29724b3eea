use super::*;

impl Page {
    pub(super) fn format_salary(&mut self, event: &mut EventState) -> Result<()> {
        let input = event.current_target;
        let amount = parse_js_parse_float(&self.dom.value(input)?);
        if amount.is_nan() {
            return Ok(());
        }
        self.dom.set_value(input, &number_to_fixed(amount, 2))
    }
}
