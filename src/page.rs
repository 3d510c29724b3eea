use super::*;

pub(crate) const DEFAULT_PAGE_URL: &str = "http://localhost/";

/// A loaded employee-management page with its enhancements installed.
///
/// The page owns the document, a virtual clock and the platform surfaces the
/// enhancements talk to (confirm dialogs, location, form submission). Nothing
/// leaves the process: navigations and submissions are recorded for the
/// caller to inspect.
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) timers: TimerQueue,
    pub(crate) platform_mocks: PlatformMockState,
    pub(crate) trace_state: TraceState,
    pub(crate) enhancer: EnhancerState,
    pub(crate) config: EnhancerConfig,
    pub(crate) active_element: Option<NodeId>,
    url: String,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_config(DEFAULT_PAGE_URL, html, EnhancerConfig::default())
    }

    pub fn from_html_with_url(url: &str, html: &str) -> Result<Self> {
        Self::from_html_with_config(url, html, EnhancerConfig::default())
    }

    pub fn from_html_with_config(url: &str, html: &str, config: EnhancerConfig) -> Result<Self> {
        if config.search_min_chars == 0 {
            return Err(Error::Runtime(
                "search_min_chars requires at least 1 character".into(),
            ));
        }
        let dom = stacker::grow(PAGE_STACK_SIZE, || parse_html(html))?;
        let mut page = Self {
            dom,
            listeners: ListenerStore::default(),
            timers: TimerQueue::default(),
            platform_mocks: PlatformMockState::default(),
            trace_state: TraceState::default(),
            enhancer: EnhancerState::default(),
            config,
            active_element: None,
            url: url.to_string(),
        };
        page.install_enhancements()?;
        Ok(page)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace_state.logs).into()
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_state.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace_state.timers = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_state.log_limit = max_entries;
        while self.trace_state.logs.len() > self.trace_state.log_limit {
            self.trace_state.logs.pop_front();
        }
        Ok(())
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.timers.step_limit = max_steps;
        Ok(())
    }

    pub fn enqueue_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.confirm_responses.push_back(accepted);
    }

    pub fn set_default_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.default_confirm_response = accepted;
    }

    pub fn take_confirm_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.confirm_messages)
    }

    pub fn take_location_navigations(&mut self) -> Vec<LocationNavigation> {
        std::mem::take(&mut self.platform_mocks.location_navigations)
    }

    pub fn take_form_submissions(&mut self) -> Vec<FormSubmission> {
        std::mem::take(&mut self.platform_mocks.form_submissions)
    }

    /// Selectors of the in-page targets scrolled into view, oldest first.
    pub fn take_scroll_requests(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.scroll_requests)
    }

    pub fn take_console_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.console_messages)
    }

    /// Number of listeners registered for `event` across the document.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.count(event)
    }

    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }

        let tag = self
            .dom
            .tag_name(target)
            .unwrap_or_default()
            .to_ascii_lowercase();
        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }

        self.dom.set_value(target, text)?;
        self.dispatch_event(target, "input")?;
        Ok(())
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(PAGE_STACK_SIZE, || self.click_node(target))
    }

    fn click_node(&mut self, target: NodeId) -> Result<()> {
        if self.dom.disabled(target) {
            return Ok(());
        }

        let outcome = self.dispatch_event(target, "click")?;
        if outcome.default_prevented {
            return Ok(());
        }

        if let Some(trigger) = self.dom.closest(target, r#"[data-bs-dismiss="alert"]"#)? {
            self.dismiss_alert_from(trigger)?;
            return Ok(());
        }

        // Activation reaches the nearest control, so an icon inside a button submits.
        if let Some(control) = self.dom.closest(target, "button, input")? {
            if is_submit_control(&self.dom, control) {
                if !self.dom.disabled(control) {
                    if let Some(form) = self.dom.find_ancestor_by_tag(control, "form") {
                        self.request_submit(form)?;
                    }
                }
                return Ok(());
            }
        }

        if let Some(link) = self.dom.closest(target, "a[href]")? {
            let href = self.dom.attr(link, "href").unwrap_or_default();
            let to = resolve_url(&self.url, &href);
            self.navigate(LocationNavigationKind::LinkActivation, to);
        }

        Ok(())
    }

    pub fn focus(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.focus_node(target)
    }

    pub fn blur(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.blur_node(target)
    }

    /// Submits the form at (or enclosing) `selector` the way a submit button
    /// would: the `submit` event runs first and may cancel the submission.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let form = if self.dom.is_tag(target, "form") {
            Some(target)
        } else {
            self.dom.find_ancestor_by_tag(target, "form")
        };

        if let Some(form) = form {
            self.request_submit(form)?;
        }
        Ok(())
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, event)?;
        Ok(())
    }

    pub fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.dom.query_selector(selector)?.is_some())
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.dom.query_selector_all(selector)?.len())
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.value(target)
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.attr(target, name))
    }

    pub fn style(&self, selector: &str, property: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.style_get(target, property))
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.class_contains(target, class_name))
    }

    pub fn is_disabled(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.disabled(target))
    }

    pub fn is_focused(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.active_element == Some(target))
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }

    pub(crate) fn request_submit(&mut self, form: NodeId) -> Result<()> {
        let outcome = self.dispatch_event(form, "submit")?;
        if !outcome.default_prevented {
            self.submit_form(form)?;
        }
        Ok(())
    }

    /// Programmatic submission: no `submit` event, no validation.
    pub(crate) fn submit_form(&mut self, form: NodeId) -> Result<()> {
        let entries = self.form_entries(form)?;
        let action = self
            .dom
            .attr(form, "action")
            .filter(|action| !action.trim().is_empty())
            .map(|action| resolve_url(&self.url, action.trim()))
            .unwrap_or_else(|| self.url.clone());
        let method = self
            .dom
            .attr(form, "method")
            .map(|method| method.trim().to_ascii_lowercase())
            .filter(|method| method == "post")
            .unwrap_or_else(|| "get".to_string());

        let to = if method == "get" {
            let base = action.split(['?', '#']).next().unwrap_or_default();
            format!("{base}?{}", encode_form_entries(&entries))
        } else {
            action.clone()
        };

        self.trace_line(format!(
            "[form] submit method={method} action={action} entries={}",
            entries.len()
        ));
        self.platform_mocks.form_submissions.push(FormSubmission {
            action,
            method,
            entries,
        });
        self.navigate(LocationNavigationKind::FormSubmission, to);
        Ok(())
    }

    fn form_entries(&self, form: NodeId) -> Result<Vec<(String, String)>> {
        let mut out = Vec::new();
        for control in self
            .dom
            .query_selector_all_from(form, "input[name], select[name], textarea[name]")?
        {
            if self.dom.disabled(control) {
                continue;
            }
            let name = self.dom.attr(control, "name").unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            if self.dom.is_tag(control, "input") {
                let kind = self
                    .dom
                    .attr(control, "type")
                    .unwrap_or_default()
                    .to_ascii_lowercase();
                if matches!(
                    kind.as_str(),
                    "button" | "submit" | "reset" | "file" | "image"
                ) {
                    continue;
                }
                if (kind == "checkbox" || kind == "radio") && self.dom.attr(control, "checked").is_none()
                {
                    continue;
                }
            }
            out.push((name, self.dom.value(control)?));
        }
        Ok(out)
    }

    pub(crate) fn confirm(&mut self, message: &str) -> bool {
        self.platform_mocks.confirm_messages.push(message.to_string());
        let accepted = self
            .platform_mocks
            .confirm_responses
            .pop_front()
            .unwrap_or(self.platform_mocks.default_confirm_response);
        self.trace_line(format!("[dialog] confirm accepted={accepted}"));
        accepted
    }

    pub(crate) fn navigate(&mut self, kind: LocationNavigationKind, to: String) {
        self.trace_line(format!("[location] {kind:?} from={} to={to}", self.url));
        self.platform_mocks.location_navigations.push(LocationNavigation {
            kind,
            from: self.url.clone(),
            to,
        });
    }

    pub(crate) fn console_log(&mut self, message: &str) {
        log::info!("event=console module=page message={message:?}");
        self.platform_mocks.console_messages.push(message.to_string());
    }
}

fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };
    let kind = element
        .attrs
        .get("type")
        .map(|kind| kind.to_ascii_lowercase());
    if element.is_tag("button") {
        return matches!(kind.as_deref(), None | Some("submit"));
    }
    element.is_tag("input") && matches!(kind.as_deref(), Some("submit") | Some("image"))
}

/// Resolves `href` against the page `base` URL.
pub(crate) fn resolve_url(base: &str, href: &str) -> String {
    let href = href.trim();
    if has_url_scheme(href) {
        return href.to_string();
    }

    let (scheme, rest) = base.split_once("://").unwrap_or(("http", base));
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let origin = format!("{scheme}://{}", &rest[..authority_end]);
    let path_and_query = &rest[authority_end..];
    let without_fragment = base.split('#').next().unwrap_or(base);

    if let Some(network) = href.strip_prefix("//") {
        return format!("{scheme}://{network}");
    }
    if href.starts_with('/') {
        return format!("{origin}{href}");
    }
    if href.is_empty() {
        return without_fragment.to_string();
    }
    if href.starts_with('#') {
        return format!("{without_fragment}{href}");
    }
    let path = path_and_query
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    if href.starts_with('?') {
        return format!("{origin}{path}{href}");
    }
    let dir = match path.rfind('/') {
        Some(pos) => &path[..=pos],
        None => "/",
    };
    format!("{origin}{dir}{href}")
}

fn has_url_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    !scheme.is_empty()
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn encode_form_entries(entries: &[(String, String)]) -> String {
    fn encode(value: &str, out: &mut String) {
        for byte in value.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                    out.push(byte as char)
                }
                b' ' => out.push('+'),
                other => out.push_str(&format!("%{other:02X}")),
            }
        }
    }

    let mut out = String::new();
    for (idx, (name, value)) in entries.iter().enumerate() {
        if idx > 0 {
            out.push('&');
        }
        encode(name, &mut out);
        out.push('=');
        encode(value, &mut out);
    }
    out
}
