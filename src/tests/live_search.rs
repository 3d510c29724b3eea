use super::*;

const SEARCH_HTML: &str = r#"
    <form id="search-form" action="/employees/search">
      <input id="query" type="search" name="query">
      <button id="search-btn" type="submit">Search</button>
    </form>
"#;

#[test]
fn keystrokes_within_the_window_submit_once() -> Result<()> {
    let mut page = Page::from_html(SEARCH_HTML)?;
    page.type_text("#query", "a")?;
    page.advance_time(100)?;
    page.type_text("#query", "al")?;
    page.advance_time(100)?;
    page.type_text("#query", "ali")?;
    assert_eq!(page.pending_timers().len(), 1);

    page.advance_time_to(699)?;
    assert!(page.take_form_submissions().is_empty());

    page.advance_time_to(700)?;
    let submissions = page.take_form_submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0].entries,
        vec![("query".to_string(), "ali".to_string())]
    );
    assert_eq!(
        page.take_location_navigations(),
        vec![LocationNavigation {
            kind: LocationNavigationKind::FormSubmission,
            from: "http://localhost/".into(),
            to: "http://localhost/employees/search?query=ali".into(),
        }]
    );
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn single_character_query_is_not_submitted() -> Result<()> {
    let mut page = Page::from_html(SEARCH_HTML)?;
    page.type_text("#query", "a")?;
    page.flush()?;
    assert!(page.take_form_submissions().is_empty());
    Ok(())
}

#[test]
fn cleared_query_submits_empty_search() -> Result<()> {
    let mut page = Page::from_html(SEARCH_HTML)?;
    page.type_text("#query", "")?;
    page.advance_time(500)?;
    let submissions = page.take_form_submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0].entries,
        vec![("query".to_string(), String::new())]
    );
    Ok(())
}

#[test]
fn auto_submit_skips_the_submit_handler() -> Result<()> {
    let mut page = Page::from_html(SEARCH_HTML)?;
    page.type_text("#query", "bob")?;
    page.advance_time(500)?;
    assert_eq!(page.take_form_submissions().len(), 1);
    // No submit event, so the button never entered its loading state.
    assert!(!page.is_disabled("#search-btn")?);
    assert!(!page.has_class("#search-btn", "btn-loading")?);
    Ok(())
}

#[test]
fn length_is_measured_in_utf16_units() -> Result<()> {
    let mut page = Page::from_html(SEARCH_HTML)?;
    page.type_text("#query", "é")?;
    page.flush()?;
    assert!(page.take_form_submissions().is_empty());

    page.type_text("#query", "😀")?;
    page.flush()?;
    let submissions = page.take_form_submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        page.take_location_navigations()[0].to,
        "http://localhost/employees/search?query=%F0%9F%98%80"
    );
    Ok(())
}

#[test]
fn only_the_first_query_input_is_debounced() -> Result<()> {
    let html = r#"
        <form action="/a"><input id="first" name="query"></form>
        <form action="/b"><input id="second" name="query"></form>
    "#;
    let mut page = Page::from_html(html)?;
    page.type_text("#second", "zed")?;
    assert!(page.pending_timers().is_empty());
    page.type_text("#first", "zed")?;
    assert_eq!(page.pending_timers().len(), 1);
    Ok(())
}

#[test]
fn query_input_without_form_is_ignored() -> Result<()> {
    let mut page = Page::from_html(r#"<input id="query" name="query">"#)?;
    page.type_text("#query", "alice")?;
    page.flush()?;
    assert!(page.take_form_submissions().is_empty());
    assert!(page.take_location_navigations().is_empty());
    Ok(())
}

#[test]
fn debounce_window_follows_config() -> Result<()> {
    let config = EnhancerConfig {
        search_debounce_ms: 250,
        search_min_chars: 3,
        ..EnhancerConfig::default()
    };
    let mut page = Page::from_html_with_config(DEFAULT_PAGE_URL, SEARCH_HTML, config)?;
    page.type_text("#query", "al")?;
    page.advance_time(250)?;
    assert!(page.take_form_submissions().is_empty());

    page.type_text("#query", "ali")?;
    page.advance_time(249)?;
    assert!(page.take_form_submissions().is_empty());
    page.advance_time(1)?;
    assert_eq!(page.take_form_submissions().len(), 1);
    Ok(())
}
