use super::*;

#[test]
fn edit_click_marks_its_row_and_follows_the_link() -> Result<()> {
    let mut page = Page::from_html(EMPLOYEE_LIST_HTML)?;
    page.click("#edit-1")?;

    assert!(page.has_class("#row-1", "editing")?);
    assert!(!page.has_class("#row-2", "editing")?);
    assert_eq!(
        page.take_location_navigations(),
        vec![LocationNavigation {
            kind: LocationNavigationKind::LinkActivation,
            from: "http://localhost/".into(),
            to: "http://localhost/employees/edit/1".into(),
        }]
    );

    // Highlights accumulate; nothing resets them.
    page.click("#edit-2")?;
    assert!(page.has_class("#row-1", "editing")?);
    assert!(page.has_class("#row-2", "editing")?);
    Ok(())
}

#[test]
fn edit_link_outside_a_table_still_navigates() -> Result<()> {
    let mut page = Page::from_html_with_url(
        "http://localhost/employees/list",
        r#"<p><a id="edit" href="/employees/edit/9">Edit</a></p>"#,
    )?;
    assert_eq!(page.listener_count("click"), 1);
    page.click("#edit")?;
    assert_eq!(page.count(".editing")?, 0);
    assert_eq!(
        page.take_location_navigations()[0].to,
        "http://localhost/employees/edit/9"
    );
    Ok(())
}

#[test]
fn salary_blur_renders_two_decimals() -> Result<()> {
    let mut page = Page::from_html(EMPLOYEE_FORM_HTML)?;
    page.focus("#salary")?;
    page.type_text("#salary", "1234.5")?;
    page.blur("#salary")?;
    page.assert_value("#salary", "1234.50")?;

    page.focus("#salary")?;
    page.type_text("#salary", "  42abc")?;
    page.focus("#name")?;
    page.assert_value("#salary", "42.00")?;
    Ok(())
}

#[test]
fn huge_salary_falls_back_to_exponent_form() -> Result<()> {
    let mut page = Page::from_html(EMPLOYEE_FORM_HTML)?;
    page.focus("#salary")?;
    page.type_text("#salary", "1e21")?;
    page.blur("#salary")?;
    page.assert_value("#salary", "1e+21")?;
    Ok(())
}

#[test]
fn unparsable_salary_is_left_alone() -> Result<()> {
    let mut page = Page::from_html(EMPLOYEE_FORM_HTML)?;
    page.focus("#salary")?;
    page.type_text("#salary", "abc")?;
    page.blur("#salary")?;
    page.assert_value("#salary", "abc")?;
    assert!(!page.is_focused("#salary")?);
    Ok(())
}

#[test]
fn blur_without_focus_does_nothing() -> Result<()> {
    let mut page = Page::from_html(EMPLOYEE_FORM_HTML)?;
    page.type_text("#salary", "7")?;
    page.blur("#salary")?;
    page.assert_value("#salary", "7")?;
    Ok(())
}
