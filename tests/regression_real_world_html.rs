use employee_enhancer::{LocationNavigationKind, Page, Result};

// Index page as rendered by the server after "User created successfully".
const INDEX_AFTER_CREATE_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Employee Management System</title>
  <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css" rel="stylesheet">
  <style>.editing { background: #fff3cd; } .btn-loading { opacity: .6; }</style>
</head>
<body>
<nav class="navbar navbar-dark bg-primary">
  <a class="navbar-brand" href="/"><i class="bi bi-people-fill"></i> Employee Management</a>
  <a class="nav-link" href="#employee-table" id="jump-table">Employees</a>
</nav>
<div class="container mt-4">
  <div class="alert alert-success alert-dismissible fade show" role="alert" id="success-alert">
    <i class="bi bi-check-circle-fill me-2"></i>User created successfully
    <button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>
  </div>

  <div class="card mb-4">
    <div class="card-header">Add New Employee</div>
    <div class="card-body">
      <form action="/add" method="post" id="employee-form" novalidate>
        <div class="row">
          <div class="col-md-4 mb-3">
            <label for="name" class="form-label">Name</label>
            <input type="text" class="form-control" id="name" name="name" value="">
          </div>
          <div class="col-md-4 mb-3">
            <label for="age" class="form-label">Age</label>
            <input type="number" class="form-control" id="age" name="age" value="">
          </div>
          <div class="col-md-4 mb-3">
            <label for="salary" class="form-label">Salary</label>
            <input type="number" class="form-control" id="salary" name="salary" step="0.01" value="">
          </div>
        </div>
        <button type="submit" class="btn btn-primary" id="submit-employee">
          <i class="bi bi-plus-circle"></i> Add Employee
        </button>
      </form>
    </div>
  </div>

  <form action="/search" method="get" class="d-flex mb-3" id="search-form">
    <input class="form-control me-2" type="search" name="query" id="search-query" placeholder="Search by name" value="">
    <button class="btn btn-outline-primary" type="submit" id="search-submit" data-bs-toggle="tooltip" title="Search">
      <i class="bi bi-search"></i>
    </button>
  </form>

  <table class="table table-hover" id="employee-table">
    <thead>
      <tr><th>ID</th><th>Name</th><th>Age</th><th>Salary</th><th>Actions</th></tr>
    </thead>
    <tbody>
      <tr id="employee-1">
        <td>1</td>
        <td><i class="bi bi-person-circle me-2"></i><span>Nguyen Van An</span></td>
        <td>28</td>
        <td>$45,000</td>
        <td>
          <a href="/edit/1" class="btn btn-sm btn-warning" id="edit-1" data-bs-toggle="tooltip" title="Edit employee"><i class="bi bi-pencil"></i></a>
          <a href="/delete/1" class="btn btn-sm btn-danger" id="delete-1" data-bs-toggle="tooltip" title="Delete employee"
             onclick="return confirm('Are you sure you want to delete this employee?')"><i class="bi bi-trash"></i></a>
        </td>
      </tr>
      <tr id="employee-2">
        <td>2</td>
        <td><i class="bi bi-person-circle me-2"></i><span>O&#39;Brien &amp; Sons</span></td>
        <td>35</td>
        <td>$72,500</td>
        <td>
          <a href="/edit/2" class="btn btn-sm btn-warning" id="edit-2"><i class="bi bi-pencil"></i></a>
          <a href="/delete/2" class="btn btn-sm btn-danger" id="delete-2"
             onclick="return confirm('Are you sure you want to delete this employee?')"><i class="bi bi-trash"></i></a>
        </td>
      </tr>
    </tbody>
  </table>
  <a href="/sort-by-salary" id="sort-link">Sort by salary</a>
</div>
<script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js"></script>
<script src="/js/app.js"></script>
</body>
</html>
"##;

#[test]
fn rendered_index_page_wires_every_enhancement() -> Result<()> {
    let mut page = Page::from_html(INDEX_AFTER_CREATE_HTML)?;
    assert_eq!(page.tooltip_count(), 3);
    assert_eq!(
        page.style("#success-alert", "animation")?.as_deref(),
        Some("fadeInUp 0.5s ease-out")
    );
    assert_eq!(page.take_console_messages().len(), 2);

    page.advance_time(5150)?;
    assert!(!page.exists("#success-alert")?);
    Ok(())
}

#[test]
fn clicking_an_icon_inside_a_delete_link_still_confirms() -> Result<()> {
    let mut page = Page::from_html(INDEX_AFTER_CREATE_HTML)?;
    page.enqueue_confirm_response(true);
    page.click("#delete-2 i")?;

    let messages = page.take_confirm_messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("delete employee \"O'Brien & Sons\"?"));
    let navigations = page.take_location_navigations();
    assert_eq!(navigations.len(), 1);
    assert_eq!(navigations[0].kind, LocationNavigationKind::HrefSet);
    assert_eq!(navigations[0].to, "http://localhost/delete/2");
    Ok(())
}

#[test]
fn edit_icon_click_highlights_row_and_opens_editor() -> Result<()> {
    let mut page = Page::from_html(INDEX_AFTER_CREATE_HTML)?;
    page.click("#edit-1 i")?;
    assert!(page.has_class("#employee-1", "editing")?);
    let navigations = page.take_location_navigations();
    assert_eq!(navigations[0].kind, LocationNavigationKind::LinkActivation);
    assert_eq!(navigations[0].to, "http://localhost/edit/1");
    Ok(())
}

#[test]
fn add_employee_round_trip() -> Result<()> {
    let mut page = Page::from_html(INDEX_AFTER_CREATE_HTML)?;

    page.type_text("#name", "T")?;
    page.type_text("#age", "16")?;
    page.focus("#salary")?;
    page.type_text("#salary", "800")?;
    page.click("#submit-employee i")?;
    assert!(page.is_focused("#name")?);
    // Focus moved to the first invalid field, so the salary blur reformatted it.
    page.assert_value("#salary", "800.00")?;
    assert_eq!(page.count("#employee-form .invalid-feedback")?, 3);
    assert!(page.take_form_submissions().is_empty());

    page.type_text("#name", "Tran Thi Binh")?;
    page.type_text("#age", "29")?;
    page.type_text("#salary", "58000")?;
    page.click("#submit-employee")?;
    assert_eq!(page.count("#employee-form .is-invalid")?, 0);

    let submissions = page.take_form_submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].action, "http://localhost/add");
    assert_eq!(submissions[0].method, "post");
    assert!(page.is_disabled("#submit-employee")?);
    page.advance_time(2000)?;
    assert!(!page.is_disabled("#submit-employee")?);
    Ok(())
}

#[test]
fn search_box_submits_to_search_route() -> Result<()> {
    let mut page = Page::from_html_with_url("http://localhost:8080/", INDEX_AFTER_CREATE_HTML)?;
    page.type_text("#search-query", "ng")?;
    page.advance_time(300)?;
    page.type_text("#search-query", "nguyen van")?;
    page.advance_time(500)?;

    let navigations = page.take_location_navigations();
    assert_eq!(navigations.len(), 1);
    assert_eq!(
        navigations[0].to,
        "http://localhost:8080/search?query=nguyen+van"
    );
    Ok(())
}

#[test]
fn navbar_anchor_scrolls_to_table() -> Result<()> {
    let mut page = Page::from_html(INDEX_AFTER_CREATE_HTML)?;
    page.click("#jump-table")?;
    assert_eq!(page.take_scroll_requests(), vec!["#employee-table".to_string()]);
    assert!(page.take_location_navigations().is_empty());

    page.click("#sort-link")?;
    assert_eq!(
        page.take_location_navigations()[0].to,
        "http://localhost/sort-by-salary"
    );
    Ok(())
}
