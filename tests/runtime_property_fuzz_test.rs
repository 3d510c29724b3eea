use employee_enhancer::Page;
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseResult};

const RUNTIME_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/runtime_property_fuzz_test.txt";
const DEFAULT_RUNTIME_PROPTEST_CASES: u32 = 128;

const EMPLOYEE_PAGE_HTML: &str = r#"
<body>
  <div id="flash" class="alert alert-warning alert-dismissible fade show">
    Check the form
    <button id="flash-close" type="button" class="btn-close" data-bs-dismiss="alert"></button>
  </div>
  <form id="employee-form" action="/add" method="post">
    <div id="name-group"><input id="name" name="name"></div>
    <div id="age-group"><input id="age" name="age" type="number"></div>
    <div id="salary-group"><input id="salary" name="salary" type="number"></div>
    <button id="save" type="submit">Save</button>
  </form>
  <form id="search-form" action="/search">
    <input id="query" name="query" type="search">
  </form>
</body>
"#;

const FIELD_GROUPS: [(&str, &str); 3] = [
    ("#name", "#name-group .invalid-feedback"),
    ("#age", "#age-group .invalid-feedback"),
    ("#salary", "#salary-group .invalid-feedback"),
];

#[derive(Clone, Debug)]
enum UiAction {
    TypeName(String),
    TypeAge(String),
    TypeSalary(String),
    TypeQuery(String),
    FocusSalary,
    BlurSalary,
    ClickSave,
    DismissFlash,
    AdvanceTime(i64),
}

fn env_proptest_cases(var_name: &str, default_cases: u32) -> u32 {
    std::env::var(var_name)
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default_cases)
}

fn runtime_proptest_cases() -> u32 {
    std::env::var("EMPLOYEE_ENHANCER_RUNTIME_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or_else(|| {
            env_proptest_cases(
                "EMPLOYEE_ENHANCER_PROPTEST_CASES",
                DEFAULT_RUNTIME_PROPTEST_CASES,
            )
        })
}

fn text_input_strategy() -> BoxedStrategy<String> {
    vec(
        prop_oneof![
            Just('a'),
            Just('Z'),
            Just('é'),
            Just('0'),
            Just('1'),
            Just('5'),
            Just('9'),
            Just('.'),
            Just('-'),
            Just('e'),
            Just(' '),
        ],
        0..=8,
    )
    .prop_map(|chars| chars.into_iter().collect())
    .boxed()
}

fn ui_action_strategy() -> BoxedStrategy<UiAction> {
    prop_oneof![
        3 => text_input_strategy().prop_map(UiAction::TypeName),
        3 => text_input_strategy().prop_map(UiAction::TypeAge),
        3 => text_input_strategy().prop_map(UiAction::TypeSalary),
        2 => text_input_strategy().prop_map(UiAction::TypeQuery),
        1 => Just(UiAction::FocusSalary),
        1 => Just(UiAction::BlurSalary),
        3 => Just(UiAction::ClickSave),
        1 => Just(UiAction::DismissFlash),
        2 => (0i64..=3000).prop_map(UiAction::AdvanceTime),
    ]
    .boxed()
}

fn ui_action_sequence_strategy() -> BoxedStrategy<Vec<UiAction>> {
    vec(ui_action_strategy(), 1..=24).boxed()
}

fn run_action(page: &mut Page, action: &UiAction) -> employee_enhancer::Result<()> {
    match action {
        UiAction::TypeName(value) => page.type_text("#name", value),
        UiAction::TypeAge(value) => page.type_text("#age", value),
        UiAction::TypeSalary(value) => page.type_text("#salary", value),
        UiAction::TypeQuery(value) => page.type_text("#query", value),
        UiAction::FocusSalary => page.focus("#salary"),
        UiAction::BlurSalary => page.blur("#salary"),
        UiAction::ClickSave => page.click("#save"),
        UiAction::DismissFlash => {
            if page.exists("#flash-close")? {
                page.click("#flash-close")
            } else {
                Ok(())
            }
        }
        UiAction::AdvanceTime(delta_ms) => page.advance_time(*delta_ms),
    }
}

fn assert_runtime_sequence_is_stable(actions: &[UiAction]) -> TestCaseResult {
    let mut page = Page::from_html(EMPLOYEE_PAGE_HTML)
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;

    for (step, action) in actions.iter().enumerate() {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            run_action(&mut page, action)
        }));

        match outcome {
            Err(_) => {
                prop_assert!(
                    false,
                    "action panicked at step {step}: {action:?}, actions={actions:?}"
                );
            }
            Ok(Err(error)) => {
                prop_assert!(
                    false,
                    "action returned error at step {step}: {action:?}, error={error:?}, actions={actions:?}"
                );
            }
            Ok(Ok(())) => {}
        }

        for (input, feedback) in FIELD_GROUPS {
            let invalid = page.has_class(input, "is-invalid").unwrap_or(false);
            let messages = page.count(feedback).unwrap_or(usize::MAX);
            prop_assert_eq!(
                messages,
                usize::from(invalid),
                "field {} out of sync after step {}: {:?}",
                input,
                step,
                action
            );
        }
        prop_assert!(
            page.pending_timers()
                .windows(2)
                .all(|pair| (pair[0].due_at, pair[0].order) <= (pair[1].due_at, pair[1].order)),
            "pending timers out of order after step {step}: {action:?}"
        );
    }

    Ok(())
}

fn assert_debounce_submits_once_per_pause(gaps: &[i64]) -> TestCaseResult {
    let mut page = Page::from_html(EMPLOYEE_PAGE_HTML)
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;

    let mut query = String::from("ab");
    for gap in gaps {
        page.type_text("#query", &query)
            .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;
        page.advance_time(*gap)
            .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;
        query.push('c');
    }
    page.type_text("#query", &query)
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;
    page.flush()
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;

    let expected = gaps.iter().filter(|gap| **gap >= 500).count() + 1;
    let submissions = page.take_form_submissions();
    prop_assert_eq!(submissions.len(), expected, "gaps={:?}", gaps);
    let last = submissions.last().map(|submission| submission.entries.clone());
    prop_assert_eq!(last, Some(vec![("query".to_string(), query)]));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: runtime_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(RUNTIME_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn employee_page_actions_keep_feedback_consistent(actions in ui_action_sequence_strategy()) {
        assert_runtime_sequence_is_stable(&actions)?;
    }

    #[test]
    fn search_debounce_submits_once_per_pause(gaps in vec(0i64..=1200, 0..=12)) {
        assert_debounce_submits_once_per_pause(&gaps)?;
    }
}
