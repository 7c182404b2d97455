use scraper::{ElementRef, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &scraper::Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_form_action(form: &ElementRef<'_>, endpoint: &str) {
    let method = form.value().attr("method").unwrap_or_default();
    let action = form
        .value()
        .attr("action")
        .expect("action attribute missing");

    assert_eq!(method, "post", "want form with method=\"post\", got {method:?}");
    assert_eq!(
        action, endpoint,
        "want form with action=\"{endpoint}\", got {action:?}"
    );
}

fn inputs_named<'a>(form: &ElementRef<'a>, name: &str) -> Vec<ElementRef<'a>> {
    form.select(&Selector::parse("input").unwrap())
        .filter(|input| input.value().attr("name") == Some(name))
        .collect()
}

#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let input = inputs_named(form, name)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("No input found with name \"{name}\" and type \"{type_}\""));

    let input_type = input.value().attr("type").unwrap_or_default();
    assert_eq!(
        input_type, type_,
        "want input with type \"{type_}\", got {input_type:?}"
    );
    assert!(
        input.value().attr("required").is_some(),
        "want input with name {name} to have the required attribute but got none"
    );
}

/// Assert that the form has an input with the given name and type holding `value`.
///
/// Forms with repeated fields may have several inputs with the same name,
/// only one of them needs to match.
#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    let inputs = inputs_named(form, name);
    assert!(!inputs.is_empty(), "No input found with name \"{name}\"");

    let found = inputs.iter().any(|input| {
        input.value().attr("type").unwrap_or_default() == type_
            && input.value().attr("value").unwrap_or_default() == value
    });

    let values = inputs
        .iter()
        .map(|input| input.value().attr("value").unwrap_or_default())
        .collect::<Vec<_>>();
    assert!(
        found,
        "want input with name \"{name}\", type \"{type_}\" and value \"{value}\", got values {values:?}"
    );
}

#[track_caller]
pub(crate) fn assert_required_input(form: &ElementRef<'_>, name: &str) {
    let inputs = inputs_named(form, name);
    assert!(!inputs.is_empty(), "No input found with name \"{name}\"");

    for input in inputs {
        assert!(
            input.value().attr("required").is_some(),
            "want input with name {name} to have the required attribute but got none"
        );
    }
}

pub(crate) fn count_inputs(form: &ElementRef<'_>, name: &str) -> usize {
    inputs_named(form, name).len()
}

#[track_caller]
pub(crate) fn assert_form_submit_button(form: &ElementRef<'_>) {
    let submit_button = form
        .select(&Selector::parse("button").unwrap())
        .next()
        .expect("No button found");

    assert_eq!(
        submit_button.value().attr("type").unwrap_or_default(),
        "submit",
        "want submit button with type=\"submit\""
    );
}
