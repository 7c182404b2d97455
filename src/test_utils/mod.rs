#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod state;

pub(crate) use form::{
    assert_form_action, assert_form_input, assert_form_input_with_value,
    assert_form_submit_button, assert_required_input, count_inputs, must_get_form,
};
pub(crate) use html::{assert_valid_html, get_alert_text, parse_html_document};
pub(crate) use http::{assert_content_type, assert_redirect};
pub(crate) use state::get_test_app_state;
