//! The page and form endpoint for setting a month's budget.

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
// Must use axum_extra's Form since axum's Form cannot collect repeated fields into a Vec.
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    app_state::SharedBudgetStore,
    budget::BudgetForm,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, base, dollar_input_styles,
    },
    month::MonthKey,
    navigation::NavBar,
    timezone::month_or_current,
};

/// The number of empty category rows offered below the existing ones.
const BLANK_ROWS: usize = 3;

/// The state needed for viewing and setting budgets.
#[derive(Debug, Clone)]
pub struct SetBudgetState {
    pub budget_store: SharedBudgetStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for SetBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_store: state.budget_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The month to show, defaults to the current month.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

/// Render the budget form for a month, prefilled with its current budget.
pub async fn get_set_budget_page(
    State(state): State<SetBudgetState>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let month = month_or_current(query.month.as_deref(), &state.local_timezone)?;

    let budget = state
        .budget_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire budget store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?
        .get_budget(month)
        .inspect_err(|error| tracing::error!("could not get budget for {month}: {error}"))?;

    let rows = budget
        .iter()
        .map(|(category, limit)| (category.to_string(), limit.to_string()))
        .collect::<Vec<_>>();

    Ok(set_budget_view(&month.to_string(), &rows, None).into_response())
}

/// Handle budget form submission, redirects to the month's report on success.
///
/// Invalid input re-renders the form with the submitted values and an error
/// message, and leaves the stored budget untouched.
pub async fn set_budget_endpoint(
    State(state): State<SetBudgetState>,
    Form(form): Form<BudgetForm>,
) -> Response {
    let submission = form
        .month
        .parse::<MonthKey>()
        .and_then(|month| Ok((month, form.to_budget()?)));

    let (month, budget) = match submission {
        Ok(submission) => submission,
        Err(Error::InvalidInput(message)) => {
            tracing::info!("Rejected budget submission: {message}");
            let alert = Alert::invalid_input(&message);

            return (
                StatusCode::BAD_REQUEST,
                set_budget_view(&form.month, &form.rows(), Some(alert)),
            )
                .into_response();
        }
        Err(error) => return error.into_response(),
    };

    let mut budget_store = match state.budget_store.lock() {
        Ok(budget_store) => budget_store,
        Err(error) => {
            tracing::error!("could not acquire budget store lock: {error}");
            return Error::StoreLockError.into_response();
        }
    };

    if let Err(error) = budget_store.set_budget(month, budget) {
        tracing::error!("could not save budget for {month}: {error}");
        return error.into_response();
    }

    Redirect::to(&endpoints::with_query(
        endpoints::REPORT,
        &[("month", month.to_string()), ("saved", "budget".to_owned())],
    ))
    .into_response()
}

fn set_budget_view(month: &str, rows: &[(String, String)], alert: Option<Alert>) -> Markup {
    let nav_bar = NavBar::new(endpoints::SET_BUDGET).into_html();

    let filled_rows = rows
        .iter()
        .filter(|(category, limit)| !category.trim().is_empty() || !limit.trim().is_empty());
    let blank_rows = std::iter::repeat_n((String::new(), String::new()), BLANK_ROWS);
    let rows = filled_rows.cloned().chain(blank_rows).collect::<Vec<_>>();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4 self-start" { "Set Budget" }

            p class="mb-4 text-sm text-gray-600 dark:text-gray-400 self-start"
            {
                "Saving replaces every limit for the month. Leave a row blank to skip it."
            }

            @if let Some(alert) = alert {
                (alert.into_html())
            }

            form
                method="post"
                action=(endpoints::SET_BUDGET)
                class="w-full space-y-4 md:space-y-6"
            {
                div
                {
                    label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                    input
                        id="month"
                        type="month"
                        name="month"
                        value=(month)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                @for (index, (category, limit)) in rows.iter().enumerate() {
                    (budget_row(index, category, limit))
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Budget" }
            }

            @if let Ok(month) = month.parse::<MonthKey>() {
                p class="mt-4 text-sm"
                {
                    a href=(endpoints::with_month(endpoints::REPORT, month)) class=(LINK_STYLE)
                    {
                        "View report for " (month.label())
                    }
                }
            }
        }
    };

    base("Set Budget", &[dollar_input_styles()], &content)
}

fn budget_row(index: usize, category: &str, limit: &str) -> Markup {
    let category_id = format!("category-{index}");
    let limit_id = format!("limit-{index}");

    html! {
        div class="grid grid-cols-2 gap-4"
        {
            div
            {
                label for=(category_id) class=(FORM_LABEL_STYLE) { "Category" }

                input
                    id=(category_id)
                    type="text"
                    name="category"
                    placeholder="e.g. Food"
                    value=(category)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for=(limit_id) class=(FORM_LABEL_STYLE) { "Limit" }

                div class="input-wrapper"
                {
                    input
                        id=(limit_id)
                        type="number"
                        name="limit"
                        min="0"
                        step="0.01"
                        placeholder="0.00"
                        value=(limit)
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }
        }
    }
}


#[cfg(test)]
mod set_budget_endpoint_tests {
    use std::fs;

    use axum::{
        extract::{FromRef, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use rust_decimal_macros::dec;

    use crate::{
        budget::{BudgetForm, page::SetBudgetState, set_budget_endpoint},
        month::MonthKey,
        test_utils::{
            assert_form_input_with_value, assert_redirect, assert_valid_html, get_alert_text,
            get_test_app_state, must_get_form, parse_html_document,
        },
    };

    fn form(month: &str, rows: &[(&str, &str)]) -> BudgetForm {
        BudgetForm {
            month: month.to_owned(),
            category: rows.iter().map(|(category, _)| category.to_string()).collect(),
            limit: rows.iter().map(|(_, limit)| limit.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn saves_budget_and_redirects_to_report() {
        let (_dir, app_state) = get_test_app_state();
        let state = SetBudgetState::from_ref(&app_state);

        let response = set_budget_endpoint(
            State(state.clone()),
            Form(form("2024-03", &[("Food", "100"), ("", ""), ("Travel", "50")])),
        )
        .await;

        assert_redirect(&response, "/report?month=2024-03&saved=budget");
        let month: MonthKey = "2024-03".parse().unwrap();
        let budget = state.budget_store.lock().unwrap().get_budget(month).unwrap();
        assert_eq!(budget.len(), 2);
        assert_eq!(budget.limit("Food").unwrap().value(), dec!(100));
        assert_eq!(budget.limit("Travel").unwrap().value(), dec!(50));
    }

    #[tokio::test]
    async fn second_submission_replaces_first() {
        let (_dir, app_state) = get_test_app_state();
        let state = SetBudgetState::from_ref(&app_state);

        set_budget_endpoint(State(state.clone()), Form(form("2024-03", &[("Food", "100")]))).await;
        set_budget_endpoint(State(state.clone()), Form(form("2024-03", &[("Travel", "50")]))).await;

        let month: MonthKey = "2024-03".parse().unwrap();
        let budget = state.budget_store.lock().unwrap().get_budget(month).unwrap();
        assert_eq!(budget.limit("Food"), None);
        assert_eq!(budget.limit("Travel").unwrap().value(), dec!(50));
    }

    #[tokio::test]
    async fn negative_limit_rerenders_form_without_saving() {
        let (dir, app_state) = get_test_app_state();
        let state = SetBudgetState::from_ref(&app_state);

        let response = set_budget_endpoint(
            State(state),
            Form(form("2024-03", &[("Food", "100"), ("Fun", "-5")])),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let alert = get_alert_text(&html).expect("No alert found");
        assert!(alert.contains("Fun"), "got {alert}");
        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "limit", "number", "-5");
        assert!(!dir.path().join("2024-03.json").exists());
    }

    #[tokio::test]
    async fn non_numeric_limit_is_rejected() {
        let (dir, app_state) = get_test_app_state();

        let response = set_budget_endpoint(
            State(SetBudgetState::from_ref(&app_state)),
            Form(form("2024-03", &[("Food", "lots")])),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!dir.path().join("2024-03.json").exists());
    }

    #[tokio::test]
    async fn malformed_month_is_rejected() {
        let (_dir, app_state) = get_test_app_state();

        let response = set_budget_endpoint(
            State(SetBudgetState::from_ref(&app_state)),
            Form(form("March", &[("Food", "100")])),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_document(response).await;
        assert!(get_alert_text(&html).is_some());
    }

    #[tokio::test]
    async fn unwritable_storage_is_a_server_error() {
        let (dir, app_state) = get_test_app_state();
        // A directory where the budget file should be makes the rename fail.
        fs::create_dir(dir.path().join("2024-03.json")).unwrap();

        let response = set_budget_endpoint(
            State(SetBudgetState::from_ref(&app_state)),
            Form(form("2024-03", &[("Food", "100")])),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
