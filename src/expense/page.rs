//! The page and form endpoint for recording an expense.

use std::collections::BTreeSet;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    alert::Alert,
    app_state::{SharedBudgetStore, SharedExpenseLedger},
    category::CategoryName,
    endpoints,
    expense::ExpenseForm,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        base, dollar_input_styles,
    },
    month::MonthKey,
    navigation::NavBar,
    timezone::local_today,
};

/// The state needed for recording expenses.
#[derive(Debug, Clone)]
pub struct AddExpenseState {
    pub budget_store: SharedBudgetStore,
    pub expense_ledger: SharedExpenseLedger,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for AddExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_store: state.budget_store.clone(),
            expense_ledger: state.expense_ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the expense form with today's date filled in.
pub async fn get_add_expense_page(State(state): State<AddExpenseState>) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let suggestions = known_categories(&state, MonthKey::of(today))?;

    let form = ExpenseForm {
        date: today.to_string(),
        ..Default::default()
    };

    Ok(add_expense_view(&form, &suggestions, None).into_response())
}

/// Handle expense form submission, redirects to the report for the expense's month on success.
///
/// Invalid input re-renders the form with the submitted values and an error
/// message, and leaves the ledger untouched.
pub async fn add_expense_endpoint(
    State(state): State<AddExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let expense = match form.to_expense() {
        Ok(expense) => expense,
        Err(Error::InvalidInput(message)) => {
            tracing::info!("Rejected expense submission: {message}");
            let alert = Alert::invalid_input(&message);

            return (
                StatusCode::BAD_REQUEST,
                add_expense_view(&form, &[], Some(alert)),
            )
                .into_response();
        }
        Err(error) => return error.into_response(),
    };

    let month = MonthKey::of(expense.date);

    let mut expense_ledger = match state.expense_ledger.lock() {
        Ok(expense_ledger) => expense_ledger,
        Err(error) => {
            tracing::error!("could not acquire expense ledger lock: {error}");
            return Error::StoreLockError.into_response();
        }
    };

    if let Err(error) = expense_ledger.add_expense(month, expense) {
        tracing::error!("could not record expense for {month}: {error}");
        return error.into_response();
    }

    Redirect::to(&endpoints::with_query(
        endpoints::REPORT,
        &[("month", month.to_string()), ("saved", "expense".to_owned())],
    ))
    .into_response()
}

/// The categories with a limit or an expense in `month`, offered as suggestions.
fn known_categories(state: &AddExpenseState, month: MonthKey) -> Result<Vec<CategoryName>, Error> {
    let budget = state
        .budget_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire budget store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?
        .get_budget(month)?;

    let expenses = state
        .expense_ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire expense ledger lock: {error}"))
        .map_err(|_| Error::StoreLockError)?
        .get_expenses(month)?;

    let categories: BTreeSet<CategoryName> = budget
        .categories()
        .cloned()
        .chain(expenses.into_iter().map(|expense| expense.category))
        .collect();

    Ok(categories.into_iter().collect())
}

fn add_expense_view(form: &ExpenseForm, suggestions: &[CategoryName], alert: Option<Alert>) -> Markup {
    let nav_bar = NavBar::new(endpoints::ADD_EXPENSE).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4 self-start" { "Add Expense" }

            @if let Some(alert) = alert {
                (alert.into_html())
            }

            form
                method="post"
                action=(endpoints::ADD_EXPENSE)
                class="w-full space-y-4 md:space-y-6"
            {
                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    input
                        id="category"
                        type="text"
                        name="category"
                        list="category-suggestions"
                        placeholder="e.g. Food"
                        value=(form.category)
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);

                    datalist id="category-suggestions"
                    {
                        @for category in suggestions {
                            option value=(category) {}
                        }
                    }
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    div class="input-wrapper"
                    {
                        input
                            id="amount"
                            type="number"
                            name="amount"
                            min="0"
                            step="0.01"
                            placeholder="0.00"
                            value=(form.amount)
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        id="date"
                        type="date"
                        name="date"
                        value=(form.date)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
            }
        }
    };

    base("Add Expense", &[dollar_input_styles()], &content)
}
