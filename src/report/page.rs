//! The page that compares a month's spending to its budget.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    app_state::{SharedBudgetStore, SharedExpenseLedger},
    endpoints,
    html::{
        BADGE_NEUTRAL_STYLE, BADGE_OK_STYLE, BADGE_OVER_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, link,
    },
    navigation::NavBar,
    report::{BudgetStatus, CategoryReport, Report, compute_report},
    timezone::month_or_current,
};

/// The state needed for the report page.
#[derive(Debug, Clone)]
pub struct ReportState {
    pub budget_store: SharedBudgetStore,
    pub expense_ledger: SharedExpenseLedger,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_store: state.budget_store.clone(),
            expense_ledger: state.expense_ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the report page.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// The month to report on as `YYYY-MM`, defaults to the current month.
    pub month: Option<String>,
    /// Set after a successful form submission, either "budget" or "expense".
    pub saved: Option<String>,
}

/// Render the report for the requested month.
pub async fn get_report_page(
    State(state): State<ReportState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, Error> {
    let month = month_or_current(query.month.as_deref(), &state.local_timezone)?;

    let budget_store = state
        .budget_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire budget store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;
    let expense_ledger = state
        .expense_ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire expense ledger lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let report = compute_report(month, &*budget_store, &*expense_ledger)
        .inspect_err(|error| tracing::error!("could not compute report for {month}: {error}"))?;

    drop(expense_ledger);
    drop(budget_store);

    let alert = query.saved.as_deref().and_then(saved_alert);

    Ok(report_view(&report, alert).into_response())
}

fn saved_alert(saved: &str) -> Option<Alert> {
    let message = match saved {
        "budget" => "Budget saved",
        "expense" => "Expense recorded",
        _ => return None,
    };

    Some(Alert::Success {
        message: message.to_owned(),
        details: String::new(),
    })
}

fn status_badge(category: &CategoryReport) -> Markup {
    let (style, text) = match category.status() {
        BudgetStatus::WithinBudget => (BADGE_OK_STYLE, "Within budget"),
        BudgetStatus::OverBudget => (BADGE_OVER_STYLE, "Over budget"),
        BudgetStatus::NoBudget => (BADGE_NEUTRAL_STYLE, "No budget set"),
    };

    html! {
        span class=(style) data-status { (text) }
    }
}

fn month_picker(report: &Report) -> Markup {
    html! {
        div class="flex items-center justify-between w-full mb-4 gap-4"
        {
            @if let Some(previous) = report.month.previous() {
                a href=(endpoints::with_month(endpoints::REPORT, previous)) class=(LINK_STYLE) rel="prev"
                {
                    "« " (previous.label())
                }
            } @else {
                span {}
            }

            form method="get" action=(endpoints::REPORT) class="flex items-center gap-2"
            {
                input
                    type="month"
                    name="month"
                    value=(report.month)
                    aria-label="Month"
                    class="p-1 rounded text-sm text-gray-900 bg-gray-50 dark:bg-gray-700 dark:text-white";

                button type="submit" class=(LINK_STYLE) { "Go" }
            }

            @if let Some(next) = report.month.next() {
                a href=(endpoints::with_month(endpoints::REPORT, next)) class=(LINK_STYLE) rel="next"
                {
                    (next.label()) " »"
                }
            } @else {
                span {}
            }
        }
    }
}

fn category_table(report: &Report) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow w-full"
        {
            table id="categories" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Limit" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Spent" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Remaining" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                    }
                }

                tbody
                {
                    @for category in &report.categories {
                        tr class=(TABLE_ROW_STYLE) data-category=(category.category)
                        {
                            th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
                            {
                                (category.category)
                            }
                            td class=(TABLE_CELL_STYLE)
                            {
                                @match category.limit {
                                    Some(limit) => (format_currency(limit.value())),
                                    None => "-",
                                }
                            }
                            td class=(TABLE_CELL_STYLE) { (format_currency(category.spent.value())) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                @match category.remaining {
                                    Some(remaining) => (format_currency(remaining)),
                                    None => "-",
                                }
                            }
                            td class=(TABLE_CELL_STYLE) { (status_badge(category)) }
                        }
                    }
                }

                tfoot
                {
                    tr class="font-semibold text-gray-900 dark:text-white"
                    {
                        th scope="row" class=(TABLE_CELL_STYLE) { "Total" }
                        td class=(TABLE_CELL_STYLE) data-total="limit" { (format_currency(report.total_limit.value())) }
                        td class=(TABLE_CELL_STYLE) data-total="spent" { (format_currency(report.total_spent.value())) }
                        td class=(TABLE_CELL_STYLE) data-total="remaining" { (format_currency(report.total_remaining())) }
                        td class=(TABLE_CELL_STYLE)
                        {
                            @if report.over_budget_count() > 0 {
                                (report.over_budget_count()) " over budget"
                            }
                        }
                    }
                }
            }
        }
    }
}

fn expense_table(report: &Report) -> Markup {
    html! {
        h2 class="text-lg font-semibold mt-8 mb-4 self-start" { "Expenses" }

        @if report.expenses.is_empty() {
            p class="self-start" { "No expenses recorded for " (report.month.label()) "." }
        } @else {
            div class="overflow-x-auto rounded-lg shadow w-full"
            {
                table id="expenses" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for expense in &report.expenses {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (expense.date) }
                                td class=(TABLE_CELL_STYLE) { (expense.category) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount.value())) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn report_view(report: &Report, alert: Option<Alert>) -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORT).into_html();
    let set_budget_link = endpoints::with_month(endpoints::SET_BUDGET, report.month);
    let title = format!("Report for {}", report.month.label());

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl flex flex-col items-center"
            {
                h1 class="text-xl font-bold mb-4 self-start" { (title) }

                @if let Some(alert) = alert {
                    (alert.into_html())
                }

                (month_picker(report))

                @if report.is_empty() {
                    p class="self-start"
                    {
                        "There is no budget or spending for " (report.month.label()) " yet. "
                        (link(&set_budget_link, "Set a budget"))
                        " or "
                        (link(endpoints::ADD_EXPENSE, "add an expense"))
                        "."
                    }
                } @else {
                    (category_table(report))

                    p class="self-start mt-2 text-sm"
                    {
                        (link(&set_budget_link, "Edit this month's budget"))
                    }

                    (expense_table(report))
                }
            }
        }
    };

    base(&title, &[], &content)
}
