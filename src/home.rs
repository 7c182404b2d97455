//! The home page: a summary of the current month and links to past months.

use std::collections::BTreeSet;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    app_state::{SharedBudgetStore, SharedExpenseLedger},
    endpoints,
    html::{BADGE_OVER_STYLE, PAGE_CONTAINER_STYLE, base, format_currency, link},
    month::MonthKey,
    navigation::NavBar,
    report::{Report, compute_report},
    timezone::current_month,
};

/// The state needed for the home page.
#[derive(Debug, Clone)]
pub struct HomeState {
    pub budget_store: SharedBudgetStore,
    pub expense_ledger: SharedExpenseLedger,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for HomeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_store: state.budget_store.clone(),
            expense_ledger: state.expense_ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the current month's totals and every month that has a budget or expenses.
pub async fn get_home_page(State(state): State<HomeState>) -> Result<Response, Error> {
    let month = current_month(&state.local_timezone)?;

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

    let report = compute_report(month, &*budget_store, &*expense_ledger)?;

    let months: BTreeSet<MonthKey> = budget_store
        .budgeted_months()?
        .into_iter()
        .chain(expense_ledger.months()?)
        .collect();

    Ok(home_view(&report, &months).into_response())
}

fn home_view(report: &Report, months: &BTreeSet<MonthKey>) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();
    let report_link = endpoints::with_month(endpoints::REPORT, report.month);
    let set_budget_link = endpoints::with_month(endpoints::SET_BUDGET, report.month);

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md space-y-6"
            {
                section id="current-month"
                {
                    h1 class="text-xl font-bold mb-4" { (report.month.label()) }

                    @if report.is_empty() {
                        p
                        {
                            "Nothing recorded yet this month. "
                            (link(&set_budget_link, "Set a budget"))
                            " or "
                            (link(endpoints::ADD_EXPENSE, "add an expense"))
                            "."
                        }
                    } @else {
                        dl class="grid grid-cols-2 gap-2"
                        {
                            dt { "Budget" }
                            dd data-total="limit" { (format_currency(report.total_limit.value())) }
                            dt { "Spent" }
                            dd data-total="spent" { (format_currency(report.total_spent.value())) }
                            dt { "Remaining" }
                            dd data-total="remaining" { (format_currency(report.total_remaining())) }
                        }

                        @if report.over_budget_count() > 0 {
                            p class="mt-2"
                            {
                                span class=(BADGE_OVER_STYLE)
                                {
                                    (report.over_budget_count()) " over budget"
                                }
                            }
                        }

                        p class="mt-4" { (link(&report_link, "See the full report")) }
                    }
                }

                @if !months.is_empty() {
                    section id="months"
                    {
                        h2 class="text-lg font-semibold mb-2" { "Months" }

                        ul class="list-disc list-inside"
                        {
                            @for month in months.iter().rev() {
                                li
                                {
                                    (link(&endpoints::with_month(endpoints::REPORT, *month), &month.label()))
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Home", &[], &content)
}
