//! Budget evaluation and the summary page and API built on top of it.

mod api;
mod evaluation;
mod page;

pub use api::get_summary_api;
pub use evaluation::{
    BudgetReport, BudgetStatus, CategorySummary, compute_summaries, sum_spending_by_category,
};
pub use page::{get_summary_page, limit_status_text};
