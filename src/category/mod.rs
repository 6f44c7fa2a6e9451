//! Categories that expenses are tallied under, with per-category spending
//! limits.

mod api;
mod budget_page;
mod create;
mod db;
mod domain;
mod set_limit;

pub use api::get_limits_api;
pub use budget_page::get_budget_page;
pub use create::{create_category_endpoint, get_new_category_page};
pub use db::{
    DEFAULT_CATEGORIES, create_category, create_category_table, get_all_categories, get_category,
    get_category_by_name, seed_default_categories, set_spending_limit,
};
pub use domain::{Category, CategoryId, CategoryName};
pub use set_limit::set_limit_endpoint;
