pub mod admin;
pub mod forms;
pub mod health;
pub mod login;
pub mod register;
pub mod responses;
pub mod validation;

pub use admin::admin_stats;
pub use forms::{add_form, delete_form, update_form};
pub use health::health_check;
pub use login::login;
pub use register::register_account;
pub use responses::{append_response, get_questions, get_responses};
