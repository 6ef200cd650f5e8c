pub mod admin_penalties;
pub mod books;
pub mod loans;
pub mod penalties;
pub mod requests;
pub mod search;
