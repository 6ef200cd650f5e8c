pub mod library;
pub mod login;

pub use library::LibraryPage;
pub use login::LoginPage;
