pub mod form;
pub mod tabs;
