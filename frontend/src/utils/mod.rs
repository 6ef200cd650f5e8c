pub mod navigation;
pub mod notice;
pub mod storage;
pub mod time;
pub mod token;
