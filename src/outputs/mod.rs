pub mod console;
pub mod presenter;
pub mod text;
