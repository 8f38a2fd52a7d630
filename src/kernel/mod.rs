pub mod cancel;
pub mod event;
pub mod form;
pub mod notice;
pub mod phase;
pub mod reactor;
pub mod roast;
pub mod scheduler;
pub mod session;
pub mod time;
