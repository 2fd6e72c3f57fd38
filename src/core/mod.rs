pub mod classify;
pub mod custom;
pub mod health;
pub mod merge;
pub mod refresh;
pub mod session;
pub mod simulate;
pub mod source;
