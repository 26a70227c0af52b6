pub mod checker;

pub use checker::CheckerScreen;
