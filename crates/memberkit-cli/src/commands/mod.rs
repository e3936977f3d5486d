pub mod edit;
pub mod output;
pub mod show;
pub mod token;
