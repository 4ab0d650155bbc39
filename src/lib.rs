pub mod app;
pub mod cli;
pub mod output;
pub mod regex;
