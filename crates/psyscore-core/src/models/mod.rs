pub mod answer;
pub mod form;
pub mod patient;
