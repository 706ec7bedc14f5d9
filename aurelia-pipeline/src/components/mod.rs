pub mod ratio_selector;
pub mod value_selector;
