pub mod autocomplete;
pub mod ui;

pub use autocomplete::AutocompleteField;
