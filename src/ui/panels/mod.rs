pub mod dashboard;
pub mod dialogs;
pub mod filter_bar;
pub mod popover;
pub mod products;
pub mod settings;
pub mod table;
pub mod top;
