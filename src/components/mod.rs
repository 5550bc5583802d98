pub(crate) mod item_card;
pub(crate) mod toast;
pub mod ui;
