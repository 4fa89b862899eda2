// Adapters layer: the text front end that stands in for the panel window.

pub mod command;
pub mod terminal;
