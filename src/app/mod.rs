// Application layer: wires the greenhouse core to the text front end.

pub mod panel;
