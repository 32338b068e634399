// Presentation layer - Terminal input and the page event loop
pub mod console;
pub mod input;
