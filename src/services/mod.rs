pub mod character_ai;
pub mod chatbot;
pub mod persona;
pub mod sanitizer;
pub mod session_manager;
