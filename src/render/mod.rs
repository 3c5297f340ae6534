//! Rendering module - rich text and page markup

pub mod html;
pub mod rich_text;
