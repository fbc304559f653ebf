//! UI building blocks shared by the pages.

pub mod language_selector;
pub mod member_form;
pub mod member_panel;
pub mod tree_canvas;
