//! Reusable UI components shared by pages.

pub mod loading_spinner;
pub mod product_card;
