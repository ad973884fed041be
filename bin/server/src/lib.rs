//! FlowBit web server and dashboard.
//!
//! This crate provides the Leptos-based dashboard (folder sidebar and
//! trigger composer) and, with the `ssr` feature, the server that hosts it
//! next to the webhook and run endpoints.

#![allow(non_snake_case)]

pub mod app;
pub mod error;
pub mod pages;

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod server_helpers;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
