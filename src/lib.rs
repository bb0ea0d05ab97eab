//! Site logic for the blik-studio web studio: locale handling, the
//! first-visit loader gate, scroll and pointer motion, content tables and
//! the contact form. Everything here is platform independent; the browser
//! bindings live in the wasm frontend and the HTTP endpoints in the server.

pub mod contact;
pub mod content;
pub mod gate;
pub mod hscroll;
pub mod i18n;
pub mod motion;
pub mod pointer;
pub mod routes;
pub mod storage;
