//! Inbound adapters driving the client from presentation code.

pub mod hooks;
