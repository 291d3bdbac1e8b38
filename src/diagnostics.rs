//! Where setup-time warnings go.
//!
//! The processor takes a [`DiagnosticSink`] so embedders and tests can
//! capture warnings; [`TracingSink`] forwards them to `tracing`.

use std::sync::Mutex;

pub trait DiagnosticSink {
	fn warn(&self, message: &str);
}

/// Emits warnings as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
	fn warn(&self, message: &str) {
		tracing::warn!("{message}");
	}
}

/// Keeps warnings in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
	messages: Mutex<Vec<String>>,
}

impl CollectingSink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Warnings received so far.
	pub fn messages(&self) -> Vec<String> {
		self.messages
			.lock()
			.map(|messages| messages.clone())
			.unwrap_or_default()
	}
}

impl DiagnosticSink for CollectingSink {
	fn warn(&self, message: &str) {
		if let Ok(mut messages) = self.messages.lock() {
			messages.push(message.to_string());
		}
	}
}
