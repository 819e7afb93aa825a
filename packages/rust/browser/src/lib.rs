//! Browser-rendered fetching for pages that only populate their
//! listing grid client-side.
//!
//! [`BrowserProbe`] is the heavyweight fallback strategy: it launches an
//! isolated headless Chrome session per invocation, dismisses the
//! consent dialog when one appears, waits for the listing container,
//! and extracts playlist references from the rendered anchors.

mod probe;
mod session;

pub use probe::BrowserProbe;
pub use session::BrowserSession;
