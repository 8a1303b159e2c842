//! Request execution, outcome classification and bounded-concurrency dispatch.
mod classify;
mod dispatch;
mod executor;
mod progress;
mod spec;


pub use classify::{Classification, ErrorKind, TransportError, TransportFault, classify};
pub use dispatch::{Dispatch, DispatchReport, dispatch};
pub use executor::{HttpExecutor, MAX_BODY_BYTES, RequestExecutor};
pub use progress::{setup_progress_reporter, should_report};
pub use spec::{ClientSettings, RequestSpec};
