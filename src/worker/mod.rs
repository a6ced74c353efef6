//! Background worker for preview asset loading.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: request processing on the worker thread

pub mod handler;
pub mod messages;

pub use handler::CarpickerWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
