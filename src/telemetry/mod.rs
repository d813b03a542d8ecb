pub mod config;
pub mod ctx;
pub mod ops;

use ctx::LogCtx;

// Factory helpers, one per operation
pub fn whats_new() -> LogCtx<ops::whats_new::WhatsNew> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn versions() -> LogCtx<ops::versions::Versions> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn download() -> LogCtx<ops::download::Download> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn pep() -> LogCtx<ops::pep::Pep> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
