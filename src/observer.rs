use std::{error::Error, sync::Arc};

/// Receives the notifications an observable sequence produces: zero or more
/// values, then at most one terminal signal (completion or error).
pub trait Observer {
    type NextFnType;

    fn next(&mut self, _: Self::NextFnType);
    fn complete(&mut self);
    fn error(&mut self, _: Arc<dyn Error + Send + Sync>);
}
