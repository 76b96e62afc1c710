mod dispatch;
mod pipeline;
mod support;
