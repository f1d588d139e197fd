mod app;
mod canvas;
mod dom;
mod download;
mod state;

pub use app::run;
