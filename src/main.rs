mod app;
mod audio;
mod catalog;
mod config;
mod runtime;
mod ui;
mod view;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
