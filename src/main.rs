#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod charts;
mod config;
mod content;
mod error;
mod motion;
mod panels;
mod particles;
mod placement;
mod projection;
mod scramble;
mod snowfall;
mod telemetry;
mod tilt;

#[cfg(target_arch = "wasm32")]
mod frame_loop;
#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg(target_arch = "wasm32")]
mod widgets;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
