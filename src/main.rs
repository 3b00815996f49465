// src/main.rs

//! `sdl-screen-demo`: opens a window, paints a magenta rectangle on black and
//! logs every event until the window is closed.

use anyhow::{Context, Result};
use log::info;
use once_cell::sync::Lazy;
use sdl_screen::config::{Config, LoggingConfig, CONFIG_ENV_VAR};
use sdl_screen::{
    Color, DrawOp, Event, NewWindowOptions, Rectangle, Screen, ScreenError, Window, CONFIG,
};
use std::thread;
use std::time::Duration;

const MAGENTA: Color = Color::rgba8(255, 0, 255, 255);

/// Periodic payload injected from a background thread.
#[derive(Debug)]
struct Tick(u64);

fn paint<A: sdl_screen::native::SdlAdapter>(window: &mut Window<A>) -> Result<(), ScreenError> {
    window.fill(Rectangle::ZERO, Color::BLACK, DrawOp::Src)?;
    window.fill(Rectangle::new(10, 10, 110, 60), MAGENTA, DrawOp::Src)?;
    window.publish()?;
    Ok(())
}

fn app<A: sdl_screen::native::SdlAdapter>(screen: &mut Screen<A>) -> Result<()> {
    let mut window = screen
        .new_window(&NewWindowOptions {
            width: 640,
            height: 480,
        })
        .context("Failed to create window")?;
    paint(&mut window)?;

    let sender = window.sender();
    thread::spawn(move || {
        for n in 1.. {
            thread::sleep(Duration::from_secs(5));
            if sender.send(Tick(n)).is_err() {
                break;
            }
        }
    });

    loop {
        let event = window.next_event()?;
        info!("Event: {:?}", event);
        match event {
            Event::Lifecycle(e) if e.is_dead() => return Ok(()),
            Event::Paint(_) => paint(&mut window)?,
            Event::Custom(custom) => {
                if let Some(Tick(n)) = custom.downcast_ref::<Tick>() {
                    info!("Tick {} from background thread", n);
                }
            }
            _ => {}
        }
    }
}

/// Main entry point for the `sdl-screen-demo` application.
fn main() -> Result<()> {
    // Default filter comes from the config file; RUST_LOG overrides it. This
    // early read only picks the filter; problems are reported below.
    let filter = Config::load_optional(std::env::var_os(CONFIG_ENV_VAR))
        .map(|config| config.logging.filter)
        .unwrap_or_else(|_| LoggingConfig::default().filter);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_micros()
        .init();

    info!("Starting sdl-screen-demo...");
    Lazy::force(&CONFIG);
    sdl_screen::main(|screen| app(screen))??;
    info!("sdl-screen-demo exited cleanly.");
    Ok(())
}
