#![deny(clippy::all)]
#![forbid(unsafe_code)]

use std::env;
use std::time::Instant;

use error_iter::ErrorIter as _;
use log::{error, info};
use pixel_platformer::{load_assets, Config, Controls, World};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

/// Usage: `jumper [SPRITE_SHEET.pcx] [BACKGROUND.pcx]`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();

    // Enable debug mode with `DEBUG=true` environment variable
    let debug = env::var("DEBUG")
        .unwrap_or_else(|_| "false".to_string())
        .parse()
        .unwrap_or(false);

    let mut args = env::args().skip(1);
    let sheet = args
        .next()
        .unwrap_or_else(|| "assets/spritesheet.pcx".to_string());
    let background = args.next();

    let config = Config::default();
    let mut assets = load_assets(&sheet, background.as_deref())?;
    let mut world = World::new(&mut assets, config, debug)?;
    info!("Loaded sprite sheet {}", sheet);

    let window = {
        let size = LogicalSize::new(config.screen_width as f64, config.screen_height as f64);
        WindowBuilder::new()
            .with_title("jumper")
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(&event_loop)?
    };

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(config.screen_width, config.screen_height, surface_texture)?
    };

    let start = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        // Draw the current frame
        if let Event::RedrawRequested(_) = event {
            world.draw(pixels.frame_mut());
            if let Err(err) = pixels.render() {
                log_error("pixels.render", err);
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        // Handle input events
        if input.update(&event) {
            // Close events
            if input.key_pressed(VirtualKeyCode::Escape) || input.close_requested() {
                *control_flow = ControlFlow::Exit;
                return;
            }

            // Keyboard controls
            let controls = Controls {
                left: input.key_held(VirtualKeyCode::Left),
                right: input.key_held(VirtualKeyCode::Right),
                jump: input.key_pressed(VirtualKeyCode::Space),
            };

            // Resize the window
            if let Some(size) = input.window_resized() {
                if let Err(err) = pixels.resize_surface(size.width, size.height) {
                    log_error("pixels.resize_surface", err);
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }

            // Update internal state and request a redraw
            world.update(&controls, start.elapsed().as_millis() as u64);
            window.request_redraw();
        }
    });
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
