use sdl2::event::Event;
use sdl2::image::LoadTexture;

mod audio;
mod display;
mod input;
mod narration;
mod screens;
mod text;
mod ui;

use audio::SilentAudio;
use display::DisplayMapping;
use input::menu_action;
use narration::{MessageTable, ScrollTuning};
use screens::menu::{MENU_EXIT, MENU_LOAD_GAME, MENU_NEW_GAME};
use screens::{
    MainMenuScreen, NarrationScreen, ScrollbarArt, StoreEvent, StoreId, StoreScreen, TitleScreen,
};

// Logical game resolution
const GAME_WIDTH: u32 = 640;
const GAME_HEIGHT: u32 = 480;

/// Frames in the logo animation strip
const LOGO_FRAMES: usize = 15;

/// Which screen currently owns input and rendering
enum Phase<'a> {
    Title(TitleScreen<'a>),
    Menu(MainMenuScreen<'a>),
    Narration(NarrationScreen<'a>),
    Store(StoreScreen<'a>),
}

/// Generic texture loading helper
///
/// Loads a texture from the given path with consistent error handling
fn load_texture<'a>(
    texture_creator: &'a sdl2::render::TextureCreator<sdl2::video::WindowContext>,
    path: &str,
) -> Result<sdl2::render::Texture<'a>, String> {
    texture_creator
        .load_texture(path)
        .map_err(|e| format!("Failed to load {}: {}", path, e))
}

/// Calculate the best window scale based on monitor size
fn calculate_window_scale(video_subsystem: &sdl2::VideoSubsystem) -> u32 {
    match video_subsystem.desktop_display_mode(0) {
        Ok(display_mode) => {
            // Leave 10% margin for taskbars/decorations
            let usable_w = (display_mode.w as f32 * 0.9) as i32;
            let usable_h = (display_mode.h as f32 * 0.9) as i32;

            let max_scale_w = usable_w / GAME_WIDTH as i32;
            let max_scale_h = usable_h / GAME_HEIGHT as i32;

            // Use smaller scale to ensure both dimensions fit
            let scale = max_scale_w.min(max_scale_h);

            scale.clamp(1, 4) as u32
        }
        Err(_) => {
            println!("Warning: Could not detect monitor size, using 1x scale");
            1
        }
    }
}

/// Wares presented by the smith's buy screen. The store observes
/// this list, it does not own the items.
fn smith_wares() -> Vec<(String, i32)> {
    vec![
        ("SHORT SWORD".to_string(), 120),
        ("BUCKLER".to_string(), 90),
        ("CAP".to_string(), 45),
        ("CLUB".to_string(), 30),
        ("DAGGER".to_string(), 60),
    ]
}

fn main() -> Result<(), String> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;
    let timer = sdl_context.timer()?;

    let window_scale = calculate_window_scale(&video_subsystem);
    let window_width = GAME_WIDTH * window_scale;
    let window_height = GAME_HEIGHT * window_scale;

    println!("Window scale: {}x ({}x{})", window_scale, window_width, window_height);

    let window = video_subsystem
        .window("Duskwell", window_width, window_height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

    // Logical size gives pixel-perfect scaling of the fixed-resolution UI
    canvas
        .set_logical_size(GAME_WIDTH, GAME_HEIGHT)
        .map_err(|e| e.to_string())?;

    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump()?;

    // Screen art
    let title_background = load_texture(&texture_creator, "assets/ui/title_background.png")?;
    let logo = load_texture(&texture_creator, "assets/ui/logo.png")?;
    let textbox = load_texture(&texture_creator, "assets/ui/textbox.png")?;
    let store_panel = load_texture(&texture_creator, "assets/ui/store_panel.png")?;
    let slider_track = load_texture(&texture_creator, "assets/ui/slider_track.png")?;
    let slider_thumb = load_texture(&texture_creator, "assets/ui/slider_thumb.png")?;
    let slider_arrow = load_texture(&texture_creator, "assets/ui/slider_arrow.png")?;
    let slider = ScrollbarArt {
        track: &slider_track,
        thumb: &slider_thumb,
        arrow: &slider_arrow,
    };

    // Narration content table; a missing table is a startup failure
    let messages = MessageTable::load_from_file("assets/config/messages.json")
        .map_err(|e| format!("Failed to load message table: {}", e))?;

    let mut audio = SilentAudio;
    let wares = smith_wares();

    let mut phase = Phase::Title(TitleScreen::new(
        &title_background,
        &logo,
        LOGO_FRAMES,
        timer.ticks64() as u32,
    ));

    'running: loop {
        let now = timer.ticks64() as u32;
        let mapping = DisplayMapping::from_canvas(&canvas);
        let events: Vec<Event> = event_pump.poll_iter().collect();

        for event in &events {
            if matches!(event, Event::Quit { .. }) {
                break 'running;
            }
        }

        let next = match &mut phase {
            Phase::Title(title) => {
                let dismissed = events.iter().any(|e| title.handle_event(e));

                if dismissed || title.timed_out(now) {
                    Some(Phase::Menu(MainMenuScreen::new(&title_background)))
                } else {
                    title.update();
                    None
                }
            }

            Phase::Menu(menu) => {
                let mut choice = None;

                for event in &events {
                    if let Some(action) = menu_action(event) {
                        choice = menu.handle_action(action);
                    } else if matches!(event, Event::MouseButtonDown { .. }) {
                        let mouse = event_pump.mouse_state();
                        choice = menu.handle_click(&mapping, mouse.x(), mouse.y());
                    }
                    if choice.is_some() {
                        break;
                    }
                }

                match choice {
                    Some(MENU_NEW_GAME) => {
                        let mut narration = NarrationScreen::new(&textbox, ScrollTuning::default());
                        let intro = messages
                            .get("intro")
                            .ok_or_else(|| "Message table has no intro entry".to_string())?;
                        narration.begin(intro, &mut audio, timer.ticks64() as u32)?;
                        Some(Phase::Narration(narration))
                    }
                    Some(MENU_LOAD_GAME) => {
                        println!("No saved adventures yet");
                        None
                    }
                    Some(MENU_EXIT) => break 'running,
                    _ => None,
                }
            }

            Phase::Narration(narration) => {
                for event in &events {
                    narration.handle_event(event);
                }

                if !narration.is_active() {
                    println!("Narration finished, entering the smithy");
                    Some(Phase::Store(StoreScreen::smith(&store_panel)))
                } else {
                    None
                }
            }

            Phase::Store(store) => {
                let mut store_event = StoreEvent::None;

                for event in &events {
                    if let Some(action) = menu_action(event) {
                        store_event = store.handle_action(action);
                    } else if matches!(event, Event::MouseButtonDown { .. }) {
                        // Raw mouse state is in window coordinates;
                        // map it before hit testing
                        let mouse = event_pump.mouse_state();
                        store_event = store.handle_click(&mapping, mouse.x(), mouse.y());
                    }
                    if store_event != StoreEvent::None {
                        break;
                    }
                }

                match (store.id(), store_event) {
                    (_, StoreEvent::None) => None,
                    (StoreId::Smith, StoreEvent::Selected(1)) => {
                        Some(Phase::Store(StoreScreen::smith_buy(&store_panel, slider, &wares)))
                    }
                    (StoreId::Smith, StoreEvent::Selected(4)) | (StoreId::Smith, StoreEvent::Closed) => {
                        break 'running;
                    }
                    (StoreId::Smith, StoreEvent::Selected(value)) => {
                        println!("Smith option {} not in this build", value);
                        None
                    }
                    (StoreId::SmithBuy, StoreEvent::Selected(-1))
                    | (StoreId::SmithBuy, StoreEvent::Closed) => {
                        Some(Phase::Store(StoreScreen::smith(&store_panel)))
                    }
                    (StoreId::SmithBuy, StoreEvent::Selected(index)) => {
                        if let Some((name, price)) = wares.get(index as usize) {
                            println!("Bought {} for {} gold", name, price);
                        }
                        None
                    }
                    (_, StoreEvent::Closed) => {
                        break 'running;
                    }
                    _ => None,
                }
            }
        };

        if let Some(next) = next {
            // Entering a store snaps the cursor onto its default
            // selection
            if let Phase::Store(store) = &next {
                let (lx, ly) = store.selected_point();
                let (ox, oy) = mapping.logical_to_output(lx, ly);
                sdl_context.mouse().warp_mouse_in_window(canvas.window(), ox, oy);
            }
            phase = next;
        }

        // Render the active screen
        canvas.set_draw_color(sdl2::pixels::Color::RGB(0, 0, 0));
        canvas.clear();

        match &mut phase {
            Phase::Title(title) => title.render(&mut canvas)?,
            Phase::Menu(menu) => menu.render(&mut canvas)?,
            Phase::Narration(narration) => narration.render(&mut canvas, now)?,
            Phase::Store(store) => store.render(&mut canvas)?,
        }

        canvas.present();

        // Cap framerate to ~60 FPS
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    Ok(())
}
