use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::assets::HudFont;
use crate::consts::MAX_FRAME_DT;
use crate::hud::HudText;
use crate::input::{InputAction, InputManager, to_tick_input};
use crate::renderer::{GameRenderer, RenderView};
use crate::settings::Settings;
use crate::sim::{World, tick};

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    world: World,
    /// Frames info
    frame_duration: Duration,
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(settings: &Settings, font: Option<&HudFont>, reports_release: bool) -> Self {
        let seed = settings.seed_or_clock();
        log::info!("Starting run with seed {seed}");

        Self {
            running: true,
            world: World::new(seed),
            frame_duration: settings.frame_duration(),
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(reports_release),
            renderer: GameRenderer::new(font),
        }
    }

    /// Run the application's main loop: input, update, render, then pace.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();
            let dt = frame_start
                .duration_since(self.last_frame_time)
                .as_secs_f32()
                .min(MAX_FRAME_DT);
            self.last_frame_time = frame_start;
            if dt > 0.0 {
                self.fps = (1.0 / dt).round() as u32;
            }

            // Poll input events and get actions
            self.input_manager.poll_events(&self.world.state)?;
            let actions = self.input_manager.get_actions(&self.world.state);
            if actions.contains(&InputAction::Quit) {
                self.running = false;
                break;
            }

            tick(&mut self.world, &to_tick_input(&actions), dt);

            let hud = HudText::from_world(&self.world);
            terminal.draw(|frame| {
                let view = RenderView {
                    world: &self.world,
                    hud: &hud,
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            // Frame-rate cap
            if let Some(remaining) = self.frame_duration.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        log::info!("Quit with score {}", self.world.score);
        Ok(())
    }
}
