use glam::Vec2;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::assets::HudFont;
use crate::color::{NEON_CYAN, NEON_GREEN, NEON_ORANGE, NEON_PINK, NEON_YELLOW, Rgba};
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::entities::{GameState, HealthTier, PLAYER_SIZE};
use crate::hud::{HudText, Overlay};
use crate::sim::World;

const BACKGROUND: Rgba = Rgba::opaque(5, 5, 20);
const PLAYER_SPRITE: [&str; 3] = [" /^\\ ", "<|||>", " ||| "];

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub world: &'a World,
    pub hud: &'a HudText,
    pub area: Rect,
    pub fps: u32,
}

/// Maps playfield coordinates onto terminal cells
#[derive(Debug, Clone, Copy)]
struct Viewport {
    area: Rect,
    scale: Vec2,
    shake: Vec2,
}

impl Viewport {
    fn new(area: Rect, shake: Vec2) -> Self {
        Self {
            area,
            scale: Vec2::new(
                area.width as f32 / PLAYFIELD_WIDTH,
                area.height as f32 / PLAYFIELD_HEIGHT,
            ),
            shake,
        }
    }

    fn cell(&self, pos: Vec2) -> Option<(u16, u16)> {
        let p = (pos + self.shake) * self.scale;
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let (x, y) = (p.x as u16, p.y as u16);
        (x < self.area.width && y < self.area.height).then(|| (self.area.x + x, self.area.y + y))
    }

    /// Cells covered by a playfield rectangle, clipped to the area
    fn rect(&self, pos: Vec2, size: Vec2) -> Option<Rect> {
        let min = ((pos + self.shake) * self.scale).max(Vec2::ZERO);
        let max = ((pos + size + self.shake) * self.scale)
            .min(Vec2::new(self.area.width as f32, self.area.height as f32));
        if max.x <= min.x || max.y <= min.y {
            return None;
        }
        let x = min.x as u16;
        let y = min.y as u16;
        Some(Rect {
            x: self.area.x + x,
            y: self.area.y + y,
            width: ((max.x.ceil() as u16).saturating_sub(x)).max(1),
            height: ((max.y.ceil() as u16).saturating_sub(y)).max(1),
        })
    }
}

/// Blend a translucent color onto the background
fn to_color(color: Rgba) -> Color {
    let mixed = BACKGROUND.lerp(color.with_alpha(255), color.a as f32 / 255.0);
    Color::Rgb(mixed.r, mixed.g, mixed.b)
}

fn tier_color(tier: HealthTier) -> Color {
    match tier {
        HealthTier::Green => Color::Green,
        HealthTier::Yellow => Color::Yellow,
        HealthTier::Red => Color::Red,
    }
}

fn put(buffer: &mut Buffer, cell: Option<(u16, u16)>, symbol: &str, style: Style) {
    if let Some((x, y)) = cell {
        buffer.set_string(x, y, symbol, style);
    }
}

fn fill(buffer: &mut Buffer, rect: Rect, symbol: &str, style: Style) {
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            buffer.set_string(x, y, symbol, style);
        }
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    /// Text is only drawn when the HUD font loaded
    hud_enabled: bool,
}

impl GameRenderer {
    pub fn new(font: Option<&HudFont>) -> Self {
        Self {
            hud_enabled: font.is_some(),
        }
    }

    pub fn hud_enabled(&self) -> bool {
        self.hud_enabled
    }

    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        frame.render_widget(
            Block::default().style(Style::default().bg(to_color(BACKGROUND))),
            area,
        );

        self.render_playfield(frame, view);

        if self.hud_enabled {
            self.render_hud(frame, view);
        }

        if let Some(overlay) = &view.hud.overlay {
            self.render_overlay(frame, area, overlay);
        }
    }

    /// Everything that moves, back to front
    fn render_playfield(&self, frame: &mut Frame, view: &RenderView) {
        let world = view.world;
        let viewport = Viewport::new(view.area, world.shake.offset);
        let buffer = frame.buffer_mut();

        for star in &world.stars {
            let symbol = if star.radius >= 3.0 { "•" } else { "." };
            put(
                buffer,
                viewport.cell(star.pos),
                symbol,
                Style::default().fg(to_color(star.color)),
            );
        }

        for dot in &world.trails {
            put(
                buffer,
                viewport.cell(dot.pos),
                "·",
                Style::default().fg(to_color(dot.color)),
            );
        }

        for particle in &world.particles {
            let symbol = if particle.radius >= 4.0 { "*" } else { "+" };
            put(
                buffer,
                viewport.cell(particle.pos),
                symbol,
                Style::default().fg(to_color(particle.color)),
            );
        }

        for power_up in &world.power_ups {
            let mut style = Style::default()
                .fg(to_color(power_up.kind.color()))
                .add_modifier(Modifier::BOLD);
            // Pulse between bold and reversed
            if power_up.scale > 1.0 {
                style = style.add_modifier(Modifier::REVERSED);
            }
            put(
                buffer,
                viewport.cell(power_up.pos),
                &power_up.kind.get_char().to_string(),
                style,
            );
        }

        self.render_player(buffer, &viewport, world);

        for bullet in &world.bullets {
            let color = if world.player.triple_shot.active {
                NEON_YELLOW
            } else {
                NEON_CYAN
            };
            put(
                buffer,
                viewport.cell(bullet.pos),
                "|",
                Style::default().fg(to_color(color)).add_modifier(Modifier::BOLD),
            );
        }

        for enemy in &world.enemies {
            let Some(body) = viewport.rect(enemy.pos, enemy.size()) else {
                continue;
            };
            fill(
                buffer,
                body,
                "█",
                Style::default().fg(to_color(enemy.color())),
            );

            if body.y > view.area.y {
                let bar = Rect {
                    y: body.y - 1,
                    height: 1,
                    ..body
                };
                let filled = (bar.width as f32 * enemy.health_bar.ratio).round() as u16;
                fill(buffer, bar, "▀", Style::default().fg(Color::DarkGray));
                fill(
                    buffer,
                    Rect {
                        width: filled.min(bar.width),
                        ..bar
                    },
                    "▀",
                    Style::default().fg(tier_color(enemy.health_bar.tier)),
                );
            }
        }
    }

    fn render_player(&self, buffer: &mut Buffer, viewport: &Viewport, world: &World) {
        let player = &world.player;
        let Some(anchor) = viewport.rect(player.pos, PLAYER_SIZE) else {
            return;
        };
        let style = Style::default()
            .fg(to_color(NEON_CYAN))
            .add_modifier(Modifier::BOLD);

        // Center the sprite on the ship's box
        let sprite_width = PLAYER_SPRITE[0].chars().count() as u16;
        let x = (anchor.x + anchor.width / 2).saturating_sub(sprite_width / 2);
        for (row, line) in PLAYER_SPRITE.iter().enumerate() {
            let y = anchor.y + row as u16;
            if y < viewport.area.bottom() && x + sprite_width <= viewport.area.right() {
                buffer.set_string(x, y, *line, style);
            }
        }

        if world.state == GameState::Playing {
            let flame_y = anchor.y + PLAYER_SPRITE.len() as u16;
            if flame_y < viewport.area.bottom() {
                buffer.set_string(
                    x + sprite_width / 2,
                    flame_y,
                    "v",
                    Style::default().fg(to_color(NEON_ORANGE)),
                );
            }
        }

        if player.has_shield() {
            let shield = Style::default().fg(Color::Rgb(0, 200, 255));
            let right = x + sprite_width;
            for row in 0..PLAYER_SPRITE.len() as u16 {
                let y = anchor.y + row;
                if y >= viewport.area.bottom() {
                    break;
                }
                if x > viewport.area.x {
                    buffer.set_string(x - 1, y, "(", shield);
                }
                if right < viewport.area.right() {
                    buffer.set_string(right, y, ")", shield);
                }
            }
        }
    }

    fn render_hud(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let hud = view.hud;
        let bold = |color: Rgba| {
            Style::default()
                .fg(to_color(color))
                .add_modifier(Modifier::BOLD)
        };

        let stats_left = Line::from(vec![
            Span::styled(hud.score.clone(), bold(NEON_CYAN)),
            Span::raw("  "),
            Span::styled(hud.lives.clone(), bold(NEON_PINK)),
        ]);
        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stats_left), stats_area);

        let stats_right = Line::from(vec![
            Span::styled(hud.level.clone(), bold(NEON_GREEN)),
            Span::styled(
                format!("  FPS: {}", view.fps),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(stats_right).alignment(Alignment::Right),
            stats_area,
        );

        if let Some(combo) = &hud.combo {
            let combo_area = Rect {
                y: area.y + 2,
                ..stats_area
            };
            frame.render_widget(
                Paragraph::new(Line::from(combo.as_str()).centered()).style(bold(NEON_ORANGE)),
                combo_area,
            );
        }

        for (i, label) in hud.power_ups.iter().enumerate() {
            let y = area.y + 2 + i as u16;
            if y >= area.bottom() {
                break;
            }
            let indicator = Rect {
                x: area.x + 1,
                y,
                width: 17.min(area.width.saturating_sub(1)),
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(format!(" {label} ")).style(
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Rgb(40, 40, 60))
                        .add_modifier(Modifier::BOLD),
                ),
                indicator,
            );
        }

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Space: Fire] [R: Restart] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Level banner or game-over box; the box is drawn empty without a HUD font
    fn render_overlay(&self, frame: &mut Frame, area: Rect, overlay: &Overlay) {
        let (lines, border) = match overlay {
            Overlay::LevelTransition { title, subtitle } => (
                vec![
                    Line::from(""),
                    Line::from(title.as_str()).centered().bold().yellow(),
                    Line::from(""),
                    Line::from(*subtitle).centered().white(),
                ],
                Color::Yellow,
            ),
            Overlay::GameOver {
                title,
                prompt,
                final_score,
                level_reached,
            } => (
                vec![
                    Line::from(""),
                    Line::from(*title).centered().magenta().bold(),
                    Line::from(""),
                    Line::from(*prompt).centered().white(),
                    Line::from(final_score.as_str()).centered().cyan().bold(),
                    Line::from(level_reached.as_str()).centered().green(),
                ],
                Color::Magenta,
            ),
        };

        let width = 34.min(area.width);
        let height = (lines.len() as u16 + 2).min(area.height);
        let overlay_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        frame.render_widget(Clear, overlay_area);
        if self.hud_enabled {
            frame.render_widget(
                Paragraph::new(lines)
                    .block(block)
                    .alignment(Alignment::Center),
                overlay_area,
            );
        } else {
            frame.render_widget(block, overlay_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Enemy, EnemyKind};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(renderer: &GameRenderer, world: &World) -> Buffer {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let hud = HudText::from_world(world);
        terminal
            .draw(|frame| {
                let view = RenderView {
                    world,
                    hud: &hud,
                    area: frame.area(),
                    fps: 60,
                };
                renderer.render(frame, &view);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn contains(buffer: &Buffer, text: &str) -> bool {
        let area = buffer.area;
        (area.top()..area.bottom()).any(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            row.contains(text)
        })
    }

    #[test]
    fn test_viewport_scaling() {
        let viewport = Viewport::new(Rect::new(0, 0, 100, 40), Vec2::ZERO);
        assert_eq!(viewport.cell(Vec2::new(500.0, 400.0)), Some((50, 20)));
        assert_eq!(viewport.cell(Vec2::new(-5.0, 10.0)), None);
        assert_eq!(viewport.cell(Vec2::new(1000.0, 10.0)), None);

        // Partly covered cells count as covered
        let rect = viewport.rect(Vec2::new(100.0, 100.0), Vec2::new(45.0, 30.0)).unwrap();
        assert_eq!(rect, Rect::new(10, 5, 5, 2));
        assert!(viewport.rect(Vec2::new(0.0, -200.0), Vec2::new(40.0, 30.0)).is_none());
    }

    #[test]
    fn test_hud_drawn_with_font() {
        let font = HudFont {
            path: "font.ttf".into(),
        };
        let renderer = GameRenderer::new(Some(&font));
        let buffer = draw(&renderer, &World::new(1));
        assert!(contains(&buffer, "SCORE: 00000000"));
        assert!(contains(&buffer, "LEVEL: 1"));
    }

    #[test]
    fn test_health_bar_over_every_enemy() {
        let renderer = GameRenderer::new(None);
        let mut world = World::new(1);
        world.stars.clear();
        world
            .enemies
            .push(Enemy::new(EnemyKind::Normal, 500.0, 400.0, 1));
        let mut tank = Enemy::new(EnemyKind::Tank, 200.0, 400.0, 1);
        tank.hit();
        tank.refresh_health_bar();
        world.enemies.push(tank);

        let buffer = draw(&renderer, &world);
        assert_eq!(buffer[(50, 20)].symbol(), "█");
        assert_eq!(buffer[(50, 19)].symbol(), "▀");
        assert_eq!(buffer[(50, 19)].fg, Color::Green);
        // Tank at 3 of 4 health: 4 of 5 bar cells green
        assert_eq!(buffer[(20, 19)].fg, Color::Green);
        assert_eq!(buffer[(24, 19)].fg, Color::DarkGray);
    }

    #[test]
    fn test_hud_skipped_without_font() {
        let renderer = GameRenderer::new(None);
        assert!(!renderer.hud_enabled());
        let mut world = World::new(1);
        world.end_run();
        let buffer = draw(&renderer, &world);
        assert!(!contains(&buffer, "SCORE"));
        assert!(!contains(&buffer, "GAME OVER"));
    }

    #[test]
    fn test_game_over_overlay_text() {
        let font = HudFont {
            path: "font.ttf".into(),
        };
        let renderer = GameRenderer::new(Some(&font));
        let mut world = World::new(1);
        world.end_run();
        let buffer = draw(&renderer, &world);
        assert!(contains(&buffer, "GAME OVER"));
        assert!(contains(&buffer, "Press R to Restart"));
    }
}
