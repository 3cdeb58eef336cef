//! Canvas2D scene painter
//!
//! Draws the track, entities and player from a read-only view of the
//! simulation state. Purely observational: nothing here feeds back into the
//! simulation, and a missing canvas context or sprite only degrades the
//! visuals.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::*;
use crate::sim::{EntityKind, GameState, TrackEntity};

/// Camera placement; the z plane matches the simulation's reap boundary
const CAMERA_Y: f32 = 3.0;
const CAMERA_Z: f32 = 5.0;
/// Focal length as a fraction of the canvas height
const FOCAL: f32 = 0.9;
/// Anything closer than this to the camera is not drawn
const NEAR_PLANE: f32 = 0.5;
/// Spacing of the scrolling track stripes (world units)
const STRIPE_SPACING: f32 = 2.0;

const SKY_COLOR: &str = "#87ceeb";
const TRACK_COLOR: &str = "#2e8b57";
const LANE_LINE_COLOR: &str = "#e8f5e9";
const OBSTACLE_COLOR: &str = "#ff4500";
const COIN_COLOR: &str = "#ffd700";
const PLAYER_COLOR: &str = "#1e90ff";

/// Scene renderer over a 2D canvas context
pub struct ScenePainter {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
    sprite: Option<HtmlImageElement>,
    sprite_ready: Rc<Cell<bool>>,
}

impl ScenePainter {
    /// Wrap a canvas; returns None when no 2D context is available
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        Some(Self {
            ctx,
            width: canvas.width() as f32,
            height: canvas.height() as f32,
            sprite: None,
            sprite_ready: Rc::new(Cell::new(false)),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    /// Kick off an async load of the player sprite
    ///
    /// The painter falls back to a plain box until the image arrives; a load
    /// failure is logged and the game keeps running unchanged.
    pub fn load_sprite(&mut self, url: &str) {
        let Ok(image) = HtmlImageElement::new() else {
            log::warn!("Could not create image element for player sprite");
            return;
        };

        let ready = self.sprite_ready.clone();
        let onload = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            ready.set(true);
            log::info!("Player sprite loaded");
        });
        let _ = image.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref());
        onload.forget();

        let onerror = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            log::warn!("Player sprite failed to load - using placeholder");
        });
        let _ = image.add_event_listener_with_callback("error", onerror.as_ref().unchecked_ref());
        onerror.forget();

        image.set_src(url);
        self.sprite = Some(image);
    }

    /// Whether the player sprite has finished loading
    pub fn sprite_ready(&self) -> bool {
        self.sprite_ready.get()
    }

    /// Project a world point to (screen x, screen y, pixels per world unit)
    fn project(&self, x: f32, y: f32, z: f32) -> Option<(f64, f64, f64)> {
        let depth = CAMERA_Z - z;
        if depth < NEAR_PLANE {
            return None;
        }
        let scale = FOCAL * self.height / depth;
        let sx = self.width / 2.0 + x * scale;
        let sy = self.height / 2.0 - (y - CAMERA_Y) * scale;
        Some((f64::from(sx), f64::from(sy), f64::from(scale)))
    }

    /// Render one frame of the scene
    pub fn draw(&self, state: &GameState, reduced_motion: bool) {
        let ctx = &self.ctx;
        let (w, h) = (f64::from(self.width), f64::from(self.height));

        ctx.set_fill_style_str(SKY_COLOR);
        ctx.fill_rect(0.0, 0.0, w, h);

        self.draw_track(state, reduced_motion);

        // Far to near so closer entities paint over farther ones
        let mut entities: Vec<&TrackEntity> = state.entities.iter().collect();
        entities.sort_by(|a, b| a.z.total_cmp(&b.z));
        for entity in entities {
            self.draw_entity(entity);
        }

        self.draw_player(state);
    }

    fn draw_track(&self, state: &GameState, reduced_motion: bool) {
        let ctx = &self.ctx;
        let half = TRACK_WIDTH / 2.0;
        let near_z = CAMERA_Z - NEAR_PLANE;

        let corners = [
            (-half, SPAWN_Z),
            (half, SPAWN_Z),
            (half, near_z),
            (-half, near_z),
        ];
        ctx.set_fill_style_str(TRACK_COLOR);
        ctx.begin_path();
        for (i, (x, z)) in corners.iter().enumerate() {
            let Some((sx, sy, _)) = self.project(*x, 0.0, *z) else {
                continue;
            };
            if i == 0 {
                ctx.move_to(sx, sy);
            } else {
                ctx.line_to(sx, sy);
            }
        }
        ctx.close_path();
        ctx.fill();

        ctx.set_stroke_style_str(LANE_LINE_COLOR);
        ctx.set_line_width(2.0);
        ctx.set_global_alpha(0.6);

        // Lane boundaries
        for x in [-0.75, 0.75] {
            let (Some((x0, y0, _)), Some((x1, y1, _))) =
                (self.project(x, 0.0, SPAWN_Z), self.project(x, 0.0, near_z))
            else {
                continue;
            };
            ctx.begin_path();
            ctx.move_to(x0, y0);
            ctx.line_to(x1, y1);
            ctx.stroke();
        }

        // Scrolling cross-stripes sell the forward motion
        if !reduced_motion {
            let distance = state.time_ticks as f32 * SIM_DT * state.track_speed;
            let offset = distance % STRIPE_SPACING;
            let mut z = SPAWN_Z + offset;
            while z < near_z {
                if let (Some((x0, y0, _)), Some((x1, y1, _))) =
                    (self.project(-half, 0.0, z), self.project(half, 0.0, z))
                {
                    ctx.begin_path();
                    ctx.move_to(x0, y0);
                    ctx.line_to(x1, y1);
                    ctx.stroke();
                }
                z += STRIPE_SPACING;
            }
        }

        ctx.set_global_alpha(1.0);
    }

    fn draw_entity(&self, entity: &TrackEntity) {
        let center = entity.center();
        let Some((sx, sy, scale)) = self.project(center.x, center.y, center.z) else {
            return;
        };
        let size = entity.kind.size();
        let w = f64::from(size.x) * scale;
        let h = f64::from(size.y) * scale;

        match entity.kind {
            EntityKind::Coin => {
                self.ctx.set_fill_style_str(COIN_COLOR);
                self.ctx.begin_path();
                let _ = self
                    .ctx
                    .arc(sx, sy, w / 2.0, 0.0, std::f64::consts::TAU);
                self.ctx.fill();
            }
            EntityKind::Obstacle(_) => {
                self.ctx.set_fill_style_str(OBSTACLE_COLOR);
                self.ctx.fill_rect(sx - w / 2.0, sy - h / 2.0, w, h);
            }
        }
    }

    fn draw_player(&self, state: &GameState) {
        let player = &state.player;
        let half_height = PLAYER_SIZE * player.scale_y / 2.0;
        let Some((sx, sy, scale)) =
            self.project(player.lateral, player.height + half_height, 0.0)
        else {
            return;
        };
        let w = f64::from(PLAYER_SIZE) * scale;
        let h = f64::from(PLAYER_SIZE * player.scale_y) * scale;
        let (x, y) = (sx - w / 2.0, sy - h / 2.0);

        if self.sprite_ready() {
            if let Some(sprite) = &self.sprite {
                let _ = self
                    .ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(sprite, x, y, w, h);
                return;
            }
        }

        self.ctx.set_fill_style_str(PLAYER_COLOR);
        self.ctx.fill_rect(x, y, w, h);
    }
}
