use std::path::Path;

use anyhow::Context as _;
use image::{Rgba, RgbaImage};

use crate::{
    arrow::draw_arrow,
    assets::SpriteProvider,
    board::{BoardSnapshot, square_center},
    canvas::BoardCanvas,
    encode_gif,
    error::ChessgifResult,
    game::GameSource,
};

/// Per-invocation rendering configuration.
///
/// Immutable during a render; mutated between renders through the
/// [`Renderer`] setters, which invalidate the cached initial canvas.
#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    /// View the board from black's side (180 degree rotation).
    pub reversed: bool,
    /// Light ("white") square color.
    pub light: Rgba<u8>,
    /// Dark ("black") square color.
    pub dark: Rgba<u8>,
    /// Inter-move duration in seconds.
    pub duration: f64,
    /// Draw an arrow marking the most recent move.
    pub arrow: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            reversed: false,
            light: Rgba([0xf0, 0xd9, 0xb5, 255]),
            dark: Rgba([0xb5, 0x88, 0x63, 255]),
            duration: 0.4,
            arrow: false,
        }
    }
}

impl RenderConfig {
    /// Per-frame delay in integer milliseconds, truncating. Zero and
    /// negative durations saturate to 0 and are handed to the encoder
    /// uncorrected.
    pub fn duration_ms(&self) -> u32 {
        (self.duration * 1000.0) as u32
    }
}

/// Cached initial canvas. `Stale` forces a rebuild on the next render.
enum TemplateState {
    Stale,
    Ready(RgbaImage),
}

/// Drives the snapshot sequence into a frame sequence and, optionally, a
/// GIF file.
///
/// The renderer owns its sprite provider for its whole lifetime (sprites are
/// static, the cache is never invalidated) and caches the fully painted
/// starting position as a template so repeated renders by the same
/// configured instance skip the 64-square initial repaint. Configuration
/// setters move the template back to `Stale`.
pub struct Renderer<S> {
    config: RenderConfig,
    sprites: S,
    template: TemplateState,
}

impl<S: SpriteProvider> Renderer<S> {
    pub fn new(config: RenderConfig, sprites: S) -> Self {
        Self {
            config,
            sprites,
            template: TemplateState::Stale,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.config.reversed = reversed;
        self.template = TemplateState::Stale;
    }

    pub fn set_light_color(&mut self, light: Rgba<u8>) {
        self.config.light = light;
        self.template = TemplateState::Stale;
    }

    pub fn set_dark_color(&mut self, dark: Rgba<u8>) {
        self.config.dark = dark;
        self.template = TemplateState::Stale;
    }

    /// Duration does not touch the canvas; no invalidation needed.
    pub fn set_duration(&mut self, seconds: f64) {
        self.config.duration = seconds;
    }

    /// The arrow is drawn on frame copies only; no invalidation needed.
    pub fn set_arrow(&mut self, arrow: bool) {
        self.config.arrow = arrow;
    }

    /// Render the whole game into an owned frame sequence: the initial
    /// position plus one frame per ply.
    #[tracing::instrument(skip(self, game))]
    pub fn render_frames(&mut self, game: &mut dyn GameSource) -> ChessgifResult<Vec<RgbaImage>> {
        self.ensure_template()?;
        let TemplateState::Ready(template) = &self.template else {
            unreachable!("template rebuilt above");
        };

        let mut canvas = BoardCanvas::from_image(
            template.clone(),
            self.config.light,
            self.config.dark,
            self.config.reversed,
        );
        let mut frames = vec![canvas.snapshot_copy()];

        while !game.is_finished() {
            let previous = game.state().clone();
            game.advance()?;
            let changed = game.state().diff(&previous);
            tracing::trace!(changed = changed.len(), "repainting ply");

            for square in &changed {
                canvas.repaint(*square, game.state().get(*square), &mut self.sprites)?;
            }

            // The arrow goes on the captured copy only; the live canvas must
            // stay overlay-free for later repaints.
            let mut frame = canvas.snapshot_copy();
            if self.config.arrow
                && let Some(mv) = game.last_move()
            {
                draw_arrow(
                    &mut frame,
                    square_center(mv.from, self.config.reversed),
                    square_center(mv.to, self.config.reversed),
                );
            }
            frames.push(frame);
        }

        tracing::debug!(frames = frames.len(), "rendered frame sequence");
        Ok(frames)
    }

    /// Render the game and write a looping GIF.
    ///
    /// Encoding happens fully in memory; the output file is only written
    /// once the byte stream is complete, so a failure never leaves a partial
    /// file behind.
    pub fn render_gif(&mut self, game: &mut dyn GameSource, out: &Path) -> ChessgifResult<()> {
        let frames = self.render_frames(game)?;
        let bytes = encode_gif::assemble(frames, self.config.duration_ms())?;
        std::fs::write(out, &bytes)
            .with_context(|| format!("write gif '{}'", out.display()))?;
        Ok(())
    }

    fn ensure_template(&mut self) -> ChessgifResult<()> {
        if matches!(self.template, TemplateState::Ready(_)) {
            return Ok(());
        }

        tracing::debug!(
            reversed = self.config.reversed,
            "rebuilding initial board template"
        );
        let mut canvas = BoardCanvas::new(
            self.config.light,
            self.config.dark,
            self.config.reversed,
        );
        canvas.paint_full(&BoardSnapshot::standard_start(), &mut self.sprites)?;
        self.template = TemplateState::Ready(canvas.into_image());
        Ok(())
    }
}
