use image::{Rgba, RgbaImage, imageops};

use crate::{
    assets::SpriteProvider,
    board::{BOARD_SIZE, BoardSnapshot, Piece, SQUARE_SIZE, Square, square_origin},
    error::ChessgifResult,
};

/// The live 8x8 board raster.
///
/// Holds the mutable RGBA buffer plus two precomputed solid square tiles.
/// Frames are captured with [`BoardCanvas::snapshot_copy`]; the copy never
/// aliases the live buffer, which keeps mutating for subsequent moves.
pub struct BoardCanvas {
    img: RgbaImage,
    light_tile: RgbaImage,
    dark_tile: RgbaImage,
    reversed: bool,
}

impl BoardCanvas {
    /// Blank canvas; callers paint it via [`BoardCanvas::paint_full`].
    pub fn new(light: Rgba<u8>, dark: Rgba<u8>, reversed: bool) -> Self {
        Self::from_image(RgbaImage::new(BOARD_SIZE, BOARD_SIZE), light, dark, reversed)
    }

    /// Resume from an already-painted buffer (the renderer's cached template).
    pub fn from_image(img: RgbaImage, light: Rgba<u8>, dark: Rgba<u8>, reversed: bool) -> Self {
        Self {
            img,
            light_tile: solid_tile(light),
            dark_tile: solid_tile(dark),
            reversed,
        }
    }

    /// Repaint one square: checker-colored tile, then the occupant's sprite
    /// composited over it through the sprite's own alpha.
    pub fn repaint(
        &mut self,
        square: Square,
        occupant: Option<Piece>,
        sprites: &mut dyn SpriteProvider,
    ) -> ChessgifResult<()> {
        let (x, y) = square_origin(square, self.reversed);

        // Checker parity straight from pixel coordinates; no parity table.
        let tile = if (x + y) % (2 * SQUARE_SIZE) == 0 {
            &self.light_tile
        } else {
            &self.dark_tile
        };
        imageops::overlay(&mut self.img, tile, i64::from(x), i64::from(y));

        if let Some(piece) = occupant {
            let sprite = sprites.sprite(piece)?;
            imageops::overlay(&mut self.img, sprite, i64::from(x), i64::from(y));
        }
        Ok(())
    }

    /// Repaint every square from a snapshot.
    pub fn paint_full(
        &mut self,
        snapshot: &BoardSnapshot,
        sprites: &mut dyn SpriteProvider,
    ) -> ChessgifResult<()> {
        for square in Square::all() {
            self.repaint(square, snapshot.get(square), sprites)?;
        }
        Ok(())
    }

    /// Independent deep copy of the current buffer for frame capture.
    pub fn snapshot_copy(&self) -> RgbaImage {
        self.img.clone()
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }
}

fn solid_tile(color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(SQUARE_SIZE, SQUARE_SIZE, color)
}
