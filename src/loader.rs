use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;

use crate::sprites::{Bitmap, SpriteSheet};
use crate::Error;

/// The images a level is built from.
#[derive(Debug)]
pub struct Assets {
    sheet: SpriteSheet,
    background: Option<Bitmap>,
}

impl Assets {
    pub fn new(sheet: SpriteSheet, background: Option<Bitmap>) -> Assets {
        Assets { sheet, background }
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    /// Hand the background image over to its owner.
    pub fn take_background(&mut self) -> Option<Bitmap> {
        self.background.take()
    }
}

/// Load the sprite sheet and an optional background image from PCX files.
pub fn load_assets<P, Q>(sheet: P, background: Option<Q>) -> Result<Assets, Error>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let sheet = SpriteSheet::new(load_pcx_file(sheet)?);
    let background = background.map(load_pcx_file).transpose()?;

    Ok(Assets { sheet, background })
}

/// Load a PCX file from disk.
pub fn load_pcx_file<P: AsRef<Path>>(path: P) -> Result<Bitmap, Error> {
    let path = path.as_ref();
    let bitmap = load_pcx(BufReader::new(File::open(path)?))?;
    info!(
        "Loaded {} ({}x{})",
        path.display(),
        bitmap.width(),
        bitmap.height()
    );

    Ok(bitmap)
}

/// Convert PCX data to raw RGBA pixels.
pub fn load_pcx<R: Read>(pcx: R) -> Result<Bitmap, Error> {
    let mut reader = pcx::Reader::new(pcx)?;
    let width = reader.width() as usize;
    let height = reader.height() as usize;
    let mut result = Vec::with_capacity(width * height * 4);

    if reader.is_paletted() {
        // Read the raw pixel data
        let mut buffer = vec![0; width * height];
        for y in 0..height {
            let a = y * width;
            let b = a + width;
            reader.next_row_paletted(&mut buffer[a..b])?;
        }

        // Read the palette
        let palette_length = reader
            .palette_length()
            .ok_or(Error::Pcx("missing palette"))? as usize;
        let mut palette = vec![0; palette_length * 3];
        reader.read_palette(&mut palette)?;

        // Copy to result with an alpha component
        for pal in buffer {
            let i = pal as usize * 3;
            let rgb = palette.get(i..i + 3).ok_or(Error::Pcx("palette index"))?;
            result.extend_from_slice(rgb);
            result.push(255);
        }
    } else {
        let mut buffer = vec![0; width * 3];
        for _ in 0..height {
            reader.next_row_rgb(&mut buffer[..])?;

            // Copy to result with an alpha component
            for rgb in buffer.chunks_exact(3) {
                result.extend_from_slice(rgb);
                result.push(255);
            }
        }
    }

    Ok(Bitmap::new(width as u32, height as u32, result))
}
