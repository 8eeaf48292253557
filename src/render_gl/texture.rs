use gl;
use image::{self, GenericImageView};
use log::{error, info};
use thiserror::Error;

use crate::resources::Resources;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("image decode error: {name}")]
    Decode {
        name: String,
        source: image::ImageError,
    },
    #[error("image too large: {name} ({width}x{height})")]
    TooLarge {
        name: String,
        width: u32,
        height: u32,
    },
}

/// A 2D RGBA texture. Id 0 is the invalid texture returned when loading
/// fails; binding it samples as black.
pub struct Texture {
    id: gl::types::GLuint,
}

impl Texture {
    pub fn invalid() -> Self {
        Self { id: 0 }
    }

    /// Decodes `name` and uploads it with repeat wrapping and mipmaps.
    /// Logs and returns [`Texture::invalid`] on failure.
    pub fn from_res(res: &Resources, name: &str) -> Self {
        match Self::try_from_res(res, name) {
            Ok(texture) => {
                info!("loaded texture {}, id: {}", name, texture.id);
                texture
            }
            Err(e) => {
                error!("{}", e);
                Self::invalid()
            }
        }
    }

    pub fn try_from_res(res: &Resources, name: &str) -> Result<Self, TextureError> {
        let img = image::open(res.path_of(name)).map_err(|e| TextureError::Decode {
            name: name.into(),
            source: e,
        })?;
        let (width, height) = img.dimensions();
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(TextureError::TooLarge {
                name: name.into(),
                width,
                height,
            });
        }
        let pixels = img.to_rgba8();

        let mut id: gl::types::GLuint = 0;
        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as i32);
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MIN_FILTER,
                gl::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr() as *const gl::types::GLvoid,
            );
            gl::GenerateMipmap(gl::TEXTURE_2D);
            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        Ok(Self { id })
    }

    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }

    pub fn is_valid(&self) -> bool {
        self.id != 0
    }

    pub fn bind_to_unit(&self, unit: u32) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(gl::TEXTURE_2D, self.id);
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        if self.id != 0 {
            unsafe {
                gl::DeleteTextures(1, &self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::TempAssets;

    // Failure paths return before any GL call, so these run without a context.

    #[test]
    fn missing_image_is_decode_error() {
        let assets = TempAssets::new("tex-missing");
        let err = Texture::try_from_res(&assets.resources(), "textures/none.png")
            .err()
            .unwrap();
        assert!(matches!(err, TextureError::Decode { ref name, .. } if name == "textures/none.png"));
    }

    #[test]
    fn garbage_image_falls_back_to_invalid() {
        let assets = TempAssets::new("tex-garbage");
        assets.write("textures/wand.png", b"definitely not a png");
        let texture = Texture::from_res(&assets.resources(), "textures/wand.png");
        assert!(!texture.is_valid());
        assert_eq!(texture.id(), 0);
    }
}
