mod backend;
pub use self::backend::{Gl, GlBackend};
#[cfg(test)]
pub(crate) use self::backend::recording;

mod context;
pub use self::context::RenderContext;

mod shader;
pub use self::shader::{Program, ShaderError, ShaderKind};

mod uniform;
pub use self::uniform::{Uniform, UniformLocation};

mod texture;
pub use self::texture::{Texture, TextureError};

mod viewport;
pub use self::viewport::Viewport;

mod color_buffer;
pub use self::color_buffer::ColorBuffer;

pub mod buffer;
