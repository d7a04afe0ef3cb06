pub mod grid;
pub mod io;
pub mod pgm;
pub mod traits;
pub mod u8;

pub use self::grid::{Grid, Pixel};
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
