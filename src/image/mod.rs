pub mod convert;
pub mod io;
pub mod plane;
pub mod traits;

pub use self::convert::{from_color_image, to_color_image};
pub use self::plane::{IntensityTensor, Plane, ResponsePlane};
pub use self::traits::{ImageView, ImageViewMut};
