pub mod io;
pub mod luma;
pub mod traits;
pub mod u8;

pub use self::io::OwnedImageU8;
pub use self::luma::{to_luma, ChannelOrder};
pub use self::traits::{ImageView, Rows};
pub use self::u8::ImageU8;
