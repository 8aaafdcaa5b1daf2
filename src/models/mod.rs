pub mod enums;
pub mod fields;
pub mod message;

pub use enums::*;
pub use fields::*;
pub use message::*;
