pub mod crop;
pub mod decision;
pub mod field;
pub mod weather;

pub use crop::*;
pub use decision::*;
pub use field::*;
pub use weather::*;
