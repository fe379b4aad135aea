mod errors;
mod events;
mod typedefs;

pub use errors::*;
pub use events::*;
pub use typedefs::*;
