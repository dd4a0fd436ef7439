mod modify;

pub use modify::*;
