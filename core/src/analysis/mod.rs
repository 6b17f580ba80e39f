pub use compare::*;
pub use evaluate::*;
pub use weighted::*;

mod compare;
mod evaluate;
mod weighted;
