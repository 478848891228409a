pub mod decision;
pub mod health;
pub mod prediction;
pub mod recommendation;
pub mod routing;
pub mod sensor;
pub mod weather;

pub use decision::*;
pub use health::*;
pub use prediction::*;
pub use recommendation::*;
pub use routing::*;
pub use sensor::*;
pub use weather::*;
