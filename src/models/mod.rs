pub mod advice;
pub mod crop;
pub mod forecast;
pub mod request;
pub mod season;

pub use advice::*;
pub use crop::*;
pub use forecast::*;
pub use request::*;
pub use season::*;
