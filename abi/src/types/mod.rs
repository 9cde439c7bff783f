mod datetime;
mod reservation;
mod reservation_status;
mod window;

pub use datetime::*;
pub use reservation::*;
pub use reservation_status::*;
pub use window::*;
