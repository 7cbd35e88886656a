pub mod event;
pub mod registration;

pub use event::Event;
pub use registration::Registration;
