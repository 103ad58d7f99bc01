mod event;
mod participant;
mod registration;
mod sport;
mod team;

pub use event::Event;
pub use participant::Participant;
pub use registration::Registration;
pub use sport::Sport;
pub use team::Team;
