pub mod events;
pub mod home;
pub mod participants;
pub mod rules;
pub mod sports;
pub mod teams;
