//! Physics sketches: point masses, tethers, and a rapier2d ragdoll.

#![warn(clippy::pedantic)]
#![warn(missing_docs)]

pub mod body;
pub mod pick;
pub mod ragdoll;
pub mod spring;
