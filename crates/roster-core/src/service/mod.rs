//! Business logic services (use cases).
//!
//! Services validate input, resolve references, and translate repository
//! errors into the roster error taxonomy. They depend on traits (ports) --
//! never on concrete infrastructure implementations.

pub mod roster;
