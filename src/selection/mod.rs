//! Choosing which piece (or square) the next confirm acts on.

pub mod controller;

pub use controller::{SelectionController, SelectionMode, StepDirection};
