//! Fireworks over a twinkling starfield.
//!
//! [`show::Show`] owns the simulation: shells ease toward a target, burst
//! into fading particles, and a fixed set of stars twinkles behind them. It
//! draws through the [`surface::Surface`] trait; [`canvas::TermCanvas`]
//! implements that trait on top of terminal half-blocks.

pub mod canvas;
pub mod cli;
pub mod config;
pub mod random;
pub mod show;
pub mod surface;
pub mod terminal;
