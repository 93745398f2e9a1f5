#![allow(dead_code)]

pub mod generate;

pub use generate::{
    impulse, noise_input, random_feedback, random_feedforward, seeded_rng,
};
