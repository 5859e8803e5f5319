// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Properties of the result algebra, the message wire format and aggregate
//! replay that must hold for every input.

mod combinators;
mod replay;
mod round_trip;
