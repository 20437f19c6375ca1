//! Subway route planner server.
//!
//! Loads a subway network from a segment file and answers: "what is the
//! shortest way from here to there, where do I change lines, and what
//! will it cost?"

pub mod config;
pub mod fare;
pub mod itinerary;
pub mod loader;
pub mod network;
pub mod router;
pub mod web;
